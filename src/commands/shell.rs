//! Implementation of the interactive `shell` command.
//!
//! Each line is split with shell quoting rules and parsed with the same clap
//! definitions as the command line. Errors are printed and the loop goes on;
//! `exit [status]` or end of input leaves.

use crate::cli::Cli;
use crate::context::ShellContext;
use crate::error::{Result, ShellError};
use crate::render::{Format, Render, Terminal, Text, escape_html};
use clap::error::ErrorKind;
use std::io::{BufRead, Write};

/// A command failure inside the shell.
struct ErrorLine(String);

impl Render for ErrorLine {
    fn to_text(&self) -> String {
        format!("Error: {}", self.0)
    }

    fn to_html(&self) -> String {
        format!(
            r#"<div class="text-error">Error: {}</div>"#,
            escape_html(&self.0)
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit(u8),
}

/// Parse the optional status of `exit`.
fn exit_status(args: &[String]) -> Result<u8> {
    match args {
        [] => Ok(0),
        [status] => status
            .parse()
            .map_err(|_| ShellError::UserError(format!("invalid exit code: {}", status))),
        _ => Err(ShellError::UserError("exit: too many arguments".to_string())),
    }
}

/// `shell`
///
/// `interactive` controls the prompt, which goes to stderr so piped output
/// stays clean. A non-zero `exit` status comes back as [`ShellError::Exit`].
pub fn cmd_shell<R: BufRead, W: Write>(
    ctx: &mut ShellContext,
    mut input: R,
    term: &mut Terminal<W>,
    interactive: bool,
) -> Result<()> {
    let mut line = String::new();
    loop {
        if interactive {
            eprint!("{}> ", ctx.cwd);
        }

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| ShellError::UserError(format!("failed to read input: {}", e)))?;
        if read == 0 {
            break;
        }

        match run_line(ctx, line.trim(), term) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit(0)) => break,
            Ok(Flow::Exit(status)) => return Err(ShellError::Exit(status)),
            Err(e) => {
                log::debug!("command failed with exit code {}: {}", e.exit_code(), e);
                term.emit(&ErrorLine(e.to_string()))?;
            }
        }
    }
    Ok(())
}

/// `shell` run from inside a shell.
pub(super) fn nested_shell() -> Result<()> {
    Err(ShellError::UserError(
        "already in an interactive shell".to_string(),
    ))
}

fn run_line<W: Write>(ctx: &mut ShellContext, line: &str, term: &mut Terminal<W>) -> Result<Flow> {
    let words = shell_words::split(line)
        .map_err(|e| ShellError::UserError(format!("parse error: {}", e)))?;

    match words.first().map(String::as_str) {
        None => return Ok(Flow::Continue),
        Some("exit") => return exit_status(&words[1..]).map(Flow::Exit),
        Some(_) => {}
    }

    let cli = match Cli::try_parse_words(words.iter()) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                term.emit(&Text(e.to_string().trim_end().to_string()))?;
                return Ok(Flow::Continue);
            }
            ErrorKind::InvalidSubcommand => {
                return Err(ShellError::CommandNotFound(words[0].clone()));
            }
            _ => return Err(ShellError::UserError(e.to_string().trim_end().to_string())),
        },
    };

    if cli.home.is_some() {
        return Err(ShellError::UserError(
            "--home cannot be changed inside a shell".to_string(),
        ));
    }

    let format = term.format();
    if cli.html {
        term.set_format(Format::Html);
    }
    let result = super::run(ctx, cli.command, term);
    term.set_format(format);

    result.map(|()| Flow::Continue)
}
