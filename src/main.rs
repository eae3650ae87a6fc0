//! datsh: a shell for peer-to-peer versioned archives.
//!
//! This is the main entry point for the `datsh` CLI. It parses arguments,
//! loads the shell context from the datsh home, dispatches to the command
//! handler, and maps errors to exit codes.

mod archive;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
mod glob;
mod render;
mod resolve;
mod store;

#[cfg(test)]
mod test_support;

use cli::Cli;
use context::ShellContext;
use error::{Result, ShellError};
use render::{Format, Terminal};
use std::io;
use std::process::ExitCode;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DATSH_LOG";

fn run(cli: Cli) -> Result<()> {
    let home = ShellContext::resolve_home(cli.home.as_deref())?;
    let mut ctx = ShellContext::load(&home)?;
    log::debug!(
        "loaded {} archive(s) from {}, cwd {}",
        ctx.config.archives.len(),
        ctx.config_path().display(),
        ctx.cwd
    );

    let stdout = io::stdout();
    let mut term = Terminal::new(Format::from_html_flag(cli.html), stdout.lock());
    commands::dispatch(&mut ctx, cli.command, &mut term)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(ShellError::Exit(status)) => ExitCode::from(status),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
