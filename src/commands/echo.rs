//! Implementation of the `echo` command.

use crate::cli::EchoArgs;
use crate::context::ShellContext;
use crate::error::Result;
use crate::render::{Terminal, Text};
use std::io::Write;

/// `echo [-a|--append] [--to <file>] [words]...`
///
/// With `--to` the joined words replace the file content, or are added to
/// the end of it with `--append`. A file that cannot be read for appending
/// is an error.
pub fn cmd_echo<W: Write>(ctx: &ShellContext, args: EchoArgs, term: &mut Terminal<W>) -> Result<()> {
    let text = args.words.join(" ");

    let Some(to) = args.to.as_deref() else {
        return term.emit(&Text(text));
    };

    let target = ctx.resolver().resolve(to)?;
    let content = if args.append {
        let mut existing = target.archive.read_file(&target.path)?;
        existing.push_str(&text);
        existing
    } else {
        text
    };

    target.archive.write_file(&target.path, &content)?;
    log::debug!("wrote {} bytes to {}", content.len(), target.url());
    Ok(())
}
