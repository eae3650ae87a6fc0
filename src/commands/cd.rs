//! Implementation of `cd` and `pwd`.

use super::ls;
use crate::cli::CdArgs;
use crate::context::ShellContext;
use crate::error::{ArchiveError, Result};
use crate::render::{Terminal, Text};
use crate::resolve::Cwd;
use std::io::Write;

/// `cd [location]`
///
/// Home is always a valid target. Inside an archive the target must be an
/// existing directory. The new cwd is persisted before the optional
/// listing is printed.
pub fn cmd_cd<W: Write>(ctx: &mut ShellContext, args: CdArgs, term: &mut Terminal<W>) -> Result<()> {
    let location = ctx.resolver().locate(args.location.as_deref().unwrap_or("~"))?;

    if let Some(key) = &location.archive {
        let archive = ctx.library.open(key)?;
        let stat = archive.stat(&location.path)?;
        if !stat.is_dir() {
            return Err(ArchiveError::NotADirectory(location.path.clone()).into());
        }
    }

    ctx.set_cwd(Cwd::from(location.clone()))?;

    if ctx.config.ls_after_cd {
        let listing = ls::list(ctx, &location, false)?;
        term.emit(&listing)?;
    }
    Ok(())
}

/// `pwd`
pub fn cmd_pwd<W: Write>(ctx: &ShellContext, term: &mut Terminal<W>) -> Result<()> {
    term.emit(&Text(ctx.cwd.to_string()))
}
