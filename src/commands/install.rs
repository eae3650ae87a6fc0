//! Implementation of `install` and `which`.
//!
//! Installed commands live in the command store under the datsh home. An
//! install only records where the script is; nothing is fetched or run.

use super::is_builtin;
use crate::archive::{ARCHIVE_SCHEME, path as archive_path};
use crate::cli::{InstallArgs, WhichArgs};
use crate::context::ShellContext;
use crate::error::{Result, ShellError};
use crate::render::{Terminal, Text};
use crate::resolve::ResolvedTarget;
use crate::store::{CommandStore, InstalledCommand};
use std::io::Write;

/// Answer printed by `which` for commands built into the shell.
pub const BUILTIN: &str = "builtin";

fn script_target(ctx: &ShellContext, cmd: &str, url: Option<&str>) -> Result<ResolvedTarget> {
    let resolver = ctx.resolver();
    match url {
        Some(url) if !url.starts_with(ARCHIVE_SCHEME) => Err(ShellError::UserError(format!(
            "install: '{}' is not a {} url",
            url, ARCHIVE_SCHEME
        ))),
        Some(url) => Ok(resolver.resolve(url)?),
        None => {
            let cwd = resolver.resolve_cwd()?;
            Ok(ResolvedTarget {
                path: archive_path::join(&cwd.path, &format!("{}.js", cmd)),
                archive: cwd.archive,
            })
        }
    }
}

/// `install <cmd> [url]`
pub fn cmd_install(ctx: &ShellContext, args: InstallArgs) -> Result<()> {
    let cmd = args
        .cmd
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ShellError::UserError("cmd is required".to_string()))?;

    let target = script_target(ctx, cmd, args.url.as_deref())?;
    let stat = target.archive.stat(&target.path)?;
    if stat.is_dir() {
        return Err(ShellError::UserError(
            "command can not be loaded from directory".to_string(),
        ));
    }

    let path = ctx.commands_path();
    let mut store = CommandStore::load(&path)?;
    let url = target.url();
    store.insert(cmd, InstalledCommand::new(url.clone()));
    store.save(&path)?;

    log::info!("installed '{}' from {}", cmd, url);
    Ok(())
}

/// `which <cmd>`
pub fn cmd_which<W: Write>(ctx: &ShellContext, args: WhichArgs, term: &mut Terminal<W>) -> Result<()> {
    let store = CommandStore::load(ctx.commands_path())?;

    let answer = match store.get(&args.cmd) {
        Some(installed) => installed.url.clone(),
        None if is_builtin(&args.cmd) => BUILTIN.to_string(),
        None => return Err(ShellError::CommandNotFound(args.cmd)),
    };
    term.emit(&Text(answer))
}
