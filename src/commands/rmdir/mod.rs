//! Directory removal with glob expansion.
//!
//! [`remove_dirs`] resolves each pattern against the cwd, expands globs
//! against the target archive, and removes every matched directory. It is
//! a lazy iterator: each removal happens only when the next outcome is
//! requested, and dropping the iterator stops the run.
//!
//! Removal failures are outcomes, not errors; the run continues. A pattern
//! that cannot be resolved (or a glob walk that breaks) ends the run with a
//! single `Err` and no later pattern is attempted.

#[cfg(test)]
mod tests;

use crate::archive::{ArchiveHandle, RmdirOptions};
use crate::cli::RmdirArgs;
use crate::context::ShellContext;
use crate::error::{ArchiveResult, Result, ShellError};
use crate::glob::{DirMatches, is_glob};
use crate::render::{Render, Terminal, escape_html};
use crate::resolve::Resolver;
use std::io::Write;

/// Result of one removal attempt.
#[derive(Debug)]
pub struct RemovalOutcome {
    /// URL of the targeted directory.
    pub url: String,
    /// Path inside the archive.
    pub path: String,
    pub result: ArchiveResult<()>,
}

impl RemovalOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl Render for RemovalOutcome {
    fn to_text(&self) -> String {
        match &self.result {
            Ok(()) => format!("removed {}", self.url),
            Err(e) => format!("rmdir: {}: {}", self.url, e),
        }
    }

    fn to_html(&self) -> String {
        match &self.result {
            Ok(()) => format!(
                r#"<div class="text-default">removed {}</div>"#,
                escape_html(&self.url)
            ),
            Err(e) => format!(
                r#"<div class="text-error">rmdir: {}: {}</div>"#,
                escape_html(&self.url),
                escape_html(&e.to_string())
            ),
        }
    }
}

/// Lazy sequence of removal outcomes. See [`remove_dirs`].
pub struct Removals<'a> {
    resolver: Resolver<'a>,
    options: RmdirOptions,
    patterns: std::vec::IntoIter<String>,
    expanding: Option<DirMatches>,
    finished: bool,
}

/// Remove the directories named by `patterns`, in order.
///
/// Yields one `Ok(RemovalOutcome)` per directory targeted: exactly one for
/// a literal pattern, one per match (possibly none) for a glob.
pub fn remove_dirs<'a, I, S>(resolver: Resolver<'a>, options: RmdirOptions, patterns: I) -> Removals<'a>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Removals {
        resolver,
        options,
        patterns: patterns
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .into_iter(),
        expanding: None,
        finished: false,
    }
}

fn remove_one(archive: &ArchiveHandle, path: String, options: RmdirOptions) -> RemovalOutcome {
    let url = archive.url_for(&path);
    let result = archive.rmdir(&path, options);
    match &result {
        Ok(()) => log::debug!("removed {} (recursive: {})", url, options.recursive),
        Err(e) => log::debug!("failed to remove {}: {}", url, e),
    }
    RemovalOutcome { url, path, result }
}

impl Removals<'_> {
    fn fail(&mut self, err: ShellError) -> Option<Result<RemovalOutcome>> {
        self.finished = true;
        self.expanding = None;
        Some(Err(err))
    }
}

impl Iterator for Removals<'_> {
    type Item = Result<RemovalOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(matches) = self.expanding.as_mut() {
                match matches.next() {
                    Some(Ok(path)) => {
                        return Some(Ok(remove_one(matches.archive(), path, self.options)));
                    }
                    Some(Err(e)) => return self.fail(e.into()),
                    None => self.expanding = None,
                }
                continue;
            }

            let Some(pattern) = self.patterns.next() else {
                self.finished = true;
                return None;
            };

            let target = match self.resolver.resolve(&pattern) {
                Ok(target) => target,
                Err(e) => return self.fail(e.into()),
            };

            if !is_glob(&target.path) {
                return Some(Ok(remove_one(&target.archive, target.path, self.options)));
            }

            match DirMatches::new(target.archive, &target.path) {
                Ok(matches) => self.expanding = Some(matches),
                Err(e) => return self.fail(e.into()),
            }
        }
    }
}

/// `rmdir [-r|--recursive] <pattern>...`
///
/// Streams each outcome as it is produced. Failed removals are printed and
/// do not affect the exit status.
pub fn cmd_rmdir<W: Write>(ctx: &ShellContext, args: RmdirArgs, term: &mut Terminal<W>) -> Result<()> {
    let options = RmdirOptions::from_flags(args.r, args.recursive);

    let mut removed = 0usize;
    let mut failed = 0usize;
    for outcome in remove_dirs(ctx.resolver(), options, args.patterns) {
        let outcome = outcome?;
        if outcome.is_ok() {
            removed += 1;
        } else {
            failed += 1;
        }
        term.emit(&outcome)?;
    }

    log::debug!("rmdir finished: {} removed, {} failed", removed, failed);
    Ok(())
}
