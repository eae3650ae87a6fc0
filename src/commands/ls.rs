//! Implementation of the `ls` command.
//!
//! At home it lists the library; inside an archive it lists a directory.

use crate::archive::{ArchiveInfo, DirEntry};
use crate::cli::LsArgs;
use crate::context::ShellContext;
use crate::error::Result;
use crate::render::{Render, Terminal, escape_html};
use crate::resolve::Location;
use std::cmp::Ordering;
use std::io::Write;

/// The configured archives, shown at home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryListing(pub Vec<ArchiveInfo>);

impl Render for LibraryListing {
    fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|archive| format!("{} ({})", archive.title, archive.url))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_html(&self) -> String {
        let rows: String = self
            .0
            .iter()
            .map(|archive| {
                format!(
                    "<div>{} ({})</div>",
                    escape_html(&archive.title),
                    escape_html(&archive.url)
                )
            })
            .collect();
        format!("<div>{}</div>", rows)
    }
}

/// A directory listing.
///
/// Entries are already filtered and ordered: directories first, then by
/// name ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// URL of the listed directory.
    pub url: String,
    pub entries: Vec<DirEntry>,
}

impl Listing {
    pub fn new(url: String, mut entries: Vec<DirEntry>, show_hidden: bool) -> Self {
        if !show_hidden {
            entries.retain(|entry| !entry.is_hidden());
        }
        entries.sort_by(compare_entries);
        Self { url, entries }
    }

    fn entry_url(&self, entry: &DirEntry) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), entry.name)
    }
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

impl Render for Listing {
    fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                if entry.is_dir() {
                    format!("{}/", entry.name)
                } else {
                    entry.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_html(&self) -> String {
        let rows: String = self
            .entries
            .iter()
            .map(|entry| {
                let color = if entry.is_hidden() { "muted" } else { "default" };
                let name = escape_html(&entry.name);
                let href = escape_html(&self.entry_url(entry));
                if entry.is_dir() {
                    format!(
                        r#"<div class="text-{}"><strong><a href="{}" target="_blank" data-command="cd {}">{}</a></strong></div>"#,
                        color, href, name, name
                    )
                } else {
                    format!(
                        r#"<div class="text-{}"><span><a href="{}" target="_blank">{}</a></span></div>"#,
                        color, href, name
                    )
                }
            })
            .collect();
        format!("<div>{}</div>", rows)
    }
}

/// What `ls` prints for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LsOutput {
    Library(LibraryListing),
    Directory(Listing),
}

impl Render for LsOutput {
    fn to_text(&self) -> String {
        match self {
            LsOutput::Library(listing) => listing.to_text(),
            LsOutput::Directory(listing) => listing.to_text(),
        }
    }

    fn to_html(&self) -> String {
        match self {
            LsOutput::Library(listing) => listing.to_html(),
            LsOutput::Directory(listing) => listing.to_html(),
        }
    }
}

/// List `location`, which may be home.
pub(super) fn list(ctx: &ShellContext, location: &Location, all: bool) -> Result<LsOutput> {
    let Some(key) = &location.archive else {
        return Ok(LsOutput::Library(LibraryListing(ctx.library.list())));
    };

    let archive = ctx.library.open(key)?;
    let entries = archive.readdir(&location.path)?;
    log::debug!(
        "listed {} entries in {}",
        entries.len(),
        archive.url_for(&location.path)
    );

    Ok(LsOutput::Directory(Listing::new(
        archive.url_for(&location.path),
        entries,
        all || ctx.config.show_hidden,
    )))
}

/// `ls [-a|--all] [location]`
pub fn cmd_ls<W: Write>(ctx: &ShellContext, args: LsArgs, term: &mut Terminal<W>) -> Result<()> {
    let location = ctx.resolver().locate(args.location.as_deref().unwrap_or("."))?;
    let listing = list(ctx, &location, args.all)?;
    term.emit(&listing)
}
