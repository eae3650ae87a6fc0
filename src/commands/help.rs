//! Implementation of the `help` command.

use super::{BUILTINS, Builtin};
use crate::error::Result;
use crate::render::{Render, Terminal, escape_html};
use std::io::Write;

/// Two-column table of command names and descriptions.
pub struct HelpTable<'a>(pub &'a [Builtin]);

impl HelpTable<'_> {
    fn name_width(&self) -> usize {
        self.0.iter().map(|b| b.name.len()).max().unwrap_or(0) + 2
    }
}

impl Render for HelpTable<'_> {
    fn to_text(&self) -> String {
        let width = self.name_width();
        self.0
            .iter()
            .map(|b| format!("{:width$} {}", b.name, b.description, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_html(&self) -> String {
        let width = self.name_width();
        let rows: String = self
            .0
            .iter()
            .map(|b| {
                format!(
                    r#"<div class="text-default"><span>{}{}</span> <span class="text-muted">{}</span></div>"#,
                    escape_html(b.name),
                    "&nbsp;".repeat(width - b.name.len()),
                    escape_html(b.description)
                )
            })
            .collect();
        format!("<div>{}</div>", rows)
    }
}

/// `help`
pub fn cmd_help<W: Write>(term: &mut Terminal<W>) -> Result<()> {
    term.emit(&HelpTable(BUILTINS))
}
