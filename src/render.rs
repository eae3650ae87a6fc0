//! Output rendering.
//!
//! Every value a command prints implements [`Render`], which produces either
//! plain text for a terminal or an HTML fragment for a browser-hosted shell.
//! [`Terminal`] writes rendered values in whichever format was selected.

use crate::error::{Result, ShellError};
use std::io::Write;

/// Output format selected with `--html`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Html,
}

impl Format {
    pub fn from_html_flag(html: bool) -> Self {
        if html { Format::Html } else { Format::Text }
    }
}

/// A value that can be displayed in either output format.
pub trait Render {
    fn to_text(&self) -> String;
    fn to_html(&self) -> String;
}

/// Plain string output (`echo`, `pwd`, `which`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Render for Text {
    fn to_text(&self) -> String {
        self.0.clone()
    }

    fn to_html(&self) -> String {
        escape_html(&self.0)
    }
}

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Writes rendered values to an output stream.
pub struct Terminal<W: Write> {
    format: Format,
    out: W,
}

impl<W: Write> Terminal<W> {
    pub fn new(format: Format, out: W) -> Self {
        Self { format, out }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// Render and write one value followed by a newline.
    ///
    /// Values that render to nothing print nothing.
    pub fn emit(&mut self, value: &dyn Render) -> Result<()> {
        let rendered = match self.format {
            Format::Text => value.to_text(),
            Format::Html => value.to_html(),
        };
        if rendered.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{}", rendered)
            .and_then(|_| self.out.flush())
            .map_err(|e| ShellError::UserError(format!("failed to write output: {}", e)))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
