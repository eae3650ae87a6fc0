//! CLI argument parsing for datsh.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// datsh: a shell for navigating and editing peer-to-peer versioned archives.
///
/// Archives are addressed as `dat://<key>/path`. Home (`~`) lists every
/// configured archive; `cd <key>` enters one.
#[derive(Parser, Debug)]
#[command(name = "datsh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Home directory holding config, session and installed commands.
    ///
    /// Defaults to $DATSH_HOME, then ~/.datsh.
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Render output as HTML fragments.
    #[arg(long, global = true)]
    pub html: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse one line of the interactive shell (already split into words).
    pub fn try_parse_words<I, T>(words: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv = std::iter::once(OsString::from("datsh")).chain(words.into_iter().map(Into::into));
        Self::try_parse_from(argv)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List files in the directory.
    Ls(LsArgs),

    /// Change the current directory.
    Cd(CdArgs),

    /// Print the current directory.
    Pwd,

    /// Make a new directory.
    Mkdir(MkdirArgs),

    /// Remove directories; patterns may contain globs.
    ///
    /// Each targeted directory reports its own outcome. A failed removal
    /// does not stop the rest.
    Rmdir(RmdirArgs),

    /// Move a file or folder.
    Mv(TransferArgs),

    /// Copy a file or folder.
    Cp(TransferArgs),

    /// Remove a file.
    Rm(RmArgs),

    /// Output the arguments, or write them to a file.
    Echo(EchoArgs),

    /// Install a command from an archive.
    Install(InstallArgs),

    /// Show where a command comes from.
    Which(WhichArgs),

    /// List the built-in commands.
    Help,

    /// Run an interactive session reading commands from stdin.
    Shell,
}

/// Arguments for the `ls` command.
#[derive(Parser, Debug, Default)]
pub struct LsArgs {
    /// Include entries whose names start with a dot.
    #[arg(short, long)]
    pub all: bool,

    /// Location to list (defaults to the current directory).
    pub location: Option<String>,
}

/// Arguments for the `cd` command.
#[derive(Parser, Debug, Default)]
pub struct CdArgs {
    /// Location to change to (defaults to home).
    pub location: Option<String>,
}

/// Arguments for the `mkdir` command.
#[derive(Parser, Debug, Default)]
pub struct MkdirArgs {
    /// Directory to create.
    pub dst: Option<String>,
}

/// Arguments for the `rmdir` command.
///
/// `-r` and `--recursive` are separate flags here and are merged into one
/// option when the command runs.
#[derive(Parser, Debug, Default)]
pub struct RmdirArgs {
    /// Remove non-empty directories and their contents.
    #[arg(short = 'r')]
    pub r: bool,

    /// Same as -r.
    #[arg(long)]
    pub recursive: bool,

    /// Directories or glob patterns to remove.
    #[arg(required = true)]
    pub patterns: Vec<String>,
}

/// Arguments for `mv` and `cp`.
#[derive(Parser, Debug, Default)]
pub struct TransferArgs {
    /// Source path.
    pub src: Option<String>,

    /// Destination path.
    pub dst: Option<String>,
}

/// Arguments for the `rm` command.
#[derive(Parser, Debug, Default)]
pub struct RmArgs {
    /// File to remove.
    pub dst: Option<String>,
}

/// Arguments for the `echo` command.
#[derive(Parser, Debug, Default)]
pub struct EchoArgs {
    /// Append to the file given with --to instead of replacing it.
    #[arg(short, long)]
    pub append: bool,

    /// Write the output to this file instead of printing it.
    #[arg(long, value_name = "FILE")]
    pub to: Option<String>,

    /// Words to output, joined with spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

/// Arguments for the `install` command.
#[derive(Parser, Debug, Default)]
pub struct InstallArgs {
    /// Name to install the command under.
    pub cmd: Option<String>,

    /// dat:// url of the command script (defaults to `<cwd>/<cmd>.js`).
    pub url: Option<String>,
}

/// Arguments for the `which` command.
#[derive(Parser, Debug, Default)]
pub struct WhichArgs {
    /// Command name to look up.
    pub cmd: String,
}
