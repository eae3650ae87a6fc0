//! Command implementations for datsh.
//!
//! This module provides the dispatcher that routes parsed commands to their
//! implementations. Every command writes through a [`Terminal`] so the same
//! code serves one-shot invocations and the interactive shell.

mod cd;
mod echo;
mod files;
mod help;
mod install;
mod ls;
mod rmdir;
mod shell;

use crate::cli::Command;
use crate::context::ShellContext;
use crate::error::Result;
use crate::render::Terminal;
use std::io::{self, IsTerminal, Write};

/// A command built into the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub name: &'static str,
    pub description: &'static str,
}

/// Built-in commands, in the order `help` lists them.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "ls",
        description: "List files in the directory",
    },
    Builtin {
        name: "cd",
        description: "Change the current directory",
    },
    Builtin {
        name: "pwd",
        description: "Fetch the current directory",
    },
    Builtin {
        name: "mkdir",
        description: "Make a new directory",
    },
    Builtin {
        name: "rmdir",
        description: "Remove directories, expanding glob patterns",
    },
    Builtin {
        name: "mv",
        description: "Move a file or folder",
    },
    Builtin {
        name: "cp",
        description: "Copy a file or folder",
    },
    Builtin {
        name: "rm",
        description: "Remove a file",
    },
    Builtin {
        name: "echo",
        description: "Output the arguments",
    },
    Builtin {
        name: "install",
        description: "Install a command from an archive",
    },
    Builtin {
        name: "which",
        description: "Show where a command comes from",
    },
    Builtin {
        name: "help",
        description: "List the built-in commands",
    },
    Builtin {
        name: "shell",
        description: "Start an interactive session",
    },
];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.iter().any(|builtin| builtin.name == name)
}

/// Dispatch a command to its implementation.
///
/// `shell` reads from stdin; everything else only touches the context and
/// the terminal.
pub fn dispatch<W: Write>(
    ctx: &mut ShellContext,
    command: Command,
    term: &mut Terminal<W>,
) -> Result<()> {
    match command {
        Command::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell::cmd_shell(ctx, stdin.lock(), term, interactive)
        }
        command => run(ctx, command, term),
    }
}

/// Run every command except `shell`.
fn run<W: Write>(ctx: &mut ShellContext, command: Command, term: &mut Terminal<W>) -> Result<()> {
    match command {
        Command::Ls(args) => ls::cmd_ls(ctx, args, term),
        Command::Cd(args) => cd::cmd_cd(ctx, args, term),
        Command::Pwd => cd::cmd_pwd(ctx, term),
        Command::Mkdir(args) => files::cmd_mkdir(ctx, args),
        Command::Rmdir(args) => rmdir::cmd_rmdir(ctx, args, term),
        Command::Mv(args) => files::cmd_mv(ctx, args),
        Command::Cp(args) => files::cmd_cp(ctx, args),
        Command::Rm(args) => files::cmd_rm(ctx, args),
        Command::Echo(args) => echo::cmd_echo(ctx, args, term),
        Command::Install(args) => install::cmd_install(ctx, args),
        Command::Which(args) => install::cmd_which(ctx, args, term),
        Command::Help => help::cmd_help(term),
        Command::Shell => shell::nested_shell(),
    }
}
