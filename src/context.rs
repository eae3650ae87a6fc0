//! Shell context resolution for datsh.
//!
//! This module locates the datsh home directory and loads everything a
//! command needs from it: the config, the archive library and the current
//! working directory persisted from the previous invocation.
//!
//! Home layout:
//!
//! ```text
//! <home>/config.yaml     archives and shell settings
//! <home>/session.json    current working directory
//! <home>/commands.json   installed commands
//! ```

use crate::archive::Library;
use crate::config::Config;
use crate::error::{Result, ShellError};
use crate::fs::atomic_write_file;
use crate::resolve::{Cwd, Resolver};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "DATSH_HOME";

/// Home directory name under the user's home when nothing overrides it.
pub const DEFAULT_HOME_DIR: &str = ".datsh";

pub const CONFIG_FILE: &str = "config.yaml";
pub const SESSION_FILE: &str = "session.json";
pub const COMMANDS_FILE: &str = "commands.json";

/// Persisted session state.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Session {
    #[serde(default)]
    cwd: Cwd,
}

/// Everything a command runs against.
pub struct ShellContext {
    /// Absolute path to the datsh home directory.
    pub home: PathBuf,

    pub config: Config,

    pub library: Library,

    /// Current working directory. Change it with [`ShellContext::set_cwd`]
    /// so the change is persisted.
    pub cwd: Cwd,
}

impl ShellContext {
    /// Determine the home directory.
    ///
    /// Order: explicit `--home`, then `$DATSH_HOME`, then `~/.datsh`.
    pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_HOME_DIR))
            .ok_or_else(|| {
                ShellError::UserError(format!(
                    "could not determine a home directory.\n\n\
                     Set {} or pass --home <dir>.",
                    HOME_ENV
                ))
            })
    }

    /// Load the context from a home directory.
    ///
    /// A missing config means defaults (no archives). A session whose cwd
    /// names an archive that is no longer configured falls back to home.
    pub fn load<P: AsRef<Path>>(home: P) -> Result<Self> {
        let home = home.as_ref().to_path_buf();
        let config = Config::load_or_default(home.join(CONFIG_FILE))?;
        let library = Library::from_config(&config, &home);
        let cwd = load_session(&home.join(SESSION_FILE), &library);

        Ok(Self {
            home,
            config,
            library,
            cwd,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    pub fn session_path(&self) -> PathBuf {
        self.home.join(SESSION_FILE)
    }

    pub fn commands_path(&self) -> PathBuf {
        self.home.join(COMMANDS_FILE)
    }

    /// Resolver bound to the current cwd.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.library, &self.cwd)
    }

    /// Change and persist the current working directory.
    pub fn set_cwd(&mut self, cwd: Cwd) -> Result<()> {
        let session = Session { cwd };
        let json = serde_json::to_string_pretty(&session)
            .map_err(|e| ShellError::UserError(format!("failed to serialize session: {}", e)))?;
        let path = self.session_path();
        atomic_write_file(&path, &json).map_err(|e| {
            ShellError::UserError(format!(
                "failed to write session file '{}': {}",
                path.display(),
                e
            ))
        })?;

        log::debug!("cwd is now {}", session.cwd);
        self.cwd = session.cwd;
        Ok(())
    }
}

fn load_session(path: &Path, library: &Library) -> Cwd {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Cwd::home(),
    };

    let session: Session = match serde_json::from_str(&content) {
        Ok(session) => session,
        Err(e) => {
            log::warn!(
                "ignoring unreadable session file '{}': {}",
                path.display(),
                e
            );
            return Cwd::home();
        }
    };

    match &session.cwd.archive {
        Some(key) if !library.contains(key) => {
            log::warn!("archive '{}' is no longer configured; starting at home", key);
            Cwd::home()
        }
        _ => session.cwd,
    }
}
