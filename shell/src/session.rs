//! Session state: the virtual current directory and the command history.
//!
//! Exactly one `Session` exists per interactive run. It is passed explicitly
//! into every handler (no process-wide globals), so tests can run several
//! sessions side by side. The current directory only changes through a
//! successful `cd`; history only grows, one entry per dispatched line.

use std::env;
use std::path::{Path, PathBuf};

pub struct Session {
    /// Virtual current directory, always an absolute path (never a `~`
    /// sentinel - the prompt compares against `home` to render `~`).
    pub cwd: PathBuf,
    home: PathBuf,
    user: String,
    history: Vec<String>,
}

impl Session {
    #[must_use]
    pub fn new(cwd: PathBuf, home: PathBuf, user: impl Into<String>) -> Self {
        Self {
            cwd,
            home,
            user: user.into(),
            history: Vec::new(),
        }
    }

    /// Session rooted at the process's real working directory, with home and
    /// user taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let home = dirs::home_dir().unwrap_or_else(|| cwd.clone());
        let user = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "anonymous".to_string());
        Self::new(cwd, home, user)
    }

    /// Resolve a user-typed path token to an absolute location.
    ///
    /// Never consults the file store: existence and type checks are the
    /// caller's job, performed after resolution, so that diagnostics can
    /// name the exact attempted path.
    #[must_use]
    pub fn resolve(&self, token: &str) -> PathBuf {
        if token.is_empty() || token == "~" {
            self.home.clone()
        } else if token == ".." {
            self.cwd
                .parent()
                .map_or_else(|| self.cwd.clone(), Path::to_path_buf)
        } else if token.starts_with('/') || Path::new(token).is_absolute() {
            PathBuf::from(token)
        } else {
            self.cwd.join(token)
        }
    }

    /// Record one dispatched input line. The caller skips blank lines and
    /// the `exit` command.
    pub fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `<user>@<host>:<dir>$ ` - `<dir>` collapses to `~` in the home
    /// directory, otherwise the absolute path with `/` separators.
    #[must_use]
    pub fn prompt(&self, host: &str) -> String {
        let dir = if self.cwd == self.home {
            "~".to_string()
        } else {
            display_path(&self.cwd)
        };
        format!("{}@{}:{}$ ", self.user, host, dir)
    }
}

/// Render a path for output, separators normalized to `/`.
#[must_use]
pub fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
