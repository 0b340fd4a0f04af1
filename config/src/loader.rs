use std::path::PathBuf;

use crate::{ConfigError, TshConfig};

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/tsh/tsh.yaml"));
        }
        search_paths.push(PathBuf::from("./tsh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    /// Load and merge configuration. An explicit file (`with_file` or the
    /// `TSH_CONFIG` env var) replaces the search-path files entirely;
    /// environment variables apply on top either way.
    pub fn load(&self) -> Result<TshConfig, ConfigError> {
        let mut config = TshConfig::default();

        if let Ok(env_path) = std::env::var("TSH_CONFIG") {
            let content =
                std::fs::read_to_string(&env_path).map_err(|e| ConfigError::ReadFile {
                    path: PathBuf::from(&env_path),
                    source: e,
                })?;
            config = serde_yaml::from_str(&content)?;
        } else if let Some(ref explicit) = self.explicit_file {
            let content = std::fs::read_to_string(explicit).map_err(|e| ConfigError::ReadFile {
                path: explicit.clone(),
                source: e,
            })?;
            config = serde_yaml::from_str(&content)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        config = serde_yaml::from_str(&content)?;
                    }
                }
            }
        }

        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    fn apply_env_overrides(config: &mut TshConfig) {
        if let Ok(file) = std::env::var("TSH_HISTORY_FILE") {
            config.shell.history.file = file;
        }
        if let Ok(level) = std::env::var("TSH_LOG_LEVEL") {
            config.logging.level = level;
        }
    }
}

/// Expand a leading `~` in a configured path.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
