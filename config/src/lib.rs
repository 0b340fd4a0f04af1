//! tsh configuration system.
//!
//! YAML configuration for the interactive terminal, loaded in layers:
//!
//! 1. Compiled-in defaults
//! 2. `~/.config/tsh/tsh.yaml` (user)
//! 3. `./tsh.yaml` (project-local)
//! 4. `TSH_CONFIG=/path/to/config.yaml` (explicit, replaces the files above)
//! 5. Environment variables (highest priority)
//!
//! # Example configuration
//!
//! ```yaml
//! shell:
//!   history:
//!     enabled: true
//!     file: "~/.tsh_history"
//!     max_entries: 1000
//!
//! logging:
//!   level: "info"
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{expand_path, ConfigLoader};
pub use types::{HistoryConfig, LoggingConfig, ShellConfig, TshConfig};

/// Load configuration from the default locations.
pub fn load() -> Result<TshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<TshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}
