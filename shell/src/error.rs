//! Error types for tsh

use thiserror::Error;

/// Result type alias for tsh operations
pub type TshResult<T> = Result<T, TshError>;

/// Errors surfaced by the dispatcher to the read-eval loop.
///
/// Handler-internal failures (a file that does not exist, a process that
/// cannot be spawned) never reach this enum: each handler converts them to a
/// printed diagnostic and a non-zero exit code, per the error-handling
/// contract. The display strings below are the exact diagnostics the user
/// sees.
#[derive(Error, Debug)]
pub enum TshError {
    /// Command name not present in the registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Argument count below the command's minimum
    #[error("Missing argument for {0} command.")]
    MissingArgument(String),

    /// IO error while writing command output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Exit requested (not really an error)
    #[error("Exit with code {0}")]
    Exit(i32),
}
