use thiserror::Error;

/// Errors reported by the collaborator capabilities (file store, process
/// control, network info).
///
/// Variants carry pre-rendered strings so the enum stays `Clone` and the
/// shell can echo them verbatim in diagnostics.
#[derive(Debug, Clone, Error)]
pub enum SysError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not a directory: {0}")]
    NotDirectory(String),

    #[error("is a directory: {0}")]
    IsDirectory(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("process failed: {0}")]
    ProcessFailed(String),

    #[error("not supported on this platform: {0}")]
    Unsupported(String),
}

impl SysError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    #[must_use]
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied(reason.into())
    }

    #[must_use]
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists(path.into())
    }

    #[must_use]
    pub fn not_directory(path: impl Into<String>) -> Self {
        Self::NotDirectory(path.into())
    }

    #[must_use]
    pub fn is_directory(path: impl Into<String>) -> Self {
        Self::IsDirectory(path.into())
    }

    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    #[must_use]
    pub fn io(reason: impl std::fmt::Display) -> Self {
        Self::Io(reason.to_string())
    }

    #[must_use]
    pub fn process_failed(reason: impl Into<String>) -> Self {
        Self::ProcessFailed(reason.into())
    }

    #[must_use]
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }
}

pub type SysResult<T> = Result<T, SysError>;
