use std::path::PathBuf;

use thiserror::Error;

/// Classifies errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Remote rule list could not be downloaded or decoded
    FetchFailed,
    /// Local rule file missing or unreadable
    LocalReadFailed,
    /// PAC template could not be read
    TemplateMissing,
    /// Output or rewritten rule file could not be written
    WriteFailed,
    /// Invalid configuration value
    Config,
    /// Any other I/O or encoding failure
    Io,
}

impl ErrorKind {
    /// Whether a run must abort on this kind of error.
    ///
    /// Fetch and local read failures degrade to empty rule sets instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ErrorKind::FetchFailed | ErrorKind::LocalReadFailed)
    }
}

/// PAC rule tool error types
#[derive(Error, Debug)]
pub enum PacError {
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to read {}: {message}", path.display())]
    LocalRead { path: PathBuf, message: String },

    #[error("Failed to read PAC template {}: {source}", path.display())]
    TemplateMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PacError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PacError::Fetch { .. } => ErrorKind::FetchFailed,
            PacError::LocalRead { .. } => ErrorKind::LocalReadFailed,
            PacError::TemplateMissing { .. } => ErrorKind::TemplateMissing,
            PacError::Write { .. } => ErrorKind::WriteFailed,
            PacError::Config(_) => ErrorKind::Config,
            PacError::Io(_) | PacError::Json(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, PacError>;
