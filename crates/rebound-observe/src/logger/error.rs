use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("unknown log format: {0} (expected: text|json|journald)")]
    UnknownFormat(String),

    #[error("journald output is only available on linux")]
    JournaldUnavailable,

    #[error("journald connection failed: {0}")]
    Journald(String),

    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("global logger is already installed")]
    AlreadyInstalled,
}

pub type LogResult<T> = Result<T, LogError>;
