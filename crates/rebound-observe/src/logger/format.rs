use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::LogError;

/// Where and how log records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogFormat {
    /// Human-readable lines on stdout.
    #[default]
    Text,
    /// One JSON object per line on stdout.
    Json,
    /// systemd-journald (linux only).
    Journald,
}

impl LogFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Journald => "journald",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "journald" | "journal" if cfg!(target_os = "linux") => Ok(LogFormat::Journald),
            "journald" | "journal" => Err(LogError::JournaldUnavailable),
            _ => Err(LogError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogFormat {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LogFormat> for String {
    fn from(f: LogFormat) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
