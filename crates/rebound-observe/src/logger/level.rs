use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::error::LogError;

/// Validated `EnvFilter` directive string, e.g. `"info"` or `"rebound_core=debug,warn"`.
///
/// Validation happens once, when the value is parsed; [`LogLevel::to_env_filter`]
/// then rebuilds the filter from the stored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(String);

impl LogLevel {
    pub fn new(directives: impl Into<String>) -> Result<Self, LogError> {
        let directives = directives.into();
        EnvFilter::try_new(&directives).map_err(|e| LogError::InvalidFilter {
            filter: directives.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self(directives))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter; falls back to `info` if the directives stop parsing.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LogLevel> for String {
    fn from(l: LogLevel) -> Self {
        l.0
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
