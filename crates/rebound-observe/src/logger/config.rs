use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use super::{format::LogFormat, level::LogLevel};

/// Logger settings, typically loaded from the `logger` section of a JSON config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Print the event target (module path) next to each record.
    pub with_targets: bool,
    /// Allow ANSI colors; only honored when stdout is a terminal.
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: LogLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    pub(crate) fn ansi(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
