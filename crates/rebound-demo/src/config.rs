use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use rebound_model::BackoffConfig;
use rebound_observe::LogConfig;

/// Demo settings loaded from an optional JSON file.
///
/// ```json
/// {
///   "logger":  { "format": "text", "level": "rebound_core=debug,info" },
///   "backoff": { "initialIntervalMs": 200, "multiplier": 2.0, "maxElapsedTimeMs": 10000 },
///   "failures": 4
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub logger: LogConfig,
    pub backoff: BackoffConfig,
    /// How many times the simulated operation fails before it succeeds.
    pub failures: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            logger: LogConfig {
                level: "rebound_core=debug,info"
                    .parse()
                    .unwrap_or_default(),
                ..Default::default()
            },
            backoff: BackoffConfig::default(),
            failures: 3,
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
