mod config;
mod error;
mod format;
mod install;
mod level;
mod timer;

pub use config::LogConfig;
pub use error::{LogError, LogResult};
pub use format::LogFormat;
pub use level::LogLevel;
pub use timer::UtcRfc3339;

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Can succeed only once per process; later calls return [`LogError::AlreadyInstalled`].
///
/// # Examples
/// ```no_run
/// use rebound_observe::{LogConfig, init_logger};
///
/// init_logger(&LogConfig::default()).expect("logger");
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LogConfig) -> LogResult<()> {
    match cfg.format {
        LogFormat::Text => install::install_text(cfg),
        LogFormat::Json => install::install_json(cfg),
        LogFormat::Journald => install::install_journald(cfg),
    }
}
