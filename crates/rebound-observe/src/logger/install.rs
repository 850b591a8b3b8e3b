use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::{
    config::LogConfig,
    error::{LogError, LogResult},
    timer::UtcRfc3339,
};

pub(crate) fn install_text(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .with_ansi(cfg.ansi())
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

pub(crate) fn install_json(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

#[cfg(target_os = "linux")]
pub(crate) fn install_journald(cfg: &LogConfig) -> LogResult<()> {
    let layer = tracing_journald::layer().map_err(|e| LogError::Journald(e.to_string()))?;

    install(tracing_subscriber::registry().with(cfg.level.to_env_filter()).with(layer))
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn install_journald(_cfg: &LogConfig) -> LogResult<()> {
    Err(LogError::JournaldUnavailable)
}

fn install<S>(subscriber: S) -> LogResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|_| LogError::AlreadyInstalled)
}
