use std::path::PathBuf;

use tracing::{info, warn};

use rebound_core::prelude::*;
use rebound_observe::init_logger;

mod config;
use config::DemoConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) config
    let cfg = match std::env::args_os().nth(1) {
        Some(path) => DemoConfig::load(&PathBuf::from(path))?,
        None => DemoConfig::default(),
    };

    // 2) logger
    init_logger(&cfg.logger)?;
    info!(backoff = ?cfg.backoff, failures = cfg.failures, "demo starting");

    // 3) ctrl-c cancels the pending wait
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; cancelling retries");
            on_signal.cancel();
        }
    });

    // 4) flaky operation
    let mut backoff = Backoff::new(cfg.backoff)?;
    let mut remaining = cfg.failures;
    let result = backoff
        .retry(&cancel, || {
            let left = remaining;
            remaining = remaining.saturating_sub(1);
            async move {
                if left > 0 {
                    Err(format!("simulated outage ({left} failures left)"))
                } else {
                    Ok(())
                }
            }
        })
        .await;

    match result {
        Ok(()) => info!("operation succeeded"),
        Err(RetryError::Cancelled) => warn!("retry cancelled before the operation succeeded"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
