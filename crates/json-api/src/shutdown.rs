//! Graceful shutdown
//!
//! A termination signal stops the listener and lets in-flight requests
//! finish. Once the server has returned, detached mail sends get a bounded
//! window to complete.

use std::{io, sync::Arc, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::{info, warn};

use openconnect_app::background::BackgroundTasks;

use crate::limiter::RateLimiter;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => result.map(|()| "SIGINT"),
        result = terminate => result.map(|()| "SIGTERM"),
    }
}

/// Wait for SIGINT or SIGTERM, then stop accepting work.
pub(crate) async fn listen(
    handle: ServerHandle,
    limiter: Arc<RateLimiter>,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(signal, "shutting down server");

    limiter.stop();
    handle.stop_graceful(None);

    Ok(())
}

/// Give background tasks up to `timeout` to finish.
pub(crate) async fn drain_background(background: &BackgroundTasks, timeout: Duration) {
    info!(
        in_flight = background.in_flight(),
        "completing background tasks"
    );

    match background.drain(timeout).await {
        Ok(()) => info!("background tasks completed"),
        Err(timed_out) => warn!("{timed_out}"),
    }
}
