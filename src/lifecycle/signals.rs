//! OS signal handling.
//!
//! # Responsibilities
//! - SIGTERM/SIGINT → trigger graceful shutdown
//! - SIGHUP → request a catalogue refresh, not shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)

use tokio::sync::mpsc;

use crate::lifecycle::{RefreshTrigger, Shutdown};

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

/// Triggers `shutdown` once a shutdown signal arrives.
pub fn spawn_shutdown_listener(shutdown: &Shutdown) {
    let tx = shutdown.sender();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = tx.send(());
    });
}

/// Forwards SIGHUP as refresh requests.
#[cfg(unix)]
pub fn spawn_hangup_listener(refresh_tx: mpsc::UnboundedSender<RefreshTrigger>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(signal) => signal,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGHUP handler, refresh on signal disabled");
            return;
        }
    };
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received, refreshing catalogue");
            if refresh_tx.send(RefreshTrigger::Hangup).is_err() {
                break;
            }
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_hangup_listener(_refresh_tx: mpsc::UnboundedSender<RefreshTrigger>) {}
