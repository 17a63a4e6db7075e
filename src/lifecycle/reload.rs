//! Catalogue refresh loop.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::catalogue::Catalogue;

/// Why a refresh was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// A registry source file changed.
    SourceChanged(PathBuf),
    /// SIGHUP received.
    Hangup,
}

/// Refreshes `catalogue` for every trigger until shutdown or until all
/// senders are gone. Triggers queued while a refresh runs collapse into one.
pub async fn run_refresh_loop(
    catalogue: Arc<Catalogue>,
    mut triggers: mpsc::UnboundedReceiver<RefreshTrigger>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let trigger = tokio::select! {
            trigger = triggers.recv() => match trigger {
                Some(trigger) => trigger,
                None => break,
            },
            _ = shutdown.recv() => break,
        };

        let mut coalesced = 0usize;
        while triggers.try_recv().is_ok() {
            coalesced += 1;
        }
        tracing::debug!(trigger = ?trigger, coalesced, "Refreshing catalogue");

        let target = catalogue.clone();
        match tokio::task::spawn_blocking(move || target.refresh()).await {
            Ok(Ok(_)) => {}
            // Already logged by the catalogue.
            Ok(Err(_)) => {}
            Err(e) => tracing::error!(error = %e, "Refresh task failed"),
        }
    }
    tracing::debug!("Refresh loop stopped");
}
