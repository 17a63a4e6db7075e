//! Registry file watcher for hot reload.

use std::path::PathBuf;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::lifecycle::RefreshTrigger;

/// A watcher that monitors registry source files and requests a catalogue
/// refresh when one of them changes.
pub struct RegistryWatcher {
    paths: Vec<PathBuf>,
    poll_interval: Duration,
    refresh_tx: mpsc::UnboundedSender<RefreshTrigger>,
}

impl RegistryWatcher {
    /// Create a new RegistryWatcher sending refresh requests on `refresh_tx`.
    pub fn new(
        paths: Vec<PathBuf>,
        poll_interval: Duration,
        refresh_tx: mpsc::UnboundedSender<RefreshTrigger>,
    ) -> Self {
        Self {
            paths,
            poll_interval,
            refresh_tx,
        }
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.refresh_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            tracing::info!(path = ?path, "Registry change detected");
                            let _ = tx.send(RefreshTrigger::SourceChanged(path));
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        for path in &self.paths {
            watcher.watch(path, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(paths = ?self.paths, "Registry watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rewrite_triggers_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(&path, "[[routes]]\npattern = \"/jobs\"\nhandler = \"jobs\"\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watcher = RegistryWatcher::new(vec![path.clone()], Duration::from_millis(50), tx);
        let _handle = watcher.run().unwrap();

        std::fs::write(&path, "[[routes]]\npattern = \"/steps\"\nhandler = \"steps\"\n").unwrap();

        let trigger = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match rx.recv().await {
                    Some(RefreshTrigger::SourceChanged(changed))
                        if changed.file_name() == path.file_name() =>
                    {
                        break changed;
                    }
                    Some(_) => continue,
                    None => panic!("watcher channel closed"),
                }
            }
        })
        .await
        .expect("no refresh trigger within 5s");

        assert_eq!(trigger.file_name(), path.file_name());
    }
}
