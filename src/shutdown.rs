use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Cloneable handle that asks the HTTP server to stop accepting requests.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Triggers after `delay`, giving in-flight responses time to flush.
    pub fn trigger_after(&self, delay: Duration) {
        let shutdown = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("Shutdown triggered after {:?}", delay);
            shutdown.trigger();
        });
    }

    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this only returns once triggered.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or when `shutdown` is triggered.
pub async fn shutdown_signal(shutdown: Shutdown) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Ctrl+C received, shutting down"),
                Err(e) => {
                    tracing::error!("Failed to listen for Ctrl+C: {}", e);
                    shutdown.wait().await;
                }
            }
        }
        _ = shutdown.wait() => {
            tracing::info!("Shutdown requested");
        }
    }
}
