//! Shutdown signal shared by the accept loops.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// One-way stop signal. Listeners subscribe and break their accept loops
/// when it fires; in-flight sessions are left to run until their peers
/// disconnect.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Arc<Self> {
        let (tx, _) = watch::channel(false);
        Arc::new(Self { tx })
    }

    /// Subscribe to the stop signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Fire the signal. Idempotent.
    pub fn trigger(&self) {
        if self.tx.send_replace(true) {
            return;
        }
        info!("shutdown triggered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_trigger() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.trigger();
        rx.changed().await.unwrap();
        assert!(*rx.borrow());
    }

    #[tokio::test]
    async fn trigger_is_idempotent() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
        assert!(*shutdown.subscribe().borrow());
    }
}
