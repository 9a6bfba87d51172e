//! Shutdown coordination.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

/// Coordinator for graceful shutdown.
///
/// Long-running tasks either subscribe to the broadcast channel or await
/// [`Shutdown::wait`]. A trigger is also latched, so `wait()` resolves even
/// when it is first polled after the trigger. Cloning shares the same state.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        let (triggered, _) = watch::channel(false);
        Self {
            tx,
            triggered: Arc::new(triggered),
        }
    }

    /// Subscribe to the shutdown signal.
    ///
    /// Subscribe before triggering: a receiver created afterwards misses it.
    /// Use [`Shutdown::wait`] where that ordering cannot be guaranteed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// A future that resolves once shutdown is triggered, whether that
    /// happened before or after this call. For APIs that take a shutdown
    /// future (e.g. `axum::serve(..).with_graceful_shutdown`).
    pub fn wait(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let latch = Arc::clone(&self.triggered);
        async move {
            // The future owns a sender, so the channel stays open until triggered.
            let mut rx = latch.subscribe();
            let _ = rx.wait_for(|triggered| *triggered).await;
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.triggered.borrow()
    }

    pub fn trigger(&self) {
        self.triggered.send_replace(true);
        let receivers = self.tx.send(()).unwrap_or(0);
        tracing::debug!(receivers, "Shutdown triggered");
    }

    /// Number of tasks still listening on the broadcast channel.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
