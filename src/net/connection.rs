//! Connection identity and lifecycle tracking.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Count in-flight connections
//! - Let shutdown wait until the last connection closes (or a deadline)

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Tracks active connections for graceful shutdown.
///
/// Uses a watch channel to observe connections closing.
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    active: Arc<AtomicUsize>,
    closed_tx: Arc<watch::Sender<usize>>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        let (closed_tx, _) = watch::channel(0);
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            closed_tx: Arc::new(closed_tx),
        }
    }

    /// Register a new connection; the returned handle must be held for the
    /// connection's lifetime.
    pub fn register(&self) -> ConnectionHandle {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionHandle {
            active: self.active.clone(),
            closed_tx: self.closed_tx.clone(),
        }
    }

    /// Number of currently open connections.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait until all connections have closed, or the deadline passes.
    pub async fn drain(&self, deadline: Duration) {
        if self.active() == 0 {
            return;
        }
        tracing::info!(active = self.active(), "Draining connections");

        let mut closed_rx = self.closed_tx.subscribe();
        let drained = tokio::time::timeout(deadline, async {
            while self.active() > 0 {
                if closed_rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                remaining = self.active(),
                "Drain deadline passed with connections still open"
            );
        }
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by a connection task; closing is signalled on drop so drain works
/// even when the task panics.
#[derive(Debug)]
pub struct ConnectionHandle {
    active: Arc<AtomicUsize>,
    closed_tx: Arc<watch::Sender<usize>>,
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        let remaining = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        self.closed_tx.send_replace(remaining);
    }
}
