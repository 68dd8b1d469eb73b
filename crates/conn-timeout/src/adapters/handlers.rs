//! # Expiry Handler Adapters
//!
//! Stock [`ExpiryHandler`] implementations: a logging no-op for hosts that
//! manage sockets elsewhere, and a recording mock for tests.

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::domain::{ConnId, ConnectionData};
use crate::ports::ExpiryHandler;

// =============================================================================
// NO-OP HANDLER
// =============================================================================

/// [`ExpiryHandler`] that only logs the expiry.
///
/// Useful when the host learns about drops through [`stats`] or the sweep
/// return value instead of a callback.
///
/// [`stats`]: crate::ports::ConnectionTimeoutApi::stats
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpExpiryHandler;

impl NoOpExpiryHandler {
    /// Create a no-op handler.
    pub fn new() -> Self {
        Self
    }
}

impl ExpiryHandler for NoOpExpiryHandler {
    fn on_timeout(&mut self, conn: &ConnectionData) {
        info!(
            conn_id = %conn.conn_id,
            peer = %conn.addr,
            descriptor = conn.descriptor,
            "connection timed out"
        );
    }
}

// =============================================================================
// MOCK HANDLER
// =============================================================================

/// Recording [`ExpiryHandler`] for tests.
///
/// Clones share one log, so a test can hand a clone to the service and keep
/// the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct MockExpiryHandler {
    log: Arc<Mutex<Vec<ConnId>>>,
}

impl MockExpiryHandler {
    /// Create a mock handler with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connections that have timed out, in firing order.
    pub fn timed_out(&self) -> Vec<ConnId> {
        self.log.lock().expect("mock handler log poisoned").clone()
    }

    /// Number of expiries recorded.
    pub fn fired_count(&self) -> usize {
        self.log.lock().expect("mock handler log poisoned").len()
    }
}

impl ExpiryHandler for MockExpiryHandler {
    fn on_timeout(&mut self, conn: &ConnectionData) {
        self.log
            .lock()
            .expect("mock handler log poisoned")
            .push(conn.conn_id);
    }
}
