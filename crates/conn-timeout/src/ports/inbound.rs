//! # Driving Ports (Inbound API)
//!
//! The interface this subsystem **offers** to the server layer that accepts
//! and reads connections.

use std::net::SocketAddr;

use crate::domain::{ConnId, TimeoutError, TimeoutStats};

/// Primary API for connection timeout management.
///
/// All operations are synchronous and run to completion on the caller's
/// thread; a host driving the API from several execution contexts must
/// serialize the calls itself.
pub trait ConnectionTimeoutApi {
    /// Admit a connection and start its idle deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError::CapacityExceeded`] when the connection table
    /// is at its configured limit.
    fn register_connection(
        &mut self,
        addr: SocketAddr,
        descriptor: u64,
    ) -> Result<ConnId, TimeoutError>;

    /// Record activity on a connection, pushing its deadline out to
    /// `now + idle_timeout`.
    ///
    /// Returns `false` if the connection is unknown (already expired or
    /// disconnected); that race is expected and harmless.
    fn touch_connection(&mut self, conn_id: ConnId) -> bool;

    /// Explicitly close a connection, cancelling its pending timer.
    ///
    /// Returns `false` if the connection is unknown.
    fn disconnect(&mut self, conn_id: ConnId) -> bool;

    /// Fire every connection whose deadline has passed.
    ///
    /// Called by the periodic driver. Returns the number of connections
    /// that timed out in this sweep.
    fn sweep(&mut self) -> usize;

    /// Snapshot of subsystem state for monitoring.
    fn stats(&self) -> TimeoutStats;
}
