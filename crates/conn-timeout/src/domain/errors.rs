//! # Domain Errors
//!
//! The error surface is deliberately narrow: operating on a stale timer key
//! or an unknown connection is a tolerated no-op (the boolean return of the
//! affected operations), never an error. What remains is structural misuse
//! a caller must handle.

use thiserror::Error;

/// Timeout subsystem error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeoutError {
    /// The connection table is at its configured capacity.
    #[error("connection limit reached: {limit}")]
    CapacityExceeded {
        /// Configured maximum number of connections.
        limit: usize,
    },
}
