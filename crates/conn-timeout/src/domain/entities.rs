//! # Domain Entities
//!
//! Value objects shared across the subsystem: coarse timestamps, connection
//! identifiers, the per-connection payload, configuration, and statistics.

use std::fmt;
use std::net::SocketAddr;

use crate::domain::timer_list::TimerKey;

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Absolute point in time with whole-second resolution.
///
/// Deadlines are coarse by design: expiry is detected at the next sweep at or
/// after the deadline, so sub-second precision buys nothing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Maximum reasonable timestamp (year 9999).
    ///
    /// Prevents a hostile or buggy caller from using `u64::MAX` to corrupt
    /// ordering and saturating arithmetic.
    pub const MAX_REASONABLE: u64 = 253_402_300_799;

    /// Create a new timestamp, clamping to `MAX_REASONABLE`.
    pub fn new(secs: u64) -> Self {
        Self(secs.min(Self::MAX_REASONABLE))
    }

    /// Create a timestamp with explicit validation.
    ///
    /// # Returns
    ///
    /// `None` if `secs > MAX_REASONABLE`, `Some(Timestamp)` otherwise.
    #[inline]
    pub fn try_new(secs: u64) -> Option<Self> {
        (secs <= Self::MAX_REASONABLE).then_some(Self(secs))
    }

    /// Get the underlying seconds value.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Add seconds to timestamp (saturating at `MAX_REASONABLE`).
    pub fn add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs).min(Self::MAX_REASONABLE))
    }

    /// Subtract seconds from timestamp (saturating at 0).
    pub fn sub_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_sub(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// =============================================================================
// CONNECTION IDENTIFIER
// =============================================================================

/// Opaque identifier for a registered connection.
///
/// Allocated by the service when a connection is admitted; never reused
/// within the lifetime of a service instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(u64);

impl ConnId {
    /// Create a connection identifier from a raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

// =============================================================================
// CONNECTION PAYLOAD
// =============================================================================

/// Size of the fixed per-connection read buffer in bytes.
pub const READ_BUFFER_SIZE: usize = 128;

/// Per-connection data a timeout callback acts on.
///
/// Owned by the connection layer (the service's connection table), never by
/// the timer list: the list only carries the [`ConnId`] token and hands it
/// back on expiry. The `timer` field is the back-reference the server uses
/// to extend or cancel the idle deadline; it is `None` only transiently
/// during registration and after the timer has been consumed.
#[derive(Debug, Clone)]
pub struct ConnectionData {
    /// Identifier of this connection.
    pub conn_id: ConnId,
    /// Peer network address.
    pub addr: SocketAddr,
    /// OS-level handle of the underlying socket.
    pub descriptor: u64,
    /// Fixed-size read buffer.
    pub read_buf: [u8; READ_BUFFER_SIZE],
    /// Number of valid bytes in `read_buf`.
    pub buf_len: usize,
    /// Back-reference to the connection's pending timer, if any.
    pub timer: Option<TimerKey>,
}

impl ConnectionData {
    /// Create payload for a freshly admitted connection.
    pub fn new(conn_id: ConnId, addr: SocketAddr, descriptor: u64) -> Self {
        Self {
            conn_id,
            addr,
            descriptor,
            read_buf: [0u8; READ_BUFFER_SIZE],
            buf_len: 0,
            timer: None,
        }
    }

    /// Copy bytes into the read buffer, truncating at capacity.
    ///
    /// Returns the number of bytes stored.
    pub fn fill_read_buf(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(READ_BUFFER_SIZE);
        self.read_buf[..n].copy_from_slice(&data[..n]);
        self.buf_len = n;
        n
    }

    /// The valid portion of the read buffer.
    pub fn read_data(&self) -> &[u8] {
        &self.read_buf[..self.buf_len]
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Timeout subsystem configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TimeoutConfig {
    /// Seconds of inactivity before a connection's deadline fires.
    pub idle_timeout_secs: u64,
    /// Cadence at which the periodic driver should call `sweep`.
    pub sweep_interval_secs: u64,
    /// Maximum number of simultaneously registered connections.
    pub max_connections: usize,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 15,
            sweep_interval_secs: 5,
            max_connections: 65_536,
        }
    }
}

impl TimeoutConfig {
    /// Testing config with small limits and short deadlines.
    pub fn for_testing() -> Self {
        Self {
            idle_timeout_secs: 10,
            sweep_interval_secs: 1,
            max_connections: 4,
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Snapshot of subsystem state for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutStats {
    /// Connections currently registered.
    pub active_connections: usize,
    /// Timers currently linked in the list.
    pub pending_timers: usize,
    /// Timers fired since the service was created.
    pub total_fired: u64,
}

// =============================================================================
// TESTS
// =============================================================================
