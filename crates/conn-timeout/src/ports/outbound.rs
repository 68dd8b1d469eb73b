//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this subsystem **requires** the host application
//! to implement.

use crate::domain::{ConnectionData, TimeoutConfig, Timestamp};

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
/// Production implementations use system time; tests use fixed or manually
/// advanced timestamps.
///
/// The clock must be monotonic enough that successive `now()` readings never
/// go backwards: activity-driven deadline extension relies on new deadlines
/// never being earlier than the ones they replace.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct SystemTimeSource;
///
/// impl TimeSource for SystemTimeSource {
///     fn now(&self) -> Timestamp {
///         Timestamp::new(
///             std::time::SystemTime::now()
///                 .duration_since(std::time::UNIX_EPOCH)
///                 .unwrap_or_default()
///                 .as_secs()
///         )
///     }
/// }
/// ```
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// What the host does when a connection's idle deadline fires.
///
/// Invoked synchronously during a sweep, once per expired connection, after
/// the connection's timer record has already been destroyed and the payload
/// detached from the connection table. Typical implementations close the
/// socket behind `conn.descriptor` and release any per-connection state the
/// host still holds.
///
/// A handler failure is the host's concern; the sweep's bookkeeping does not
/// depend on what the handler does.
pub trait ExpiryHandler: Send {
    /// React to an expired connection.
    fn on_timeout(&mut self, conn: &ConnectionData);
}

/// Abstract interface for configuration loading.
///
/// Allows different configuration sources (file, environment, hardcoded).
pub trait ConfigProvider: Send + Sync {
    /// Get the timeout subsystem configuration.
    fn timeout_config(&self) -> TimeoutConfig;
}
