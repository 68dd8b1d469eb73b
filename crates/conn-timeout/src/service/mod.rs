//! # Timeout Service
//!
//! High-level service implementing the [`ConnectionTimeoutApi`] driving port.
//!
//! The service wraps the domain [`TimerList`] together with the connection
//! table, hiding timer-key management from the server layer: callers speak
//! in [`ConnId`]s and the service keeps each connection's back-reference to
//! its pending timer up to date.

mod maintenance;

use std::collections::HashMap;
use std::net::SocketAddr;

use tracing::{debug, trace};

use crate::domain::{ConnId, ConnectionData, TimeoutError, TimerList, Timestamp};
use crate::ports::{ConnectionTimeoutApi, ExpiryHandler, TimeSource};

// Service-level vocabulary, re-exported so hosts can reach it in one place.
pub use crate::domain::{TimeoutConfig, TimeoutStats};

/// State a sweep threads through expiry callbacks.
///
/// Holds the halves of the service a firing timer needs to touch: the
/// connection table the payload is detached from, and the host's expiry
/// handler. Kept separate from the timer list itself so callbacks can
/// borrow both at once.
struct SweepContext {
    connections: HashMap<ConnId, ConnectionData>,
    handler: Box<dyn ExpiryHandler>,
    total_fired: u64,
}

/// Connection timeout service implementing the driving port.
///
/// # Example
///
/// ```rust
/// use conn_timeout::{
///     ConnectionTimeoutApi, NoOpExpiryHandler, TimeoutConfig, TimeoutService,
/// };
/// use conn_timeout::adapters::SystemTimeSource;
///
/// let mut service = TimeoutService::new(
///     TimeoutConfig::default(),
///     Box::new(SystemTimeSource::new()),
///     Box::new(NoOpExpiryHandler),
/// );
///
/// let conn_id = service
///     .register_connection("10.0.0.1:5000".parse().unwrap(), 9)
///     .unwrap();
/// assert_eq!(service.stats().active_connections, 1);
/// assert!(service.disconnect(conn_id));
/// ```
pub struct TimeoutService {
    /// The sorted timer list (domain layer).
    timers: TimerList<ConnId, SweepContext>,
    /// Connection table and expiry handler, grouped for sweep borrows.
    cx: SweepContext,
    /// Time source for deadline computation.
    time_source: Box<dyn TimeSource>,
    /// Subsystem configuration.
    config: TimeoutConfig,
    /// Next connection identifier to hand out.
    next_conn_id: u64,
}

impl TimeoutService {
    /// Create a new timeout service.
    ///
    /// # Arguments
    ///
    /// * `config` - Idle timeout, sweep cadence, and capacity limits
    /// * `time_source` - Provider for current time
    /// * `handler` - What to do with a connection once it times out
    pub fn new(
        config: TimeoutConfig,
        time_source: Box<dyn TimeSource>,
        handler: Box<dyn ExpiryHandler>,
    ) -> Self {
        Self {
            timers: TimerList::new(),
            cx: SweepContext {
                connections: HashMap::new(),
                handler,
                total_fired: 0,
            },
            time_source,
            config,
            next_conn_id: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &TimeoutConfig {
        &self.config
    }

    /// Look up a registered connection's payload.
    pub fn connection(&self, conn_id: ConnId) -> Option<&ConnectionData> {
        self.cx.connections.get(&conn_id)
    }

    /// Mutable access to a registered connection's payload, e.g. to fill
    /// its read buffer after a socket read.
    pub fn connection_mut(&mut self, conn_id: ConnId) -> Option<&mut ConnectionData> {
        self.cx.connections.get_mut(&conn_id)
    }

    /// Earliest pending deadline across all connections.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    fn do_register(
        &mut self,
        addr: SocketAddr,
        descriptor: u64,
    ) -> Result<ConnId, TimeoutError> {
        if self.cx.connections.len() >= self.config.max_connections {
            return Err(TimeoutError::CapacityExceeded {
                limit: self.config.max_connections,
            });
        }

        let conn_id = ConnId::new(self.next_conn_id);
        self.next_conn_id += 1;

        let deadline = self.now().add_secs(self.config.idle_timeout_secs);
        let key = self.timers.insert(
            deadline,
            Box::new(|_timers, cx: &mut SweepContext, conn_id: &ConnId| {
                // The timer record is already gone; detach the payload and
                // hand it to the host. A payload missing here means the
                // connection raced away, which is tolerated silently.
                if let Some(conn) = cx.connections.remove(conn_id) {
                    cx.total_fired += 1;
                    debug!(conn_id = conn_id.as_u64(), descriptor = conn.descriptor,
                        "idle deadline expired, dropping connection");
                    cx.handler.on_timeout(&conn);
                }
            }),
            conn_id,
        );

        let mut conn = ConnectionData::new(conn_id, addr, descriptor);
        conn.timer = Some(key);
        self.cx.connections.insert(conn_id, conn);

        trace!(
            conn_id = conn_id.as_u64(),
            %addr,
            deadline = deadline.as_secs(),
            "connection registered"
        );
        Ok(conn_id)
    }

    fn do_touch(&mut self, conn_id: ConnId) -> bool {
        let deadline = self.now().add_secs(self.config.idle_timeout_secs);
        let Some(conn) = self.cx.connections.get_mut(&conn_id) else {
            return false;
        };
        let Some(key) = conn.timer else {
            return false;
        };

        // A monotonic clock plus a fixed idle window means the new deadline
        // is never earlier than the old one, so this is always the cheap
        // forward reposition.
        let moved = self.timers.reposition(key, deadline);
        if moved {
            trace!(
                conn_id = conn_id.as_u64(),
                deadline = deadline.as_secs(),
                "activity recorded, deadline extended"
            );
        }
        moved
    }

    fn do_disconnect(&mut self, conn_id: ConnId) -> bool {
        // Take the payload out, then cancel its timer; a stale key (the
        // timer already fired) is a tolerated no-op.
        let Some(conn) = self.cx.connections.remove(&conn_id) else {
            return false;
        };
        if let Some(key) = conn.timer {
            self.timers.remove(key);
        }
        debug!(conn_id = conn_id.as_u64(), descriptor = conn.descriptor,
            "connection disconnected");
        true
    }

    fn do_sweep(&mut self) -> usize {
        let now = self.now();
        self.timers.sweep(now, &mut self.cx)
    }
}

impl ConnectionTimeoutApi for TimeoutService {
    fn register_connection(
        &mut self,
        addr: SocketAddr,
        descriptor: u64,
    ) -> Result<ConnId, TimeoutError> {
        self.do_register(addr, descriptor)
    }

    fn touch_connection(&mut self, conn_id: ConnId) -> bool {
        self.do_touch(conn_id)
    }

    fn disconnect(&mut self, conn_id: ConnId) -> bool {
        self.do_disconnect(conn_id)
    }

    fn sweep(&mut self) -> usize {
        self.do_sweep()
    }

    fn stats(&self) -> TimeoutStats {
        TimeoutStats {
            active_connections: self.cx.connections.len(),
            pending_timers: self.timers.len(),
            total_fired: self.cx.total_fired,
        }
    }
}
