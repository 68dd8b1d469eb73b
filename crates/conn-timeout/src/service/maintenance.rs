//! Periodic maintenance entry points.
//!
//! The subsystem does not schedule itself; a host timer task (or the
//! feature-gated tokio driver) calls [`TimeoutService::tick`] at roughly
//! `sweep_interval_secs` cadence. Expiry latency is bounded by that cadence:
//! a connection is dropped at the first tick at or after its deadline, not
//! the instant the deadline passes.

use tracing::debug;

use super::TimeoutService;

impl TimeoutService {
    /// Run one timeout sweep.
    ///
    /// Fires and removes every connection whose idle deadline has passed,
    /// earliest first, invoking the host's expiry handler for each. Returns
    /// the number of connections dropped.
    pub fn tick(&mut self) -> usize {
        let fired = self.do_sweep();
        if fired > 0 {
            debug!(fired, "timeout sweep dropped expired connections");
        }
        fired
    }
}
