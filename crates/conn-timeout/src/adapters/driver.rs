//! # Tokio Sweep Driver
//!
//! Optional periodic driver calling [`TimeoutService::tick`] at the
//! configured sweep cadence. Hosts with their own timer infrastructure
//! (an epoll tick loop, a cron-style scheduler) can ignore this module
//! and drive `tick` directly.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::service::TimeoutService;

/// Periodic sweep loop over a shared [`TimeoutService`].
///
/// ```rust,ignore
/// let service = Arc::new(Mutex::new(service));
/// let driver = SweepDriver::new(Arc::clone(&service), Duration::from_secs(5));
/// tokio::spawn(driver.run());
/// ```
pub struct SweepDriver {
    service: Arc<Mutex<TimeoutService>>,
    interval: Duration,
}

impl SweepDriver {
    /// Create a driver sweeping `service` every `interval`.
    pub fn new(service: Arc<Mutex<TimeoutService>>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Create a driver using the service's configured sweep cadence.
    pub fn from_config(service: Arc<Mutex<TimeoutService>>) -> Self {
        let secs = {
            let guard = service.lock();
            match &guard {
                Ok(service) => service.config().sweep_interval_secs,
                // Fall back to the default cadence; run() will surface the
                // poisoned lock on its first tick.
                Err(_) => crate::domain::TimeoutConfig::default().sweep_interval_secs,
            }
        };
        Self::new(service, Duration::from_secs(secs.max(1)))
    }

    /// Run the sweep loop until the lock is poisoned.
    ///
    /// A tick that falls behind (a slow expiry handler, a busy runtime) is
    /// skipped rather than burst-replayed.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "sweep driver started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The constructor tick fires immediately; skip it so the first
        // sweep happens one full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut service = match self.service.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    warn!("timeout service lock poisoned, sweep driver stopping");
                    return;
                }
            };
            service.tick();
        }
    }
}
