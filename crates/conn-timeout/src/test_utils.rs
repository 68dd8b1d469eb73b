//! # Test Utilities
//!
//! Deterministic [`TimeSource`] implementations for unit and integration
//! tests. Available to downstream crates behind the `test-utils` feature.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::Timestamp;
use crate::ports::TimeSource;

/// [`TimeSource`] frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub u64);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.0)
    }
}

/// [`TimeSource`] a test advances by hand.
///
/// Clones share the same instant, so a test can hand one clone to the
/// service and keep another to move time forward.
#[derive(Debug, Clone, Default)]
pub struct ControllableTimeSource {
    secs: Arc<AtomicU64>,
}

impl ControllableTimeSource {
    /// Create a controllable source starting at `secs`.
    pub fn new(secs: u64) -> Self {
        Self {
            secs: Arc::new(AtomicU64::new(secs)),
        }
    }

    /// Advance the clock by `secs`.
    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ControllableTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }
}
