//! # Conn-Timeout Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-layer flows
//!     ├── scenarios.rs     # Timer list behavior end to end
//!     ├── service_flow.rs  # Service + adapters choreography
//!     └── driver_loop.rs   # Tokio sweep driver
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p conn-timeout-tests
//!
//! # By category
//! cargo test -p conn-timeout-tests integration::
//!
//! # Benchmarks
//! cargo bench -p conn-timeout-tests
//! ```

#![allow(dead_code)]


/// Install the tracing subscriber once, honoring `RUST_LOG`.
///
/// Tests call this first so sweep logging is visible under
/// `RUST_LOG=conn_timeout=trace cargo test -p conn-timeout-tests`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
