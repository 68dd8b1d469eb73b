//! # Connection Timeout Management
//!
//! This crate implements idle-deadline tracking for connection-oriented
//! servers: an ordered collection of pending timeout events, each tied to a
//! connection and a callback to run on expiry. A server with many open
//! connections can find every expired one in a single bounded sweep instead
//! of scanning the whole connection table on every check.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Pure timer logic (sorted timer list, entities, errors)
//! - **Ports Layer:** Trait definitions for external dependencies
//! - **Service Layer:** Wires domain to ports
//! - **Adapters Layer:** Concrete implementations (heavier ones feature-gated)
//!
//! ## Feature Flags
//!
//! - `config` - TOML config file loading (serde, toml)
//! - `driver` - Async periodic sweep driver (tokio)
//! - `test-utils` - Controllable time sources for deterministic tests
//!
//! ## Concurrency Model
//!
//! The core is single-threaded by construction: every operation takes
//! `&mut self` and runs to completion on the caller's thread. A host that
//! drives the service from multiple tasks must serialize calls itself (the
//! `driver` adapter does this with a mutex).
//!
//! ## Example
//!
//! ```rust
//! use conn_timeout::{
//!     ConnectionTimeoutApi, NoOpExpiryHandler, TimeoutConfig, TimeoutService,
//! };
//! use conn_timeout::adapters::SystemTimeSource;
//!
//! let mut service = TimeoutService::new(
//!     TimeoutConfig::default(),
//!     Box::new(SystemTimeSource::new()),
//!     Box::new(NoOpExpiryHandler),
//! );
//!
//! // Admit a connection; its idle deadline starts ticking.
//! let addr = "192.168.1.100:9000".parse().unwrap();
//! let conn_id = service.register_connection(addr, 17).unwrap();
//!
//! // Activity pushes the deadline out.
//! assert!(service.touch_connection(conn_id));
//!
//! // The periodic driver calls this; nothing is due yet.
//! assert_eq!(service.sweep(), 0);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// ADAPTERS AND UTILITIES
// =============================================================================

/// Adapters for external integrations.
/// The TOML and tokio adapters require the `config` / `driver` features.
pub mod adapters;

/// Test utilities (FixedTimeSource, ControllableTimeSource).
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// CORE RE-EXPORTS (Always Available)
// =============================================================================

// Domain entities
pub use domain::{
    ConnId, ConnectionData, ExpiryCallback, TimeoutError, TimerKey, TimerList, Timestamp,
    READ_BUFFER_SIZE,
};

// Port traits
pub use ports::{ConfigProvider, ConnectionTimeoutApi, ExpiryHandler, TimeSource};

// Service
pub use service::{TimeoutConfig, TimeoutService, TimeoutStats};

// Always-available adapters
pub use adapters::{MockExpiryHandler, NoOpExpiryHandler, StaticConfigProvider, SystemTimeSource};

// =============================================================================
// FEATURE-GATED RE-EXPORTS
// =============================================================================

#[cfg(feature = "config")]
pub use adapters::{ConfigError, TomlConfigProvider};

#[cfg(feature = "driver")]
pub use adapters::SweepDriver;

#[cfg(feature = "test-utils")]
pub use test_utils::{ControllableTimeSource, FixedTimeSource};
