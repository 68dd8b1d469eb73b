//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports, plus the optional
//! periodic driver:
//!
//! - [`time`] - Wall-clock and test time sources
//! - [`handlers`] - Expiry handler implementations
//! - [`config`] - Configuration providers (TOML loading behind `config`)
//! - [`driver`] - Tokio sweep loop (behind `driver`)

pub mod config;
pub mod handlers;
pub mod time;

#[cfg(feature = "driver")]
pub mod driver;

pub use config::StaticConfigProvider;
pub use handlers::{MockExpiryHandler, NoOpExpiryHandler};
pub use time::SystemTimeSource;

#[cfg(feature = "config")]
pub use config::{ConfigError, TomlConfigProvider};

#[cfg(feature = "driver")]
pub use driver::SweepDriver;
