//! # Ports Layer
//!
//! Trait boundaries between the subsystem and its host:
//!
//! - [`inbound`] - The driving API the server layer calls
//! - [`outbound`] - The driven interfaces the host must implement

pub mod inbound;
pub mod outbound;

pub use inbound::ConnectionTimeoutApi;
pub use outbound::{ConfigProvider, ExpiryHandler, TimeSource};
