//! # Domain Layer
//!
//! Pure timeout-management logic with no I/O:
//!
//! - [`timer_list`] - The sorted timer list (the core of this subsystem)
//! - [`entities`] - Timestamps, connection identifiers and payloads, config
//! - [`errors`] - Domain error types

pub mod entities;
pub mod errors;
pub mod timer_list;

pub use entities::{
    ConnId, ConnectionData, TimeoutConfig, TimeoutStats, Timestamp, READ_BUFFER_SIZE,
};
pub use errors::TimeoutError;
pub use timer_list::{ExpiryCallback, TimerKey, TimerList};
