//! Logging initialization
//!
//! `tracing-subscriber` with an `EnvFilter`, printing either human-readable
//! lines or JSON.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
