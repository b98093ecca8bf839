//! # Observability
//!
//! Logging setup for applications embedding the interference computations.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
