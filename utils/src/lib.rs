//! Shared utilities for fundflow.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
