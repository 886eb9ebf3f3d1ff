//! Observability for the `jsontype` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job.

pub mod logging;

pub use logging::{LOG_LEVEL_ENV, LogFormat, LogSettings, Verbosity};
