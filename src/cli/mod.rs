//! Command-line interface for the `jsontype` binary.

pub mod args;
pub mod commands;
