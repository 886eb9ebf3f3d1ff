//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod demo;
pub mod source;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::JsonTypeError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), JsonTypeError> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Source(args) => source::run(&args),
        Commands::Demo(args) => demo::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
