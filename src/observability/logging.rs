//! Logging setup for the binary.
//!
//! Events from this crate are filtered at the level the command line asks
//! for; everything else stays at `warn`. `JSONTYPE_LOG_LEVEL` replaces the
//! whole filter unless `--quiet` is given.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice};
use crate::config::{Environment, ProcessEnv};

/// Environment variable holding a full filter, e.g. `jsontype=trace`.
pub const LOG_LEVEL_ENV: &str = "JSONTYPE_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// How much the binary logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// `-v` count: 0 warn, 1 info, 2 debug, 3 or more trace.
    Level(u8),
}

impl Verbosity {
    /// Level name for this crate's events.
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Level(0) => "warn",
            Self::Level(1) => "info",
            Self::Level(2) => "debug",
            Self::Level(_) => "trace",
        }
    }
}

/// Logging choices taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Output format.
    pub format: LogFormat,
    /// Level for this crate's events.
    pub verbosity: Verbosity,
    /// ANSI color choice for human output.
    pub color: ColorChoice,
}

impl From<&Cli> for LogSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            format: if cli.log_json {
                LogFormat::Json
            } else {
                LogFormat::Human
            },
            verbosity: if cli.quiet {
                Verbosity::Quiet
            } else {
                Verbosity::Level(cli.verbose)
            },
            color: cli.color,
        }
    }
}

impl LogSettings {
    /// Filter directive implied by the flags alone.
    #[must_use]
    pub fn directive(&self) -> String {
        match self.verbosity {
            Verbosity::Quiet => "error".to_string(),
            v => format!("warn,{}={}", env!("CARGO_CRATE_NAME"), v.level()),
        }
    }

    /// Builds the event filter, honoring `JSONTYPE_LOG_LEVEL` when it parses.
    #[must_use]
    pub fn filter(&self, env: &impl Environment) -> EnvFilter {
        let from_env = match self.verbosity {
            Verbosity::Quiet => None,
            Verbosity::Level(_) => env
                .var(LOG_LEVEL_ENV)
                .and_then(|value| value.into_string().ok())
                .and_then(|value| EnvFilter::try_new(value).ok()),
        };
        from_env.unwrap_or_else(|| EnvFilter::new(self.directive()))
    }

    /// Whether to emit ANSI colors to a stream.
    #[must_use]
    pub fn use_ansi(&self, env: &impl Environment, is_terminal: bool) -> bool {
        match self.color {
            ColorChoice::Auto => is_terminal && env.var("NO_COLOR").is_none(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }

    /// Installs the global subscriber on stderr. Later calls are no-ops.
    pub fn init(&self) {
        let filter = self.filter(&ProcessEnv);
        let show_target = matches!(self.verbosity, Verbosity::Level(2..));

        match self.format {
            LogFormat::Human => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(self.use_ansi(&ProcessEnv, std::io::stderr().is_terminal()))
                    .with_target(show_target)
                    .with_writer(std::io::stderr)
                    .try_init();
            }
            LogFormat::Json => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .json()
                    .with_target(show_target)
                    .with_writer(std::io::stderr)
                    .try_init();
            }
        }
    }
}
