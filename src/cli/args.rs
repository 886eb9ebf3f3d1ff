//! CLI argument definitions
//!
//! All Clap derive structs for `jsontype` command-line parsing.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::options::{DurationFormat, Options, TimeLayout};

// ============================================================================
// Root CLI
// ============================================================================

/// Inspect semantic JSON values and configuration sources.
#[derive(Parser, Debug)]
#[command(name = "jsontype", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors. Command output is still printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "JSONTYPE_COLOR")]
    pub color: ColorChoice,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode one value with a codec and print its JSON encoding.
    Check(CheckArgs),

    /// Show which configuration source would be used.
    Source(SourceArgs),

    /// Decode the sample configuration and re-encode it.
    Demo(DemoArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Check Command
// ============================================================================

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Semantic type of the value.
    pub kind: ValueKind,

    /// The value, as the text of a JSON string (no surrounding quotes).
    pub value: String,

    /// Input layout for timestamps: rfc3339, rfc3339nano, rfc2822, or a strftime format.
    #[arg(long)]
    pub time_in: Option<TimeLayout>,

    /// Output layout for timestamps.
    #[arg(long)]
    pub time_out: Option<TimeLayout>,

    /// Use the humantime grammar for durations, in and out.
    #[arg(long)]
    pub humantime: bool,

    /// Render only the address part of an email address.
    #[arg(long)]
    pub address_only: bool,

    /// Lower-case rendered email addresses.
    #[arg(long)]
    pub lower: bool,

    /// Upper-case rendered email addresses.
    #[arg(long)]
    pub upper: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

impl CheckArgs {
    /// Builds the codec options the flags describe.
    #[must_use]
    pub fn options(&self) -> Options {
        let grammar = if self.humantime {
            DurationFormat::Humantime
        } else {
            DurationFormat::Canonical
        };
        Options {
            time_layout_marshal: self.time_out.clone(),
            time_layout_unmarshal: self.time_in.clone(),
            duration_format_marshal: grammar,
            duration_format_unmarshal: grammar,
            address_only: self.address_only,
            address_lower: self.lower,
            address_upper: self.upper,
        }
    }

    /// The first flag given that has no effect on `kind`.
    #[must_use]
    pub fn misapplied_flag(&self) -> Option<&'static str> {
        let flags = [
            ("--time-in", self.time_in.is_some(), ValueKind::Timestamp),
            ("--time-out", self.time_out.is_some(), ValueKind::Timestamp),
            ("--humantime", self.humantime, ValueKind::Duration),
            ("--address-only", self.address_only, ValueKind::Email),
            ("--lower", self.lower, ValueKind::Email),
            ("--upper", self.upper, ValueKind::Email),
        ];
        flags
            .into_iter()
            .find(|&(_, given, applies_to)| given && applies_to != self.kind)
            .map(|(flag, ..)| flag)
    }
}

// ============================================================================
// Source / Demo / Version
// ============================================================================

/// Arguments for `source`.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Also read the document and check that it is well-formed JSON.
    #[arg(long)]
    pub parse: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `demo`.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Read the document from `CONFIG_JSON`, `CONFIG_PATH` or `config.json`
    /// instead of the built-in sample.
    #[arg(long)]
    pub from_env: bool,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Semantic type selector for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Timestamp with UTC offset.
    Timestamp,
    /// Duration (`1h30m`).
    Duration,
    /// Absolute URL.
    Url,
    /// RFC 5322 mailbox.
    Email,
    /// Regular expression.
    Regex,
}

impl ValueKind {
    /// Name as written on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Duration => "duration",
            Self::Url => "url",
            Self::Email => "email",
            Self::Regex => "regex",
        }
    }
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}
