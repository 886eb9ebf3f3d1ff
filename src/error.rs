//! Error types for `jsontype`
//!
//! Codec failures, configuration read failures, and the validation error
//! returned by application hooks. Each read failure belongs to exactly one
//! [`ErrorKind`] so callers can tell "nothing configured" from "malformed"
//! from "rejected by business rules".

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigSource;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for the `jsontype` binary.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Configuration document could not be decoded, or a codec rejected a value
    pub const CONFIG_ERROR: i32 = 2;

    /// Configuration file was named but could not be read
    pub const IO_ERROR: i32 = 3;

    /// No configuration source was found
    pub const NOT_FOUND: i32 = 4;

    /// The application hook rejected the configuration
    pub const VALIDATION_ERROR: i32 = 5;

    /// Usage error (invalid arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Codec Errors
// ============================================================================

/// Failure to encode or decode a semantic value.
///
/// Codec errors are always fatal to the enclosing marshal or unmarshal
/// call; no partially decoded value is ever returned alongside one.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The JSON text was not a string literal
    #[error("expected a JSON string: {0}")]
    Json(#[from] serde_json::Error),

    /// Timestamp did not match the input layout
    #[error("invalid timestamp '{input}' for layout {layout}: {message}")]
    InvalidTimestamp {
        /// The rejected input
        input: String,
        /// Name of the layout used for parsing
        layout: String,
        /// Parser message
        message: String,
    },

    /// Timestamp could not be rendered with the output layout
    #[error("cannot format timestamp with layout {layout}")]
    TimestampFormat {
        /// Name of the layout used for formatting
        layout: String,
    },

    /// Duration did not match the duration grammar
    #[error("invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// The rejected input
        input: String,
        /// Why the input was rejected
        reason: String,
    },

    /// URL failed syntactic validation
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl {
        /// The rejected input
        input: String,
        /// Why the input was rejected
        reason: String,
    },

    /// Email address failed mailbox parsing
    #[error("invalid email address '{input}': {reason}")]
    InvalidAddress {
        /// The rejected input
        input: String,
        /// Why the input was rejected
        reason: String,
    },

    /// Regular expression failed to compile
    #[error("invalid regular expression '{input}': {message}")]
    InvalidRegex {
        /// The rejected pattern
        input: String,
        /// Compiler message
        message: String,
    },

    /// Two mutually exclusive options were both enabled
    #[error("conflicting options: '{first}' and '{second}' cannot both be set")]
    ConflictingOptions {
        /// First option name
        first: &'static str,
        /// Second option name
        second: &'static str,
    },

    /// An optional semantic value was absent at encode time
    #[error("missing underlying {kind} value")]
    MissingValue {
        /// Semantic kind of the absent value
        kind: &'static str,
    },
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Rejection returned by a [`DefaultsAndValidate`](crate::DefaultsAndValidate) hook.
#[derive(Debug, Error)]
#[error("{}{message}", field.as_ref().map_or_else(String::new, |f| format!("{f}: ")))]
pub struct ValidationError {
    /// Field the rejection refers to, if any
    pub field: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Underlying cause, if any
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ValidationError {
    /// Creates a validation error that is not tied to one field.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a validation error for a named field.
    #[must_use]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

// ============================================================================
// Read Errors
// ============================================================================

/// Broad classification of a [`ReadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No configuration source was present
    NotFound,
    /// A configuration source was named but could not be read
    Source,
    /// The document was not valid JSON for the target structure
    Decode,
    /// The application hook rejected the decoded structure
    Validation,
}

/// Failure to read configuration.
#[derive(Debug, Error)]
pub enum ReadError {
    /// None of the configured sources yielded a document
    #[error("configuration not found (searched {})", searched.join(", "))]
    NotFound {
        /// The providers that were probed, in order
        searched: Vec<String>,
    },

    /// A path was given but the file could not be read
    #[error("failed to read configuration file {path}: {source}")]
    Unreadable {
        /// Path that failed to read
        path: PathBuf,
        /// The I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The document could not be decoded
    #[error("failed to decode configuration from {origin}: {source}")]
    Decode {
        /// Where the document came from
        origin: ConfigSource,
        /// The decoder failure, including line and column
        #[source]
        source: serde_json::Error,
    },

    /// The defaults-and-validate hook rejected the configuration
    #[error("configuration rejected: {0}")]
    Validation(#[from] ValidationError),
}

impl ReadError {
    /// Returns the error's classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unreadable { .. } => ErrorKind::Source,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Returns the binary exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NotFound => ExitCode::NOT_FOUND,
            ErrorKind::Source => ExitCode::IO_ERROR,
            ErrorKind::Decode => ExitCode::CONFIG_ERROR,
            ErrorKind::Validation => ExitCode::VALIDATION_ERROR,
        }
    }
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for the `jsontype` binary.
#[derive(Debug, Error)]
pub enum JsonTypeError {
    /// Configuration read error
    #[error(transparent)]
    Read(#[from] ReadError),

    /// Codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JsonTypeError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Read(e) => e.exit_code(),
            Self::Codec(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}
