//! Per-wrapper codec options.
//!
//! An [`Options`] value belongs to exactly one [`JsonType`](crate::JsonType).
//! Codecs only ever read it. Every field left at its default makes the codec
//! fall back to its built-in behavior.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// Layout used to render or parse a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeLayout {
    /// RFC 3339 with second precision on output. Parsing accepts fractional seconds.
    Rfc3339,
    /// RFC 3339 with up to nanosecond precision; trailing zero digits are trimmed.
    Rfc3339Nano,
    /// RFC 2822 (`Tue, 04 Oct 2022 00:00:00 -0700`). Parsing accepts obsolete zone names.
    Rfc2822,
    /// A chrono `strftime` format string. Parsing requires an offset in the format.
    Custom(String),
}

impl TimeLayout {
    /// Short name used in error messages and on the command line.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rfc3339 => "rfc3339",
            Self::Rfc3339Nano => "rfc3339nano",
            Self::Rfc2822 => "rfc2822",
            Self::Custom(format) => format,
        }
    }
}

impl fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeLayout {
    type Err = std::convert::Infallible;

    /// Named layouts are matched case-insensitively; anything else is a custom format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "rfc3339" => Self::Rfc3339,
            "rfc3339nano" => Self::Rfc3339Nano,
            "rfc2822" | "rfc1123" | "rfc1123z" => Self::Rfc2822,
            _ => Self::Custom(s.to_string()),
        })
    }
}

/// Grammar used to render or parse a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationFormat {
    /// `1h0m0s`, `1.5s`, `300ms`.
    #[default]
    Canonical,
    /// `1h 30m`, `2days 4h`, as understood by `humantime`.
    Humantime,
}

static DEFAULT_MARSHAL_LAYOUT: TimeLayout = TimeLayout::Rfc3339Nano;
static DEFAULT_UNMARSHAL_LAYOUT: TimeLayout = TimeLayout::Rfc3339;

/// Switches that alter how a wrapped value is marshalled or unmarshalled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Timestamp output layout. Defaults to [`TimeLayout::Rfc3339Nano`].
    pub time_layout_marshal: Option<TimeLayout>,

    /// Timestamp input layout. Defaults to [`TimeLayout::Rfc3339`].
    pub time_layout_unmarshal: Option<TimeLayout>,

    /// Duration output grammar.
    pub duration_format_marshal: DurationFormat,

    /// Duration input grammar.
    pub duration_format_unmarshal: DurationFormat,

    /// Render only the address of a mailbox, without the display name.
    pub address_only: bool,

    /// Lower-case the rendered mailbox.
    pub address_lower: bool,

    /// Upper-case the rendered mailbox.
    pub address_upper: bool,
}

impl Options {
    /// Checks that no mutually exclusive switches are enabled together.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ConflictingOptions`] when both case transforms are set.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.address_lower && self.address_upper {
            return Err(CodecError::ConflictingOptions {
                first: "address_lower",
                second: "address_upper",
            });
        }
        Ok(())
    }

    pub(crate) fn marshal_layout(&self) -> &TimeLayout {
        self.time_layout_marshal
            .as_ref()
            .unwrap_or(&DEFAULT_MARSHAL_LAYOUT)
    }

    pub(crate) fn unmarshal_layout(&self) -> &TimeLayout {
        self.time_layout_unmarshal
            .as_ref()
            .unwrap_or(&DEFAULT_UNMARSHAL_LAYOUT)
    }
}
