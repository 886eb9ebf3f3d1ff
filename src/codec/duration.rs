//! Duration codec.
//!
//! The canonical grammar is a sequence of decimal numbers, each with an
//! optional fraction and a unit suffix: `1h0m0s`, `1.5h`, `300ms`, `2h45m`.
//! Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`.

use std::time::Duration;

use super::Codec;
use crate::error::CodecError;
use crate::options::{DurationFormat, Options};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const FRACTION_LIMIT: u128 = 10u128.pow(20);

impl Codec for Duration {
    const KIND: &'static str = "duration";

    fn encode(&self, options: &Options) -> Result<String, CodecError> {
        Ok(match options.duration_format_marshal {
            DurationFormat::Canonical => format_duration(*self),
            DurationFormat::Humantime => humantime::format_duration(*self).to_string(),
        })
    }

    fn decode(text: &str, options: &Options) -> Result<Self, CodecError> {
        let parsed = match options.duration_format_unmarshal {
            DurationFormat::Canonical => parse_duration(text),
            DurationFormat::Humantime => humantime::parse_duration(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| CodecError::InvalidDuration {
            input: text.to_string(),
            reason,
        })
    }
}

/// Renders a duration in the canonical grammar.
///
/// Durations of a second or more use `h`, `m` and `s` components (`1h0m0s`,
/// `2m3.5s`); shorter ones use the largest fitting sub-second unit (`1.5ms`).
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC {
        let (unit, scale) = if nanos < NANOS_PER_MICRO {
            ("ns", 1)
        } else if nanos < NANOS_PER_MILLI {
            ("µs", NANOS_PER_MICRO)
        } else {
            ("ms", NANOS_PER_MILLI)
        };
        return format!("{}{}{unit}", nanos / scale, fraction(nanos % scale, scale));
    }

    let frac = fraction(nanos % NANOS_PER_SEC, NANOS_PER_SEC);
    let total_secs = nanos / NANOS_PER_SEC;
    let (hours, minutes, seconds) = (total_secs / 3600, total_secs / 60 % 60, total_secs % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}{frac}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}{frac}s")
    } else {
        format!("{seconds}{frac}s")
    }
}

/// `.5` for 500 of 1000; empty when the remainder is zero.
fn fraction(remainder: u128, scale: u128) -> String {
    if remainder == 0 {
        return String::new();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{remainder:0width$}");
    format!(".{}", digits.trim_end_matches('0'))
}

/// Parses a duration in the canonical grammar.
///
/// The empty string is rejected rather than read as zero. Negative durations
/// other than zero, and durations above `u64::MAX` nanoseconds, are out of
/// range.
///
/// # Errors
///
/// Returns a description of the first problem found.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err("expected a number".to_string());
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        let scale = unit_scale(unit)?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| out_of_range())?
        };
        let mut value = whole.checked_mul(scale).ok_or_else(out_of_range)?;

        // Digits beyond nanosecond resolution are truncated.
        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for digit in frac_part.bytes() {
            if denominator >= FRACTION_LIMIT {
                break;
            }
            numerator = numerator * 10 + u128::from(digit - b'0');
            denominator *= 10;
        }
        value += numerator * scale / denominator;

        total = total.checked_add(value).ok_or_else(out_of_range)?;
        rest = remaining;
    }

    let nanos = u64::try_from(total).map_err(|_| out_of_range())?;
    if negative && nanos != 0 {
        return Err("negative durations are not supported".to_string());
    }
    Ok(Duration::from_nanos(nanos))
}

fn unit_scale(unit: &str) -> Result<u128, String> {
    match unit {
        "ns" => Ok(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Ok(NANOS_PER_MICRO),
        "ms" => Ok(NANOS_PER_MILLI),
        "s" => Ok(NANOS_PER_SEC),
        "m" => Ok(60 * NANOS_PER_SEC),
        "h" => Ok(3600 * NANOS_PER_SEC),
        "" => Err("missing unit".to_string()),
        other => Err(format!("unknown unit '{other}'")),
    }
}

fn out_of_range() -> String {
    "duration out of range".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn format_hours_minutes_seconds() {
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(42)), "42s");
    }

    #[test]
    fn format_fractional_seconds() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(61_250)), "1m1.25s");
    }

    #[test]
    fn format_sub_second_units() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.5ms");
        assert_eq!(format_duration(Duration::from_millis(300)), "300ms");
    }

    #[test]
    fn parse_compound() {
        assert_eq!(parse_duration("1h0m0s").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("2h45m10s").unwrap(), Duration::from_secs(9910));
    }

    #[test]
    fn parse_fractions() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("1.s").unwrap(), Duration::from_secs(1));
        assert_eq!(
            parse_duration("0.0000000019s").unwrap(),
            Duration::from_nanos(1)
        );
    }

    #[test]
    fn parse_micro_spellings() {
        for s in ["3us", "3µs", "3μs"] {
            assert_eq!(parse_duration(s).unwrap(), Duration::from_micros(3), "{s}");
        }
    }

    #[test]
    fn parse_zero_forms() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("+0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(parse_duration("").unwrap_err(), "empty duration");
        assert!(parse_duration("-").is_err());
    }

    #[test]
    fn parse_rejects_missing_or_unknown_unit() {
        assert_eq!(parse_duration("10").unwrap_err(), "missing unit");
        assert!(parse_duration("10x").unwrap_err().contains("unknown unit"));
        assert!(parse_duration("1h30").is_err());
    }

    #[test]
    fn parse_rejects_bare_dot_and_space() {
        assert!(parse_duration(".s").is_err());
        assert!(parse_duration("1h 30m").is_err());
    }

    #[test]
    fn parse_rejects_negative() {
        assert!(parse_duration("-1s").unwrap_err().contains("negative"));
    }

    #[test]
    fn parse_rejects_overflow() {
        assert_eq!(
            parse_duration("9999999999999999999999h").unwrap_err(),
            "duration out of range"
        );
        assert_eq!(parse_duration("6000000h").unwrap_err(), "duration out of range");
    }

    #[test]
    fn codec_round_trips_canonical_text() {
        let d = Duration::decode("1h0m0s", &Options::default()).unwrap();
        assert_eq!(d.encode(&Options::default()).unwrap(), "1h0m0s");
    }

    #[test]
    fn codec_humantime_grammar() {
        let opts = Options {
            duration_format_marshal: DurationFormat::Humantime,
            duration_format_unmarshal: DurationFormat::Humantime,
            ..Options::default()
        };
        let d = Duration::decode("1h 30m", &opts).unwrap();
        assert_eq!(d, Duration::from_secs(5400));
        assert_eq!(d.encode(&opts).unwrap(), "1h 30m");
        assert!(Duration::decode("", &opts).is_err());
    }

    #[test]
    fn codec_error_names_input() {
        let err = Duration::decode("", &Options::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidDuration { .. }));
        assert_eq!(err.to_string(), "invalid duration '': empty duration");
    }

    proptest! {
        #[test]
        fn canonical_text_round_trips(nanos in 0u64..=u64::MAX) {
            let d = Duration::from_nanos(nanos);
            prop_assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
        }
    }
}
