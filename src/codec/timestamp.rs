//! Timestamp codec.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat, Timelike, Utc};

use super::Codec;
use crate::error::CodecError;
use crate::options::{Options, TimeLayout};

impl Codec for DateTime<FixedOffset> {
    const KIND: &'static str = "timestamp";

    fn encode(&self, options: &Options) -> Result<String, CodecError> {
        format_with(self, options.marshal_layout())
    }

    fn decode(text: &str, options: &Options) -> Result<Self, CodecError> {
        parse_with(text, options.unmarshal_layout())
    }
}

impl Codec for DateTime<Utc> {
    const KIND: &'static str = "timestamp";

    fn encode(&self, options: &Options) -> Result<String, CodecError> {
        format_with(&self.fixed_offset(), options.marshal_layout())
    }

    fn decode(text: &str, options: &Options) -> Result<Self, CodecError> {
        parse_with(text, options.unmarshal_layout()).map(|dt| dt.with_timezone(&Utc))
    }
}

fn format_with(dt: &DateTime<FixedOffset>, layout: &TimeLayout) -> Result<String, CodecError> {
    match layout {
        TimeLayout::Rfc3339 => Ok(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        TimeLayout::Rfc3339Nano => Ok(rfc3339_trimmed(dt)),
        // RFC 2822 has a four-digit year; chrono panics outside it.
        TimeLayout::Rfc2822 if (0..=9999).contains(&dt.year()) => Ok(dt.to_rfc2822()),
        TimeLayout::Rfc2822 => Err(CodecError::TimestampFormat {
            layout: layout.to_string(),
        }),
        TimeLayout::Custom(format) => {
            let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
            if items.iter().any(|item| matches!(item, Item::Error)) {
                return Err(CodecError::TimestampFormat {
                    layout: layout.to_string(),
                });
            }
            let mut out = String::new();
            // DelayedFormat reports unsupported specifiers (e.g. %Z on a fixed offset) via fmt::Error.
            write!(out, "{}", dt.format_with_items(items.into_iter())).map_err(|_| {
                CodecError::TimestampFormat {
                    layout: layout.to_string(),
                }
            })?;
            Ok(out)
        }
    }
}

/// RFC 3339 with the fractional second trimmed of trailing zeros and
/// omitted entirely when zero.
fn rfc3339_trimmed(dt: &DateTime<FixedOffset>) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = dt.nanosecond();
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    if dt.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        let _ = write!(out, "{}", dt.format("%:z"));
    }
    out
}

fn parse_with(text: &str, layout: &TimeLayout) -> Result<DateTime<FixedOffset>, CodecError> {
    let parsed = match layout {
        TimeLayout::Rfc3339 | TimeLayout::Rfc3339Nano => DateTime::parse_from_rfc3339(text),
        TimeLayout::Rfc2822 => DateTime::parse_from_rfc2822(text),
        TimeLayout::Custom(format) => DateTime::parse_from_str(text, format),
    };
    parsed.map_err(|e| CodecError::InvalidTimestamp {
        input: text.to_string(),
        layout: layout.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn opts_out(layout: TimeLayout) -> Options {
        Options {
            time_layout_marshal: Some(layout),
            ..Options::default()
        }
    }

    fn opts_in(layout: TimeLayout) -> Options {
        Options {
            time_layout_unmarshal: Some(layout),
            ..Options::default()
        }
    }

    fn base() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2022, 10, 4, 0, 0, 0)
            .unwrap()
            .fixed_offset()
    }

    #[test]
    fn default_output_omits_zero_fraction() {
        assert_eq!(
            base().encode(&Options::default()).unwrap(),
            "2022-10-04T00:00:00Z"
        );
    }

    #[test]
    fn nano_output_keeps_single_nanosecond() {
        let tn = base() + chrono::Duration::nanoseconds(1);
        assert_eq!(
            tn.encode(&opts_out(TimeLayout::Rfc3339Nano)).unwrap(),
            "2022-10-04T00:00:00.000000001Z"
        );
    }

    #[test]
    fn nano_output_trims_trailing_zeros() {
        let t = base() + chrono::Duration::milliseconds(500);
        assert_eq!(
            t.encode(&Options::default()).unwrap(),
            "2022-10-04T00:00:00.5Z"
        );
    }

    #[test]
    fn second_layout_truncates() {
        let t = base() + chrono::Duration::nanoseconds(999_999_999);
        assert_eq!(
            t.encode(&opts_out(TimeLayout::Rfc3339)).unwrap(),
            "2022-10-04T00:00:00Z"
        );
    }

    #[test]
    fn non_utc_offset_rendered_numerically() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let t = offset.with_ymd_and_hms(2022, 10, 4, 0, 0, 0).unwrap();
        assert_eq!(
            t.encode(&Options::default()).unwrap(),
            "2022-10-04T00:00:00-07:00"
        );
    }

    #[test]
    fn rfc3339_input_accepts_fraction() {
        let t = DateTime::<FixedOffset>::decode(
            "2022-10-04T00:00:00.000000001Z",
            &Options::default(),
        )
        .unwrap();
        assert_eq!(t.nanosecond(), 1);
    }

    #[test]
    fn rfc2822_input_accepts_obsolete_zone() {
        let t = DateTime::<FixedOffset>::decode(
            "Tue, 04 Oct 2022 00:00:00 MST",
            &opts_in(TimeLayout::Rfc2822),
        )
        .unwrap();
        assert_eq!(t.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn empty_input_rejected() {
        let err = DateTime::<FixedOffset>::decode("", &Options::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidTimestamp { .. }));
    }

    #[test]
    fn wrong_layout_rejected() {
        let err = DateTime::<FixedOffset>::decode(
            "2022-10-04T00:00:00Z",
            &opts_in(TimeLayout::Rfc2822),
        )
        .unwrap_err();
        assert!(err.to_string().contains("2022-10-04T00:00:00Z"));
        assert!(err.to_string().contains("rfc2822"));
    }

    #[test]
    fn custom_layout_round_trip() {
        let layout = TimeLayout::Custom("%Y/%m/%d %H:%M:%S %z".to_string());
        let text = base().encode(&opts_out(layout.clone())).unwrap();
        assert_eq!(text, "2022/10/04 00:00:00 +0000");
        let back = DateTime::<FixedOffset>::decode(&text, &opts_in(layout)).unwrap();
        assert_eq!(back, base());
    }

    #[test]
    fn invalid_custom_layout_is_error_not_panic() {
        let err = base()
            .encode(&opts_out(TimeLayout::Custom("%Q%".to_string())))
            .unwrap_err();
        assert!(matches!(err, CodecError::TimestampFormat { .. }));
    }

    #[test]
    fn utc_codec_normalizes_offset() {
        let t = DateTime::<Utc>::decode("2022-10-04T02:00:00+02:00", &Options::default()).unwrap();
        assert_eq!(t.encode(&Options::default()).unwrap(), "2022-10-04T00:00:00Z");
    }

    #[test]
    fn rfc2822_out_of_range_year_is_error() {
        for year in [10_000, -1] {
            let t = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
            let err = t.encode(&opts_out(TimeLayout::Rfc2822)).unwrap_err();
            assert!(
                matches!(err, CodecError::TimestampFormat { ref layout } if layout == "rfc2822"),
                "{year}: {err}"
            );
        }
        let edge = Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap();
        assert!(edge.encode(&opts_out(TimeLayout::Rfc2822)).is_ok());
    }
}
