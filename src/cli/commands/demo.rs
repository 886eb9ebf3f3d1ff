//! `demo`: decode a product-watch configuration and re-encode it.
//!
//! The `ends` field is pre-configured to parse RFC 2822 input before the
//! document is decoded, and `notify` is re-wrapped to render a lower-cased
//! bare address afterwards.

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::cli::args::DemoArgs;
use crate::codec::format_duration;
use crate::config::{DefaultsAndValidate, ProcessEnv, Reader};
use crate::error::{JsonTypeError, ReadError, ValidationError};
use crate::json_type::{JsonType, from_str_in_place};
use crate::mailbox::Mailbox;
use crate::options::{Options, TimeLayout};

/// Document decoded when `--from-env` is not given.
pub const SAMPLE_CONFIG: &str = r#"{
  "ends": "Tue, 04 Oct 2022 00:00:00 MST",
  "getInterval": "1h30m",
  "notificationMsg": "Your item is on sale!",
  "notify": "EXAMPLE@example.com",
  "targetPage": "https://www.example.com",
  "targetRegExp": "example",
  "targetUUID": "84abbfc2-b7a8-4446-a351-927c0fd26a3a"
}"#;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(3600);

/// A product-watch configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchConfig {
    pub ends: JsonType<Option<DateTime<FixedOffset>>>,
    pub get_interval: JsonType<Duration>,
    pub notification_msg: String,
    pub notify: JsonType<Option<Mailbox>>,
    pub target_page: JsonType<Option<Url>>,
    pub target_reg_exp: JsonType<Option<Regex>>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        let ends = Options {
            time_layout_unmarshal: Some(TimeLayout::Rfc2822),
            ..Options::default()
        };
        Self {
            ends: JsonType::with_options(None, ends),
            get_interval: JsonType::default(),
            notification_msg: String::new(),
            notify: JsonType::default(),
            target_page: JsonType::default(),
            target_reg_exp: JsonType::default(),
        }
    }
}

impl DefaultsAndValidate for WatchConfig {
    fn defaults_and_validate(mut self) -> Result<Self, ValidationError> {
        if self.get_interval.get().is_zero() {
            self.get_interval = JsonType::new(DEFAULT_INTERVAL);
        }
        if self.notify.get().is_none() {
            return Err(ValidationError::field("notify", "an address is required"));
        }
        if self.target_page.get().is_none() {
            return Err(ValidationError::field("targetPage", "a URL is required"));
        }
        Ok(self)
    }
}

/// Decode, print accessors, and re-encode the configuration.
///
/// # Errors
///
/// Returns read errors with `--from-env`, decode errors for the sample, and
/// codec errors when re-encoding (for example an absent `targetRegExp`).
pub fn run(args: &DemoArgs) -> Result<(), JsonTypeError> {
    let mut config = if args.from_env {
        Reader::new(ProcessEnv).read_into(WatchConfig::default())?
    } else {
        let mut config = WatchConfig::default();
        from_str_in_place(SAMPLE_CONFIG, &mut config)?;
        config.defaults_and_validate().map_err(ReadError::from)?
    };

    if let Some(ends) = config.ends.get() {
        println!("Ends: {ends}");
    }
    println!("Get interval: {}", format_duration(*config.get_interval.get()));

    let notify = Options {
        address_only: true,
        address_lower: true,
        ..Options::default()
    };
    config.notify = JsonType::with_options(config.notify.into_inner(), notify);

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
