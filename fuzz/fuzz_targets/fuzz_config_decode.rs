#![no_main]

use std::time::Duration;

use jsontype::config::{ENV_CONFIG_JSON, MapEnv};
use jsontype::{DefaultsAndValidate, JsonType, Mailbox, Reader, ValidationError};
use libfuzzer_sys::fuzz_target;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sample {
    #[allow(dead_code)]
    interval: Option<JsonType<Duration>>,
    #[allow(dead_code)]
    notify: Option<JsonType<Mailbox>>,
    #[allow(dead_code)]
    page: Option<JsonType<url::Url>>,
}

impl DefaultsAndValidate for Sample {
    fn defaults_and_validate(self) -> Result<Self, ValidationError> {
        Ok(self)
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let reader = Reader::new(MapEnv::new().with(ENV_CONFIG_JSON, text))
            .with_default_path("/nonexistent/config.json");
        let _ = reader.read::<Sample>();
    }
});
