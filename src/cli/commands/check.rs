//! `check`: run one value through a codec.
//!
//! The value is wrapped as a JSON string, decoded with the input options,
//! and re-encoded with the output options, exactly as a configuration field
//! would be.

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::time::Duration;
use url::Url;

use crate::cli::args::{CheckArgs, OutputFormat, ValueKind};
use crate::codec::Codec;
use crate::error::JsonTypeError;
use crate::json_type::JsonType;
use crate::mailbox::Mailbox;

/// Decode and re-encode `args.value`, printing the result.
///
/// # Errors
///
/// Returns a usage error if a flag does not apply to the value's kind, and a
/// codec error if the value is invalid for its kind or the options conflict.
pub fn run(args: &CheckArgs) -> Result<(), JsonTypeError> {
    if let Some(flag) = args.misapplied_flag() {
        return Err(JsonTypeError::Usage(format!(
            "{flag} does not apply to {} values",
            args.kind.name()
        )));
    }

    let encoded = match args.kind {
        ValueKind::Timestamp => recode::<DateTime<FixedOffset>>(args)?,
        ValueKind::Duration => recode::<Duration>(args)?,
        ValueKind::Url => recode::<Url>(args)?,
        ValueKind::Email => recode::<Mailbox>(args)?,
        ValueKind::Regex => recode::<Regex>(args)?,
    };

    match args.format {
        OutputFormat::Human => println!("{}", String::from_utf8_lossy(&encoded.json)),
        OutputFormat::Json => {
            let text: String = serde_json::from_slice(&encoded.json)?;
            let report = serde_json::json!({
                "kind": encoded.kind,
                "input": args.value,
                "output": text,
            });
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

struct Recoded {
    kind: &'static str,
    json: Vec<u8>,
}

fn recode<T: Codec>(args: &CheckArgs) -> Result<Recoded, JsonTypeError> {
    let options = args.options();
    options.validate()?;

    let mut wrapper = JsonType::<Option<T>>::with_options(None, options);
    wrapper.unmarshal_json(&serde_json::to_vec(&args.value)?)?;
    tracing::debug!(kind = T::KIND, input = %args.value, "value decoded");

    Ok(Recoded {
        kind: T::KIND,
        json: wrapper.marshal_json()?,
    })
}
