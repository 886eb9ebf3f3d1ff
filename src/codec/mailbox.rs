//! Email-address codec.

use super::Codec;
use crate::error::CodecError;
use crate::mailbox::Mailbox;
use crate::options::Options;

impl Codec for Mailbox {
    const KIND: &'static str = "email address";

    fn encode(&self, options: &Options) -> Result<String, CodecError> {
        options.validate()?;

        let rendered = if options.address_only {
            self.address().to_string()
        } else {
            self.to_string()
        };

        Ok(if options.address_lower {
            rendered.to_lowercase()
        } else if options.address_upper {
            rendered.to_uppercase()
        } else {
            rendered
        })
    }

    fn decode(text: &str, _options: &Options) -> Result<Self, CodecError> {
        text.parse().map_err(|e: crate::mailbox::ParseMailboxError| {
            CodecError::InvalidAddress {
                input: text.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
