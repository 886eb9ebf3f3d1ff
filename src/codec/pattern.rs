//! Regular-expression codec.

use regex::Regex;

use super::Codec;
use crate::error::CodecError;
use crate::options::Options;

impl Codec for Regex {
    const KIND: &'static str = "regular expression";

    fn encode(&self, _options: &Options) -> Result<String, CodecError> {
        Ok(self.as_str().to_string())
    }

    fn decode(text: &str, _options: &Options) -> Result<Self, CodecError> {
        Regex::new(text).map_err(|e| CodecError::InvalidRegex {
            input: text.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_text_is_preserved() {
        for pattern in [".*", "a{2,}", r"(?i)^\d+$", "[a-c]+"] {
            let re = Regex::decode(pattern, &Options::default()).unwrap();
            assert_eq!(re.encode(&Options::default()).unwrap(), pattern);
        }
    }

    #[test]
    fn invalid_syntax_rejected() {
        for pattern in ["*", "(", "a{2", "[z-a]"] {
            let err = Regex::decode(pattern, &Options::default()).unwrap_err();
            assert!(matches!(err, CodecError::InvalidRegex { .. }), "{pattern}");
        }
    }
}
