//! URL codec.

use url::Url;

use super::Codec;
use crate::error::CodecError;
use crate::options::Options;

impl Codec for Url {
    const KIND: &'static str = "URL";

    fn encode(&self, _options: &Options) -> Result<String, CodecError> {
        Ok(render(self).to_string())
    }

    fn decode(text: &str, _options: &Options) -> Result<Self, CodecError> {
        // The url parser silently strips tabs and newlines; reject every control character instead.
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(CodecError::InvalidUrl {
                input: text.to_string(),
                reason: format!("invalid control character {:#04x}", u32::from(c)),
            });
        }
        Url::parse(text).map_err(|e| CodecError::InvalidUrl {
            input: text.to_string(),
            reason: match e {
                url::ParseError::RelativeUrlWithoutBase => {
                    "relative reference; only absolute URLs are accepted".to_string()
                }
                e => e.to_string(),
            },
        })
    }
}

/// The serialization without the implicit root path, so that an authority
/// with an empty path (`https://github.com`) renders exactly as written.
fn render(url: &Url) -> &str {
    let serialized = url.as_str();
    if !url.cannot_be_a_base()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
    {
        return serialized.strip_suffix('/').unwrap_or(serialized);
    }
    serialized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<Url, CodecError> {
        Url::decode(text, &Options::default())
    }

    fn encode(url: &Url) -> String {
        url.encode(&Options::default()).unwrap()
    }

    #[test]
    fn authority_only_round_trips_exactly() {
        let url = decode("https://github.com").unwrap();
        assert_eq!(encode(&url), "https://github.com");
    }

    #[test]
    fn root_slash_decodes_to_same_url() {
        let with_slash = decode("https://github.com/").unwrap();
        let without = decode("https://github.com").unwrap();
        assert_eq!(with_slash, without);
    }

    #[test]
    fn path_query_and_fragment_preserved() {
        for text in [
            "https://example.com/a/b?x=1#frag",
            "https://example.com/?q=1",
            "https://example.com/#top",
            "mailto:someone@example.com",
        ] {
            assert_eq!(encode(&decode(text).unwrap()), text);
        }
    }

    #[test]
    fn delete_character_rejected() {
        let err = decode("\u{7f}").unwrap_err();
        assert!(matches!(err, CodecError::InvalidUrl { .. }));
        assert!(err.to_string().contains("0x7f"));
    }

    #[test]
    fn embedded_newline_rejected() {
        assert!(decode("https://exa\nmple.com").is_err());
    }

    #[test]
    fn relative_reference_rejected() {
        for text in ["/just/a/path", "example.com", ""] {
            let err = decode(text).unwrap_err();
            assert!(
                err.to_string().contains("only absolute URLs are accepted"),
                "{text:?}: {err}"
            );
        }
    }
}
