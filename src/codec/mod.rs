//! Semantic codecs.
//!
//! One [`Codec`] implementation exists per supported semantic type:
//!
//! | Semantic type       | Rust type                                   |
//! |---------------------|---------------------------------------------|
//! | timestamp           | `chrono::DateTime<FixedOffset>`, `DateTime<Utc>` |
//! | duration            | `std::time::Duration`                       |
//! | URL                 | `url::Url`                                  |
//! | email address       | [`Mailbox`](crate::Mailbox)                 |
//! | regular expression  | `regex::Regex`                              |
//!
//! Any of them may also be wrapped in `Option`, in which case an absent
//! value is a defect at encode time rather than a representable state.
//!
//! The trait is sealed: the set of semantic types is closed, and adding one
//! means adding one implementation here.

mod duration;
mod mailbox;
mod pattern;
mod timestamp;
mod uri;

pub use duration::{format_duration, parse_duration};

use crate::error::CodecError;
use crate::options::Options;

mod private {
    pub trait Sealed {}

    impl Sealed for chrono::DateTime<chrono::FixedOffset> {}
    impl Sealed for chrono::DateTime<chrono::Utc> {}
    impl Sealed for std::time::Duration {}
    impl Sealed for url::Url {}
    impl Sealed for crate::mailbox::Mailbox {}
    impl Sealed for regex::Regex {}
    impl<T: Sealed> Sealed for Option<T> {}
}

/// Encode/decode strategy for one semantic type.
///
/// Codecs are stateless. They read the [`Options`] they are handed and never
/// mutate them.
pub trait Codec: private::Sealed + Sized {
    /// Name of the semantic type, used in error messages.
    const KIND: &'static str;

    /// Renders the value as the text of a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the options conflict or the value cannot
    /// be rendered.
    fn encode(&self, options: &Options) -> Result<String, CodecError>;

    /// Parses and validates the text of a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the text is not a valid value of this type.
    fn decode(text: &str, options: &Options) -> Result<Self, CodecError>;
}

impl<T: Codec> Codec for Option<T> {
    const KIND: &'static str = T::KIND;

    fn encode(&self, options: &Options) -> Result<String, CodecError> {
        self.as_ref()
            .ok_or(CodecError::MissingValue { kind: T::KIND })?
            .encode(options)
    }

    fn decode(text: &str, options: &Options) -> Result<Self, CodecError> {
        T::decode(text, options).map(Some)
    }
}
