//! The generic semantic wrapper.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::Codec;
use crate::error::CodecError;
use crate::options::Options;

/// A semantic value that travels through JSON as a single string.
///
/// The wrapper binds one value to one [`Options`] record and dispatches
/// (de)serialization to the value's [`Codec`]. Values are immutable once
/// wrapped; build a new wrapper to change one.
///
/// ```
/// use jsontype::{JsonType, Options};
/// use std::time::Duration;
///
/// let interval = JsonType::new(Duration::from_secs(5400));
/// assert_eq!(serde_json::to_string(&interval).unwrap(), r#""1h30m0s""#);
///
/// let parsed: JsonType<Duration> = serde_json::from_str(r#""1h30m""#).unwrap();
/// assert_eq!(*parsed.get(), Duration::from_secs(5400));
/// # let _ = Options::default();
/// ```
#[derive(Debug, Clone)]
pub struct JsonType<T> {
    value: T,
    options: Options,
}

impl<T: Codec> JsonType<T> {
    /// Wraps `value` with default options.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_options(value, Options::default())
    }

    /// Wraps `value` with explicit options.
    #[must_use]
    pub const fn with_options(value: T, options: Options) -> Self {
        Self { value, options }
    }

    /// The wrapped value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// The options this wrapper encodes and decodes with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Unwraps the value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Renders the value as a JSON string literal.
    ///
    /// # Errors
    ///
    /// Returns the codec's error verbatim: conflicting options, or a missing
    /// value for optional types.
    pub fn marshal_json(&self) -> Result<Vec<u8>, CodecError> {
        let text = self.value.encode(&self.options)?;
        Ok(serde_json::to_vec(&text)?)
    }

    /// Replaces the value with one decoded from a JSON string literal, using
    /// the options already held by this wrapper.
    ///
    /// On error the wrapper keeps its previous value, but callers should treat
    /// it as unusable.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if `data` is not a JSON string, or the
    /// codec's error if the string is not a valid value.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let text: String = serde_json::from_slice(data)?;
        self.value = T::decode(&text, &self.options)?;
        Ok(())
    }
}

impl<T: Codec + Default> Default for JsonType<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> AsRef<T> for JsonType<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: Codec> From<T> for JsonType<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Codec> Serialize for JsonType<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.value.encode(&self.options).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de, T: Codec> Deserialize<'de> for JsonType<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let value = T::decode(&text, &Options::default()).map_err(D::Error::custom)?;
        Ok(Self::new(value))
    }

    // Reached through `from_slice_in_place`; decodes with the receiver's options.
    fn deserialize_in_place<D: Deserializer<'de>>(
        deserializer: D,
        place: &mut Self,
    ) -> Result<(), D::Error> {
        let text = String::deserialize(deserializer)?;
        place.value = T::decode(&text, &place.options).map_err(D::Error::custom)?;
        Ok(())
    }
}

/// Decodes `data` into an existing value, field by field.
///
/// Wrapper fields keep their options and decode with them, which lets an
/// application pre-configure input layouts before decoding. Fields missing
/// from the document take the structure's serde default, so a container-level
/// `#[serde(default)]` backed by a configuring `Default` impl keeps their
/// options too.
///
/// # Errors
///
/// Returns the decoder error, including codec failures at their position.
pub fn from_slice_in_place<'de, T: Deserialize<'de>>(
    data: &'de [u8],
    place: &mut T,
) -> serde_json::Result<()> {
    let mut deserializer = serde_json::Deserializer::from_slice(data);
    T::deserialize_in_place(&mut deserializer, place)?;
    deserializer.end()
}

/// String form of [`from_slice_in_place`].
///
/// # Errors
///
/// Returns the decoder error, including codec failures at their position.
pub fn from_str_in_place<'de, T: Deserialize<'de>>(
    data: &'de str,
    place: &mut T,
) -> serde_json::Result<()> {
    from_slice_in_place(data.as_bytes(), place)
}
