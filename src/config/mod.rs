//! Configuration loading.
//!
//! [`read`] resolves a JSON document from the environment (see [`source`]),
//! decodes it into the application's structure, and runs the structure's
//! [`DefaultsAndValidate`] hook exactly once. Every call re-resolves and
//! re-reads; nothing is cached.

pub mod source;

pub use source::{
    ConfigDocument, ConfigSource, DEFAULT_CONFIG_PATH, ENV_CONFIG_JSON, ENV_CONFIG_PATH,
    Environment, MapEnv, ProcessEnv, SourceProvider,
};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ReadError, ValidationError};

/// Post-decode defaulting and validation for a configuration structure.
pub trait DefaultsAndValidate: Sized {
    /// Fills in defaults and checks business rules.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] to reject the whole configuration.
    fn defaults_and_validate(self) -> Result<Self, ValidationError>;
}

/// Reads configuration from the process environment.
///
/// # Errors
///
/// See [`Reader::read`].
pub fn read<C>() -> Result<C, ReadError>
where
    C: DeserializeOwned + DefaultsAndValidate,
{
    Reader::new(ProcessEnv).read()
}

/// Resolves, decodes and finalizes configuration against an [`Environment`].
#[derive(Debug, Clone)]
pub struct Reader<E> {
    env: E,
    providers: Vec<SourceProvider>,
}

impl<E: Environment> Reader<E> {
    /// A reader using the standard providers.
    #[must_use]
    pub fn new(env: E) -> Self {
        Self::with_providers(env, SourceProvider::defaults())
    }

    /// A reader probing `providers` in order.
    #[must_use]
    pub const fn with_providers(env: E, providers: Vec<SourceProvider>) -> Self {
        Self { env, providers }
    }

    /// Replaces the default file path, keeping the other providers.
    #[must_use]
    pub fn with_default_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        for provider in &mut self.providers {
            if let SourceProvider::DefaultFile { path: current } = provider {
                current.clone_from(&path);
            }
        }
        self
    }

    /// The providers, in probe order.
    #[must_use]
    pub fn providers(&self) -> &[SourceProvider] {
        &self.providers
    }

    /// Reports which source would be used, without reading any file.
    #[must_use]
    pub fn locate(&self) -> Option<ConfigSource> {
        self.providers
            .iter()
            .find_map(|provider| provider.locate(&self.env))
    }

    /// Returns the document from the first present source.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Unreadable`] if a selected file cannot be read,
    /// or [`ReadError::NotFound`] if no source is present.
    pub fn resolve(&self) -> Result<ConfigDocument, ReadError> {
        for provider in &self.providers {
            if let Some(document) = provider.probe(&self.env)? {
                tracing::debug!(
                    source = %document.source,
                    bytes = document.bytes.len(),
                    "configuration source selected"
                );
                return Ok(document);
            }
            tracing::trace!(provider = %provider, "configuration source not present");
        }
        Err(ReadError::NotFound {
            searched: self.providers.iter().map(ToString::to_string).collect(),
        })
    }

    /// Reads a fresh configuration structure.
    ///
    /// # Errors
    ///
    /// - [`ReadError::NotFound`] / [`ReadError::Unreadable`] from source resolution
    /// - [`ReadError::Decode`] if the document is not valid JSON for `C`,
    ///   including wrapper fields whose codec rejects their value
    /// - [`ReadError::Validation`] if the hook rejects the structure
    pub fn read<C>(&self) -> Result<C, ReadError>
    where
        C: DeserializeOwned + DefaultsAndValidate,
    {
        let document = self.resolve()?;
        let decoded: C =
            serde_json::from_slice(&document.bytes).map_err(|source| ReadError::Decode {
                origin: document.source.clone(),
                source,
            })?;
        Ok(decoded.defaults_and_validate()?)
    }

    /// Reads configuration into a pre-built structure.
    ///
    /// Wrapper fields of `template` keep their options, so input layouts can
    /// be configured before decoding. Fields absent from the document take
    /// the structure's serde default.
    ///
    /// # Errors
    ///
    /// Same as [`Reader::read`].
    pub fn read_into<C>(&self, mut template: C) -> Result<C, ReadError>
    where
        C: for<'de> Deserialize<'de> + DefaultsAndValidate,
    {
        let document = self.resolve()?;
        crate::json_type::from_slice_in_place(&document.bytes, &mut template).map_err(
            |source| ReadError::Decode {
                origin: document.source.clone(),
                source,
            },
        )?;
        Ok(template.defaults_and_validate()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Deserialize)]
    struct Plain {
        #[serde(default, rename = "myString")]
        my_string: String,
    }

    impl DefaultsAndValidate for Plain {
        fn defaults_and_validate(mut self) -> Result<Self, ValidationError> {
            if self.my_string.is_empty() {
                self.my_string = "default".to_string();
            }
            Ok(self)
        }
    }

    fn isolated(env: MapEnv) -> (Reader<MapEnv>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let reader = Reader::new(env).with_default_path(dir.path().join("config.json"));
        (reader, dir)
    }

    #[test]
    fn with_default_path_replaces_only_file_provider() {
        let (reader, dir) = isolated(MapEnv::new());
        assert_eq!(reader.providers().len(), 3);
        assert_eq!(
            reader.providers()[2],
            SourceProvider::DefaultFile {
                path: dir.path().join("config.json")
            }
        );
        assert_eq!(reader.providers()[0].to_string(), "env:CONFIG_JSON");
    }

    #[test]
    fn not_found_lists_providers() {
        let (reader, _dir) = isolated(MapEnv::new());
        let err = reader.read::<Plain>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let ReadError::NotFound { searched } = err else {
            panic!("expected NotFound");
        };
        assert_eq!(searched.len(), 3);
        assert_eq!(searched[1], "env:CONFIG_PATH");
    }

    #[test]
    fn default_file_used_when_no_variables() {
        let (reader, dir) = isolated(MapEnv::new());
        std::fs::write(dir.path().join("config.json"), r#"{"myString":"file"}"#).unwrap();
        let cfg: Plain = reader.read().unwrap();
        assert_eq!(cfg.my_string, "file");
        assert!(matches!(
            reader.locate(),
            Some(ConfigSource::DefaultFile { .. })
        ));
    }

    #[test]
    fn empty_inline_document_is_decode_error() {
        let (reader, dir) = isolated(MapEnv::new().with(ENV_CONFIG_JSON, ""));
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        let err = reader.read::<Plain>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn decode_error_names_origin() {
        let (reader, _dir) = isolated(MapEnv::new().with(ENV_CONFIG_JSON, "{"));
        let err = reader.read::<Plain>().unwrap_err();
        assert!(err.to_string().contains("env:CONFIG_JSON"), "{err}");
    }

    #[test]
    fn locate_reports_nothing_when_unset() {
        let (reader, _dir) = isolated(MapEnv::new());
        assert!(reader.locate().is_none());
    }
}
