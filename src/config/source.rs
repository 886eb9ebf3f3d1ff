//! Configuration source resolution.
//!
//! Sources are probed in a fixed order and the first one present wins:
//!
//! 1. `CONFIG_JSON` holds the document inline. Set means present, even when empty.
//! 2. `CONFIG_PATH` names a file. A non-empty value means present; the file
//!    must then be readable.
//! 3. `config.json` in the working directory, if it exists.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ReadError;

/// Environment variable holding an inline JSON document.
pub const ENV_CONFIG_JSON: &str = "CONFIG_JSON";

/// Environment variable holding the path of a JSON document.
pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";

/// Path probed when neither environment variable is set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

// ============================================================================
// Environment access
// ============================================================================

/// Access to environment variables and files.
///
/// The loader never touches the process directly, so tests can supply their
/// own variables without mutating global state.
pub trait Environment {
    /// Returns the variable's value, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<OsString>;

    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// The real process environment and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// A fixed set of variables over the real filesystem.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, OsString>,
}

impl MapEnv {
    /// Creates an environment with no variables set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<OsString> {
        (**self).var(name)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

// ============================================================================
// Providers and documents
// ============================================================================

/// Where a configuration document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Inline JSON from an environment variable
    InlineEnv {
        /// Variable name
        var: String,
    },
    /// A file named by an environment variable
    PathEnv {
        /// Variable name
        var: String,
        /// The file that was read
        path: PathBuf,
    },
    /// The default file
    DefaultFile {
        /// The file that was read
        path: PathBuf,
    },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineEnv { var } => write!(f, "env:{var}"),
            Self::PathEnv { var, path } => write!(f, "file:{} (from {var})", path.display()),
            Self::DefaultFile { path } => write!(f, "file:{}", path.display()),
        }
    }
}

/// Raw bytes of a configuration document and their origin.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    /// Where the bytes came from
    pub source: ConfigSource,
    /// The document, unparsed
    pub bytes: Vec<u8>,
}

/// One place a configuration document may be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceProvider {
    /// Inline JSON in the named variable
    InlineEnv {
        /// Variable name
        var: String,
    },
    /// A file whose path is in the named variable
    PathEnv {
        /// Variable name
        var: String,
    },
    /// A fixed file path
    DefaultFile {
        /// File path
        path: PathBuf,
    },
}

impl SourceProvider {
    /// The standard provider order: `CONFIG_JSON`, `CONFIG_PATH`, `config.json`.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::InlineEnv {
                var: ENV_CONFIG_JSON.to_string(),
            },
            Self::PathEnv {
                var: ENV_CONFIG_PATH.to_string(),
            },
            Self::DefaultFile {
                path: PathBuf::from(DEFAULT_CONFIG_PATH),
            },
        ]
    }

    /// Reports which source this provider would yield, without reading it.
    pub fn locate(&self, env: &impl Environment) -> Option<ConfigSource> {
        match self {
            Self::InlineEnv { var } => env
                .var(var)
                .map(|_| ConfigSource::InlineEnv { var: var.clone() }),
            Self::PathEnv { var } => env
                .var(var)
                .filter(|value| !value.is_empty())
                .map(|value| ConfigSource::PathEnv {
                    var: var.clone(),
                    path: PathBuf::from(value),
                }),
            Self::DefaultFile { path } => env
                .exists(path)
                .then(|| ConfigSource::DefaultFile { path: path.clone() }),
        }
    }

    /// Produces the document if this provider's source is present.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Unreadable`] when the source is present but its
    /// file cannot be read.
    pub fn probe(&self, env: &impl Environment) -> Result<Option<ConfigDocument>, ReadError> {
        match self {
            Self::InlineEnv { var } => Ok(env.var(var).map(|value| ConfigDocument {
                source: ConfigSource::InlineEnv { var: var.clone() },
                bytes: value.into_encoded_bytes(),
            })),
            Self::PathEnv { var } => {
                let Some(value) = env.var(var).filter(|value| !value.is_empty()) else {
                    return Ok(None);
                };
                let path = PathBuf::from(value);
                let bytes = env
                    .read_file(&path)
                    .map_err(|source| ReadError::Unreadable {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Some(ConfigDocument {
                    source: ConfigSource::PathEnv {
                        var: var.clone(),
                        path,
                    },
                    bytes,
                }))
            }
            Self::DefaultFile { path } => match env.read_file(path) {
                Ok(bytes) => Ok(Some(ConfigDocument {
                    source: ConfigSource::DefaultFile { path: path.clone() },
                    bytes,
                })),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(ReadError::Unreadable {
                    path: path.clone(),
                    source,
                }),
            },
        }
    }
}

impl fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InlineEnv { var } | Self::PathEnv { var } => write!(f, "env:{var}"),
            Self::DefaultFile { path } => write!(f, "file:{}", path.display()),
        }
    }
}
