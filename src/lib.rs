//! `jsontype` - semantic JSON string types and an environment-driven config loader
//!
//! [`JsonType<T>`] carries a timestamp, duration, URL, email address or
//! regular expression through JSON as a single string, validating it on the
//! way in. Per-field [`Options`] change layouts, grammars and address
//! normalization.
//!
//! [`read`] loads an application's configuration from `CONFIG_JSON`,
//! `CONFIG_PATH`, or `config.json`, in that order, and finishes it with the
//! structure's [`DefaultsAndValidate`] hook.
//!
//! ```
//! use jsontype::{JsonType, Mailbox, Options};
//!
//! let opts = Options {
//!     address_only: true,
//!     address_lower: true,
//!     ..Options::default()
//! };
//! let notify: Mailbox = "Sales <SALES@example.com>".parse().unwrap();
//! let field = JsonType::with_options(notify, opts);
//! assert_eq!(serde_json::to_string(&field).unwrap(), r#""sales@example.com""#);
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod mailbox;
pub mod observability;
pub mod options;

mod json_type;

pub use codec::Codec;
pub use config::{DefaultsAndValidate, Reader, read};
pub use error::{CodecError, ErrorKind, ReadError, ValidationError};
pub use json_type::{JsonType, from_slice_in_place, from_str_in_place};
pub use mailbox::Mailbox;
pub use options::{DurationFormat, Options, TimeLayout};
