//! `source`: report where configuration would be read from.

use serde_json::json;

use crate::cli::args::{OutputFormat, SourceArgs};
use crate::config::{ConfigSource, ProcessEnv, Reader};
use crate::error::{JsonTypeError, ReadError};

/// Print the configuration source the loader would select.
///
/// # Errors
///
/// Returns [`ReadError::NotFound`] if no source is present. With `--parse`,
/// also returns read and decode failures for the selected document.
pub fn run(args: &SourceArgs) -> Result<(), JsonTypeError> {
    let reader = Reader::new(ProcessEnv);

    let (source, bytes) = if args.parse {
        let document = reader.resolve()?;
        serde_json::from_slice::<serde_json::Value>(&document.bytes).map_err(|source| {
            ReadError::Decode {
                origin: document.source.clone(),
                source,
            }
        })?;
        (document.source, Some(document.bytes.len()))
    } else {
        let source = reader.locate().ok_or_else(|| ReadError::NotFound {
            searched: reader.providers().iter().map(ToString::to_string).collect(),
        })?;
        (source, None)
    };

    match args.format {
        OutputFormat::Human => match bytes {
            Some(n) => println!("{source} ({n} bytes, valid JSON)"),
            None => println!("{source}"),
        },
        OutputFormat::Json => {
            let (kind, var, path) = match &source {
                ConfigSource::InlineEnv { var } => ("inline_env", Some(var.as_str()), None),
                ConfigSource::PathEnv { var, path } => {
                    ("path_env", Some(var.as_str()), Some(path.display().to_string()))
                }
                ConfigSource::DefaultFile { path } => {
                    ("default_file", None, Some(path.display().to_string()))
                }
            };
            let report = json!({
                "source": source.to_string(),
                "kind": kind,
                "var": var,
                "path": path,
                "bytes": bytes,
            });
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}
