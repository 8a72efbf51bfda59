use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced while assembling the pod staging directory. All of
/// them are fatal; the staging directory may be left partially populated.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// A required input path does not exist or could not be read.
    #[error("path not found: {path}")]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON document is malformed or missing a required field.
    #[error("failed to parse {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required key is absent from the framework info document.
    #[error("missing key '{key}' in {path}")]
    MissingKey { path: PathBuf, key: String },

    /// The package variant is not one of the supported names.
    #[error("unhandled package variant: {0} (supported: Full, Training)")]
    InvalidVariant(String),

    /// The template's variable set and the substitution key set differ.
    #[error("template file variables and substitution variables do not match \
             (only in template file: {only_in_template:?}, \
             only in substitutions: {only_in_substitutions:?})")]
    TemplateMismatch {
        only_in_template: Vec<String>,
        only_in_substitutions: Vec<String>,
    },

    /// A filesystem operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AssembleError>;
