use std::path::PathBuf;
use thiserror::Error;

use crate::coerce::CoerceError;
use crate::decode::DecodeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file at {path} does not exist")]
    NotFound { path: PathBuf },

    #[error("error reading config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse file at {path}: {source}")]
    Decode { path: PathBuf, source: DecodeError },

    #[error("error loading config vars from {path}: {source}")]
    Options { path: PathBuf, source: WalkError },

    #[error("duplicate config option {option}")]
    DuplicateOption { option: String },
}

/// Failures raised while walking the option tree against a decoded mapping.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("value of type {found} given for composite config var {option}")]
    NotAMapping {
        option: String,
        found: &'static str,
    },

    #[error("invalid value for config var {option}: {source}")]
    Coerce { option: String, source: CoerceError },

    #[error("unknown config keys: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),
}
