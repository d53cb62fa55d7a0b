//! Decoders: raw file bytes in, generic [`Mapping`] out.
//!
//! Built-in decoders cover JSON, TOML and YAML. [`TryAll`] runs a list of
//! decoders in order and returns the first success. Callers may supply any
//! other [`Decoder`] implementation.
//!
//! [`select_decoder`] picks what to use for a file: an explicit decoder when
//! one is configured, otherwise the built-in matching the file extension,
//! otherwise [`TryAll`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::value::{Mapping, Value};

/// Why a byte payload could not be decoded into a mapping.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("expected a mapping at the document root, found {found}")]
    RootNotMapping { found: &'static str },

    #[error("no decoder accepted the input ({})", format_attempts(.0))]
    NoneMatched(Vec<(String, DecodeError)>),

    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

fn format_attempts(attempts: &[(String, DecodeError)]) -> String {
    attempts
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Something that turns raw bytes into a generic mapping.
pub trait Decoder: Send + Sync {
    /// Short label used in logs and aggregated errors.
    fn name(&self) -> &str;

    fn decode(&self, bytes: &[u8]) -> Result<Mapping, DecodeError>;
}

impl fmt::Debug for dyn Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decoder({})", self.name())
    }
}

fn into_mapping(value: Value) -> Result<Mapping, DecodeError> {
    match value {
        Value::Mapping(m) => Ok(m),
        other => Err(DecodeError::RootNotMapping {
            found: other.type_name(),
        }),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Decoder for Json {
    fn name(&self) -> &str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Mapping, DecodeError> {
        into_mapping(serde_json::from_slice(bytes)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Toml;

impl Decoder for Toml {
    fn name(&self) -> &str {
        "toml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Mapping, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Decoder for Yaml {
    fn name(&self) -> &str {
        "yaml"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Mapping, DecodeError> {
        let mut raw: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
        raw.apply_merge()?;
        let value: Value = serde_yaml::from_value(raw)?;
        match value {
            Value::Null => Ok(Mapping::new()),
            other => into_mapping(other),
        }
    }
}

/// Try each decoder in turn; the first success wins.
pub struct TryAll {
    decoders: Vec<Box<dyn Decoder>>,
}

impl TryAll {
    pub fn new(decoders: Vec<Box<dyn Decoder>>) -> Self {
        Self { decoders }
    }
}

impl Default for TryAll {
    /// JSON, then TOML, then YAML.
    fn default() -> Self {
        Self::new(vec![Box::new(Json), Box::new(Toml), Box::new(Yaml)])
    }
}

impl fmt::Debug for TryAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.decoders.iter().map(|d| d.name()))
            .finish()
    }
}

impl Decoder for TryAll {
    fn name(&self) -> &str {
        "any"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Mapping, DecodeError> {
        let mut attempts = Vec::with_capacity(self.decoders.len());
        for decoder in &self.decoders {
            match decoder.decode(bytes) {
                Ok(mapping) => {
                    debug!(decoder = decoder.name(), "decoded by fallback");
                    return Ok(mapping);
                }
                Err(e) => {
                    debug!(decoder = decoder.name(), error = %e, "fallback decoder rejected input");
                    attempts.push((decoder.name().to_string(), e));
                }
            }
        }
        Err(DecodeError::NoneMatched(attempts))
    }
}

/// Built-in encodings recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Exact, case-sensitive match: `json`, `toml`, `yaml`, `yml`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn decoder(self) -> Arc<dyn Decoder> {
        match self {
            Format::Json => Arc::new(Json),
            Format::Toml => Arc::new(Toml),
            Format::Yaml => Arc::new(Yaml),
        }
    }
}

/// Pick the decoder for `path`.
///
/// An explicit decoder always wins and the extension is never looked at.
/// Otherwise the extension picks a built-in, falling back to [`TryAll`].
pub fn select_decoder(explicit: Option<&Arc<dyn Decoder>>, path: &Path) -> Arc<dyn Decoder> {
    if let Some(decoder) = explicit {
        debug!(decoder = decoder.name(), "using configured decoder");
        return Arc::clone(decoder);
    }
    match Format::from_path(path) {
        Some(format) => {
            debug!(?format, path = %path.display(), "decoder chosen by extension");
            format.decoder()
        }
        None => {
            debug!(path = %path.display(), "unrecognized extension, trying all decoders");
            Arc::new(TryAll::default())
        }
    }
}
