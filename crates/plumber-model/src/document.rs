//! Decoding and encoding of whole schema documents.
//!
//! Any record of the model can be read from JSON or YAML. Output is always
//! JSON, with durations in their canonical string form.

use std::{fmt, path::Path, str::FromStr};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ModelError, ModelResult};

/// Source format of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension; unknown extensions read as YAML,
    /// which also accepts JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, input: &str) -> ModelResult<T> {
        match self {
            DocumentFormat::Json => from_json(input),
            DocumentFormat::Yaml => from_yaml(input),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(ModelError::Invalid(format!("unknown document format: {other}"))),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        })
    }
}

pub fn from_json<T: DeserializeOwned>(input: &str) -> ModelResult<T> {
    Ok(serde_json::from_str(input)?)
}

pub fn from_yaml<T: DeserializeOwned>(input: &str) -> ModelResult<T> {
    Ok(serde_yaml::from_str(input)?)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> ModelResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
