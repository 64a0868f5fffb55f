use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed duration {raw:?}: {reason}")]
    MalformedDuration { raw: String, reason: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::MalformedDocument(e.to_string())
    }
}

impl From<serde_yaml::Error> for ModelError {
    fn from(e: serde_yaml::Error) -> Self {
        ModelError::MalformedDocument(e.to_string())
    }
}
