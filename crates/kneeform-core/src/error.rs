use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown form: {0}")]
    UnknownForm(String),

    #[error("records document rejected: {0}")]
    Rejected(String),
}
