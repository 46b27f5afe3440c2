use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Need to compare records, got {0}")]
    TypeMismatch(&'static str),

    #[error("Unknown hash algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("Couldn't canonically serialize fields: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Digest is stale; call compute_digest first")]
    StaleDigest,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NodeError>;
