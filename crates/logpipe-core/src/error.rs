//! Error types for logpipe Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// An in-memory model value could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid processor: {0}")]
    InvalidProcessor(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
