//! Compiler error types

use thiserror::Error;

/// Compiler error
///
/// Every variant aborts the transpilation of the whole filter block.
#[derive(Error, Debug)]
pub enum TranspileError {
    /// A cursor mutation was attempted while the cursor is not bound to an
    /// element of its sequence
    #[error("Cursor is not bound to a node (index {index}, length {len})")]
    CursorUnbound { index: usize, len: usize },

    /// Branch nesting exceeds the configured limit
    #[error("Branch nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },

    /// The plugin translator failed
    #[error("Plugin translation failed: {0}")]
    Plugin(#[source] anyhow::Error),

    /// Model error (serialization or processor invariant)
    #[error(transparent)]
    Core(#[from] logpipe_core::CoreError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, TranspileError>;
