//! logpipe Core - Core types for the logpipe transpiler
//!
//! This crate provides the fundamental types shared by the logpipe crates:
//! - AST (filter tree) definitions handed over by the configuration parser
//! - Ingest model (processors and pipelines) emitted by the compiler
//! - Attribute value types
//! - Error types

pub mod ast;
pub mod error;
pub mod ingest;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use ingest::{Pipeline, PipelineDocument, Processor};
pub use types::Value;
