//! logpipe Compiler - filter tree to ingest pipeline compiler
//!
//! This crate walks a Logstash filter tree and compiles it into Elasticsearch
//! ingest pipelines. Branches have no native counterpart in an ingest
//! pipeline, so every processor carries its own fully expanded guard.

pub mod config;
pub mod constraint;
pub mod cursor;
pub mod error;
pub mod guard;
pub mod merger;
pub mod plugin;
pub mod transpiler;
pub mod walker;

// Re-export main types
pub use config::TranspileOptions;
pub use constraint::Constraints;
pub use cursor::Cursor;
pub use error::{Result, TranspileError};
pub use guard::{ExpressionRenderer, GuardRenderer};
pub use merger::{merge, MergeOutcome};
pub use plugin::PluginTranslator;
pub use transpiler::Transpiler;
pub use walker::Walker;
