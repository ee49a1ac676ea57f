//! Elasticsearch ingest pipeline model
//!
//! The ingest model is the target of compilation from the filter tree.
//! Every processor serializes to a single-key object keyed by its type tag,
//! and every pipeline serializes to one standalone pipeline document.

pub mod pipeline;
pub mod processor;
pub mod processors;

pub use pipeline::{Pipeline, PipelineDocument};
pub use processor::{CommonFields, Processor};
pub use processors::{
    AppendProcessor, CaseProcessor, DateProcessor, DissectProcessor, GrokProcessor,
    GsubProcessor, JoinProcessor, KvProcessor, PipelineProcessor, RemoveProcessor,
    RenameProcessor, SetProcessor,
};
