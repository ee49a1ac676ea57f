//! Ingest pipelines
//!
//! A pipeline is a named, ordered list of processors with an optional
//! pipeline-level failure handler list. The name is not part of the
//! document; Elasticsearch stores pipelines under their id.

use super::processor::Processor;
use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

/// An ingest pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    /// Pipeline id; child pipelines derive theirs from the parent's
    pub name: String,

    pub description: String,

    /// The processing steps, in execution order
    pub processors: Vec<Processor>,

    /// Pipeline-level failure handlers. `None` omits the key entirely.
    pub on_failure: Option<Vec<Processor>>,
}

/// One serialized pipeline, ready to be stored under `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDocument {
    pub name: String,
    pub json: String,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description (builder style)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the pipeline-level failure handlers (builder style)
    pub fn with_on_failure(mut self, handlers: Vec<Processor>) -> Self {
        self.on_failure = Some(handlers);
        self
    }

    /// Append a processor
    pub fn push(&mut self, processor: impl Into<Processor>) {
        self.processors.push(processor.into());
    }

    /// Get the number of processors
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Check if the pipeline has no processors
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Encode this pipeline as a standalone document.
    ///
    /// The output ends with a newline so documents can be concatenated.
    pub fn to_json(&self) -> Result<String> {
        self.check()?;

        let mut json = serde_json::to_string(self)?;
        json.push('\n');
        Ok(json)
    }

    fn check(&self) -> Result<()> {
        self.processors.iter().try_for_each(Processor::check)?;
        if let Some(ref handlers) = self.on_failure {
            handlers.iter().try_for_each(Processor::check)?;
        }
        Ok(())
    }

    /// Every pipeline referenced from this one, directly or transitively,
    /// in depth-first pre-order (this pipeline excluded)
    pub fn referenced_pipelines(&self) -> Vec<&Pipeline> {
        let mut found = Vec::new();
        collect_referenced(&self.processors, &mut found);
        if let Some(ref handlers) = self.on_failure {
            collect_referenced(handlers, &mut found);
        }
        found
    }

    /// Serialize this pipeline and every pipeline it references.
    ///
    /// This pipeline comes first, followed by the referenced pipelines in
    /// the order their references appear.
    pub fn documents(&self) -> Result<Vec<PipelineDocument>> {
        let mut seen = HashSet::new();
        let mut documents = Vec::new();

        for pipeline in std::iter::once(self).chain(self.referenced_pipelines()) {
            if !seen.insert(pipeline.name.as_str()) {
                log::warn!("pipeline '{}' is emitted more than once", pipeline.name);
            }
            documents.push(PipelineDocument {
                name: pipeline.name.clone(),
                json: pipeline.to_json()?,
            });
        }

        Ok(documents)
    }
}

fn collect_referenced<'a>(processors: &'a [Processor], found: &mut Vec<&'a Pipeline>) {
    for processor in processors {
        if let Processor::Pipeline(reference) = processor {
            if let Some(ref pipeline) = reference.pipeline {
                found.push(pipeline);
                collect_referenced(&pipeline.processors, found);
                if let Some(ref handlers) = pipeline.on_failure {
                    collect_referenced(handlers, found);
                }
            }
        }
        collect_referenced(&processor.common().on_failure, found);
    }
}

impl Serialize for Pipeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.on_failure.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("processors", &self.processors)?;
        if let Some(ref handlers) = self.on_failure {
            map.serialize_entry("on_failure", handlers)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{PipelineProcessor, RemoveProcessor, SetProcessor};

    #[test]
    fn test_empty_pipeline_document() {
        let pipeline = Pipeline::new("main");
        assert_eq!(
            pipeline.to_json().unwrap(),
            "{\"description\":\"\",\"processors\":[]}\n"
        );
    }

    #[test]
    fn test_on_failure_emitted_when_present() {
        let pipeline = Pipeline::new("main")
            .with_description("converted")
            .with_on_failure(Vec::new());
        assert_eq!(
            pipeline.to_json().unwrap(),
            "{\"description\":\"converted\",\"processors\":[],\"on_failure\":[]}\n"
        );
    }

    #[test]
    fn test_push_and_len() {
        let mut pipeline = Pipeline::new("main");
        assert!(pipeline.is_empty());

        pipeline.push(SetProcessor::new("a", "1"));
        pipeline.push(RemoveProcessor::new("b"));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.processors[1].type_tag(), "remove");
    }

    #[test]
    fn test_documents_preorder() {
        let mut grandchild = Pipeline::new("main-branch-0-if-branch-0-if");
        grandchild.push(SetProcessor::new("c", "3"));

        let mut child = Pipeline::new("main-branch-0-if");
        child.push(PipelineProcessor::owning(grandchild));

        let mut sibling = Pipeline::new("main-branch-0-else");
        sibling.push(SetProcessor::new("d", "4"));

        let mut root = Pipeline::new("main");
        root.push(PipelineProcessor::owning(child));
        root.push(PipelineProcessor::owning(sibling));

        let names: Vec<String> = root
            .documents()
            .unwrap()
            .into_iter()
            .map(|doc| doc.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "main",
                "main-branch-0-if",
                "main-branch-0-if-branch-0-if",
                "main-branch-0-else",
            ]
        );
    }

    #[test]
    fn test_reference_without_owned_pipeline_yields_single_document() {
        let mut root = Pipeline::new("main");
        root.push(PipelineProcessor::new("shared-geoip"));

        let documents = root.documents().unwrap();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].json.contains(r#"{"pipeline":{"name":"shared-geoip","tag":""}}"#));
    }
}
