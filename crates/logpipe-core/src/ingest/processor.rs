//! Ingest processors
//!
//! `Processor` is the closed family of steps an ingest pipeline is made of.
//! Serialization is externally tagged, so every processor becomes a
//! single-key object such as `{"set": {...}}`.

use super::processors::*;
use crate::error::{CoreError, Result};
use serde::Serialize;

/// Fields shared by every processor kind, emitted after the kind's own fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Guard expression deciding whether the processor runs
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ignore_failure: bool,

    pub tag: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub on_failure: Vec<Processor>,
}

/// A single ingest processor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    Set(SetProcessor),
    Remove(RemoveProcessor),
    Rename(RenameProcessor),
    Lowercase(CaseProcessor),
    Uppercase(CaseProcessor),
    Grok(GrokProcessor),
    Append(AppendProcessor),
    Gsub(GsubProcessor),
    Join(JoinProcessor),
    Kv(KvProcessor),
    Dissect(DissectProcessor),
    Date(DateProcessor),
    /// Reference to another pipeline; only produced when a branch body is
    /// extracted instead of inlined
    Pipeline(PipelineProcessor),
}

impl Processor {
    /// The JSON key this processor serializes under
    pub fn type_tag(&self) -> &'static str {
        match self {
            Processor::Set(_) => "set",
            Processor::Remove(_) => "remove",
            Processor::Rename(_) => "rename",
            Processor::Lowercase(_) => "lowercase",
            Processor::Uppercase(_) => "uppercase",
            Processor::Grok(_) => "grok",
            Processor::Append(_) => "append",
            Processor::Gsub(_) => "gsub",
            Processor::Join(_) => "join",
            Processor::Kv(_) => "kv",
            Processor::Dissect(_) => "dissect",
            Processor::Date(_) => "date",
            Processor::Pipeline(_) => "pipeline",
        }
    }

    pub fn common(&self) -> &CommonFields {
        match self {
            Processor::Set(p) => &p.common,
            Processor::Remove(p) => &p.common,
            Processor::Rename(p) => &p.common,
            Processor::Lowercase(p) | Processor::Uppercase(p) => &p.common,
            Processor::Grok(p) => &p.common,
            Processor::Append(p) => &p.common,
            Processor::Gsub(p) => &p.common,
            Processor::Join(p) => &p.common,
            Processor::Kv(p) => &p.common,
            Processor::Dissect(p) => &p.common,
            Processor::Date(p) => &p.common,
            Processor::Pipeline(p) => &p.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonFields {
        match self {
            Processor::Set(p) => &mut p.common,
            Processor::Remove(p) => &mut p.common,
            Processor::Rename(p) => &mut p.common,
            Processor::Lowercase(p) | Processor::Uppercase(p) => &mut p.common,
            Processor::Grok(p) => &mut p.common,
            Processor::Append(p) => &mut p.common,
            Processor::Gsub(p) => &mut p.common,
            Processor::Join(p) => &mut p.common,
            Processor::Kv(p) => &mut p.common,
            Processor::Dissect(p) => &mut p.common,
            Processor::Date(p) => &mut p.common,
            Processor::Pipeline(p) => &mut p.common,
        }
    }

    pub fn guard(&self) -> Option<&str> {
        self.common().guard.as_deref()
    }

    pub fn tag(&self) -> &str {
        &self.common().tag
    }

    /// Return a copy of this processor with its guard replaced.
    ///
    /// `self` is left untouched.
    pub fn with_guard(&self, guard: Option<String>) -> Self {
        let mut processor = self.clone();
        processor.common_mut().guard = guard;
        processor
    }

    /// Set the tag (builder style)
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.common_mut().tag = tag.into();
        self
    }

    /// Set the description (builder style)
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.common_mut().description = Some(description.into());
        self
    }

    /// Mark the processor as allowed to fail (builder style)
    pub fn ignoring_failure(mut self) -> Self {
        self.common_mut().ignore_failure = true;
        self
    }

    /// Set the processor-level failure handlers (builder style)
    pub fn with_on_failure(mut self, handlers: Vec<Processor>) -> Self {
        self.common_mut().on_failure = handlers;
        self
    }

    /// Check model invariants that serde cannot express
    pub fn check(&self) -> Result<()> {
        if let Processor::Pipeline(reference) = self {
            if reference.name.is_empty() {
                return Err(CoreError::InvalidProcessor(
                    "pipeline reference without a pipeline name".to_string(),
                ));
            }
            if let Some(ref pipeline) = reference.pipeline {
                if pipeline.name != reference.name {
                    return Err(CoreError::InvalidProcessor(format!(
                        "pipeline reference '{}' owns pipeline '{}'",
                        reference.name, pipeline.name
                    )));
                }
            }
        }
        self.common().on_failure.iter().try_for_each(Processor::check)
    }

    /// Encode as a single-key JSON object
    pub fn to_json(&self) -> Result<String> {
        self.check()?;
        Ok(serde_json::to_string(self)?)
    }
}

macro_rules! impl_from_processor {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Processor {
                fn from(p: $ty) -> Self {
                    Processor::$variant(p)
                }
            }
        )*
    };
}

impl_from_processor!(
    Set(SetProcessor),
    Remove(RemoveProcessor),
    Rename(RenameProcessor),
    Grok(GrokProcessor),
    Append(AppendProcessor),
    Gsub(GsubProcessor),
    Join(JoinProcessor),
    Kv(KvProcessor),
    Dissect(DissectProcessor),
    Date(DateProcessor),
    Pipeline(PipelineProcessor),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Pipeline;

    #[test]
    fn test_set_processor_shape() {
        let processor: Processor = SetProcessor::new("event.kind", "event").into();
        assert_eq!(
            processor.to_json().unwrap(),
            r#"{"set":{"value":"event","field":"event.kind","tag":""}}"#
        );
    }

    #[test]
    fn test_required_fields_emitted_when_empty() {
        let processor: Processor = RemoveProcessor::default().into();
        assert_eq!(
            processor.to_json().unwrap(),
            r#"{"remove":{"field":"","ignore_missing":false,"tag":""}}"#
        );

        let processor: Processor = GsubProcessor::default().into();
        assert_eq!(
            processor.to_json().unwrap(),
            r#"{"gsub":{"replacement":"","tag":""}}"#
        );
    }

    #[test]
    fn test_common_fields_order() {
        let processor = Processor::from(RenameProcessor::new("a", "b"))
            .tagged("rename_1")
            .described("move a")
            .ignoring_failure()
            .with_guard(Some("ctx.a != null".to_string()));

        assert_eq!(
            processor.to_json().unwrap(),
            concat!(
                r#"{"rename":{"field":"a","target_field":"b","ignore_missing":false,"#,
                r#""description":"move a","if":"ctx.a != null","ignore_failure":true,"#,
                r#""tag":"rename_1"}}"#
            )
        );
    }

    #[test]
    fn test_case_processor_tags() {
        let lower = Processor::Lowercase(CaseProcessor::new("message"));
        let upper = Processor::Uppercase(CaseProcessor::new("message"));

        assert_eq!(lower.type_tag(), "lowercase");
        assert_eq!(upper.type_tag(), "uppercase");
        assert!(lower.to_json().unwrap().starts_with(r#"{"lowercase":"#));
        assert!(upper.to_json().unwrap().starts_with(r#"{"uppercase":"#));
    }

    #[test]
    fn test_no_html_escaping() {
        let processor: Processor = GsubProcessor::new("msg", "<[^>]+>", "&amp;").into();
        let processor = processor.with_guard(Some("ctx.a < 1 && ctx.b > 2".to_string()));

        let json = processor.to_json().unwrap();
        assert!(json.contains(r#""pattern":"<[^>]+>""#));
        assert!(json.contains(r#""replacement":"&amp;""#));
        assert!(json.contains(r#""if":"ctx.a < 1 && ctx.b > 2""#));
        assert!(!json.contains("\\u003c"));
    }

    #[test]
    fn test_with_guard_clones() {
        let original: Processor = SetProcessor::new("a", "1").into();
        let guarded = original.with_guard(Some("A".to_string()));

        assert_eq!(original.guard(), None);
        assert_eq!(guarded.guard(), Some("A"));
        assert_eq!(guarded.with_guard(None).guard(), None);
    }

    #[test]
    fn test_grok_pattern_definitions_sorted() {
        let processor: Processor = GrokProcessor::new("message", vec!["%{B:b}".to_string()])
            .with_pattern_definition("ZED", "z+")
            .with_pattern_definition("ALPHA", "a+")
            .into();

        assert_eq!(
            processor.to_json().unwrap(),
            concat!(
                r#"{"grok":{"field":"message","patterns":["%{B:b}"],"#,
                r#""pattern_definitions":{"ALPHA":"a+","ZED":"z+"},"tag":""}}"#
            )
        );
    }

    #[test]
    fn test_nested_on_failure() {
        let handler: Processor = SetProcessor::new("error.message", "failed").into();
        let processor = Processor::from(DateProcessor::new(
            "timestamp",
            vec!["ISO8601".to_string()],
        ))
        .with_on_failure(vec![handler]);

        assert_eq!(
            processor.to_json().unwrap(),
            concat!(
                r#"{"date":{"field":"timestamp","formats":["ISO8601"],"tag":"","#,
                r#""on_failure":[{"set":{"value":"failed","field":"error.message","tag":""}}]}}"#
            )
        );
    }

    #[test]
    fn test_pipeline_reference_hides_owned_pipeline() {
        let mut child = Pipeline::new("main-branch-0-if");
        child.push(SetProcessor::new("a", "1"));

        let processor: Processor = PipelineProcessor::owning(child).into();
        assert_eq!(
            processor.to_json().unwrap(),
            r#"{"pipeline":{"name":"main-branch-0-if","tag":""}}"#
        );
    }

    #[test]
    fn test_pipeline_reference_without_name_is_invalid() {
        let processor: Processor = PipelineProcessor::new("").into();
        let result = processor.to_json();
        assert!(matches!(result, Err(CoreError::InvalidProcessor(_))));
    }

    #[test]
    fn test_type_tags_match_serialized_key() {
        let processors: Vec<Processor> = vec![
            SetProcessor::default().into(),
            RemoveProcessor::default().into(),
            RenameProcessor::default().into(),
            GrokProcessor::default().into(),
            AppendProcessor::default().into(),
            GsubProcessor::default().into(),
            JoinProcessor::default().into(),
            KvProcessor::default().into(),
            DissectProcessor::default().into(),
            DateProcessor::default().into(),
            PipelineProcessor::new("child").into(),
        ];

        for processor in processors {
            let value: serde_json::Value =
                serde_json::from_str(&processor.to_json().unwrap()).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert!(object.contains_key(processor.type_tag()));
            assert_eq!(object[processor.type_tag()]["tag"], "");
        }
    }
}
