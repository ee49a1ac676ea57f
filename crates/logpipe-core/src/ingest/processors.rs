//! Processor definitions
//!
//! One struct per ingest processor kind. Fields are declared in the order
//! they are emitted. Optional fields are skipped at their zero value;
//! required fields are always emitted, even when empty.

use super::pipeline::Pipeline;
use super::processor::CommonFields;
use serde::Serialize;
use std::collections::BTreeMap;

fn is_false(b: &bool) -> bool {
    !*b
}

/// `set` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub copy_from: String,
    #[serde(skip_serializing_if = "is_false")]
    pub r#override: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_empty_value: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl SetProcessor {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Copy another field instead of setting a literal value
    pub fn copy(field: impl Into<String>, copy_from: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            copy_from: copy_from.into(),
            ..Default::default()
        }
    }
}

/// `remove` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoveProcessor {
    pub field: String,
    pub ignore_missing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl RemoveProcessor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }
}

/// `rename` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenameProcessor {
    pub field: String,
    pub target_field: String,
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl RenameProcessor {
    pub fn new(field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            target_field: target_field.into(),
            ..Default::default()
        }
    }
}

/// Shared body of the `lowercase` and `uppercase` processors.
///
/// Which of the two it is lives in the `Processor` variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseProcessor {
    pub field: String,
    pub target_field: String,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl CaseProcessor {
    /// Convert `field` in place
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            target_field: field.clone(),
            field,
            ..Default::default()
        }
    }
}

/// `grok` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrokProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_definitions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ecs_compatibility: String,
    #[serde(skip_serializing_if = "is_false")]
    pub trace_match: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl GrokProcessor {
    pub fn new(field: impl Into<String>, patterns: Vec<String>) -> Self {
        Self {
            field: field.into(),
            patterns,
            ..Default::default()
        }
    }

    /// Register a custom pattern definition
    pub fn with_pattern_definition(
        mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        self.pattern_definitions.insert(name.into(), pattern.into());
        self
    }
}

/// `append` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppendProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub allow_duplicates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl AppendProcessor {
    pub fn new(field: impl Into<String>, value: Vec<String>) -> Self {
        Self {
            field: field.into(),
            value,
            ..Default::default()
        }
    }
}

/// `gsub` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GsubProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    pub replacement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl GsubProcessor {
    pub fn new(
        field: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
            ..Default::default()
        }
    }
}

/// `join` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub separator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl JoinProcessor {
    pub fn new(field: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            separator: separator.into(),
            ..Default::default()
        }
    }
}

/// `kv` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KvProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field_split: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_split: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_keys: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_value: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub strip_brackets: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl KvProcessor {
    pub fn new(
        field: impl Into<String>,
        field_split: impl Into<String>,
        value_split: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            field_split: field_split.into(),
            value_split: value_split.into(),
            ..Default::default()
        }
    }
}

/// `dissect` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DissectProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_separator: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl DissectProcessor {
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.into(),
            ..Default::default()
        }
    }
}

/// `date` processor
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateProcessor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    /// Elasticsearch defaults to `@timestamp`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl DateProcessor {
    pub fn new(field: impl Into<String>, formats: Vec<String>) -> Self {
        Self {
            field: field.into(),
            formats,
            ..Default::default()
        }
    }
}

/// `pipeline` processor: hands the document over to another pipeline.
///
/// The referenced pipeline is owned here so it can be emitted as its own
/// document, but it is never serialized inside the referencing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineProcessor {
    pub name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_missing_pipeline: bool,
    #[serde(skip)]
    pub pipeline: Option<Box<Pipeline>>,
    #[serde(flatten)]
    pub common: CommonFields,
}

impl PipelineProcessor {
    /// Reference a pipeline defined elsewhere
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reference `pipeline` and take ownership of it
    pub fn owning(pipeline: Pipeline) -> Self {
        Self {
            name: pipeline.name.clone(),
            pipeline: Some(Box::new(pipeline)),
            ..Default::default()
        }
    }
}
