//! Transpiler configuration

use crate::error::{Result, TranspileError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides (e.g. `LOGPIPE_THRESHOLD=20`)
pub const ENV_PREFIX: &str = "LOGPIPE";

/// Transpiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileOptions {
    /// Branch bodies with at least this many processors are extracted into
    /// their own pipeline instead of being inlined
    pub threshold: usize,

    /// Maximum branch nesting depth
    pub max_depth: usize,

    /// Name of the root pipeline; child pipeline names derive from it
    pub root_name: String,

    /// Description of the root pipeline
    pub description: String,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            threshold: 100,
            max_depth: 64,
            root_name: "main".to_string(),
            description: String::new(),
        }
    }
}

impl TranspileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inline/extract threshold
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the maximum branch nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the root pipeline name
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    /// Set the root pipeline description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parse options from a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let options: Self = serde_yaml::from_str(content)
            .map_err(|e| TranspileError::Config(format!("invalid options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a file, then apply `LOGPIPE_*` environment overrides.
    ///
    /// The file format is picked from its extension (yaml, toml, json).
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| {
                TranspileError::Config(format!("failed to read {}: {}", path.display(), e))
            })?;

        let options: Self = settings
            .try_deserialize()
            .map_err(|e| TranspileError::Config(format!("failed to deserialize options: {}", e)))?;
        options.validate()?;

        tracing::debug!(?options, path = %path.display(), "loaded transpile options");
        Ok(options)
    }

    /// Check option values
    pub fn validate(&self) -> Result<()> {
        if self.root_name.is_empty() {
            return Err(TranspileError::Config(
                "root_name must not be empty".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(TranspileError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
