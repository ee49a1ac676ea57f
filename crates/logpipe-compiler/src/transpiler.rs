//! Main transpiler
//!
//! Provides a single entry point turning one filter block into the root
//! ingest pipeline and the pipelines extracted from it.

use crate::config::TranspileOptions;
use crate::constraint::Constraints;
use crate::error::Result;
use crate::guard::{ExpressionRenderer, GuardRenderer};
use crate::plugin::PluginTranslator;
use crate::walker::Walker;
use logpipe_core::ast::Node;
use logpipe_core::ingest::{Pipeline, PipelineDocument};

/// Filter block to ingest pipeline transpiler
pub struct Transpiler<T, R = ExpressionRenderer>
where
    T: PluginTranslator,
    R: GuardRenderer,
{
    options: TranspileOptions,
    translator: T,
    renderer: R,
}

impl<T: PluginTranslator> Transpiler<T> {
    /// Create a transpiler using the default guard renderer
    pub fn new(options: TranspileOptions, translator: T) -> Self {
        Self::with_renderer(options, translator, ExpressionRenderer)
    }
}

impl<T, R> Transpiler<T, R>
where
    T: PluginTranslator,
    R: GuardRenderer,
{
    /// Create a transpiler with a custom guard renderer
    pub fn with_renderer(options: TranspileOptions, translator: T, renderer: R) -> Self {
        Self {
            options,
            translator,
            renderer,
        }
    }

    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut T {
        &mut self.translator
    }

    /// Transpile a filter block into its root pipeline.
    ///
    /// Extracted branch bodies are owned by the pipeline processors that
    /// reference them; see [`Pipeline::documents`].
    #[tracing::instrument(skip_all, fields(root = %self.options.root_name, nodes = nodes.len()))]
    pub fn transpile(&mut self, mut nodes: Vec<Node>) -> Result<Pipeline> {
        self.options.validate()?;

        let mut root = Pipeline::new(self.options.root_name.clone())
            .with_description(self.options.description.clone());

        Walker::new(
            &mut self.translator,
            &self.renderer,
            self.options.threshold,
            self.options.max_depth,
        )
        .walk(&mut nodes, &Constraints::literal(), &mut root)?;

        tracing::debug!(
            processors = root.len(),
            extracted = root.referenced_pipelines().len(),
            "transpiled filter block"
        );
        Ok(root)
    }

    /// Transpile a filter block and serialize every resulting pipeline,
    /// root first
    pub fn transpile_documents(&mut self, nodes: Vec<Node>) -> Result<Vec<PipelineDocument>> {
        let root = self.transpile(nodes)?;
        Ok(root.documents()?)
    }
}
