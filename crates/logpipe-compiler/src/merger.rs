//! Pipeline merging
//!
//! Folds the temporary pipeline built for one branch clause into its parent.
//! Small bodies are inlined, each processor carrying the clause guard; large
//! bodies are extracted into their own pipeline and called through a single
//! guarded `pipeline` processor.

use crate::constraint::Constraints;
use crate::guard::GuardRenderer;
use logpipe_core::ingest::{Pipeline, PipelineProcessor, Processor};

/// What a merge did with a branch body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The body was empty; nothing was added
    Empty,
    /// The body's processors were copied into the destination
    Inlined(usize),
    /// A single pipeline reference was added
    Extracted,
}

/// Merge `branch` into `destination` under the guard rendered from `guard`.
///
/// Bodies with fewer than `threshold` processors are inlined. Only the
/// body's immediate processor list counts towards the threshold.
pub fn merge<R>(
    destination: &mut Pipeline,
    branch: Pipeline,
    guard: &Constraints,
    threshold: usize,
    renderer: &R,
) -> MergeOutcome
where
    R: GuardRenderer + ?Sized,
{
    if branch.is_empty() {
        tracing::trace!(pipeline = %branch.name, "empty branch body, nothing to merge");
        return MergeOutcome::Empty;
    }

    let rendered = renderer.render(guard);

    if branch.len() < threshold {
        let count = branch.len();
        tracing::debug!(
            pipeline = %branch.name,
            processors = count,
            threshold,
            "inlining branch body"
        );
        destination
            .processors
            .extend(branch.processors.into_iter().map(|mut processor| {
                let common = processor.common_mut();
                common.guard = renderer.combine(rendered.clone(), common.guard.take());
                processor
            }));
        MergeOutcome::Inlined(count)
    } else {
        tracing::debug!(
            pipeline = %branch.name,
            processors = branch.len(),
            threshold,
            "extracting branch body into its own pipeline"
        );
        let mut reference = Processor::from(PipelineProcessor::owning(branch));
        reference.common_mut().guard = rendered;
        destination.processors.push(reference);
        MergeOutcome::Extracted
    }
}
