//! Conditional tree walker
//!
//! Recursive descent over the filter tree. Plugins are handed to the plugin
//! translator; every branch clause body is walked into a fresh temporary
//! pipeline which is then merged into the parent under the clause guard:
//!
//! - if:          inherited ∧ C_if
//! - else-if i:   inherited ∧ ¬C_if ∧ ¬C_0 ∧ … ∧ ¬C_{i-1} ∧ C_i
//! - else:        inherited ∧ ¬C_if ∧ ¬C_0 ∧ … ∧ ¬C_{n-1}
//!
//! Clause bodies are walked unconstrained; constraints only apply when the
//! body is merged.

use crate::constraint::Constraints;
use crate::cursor::Cursor;
use crate::error::{Result, TranspileError};
use crate::guard::GuardRenderer;
use crate::merger::merge;
use crate::plugin::PluginTranslator;
use logpipe_core::ast::{Branch, Node};
use logpipe_core::ingest::Pipeline;

/// Walks a filter tree into an ingest pipeline
pub struct Walker<'a, T, R>
where
    T: PluginTranslator + ?Sized,
    R: GuardRenderer + ?Sized,
{
    translator: &'a mut T,
    renderer: &'a R,
    threshold: usize,
    max_depth: usize,
}

impl<'a, T, R> Walker<'a, T, R>
where
    T: PluginTranslator + ?Sized,
    R: GuardRenderer + ?Sized,
{
    pub fn new(translator: &'a mut T, renderer: &'a R, threshold: usize, max_depth: usize) -> Self {
        Self {
            translator,
            renderer,
            threshold,
            max_depth,
        }
    }

    /// Walk `nodes`, appending the resulting processors to `output`.
    ///
    /// `nodes` may be rewritten by the plugin translator through the cursor.
    pub fn walk(
        &mut self,
        nodes: &mut Vec<Node>,
        constraints: &Constraints,
        output: &mut Pipeline,
    ) -> Result<()> {
        self.walk_level(nodes, constraints, output, 0)
    }

    fn walk_level(
        &mut self,
        nodes: &mut Vec<Node>,
        constraints: &Constraints,
        output: &mut Pipeline,
        depth: usize,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(TranspileError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let mut index = 0;
        while index < nodes.len() {
            if let Node::Branch(branch) = &mut nodes[index] {
                tracing::trace!(pipeline = %output.name, index, "visiting branch");
                self.walk_branch(branch, index, constraints, output, depth)?;
                index += 1;
                continue;
            }

            tracing::trace!(pipeline = %output.name, index, "visiting plugin");
            let mut cursor = Cursor::new(nodes, index);
            self.translator.translate(&mut cursor, constraints, output)?;
            index = cursor.next_index();
        }

        Ok(())
    }

    fn walk_branch(
        &mut self,
        branch: &mut Branch,
        index: usize,
        constraints: &Constraints,
        output: &mut Pipeline,
        depth: usize,
    ) -> Result<()> {
        let prefix = format!("{}-branch-{}", output.name, index);
        tracing::debug!(
            pipeline = %output.name,
            index,
            else_ifs = branch.else_if_clauses.len(),
            "expanding branch"
        );

        // if
        let guard = constraints.add(false, branch.if_clause.condition.clone());
        let body = self.walk_body(&mut branch.if_clause.body, format!("{}-if", prefix), depth)?;
        merge(output, body, &guard, self.threshold, self.renderer);

        // else if
        let mut guard = constraints.add(true, branch.if_clause.condition.negate());
        for (i, clause) in branch.else_if_clauses.iter_mut().enumerate() {
            let body = self.walk_body(&mut clause.body, format!("{}-elseif-{}", prefix, i), depth)?;
            merge(
                output,
                body,
                &guard.add(true, clause.condition.clone()),
                self.threshold,
                self.renderer,
            );
            guard = guard.add(true, clause.condition.negate());
        }

        // else
        let body = self.walk_body(&mut branch.else_body, format!("{}-else", prefix), depth)?;
        merge(output, body, &guard, self.threshold, self.renderer);

        Ok(())
    }

    fn walk_body(&mut self, nodes: &mut Vec<Node>, name: String, depth: usize) -> Result<Pipeline> {
        let mut body = Pipeline::new(name);
        self.walk_level(nodes, &Constraints::literal(), &mut body, depth + 1)?;
        Ok(body)
    }
}
