//! Guard rendering
//!
//! Turning a `Constraints` value into the `if` string of a processor is left
//! to a `GuardRenderer`. The compiler only guarantees that the constraints it
//! hands over are correctly ordered and negated.

use crate::constraint::Constraints;
use logpipe_core::ast::Condition;

/// Renders constraints into processor guard strings
pub trait GuardRenderer {
    /// Render a conjunction of conditions; `None` means "always run"
    fn render(&self, constraints: &Constraints) -> Option<String>;

    /// Conjoin an outer guard with the guard a processor already carries.
    ///
    /// Used when a branch body is inlined: processors produced by nested
    /// branches inside the body keep their own guard under the outer one.
    fn combine(&self, outer: Option<String>, inner: Option<String>) -> Option<String> {
        match (outer, inner) {
            (Some(outer), Some(inner)) => Some(format!("({}) && ({})", outer, inner)),
            (outer, None) => outer,
            (None, inner) => inner,
        }
    }
}

/// Default renderer: condition text joined with `&&`, negations as `!(...)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionRenderer;

impl ExpressionRenderer {
    fn render_condition(condition: &Condition) -> String {
        match condition {
            Condition::Expression(text) => text.clone(),
            Condition::Not(inner) => format!("!({})", Self::render_condition(inner)),
        }
    }
}

impl GuardRenderer for ExpressionRenderer {
    fn render(&self, constraints: &Constraints) -> Option<String> {
        match constraints.conditions() {
            [] => None,
            [single] => Some(Self::render_condition(single)),
            many => Some(
                many.iter()
                    .map(|c| format!("({})", Self::render_condition(c)))
                    .collect::<Vec<_>>()
                    .join(" && "),
            ),
        }
    }
}

impl<F> GuardRenderer for F
where
    F: Fn(&Constraints) -> Option<String>,
{
    fn render(&self, constraints: &Constraints) -> Option<String> {
        self(constraints)
    }
}
