//! Condition AST nodes
//!
//! A condition is opaque to the compiler. It is only ever composed: negated
//! here, and AND-ed by collecting conditions into a constraint list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean condition guarding a branch clause
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Expression text as produced by the upstream parser
    Expression(String),

    /// Logical negation
    Not(Box<Condition>),
}

impl Condition {
    /// Create an expression condition
    pub fn expression(text: impl Into<String>) -> Self {
        Condition::Expression(text.into())
    }

    /// Wrap this condition in a negation.
    ///
    /// Double negations are kept as-is; simplifying them would require
    /// looking inside the expression.
    pub fn negate(&self) -> Self {
        Condition::Not(Box::new(self.clone()))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Expression(text) => write!(f, "{}", text),
            Condition::Not(inner) => write!(f, "!({})", inner),
        }
    }
}
