//! Constraint accumulation
//!
//! A `Constraints` value is the ordered conjunction of conditions inherited
//! along one path through an if / else-if / else chain. Extending it always
//! produces a new value, so sibling clauses never see each other's
//! conditions.

use logpipe_core::ast::Condition;

/// Ordered conjunction of conditions plus the "otherwise" flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    otherwise: bool,
    conditions: Vec<Condition>,
}

impl Constraints {
    /// Empty constraints: no conditions, not an otherwise path
    pub fn literal() -> Self {
        Self::default()
    }

    /// Return a new value with `condition` appended.
    ///
    /// `otherwise` marks constraints that end in a negated fallback
    /// (else-if and else clauses). `self` is left untouched.
    pub fn add(&self, otherwise: bool, condition: Condition) -> Self {
        let mut conditions = Vec::with_capacity(self.conditions.len() + 1);
        conditions.extend(self.conditions.iter().cloned());
        conditions.push(condition);
        Self {
            otherwise,
            conditions,
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_otherwise(&self) -> bool {
        self.otherwise
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(text: &str) -> Condition {
        Condition::expression(text)
    }

    #[test]
    fn test_literal_is_empty() {
        let c = Constraints::literal();
        assert!(c.is_empty());
        assert!(!c.is_otherwise());
    }

    #[test]
    fn test_add_appends_in_order() {
        let c = Constraints::literal()
            .add(false, cond("A"))
            .add(true, cond("B"));

        assert_eq!(c.conditions(), &[cond("A"), cond("B")]);
        assert!(c.is_otherwise());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_add_does_not_alias_siblings() {
        let base = Constraints::literal().add(false, cond("A"));

        let left = base.add(false, cond("B"));
        let right = base.add(true, cond("C"));

        assert_eq!(base.conditions(), &[cond("A")]);
        assert_eq!(left.conditions(), &[cond("A"), cond("B")]);
        assert_eq!(right.conditions(), &[cond("A"), cond("C")]);
    }
}
