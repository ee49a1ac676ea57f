//! Cursor over one nesting level of the filter tree
//!
//! The walker hands a `Cursor` to the plugin translator for every plugin it
//! visits. The cursor is the only way the translator may change the sequence
//! being walked; the walker reads the next index back from it afterwards.

use crate::error::{Result, TranspileError};
use logpipe_core::ast::{Node, Plugin};

/// Position in a node sequence plus the pending advance for the walk
///
/// `step` counts the nodes from `index` that the walk has already handled:
/// the current node itself and anything inserted after it.
#[derive(Debug)]
pub struct Cursor<'a> {
    nodes: &'a mut Vec<Node>,
    index: usize,
    step: usize,
    removed: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(nodes: &'a mut Vec<Node>, index: usize) -> Self {
        Self {
            nodes,
            index,
            step: 1,
            removed: false,
        }
    }

    /// The plugin at the current position, `None` for any other node kind
    pub fn current(&self) -> Option<&Plugin> {
        self.nodes.get(self.index).and_then(Node::as_plugin)
    }

    /// Index of the current position in the sequence
    pub fn index(&self) -> usize {
        self.index
    }

    fn unbound(&self) -> TranspileError {
        TranspileError::CursorUnbound {
            index: self.index,
            len: self.nodes.len(),
        }
    }

    fn ensure_bound(&self) -> Result<()> {
        if self.index >= self.nodes.len() {
            return Err(self.unbound());
        }
        Ok(())
    }

    /// Inserting is allowed at the end once the current node was deleted
    fn ensure_insertable(&self) -> Result<()> {
        if self.removed && self.index <= self.nodes.len() {
            return Ok(());
        }
        self.ensure_bound()
    }

    /// Remove the current node.
    ///
    /// The node that slides into the current position is visited next,
    /// unless it was inserted after the current node during this call.
    pub fn delete(&mut self) -> Result<Node> {
        self.ensure_bound()?;
        let removed = self.nodes.remove(self.index);
        self.step = self.step.saturating_sub(1);
        self.removed = true;
        Ok(removed)
    }

    /// Replace the current node. The replacement is not visited.
    pub fn replace(&mut self, node: Node) -> Result<Node> {
        self.ensure_bound()?;
        let replaced = std::mem::replace(&mut self.nodes[self.index], node);
        self.step = self.step.max(1);
        self.removed = false;
        Ok(replaced)
    }

    /// Insert a node before the current one. The new node is not visited.
    pub fn insert_before(&mut self, node: Node) -> Result<()> {
        self.ensure_insertable()?;
        self.nodes.insert(self.index, node);
        // keep pointing at the same node
        self.index += 1;
        Ok(())
    }

    /// Insert a node right after the current one. The new node is not visited.
    pub fn insert_after(&mut self, node: Node) -> Result<()> {
        self.ensure_insertable()?;
        if self.removed {
            // the deleted node's slot holds whatever comes next
            self.nodes.insert(self.index, node);
            self.index += 1;
        } else {
            self.nodes.insert(self.index + 1, node);
            self.step += 1;
        }
        Ok(())
    }

    /// Index the walk continues from
    pub(crate) fn next_index(&self) -> usize {
        self.index + self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes
            .iter()
            .map(|n| n.as_plugin().map(|p| p.name.as_str()).unwrap_or("-"))
            .collect()
    }

    #[test]
    fn test_current() {
        let mut nodes = vec![Node::plugin("a"), Node::Empty];

        let cursor = Cursor::new(&mut nodes, 0);
        assert_eq!(cursor.current().map(|p| p.name.as_str()), Some("a"));

        let cursor = Cursor::new(&mut nodes, 1);
        assert!(cursor.current().is_none());

        let cursor = Cursor::new(&mut nodes, 5);
        assert!(cursor.current().is_none());
    }

    #[test]
    fn test_delete_does_not_skip_next() {
        let mut nodes = vec![Node::plugin("a"), Node::plugin("b")];
        let mut cursor = Cursor::new(&mut nodes, 0);

        let removed = cursor.delete().unwrap();
        assert_eq!(removed, Node::plugin("a"));
        assert_eq!(cursor.next_index(), 0);
        assert_eq!(cursor.current().map(|p| p.name.as_str()), Some("b"));
    }

    #[test]
    fn test_delete_unbound_fails() {
        let mut nodes = vec![Node::plugin("a")];
        let mut cursor = Cursor::new(&mut nodes, 0);
        cursor.delete().unwrap();

        let result = cursor.delete();
        assert!(matches!(
            result,
            Err(TranspileError::CursorUnbound { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_replace_is_not_visited() {
        let mut nodes = vec![Node::plugin("a"), Node::plugin("b")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.replace(Node::plugin("x")).unwrap();
            assert_eq!(cursor.next_index(), 1);
        }
        assert_eq!(names(&nodes), vec!["x", "b"]);
    }

    #[test]
    fn test_insert_after_is_skipped() {
        let mut nodes = vec![Node::plugin("a"), Node::plugin("b")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.insert_after(Node::plugin("x")).unwrap();
            cursor.insert_after(Node::plugin("y")).unwrap();
            assert_eq!(cursor.next_index(), 3);
        }
        assert_eq!(names(&nodes), vec!["a", "y", "x", "b"]);
    }

    #[test]
    fn test_insert_before_keeps_current() {
        let mut nodes = vec![Node::plugin("a"), Node::plugin("b")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.insert_before(Node::plugin("x")).unwrap();
            assert_eq!(cursor.current().map(|p| p.name.as_str()), Some("a"));
            assert_eq!(cursor.index(), 1);
            assert_eq!(cursor.next_index(), 2);
        }
        assert_eq!(names(&nodes), vec!["x", "a", "b"]);
    }

    #[test]
    fn test_insert_after_delete_keeps_next_visited() {
        let mut nodes = vec![Node::plugin("a"), Node::plugin("b")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.delete().unwrap();
            cursor.insert_after(Node::plugin("x")).unwrap();
            assert_eq!(cursor.next_index(), 1);
            assert_eq!(cursor.current().map(|p| p.name.as_str()), Some("b"));
        }
        assert_eq!(names(&nodes), vec!["x", "b"]);
    }

    #[test]
    fn test_insert_after_deleting_last_node() {
        let mut nodes = vec![Node::plugin("a")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.delete().unwrap();
            cursor.insert_after(Node::plugin("x")).unwrap();
            assert_eq!(cursor.next_index(), 1);
        }
        assert_eq!(names(&nodes), vec!["x"]);
    }

    #[test]
    fn test_delete_after_insert_after_keeps_inserted_skipped() {
        let mut nodes = vec![Node::plugin("a"), Node::plugin("b")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.insert_after(Node::plugin("x")).unwrap();
            cursor.delete().unwrap();
            assert_eq!(cursor.next_index(), 1);
        }
        assert_eq!(names(&nodes), vec!["x", "b"]);
    }

    #[test]
    fn test_insert_before_deleting_last_node() {
        let mut nodes = vec![Node::plugin("a")];
        {
            let mut cursor = Cursor::new(&mut nodes, 0);
            cursor.delete().unwrap();
            cursor.insert_before(Node::plugin("x")).unwrap();
            assert_eq!(cursor.next_index(), 1);
        }
        assert_eq!(names(&nodes), vec!["x"]);
    }

    #[test]
    fn test_mutation_on_empty_sequence_fails() {
        let mut nodes = Vec::new();
        let mut cursor = Cursor::new(&mut nodes, 0);

        assert!(cursor.replace(Node::Empty).is_err());
        assert!(cursor.insert_before(Node::Empty).is_err());
        assert!(cursor.insert_after(Node::Empty).is_err());
    }
}
