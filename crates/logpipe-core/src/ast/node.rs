//! Filter tree nodes
//!
//! One nesting level of a filter block is an ordered `Vec<Node>`. Branch
//! clause bodies are nested levels of the same shape.

use super::condition::Condition;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// A single entry of a filter block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Plugin invocation (e.g. `mutate { ... }`)
    Plugin(Plugin),

    /// Conditional chain
    Branch(Branch),

    /// Empty marker left behind by the parser
    Empty,
}

/// Plugin invocation with its attributes in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin name (e.g. "mutate", "grok")
    pub name: String,

    /// Attributes as written in the configuration
    #[serde(default)]
    pub attributes: Vec<(String, Value)>,
}

/// One `if` / `else if` clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub condition: Condition,
    #[serde(default)]
    pub body: Vec<Node>,
}

/// `if` clause, zero or more `else if` clauses and an optional `else` body.
///
/// A missing `else` is the same as an empty `else_body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub if_clause: Clause,
    #[serde(default)]
    pub else_if_clauses: Vec<Clause>,
    #[serde(default)]
    pub else_body: Vec<Node>,
}

impl Node {
    /// Create a plugin node without attributes
    pub fn plugin(name: impl Into<String>) -> Self {
        Node::Plugin(Plugin::new(name))
    }

    pub fn is_plugin(&self) -> bool {
        matches!(self, Node::Plugin(_))
    }

    /// Borrow the plugin payload, if this is a plugin node
    pub fn as_plugin(&self) -> Option<&Plugin> {
        match self {
            Node::Plugin(plugin) => Some(plugin),
            _ => None,
        }
    }
}

impl From<Plugin> for Node {
    fn from(plugin: Plugin) -> Self {
        Node::Plugin(plugin)
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Look up the first attribute with the given key
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl Clause {
    pub fn new(condition: Condition, body: Vec<Node>) -> Self {
        Self { condition, body }
    }
}

impl Branch {
    /// Create a branch with only an `if` clause
    pub fn new(condition: Condition, body: Vec<Node>) -> Self {
        Self {
            if_clause: Clause::new(condition, body),
            else_if_clauses: Vec::new(),
            else_body: Vec::new(),
        }
    }

    /// Append an `else if` clause
    pub fn with_else_if(mut self, condition: Condition, body: Vec<Node>) -> Self {
        self.else_if_clauses.push(Clause::new(condition, body));
        self
    }

    /// Set the `else` body
    pub fn with_else(mut self, body: Vec<Node>) -> Self {
        self.else_body = body;
        self
    }
}
