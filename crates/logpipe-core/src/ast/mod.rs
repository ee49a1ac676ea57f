//! Abstract Syntax Tree (AST) definitions for a Logstash filter block
//!
//! This module contains the node definitions the configuration parser hands
//! over to the compiler:
//! - Conditions (opaque boolean expressions)
//! - Plugin invocations
//! - Branches (if / else if / else chains)

pub mod condition;
pub mod node;

pub use condition::Condition;
pub use node::{Branch, Clause, Node, Plugin};
