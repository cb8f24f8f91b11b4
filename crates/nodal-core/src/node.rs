//! Node instances.
//!
//! A [`WorkflowNode`] is one placed instance of a node type. It references
//! its [`crate::template::NodeTemplate`] by kind and owns the mutable
//! literal values the user has typed into its input fields. Whether a
//! literal is present feeds the required-input evaluation downstream.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node instance in the workflow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    /// Kind of the node template this instance was created from.
    pub template: String,
    /// Literal values currently set on input fields, keyed by field name.
    values: IndexMap<String, Value>,
}

impl WorkflowNode {
    /// Creates a node instance of the given template kind with no values set.
    pub fn new(template: impl Into<String>) -> Self {
        WorkflowNode {
            template: template.into(),
            values: IndexMap::new(),
        }
    }

    /// Sets a literal value on an input field, returning the previous value
    /// if one was set.
    pub fn set_value(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(field.into(), value)
    }

    /// Clears the literal value on an input field, returning it if present.
    pub fn clear_value(&mut self, field: &str) -> Option<Value> {
        self.values.shift_remove(field)
    }

    /// Returns `true` if the named input field currently holds a literal value.
    pub fn has_value(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Returns the literal value on the named input field, if any.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }
}
