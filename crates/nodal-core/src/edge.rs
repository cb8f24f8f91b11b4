//! Connection edges.
//!
//! A [`Connection`] is the weight of a directed graph edge from one node's
//! output field to another node's input field. The node endpoints are held
//! by the graph edge itself; the weight records which fields are wired.

use serde::{Deserialize, Serialize};

/// A directed, type-checked edge from an output field to an input field.
///
/// Connections exist only after the compatibility checker has accepted the
/// (source type, target type) pair. An input field has at most one incoming
/// connection; an output field may feed any number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Name of the output field on the source node.
    pub source_field: String,
    /// Name of the input field on the target node.
    pub target_field: String,
}

impl Connection {
    /// Creates a connection weight between the named fields.
    pub fn new(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Connection {
            source_field: source_field.into(),
            target_field: target_field.into(),
        }
    }
}
