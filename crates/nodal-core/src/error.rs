//! Core error types for nodal-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! the failure modes of the graph data model. Type-compatibility
//! rejections are NOT errors -- they are ordinary values reported by the
//! checker crate.

use crate::id::{EdgeId, NodeId};
use thiserror::Error;

/// Core errors produced by the nodal-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Attempting to register a node template kind that already exists.
    #[error("duplicate node template: '{kind}'")]
    DuplicateTemplate { kind: String },

    /// A node template kind was not found in the registry.
    #[error("node template not found: '{kind}'")]
    TemplateNotFound { kind: String },

    /// A node ID was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// A field name has no matching template on the node.
    #[error("field not found: '{field}' on node {id}")]
    FieldNotFound { id: NodeId, field: String },

    /// The named field exists but is not an input.
    #[error("not an input: '{field}' on node {id}")]
    NotAnInput { id: NodeId, field: String },

    /// The named field exists but is not an output.
    #[error("not an output: '{field}' on node {id}")]
    NotAnOutput { id: NodeId, field: String },

    /// A connection ID was not found in the graph.
    #[error("connection not found: EdgeId({id})", id = id.0)]
    ConnectionNotFound { id: EdgeId },

    /// A literal value was set on a connection-only input.
    #[error("'{field}' on node {id} only accepts a connection, not a direct value")]
    DirectValueNotAllowed { id: NodeId, field: String },
}
