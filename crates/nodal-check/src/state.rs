//! Per-field connection state derivation.
//!
//! [`connection_state`] computes everything the editor needs to render a
//! field's handle during (and outside) a connect gesture: whether the field
//! is already wired, whether a gesture is in progress, whether this field
//! started it, why dropping here would be rejected, and whether the handle
//! should dim.
//!
//! The gesture itself is a plain value, [`PendingConnection`], owned by the
//! graph-editing controller and passed in by reference. This module reads
//! graph state but never mutates it; calling [`connection_state`] twice
//! with no intervening mutation yields identical results.

use petgraph::Direction;
use serde::{Deserialize, Serialize};

use nodal_core::field::FieldType;
use nodal_core::graph::WorkflowGraph;
use nodal_core::id::NodeId;
use nodal_core::template::{FieldKind, InputMode};

use crate::compat::is_compatible;
use crate::diagnostics::ConnectionError;

/// An in-progress connect gesture, captured when the user starts dragging
/// from a field handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConnection {
    /// Node the gesture originated from.
    pub node: NodeId,
    /// Field the gesture originated from.
    pub field: String,
    /// Handle kind of the originating field.
    pub kind: FieldKind,
    /// Type of the originating field, captured when the gesture began.
    pub field_type: FieldType,
    /// Whether dropping on an already-connected input rewires it instead
    /// of being rejected.
    pub replace_existing: bool,
}

/// Derived connection state for one `(node, field, kind)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionState {
    /// A connection currently terminates at this field (the single incoming
    /// edge for inputs; any outgoing edge for outputs).
    pub is_connected: bool,
    /// A connect gesture is in progress somewhere in the graph.
    pub is_connection_in_progress: bool,
    /// This field is the gesture's originating endpoint.
    pub is_connection_start_field: bool,
    /// Why completing the gesture at this field would be rejected, if it
    /// would be. `None` when no gesture is in progress or the drop is legal.
    pub connection_error: Option<ConnectionError>,
    /// The field should render as non-interactable for this gesture.
    pub should_dim: bool,
}

/// Computes the connection state for a field against the live graph and
/// the current gesture, if any.
pub fn connection_state(
    graph: &WorkflowGraph,
    pending: Option<&PendingConnection>,
    node: NodeId,
    field: &str,
    kind: FieldKind,
) -> ConnectionState {
    let is_connected = field_is_connected(graph, node, field, kind);

    let (is_connection_in_progress, is_connection_start_field, connection_error) = match pending {
        None => (false, false, None),
        Some(p) => {
            let is_start = p.node == node && p.kind == kind && p.field == field;
            let error = classify_drop(graph, p, node, field, kind).err();
            (true, is_start, error)
        }
    };

    let should_dim =
        is_connection_in_progress && !is_connection_start_field && connection_error.is_some();

    ConnectionState {
        is_connected,
        is_connection_in_progress,
        is_connection_start_field,
        connection_error,
        should_dim,
    }
}

/// Scans live edges for a connection terminating at this field.
fn field_is_connected(graph: &WorkflowGraph, node: NodeId, field: &str, kind: FieldKind) -> bool {
    let idx: petgraph::graph::NodeIndex<u32> = node.into();
    match kind {
        FieldKind::Input => graph
            .graph()
            .edges_directed(idx, Direction::Incoming)
            .any(|edge| edge.weight().target_field == field),
        FieldKind::Output => graph
            .graph()
            .edges_directed(idx, Direction::Outgoing)
            .any(|edge| edge.weight().source_field == field),
    }
}

/// Classifies why completing the gesture at `(node, field, kind)` would be
/// rejected. `Ok(())` means the drop is legal.
fn classify_drop(
    graph: &WorkflowGraph,
    pending: &PendingConnection,
    node: NodeId,
    field: &str,
    kind: FieldKind,
) -> Result<(), ConnectionError> {
    // An unresolvable field template short-circuits everything else.
    let candidate_template =
        graph
            .field_template(node, field, kind)
            .ok_or_else(|| ConnectionError::UnknownField {
                field: field.to_string(),
            })?;
    let candidate_type = candidate_template.field_type;

    if pending.node == node && pending.kind == kind && pending.field == field {
        return Err(ConnectionError::SelfConnection);
    }
    if pending.kind == kind {
        return Err(ConnectionError::SameDirection);
    }
    if pending.node == node {
        return Err(ConnectionError::SameNode);
    }

    // Orient the prospective connection output -> input.
    let (source_type, target_type, input_node, input_field) = match kind {
        FieldKind::Input => (pending.field_type, candidate_type, node, field),
        FieldKind::Output => (
            candidate_type,
            pending.field_type,
            pending.node,
            pending.field.as_str(),
        ),
    };

    if kind == FieldKind::Input && candidate_template.input == InputMode::Direct {
        return Err(ConnectionError::DirectOnly {
            field: field.to_string(),
        });
    }

    if !pending.replace_existing
        && graph.incoming_connection(input_node, input_field).is_some()
    {
        return Err(ConnectionError::AlreadyConnected);
    }

    if !is_compatible(&source_type, &target_type) {
        return Err(ConnectionError::TypeMismatch {
            source: source_type,
            target: target_type,
        });
    }

    Ok(())
}
