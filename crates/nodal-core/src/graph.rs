//! WorkflowGraph: the live editor graph.
//!
//! [`WorkflowGraph`] is the single entry point for constructing and querying
//! a workflow: a registry of immutable node templates plus a
//! `StableGraph` of node instances wired by [`Connection`] edges.
//!
//! The graph enforces *structural* connection rules only: endpoints must
//! exist with the right field kinds, and an input field keeps at most one
//! incoming connection (fan-in = 1, enforced by replacement). Type
//! compatibility is the caller's responsibility -- the checked
//! `create_connection` command in the checker crate is the sole production
//! mutator, and it consults the compatibility predicate before calling
//! [`WorkflowGraph::add_connection`].

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::edge::Connection;
use crate::error::CoreError;
use crate::field::FieldType;
use crate::id::{EdgeId, NodeId};
use crate::node::WorkflowNode;
use crate::template::{FieldKind, FieldTemplate, InputMode, NodeTemplate};

/// The live workflow graph: node templates, node instances, connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowGraph {
    /// Node instances and their connections.
    graph: StableGraph<WorkflowNode, Connection, Directed, u32>,
    /// Immutable node-type definitions, keyed by kind.
    templates: HashMap<String, NodeTemplate>,
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowGraph {
    /// Creates an empty workflow graph with no registered templates.
    pub fn new() -> Self {
        WorkflowGraph {
            graph: StableGraph::new(),
            templates: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Template registry
    // -----------------------------------------------------------------------

    /// Registers a node template. Errors if the kind is already registered.
    pub fn register_template(&mut self, template: NodeTemplate) -> Result<(), CoreError> {
        if self.templates.contains_key(&template.kind) {
            return Err(CoreError::DuplicateTemplate {
                kind: template.kind,
            });
        }
        self.templates.insert(template.kind.clone(), template);
        Ok(())
    }

    /// Looks up a node template by kind.
    pub fn template(&self, kind: &str) -> Option<&NodeTemplate> {
        self.templates.get(kind)
    }

    // -----------------------------------------------------------------------
    // Node methods
    // -----------------------------------------------------------------------

    /// Adds a node instance of the given template kind.
    pub fn add_node(&mut self, kind: &str) -> Result<NodeId, CoreError> {
        if !self.templates.contains_key(kind) {
            return Err(CoreError::TemplateNotFound {
                kind: kind.to_string(),
            });
        }
        let idx = self.graph.add_node(WorkflowNode::new(kind));
        Ok(NodeId::from(idx))
    }

    /// Removes a node and all connections at either of its endpoints.
    pub fn remove_node(&mut self, id: NodeId) -> Result<WorkflowNode, CoreError> {
        let idx: NodeIndex<u32> = id.into();
        self.graph
            .remove_node(idx)
            .ok_or(CoreError::NodeNotFound { id })
    }

    /// Looks up a node instance by ID.
    pub fn node(&self, id: NodeId) -> Option<&WorkflowNode> {
        let idx: NodeIndex<u32> = id.into();
        self.graph.node_weight(idx)
    }

    /// Looks up a node instance by ID (mutable).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut WorkflowNode> {
        let idx: NodeIndex<u32> = id.into();
        self.graph.node_weight_mut(idx)
    }

    // -----------------------------------------------------------------------
    // Field template resolution
    // -----------------------------------------------------------------------

    /// Looks up the field template for `(node, field, kind)`.
    ///
    /// Returns `None` if the node does not exist, its template is not
    /// registered, or the field has no matching template -- the "unknown
    /// field" state, which downstream evaluators surface as a
    /// classification rather than an error.
    pub fn field_template(
        &self,
        node: NodeId,
        field: &str,
        kind: FieldKind,
    ) -> Option<&FieldTemplate> {
        let instance = self.node(node)?;
        self.templates.get(&instance.template)?.field(field, kind)
    }

    /// Looks up the [`FieldType`] for `(node, field, kind)`.
    pub fn field_type(&self, node: NodeId, field: &str, kind: FieldKind) -> Option<FieldType> {
        self.field_template(node, field, kind)
            .map(|t| t.field_type)
    }

    /// Resolves an output field, with a structured error for each failure.
    pub fn resolve_output(&self, id: NodeId, field: &str) -> Result<&FieldTemplate, CoreError> {
        let instance = self.node(id).ok_or(CoreError::NodeNotFound { id })?;
        let template =
            self.templates
                .get(&instance.template)
                .ok_or_else(|| CoreError::TemplateNotFound {
                    kind: instance.template.clone(),
                })?;
        match template.field(field, FieldKind::Output) {
            Some(t) => Ok(t),
            None if template.field(field, FieldKind::Input).is_some() => {
                Err(CoreError::NotAnOutput {
                    id,
                    field: field.to_string(),
                })
            }
            None => Err(CoreError::FieldNotFound {
                id,
                field: field.to_string(),
            }),
        }
    }

    /// Resolves an input field, with a structured error for each failure.
    pub fn resolve_input(&self, id: NodeId, field: &str) -> Result<&FieldTemplate, CoreError> {
        let instance = self.node(id).ok_or(CoreError::NodeNotFound { id })?;
        let template =
            self.templates
                .get(&instance.template)
                .ok_or_else(|| CoreError::TemplateNotFound {
                    kind: instance.template.clone(),
                })?;
        match template.field(field, FieldKind::Input) {
            Some(t) => Ok(t),
            None if template.field(field, FieldKind::Output).is_some() => {
                Err(CoreError::NotAnInput {
                    id,
                    field: field.to_string(),
                })
            }
            None => Err(CoreError::FieldNotFound {
                id,
                field: field.to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Literal values
    // -----------------------------------------------------------------------

    /// Sets a literal value on an input field, returning the previous value.
    ///
    /// Rejects connection-only inputs -- those are satisfiable by wiring
    /// alone and never hold a literal.
    pub fn set_value(
        &mut self,
        id: NodeId,
        field: &str,
        value: Value,
    ) -> Result<Option<Value>, CoreError> {
        let mode = self.resolve_input(id, field)?.input;
        if mode == InputMode::Connection {
            return Err(CoreError::DirectValueNotAllowed {
                id,
                field: field.to_string(),
            });
        }
        let node = self.node_mut(id).ok_or(CoreError::NodeNotFound { id })?;
        Ok(node.set_value(field, value))
    }

    /// Clears the literal value on an input field, returning it if present.
    pub fn clear_value(&mut self, id: NodeId, field: &str) -> Result<Option<Value>, CoreError> {
        self.resolve_input(id, field)?;
        let node = self.node_mut(id).ok_or(CoreError::NodeNotFound { id })?;
        Ok(node.clear_value(field))
    }

    /// Returns `true` if the named input field currently holds a literal
    /// value. Unknown nodes and fields report `false`.
    pub fn has_value(&self, id: NodeId, field: &str) -> bool {
        self.node(id).map_or(false, |n| n.has_value(field))
    }

    // -----------------------------------------------------------------------
    // Connection methods
    // -----------------------------------------------------------------------

    /// Adds a connection from `(source, source_field)` to
    /// `(target, target_field)`.
    ///
    /// Structural checks only: the source field must be an output and the
    /// target field an input. Any existing incoming connection at the
    /// target field is removed first, so fan-in = 1 holds after every call.
    /// Callers must have validated type compatibility beforehand.
    pub fn add_connection(
        &mut self,
        source: NodeId,
        source_field: &str,
        target: NodeId,
        target_field: &str,
    ) -> Result<EdgeId, CoreError> {
        self.resolve_output(source, source_field)?;
        self.resolve_input(target, target_field)?;

        // Fan-in = 1: rewiring an input replaces its sole incoming edge.
        if let Some(existing) = self.incoming_connection(target, target_field) {
            let idx: EdgeIndex<u32> = existing.into();
            self.graph.remove_edge(idx);
        }

        let from: NodeIndex<u32> = source.into();
        let to: NodeIndex<u32> = target.into();
        let idx = self
            .graph
            .add_edge(from, to, Connection::new(source_field, target_field));
        Ok(EdgeId::from(idx))
    }

    /// Removes a connection, returning its weight.
    pub fn remove_connection(&mut self, id: EdgeId) -> Result<Connection, CoreError> {
        let idx: EdgeIndex<u32> = id.into();
        self.graph
            .remove_edge(idx)
            .ok_or(CoreError::ConnectionNotFound { id })
    }

    /// Looks up a connection weight by ID.
    pub fn connection(&self, id: EdgeId) -> Option<&Connection> {
        let idx: EdgeIndex<u32> = id.into();
        self.graph.edge_weight(idx)
    }

    /// Returns the (source, target) node endpoints of a connection.
    pub fn connection_endpoints(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        let idx: EdgeIndex<u32> = id.into();
        self.graph
            .edge_endpoints(idx)
            .map(|(a, b)| (NodeId::from(a), NodeId::from(b)))
    }

    /// Returns the incoming connection terminating at the named input
    /// field, if one exists. At most one can exist (fan-in = 1).
    pub fn incoming_connection(&self, node: NodeId, field: &str) -> Option<EdgeId> {
        let idx: NodeIndex<u32> = node.into();
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .find(|edge| edge.weight().target_field == field)
            .map(|edge| EdgeId::from(edge.id()))
    }

    /// Returns `true` if a connection currently terminates at this field:
    /// for inputs, the single incoming edge; for outputs, any outgoing edge.
    pub fn is_connected(&self, node: NodeId, field: &str, kind: FieldKind) -> bool {
        let idx: NodeIndex<u32> = node.into();
        match kind {
            FieldKind::Input => self.incoming_connection(node, field).is_some(),
            FieldKind::Output => self
                .graph
                .edges_directed(idx, Direction::Outgoing)
                .any(|edge| edge.weight().source_field == field),
        }
    }

    /// Returns the number of node instances.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of connections.
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns a read-only reference to the underlying graph, for traversals.
    pub fn graph(&self) -> &StableGraph<WorkflowNode, Connection, Directed, u32> {
        &self.graph
    }
}
