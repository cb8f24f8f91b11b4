//! The checked connection command.
//!
//! [`create_connection`] is the sole production mutator of connections: it
//! runs the structural checks and the compatibility predicate, and only
//! then applies the edge. The graph is never observed in a state where a
//! connection exists without having satisfied compatibility.

use thiserror::Error;

use nodal_core::error::CoreError;
use nodal_core::graph::WorkflowGraph;
use nodal_core::id::{EdgeId, NodeId};
use nodal_core::template::InputMode;

use crate::compat::is_compatible;
use crate::diagnostics::ConnectionError;

/// Failure of a connection command.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The connection was rejected by a structural or type rule.
    #[error(transparent)]
    Rejected(#[from] ConnectionError),

    /// An endpoint could not be resolved against the graph.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Creates a connection from `(source, source_field)` to
/// `(target, target_field)` after validating it.
///
/// Checks, in order: the source resolves to an output and the target to an
/// input, the endpoints are on different nodes, the target accepts
/// connections at all, and the compatibility predicate accepts the type
/// pair. On success the target input's pre-existing incoming connection
/// (if any) is replaced, so fan-in = 1 holds after any command sequence.
pub fn create_connection(
    graph: &mut WorkflowGraph,
    source: NodeId,
    source_field: &str,
    target: NodeId,
    target_field: &str,
) -> Result<EdgeId, ConnectError> {
    let source_type = graph.resolve_output(source, source_field)?.field_type;
    let target_template = graph.resolve_input(target, target_field)?;
    let target_type = target_template.field_type;
    let target_mode = target_template.input;

    if source == target {
        return Err(ConnectionError::SameNode.into());
    }
    if target_mode == InputMode::Direct {
        return Err(ConnectionError::DirectOnly {
            field: target_field.to_string(),
        }
        .into());
    }
    if !is_compatible(&source_type, &target_type) {
        return Err(ConnectionError::TypeMismatch {
            source: source_type,
            target: target_type,
        }
        .into());
    }

    let edge = graph.add_connection(source, source_field, target, target_field)?;
    Ok(edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_core::field::{FieldType, FieldTypeName};
    use nodal_core::template::{FieldKind, NodeTemplate};
    use petgraph::visit::EdgeRef;
    use petgraph::Direction;

    fn test_graph() -> WorkflowGraph {
        let mut graph = WorkflowGraph::new();
        graph
            .register_template(
                NodeTemplate::new("count")
                    .with_output("value", FieldType::scalar(FieldTypeName::Integer)),
            )
            .unwrap();
        graph
            .register_template(
                NodeTemplate::new("scale")
                    .with_input(
                        "factor",
                        FieldType::scalar(FieldTypeName::Float),
                        InputMode::Any,
                        true,
                    )
                    .with_input(
                        "seed",
                        FieldType::scalar(FieldTypeName::Integer),
                        InputMode::Direct,
                        false,
                    )
                    .with_output("image", FieldType::scalar(FieldTypeName::Image)),
            )
            .unwrap();
        graph
            .register_template(
                NodeTemplate::new("gather")
                    .with_input("item", FieldType::COLLECTION_ITEM, InputMode::Connection, false)
                    .with_output("collection", FieldType::COLLECTION),
            )
            .unwrap();
        graph
            .register_template(
                NodeTemplate::new("spread")
                    .with_input("collection", FieldType::COLLECTION, InputMode::Connection, false)
                    .with_output("item", FieldType::COLLECTION_ITEM),
            )
            .unwrap();
        graph
    }

    #[test]
    fn compatible_connection_is_created() {
        let mut graph = test_graph();
        let count = graph.add_node("count").unwrap();
        let scale = graph.add_node("scale").unwrap();

        // Integer -> Float coerces.
        let edge = create_connection(&mut graph, count, "value", scale, "factor").unwrap();
        assert_eq!(graph.connection_endpoints(edge), Some((count, scale)));
        assert!(graph.is_connected(scale, "factor", FieldKind::Input));
    }

    #[test]
    fn incompatible_connection_is_rejected_without_mutation() {
        let mut graph = test_graph();
        let scale = graph.add_node("scale").unwrap();
        let gather = graph.add_node("gather").unwrap();

        // Image -> CollectionItem is fine, but Image -> Collection is not;
        // use scale.image -> spread.collection for the rejection.
        let spread = graph.add_node("spread").unwrap();
        let result = create_connection(&mut graph, scale, "image", spread, "collection");
        assert!(matches!(
            result,
            Err(ConnectError::Rejected(ConnectionError::TypeMismatch { .. }))
        ));
        assert_eq!(graph.connection_count(), 0);

        // A scalar into a collection-item input is accepted.
        create_connection(&mut graph, scale, "image", gather, "item").unwrap();
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn collect_into_iterate_is_rejected() {
        let mut graph = test_graph();
        let gather = graph.add_node("gather").unwrap();
        let spread = graph.add_node("spread").unwrap();

        // Generic collection output into generic collection input: the
        // standing exclusion applies even though both ends name the same
        // type.
        let result =
            create_connection(&mut graph, gather, "collection", spread, "collection");
        assert!(matches!(
            result,
            Err(ConnectError::Rejected(ConnectionError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn same_node_is_rejected() {
        let mut graph = test_graph();
        let scale = graph.add_node("scale").unwrap();

        let result = create_connection(&mut graph, scale, "image", scale, "factor");
        assert!(matches!(
            result,
            Err(ConnectError::Rejected(ConnectionError::SameNode))
        ));
    }

    #[test]
    fn direct_only_input_is_rejected() {
        let mut graph = test_graph();
        let count = graph.add_node("count").unwrap();
        let scale = graph.add_node("scale").unwrap();

        let result = create_connection(&mut graph, count, "value", scale, "seed");
        assert!(matches!(
            result,
            Err(ConnectError::Rejected(ConnectionError::DirectOnly { .. }))
        ));
    }

    #[test]
    fn unresolved_endpoints_are_core_errors() {
        let mut graph = test_graph();
        let count = graph.add_node("count").unwrap();
        let scale = graph.add_node("scale").unwrap();

        assert!(matches!(
            create_connection(&mut graph, count, "nope", scale, "factor"),
            Err(ConnectError::Core(CoreError::FieldNotFound { .. }))
        ));
        assert!(matches!(
            create_connection(&mut graph, count, "value", scale, "image"),
            Err(ConnectError::Core(CoreError::NotAnInput { .. }))
        ));
        assert!(matches!(
            create_connection(&mut graph, NodeId(99), "value", scale, "factor"),
            Err(ConnectError::Core(CoreError::NodeNotFound { .. }))
        ));
    }

    #[test]
    fn rewiring_replaces_and_preserves_fan_in() {
        let mut graph = test_graph();
        let first = graph.add_node("count").unwrap();
        let second = graph.add_node("count").unwrap();
        let scale = graph.add_node("scale").unwrap();

        create_connection(&mut graph, first, "value", scale, "factor").unwrap();
        let replacement =
            create_connection(&mut graph, second, "value", scale, "factor").unwrap();

        assert_eq!(graph.connection_count(), 1);
        assert_eq!(
            graph.connection_endpoints(replacement),
            Some((second, scale))
        );
    }

    /// Fan-in invariant: after an arbitrary sequence of commands, every
    /// input field has at most one incoming connection.
    #[test]
    fn fan_in_invariant_after_command_sequence() {
        let mut graph = test_graph();
        let counts: Vec<NodeId> = (0..4).map(|_| graph.add_node("count").unwrap()).collect();
        let scales: Vec<NodeId> = (0..3).map(|_| graph.add_node("scale").unwrap()).collect();

        // Interleave successful wirings, rewirings, and rejected attempts.
        for (i, &count) in counts.iter().enumerate() {
            for &scale in &scales {
                let _ = create_connection(&mut graph, count, "value", scale, "factor");
                if i % 2 == 0 {
                    // Rejected: direct-only target. Must not disturb wiring.
                    let _ = create_connection(&mut graph, count, "value", scale, "seed");
                }
            }
        }

        for &scale in &scales {
            let idx: petgraph::graph::NodeIndex<u32> = scale.into();
            let incoming_on_factor = graph
                .graph()
                .edges_directed(idx, Direction::Incoming)
                .filter(|edge| edge.weight().target_field == "factor")
                .count();
            assert!(incoming_on_factor <= 1);
            assert_eq!(incoming_on_factor, 1); // all were eventually wired
        }
        assert_eq!(graph.connection_count(), scales.len());
    }
}
