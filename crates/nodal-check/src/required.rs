//! Required-input evaluation.
//!
//! A required input is "missing" when the workflow cannot run because the
//! field has been given neither a literal value nor a connection, per its
//! input mode. The pure contract is [`is_missing_required_input`]; the
//! graph-level query [`required_input_status`] resolves the template,
//! connection and value state itself and classifies unknown fields as
//! [`InputRequirement::NotApplicable`] instead of failing.

use serde::{Deserialize, Serialize};

use nodal_core::graph::WorkflowGraph;
use nodal_core::id::NodeId;
use nodal_core::template::{FieldKind, FieldTemplate, InputMode};

/// Classification of a field's required-input state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputRequirement {
    /// Required and currently unsatisfied.
    Missing,
    /// Required and satisfied by a value or connection.
    Satisfied,
    /// Requirement does not apply: unknown node/field, a non-input field,
    /// a non-required input, or a direct-mode input (always satisfiable by
    /// its literal/default).
    NotApplicable,
}

impl InputRequirement {
    /// Returns `true` only for [`InputRequirement::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, InputRequirement::Missing)
    }
}

/// Pure contract: is a required input currently unsatisfied?
///
/// Non-input templates and non-required inputs never report missing.
/// `Connection`-mode inputs are missing iff not connected; `Any`-mode
/// inputs are missing iff they have neither a literal value nor a
/// connection; `Direct`-mode inputs are satisfiable by their literal and
/// never report missing here.
pub fn is_missing_required_input(
    template: &FieldTemplate,
    is_connected: bool,
    has_literal_value: bool,
) -> bool {
    if template.kind != FieldKind::Input || !template.required {
        return false;
    }
    match template.input {
        InputMode::Connection => !is_connected,
        InputMode::Any => !has_literal_value && !is_connected,
        InputMode::Direct => false,
    }
}

/// Graph-level query: classifies the required-input state of
/// `(node, field)`, resolving the template, connection and value state
/// from the live graph. Unknown fields short-circuit to `NotApplicable`.
pub fn required_input_status(
    graph: &WorkflowGraph,
    node: NodeId,
    field: &str,
) -> InputRequirement {
    let template = match graph.field_template(node, field, FieldKind::Input) {
        Some(t) => t,
        None => return InputRequirement::NotApplicable,
    };
    if !template.required || template.input == InputMode::Direct {
        return InputRequirement::NotApplicable;
    }

    let is_connected = graph.is_connected(node, field, FieldKind::Input);
    let has_value = graph.has_value(node, field);
    if is_missing_required_input(template, is_connected, has_value) {
        InputRequirement::Missing
    } else {
        InputRequirement::Satisfied
    }
}

/// Convenience predicate over [`required_input_status`].
pub fn missing_required_input(graph: &WorkflowGraph, node: NodeId, field: &str) -> bool {
    required_input_status(graph, node, field).is_missing()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_core::field::{FieldType, FieldTypeName};
    use nodal_core::template::NodeTemplate;
    use serde_json::json;

    fn connection_input(required: bool) -> FieldTemplate {
        FieldTemplate::input(
            "image",
            FieldType::scalar(FieldTypeName::Image),
            InputMode::Connection,
            required,
        )
    }

    fn any_input(required: bool) -> FieldTemplate {
        FieldTemplate::input(
            "strength",
            FieldType::scalar(FieldTypeName::Float),
            InputMode::Any,
            required,
        )
    }

    // -----------------------------------------------------------------------
    // Pure contract
    // -----------------------------------------------------------------------

    #[test]
    fn required_connection_mode_missing_iff_not_connected() {
        let t = connection_input(true);
        assert!(is_missing_required_input(&t, false, false));
        assert!(!is_missing_required_input(&t, true, false));
        // A literal value does not satisfy a connection-mode input.
        assert!(is_missing_required_input(&t, false, true));
    }

    #[test]
    fn required_any_mode_satisfied_by_value_or_connection() {
        let t = any_input(true);
        assert!(is_missing_required_input(&t, false, false));
        assert!(!is_missing_required_input(&t, false, true));
        assert!(!is_missing_required_input(&t, true, false));
        assert!(!is_missing_required_input(&t, true, true));
    }

    #[test]
    fn non_required_inputs_never_missing() {
        assert!(!is_missing_required_input(&connection_input(false), false, false));
        assert!(!is_missing_required_input(&any_input(false), false, false));
    }

    #[test]
    fn direct_mode_never_missing() {
        let t = FieldTemplate::input(
            "seed",
            FieldType::scalar(FieldTypeName::Integer),
            InputMode::Direct,
            true,
        );
        assert!(!is_missing_required_input(&t, false, false));
    }

    #[test]
    fn outputs_never_missing() {
        let t = FieldTemplate::output("image", FieldType::scalar(FieldTypeName::Image));
        assert!(!is_missing_required_input(&t, false, false));
    }

    // -----------------------------------------------------------------------
    // Graph-level query
    // -----------------------------------------------------------------------

    fn test_graph() -> (WorkflowGraph, NodeId, NodeId) {
        let mut graph = WorkflowGraph::new();
        graph
            .register_template(
                NodeTemplate::new("producer")
                    .with_output("image", FieldType::scalar(FieldTypeName::Image)),
            )
            .unwrap();
        graph
            .register_template(
                NodeTemplate::new("consumer")
                    .with_input(
                        "image",
                        FieldType::scalar(FieldTypeName::Image),
                        InputMode::Connection,
                        true,
                    )
                    .with_input(
                        "strength",
                        FieldType::scalar(FieldTypeName::Float),
                        InputMode::Any,
                        true,
                    )
                    .with_input(
                        "label",
                        FieldType::scalar(FieldTypeName::String),
                        InputMode::Any,
                        false,
                    ),
            )
            .unwrap();
        let producer = graph.add_node("producer").unwrap();
        let consumer = graph.add_node("consumer").unwrap();
        (graph, producer, consumer)
    }

    #[test]
    fn connection_mode_tracks_wiring() {
        let (mut graph, producer, consumer) = test_graph();

        assert_eq!(
            required_input_status(&graph, consumer, "image"),
            InputRequirement::Missing
        );

        graph
            .add_connection(producer, "image", consumer, "image")
            .unwrap();
        assert_eq!(
            required_input_status(&graph, consumer, "image"),
            InputRequirement::Satisfied
        );
        assert!(!missing_required_input(&graph, consumer, "image"));
    }

    #[test]
    fn any_mode_tracks_literal_value() {
        let (mut graph, _, consumer) = test_graph();

        assert!(missing_required_input(&graph, consumer, "strength"));

        graph.set_value(consumer, "strength", json!(0.5)).unwrap();
        assert_eq!(
            required_input_status(&graph, consumer, "strength"),
            InputRequirement::Satisfied
        );

        graph.clear_value(consumer, "strength").unwrap();
        assert!(missing_required_input(&graph, consumer, "strength"));
    }

    #[test]
    fn non_required_input_is_not_applicable() {
        let (graph, _, consumer) = test_graph();
        assert_eq!(
            required_input_status(&graph, consumer, "label"),
            InputRequirement::NotApplicable
        );
        assert!(!missing_required_input(&graph, consumer, "label"));
    }

    #[test]
    fn unknown_field_is_not_applicable() {
        let (graph, producer, consumer) = test_graph();
        assert_eq!(
            required_input_status(&graph, consumer, "missing"),
            InputRequirement::NotApplicable
        );
        // Output fields are not inputs; same classification.
        assert_eq!(
            required_input_status(&graph, producer, "image"),
            InputRequirement::NotApplicable
        );
        // Nonexistent node.
        assert_eq!(
            required_input_status(&graph, NodeId(999), "image"),
            InputRequirement::NotApplicable
        );
    }
}
