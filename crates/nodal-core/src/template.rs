//! Field and node templates.
//!
//! A [`NodeTemplate`] is the immutable definition of a node type: its kind
//! name plus insertion-ordered input and output [`FieldTemplate`]s. Node
//! instances ([`crate::node::WorkflowNode`]) reference their template by
//! kind; per-instance values live on the instance, never on the template.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// Whether a field is an input or an output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Input,
    Output,
}

/// How an input field may be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Must be wired from another node's output.
    Connection,
    /// Literal value only; never exposes a connection handle.
    Direct,
    /// Either a literal value or a connection.
    Any,
}

/// The immutable definition of a single field on a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTemplate {
    /// Field name, unique within the owning node template (per kind).
    pub name: String,
    /// Input or output.
    pub kind: FieldKind,
    /// The field's type.
    pub field_type: FieldType,
    /// Whether this input must be satisfied before the node can run.
    /// Always `false` for outputs.
    pub required: bool,
    /// How this input may be satisfied. Ignored for outputs.
    pub input: InputMode,
}

impl FieldTemplate {
    /// Creates an input field template.
    pub fn input(
        name: impl Into<String>,
        field_type: FieldType,
        input: InputMode,
        required: bool,
    ) -> Self {
        FieldTemplate {
            name: name.into(),
            kind: FieldKind::Input,
            field_type,
            required,
            input,
        }
    }

    /// Creates an output field template.
    pub fn output(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldTemplate {
            name: name.into(),
            kind: FieldKind::Output,
            field_type,
            required: false,
            input: InputMode::Any,
        }
    }
}

/// A node type definition: kind name plus ordered input/output fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    /// Node type identifier, e.g. `"resize_image"`.
    pub kind: String,
    /// Input fields, in declaration order.
    pub inputs: IndexMap<String, FieldTemplate>,
    /// Output fields, in declaration order.
    pub outputs: IndexMap<String, FieldTemplate>,
}

impl NodeTemplate {
    /// Creates an empty node template with the given kind name.
    pub fn new(kind: impl Into<String>) -> Self {
        NodeTemplate {
            kind: kind.into(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Adds an input field. A later field with the same name replaces the
    /// earlier one.
    pub fn with_input(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        input: InputMode,
        required: bool,
    ) -> Self {
        let template = FieldTemplate::input(name, field_type, input, required);
        self.inputs.insert(template.name.clone(), template);
        self
    }

    /// Adds an output field. A later field with the same name replaces the
    /// earlier one.
    pub fn with_output(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        let template = FieldTemplate::output(name, field_type);
        self.outputs.insert(template.name.clone(), template);
        self
    }

    /// Looks up a field template by name and kind.
    pub fn field(&self, name: &str, kind: FieldKind) -> Option<&FieldTemplate> {
        match kind {
            FieldKind::Input => self.inputs.get(name),
            FieldKind::Output => self.outputs.get(name),
        }
    }
}
