//! Connection rejection classifications.
//!
//! [`ConnectionError`] captures why completing a connection at a given field
//! would be rejected. These are user-facing classifications for tooltips
//! and validation messages, not application faults -- the editor renders
//! them inline and carries on.

use nodal_core::field::FieldType;
use serde::{Deserialize, Serialize};

/// Why a connection attempt at a field would be rejected.
// `Display`/`Error` are implemented by hand instead of via
// `#[derive(thiserror::Error)]`: the derive treats the `source` field of
// `TypeMismatch` as the error-source and requires `FieldType: Error`, but
// here `source` is the source *field type* of the connection, not a cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionError {
    /// The field name has no matching template on the node. Short-circuits
    /// all other checks; the UI renders an inline error for the field.
    UnknownField {
        /// The unresolved field name.
        field: String,
    },

    /// Both endpoints are the same handle kind (input-input or
    /// output-output).
    SameDirection,

    /// The candidate field is the gesture's own start field.
    SelfConnection,

    /// Both endpoints belong to the same node.
    SameNode,

    /// The input already has its single incoming connection and the gesture
    /// does not target replacement.
    AlreadyConnected,

    /// The input only accepts a direct literal value, never a connection.
    DirectOnly {
        /// The direct-only input field name.
        field: String,
    },

    /// The compatibility checker rejected the (source, target) type pair.
    TypeMismatch {
        /// Type of the source (output) field.
        source: FieldType,
        /// Type of the target (input) field.
        target: FieldType,
    },
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField { field } => write!(f, "unknown field: '{field}'"),
            Self::SameDirection => {
                write!(f, "source and target fields must be different kinds")
            }
            Self::SelfConnection => write!(f, "cannot connect a field to itself"),
            Self::SameNode => write!(f, "cannot connect a node to itself"),
            Self::AlreadyConnected => write!(f, "inputs may only have one connection"),
            Self::DirectOnly { field } => write!(f, "'{field}' only accepts a direct value"),
            Self::TypeMismatch { source, target } => write!(
                f,
                "field types must be compatible: {source} cannot connect to {target}"
            ),
        }
    }
}

impl std::error::Error for ConnectionError {}
