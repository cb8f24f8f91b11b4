pub mod edge;
pub mod error;
pub mod field;
pub mod graph;
pub mod id;
pub mod node;
pub mod template;

// Re-export commonly used types
pub use edge::Connection;
pub use error::CoreError;
pub use field::{FieldType, FieldTypeName};
pub use graph::WorkflowGraph;
pub use id::{EdgeId, NodeId};
pub use node::WorkflowNode;
pub use template::{FieldKind, FieldTemplate, InputMode, NodeTemplate};
