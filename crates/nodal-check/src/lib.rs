//! Connection analysis for the workflow graph.
//!
//! Provides the pure predicates the editor consults before a connection is
//! allowed to exist:
//! - [`is_compatible`]: the pairwise field-type compatibility check (eager
//!   per-gesture checking, safe to call every pointer frame).
//! - [`connection_state`]: per-field derivations for an in-progress connect
//!   gesture (connected, start field, rejection classification, dimming).
//! - [`required_input_status`] / [`is_missing_required_input`]: whether a
//!   required input is currently unsatisfied.
//! - [`create_connection`]: the checked command that mutates the graph only
//!   after compatibility and structural checks pass.
//!
//! All queries are read-only and idempotent; rejections are ordinary
//! values, never panics.

pub mod compat;
pub mod connect;
pub mod diagnostics;
pub mod required;
pub mod state;

pub use compat::is_compatible;
pub use connect::{create_connection, ConnectError};
pub use diagnostics::ConnectionError;
pub use required::{is_missing_required_input, missing_required_input, required_input_status, InputRequirement};
pub use state::{connection_state, ConnectionState, PendingConnection};
