//! Rule implementations.
//!
//! Every rule is a pure check that either rejects with a `RuleViolation` or
//! returns the `RuleDelta` that would carry it out. Nothing here touches the graph.

mod deiteration;
mod double_cut;
mod erasure;
mod insertion;
mod isolated_vertex;
mod iteration;

pub use deiteration::validate_deiteration;
pub use double_cut::{validate_double_cut_addition, validate_double_cut_removal};
pub use erasure::validate_erasure;
pub use insertion::validate_insertion;
pub use isolated_vertex::{validate_isolated_vertex_addition, validate_isolated_vertex_removal};
pub use iteration::validate_iteration;
