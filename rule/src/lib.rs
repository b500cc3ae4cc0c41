//! Peirce Rule
//!
//! The eight transformation rules of the Beta calculus.
//!
//! Responsibilities:
//! - Check each rule's preconditions against one graph value
//! - Describe an accepted rule as a `RuleDelta` before anything changes
//! - Apply deltas through `Graph::with_changes`, producing a new graph
//!
//! # Module Structure
//!
//! - `engine` - `RuleEngine`, which dispatches to the rules and applies deltas
//! - `ops/` - One module per rule pair (erasure, insertion, iteration,
//!   de-iteration, double cut, isolated vertex)
//! - `validation` - Polarity, nesting, well-formedness and closedness checks
//! - `params` - `RuleParams` and `RuleKind`
//! - `result` - `RuleDelta`
//! - `config` - `RuleConfig`
//! - `error` - `RuleViolation` and `RuleError`

mod config;
mod engine;
mod error;
mod ops;
mod params;
mod result;
mod validation;

use peirce_graph::Graph;

pub use config::RuleConfig;
pub use engine::{apply, RuleEngine};
pub use error::{RuleError, RuleResult, RuleViolation, ViolationResult};
pub use ops::{
    validate_deiteration, validate_double_cut_addition, validate_double_cut_removal,
    validate_erasure, validate_insertion, validate_isolated_vertex_addition,
    validate_isolated_vertex_removal, validate_iteration,
};
pub use params::{NewVertex, RuleKind, RuleParams};
pub use result::RuleDelta;

/// Run one rule against `graph` and return the transformed graph.
pub fn transform(graph: &Graph, params: &RuleParams) -> RuleResult<Graph> {
    RuleEngine::new(graph).execute(params)
}
