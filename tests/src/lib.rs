//! Peirce Integration Test Framework
//!
//! Provides a fluent API for writing rule scenarios against existential graphs.
//!
//! # Structure
//!
//! - **fixture** - The starting graph, with every element declared under a name
//! - **scenario** - An ordered list of rule applications
//! - **assertion** - What each step is expected to do
//! - **runner** - Runs the steps, carrying the current graph forward
//!
//! # Example
//!
//! ```ignore
//! use peirce_tests::prelude::*;
//!
//! pub fn scenario() -> Scenario {
//!     Scenario::new("mortal")
//!         .fixture(
//!             Fixture::new()
//!                 .cut("c1", SHEET)
//!                 .variable("x", "c1")
//!                 .edge("human", "c1", "Human", &["x"]),
//!         )
//!         .step(
//!             "erase human",
//!             |s| Ok(RuleParams::Erasure { subgraph: s.subgraph("c1", &["x", "human"])? }),
//!             |e| e.violation("negative-context"),
//!         )
//! }
//!
//! #[test]
//! fn test() {
//!     scenario().run().unwrap();
//! }
//! ```

mod error;
mod fixture;
mod runner;
mod scenario;

pub use assertion::{Applied, Expectation, ExpectationBuilder, Outcome};
pub use error::{ScenarioError, ScenarioResult};
pub use fixture::{Fixture, Names, SHEET};
pub use runner::{Runner, State};
pub use scenario::{Scenario, Step};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Expectation, ExpectationBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::fixture::{Fixture, Names, SHEET};
    pub use crate::runner::State;
    pub use crate::scenario::Scenario;

    pub use peirce_context::{ContextResolver, Nesting, Polarity};
    pub use peirce_core::{ContextId, CutId, EdgeId, ElementId, VertexId};
    pub use peirce_graph::{Graph, GraphBuilder};
    pub use peirce_pattern::{Fragment, FragmentArg, Placement};
    pub use peirce_rule::{
        NewVertex, RuleConfig, RuleEngine, RuleError, RuleKind, RuleParams, RuleViolation,
    };
    pub use peirce_subgraph::Subgraph;
}
