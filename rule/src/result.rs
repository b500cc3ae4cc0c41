//! Rule outcome types.

use crate::params::RuleKind;
use peirce_core::ElementId;
use peirce_graph::GraphDelta;
use peirce_subgraph::Subgraph;
use std::collections::BTreeSet;

/// A validated, not yet applied, rule application.
#[derive(Debug, Clone)]
pub struct RuleDelta {
    pub rule: RuleKind,
    pub changes: GraphDelta,
    /// New elements as a subgraph: the iteration copy, the inserted fragment,
    /// the new double cut with its contents, or the new vertex.
    pub created: Option<Subgraph>,
    pub removed: BTreeSet<ElementId>,
}

impl RuleDelta {
    pub fn new(rule: RuleKind, changes: GraphDelta) -> Self {
        Self {
            rule,
            changes,
            created: None,
            removed: BTreeSet::new(),
        }
    }

    pub fn with_created(mut self, created: Subgraph) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_removed(mut self, removed: BTreeSet<ElementId>) -> Self {
        self.removed = removed;
        self
    }

    /// True when applying this delta leaves the graph as it is.
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}
