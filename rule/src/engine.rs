//! Rule engine - one entry point for every rule over a single graph value.
//!
//! The engine delegates to the rule modules in `ops/`:
//! - `ops/erasure.rs` and `ops/insertion.rs` - the polarity rules
//! - `ops/iteration.rs` and `ops/deiteration.rs` - copying and uncopying
//! - `ops/double_cut.rs` - adding and removing double cuts
//! - `ops/isolated_vertex.rs` - adding and removing lone vertices

use peirce_context::ContextResolver;
use peirce_core::{ContextId, CutId, ElementId, VertexId};
use peirce_graph::Graph;
use peirce_pattern::{Fragment, Matcher, PatternResult};
use peirce_subgraph::{Subgraph, SubgraphExtractor, SubgraphResult};
use tracing::{debug, trace};

use crate::config::RuleConfig;
use crate::error::{RuleResult, ViolationResult};
use crate::ops;
use crate::params::{NewVertex, RuleKind, RuleParams};
use crate::result::RuleDelta;

/// Validates and applies rules against one graph.
///
/// The graph is never modified; every successful rule yields a new graph value.
pub struct RuleEngine<'g> {
    resolver: ContextResolver<'g>,
    config: RuleConfig,
}

impl<'g> RuleEngine<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            resolver: ContextResolver::new(graph),
            config: RuleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RuleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &'g Graph {
        self.resolver.graph()
    }

    pub fn resolver(&self) -> &ContextResolver<'g> {
        &self.resolver
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Check a rule without applying it.
    pub fn validate(&self, params: &RuleParams) -> ViolationResult<RuleDelta> {
        let resolver = &self.resolver;
        let outcome = match params {
            RuleParams::Erasure { subgraph } => ops::validate_erasure(resolver, subgraph),
            RuleParams::Insertion { target, fragment } => {
                ops::validate_insertion(resolver, *target, fragment)
            }
            RuleParams::Iteration { subgraph, target } => {
                ops::validate_iteration(resolver, subgraph, *target)
            }
            RuleParams::Deiteration { copy, base } => {
                ops::validate_deiteration(resolver, copy, base)
            }
            RuleParams::DoubleCutAddition { subgraph } => {
                ops::validate_double_cut_addition(resolver, subgraph)
            }
            RuleParams::DoubleCutRemoval { outer, inner } => {
                ops::validate_double_cut_removal(resolver, *outer, *inner)
            }
            RuleParams::IsolatedVertexAddition { context, vertex } => {
                ops::validate_isolated_vertex_addition(resolver, *context, vertex)
            }
            RuleParams::IsolatedVertexRemoval { vertex } => {
                ops::validate_isolated_vertex_removal(resolver, *vertex)
            }
        };
        report(params.kind(), outcome)
    }

    /// Apply a delta produced by [`RuleEngine::validate`] on this engine's graph.
    pub fn apply(&self, delta: &RuleDelta) -> RuleResult<Graph> {
        apply(self.graph(), delta)
    }

    /// Validate and apply in one step.
    pub fn execute(&self, params: &RuleParams) -> RuleResult<Graph> {
        let delta = self.validate(params)?;
        self.apply(&delta)
    }

    pub fn erase(&self, subgraph: &Subgraph) -> RuleResult<Graph> {
        let outcome = ops::validate_erasure(&self.resolver, subgraph);
        self.apply(&report(RuleKind::Erasure, outcome)?)
    }

    pub fn insert(&self, target: ContextId, fragment: &Fragment) -> RuleResult<Graph> {
        let outcome = ops::validate_insertion(&self.resolver, target, fragment);
        self.apply(&report(RuleKind::Insertion, outcome)?)
    }

    pub fn iterate(&self, subgraph: &Subgraph, target: ContextId) -> RuleResult<Graph> {
        let outcome = ops::validate_iteration(&self.resolver, subgraph, target);
        self.apply(&report(RuleKind::Iteration, outcome)?)
    }

    pub fn deiterate(&self, copy: &Subgraph, base: &Subgraph) -> RuleResult<Graph> {
        let outcome = ops::validate_deiteration(&self.resolver, copy, base);
        self.apply(&report(RuleKind::Deiteration, outcome)?)
    }

    pub fn add_double_cut(&self, subgraph: &Subgraph) -> RuleResult<Graph> {
        let outcome = ops::validate_double_cut_addition(&self.resolver, subgraph);
        self.apply(&report(RuleKind::DoubleCutAddition, outcome)?)
    }

    pub fn remove_double_cut(&self, outer: CutId, inner: CutId) -> RuleResult<Graph> {
        let outcome = ops::validate_double_cut_removal(&self.resolver, outer, inner);
        self.apply(&report(RuleKind::DoubleCutRemoval, outcome)?)
    }

    pub fn add_isolated_vertex(&self, context: ContextId, vertex: &NewVertex) -> RuleResult<Graph> {
        let outcome = ops::validate_isolated_vertex_addition(&self.resolver, context, vertex);
        self.apply(&report(RuleKind::IsolatedVertexAddition, outcome)?)
    }

    pub fn remove_isolated_vertex(&self, vertex: VertexId) -> RuleResult<Graph> {
        let outcome = ops::validate_isolated_vertex_removal(&self.resolver, vertex);
        self.apply(&report(RuleKind::IsolatedVertexRemoval, outcome)?)
    }

    /// Grow `seeds` into a well-formed subgraph under `root`.
    pub fn select(
        &self,
        seeds: impl IntoIterator<Item = ElementId>,
        root: ContextId,
    ) -> SubgraphResult<Subgraph> {
        SubgraphExtractor::new(self.graph())
            .with_root(root)
            .with_max_rounds(self.config.max_closure_rounds)
            .extract(seeds)
    }

    /// Every copy of `base` that de-iteration could remove.
    pub fn find_copies(&self, base: &Subgraph) -> PatternResult<Vec<Subgraph>> {
        Matcher::new(&self.resolver, base)?
            .with_options(self.config.search_options())
            .find_copies()
    }
}

/// Apply a validated delta to the graph it was validated against.
///
/// A structural failure here means the rule produced an unsound delta and is
/// reported as `RuleError::Unsound`.
pub fn apply(graph: &Graph, delta: &RuleDelta) -> RuleResult<Graph> {
    trace!(rule = %delta.rule, changes = delta.changes.len(), "applying rule delta");
    Ok(graph.with_changes(&delta.changes)?)
}

fn report(rule: RuleKind, outcome: ViolationResult<RuleDelta>) -> ViolationResult<RuleDelta> {
    match &outcome {
        Ok(delta) => debug!(
            %rule,
            changes = delta.changes.len(),
            removed = delta.removed.len(),
            "rule accepted"
        ),
        Err(violation) => debug!(%rule, code = violation.code(), %violation, "rule rejected"),
    }
    outcome
}
