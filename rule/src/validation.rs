//! Precondition checks shared by several rules.

use peirce_context::{ContextResolver, Nesting};
use peirce_core::{is_valid_label, is_valid_relation_name, ContextId, EdgeId, ElementId, VertexId};
use peirce_graph::{Graph, GraphDelta};
use peirce_subgraph::Subgraph;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{RuleViolation, ViolationResult};

/// Which polarity a rule demands of its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarityRequirement {
    Positive,
    Negative,
}

/// Check the polarity of `context` against what the rule needs.
pub fn check_polarity(
    resolver: &ContextResolver<'_>,
    context: ContextId,
    requirement: PolarityRequirement,
) -> ViolationResult<()> {
    let positive = resolver.is_positive(context)?;
    match requirement {
        PolarityRequirement::Positive if !positive => {
            Err(RuleViolation::NegativeContext { context })
        }
        PolarityRequirement::Negative if positive => {
            Err(RuleViolation::PositiveContext { context })
        }
        _ => Ok(()),
    }
}

/// `target` must be `base` or lie inside it.
pub fn require_same_or_deeper(
    resolver: &ContextResolver<'_>,
    base: ContextId,
    target: ContextId,
) -> ViolationResult<Nesting> {
    let nesting = resolver.nesting(target, base)?;
    if nesting.is_same_or_deeper() {
        Ok(nesting)
    } else {
        Err(RuleViolation::invalid_nesting(base, target, nesting))
    }
}

pub fn require_well_formed(
    resolver: &ContextResolver<'_>,
    subgraph: &Subgraph,
) -> ViolationResult<()> {
    Ok(subgraph.check(resolver)?)
}

/// No interior vertex outside `keep` may be used by an edge the subgraph leaves behind.
pub fn require_closed(
    graph: &Graph,
    subgraph: &Subgraph,
    keep: &BTreeSet<VertexId>,
) -> ViolationResult<()> {
    let mut offending: BTreeMap<VertexId, Vec<EdgeId>> = BTreeMap::new();
    for (vertex, edge) in subgraph.external_references(graph) {
        if !keep.contains(&vertex) {
            offending.entry(vertex).or_default().push(edge);
        }
    }
    match offending.into_iter().next() {
        Some((vertex, edges)) => Err(RuleViolation::SubgraphNotClosed { vertex, edges }),
        None => Ok(()),
    }
}

/// Labels and relation names of everything a delta adds must be well formed.
pub fn require_valid_names(delta: &GraphDelta) -> ViolationResult<()> {
    for (vertex, _) in delta.added_vertices() {
        match vertex.label() {
            Some(label) if !is_valid_label(label) => {
                return Err(RuleViolation::malformed_target(format!(
                    "invalid label {:?} on {}",
                    label, vertex.id
                )));
            }
            None if vertex.is_constant() => {
                return Err(RuleViolation::malformed_target(format!(
                    "constant {} has no name",
                    vertex.id
                )));
            }
            _ => {}
        }
    }
    for (edge, _) in delta.added_edges() {
        if !is_valid_relation_name(&edge.relation) {
            return Err(RuleViolation::malformed_target(format!(
                "invalid relation name {:?} on {}",
                edge.relation, edge.id
            )));
        }
    }
    Ok(())
}

/// A delta that removes exactly `elements`.
pub fn removal_delta(elements: &BTreeSet<ElementId>) -> GraphDelta {
    let mut delta = GraphDelta::new();
    for element in elements {
        delta.remove(*element);
    }
    delta
}
