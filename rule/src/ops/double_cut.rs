//! Double cut addition and removal.

use peirce_context::ContextResolver;
use peirce_core::{ContextId, CutId, ElementId, VertexId};
use peirce_graph::GraphDelta;
use peirce_subgraph::Subgraph;
use std::collections::BTreeSet;

use crate::error::{RuleViolation, ViolationResult};
use crate::params::RuleKind;
use crate::result::RuleDelta;
use crate::validation::require_well_formed;

/// Validate enclosing `subgraph` in two new nested cuts.
///
/// The outer cut goes in the subgraph root and the inner cut in the outer one.
/// Top-level interior elements move into the inner cut, except root vertices
/// that edges outside the subgraph still use; those stay where they are.
/// An empty subgraph yields an empty double cut.
pub fn validate_double_cut_addition(
    resolver: &ContextResolver<'_>,
    subgraph: &Subgraph,
) -> ViolationResult<RuleDelta> {
    require_well_formed(resolver, subgraph)?;

    let graph = resolver.graph();
    let root = subgraph.root;
    let staying: BTreeSet<VertexId> = subgraph
        .external_references(graph)
        .into_iter()
        .map(|(vertex, _)| vertex)
        .filter(|vertex| graph.context_of(*vertex) == Some(root))
        .collect();

    let mut ids = graph.allocator();
    let outer = ids.cut();
    let inner = ids.cut();

    let mut changes = GraphDelta::new();
    changes
        .add_cut(outer, root)
        .add_cut(inner, ContextId::Cut(outer));
    for element in subgraph.top_level(graph) {
        if element.as_vertex().is_some_and(|v| staying.contains(&v)) {
            continue;
        }
        changes.reassign(element, ContextId::Cut(inner));
    }

    let mut created = subgraph.clone();
    created.cuts.insert(outer);
    created.cuts.insert(inner);
    Ok(RuleDelta::new(RuleKind::DoubleCutAddition, changes).with_created(created))
}

/// Validate removing the double cut formed by `outer` and `inner`.
pub fn validate_double_cut_removal(
    resolver: &ContextResolver<'_>,
    outer: CutId,
    inner: CutId,
) -> ViolationResult<RuleDelta> {
    let graph = resolver.graph();
    let parent = graph
        .context_of(outer)
        .ok_or(RuleViolation::UnknownElement(ElementId::Cut(outer)))?;
    let holder = graph
        .context_of(inner)
        .ok_or(RuleViolation::UnknownElement(ElementId::Cut(inner)))?;
    if holder != ContextId::Cut(outer) {
        return Err(RuleViolation::NotADoubleCut { outer, inner });
    }

    let between: Vec<ElementId> = graph
        .direct_contents(ContextId::Cut(outer))
        .iter()
        .copied()
        .filter(|e| *e != ElementId::Cut(inner))
        .collect();
    if !between.is_empty() {
        return Err(RuleViolation::NonEmptyBetweenCuts {
            outer,
            elements: between,
        });
    }

    let mut changes = GraphDelta::new();
    for element in graph.direct_contents(ContextId::Cut(inner)) {
        changes.reassign(*element, parent);
    }
    changes.remove(outer).remove(inner);

    let removed = BTreeSet::from([ElementId::Cut(outer), ElementId::Cut(inner)]);
    Ok(RuleDelta::new(RuleKind::DoubleCutRemoval, changes).with_removed(removed))
}
