//! Erasure - remove any subgraph from a positive context.

use peirce_context::ContextResolver;
use peirce_core::{EdgeId, ElementId, VertexId};
use peirce_graph::Graph;
use peirce_subgraph::Subgraph;
use std::collections::BTreeSet;

use crate::error::{RuleViolation, ViolationResult};
use crate::params::RuleKind;
use crate::result::RuleDelta;
use crate::validation::{
    check_polarity, removal_delta, require_closed, require_well_formed, PolarityRequirement,
};

/// Validate erasure of `subgraph`.
///
/// Vertices sitting directly in the root that edges outside the subgraph still
/// use are left in place: erasing the edges around an identity line keeps the line.
/// A kept vertex must be there for one of the selected edges; selecting a used
/// vertex on its own is not closed.
pub fn validate_erasure(
    resolver: &ContextResolver<'_>,
    subgraph: &Subgraph,
) -> ViolationResult<RuleDelta> {
    require_well_formed(resolver, subgraph)?;
    check_polarity(resolver, subgraph.root, PolarityRequirement::Positive)?;

    let graph = resolver.graph();
    let kept: BTreeSet<VertexId> = subgraph
        .external_references(graph)
        .into_iter()
        .map(|(vertex, _)| vertex)
        .filter(|vertex| graph.context_of(*vertex) == Some(subgraph.root))
        .collect();
    require_closed(graph, subgraph, &kept)?;
    require_kept_for_edges(graph, subgraph, &kept)?;

    let removed: BTreeSet<ElementId> = subgraph
        .interior_elements(graph)
        .into_iter()
        .filter(|e| e.as_vertex().map_or(true, |v| !kept.contains(&v)))
        .collect();
    let changes = removal_delta(&removed);
    Ok(RuleDelta::new(RuleKind::Erasure, changes).with_removed(removed))
}

fn require_kept_for_edges(
    graph: &Graph,
    subgraph: &Subgraph,
    kept: &BTreeSet<VertexId>,
) -> ViolationResult<()> {
    for vertex in kept {
        let carried = subgraph.edges.iter().any(|edge| {
            graph
                .incident_vertices(*edge)
                .is_some_and(|args| args.contains(vertex))
        });
        if !carried {
            let edges: Vec<EdgeId> = graph
                .incident_edges(*vertex)
                .filter(|edge| !subgraph.edges.contains(edge))
                .collect();
            return Err(RuleViolation::SubgraphNotClosed {
                vertex: *vertex,
                edges,
            });
        }
    }
    Ok(())
}
