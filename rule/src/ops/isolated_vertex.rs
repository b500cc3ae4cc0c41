//! Isolated vertex addition and removal. Polarity plays no part in either.

use peirce_context::ContextResolver;
use peirce_core::{ContextId, EdgeId, ElementId, Vertex, VertexId};
use peirce_graph::GraphDelta;
use peirce_subgraph::Subgraph;
use std::collections::BTreeSet;

use crate::error::{RuleViolation, ViolationResult};
use crate::params::{NewVertex, RuleKind};
use crate::result::RuleDelta;
use crate::validation::require_valid_names;

pub fn validate_isolated_vertex_addition(
    resolver: &ContextResolver<'_>,
    context: ContextId,
    vertex: &NewVertex,
) -> ViolationResult<RuleDelta> {
    resolver.depth(context)?;

    let id = resolver.graph().allocator().vertex();
    let mut changes = GraphDelta::new();
    changes.add_vertex(
        Vertex {
            id,
            label: vertex.label.clone(),
            kind: vertex.kind,
        },
        context,
    );
    require_valid_names(&changes)?;

    let created = Subgraph::new(context).with(id);
    Ok(RuleDelta::new(RuleKind::IsolatedVertexAddition, changes).with_created(created))
}

pub fn validate_isolated_vertex_removal(
    resolver: &ContextResolver<'_>,
    vertex: VertexId,
) -> ViolationResult<RuleDelta> {
    let graph = resolver.graph();
    if graph.vertex(vertex).is_none() {
        return Err(RuleViolation::UnknownElement(ElementId::Vertex(vertex)));
    }
    let edges: Vec<EdgeId> = graph.incident_edges(vertex).collect();
    if !edges.is_empty() {
        return Err(RuleViolation::VertexNotIsolated { vertex, edges });
    }

    let mut changes = GraphDelta::new();
    changes.remove(vertex);
    let removed = BTreeSet::from([ElementId::Vertex(vertex)]);
    Ok(RuleDelta::new(RuleKind::IsolatedVertexRemoval, changes).with_removed(removed))
}
