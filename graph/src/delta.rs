//! Structural deltas: the only input `Graph::with_changes` accepts.

use peirce_core::{ContextId, CutId, Edge, ElementId, Vertex};
use std::collections::BTreeSet;

/// A set of structural changes to apply to a graph value.
///
/// Application order is fixed: new cut contexts, reassignments, removals, then new
/// vertices and edges. The rebuilt graph is re-validated as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphDelta {
    added_cuts: Vec<(CutId, ContextId)>,
    added_vertices: Vec<(Vertex, ContextId)>,
    added_edges: Vec<(Edge, ContextId)>,
    removed: BTreeSet<ElementId>,
    reassigned: Vec<(ElementId, ContextId)>,
}

impl GraphDelta {
    /// Create an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new cut inside `context`.
    pub fn add_cut(&mut self, cut: CutId, context: ContextId) -> &mut Self {
        self.added_cuts.push((cut, context));
        self
    }

    /// Add a new vertex inside `context`.
    pub fn add_vertex(&mut self, vertex: Vertex, context: ContextId) -> &mut Self {
        self.added_vertices.push((vertex, context));
        self
    }

    /// Add a new edge inside `context`.
    pub fn add_edge(&mut self, edge: Edge, context: ContextId) -> &mut Self {
        self.added_edges.push((edge, context));
        self
    }

    /// Remove an existing element.
    pub fn remove(&mut self, element: impl Into<ElementId>) -> &mut Self {
        self.removed.insert(element.into());
        self
    }

    /// Move an existing element into another existing (or newly added) context.
    pub fn reassign(&mut self, element: impl Into<ElementId>, context: ContextId) -> &mut Self {
        self.reassigned.push((element.into(), context));
        self
    }

    pub fn added_cuts(&self) -> &[(CutId, ContextId)] {
        &self.added_cuts
    }

    pub fn added_vertices(&self) -> &[(Vertex, ContextId)] {
        &self.added_vertices
    }

    pub fn added_edges(&self) -> &[(Edge, ContextId)] {
        &self.added_edges
    }

    pub fn removed(&self) -> &BTreeSet<ElementId> {
        &self.removed
    }

    pub fn reassigned(&self) -> &[(ElementId, ContextId)] {
        &self.reassigned
    }

    /// Ids of every element this delta creates.
    pub fn added_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.added_cuts
            .iter()
            .map(|(c, _)| ElementId::Cut(*c))
            .chain(self.added_vertices.iter().map(|(v, _)| ElementId::Vertex(v.id)))
            .chain(self.added_edges.iter().map(|(e, _)| ElementId::Edge(e.id)))
    }

    /// Returns true if applying this delta changes nothing.
    pub fn is_empty(&self) -> bool {
        self.added_cuts.is_empty()
            && self.added_vertices.is_empty()
            && self.added_edges.is_empty()
            && self.removed.is_empty()
            && self.reassigned.is_empty()
    }

    /// Total number of individual changes.
    pub fn len(&self) -> usize {
        self.added_cuts.len()
            + self.added_vertices.len()
            + self.added_edges.len()
            + self.removed.len()
            + self.reassigned.len()
    }

    /// Append another delta's changes to this one.
    pub fn merge(&mut self, other: GraphDelta) {
        self.added_cuts.extend(other.added_cuts);
        self.added_vertices.extend(other.added_vertices);
        self.added_edges.extend(other.added_edges);
        self.removed.extend(other.removed);
        self.reassigned.extend(other.reassigned);
    }
}
