//! Element correspondences built up during pattern matching.

use peirce_core::{ContextId, CutId, EdgeId, VertexId};
use peirce_subgraph::Subgraph;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// A partial mapping from base elements to copy elements.
///
/// Every map is injective: the `used_*` sets record which copy elements are
/// already taken.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    contexts: HashMap<ContextId, ContextId>,
    vertices: BTreeMap<VertexId, VertexId>,
    edges: BTreeMap<EdgeId, EdgeId>,
    used_vertices: HashSet<VertexId>,
    used_edges: HashSet<EdgeId>,
    used_cuts: HashSet<CutId>,
}

impl Bindings {
    /// Bindings that map one root context onto another.
    pub fn rooted(base: ContextId, copy: ContextId) -> Self {
        let mut bindings = Self::default();
        bindings.contexts.insert(base, copy);
        bindings
    }

    pub fn context(&self, base: ContextId) -> Option<ContextId> {
        self.contexts.get(&base).copied()
    }

    pub fn vertex(&self, base: VertexId) -> Option<VertexId> {
        self.vertices.get(&base).copied()
    }

    pub fn edge(&self, base: EdgeId) -> Option<EdgeId> {
        self.edges.get(&base).copied()
    }

    pub fn is_vertex_used(&self, copy: VertexId) -> bool {
        self.used_vertices.contains(&copy)
    }

    pub fn is_edge_used(&self, copy: EdgeId) -> bool {
        self.used_edges.contains(&copy)
    }

    pub fn is_cut_used(&self, copy: CutId) -> bool {
        self.used_cuts.contains(&copy)
    }

    pub fn bind_cut(&mut self, base: CutId, copy: CutId) {
        self.contexts
            .insert(ContextId::Cut(base), ContextId::Cut(copy));
        self.used_cuts.insert(copy);
    }

    pub fn bind_vertex(&mut self, base: VertexId, copy: VertexId) {
        self.vertices.insert(base, copy);
        self.used_vertices.insert(copy);
    }

    pub fn bind_edge(&mut self, base: EdgeId, copy: EdgeId) {
        self.edges.insert(base, copy);
        self.used_edges.insert(copy);
    }

    /// Base vertex to copy vertex.
    pub fn vertex_map(&self) -> &BTreeMap<VertexId, VertexId> {
        &self.vertices
    }

    /// Vertices mapped onto themselves: identity lines both sides share.
    pub fn shared_vertices(&self) -> BTreeSet<VertexId> {
        self.vertices
            .iter()
            .filter(|(base, copy)| base == copy)
            .map(|(base, _)| *base)
            .collect()
    }

    /// The copy side of the mapping as a subgraph under `root`.
    pub fn image(&self, root: ContextId) -> Subgraph {
        Subgraph {
            vertices: self.used_vertices.iter().copied().collect(),
            edges: self.used_edges.iter().copied().collect(),
            cuts: self.used_cuts.iter().copied().collect(),
            root,
        }
    }
}
