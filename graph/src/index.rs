//! Derived indexes for efficient graph lookups.
//!
//! The parent index is rebuilt from the area map whenever it changes. The
//! incidence index is patched edge by edge. Neither owns graph content; they
//! only answer "where is it" and "who uses it".

use peirce_core::{ContextId, EdgeId, ElementId, GraphResult, MalformedGraph, VertexId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Parent index: ElementId -> ContextId that directly contains it.
#[derive(Debug, Default, Clone)]
pub struct ParentIndex {
    index: HashMap<ElementId, ContextId>,
}

impl ParentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from an area map, rejecting elements listed twice.
    pub fn from_areas(areas: &BTreeMap<ContextId, BTreeSet<ElementId>>) -> GraphResult<Self> {
        let mut index = Self::new();
        for (context, members) in areas {
            for element in members {
                if let Some(first) = index.index.insert(*element, *context) {
                    return Err(MalformedGraph::element_in_multiple_contexts(
                        *element, first, *context,
                    ));
                }
            }
        }
        Ok(index)
    }

    pub fn get(&self, element: ElementId) -> Option<ContextId> {
        self.index.get(&element).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, ContextId)> + '_ {
        self.index.iter().map(|(e, c)| (*e, *c))
    }
}

/// Incidence index: VertexId -> Set<EdgeId> of edges naming it as an argument.
#[derive(Debug, Default, Clone)]
pub struct IncidenceIndex {
    index: HashMap<VertexId, BTreeSet<EdgeId>>,
}

impl IncidenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from the incidence map ν.
    pub fn from_incidence(incidence: &BTreeMap<EdgeId, Vec<VertexId>>) -> Self {
        let mut index = Self::new();
        for (edge, args) in incidence {
            index.insert(*edge, args);
        }
        index
    }

    pub fn insert(&mut self, edge_id: EdgeId, args: &[VertexId]) {
        for vertex in args {
            self.index.entry(*vertex).or_default().insert(edge_id);
        }
    }

    pub fn remove(&mut self, edge_id: EdgeId, args: &[VertexId]) {
        for vertex in args {
            if let Some(set) = self.index.get_mut(vertex) {
                set.remove(&edge_id);
                if set.is_empty() {
                    self.index.remove(vertex);
                }
            }
        }
    }

    /// Get all edges that take the vertex as an argument, in id order.
    pub fn edges_of(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.index
            .get(&vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn is_referenced(&self, vertex: VertexId) -> bool {
        self.index
            .get(&vertex)
            .map(|set| !set.is_empty())
            .unwrap_or(false)
    }
}
