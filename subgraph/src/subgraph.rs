//! The `Subgraph` selection value and its containment rules.

use crate::error::{SubgraphError, SubgraphResult};
use peirce_context::ContextResolver;
use peirce_core::{ContextId, CutId, EdgeId, ElementId, VertexId};
use peirce_graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A selection of elements under one root context (Dau, Def. 12.10).
///
/// Edges and cuts sit in the root or in an included cut. Vertices may also sit
/// in a strict ancestor of the root: those are *boundary vertices*, identity
/// lines that enter the selection from outside and are referenced rather than
/// owned by it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subgraph {
    pub vertices: BTreeSet<VertexId>,
    pub edges: BTreeSet<EdgeId>,
    pub cuts: BTreeSet<CutId>,
    pub root: ContextId,
}

impl Subgraph {
    /// An empty selection under `root`.
    pub fn new(root: ContextId) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    pub fn from_elements(root: ContextId, elements: impl IntoIterator<Item = ElementId>) -> Self {
        let mut subgraph = Self::new(root);
        for element in elements {
            subgraph.insert(element);
        }
        subgraph
    }

    /// Builder-style insert.
    pub fn with(mut self, element: impl Into<ElementId>) -> Self {
        self.insert(element.into());
        self
    }

    /// Insert an element; returns false if it was already included.
    pub fn insert(&mut self, element: ElementId) -> bool {
        match element {
            ElementId::Vertex(id) => self.vertices.insert(id),
            ElementId::Edge(id) => self.edges.insert(id),
            ElementId::Cut(id) => self.cuts.insert(id),
        }
    }

    pub fn contains(&self, element: impl Into<ElementId>) -> bool {
        match element.into() {
            ElementId::Vertex(id) => self.vertices.contains(&id),
            ElementId::Edge(id) => self.edges.contains(&id),
            ElementId::Cut(id) => self.cuts.contains(&id),
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.vertices
            .iter()
            .map(|id| ElementId::Vertex(*id))
            .chain(self.edges.iter().map(|id| ElementId::Edge(*id)))
            .chain(self.cuts.iter().map(|id| ElementId::Cut(*id)))
    }

    pub fn len(&self) -> usize {
        self.vertices.len() + self.edges.len() + self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for the root itself and for every included cut.
    pub fn owns_context(&self, context: ContextId) -> bool {
        match context {
            ContextId::Cut(cut) if self.cuts.contains(&cut) => true,
            other => other == self.root,
        }
    }

    /// True when `context` is one of the included cuts, i.e. strictly inside
    /// the selection rather than being its root.
    pub fn covers(&self, context: ContextId) -> bool {
        context.as_cut().is_some_and(|cut| self.cuts.contains(&cut))
    }

    /// Verify the containment rules against a graph.
    pub fn check(&self, resolver: &ContextResolver<'_>) -> SubgraphResult<()> {
        let graph = resolver.graph();
        if !graph.has_context(self.root) {
            return Err(SubgraphError::UnknownRoot(self.root));
        }
        if let Some(cut) = self.root.as_cut().filter(|c| self.cuts.contains(c)) {
            return Err(SubgraphError::outside_root(cut, self.root));
        }

        for element in self.elements() {
            let context = graph
                .context_of(element)
                .ok_or(SubgraphError::UnknownElement(element))?;
            if self.owns_context(context) {
                continue;
            }
            let boundary = element.is_vertex() && resolver.encloses(context, self.root)?;
            if !boundary {
                return Err(SubgraphError::outside_root(element, self.root));
            }
        }

        for cut in &self.cuts {
            if let Some(missing) = graph
                .direct_contents(ContextId::Cut(*cut))
                .iter()
                .find(|member| !self.contains(**member))
            {
                return Err(SubgraphError::incomplete_cut(*cut, *missing));
            }
        }

        for edge in &self.edges {
            let args = graph
                .incident_vertices(*edge)
                .ok_or(SubgraphError::UnknownElement(ElementId::Edge(*edge)))?;
            if let Some(vertex) = args.iter().find(|v| !self.vertices.contains(v)) {
                return Err(SubgraphError::missing_argument(*edge, *vertex));
            }
        }
        Ok(())
    }

    /// Included vertices living outside the root and every included cut.
    pub fn boundary_vertices(&self, graph: &Graph) -> BTreeSet<VertexId> {
        self.vertices
            .iter()
            .filter(|v| {
                graph
                    .context_of(**v)
                    .is_some_and(|context| !self.owns_context(context))
            })
            .copied()
            .collect()
    }

    /// Vertices owned by the selection.
    pub fn interior_vertices(&self, graph: &Graph) -> BTreeSet<VertexId> {
        let boundary = self.boundary_vertices(graph);
        self.vertices.difference(&boundary).copied().collect()
    }

    /// Everything except boundary vertices.
    pub fn interior_elements(&self, graph: &Graph) -> BTreeSet<ElementId> {
        let boundary = self.boundary_vertices(graph);
        self.elements()
            .filter(|e| e.as_vertex().map_or(true, |v| !boundary.contains(&v)))
            .collect()
    }

    /// Interior elements sitting directly in the root.
    pub fn top_level(&self, graph: &Graph) -> BTreeSet<ElementId> {
        self.elements()
            .filter(|e| graph.context_of(*e) == Some(self.root))
            .collect()
    }

    /// Interior vertices used by edges the selection does not include.
    pub fn external_references(&self, graph: &Graph) -> Vec<(VertexId, EdgeId)> {
        let mut found = Vec::new();
        for vertex in self.interior_vertices(graph) {
            for edge in graph.incident_edges(vertex) {
                if !self.edges.contains(&edge) {
                    found.push((vertex, edge));
                }
            }
        }
        found
    }

    /// A selection is closed when nothing outside it uses its interior vertices.
    pub fn is_closed(&self, graph: &Graph) -> bool {
        self.external_references(graph).is_empty()
    }

    /// Everything enclosed by `context`, plus the outside vertices its edges use.
    pub fn whole_area(resolver: &ContextResolver<'_>, context: ContextId) -> SubgraphResult<Self> {
        let graph = resolver.graph();
        let mut subgraph = Self::new(context);
        for area in std::iter::once(context).chain(resolver.descendants(context)?) {
            for element in graph.direct_contents(area) {
                subgraph.insert(*element);
            }
        }
        let args: Vec<VertexId> = subgraph
            .edges
            .iter()
            .filter_map(|e| graph.incident_vertices(*e))
            .flatten()
            .copied()
            .collect();
        subgraph.vertices.extend(args);
        subgraph.check(resolver)?;
        Ok(subgraph)
    }
}
