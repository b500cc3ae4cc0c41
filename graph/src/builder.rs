//! Incremental construction surface for graphs.

use crate::graph::{Graph, GraphParts, IdAllocator};
use peirce_core::{ContextId, CutId, EdgeId, ElementId, GraphResult, Vertex, VertexId};

/// Collects elements with freshly allocated ids, then validates once in `build`.
///
/// Placing something in a context that was never created is not caught until
/// `build`, which reports it as `MalformedGraph::UnknownContext`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    parts: GraphParts,
    ids: IdAllocator,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cut inside `parent`.
    pub fn cut(&mut self, parent: impl Into<ContextId>) -> CutId {
        let id = self.ids.cut();
        self.parts.cuts.insert(id);
        self.place(id.into(), parent.into());
        id
    }

    /// Add an unlabelled generic vertex.
    pub fn vertex(&mut self, context: impl Into<ContextId>) -> VertexId {
        let id = self.ids.vertex();
        self.insert_vertex(Vertex::generic(id), context.into())
    }

    /// Add a generic vertex carrying its variable name.
    pub fn generic_vertex(
        &mut self,
        context: impl Into<ContextId>,
        label: impl Into<String>,
    ) -> VertexId {
        let id = self.ids.vertex();
        self.insert_vertex(Vertex::named_generic(id, label), context.into())
    }

    /// Add a constant vertex.
    pub fn constant_vertex(
        &mut self,
        context: impl Into<ContextId>,
        label: impl Into<String>,
    ) -> VertexId {
        let id = self.ids.vertex();
        self.insert_vertex(Vertex::constant(id, label), context.into())
    }

    /// Add an edge over `args` in the given order.
    pub fn edge(
        &mut self,
        context: impl Into<ContextId>,
        relation: impl Into<String>,
        args: &[VertexId],
    ) -> EdgeId {
        let id = self.ids.edge();
        self.parts.incidence.insert(id, args.to_vec());
        self.parts.relations.insert(id, relation.into());
        self.place(id.into(), context.into());
        id
    }

    /// Validate and produce the graph.
    pub fn build(self) -> GraphResult<Graph> {
        Graph::from_parts(self.parts)
    }

    fn insert_vertex(&mut self, vertex: Vertex, context: ContextId) -> VertexId {
        let id = vertex.id;
        self.parts.vertices.insert(id, vertex);
        self.place(id.into(), context);
        id
    }

    fn place(&mut self, element: ElementId, context: ContextId) {
        self.parts.areas.entry(context).or_default().insert(element);
    }
}
