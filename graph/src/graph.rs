//! Immutable existential graph values.

use crate::delta::GraphDelta;
use crate::index::{IncidenceIndex, ParentIndex};
use crate::validate::{validate, Maps};
use peirce_core::{
    ContextId, CutId, EdgeId, ElementId, GraphResult, MalformedGraph, Vertex, VertexId,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};

static EMPTY_AREA: BTreeSet<ElementId> = BTreeSet::new();

/// Fresh id source for vertices, edges and cuts.
///
/// Carried along a graph's history; ids only ever grow, so an id that once
/// existed is never handed out again, even after its element was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next_vertex: u64,
    next_edge: u64,
    next_cut: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next_vertex: 1,
            next_edge: 1,
            next_cut: 1,
        }
    }

    pub fn vertex(&mut self) -> VertexId {
        let id = VertexId::new(self.next_vertex);
        self.next_vertex += 1;
        id
    }

    pub fn edge(&mut self) -> EdgeId {
        let id = EdgeId::new(self.next_edge);
        self.next_edge += 1;
        id
    }

    pub fn cut(&mut self) -> CutId {
        let id = CutId::new(self.next_cut);
        self.next_cut += 1;
        id
    }

    /// Make sure `element` will never be allocated again.
    pub fn observe(&mut self, element: ElementId) {
        match element {
            ElementId::Vertex(id) => self.next_vertex = self.next_vertex.max(id.raw() + 1),
            ElementId::Edge(id) => self.next_edge = self.next_edge.max(id.raw() + 1),
            ElementId::Cut(id) => self.next_cut = self.next_cut.max(id.raw() + 1),
        }
    }
}

/// The raw maps a graph is made of, for construction and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphParts {
    pub vertices: BTreeMap<VertexId, Vertex>,
    /// ν: ordered argument tuple of each edge.
    pub incidence: BTreeMap<EdgeId, Vec<VertexId>>,
    pub relations: BTreeMap<EdgeId, String>,
    pub cuts: BTreeSet<CutId>,
    /// Direct contents of the sheet and of each cut.
    pub areas: BTreeMap<ContextId, BTreeSet<ElementId>>,
}

/// Borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView<'g> {
    pub id: EdgeId,
    pub relation: &'g str,
    pub args: &'g [VertexId],
}

impl EdgeView<'_> {
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn to_edge(&self) -> peirce_core::Edge {
        peirce_core::Edge::new(self.id, self.relation, self.args.to_vec())
    }
}

/// Which primary maps two graph values physically share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sharing {
    pub vertices: bool,
    pub incidence: bool,
    pub relations: bool,
    pub cuts: bool,
    pub areas: bool,
}

/// An existential graph.
///
/// Values are immutable. Every map sits behind an `Arc`, so `clone` is cheap and
/// `with_changes` copies only the maps a delta actually touches.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Arc<BTreeMap<VertexId, Vertex>>,
    incidence: Arc<BTreeMap<EdgeId, Vec<VertexId>>>,
    relations: Arc<BTreeMap<EdgeId, String>>,
    cuts: Arc<BTreeSet<CutId>>,
    areas: Arc<BTreeMap<ContextId, BTreeSet<ElementId>>>,
    parents: Arc<ParentIndex>,
    incident: Arc<IncidenceIndex>,
    ids: IdAllocator,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.incidence == other.incidence
            && self.relations == other.relations
            && self.cuts == other.cuts
            && self.areas == other.areas
    }
}

impl Eq for Graph {}

impl Graph {
    /// Create a graph holding nothing but an empty sheet.
    pub fn new() -> Self {
        let mut areas = BTreeMap::new();
        areas.insert(ContextId::Sheet, BTreeSet::new());
        Self {
            vertices: Arc::default(),
            incidence: Arc::default(),
            relations: Arc::default(),
            cuts: Arc::default(),
            areas: Arc::new(areas),
            parents: Arc::default(),
            incident: Arc::default(),
            ids: IdAllocator::new(),
        }
    }

    /// Build a graph from raw maps, checking every structural invariant.
    ///
    /// Missing area entries for the sheet and for declared cuts are filled in as
    /// empty areas.
    pub fn from_parts(parts: GraphParts) -> GraphResult<Self> {
        let GraphParts {
            vertices,
            incidence,
            relations,
            cuts,
            mut areas,
        } = parts;

        areas.entry(ContextId::Sheet).or_default();
        for cut in &cuts {
            areas.entry(ContextId::Cut(*cut)).or_default();
        }

        let parents = validate(&Maps {
            vertices: &vertices,
            incidence: &incidence,
            relations: &relations,
            cuts: &cuts,
            areas: &areas,
        })?;

        let mut ids = IdAllocator::new();
        for element in parents.iter().map(|(element, _)| element) {
            ids.observe(element);
        }

        Ok(Self {
            incident: Arc::new(IncidenceIndex::from_incidence(&incidence)),
            vertices: Arc::new(vertices),
            incidence: Arc::new(incidence),
            relations: Arc::new(relations),
            cuts: Arc::new(cuts),
            areas: Arc::new(areas),
            parents: Arc::new(parents),
            ids,
        })
    }

    /// Copy the primary maps out.
    pub fn to_parts(&self) -> GraphParts {
        GraphParts {
            vertices: (*self.vertices).clone(),
            incidence: (*self.incidence).clone(),
            relations: (*self.relations).clone(),
            cuts: (*self.cuts).clone(),
            areas: (*self.areas).clone(),
        }
    }

    // ==================== Queries ====================

    /// Get the context directly containing an element.
    pub fn context_of(&self, element: impl Into<ElementId>) -> Option<ContextId> {
        self.parents.get(element.into())
    }

    /// Get the context a cut lives in. The sheet has no parent.
    pub fn parent_of(&self, context: ContextId) -> Option<ContextId> {
        context.as_element().and_then(|e| self.parents.get(e))
    }

    /// Direct contents of a context; empty for unknown contexts.
    pub fn direct_contents(&self, context: ContextId) -> &BTreeSet<ElementId> {
        self.areas.get(&context).unwrap_or(&EMPTY_AREA)
    }

    pub fn has_context(&self, context: ContextId) -> bool {
        self.areas.contains_key(&context)
    }

    /// Check if an element exists in this graph.
    pub fn contains(&self, element: impl Into<ElementId>) -> bool {
        match element.into() {
            ElementId::Vertex(id) => self.vertices.contains_key(&id),
            ElementId::Edge(id) => self.incidence.contains_key(&id),
            ElementId::Cut(id) => self.cuts.contains(&id),
        }
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Ordered argument tuple of an edge.
    pub fn incident_vertices(&self, edge: EdgeId) -> Option<&[VertexId]> {
        self.incidence.get(&edge).map(Vec::as_slice)
    }

    pub fn relation_name(&self, edge: EdgeId) -> Option<&str> {
        self.relations.get(&edge).map(String::as_str)
    }

    pub fn edge(&self, id: EdgeId) -> Option<EdgeView<'_>> {
        Some(EdgeView {
            id,
            relation: self.relation_name(id)?,
            args: self.incident_vertices(id)?,
        })
    }

    /// Edges naming `vertex` as an argument, in id order.
    pub fn incident_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incident.edges_of(vertex)
    }

    /// A vertex is isolated when no edge uses it.
    pub fn is_isolated(&self, vertex: VertexId) -> bool {
        !self.incident.is_referenced(vertex)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.incidence.keys().filter_map(|id| self.edge(*id))
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.incidence.keys().copied()
    }

    pub fn cut_ids(&self) -> impl Iterator<Item = CutId> + '_ {
        self.cuts.iter().copied()
    }

    /// The sheet followed by every cut context.
    pub fn contexts(&self) -> impl Iterator<Item = ContextId> + '_ {
        self.areas.keys().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn cut_count(&self) -> usize {
        self.cuts.len()
    }

    /// True when the sheet is blank.
    pub fn is_empty(&self) -> bool {
        self.direct_contents(ContextId::Sheet).is_empty()
    }

    /// The id allocator positioned after every id this graph's history used.
    pub fn allocator(&self) -> IdAllocator {
        self.ids
    }

    /// Report which primary maps are physically shared with `other`.
    pub fn sharing(&self, other: &Graph) -> Sharing {
        Sharing {
            vertices: Arc::ptr_eq(&self.vertices, &other.vertices),
            incidence: Arc::ptr_eq(&self.incidence, &other.incidence),
            relations: Arc::ptr_eq(&self.relations, &other.relations),
            cuts: Arc::ptr_eq(&self.cuts, &other.cuts),
            areas: Arc::ptr_eq(&self.areas, &other.areas),
        }
    }

    // ==================== Transformation ====================

    /// Produce a new graph value with `delta` applied.
    ///
    /// Order: new cut contexts, reassignments, removals, new vertices and edges.
    /// The result is re-validated in full; `self` is never modified.
    pub fn with_changes(&self, delta: &GraphDelta) -> GraphResult<Graph> {
        trace!(
            cuts = delta.added_cuts().len(),
            vertices = delta.added_vertices().len(),
            edges = delta.added_edges().len(),
            removed = delta.removed().len(),
            reassigned = delta.reassigned().len(),
            "applying graph delta"
        );

        if delta.is_empty() {
            return Ok(self.clone());
        }

        self.rebuild(delta).map_err(|err| {
            debug!(error = %err, "graph delta rejected");
            err
        })
    }

    fn rebuild(&self, delta: &GraphDelta) -> GraphResult<Graph> {
        let mut vertices = Arc::clone(&self.vertices);
        let mut incidence = Arc::clone(&self.incidence);
        let mut relations = Arc::clone(&self.relations);
        let mut cuts = Arc::clone(&self.cuts);
        let mut areas = Arc::clone(&self.areas);

        // Placements made earlier in this delta override the parent index.
        let mut moved: HashMap<ElementId, ContextId> = HashMap::new();

        // New cut contexts first, so later steps may place things inside them.
        for (cut, _) in delta.added_cuts() {
            if !Arc::make_mut(&mut cuts).insert(*cut) {
                return Err(MalformedGraph::DuplicateElement(ElementId::Cut(*cut)));
            }
            Arc::make_mut(&mut areas).insert(ContextId::Cut(*cut), BTreeSet::new());
        }
        for (cut, context) in delta.added_cuts() {
            place(&mut areas, ElementId::Cut(*cut), *context)?;
            moved.insert(ElementId::Cut(*cut), *context);
        }

        for (element, context) in delta.reassigned() {
            let current = self.locate(&moved, *element)?;
            take(&mut areas, *element, current);
            place(&mut areas, *element, *context)?;
            moved.insert(*element, *context);
        }

        // Detach everything before deleting, so a cut removed together with
        // its contents is empty by the time it goes.
        for element in delta.removed() {
            let current = self.locate(&moved, *element)?;
            take(&mut areas, *element, current);
        }
        for element in delta.removed() {
            match element {
                ElementId::Vertex(id) => {
                    Arc::make_mut(&mut vertices).remove(id);
                }
                ElementId::Edge(id) => {
                    Arc::make_mut(&mut incidence).remove(id);
                    Arc::make_mut(&mut relations).remove(id);
                }
                ElementId::Cut(id) => {
                    Arc::make_mut(&mut cuts).remove(id);
                    let area = Arc::make_mut(&mut areas).remove(&ContextId::Cut(*id));
                    if let Some(orphan) = area.and_then(|a| a.into_iter().next()) {
                        return Err(MalformedGraph::orphaned_contents(*id, orphan));
                    }
                }
            }
        }

        for (vertex, context) in delta.added_vertices() {
            if vertices.contains_key(&vertex.id) {
                return Err(MalformedGraph::DuplicateElement(vertex.id.into()));
            }
            Arc::make_mut(&mut vertices).insert(vertex.id, vertex.clone());
            place(&mut areas, vertex.id.into(), *context)?;
        }
        for (edge, context) in delta.added_edges() {
            if incidence.contains_key(&edge.id) {
                return Err(MalformedGraph::DuplicateElement(edge.id.into()));
            }
            Arc::make_mut(&mut incidence).insert(edge.id, edge.args.clone());
            Arc::make_mut(&mut relations).insert(edge.id, edge.relation.clone());
            place(&mut areas, edge.id.into(), *context)?;
        }

        let parents = validate(&Maps {
            vertices: &vertices,
            incidence: &incidence,
            relations: &relations,
            cuts: &cuts,
            areas: &areas,
        })?;

        let parents = if Arc::ptr_eq(&areas, &self.areas) {
            Arc::clone(&self.parents)
        } else {
            Arc::new(parents)
        };
        let incident = if Arc::ptr_eq(&incidence, &self.incidence) {
            Arc::clone(&self.incident)
        } else {
            Arc::new(self.updated_incident(delta))
        };

        let mut ids = self.ids;
        for element in delta.added_elements() {
            ids.observe(element);
        }

        Ok(Graph {
            vertices,
            incidence,
            relations,
            cuts,
            areas,
            parents,
            incident,
            ids,
        })
    }

    /// The incident-edge index after `delta`, patched rather than rebuilt.
    fn updated_incident(&self, delta: &GraphDelta) -> IncidenceIndex {
        let mut incident = IncidenceIndex::clone(&self.incident);
        for edge in delta.removed().iter().filter_map(ElementId::as_edge) {
            if let Some(args) = self.incidence.get(&edge) {
                incident.remove(edge, args);
            }
        }
        for (edge, _) in delta.added_edges() {
            incident.insert(edge.id, &edge.args);
        }
        incident
    }

    fn locate(
        &self,
        moved: &HashMap<ElementId, ContextId>,
        element: ElementId,
    ) -> GraphResult<ContextId> {
        moved
            .get(&element)
            .copied()
            .or_else(|| self.parents.get(element))
            .ok_or(MalformedGraph::UnknownElement(element))
    }
}

fn place(
    areas: &mut Arc<BTreeMap<ContextId, BTreeSet<ElementId>>>,
    element: ElementId,
    context: ContextId,
) -> GraphResult<()> {
    let area = Arc::make_mut(areas)
        .get_mut(&context)
        .ok_or(MalformedGraph::UnknownContext(context))?;
    if !area.insert(element) {
        return Err(MalformedGraph::DuplicateElement(element));
    }
    Ok(())
}

fn take(
    areas: &mut Arc<BTreeMap<ContextId, BTreeSet<ElementId>>>,
    element: ElementId,
    context: ContextId,
) {
    if let Some(area) = Arc::make_mut(areas).get_mut(&context) {
        area.remove(&element);
    }
}
