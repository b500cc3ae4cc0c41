//! Caller-built descriptions of new graph content.
//!
//! A [`Fragment`] names its own cuts and vertices by local keys, and may refer to
//! vertices that already exist in the host graph. Materializing it allocates
//! fresh ids and yields the [`GraphDelta`] that adds it under a target context.

use crate::error::{PatternError, PatternResult};
use peirce_core::{ContextId, CutId, Edge, ElementId, Vertex, VertexId, VertexKind};
use peirce_graph::{Graph, GraphDelta, IdAllocator};
use peirce_subgraph::{Subgraph, SubgraphError};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Key of a vertex declared by a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalVertex(usize);

/// Key of a cut declared by a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalCut(usize);

/// Where a fragment element goes: the target context, or one of its own cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Target,
    Cut(LocalCut),
}

impl From<LocalCut> for Placement {
    fn from(cut: LocalCut) -> Self {
        Placement::Cut(cut)
    }
}

/// An edge argument inside a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentArg {
    Local(LocalVertex),
    /// A vertex of the host graph; the fragment references it without owning it.
    Existing(VertexId),
}

impl From<LocalVertex> for FragmentArg {
    fn from(vertex: LocalVertex) -> Self {
        FragmentArg::Local(vertex)
    }
}

impl From<VertexId> for FragmentArg {
    fn from(vertex: VertexId) -> Self {
        FragmentArg::Existing(vertex)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FragmentVertex {
    label: Option<String>,
    kind: VertexKind,
    placement: Placement,
}

#[derive(Debug, Clone, PartialEq)]
struct FragmentEdge {
    relation: String,
    args: Vec<FragmentArg>,
    placement: Placement,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    cuts: Vec<Placement>,
    vertices: Vec<FragmentVertex>,
    edges: Vec<FragmentEdge>,
}

/// The outcome of materializing a fragment.
#[derive(Debug, Clone)]
pub struct Materialized {
    pub delta: GraphDelta,
    /// The new elements as a subgraph rooted at the target, existing vertices
    /// included as boundary vertices.
    pub created: Subgraph,
    vertices: Vec<VertexId>,
    cuts: Vec<CutId>,
}

impl Materialized {
    /// Id given to a local vertex.
    pub fn vertex(&self, local: LocalVertex) -> Option<VertexId> {
        self.vertices.get(local.0).copied()
    }

    /// Id given to a local cut.
    pub fn cut(&self, local: LocalCut) -> Option<CutId> {
        self.cuts.get(local.0).copied()
    }
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cut(&mut self, placement: impl Into<Placement>) -> LocalCut {
        self.cuts.push(placement.into());
        LocalCut(self.cuts.len() - 1)
    }

    pub fn vertex(&mut self, placement: impl Into<Placement>) -> LocalVertex {
        self.push_vertex(None, VertexKind::Generic, placement.into())
    }

    pub fn generic_vertex(
        &mut self,
        placement: impl Into<Placement>,
        label: impl Into<String>,
    ) -> LocalVertex {
        self.push_vertex(Some(label.into()), VertexKind::Generic, placement.into())
    }

    pub fn constant_vertex(
        &mut self,
        placement: impl Into<Placement>,
        label: impl Into<String>,
    ) -> LocalVertex {
        self.push_vertex(Some(label.into()), VertexKind::Constant, placement.into())
    }

    pub fn edge(
        &mut self,
        placement: impl Into<Placement>,
        relation: impl Into<String>,
        args: &[FragmentArg],
    ) {
        self.edges.push(FragmentEdge {
            relation: relation.into(),
            args: args.to_vec(),
            placement: placement.into(),
        });
    }

    fn push_vertex(
        &mut self,
        label: Option<String>,
        kind: VertexKind,
        placement: Placement,
    ) -> LocalVertex {
        self.vertices.push(FragmentVertex {
            label,
            kind,
            placement,
        });
        LocalVertex(self.vertices.len() - 1)
    }

    /// Host vertices the fragment's edges refer to.
    pub fn existing_vertices(&self) -> BTreeSet<VertexId> {
        self.edges
            .iter()
            .flat_map(|edge| edge.args.iter())
            .filter_map(|arg| match arg {
                FragmentArg::Existing(id) => Some(*id),
                FragmentArg::Local(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cuts.len() + self.vertices.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every local key resolves and cuts are declared parent first.
    pub fn validate(&self) -> PatternResult<()> {
        for (index, placement) in self.cuts.iter().enumerate() {
            if let Placement::Cut(LocalCut(parent)) = placement {
                if *parent >= index {
                    return Err(PatternError::CutOrder { cut: index, parent: *parent });
                }
            }
        }

        let placements = self
            .vertices
            .iter()
            .map(|v| v.placement)
            .chain(self.edges.iter().map(|e| e.placement));
        for placement in placements {
            if let Placement::Cut(LocalCut(index)) = placement {
                if index >= self.cuts.len() {
                    return Err(PatternError::UnknownLocalCut { index });
                }
            }
        }

        for arg in self.edges.iter().flat_map(|e| e.args.iter()) {
            if let FragmentArg::Local(LocalVertex(index)) = arg {
                if *index >= self.vertices.len() {
                    return Err(PatternError::UnknownLocalVertex { index: *index });
                }
            }
        }
        Ok(())
    }

    /// Describe the interior of a subgraph as a fragment.
    ///
    /// Interior cuts and vertices become local; boundary vertices stay
    /// referenced by id. The subgraph root becomes the fragment's target.
    pub fn from_subgraph(graph: &Graph, subgraph: &Subgraph) -> PatternResult<Self> {
        let mut fragment = Fragment::new();
        let root = subgraph.root;

        let mut cuts: BTreeMap<CutId, LocalCut> = BTreeMap::new();
        let mut queue = VecDeque::from([root]);
        while let Some(context) = queue.pop_front() {
            let placement = placement_in(&cuts, root, context)?;
            for element in graph.direct_contents(context) {
                if let ElementId::Cut(cut) = element {
                    if subgraph.cuts.contains(cut) {
                        cuts.insert(*cut, fragment.cut(placement));
                        queue.push_back(ContextId::Cut(*cut));
                    }
                }
            }
        }

        let boundary = subgraph.boundary_vertices(graph);
        let mut vertices: BTreeMap<VertexId, LocalVertex> = BTreeMap::new();
        for id in subgraph.vertices.difference(&boundary) {
            let vertex = graph
                .vertex(*id)
                .ok_or(SubgraphError::UnknownElement(ElementId::Vertex(*id)))?;
            let context = context_of(graph, *id)?;
            let placement = placement_in(&cuts, root, context)?;
            let local = fragment.push_vertex(vertex.label.clone(), vertex.kind, placement);
            vertices.insert(*id, local);
        }

        for id in &subgraph.edges {
            let edge = graph
                .edge(*id)
                .ok_or(SubgraphError::UnknownElement(ElementId::Edge(*id)))?;
            let placement = placement_in(&cuts, root, context_of(graph, *id)?)?;
            let args: Vec<FragmentArg> = edge
                .args
                .iter()
                .map(|v| match vertices.get(v) {
                    Some(local) => FragmentArg::Local(*local),
                    None => FragmentArg::Existing(*v),
                })
                .collect();
            fragment.edge(placement, edge.relation, &args);
        }

        Ok(fragment)
    }

    /// Allocate fresh ids and describe the additions under `target`.
    pub fn materialize(
        &self,
        target: ContextId,
        ids: &mut IdAllocator,
    ) -> PatternResult<Materialized> {
        self.validate()?;

        let mut delta = GraphDelta::new();
        let mut created = Subgraph::new(target);

        let cuts: Vec<CutId> = self.cuts.iter().map(|_| ids.cut()).collect();
        let resolve = |placement: Placement| match placement {
            Placement::Target => target,
            Placement::Cut(LocalCut(index)) => ContextId::Cut(cuts[index]),
        };

        for (cut, placement) in cuts.iter().zip(&self.cuts) {
            delta.add_cut(*cut, resolve(*placement));
            created.cuts.insert(*cut);
        }

        let mut vertices = Vec::with_capacity(self.vertices.len());
        for planned in &self.vertices {
            let id = ids.vertex();
            let vertex = Vertex {
                id,
                label: planned.label.clone(),
                kind: planned.kind,
            };
            delta.add_vertex(vertex, resolve(planned.placement));
            created.vertices.insert(id);
            vertices.push(id);
        }

        for planned in &self.edges {
            let args: Vec<VertexId> = planned
                .args
                .iter()
                .map(|arg| match arg {
                    FragmentArg::Local(LocalVertex(index)) => vertices[*index],
                    FragmentArg::Existing(id) => *id,
                })
                .collect();
            created.vertices.extend(args.iter().copied());
            let edge = Edge::new(ids.edge(), planned.relation.clone(), args);
            created.edges.insert(edge.id);
            delta.add_edge(edge, resolve(planned.placement));
        }

        Ok(Materialized {
            delta,
            created,
            vertices,
            cuts,
        })
    }
}

fn context_of(graph: &Graph, element: impl Into<ElementId>) -> PatternResult<ContextId> {
    let element = element.into();
    Ok(graph
        .context_of(element)
        .ok_or(SubgraphError::UnknownElement(element))?)
}

fn placement_in(
    cuts: &BTreeMap<CutId, LocalCut>,
    root: ContextId,
    context: ContextId,
) -> PatternResult<Placement> {
    if context == root {
        return Ok(Placement::Target);
    }
    match context.as_cut() {
        Some(cut) => cuts
            .get(&cut)
            .map(|local| Placement::Cut(*local))
            .ok_or_else(|| SubgraphError::outside_root(cut, root).into()),
        None => Err(SubgraphError::UnknownRoot(context).into()),
    }
}
