//! Structural invariant checks shared by construction and `with_changes`.

use crate::index::ParentIndex;
use peirce_core::{
    is_valid_label, is_valid_relation_name, ContextId, CutId, EdgeId, ElementId, GraphResult,
    MalformedGraph, Vertex, VertexId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Borrowed view of the primary maps of a graph under construction.
pub(crate) struct Maps<'a> {
    pub vertices: &'a BTreeMap<VertexId, Vertex>,
    pub incidence: &'a BTreeMap<EdgeId, Vec<VertexId>>,
    pub relations: &'a BTreeMap<EdgeId, String>,
    pub cuts: &'a BTreeSet<CutId>,
    pub areas: &'a BTreeMap<ContextId, BTreeSet<ElementId>>,
}

/// Check every structural invariant and return the parent index on success.
pub(crate) fn validate(maps: &Maps<'_>) -> GraphResult<ParentIndex> {
    check_contexts(maps)?;
    let parents = ParentIndex::from_areas(maps.areas)?;
    check_members_exist(maps)?;
    check_everything_placed(maps, &parents)?;
    check_vertices(maps)?;
    check_edges(maps)?;
    check_acyclic(maps, &parents)?;
    Ok(parents)
}

fn check_contexts(maps: &Maps<'_>) -> GraphResult<()> {
    for context in maps.areas.keys() {
        if let ContextId::Cut(cut) = context {
            if !maps.cuts.contains(cut) {
                return Err(MalformedGraph::UnknownContext(*context));
            }
        }
    }
    Ok(())
}

fn exists(maps: &Maps<'_>, element: ElementId) -> bool {
    match element {
        ElementId::Vertex(id) => maps.vertices.contains_key(&id),
        ElementId::Edge(id) => maps.incidence.contains_key(&id),
        ElementId::Cut(id) => maps.cuts.contains(&id),
    }
}

fn check_members_exist(maps: &Maps<'_>) -> GraphResult<()> {
    for element in maps.areas.values().flatten() {
        if !exists(maps, *element) {
            return Err(MalformedGraph::UnknownElement(*element));
        }
    }
    Ok(())
}

fn check_everything_placed(maps: &Maps<'_>, parents: &ParentIndex) -> GraphResult<()> {
    let all = maps
        .vertices
        .keys()
        .map(|id| ElementId::Vertex(*id))
        .chain(maps.incidence.keys().map(|id| ElementId::Edge(*id)))
        .chain(maps.cuts.iter().map(|id| ElementId::Cut(*id)));

    for element in all {
        if parents.get(element).is_none() {
            return Err(MalformedGraph::ElementWithoutContext(element));
        }
    }
    Ok(())
}

fn check_vertices(maps: &Maps<'_>) -> GraphResult<()> {
    for (id, vertex) in maps.vertices {
        if vertex.id != *id {
            return Err(MalformedGraph::UnknownElement(ElementId::Vertex(vertex.id)));
        }
        match vertex.label() {
            Some(label) if !is_valid_label(label) => {
                return Err(MalformedGraph::invalid_label(*id, label));
            }
            None if vertex.is_constant() => {
                return Err(MalformedGraph::ConstantWithoutLabel(*id));
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_edges(maps: &Maps<'_>) -> GraphResult<()> {
    for edge in maps.relations.keys() {
        if !maps.incidence.contains_key(edge) {
            return Err(MalformedGraph::UnknownElement(ElementId::Edge(*edge)));
        }
    }

    for (edge, args) in maps.incidence {
        let name = maps
            .relations
            .get(edge)
            .ok_or(MalformedGraph::MissingRelationName(*edge))?;
        if !is_valid_relation_name(name) {
            return Err(MalformedGraph::invalid_relation_name(*edge, name.as_str()));
        }
        if let Some(missing) = args.iter().find(|v| !maps.vertices.contains_key(v)) {
            return Err(MalformedGraph::dangling_argument(*edge, *missing));
        }
    }
    Ok(())
}

/// Every cut must reach the sheet by following parents.
fn check_acyclic(maps: &Maps<'_>, parents: &ParentIndex) -> GraphResult<()> {
    let mut rooted: BTreeSet<CutId> = BTreeSet::new();

    for start in maps.cuts {
        let mut path = Vec::new();
        let mut current = *start;
        loop {
            if rooted.contains(&current) {
                break;
            }
            if path.contains(&current) {
                return Err(MalformedGraph::ContextCycle(*start));
            }
            path.push(current);
            match parents.get(ElementId::Cut(current)) {
                Some(ContextId::Cut(parent)) => current = parent,
                Some(ContextId::Sheet) => break,
                None => return Err(MalformedGraph::ElementWithoutContext(current.into())),
            }
        }
        rooted.extend(path);
    }
    Ok(())
}
