//! Structural identity between subgraphs.
//!
//! Two selections are the same pattern when a bijection maps one onto the other
//! preserving cut nesting, relation names, arity, argument order and the
//! generic/constant pattern of vertices. Boundary vertices of the base must map
//! to themselves; so may base vertices living directly in the base root, which
//! is how a copy shares an identity line with its original.

use crate::binding::Bindings;
use crate::error::{PatternError, PatternResult};
use peirce_context::ContextResolver;
use peirce_core::{ContextId, CutId, EdgeId, ElementId, VertexId};
use peirce_graph::Graph;
use peirce_subgraph::Subgraph;
use rayon::prelude::*;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Knobs for the copy search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Scan candidate contexts with rayon.
    pub parallel: bool,
    /// Fewest candidate contexts that make a parallel scan worthwhile.
    pub parallel_threshold: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

/// Where copy-side candidates may come from.
#[derive(Clone, Copy)]
enum Host<'a> {
    /// Only from a given copy selection.
    Fixed(&'a Subgraph),
    /// From anywhere in the graph outside the base.
    Open,
}

/// The base side of a match, precomputed once.
///
/// Holds only shared references to the graph so it can be searched from
/// several threads at once.
struct Pattern<'a> {
    graph: &'a Graph,
    base: &'a Subgraph,
    boundary: BTreeSet<VertexId>,
    cut_order: Vec<CutId>,
    edge_order: Vec<EdgeId>,
    vertex_order: Vec<VertexId>,
}

#[derive(Clone, Copy)]
enum Step {
    Cut(CutId),
    Edge(EdgeId),
    Vertex(VertexId),
}

pub struct Matcher<'a> {
    resolver: &'a ContextResolver<'a>,
    pattern: Pattern<'a>,
    options: SearchOptions,
}

impl<'a> Matcher<'a> {
    /// Prepare a matcher for `base`, which must be a well-formed subgraph.
    pub fn new(resolver: &'a ContextResolver<'a>, base: &'a Subgraph) -> PatternResult<Self> {
        base.check(resolver)?;
        let graph = resolver.graph();

        let mut cut_order = Vec::with_capacity(base.cuts.len());
        let mut queue = VecDeque::from([base.root]);
        while let Some(context) = queue.pop_front() {
            for element in graph.direct_contents(context) {
                if let ElementId::Cut(cut) = element {
                    if base.cuts.contains(cut) {
                        cut_order.push(*cut);
                        queue.push_back(ContextId::Cut(*cut));
                    }
                }
            }
        }

        Ok(Self {
            resolver,
            pattern: Pattern {
                graph,
                base,
                boundary: base.boundary_vertices(graph),
                cut_order,
                edge_order: base.edges.iter().copied().collect(),
                vertex_order: base.vertices.iter().copied().collect(),
            },
            options: SearchOptions::default(),
        })
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Find the correspondence that makes `copy` an exact copy of the base.
    ///
    /// Fails with `PatternError::NotIdentical` when no such bijection exists.
    pub fn match_copy(&self, copy: &Subgraph) -> PatternResult<Bindings> {
        copy.check(self.resolver)?;
        let base = self.pattern.base;

        let counts = [
            ("cuts", base.cuts.len(), copy.cuts.len()),
            ("edges", base.edges.len(), copy.edges.len()),
            ("vertices", base.vertices.len(), copy.vertices.len()),
        ];
        for (kind, in_base, in_copy) in counts {
            if in_base != in_copy {
                return Err(PatternError::not_identical(format!(
                    "base has {} {}, copy has {}",
                    in_base, kind, in_copy
                )));
            }
        }

        let mut found = Vec::new();
        self.pattern.search(
            Host::Fixed(copy),
            0,
            Bindings::rooted(base.root, copy.root),
            &mut found,
            true,
        );
        found.into_iter().next().ok_or_else(|| {
            PatternError::not_identical("no consistent mapping of cuts, edges and vertices")
        })
    }

    /// Every copy of the base sitting in a context at or below the base root.
    ///
    /// Results are sorted by root and contents so the output does not depend on
    /// scan order.
    pub fn find_copies(&self) -> PatternResult<Vec<Subgraph>> {
        let base = self.pattern.base;
        if base.is_empty() {
            return Ok(Vec::new());
        }

        let mut roots = Vec::new();
        for context in self.pattern.graph.contexts() {
            if base.covers(context) {
                continue;
            }
            if self.resolver.nesting(context, base.root)?.is_same_or_deeper() {
                roots.push(context);
            }
        }

        let pattern = &self.pattern;
        let parallel = self.options.parallel && roots.len() >= self.options.parallel_threshold;
        let mut copies: Vec<Subgraph> = if parallel {
            roots
                .par_iter()
                .flat_map_iter(|root| pattern.copies_under(*root))
                .collect()
        } else {
            roots
                .iter()
                .flat_map(|root| pattern.copies_under(*root))
                .collect()
        };

        copies.sort_by(|a, b| {
            (a.root, &a.cuts, &a.edges, &a.vertices).cmp(&(b.root, &b.cuts, &b.edges, &b.vertices))
        });
        copies.dedup();
        debug!(
            candidates = roots.len(),
            copies = copies.len(),
            parallel,
            "copy search finished"
        );
        Ok(copies)
    }
}

impl Pattern<'_> {
    fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.cut_order
            .iter()
            .map(|c| Step::Cut(*c))
            .chain(self.edge_order.iter().map(|e| Step::Edge(*e)))
            .chain(self.vertex_order.iter().map(|v| Step::Vertex(*v)))
    }

    fn step(&self, index: usize) -> Option<Step> {
        self.steps().nth(index)
    }

    /// All distinct copies rooted exactly at `root`.
    fn copies_under(&self, root: ContextId) -> Vec<Subgraph> {
        let mut found = Vec::new();
        self.search(
            Host::Open,
            0,
            Bindings::rooted(self.base.root, root),
            &mut found,
            false,
        );
        let mut images: Vec<Subgraph> = Vec::new();
        for bindings in found {
            let image = bindings.image(root);
            if !images.contains(&image) {
                images.push(image);
            }
        }
        images
    }

    /// Depth-first backtracking over cuts, then edges, then leftover vertices.
    ///
    /// Returns true when the caller should stop searching.
    fn search(
        &self,
        host: Host<'_>,
        index: usize,
        bindings: Bindings,
        found: &mut Vec<Bindings>,
        first_only: bool,
    ) -> bool {
        let Some(step) = self.step(index) else {
            found.push(bindings);
            return first_only;
        };

        match step {
            Step::Cut(cut) => {
                for candidate in self.cut_candidates(host, cut, &bindings) {
                    let mut next = bindings.clone();
                    next.bind_cut(cut, candidate);
                    if self.search(host, index + 1, next, found, first_only) {
                        return true;
                    }
                }
                false
            }
            Step::Edge(edge) => {
                for next in self.edge_candidates(host, edge, &bindings) {
                    if self.search(host, index + 1, next, found, first_only) {
                        return true;
                    }
                }
                false
            }
            Step::Vertex(vertex) => {
                if bindings.vertex(vertex).is_some() {
                    return self.search(host, index + 1, bindings, found, first_only);
                }
                for candidate in self.vertex_candidates(host, vertex, &bindings) {
                    let mut next = bindings.clone();
                    next.bind_vertex(vertex, candidate);
                    if self.search(host, index + 1, next, found, first_only) {
                        return true;
                    }
                }
                false
            }
        }
    }

    fn image_of_context(&self, element: ElementId, bindings: &Bindings) -> Option<ContextId> {
        self.graph
            .context_of(element)
            .and_then(|context| bindings.context(context))
    }

    fn cut_candidates(&self, host: Host<'_>, cut: CutId, bindings: &Bindings) -> Vec<CutId> {
        let Some(area) = self.image_of_context(cut.into(), bindings) else {
            return Vec::new();
        };
        let signature = self.signature(ContextId::Cut(cut));
        self.graph
            .direct_contents(area)
            .iter()
            .filter_map(ElementId::as_cut)
            .filter(|candidate| !bindings.is_cut_used(*candidate))
            .filter(|candidate| match host {
                Host::Fixed(copy) => copy.cuts.contains(candidate),
                Host::Open => !self.base.cuts.contains(candidate),
            })
            .filter(|candidate| self.signature(ContextId::Cut(*candidate)) == signature)
            .collect()
    }

    /// Counts of vertices, edges and cuts directly inside a context.
    fn signature(&self, context: ContextId) -> (usize, usize, usize) {
        let contents = self.graph.direct_contents(context);
        (
            contents.iter().filter(|e| e.is_vertex()).count(),
            contents.iter().filter(|e| e.is_edge()).count(),
            contents.iter().filter(|e| e.is_cut()).count(),
        )
    }

    /// Every way of binding `edge` and its arguments on top of `bindings`.
    fn edge_candidates(&self, host: Host<'_>, edge: EdgeId, bindings: &Bindings) -> Vec<Bindings> {
        let (Some(area), Some(base_edge)) = (
            self.image_of_context(edge.into(), bindings),
            self.graph.edge(edge),
        ) else {
            return Vec::new();
        };

        let mut extended = Vec::new();
        for candidate in self.graph.direct_contents(area).iter().filter_map(ElementId::as_edge) {
            if bindings.is_edge_used(candidate) {
                continue;
            }
            let admitted = match host {
                Host::Fixed(copy) => copy.edges.contains(&candidate),
                Host::Open => !self.base.edges.contains(&candidate),
            };
            let Some(copy_edge) = self.graph.edge(candidate).filter(|_| admitted) else {
                continue;
            };
            if copy_edge.relation != base_edge.relation || copy_edge.arity() != base_edge.arity() {
                continue;
            }

            let mut next = bindings.clone();
            let consistent = base_edge.args.iter().zip(copy_edge.args).all(|(from, to)| {
                match next.vertex(*from) {
                    Some(bound) => bound == *to,
                    None if self.can_bind(host, *from, *to, &next) => {
                        next.bind_vertex(*from, *to);
                        true
                    }
                    None => false,
                }
            });
            if consistent {
                next.bind_edge(edge, candidate);
                extended.push(next);
            }
        }
        extended
    }

    fn vertex_candidates(
        &self,
        host: Host<'_>,
        vertex: VertexId,
        bindings: &Bindings,
    ) -> Vec<VertexId> {
        let mut pool: Vec<VertexId> = vec![vertex];
        if let Some(area) = self.image_of_context(vertex.into(), bindings) {
            pool.extend(
                self.graph
                    .direct_contents(area)
                    .iter()
                    .filter_map(ElementId::as_vertex)
                    .filter(|candidate| *candidate != vertex),
            );
        }
        pool.into_iter()
            .filter(|candidate| self.can_bind(host, vertex, *candidate, bindings))
            .collect()
    }

    fn can_bind(&self, host: Host<'_>, from: VertexId, to: VertexId, bindings: &Bindings) -> bool {
        if bindings.is_vertex_used(to) {
            return false;
        }
        let shared_allowed = match host {
            Host::Fixed(copy) => copy.vertices.contains(&to),
            Host::Open => true,
        };
        if self.boundary.contains(&from) {
            return from == to && shared_allowed;
        }

        let (Some(base_vertex), Some(copy_vertex)) = (self.graph.vertex(from), self.graph.vertex(to))
        else {
            return false;
        };
        if !base_vertex.same_pattern(copy_vertex) {
            return false;
        }

        let base_context = self.graph.context_of(from);
        if from == to {
            return shared_allowed && base_context == Some(self.base.root);
        }

        let admitted = match host {
            Host::Fixed(copy) => copy.vertices.contains(&to) && !self.base.vertices.contains(&to),
            Host::Open => !self.base.vertices.contains(&to),
        };
        admitted
            && base_context.is_some()
            && self.graph.context_of(to) == base_context.and_then(|c| bindings.context(c))
    }
}
