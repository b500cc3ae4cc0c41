//! Two-phase subgraph closure from a seed selection.

use crate::error::{SubgraphError, SubgraphResult};
use crate::subgraph::Subgraph;
use peirce_context::ContextResolver;
use peirce_core::{ContextId, ElementId};
use peirce_graph::Graph;
use tracing::trace;

/// Widening rounds attempted before giving up on a seed selection.
pub const DEFAULT_MAX_CLOSURE_ROUNDS: usize = 32;

/// Grows a seed set into a subgraph that passes [`Subgraph::check`].
///
/// Phase one adds the immediate context of every seed. If that selection is
/// rejected, phase two adds the parent context of every element still sitting
/// in an unincluded cut, one level per round. Each round also closes downward:
/// included cuts bring their contents and included edges their arguments.
pub struct SubgraphExtractor<'g> {
    resolver: ContextResolver<'g>,
    root: ContextId,
    max_rounds: usize,
}

impl<'g> SubgraphExtractor<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            resolver: ContextResolver::new(graph),
            root: ContextId::Sheet,
            max_rounds: DEFAULT_MAX_CLOSURE_ROUNDS,
        }
    }

    pub fn with_root(mut self, root: ContextId) -> Self {
        self.root = root;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn extract(
        &self,
        seeds: impl IntoIterator<Item = ElementId>,
    ) -> SubgraphResult<Subgraph> {
        let graph = self.resolver.graph();
        if !graph.has_context(self.root) {
            return Err(SubgraphError::UnknownRoot(self.root));
        }

        let seeds: Vec<ElementId> = seeds.into_iter().collect();
        let mut subgraph = Subgraph::new(self.root);
        for seed in &seeds {
            if !graph.contains(*seed) {
                return Err(SubgraphError::UnknownElement(*seed));
            }
            subgraph.insert(*seed);
        }

        let mut immediate = Vec::with_capacity(seeds.len());
        for seed in &seeds {
            immediate.push(self.resolver.context_of(*seed)?);
        }
        self.include_contexts(&mut subgraph, immediate)?;
        self.close_downward(&mut subgraph);

        let mut last = match subgraph.check(&self.resolver) {
            Ok(()) => return Ok(subgraph),
            Err(err) => err,
        };

        for round in 1..=self.max_rounds {
            let added = self.widen(&mut subgraph)? + self.close_downward(&mut subgraph);
            trace!(round, added, size = subgraph.len(), "subgraph closure round");

            match subgraph.check(&self.resolver) {
                Ok(()) => return Ok(subgraph),
                Err(err) => last = err,
            }
            if added == 0 {
                return Err(SubgraphError::unclosable(round, last));
            }
        }
        Err(SubgraphError::unclosable(self.max_rounds, last))
    }

    /// Include each given context if it is a cut strictly inside the root.
    fn include_contexts(
        &self,
        subgraph: &mut Subgraph,
        contexts: impl IntoIterator<Item = ContextId>,
    ) -> SubgraphResult<usize> {
        let mut added = 0;
        for context in contexts {
            let Some(cut) = context.as_cut() else {
                continue;
            };
            if context == self.root || subgraph.cuts.contains(&cut) {
                continue;
            }
            if self.resolver.encloses(self.root, context)? && subgraph.insert(cut.into()) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// One level up: include the contexts of elements that sit in unincluded cuts.
    fn widen(&self, subgraph: &mut Subgraph) -> SubgraphResult<usize> {
        let graph = self.resolver.graph();
        let contexts: Vec<ContextId> = subgraph
            .elements()
            .filter_map(|element| graph.context_of(element))
            .filter(|context| !subgraph.owns_context(*context))
            .collect();
        self.include_contexts(subgraph, contexts)
    }

    /// Add cut contents and edge arguments until nothing changes.
    fn close_downward(&self, subgraph: &mut Subgraph) -> usize {
        let graph = self.resolver.graph();
        let mut added = 0;
        loop {
            let mut pending: Vec<ElementId> = Vec::new();
            for cut in &subgraph.cuts {
                pending.extend(graph.direct_contents(ContextId::Cut(*cut)).iter().copied());
            }
            for edge in &subgraph.edges {
                if let Some(args) = graph.incident_vertices(*edge) {
                    pending.extend(args.iter().map(|v| ElementId::Vertex(*v)));
                }
            }

            let before = added;
            for element in pending {
                if subgraph.insert(element) {
                    added += 1;
                }
            }
            if added == before {
                return added;
            }
        }
    }
}
