//! Depth, polarity and nesting queries over one graph value.

use crate::error::{ContextError, ContextResult};
use peirce_core::{ContextId, EdgeId, ElementId, VertexId};
use peirce_graph::Graph;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Whether a context is enclosed by an even or odd number of cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Polarity of a context at the given cut depth.
    pub fn from_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Polarity::Positive)
    }

    pub fn flipped(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// Position of one context relative to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nesting {
    /// Both are the same context.
    Same,
    /// The first is strictly enclosed by the second.
    Deeper,
    /// The first strictly encloses the second.
    Shallower,
    /// Neither encloses the other.
    Unrelated,
}

impl Nesting {
    /// True for `Same` and `Deeper`, the placements iteration allows.
    pub fn is_same_or_deeper(self) -> bool {
        matches!(self, Nesting::Same | Nesting::Deeper)
    }
}

impl fmt::Display for Nesting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Nesting::Same => "same",
            Nesting::Deeper => "deeper",
            Nesting::Shallower => "shallower",
            Nesting::Unrelated => "unrelated",
        };
        write!(f, "{}", text)
    }
}

/// Answers context questions for a single graph value.
///
/// Depths are memoized, so a resolver is meant to live as long as the graph
/// value it borrows and no longer.
pub struct ContextResolver<'g> {
    graph: &'g Graph,
    depths: RefCell<HashMap<ContextId, usize>>,
}

impl<'g> ContextResolver<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            depths: RefCell::new(HashMap::new()),
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    fn require(&self, context: ContextId) -> ContextResult<()> {
        if self.graph.has_context(context) {
            Ok(())
        } else {
            Err(ContextError::UnknownContext(context))
        }
    }

    /// Number of cuts enclosing the context; the sheet is at depth 0.
    pub fn depth(&self, context: ContextId) -> ContextResult<usize> {
        self.require(context)?;

        let mut pending = Vec::new();
        let mut current = context;
        let base = loop {
            if let Some(depth) = self.depths.borrow().get(&current) {
                break *depth;
            }
            match self.graph.parent_of(current) {
                Some(parent) => {
                    pending.push(current);
                    current = parent;
                }
                None => break 0,
            }
        };

        let mut memo = self.depths.borrow_mut();
        memo.entry(current).or_insert(base);
        let mut depth = base;
        for context in pending.into_iter().rev() {
            depth += 1;
            memo.insert(context, depth);
        }
        Ok(depth)
    }

    pub fn polarity(&self, context: ContextId) -> ContextResult<Polarity> {
        self.depth(context).map(Polarity::from_depth)
    }

    pub fn is_positive(&self, context: ContextId) -> ContextResult<bool> {
        self.polarity(context).map(Polarity::is_positive)
    }

    /// The context a cut lives in; `None` for the sheet.
    pub fn parent(&self, context: ContextId) -> ContextResult<Option<ContextId>> {
        self.require(context)?;
        Ok(self.graph.parent_of(context))
    }

    pub fn context_of(&self, element: impl Into<ElementId>) -> ContextResult<ContextId> {
        let element = element.into();
        self.graph
            .context_of(element)
            .ok_or(ContextError::UnknownElement(element))
    }

    /// The context itself, then each enclosing context, ending with the sheet.
    pub fn ancestors(&self, context: ContextId) -> ContextResult<Vec<ContextId>> {
        self.require(context)?;
        let mut chain = vec![context];
        let mut current = context;
        while let Some(parent) = self.graph.parent_of(current) {
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// True when `outer` is `inner` or one of its ancestors.
    pub fn encloses(&self, outer: ContextId, inner: ContextId) -> ContextResult<bool> {
        self.require(outer)?;
        Ok(self.ancestors(inner)?.contains(&outer))
    }

    /// Where `first` sits relative to `second`.
    pub fn nesting(&self, first: ContextId, second: ContextId) -> ContextResult<Nesting> {
        if first == second {
            self.require(first)?;
            return Ok(Nesting::Same);
        }
        if self.encloses(second, first)? {
            Ok(Nesting::Deeper)
        } else if self.encloses(first, second)? {
            Ok(Nesting::Shallower)
        } else {
            Ok(Nesting::Unrelated)
        }
    }

    /// Deepest context enclosing both.
    pub fn common_ancestor(&self, a: ContextId, b: ContextId) -> ContextResult<ContextId> {
        let of_a = self.ancestors(a)?;
        let of_b = self.ancestors(b)?;
        Ok(of_a
            .into_iter()
            .find(|context| of_b.contains(context))
            .unwrap_or(ContextId::Sheet))
    }

    /// Every cut context strictly inside `context`, breadth first.
    pub fn descendants(&self, context: ContextId) -> ContextResult<Vec<ContextId>> {
        self.require(context)?;
        let mut found = Vec::new();
        let mut queue = VecDeque::from([context]);
        while let Some(current) = queue.pop_front() {
            for element in self.graph.direct_contents(current) {
                if let ElementId::Cut(cut) = element {
                    let child = ContextId::Cut(*cut);
                    found.push(child);
                    queue.push_back(child);
                }
            }
        }
        Ok(found)
    }

    /// Edge arguments whose vertex lives in a context that does not enclose the
    /// edge's context.
    ///
    /// Such graphs are accepted; this is a diagnostic for editors.
    pub fn undominated_arguments(&self) -> Vec<(EdgeId, VertexId)> {
        let mut found = Vec::new();
        for edge in self.graph.edges() {
            let Some(edge_context) = self.graph.context_of(edge.id) else {
                continue;
            };
            for vertex in edge.args {
                let dominated = self
                    .graph
                    .context_of(*vertex)
                    .map(|vc| self.encloses(vc, edge_context).unwrap_or(false))
                    .unwrap_or(false);
                if !dominated && !found.contains(&(edge.id, *vertex)) {
                    found.push((edge.id, *vertex));
                }
            }
        }
        found
    }
}
