//! Subgraph containment and closure errors.

use peirce_context::ContextError;
use peirce_core::{ContextId, CutId, EdgeId, ElementId, VertexId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubgraphError {
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("Unknown subgraph root: {0}")]
    UnknownRoot(ContextId),

    /// An element sits outside the root and is not a boundary vertex.
    #[error("Element {element} lies outside subgraph root {root}")]
    ElementOutsideRoot { element: ElementId, root: ContextId },

    #[error("Edge {edge} is included but its argument {vertex} is not")]
    MissingArgument { edge: EdgeId, vertex: VertexId },

    #[error("Cut {cut} is included but its content {missing} is not")]
    IncompleteCut { cut: CutId, missing: ElementId },

    #[error("Could not close subgraph after {rounds} rounds: {cause}")]
    Unclosable {
        rounds: usize,
        cause: Box<SubgraphError>,
    },
}

impl SubgraphError {
    pub fn outside_root(element: impl Into<ElementId>, root: ContextId) -> Self {
        Self::ElementOutsideRoot {
            element: element.into(),
            root,
        }
    }

    pub fn missing_argument(edge: EdgeId, vertex: VertexId) -> Self {
        Self::MissingArgument { edge, vertex }
    }

    pub fn incomplete_cut(cut: CutId, missing: ElementId) -> Self {
        Self::IncompleteCut { cut, missing }
    }

    pub fn unclosable(rounds: usize, cause: SubgraphError) -> Self {
        Self::Unclosable {
            rounds,
            cause: Box::new(cause),
        }
    }
}

impl From<ContextError> for SubgraphError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::UnknownContext(context) => SubgraphError::UnknownRoot(context),
            ContextError::UnknownElement(element) => SubgraphError::UnknownElement(element),
        }
    }
}

pub type SubgraphResult<T> = Result<T, SubgraphError>;
