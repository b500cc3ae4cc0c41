//! Structural error type for existential graphs.

use crate::{ContextId, CutId, EdgeId, ElementId, VertexId};
use thiserror::Error;

/// A violated structural invariant.
///
/// Raised when a graph is constructed from parts or rebuilt from a delta and the
/// result breaks the area partition, the context tree, or edge incidence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGraph {
    /// An area, delta, or mapping names an element the graph does not have.
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    /// An area or reassignment names a context the graph does not have.
    #[error("Unknown context: {0}")]
    UnknownContext(ContextId),

    /// A new element reuses an id that is already taken.
    #[error("Duplicate element id: {0}")]
    DuplicateElement(ElementId),

    /// Partition violated: an element is listed in two areas.
    #[error("Element {element} is contained in both {first} and {second}")]
    ElementInMultipleContexts {
        element: ElementId,
        first: ContextId,
        second: ContextId,
    },

    /// Partition violated: an element is listed in no area.
    #[error("Element {0} is not contained in any context")]
    ElementWithoutContext(ElementId),

    /// The context graph is not a tree rooted at the sheet.
    #[error("Cut {0} is its own ancestor")]
    ContextCycle(CutId),

    /// An edge argument refers to a vertex that does not exist.
    #[error("Edge {edge} refers to missing vertex {vertex}")]
    DanglingArgument { edge: EdgeId, vertex: VertexId },

    /// An edge has no entry in the relation-name map.
    #[error("Edge {0} has no relation name")]
    MissingRelationName(EdgeId),

    /// A relation name is empty or contains delimiter characters.
    #[error("Edge {edge} has invalid relation name '{name}'")]
    InvalidRelationName { edge: EdgeId, name: String },

    /// A vertex label is empty or contains delimiter characters.
    #[error("Vertex {vertex} has invalid label '{label}'")]
    InvalidLabel { vertex: VertexId, label: String },

    /// A constant vertex does not name its individual.
    #[error("Constant vertex {0} has no label")]
    ConstantWithoutLabel(VertexId),

    /// A cut was removed while elements still live in its area.
    #[error("Cut {cut} was removed but still contains {element}")]
    OrphanedContents { cut: CutId, element: ElementId },
}

impl MalformedGraph {
    pub fn element_in_multiple_contexts(
        element: ElementId,
        first: ContextId,
        second: ContextId,
    ) -> Self {
        Self::ElementInMultipleContexts {
            element,
            first,
            second,
        }
    }

    pub fn dangling_argument(edge: EdgeId, vertex: VertexId) -> Self {
        Self::DanglingArgument { edge, vertex }
    }

    pub fn invalid_relation_name(edge: EdgeId, name: impl Into<String>) -> Self {
        Self::InvalidRelationName {
            edge,
            name: name.into(),
        }
    }

    pub fn invalid_label(vertex: VertexId, label: impl Into<String>) -> Self {
        Self::InvalidLabel {
            vertex,
            label: label.into(),
        }
    }

    pub fn orphaned_contents(cut: CutId, element: ElementId) -> Self {
        Self::OrphanedContents { cut, element }
    }
}

/// Result type for graph construction and rebuilding.
pub type GraphResult<T> = Result<T, MalformedGraph>;
