//! Identity types for graph elements and contexts.
//!
//! All element identifiers are 64-bit values that are:
//! - Unique within their namespace
//! - Immutable once assigned
//! - Never reused by the allocator of a graph history

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a vertex (a line of identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    /// Create a new VertexId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Unique identifier for an edge (a relation instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    /// Create a new EdgeId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Unique identifier for a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CutId(pub u64);

impl CutId {
    /// Create a new CutId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Unified identifier for anything that lives in an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementId {
    Vertex(VertexId),
    Edge(EdgeId),
    Cut(CutId),
}

impl ElementId {
    /// Returns true if this is a vertex ID.
    pub fn is_vertex(&self) -> bool {
        matches!(self, ElementId::Vertex(_))
    }

    /// Returns true if this is an edge ID.
    pub fn is_edge(&self) -> bool {
        matches!(self, ElementId::Edge(_))
    }

    /// Returns true if this is a cut ID.
    pub fn is_cut(&self) -> bool {
        matches!(self, ElementId::Cut(_))
    }

    /// Get as a VertexId if this is a vertex reference.
    pub fn as_vertex(&self) -> Option<VertexId> {
        match self {
            ElementId::Vertex(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as an EdgeId if this is an edge reference.
    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            ElementId::Edge(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as a CutId if this is a cut reference.
    pub fn as_cut(&self) -> Option<CutId> {
        match self {
            ElementId::Cut(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<VertexId> for ElementId {
    fn from(id: VertexId) -> Self {
        ElementId::Vertex(id)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        ElementId::Edge(id)
    }
}

impl From<CutId> for ElementId {
    fn from(id: CutId) -> Self {
        ElementId::Cut(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Vertex(id) => write!(f, "{}", id),
            ElementId::Edge(id) => write!(f, "{}", id),
            ElementId::Cut(id) => write!(f, "{}", id),
        }
    }
}

/// A context: the sheet of assertion or the area of a cut.
///
/// `Sheet` orders before every cut so sorted context lists start at the root.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ContextId {
    #[default]
    Sheet,
    Cut(CutId),
}

impl ContextId {
    /// Returns true if this is the sheet of assertion.
    pub fn is_sheet(&self) -> bool {
        matches!(self, ContextId::Sheet)
    }

    /// Get the cut behind this context, if any.
    pub fn as_cut(&self) -> Option<CutId> {
        match self {
            ContextId::Sheet => None,
            ContextId::Cut(id) => Some(*id),
        }
    }

    /// The element this context is, when viewed as the content of its parent.
    ///
    /// The sheet is contained in nothing and has no element form.
    pub fn as_element(&self) -> Option<ElementId> {
        self.as_cut().map(ElementId::Cut)
    }
}

impl From<CutId> for ContextId {
    fn from(id: CutId) -> Self {
        ContextId::Cut(id)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextId::Sheet => write!(f, "sheet"),
            ContextId::Cut(id) => write!(f, "{}", id),
        }
    }
}
