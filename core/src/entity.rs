//! Entity structures for existential graphs.
//!
//! Vertices and edges are the two payload-carrying entity types. Cuts carry no
//! payload; everything they mean comes from containment.

use crate::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// Whether a vertex denotes some individual or a named one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    /// Existentially quantified individual (`*x` in EGIF).
    Generic,
    /// Named individual; the label is the constant's name.
    Constant,
}

/// A vertex: one line of identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier for this vertex.
    pub id: VertexId,
    /// Constant name, or the variable name a generic vertex was written with.
    pub label: Option<String>,
    /// Generic or constant.
    pub kind: VertexKind,
}

impl Vertex {
    /// Create an unlabelled generic vertex.
    pub fn generic(id: VertexId) -> Self {
        Self {
            id,
            label: None,
            kind: VertexKind::Generic,
        }
    }

    /// Create a generic vertex that remembers the variable name it was written with.
    pub fn named_generic(id: VertexId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: Some(label.into()),
            kind: VertexKind::Generic,
        }
    }

    /// Create a constant vertex.
    pub fn constant(id: VertexId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: Some(label.into()),
            kind: VertexKind::Constant,
        }
    }

    /// Returns true if this vertex is existentially quantified.
    pub fn is_generic(&self) -> bool {
        matches!(self.kind, VertexKind::Generic)
    }

    /// Returns true if this vertex names a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, VertexKind::Constant)
    }

    /// Get the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The same vertex under a different id.
    pub fn with_id(&self, id: VertexId) -> Self {
        Self {
            id,
            label: self.label.clone(),
            kind: self.kind,
        }
    }

    /// Check whether two vertices can stand for each other in a pattern.
    ///
    /// Generic vertices are interchangeable regardless of their variable names;
    /// constants must name the same individual.
    pub fn same_pattern(&self, other: &Vertex) -> bool {
        match (self.kind, other.kind) {
            (VertexKind::Generic, VertexKind::Generic) => true,
            (VertexKind::Constant, VertexKind::Constant) => self.label == other.label,
            _ => false,
        }
    }
}

/// An edge: one relation instance over an ordered tuple of vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// Relation name.
    pub relation: String,
    /// Ordered argument tuple.
    pub args: Vec<VertexId>,
}

impl Edge {
    /// Create a new edge.
    pub fn new(id: EdgeId, relation: impl Into<String>, args: Vec<VertexId>) -> Self {
        Self {
            id,
            relation: relation.into(),
            args,
        }
    }

    /// Get the arity (number of arguments) of this edge.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Check if this edge has the given vertex among its arguments.
    pub fn involves(&self, vertex: VertexId) -> bool {
        self.args.contains(&vertex)
    }
}
