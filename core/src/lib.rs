//! Peirce Core Types
//!
//! This crate provides the foundational types used throughout the Peirce workspace:
//! - Identity types (VertexId, EdgeId, CutId, ElementId, ContextId)
//! - Entity structures (Vertex, Edge)
//! - The structural error type raised when a graph breaks its invariants
//! - Relation-name and label validation

mod entity;
mod error;
mod id;
mod name;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use name::{is_valid_label, is_valid_relation_name};
