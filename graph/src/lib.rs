//! Persistent existential graph storage.
//!
//! A [`Graph`] is an immutable value. New values come from [`Graph::with_changes`],
//! which applies a [`GraphDelta`] and re-checks every structural invariant.

mod builder;
mod delta;
mod graph;
mod index;
mod validate;

pub use builder::GraphBuilder;
pub use delta::GraphDelta;
pub use graph::{EdgeView, Graph, GraphParts, IdAllocator, Sharing};
pub use index::{IncidenceIndex, ParentIndex};
