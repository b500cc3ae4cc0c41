//! Subgraph selections and their closure.
//!
//! A [`Subgraph`] is what every rule operates on. Callers either build one
//! directly and have it checked, or let a [`SubgraphExtractor`] grow a seed set
//! into one.

mod error;
mod extractor;
mod subgraph;

pub use error::{SubgraphError, SubgraphResult};
pub use extractor::{SubgraphExtractor, DEFAULT_MAX_CLOSURE_ROUNDS};
pub use subgraph::Subgraph;
