//! Context resolution: depth, polarity and nesting of cuts.

mod error;
mod resolver;

pub use error::{ContextError, ContextResult};
pub use resolver::{ContextResolver, Nesting, Polarity};
