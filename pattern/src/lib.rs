//! Graph patterns: fragments to insert and structural matching between selections.
//!
//! - [`Fragment`] describes new content with local keys and materializes it with
//!   fresh ids.
//! - [`Matcher`] decides whether one subgraph is a copy of another, and can scan
//!   a graph for every copy of a base selection.

mod binding;
mod error;
mod fragment;
mod matcher;

pub use binding::Bindings;
pub use error::{PatternError, PatternResult};
pub use fragment::{FragmentArg, Fragment, LocalCut, LocalVertex, Materialized, Placement};
pub use matcher::{Matcher, SearchOptions};
