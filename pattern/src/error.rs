//! Pattern error types.

use peirce_context::ContextError;
use peirce_subgraph::SubgraphError;
use thiserror::Error;

/// Errors that can occur while building fragments or matching patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A base or copy selection is not a well-formed subgraph.
    #[error(transparent)]
    Subgraph(#[from] SubgraphError),

    #[error(transparent)]
    Context(#[from] ContextError),

    /// A fragment refers to a local vertex it never declared.
    #[error("Fragment has no local vertex #{index}")]
    UnknownLocalVertex { index: usize },

    /// A fragment places something in a local cut it never declared.
    #[error("Fragment has no local cut #{index}")]
    UnknownLocalCut { index: usize },

    /// Local cuts must be declared after the cut that holds them.
    #[error("Fragment cut #{cut} is placed in later cut #{parent}")]
    CutOrder { cut: usize, parent: usize },

    /// Two selections are not the same pattern up to renaming.
    #[error("Patterns differ: {reason}")]
    NotIdentical { reason: String },
}

impl PatternError {
    pub fn not_identical(reason: impl Into<String>) -> Self {
        Self::NotIdentical {
            reason: reason.into(),
        }
    }
}

/// Result type for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;
