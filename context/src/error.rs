//! Context resolution errors.

use peirce_core::{ContextId, ElementId};
use thiserror::Error;

/// Errors raised when asking about contexts a graph does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Unknown context: {0}")]
    UnknownContext(ContextId),

    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
}

impl ContextError {
    pub fn unknown_context(context: impl Into<ContextId>) -> Self {
        Self::UnknownContext(context.into())
    }

    pub fn unknown_element(element: impl Into<ElementId>) -> Self {
        Self::UnknownElement(element.into())
    }
}

pub type ContextResult<T> = Result<T, ContextError>;
