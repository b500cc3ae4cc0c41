//! Rule error types.

use peirce_context::{ContextError, Nesting};
use peirce_core::{ContextId, CutId, EdgeId, ElementId, MalformedGraph, VertexId};
use peirce_pattern::PatternError;
use peirce_subgraph::SubgraphError;
use thiserror::Error;

/// Why a rule refused to fire. Always recoverable: the graph is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("context {context} is negative; only positive contexts allow erasure")]
    NegativeContext { context: ContextId },

    #[error("context {context} is positive; only negative contexts allow insertion")]
    PositiveContext { context: ContextId },

    #[error("target {target} is {nesting} relative to {base}; it must be the same or deeper")]
    InvalidNesting {
        base: ContextId,
        target: ContextId,
        nesting: Nesting,
    },

    #[error("copy is not identical to base: {reason}")]
    NonIdenticalPattern { reason: String },

    #[error("malformed target: {reason}")]
    MalformedTarget { reason: String },

    #[error("{inner} is not directly inside {outer}")]
    NotADoubleCut { outer: CutId, inner: CutId },

    #[error("{outer} holds {} element(s) besides the inner cut", elements.len())]
    NonEmptyBetweenCuts {
        outer: CutId,
        elements: Vec<ElementId>,
    },

    #[error("vertex {vertex} is used by {} edge(s)", edges.len())]
    VertexNotIsolated { vertex: VertexId, edges: Vec<EdgeId> },

    #[error("vertex {vertex} would be removed but {} edge(s) outside still use it", edges.len())]
    SubgraphNotClosed { vertex: VertexId, edges: Vec<EdgeId> },

    #[error("unknown context: {0}")]
    UnknownContext(ContextId),

    #[error("unknown element: {0}")]
    UnknownElement(ElementId),
}

impl RuleViolation {
    pub fn malformed_target(reason: impl Into<String>) -> Self {
        Self::MalformedTarget {
            reason: reason.into(),
        }
    }

    pub fn non_identical(reason: impl Into<String>) -> Self {
        Self::NonIdenticalPattern {
            reason: reason.into(),
        }
    }

    pub fn invalid_nesting(base: ContextId, target: ContextId, nesting: Nesting) -> Self {
        Self::InvalidNesting {
            base,
            target,
            nesting,
        }
    }

    /// Stable short code for editor feedback.
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::NegativeContext { .. } => "negative-context",
            RuleViolation::PositiveContext { .. } => "positive-context",
            RuleViolation::InvalidNesting { .. } => "invalid-nesting",
            RuleViolation::NonIdenticalPattern { .. } => "non-identical-pattern",
            RuleViolation::MalformedTarget { .. } => "malformed-target",
            RuleViolation::NotADoubleCut { .. } => "not-a-double-cut",
            RuleViolation::NonEmptyBetweenCuts { .. } => "non-empty-between-cuts",
            RuleViolation::VertexNotIsolated { .. } => "vertex-not-isolated",
            RuleViolation::SubgraphNotClosed { .. } => "subgraph-not-closed",
            RuleViolation::UnknownContext(_) => "unknown-context",
            RuleViolation::UnknownElement(_) => "unknown-element",
        }
    }
}

impl From<ContextError> for RuleViolation {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::UnknownContext(context) => Self::UnknownContext(context),
            ContextError::UnknownElement(element) => Self::UnknownElement(element),
        }
    }
}

impl From<SubgraphError> for RuleViolation {
    fn from(err: SubgraphError) -> Self {
        match err {
            SubgraphError::UnknownElement(element) => Self::UnknownElement(element),
            SubgraphError::UnknownRoot(context) => Self::UnknownContext(context),
            other => Self::malformed_target(other.to_string()),
        }
    }
}

impl From<PatternError> for RuleViolation {
    fn from(err: PatternError) -> Self {
        match err {
            PatternError::NotIdentical { reason } => Self::NonIdenticalPattern { reason },
            PatternError::Subgraph(err) => err.into(),
            PatternError::Context(err) => err.into(),
            other => Self::malformed_target(other.to_string()),
        }
    }
}

/// Errors from running a rule end to end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule does not apply; the graph is unchanged.
    #[error(transparent)]
    Violation(#[from] RuleViolation),

    /// The rule's delta broke a structural invariant. This is a bug in the rule.
    #[error("unsound rule delta: {0}")]
    Unsound(#[from] MalformedGraph),
}

impl RuleError {
    pub fn violation(&self) -> Option<&RuleViolation> {
        match self {
            RuleError::Violation(violation) => Some(violation),
            RuleError::Unsound(_) => None,
        }
    }
}

impl From<SubgraphError> for RuleError {
    fn from(err: SubgraphError) -> Self {
        Self::Violation(err.into())
    }
}

impl From<PatternError> for RuleError {
    fn from(err: PatternError) -> Self {
        Self::Violation(err.into())
    }
}

impl From<ContextError> for RuleError {
    fn from(err: ContextError) -> Self {
        Self::Violation(err.into())
    }
}

/// Result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Result type for rule validation.
pub type ViolationResult<T> = Result<T, RuleViolation>;
