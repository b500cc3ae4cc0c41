//! Rule names and their parameters.

use peirce_core::{ContextId, CutId, VertexId, VertexKind};
use peirce_pattern::Fragment;
use peirce_subgraph::Subgraph;
use std::fmt;

/// The eight transformation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Erasure,
    Insertion,
    Iteration,
    Deiteration,
    DoubleCutAddition,
    DoubleCutRemoval,
    IsolatedVertexAddition,
    IsolatedVertexRemoval,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Erasure => "erasure",
            RuleKind::Insertion => "insertion",
            RuleKind::Iteration => "iteration",
            RuleKind::Deiteration => "de-iteration",
            RuleKind::DoubleCutAddition => "double cut addition",
            RuleKind::DoubleCutRemoval => "double cut removal",
            RuleKind::IsolatedVertexAddition => "isolated vertex addition",
            RuleKind::IsolatedVertexRemoval => "isolated vertex removal",
        };
        write!(f, "{}", name)
    }
}

/// A vertex to add by the isolated vertex rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVertex {
    pub label: Option<String>,
    pub kind: VertexKind,
}

impl NewVertex {
    pub fn generic() -> Self {
        Self {
            label: None,
            kind: VertexKind::Generic,
        }
    }

    pub fn named(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            kind: VertexKind::Generic,
        }
    }

    pub fn constant(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            kind: VertexKind::Constant,
        }
    }
}

/// A fully resolved rule request. Targets are explicit; rules never search.
#[derive(Debug, Clone)]
pub enum RuleParams {
    Erasure {
        subgraph: Subgraph,
    },
    Insertion {
        target: ContextId,
        fragment: Fragment,
    },
    Iteration {
        subgraph: Subgraph,
        target: ContextId,
    },
    Deiteration {
        copy: Subgraph,
        base: Subgraph,
    },
    DoubleCutAddition {
        subgraph: Subgraph,
    },
    DoubleCutRemoval {
        outer: CutId,
        inner: CutId,
    },
    IsolatedVertexAddition {
        context: ContextId,
        vertex: NewVertex,
    },
    IsolatedVertexRemoval {
        vertex: VertexId,
    },
}

impl RuleParams {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleParams::Erasure { .. } => RuleKind::Erasure,
            RuleParams::Insertion { .. } => RuleKind::Insertion,
            RuleParams::Iteration { .. } => RuleKind::Iteration,
            RuleParams::Deiteration { .. } => RuleKind::Deiteration,
            RuleParams::DoubleCutAddition { .. } => RuleKind::DoubleCutAddition,
            RuleParams::DoubleCutRemoval { .. } => RuleKind::DoubleCutRemoval,
            RuleParams::IsolatedVertexAddition { .. } => RuleKind::IsolatedVertexAddition,
            RuleParams::IsolatedVertexRemoval { .. } => RuleKind::IsolatedVertexRemoval,
        }
    }
}
