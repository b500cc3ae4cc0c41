//! Error types for the scenario framework.

use peirce_core::MalformedGraph;
use peirce_rule::RuleError;
use peirce_subgraph::SubgraphError;
use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when building fixtures or running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A name was used before it was declared.
    #[error("no element named '{name}'")]
    UnknownName { name: String },

    /// A name was declared twice.
    #[error("name '{name}' is already taken")]
    DuplicateName { name: String },

    /// `sheet` always denotes the sheet of assertion.
    #[error("'{name}' is reserved")]
    ReservedName { name: String },

    /// A name refers to an element of the wrong kind.
    #[error("'{name}' is not a {expected}")]
    WrongKind { name: String, expected: &'static str },

    /// The fixture does not form a valid graph.
    #[error("fixture is malformed: {0}")]
    Fixture(#[from] MalformedGraph),

    /// A step could not assemble its selection.
    #[error("selection failed: {0}")]
    Selection(#[from] SubgraphError),

    /// A step could not produce its rule parameters.
    #[error("step '{step}' could not be prepared: {message}")]
    StepSetup { step: String, message: String },

    /// Expectation failed.
    #[error("expectation failed for step '{step}': {message}")]
    ExpectationFailed { step: String, message: String },

    /// A rule failed outside of a step.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),
}

impl ScenarioError {
    pub fn unknown_name(name: impl Into<String>) -> Self {
        Self::UnknownName { name: name.into() }
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn wrong_kind(name: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongKind {
            name: name.into(),
            expected,
        }
    }

    pub fn step_setup(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepSetup {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn expectation_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExpectationFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
