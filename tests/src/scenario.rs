//! Scenario definition and builder.

use peirce_rule::{RuleConfig, RuleParams};

use crate::assertion::{Expectation, ExpectationBuilder};
use crate::error::ScenarioResult;
use crate::fixture::Fixture;
use crate::runner::{Runner, State};

/// Produces a step's rule parameters from the state the step starts in.
pub type ParamsFn = Box<dyn Fn(&State) -> ScenarioResult<RuleParams>>;

/// A step in a scenario with its expectation.
pub struct Step {
    /// Step name, for reporting.
    pub name: String,
    pub params: ParamsFn,
    pub expectation: Expectation,
    /// Names to give the elements the step creates, in id order.
    pub bindings: Vec<String>,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("expectation", &self.expectation)
            .field("bindings", &self.bindings)
            .finish()
    }
}

/// A complete test scenario: a starting graph and a sequence of rule applications.
///
/// A rejected step leaves the current graph as it was; an applied step makes
/// its result the current graph.
pub struct Scenario {
    name: String,
    fixture: Fixture,
    config: RuleConfig,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixture: Fixture::new(),
            config: RuleConfig::default(),
            steps: Vec::new(),
        }
    }

    /// Set the starting graph.
    pub fn fixture(mut self, fixture: Fixture) -> Self {
        self.fixture = fixture;
        self
    }

    /// Set the rule engine configuration used by every step.
    pub fn config(mut self, config: RuleConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a step with an expectation.
    pub fn step<P, E>(self, name: impl Into<String>, params: P, expect: E) -> Self
    where
        P: Fn(&State) -> ScenarioResult<RuleParams> + 'static,
        E: FnOnce(ExpectationBuilder) -> ExpectationBuilder,
    {
        self.step_binding(name, params, expect, &[])
    }

    /// Add a step and name what it creates.
    ///
    /// Created vertices, edges and cuts are bound in that order, each kind
    /// sorted by id.
    pub fn step_binding<P, E>(
        mut self,
        name: impl Into<String>,
        params: P,
        expect: E,
        bindings: &[&str],
    ) -> Self
    where
        P: Fn(&State) -> ScenarioResult<RuleParams> + 'static,
        E: FnOnce(ExpectationBuilder) -> ExpectationBuilder,
    {
        self.steps.push(Step {
            name: name.into(),
            params: Box::new(params),
            expectation: expect(ExpectationBuilder::new()).build(),
            bindings: bindings.iter().map(|b| b.to_string()).collect(),
        });
        self
    }

    /// Run the scenario and return the final state.
    pub fn run(&self) -> ScenarioResult<State> {
        Runner::new(self).run()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixture_ref(&self) -> &Fixture {
        &self.fixture
    }

    pub fn rule_config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
