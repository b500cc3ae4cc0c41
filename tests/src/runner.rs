//! Scenario runner.

use peirce_core::{ElementId, VertexId};
use peirce_graph::Graph;
use peirce_rule::{RuleConfig, RuleDelta, RuleEngine, RuleError};
use peirce_subgraph::Subgraph;

use crate::assertion::{Applied, Outcome};
use crate::error::{ScenarioError, ScenarioResult};
use crate::fixture::Names;
use crate::scenario::{Scenario, Step};

/// The graph a scenario has reached, with everything it has named so far.
#[derive(Debug, Clone)]
pub struct State {
    graph: Graph,
    names: Names,
    config: RuleConfig,
    history: Vec<Graph>,
    last: Option<RuleDelta>,
}

impl State {
    pub fn new(graph: Graph, names: Names, config: RuleConfig) -> Self {
        Self {
            graph,
            names,
            config,
            history: Vec::new(),
            last: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn names(&self) -> &Names {
        &self.names
    }

    /// Every earlier graph, oldest first.
    pub fn history(&self) -> &[Graph] {
        &self.history
    }

    /// The delta of the last step that applied.
    pub fn last_delta(&self) -> Option<&RuleDelta> {
        self.last.as_ref()
    }

    /// Elements created by the last step that applied.
    pub fn created(&self) -> ScenarioResult<&Subgraph> {
        self.last
            .as_ref()
            .and_then(|delta| delta.created.as_ref())
            .ok_or_else(|| ScenarioError::step_setup("created", "the last step created nothing"))
    }

    /// Go back to the previous graph. Returns false at the start.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.graph = previous;
                self.last = None;
                true
            }
            None => false,
        }
    }

    /// A subgraph under `root` made of exactly the named elements.
    pub fn subgraph(&self, root: &str, members: &[&str]) -> ScenarioResult<Subgraph> {
        let root = self.names.context(root)?;
        Ok(Subgraph::from_elements(root, self.names.elements(members)?))
    }

    /// A subgraph under `root` grown from the named seeds.
    pub fn select(&self, root: &str, seeds: &[&str]) -> ScenarioResult<Subgraph> {
        let root = self.names.context(root)?;
        let seeds = self.names.elements(seeds)?;
        Ok(self.engine().select(seeds, root)?)
    }

    /// Everything enclosed by the named context.
    pub fn whole(&self, context: &str) -> ScenarioResult<Subgraph> {
        let context = self.names.context(context)?;
        let engine = self.engine();
        Ok(Subgraph::whole_area(engine.resolver(), context)?)
    }

    pub fn vertex(&self, name: &str) -> ScenarioResult<VertexId> {
        self.names.vertex(name)
    }

    pub fn engine(&self) -> RuleEngine<'_> {
        RuleEngine::new(&self.graph).with_config(self.config.clone())
    }

    fn advance(&mut self, applied: Applied) {
        let previous = std::mem::replace(&mut self.graph, applied.graph);
        self.history.push(previous);
        self.last = Some(applied.delta);
    }

    fn bind_created(&mut self, step: &Step) -> ScenarioResult<()> {
        if step.bindings.is_empty() {
            return Ok(());
        }
        let created = self.created()?;
        let ids: Vec<ElementId> = created
            .vertices
            .iter()
            .filter(|v| self.graph.context_of(**v).is_some_and(|c| created.owns_context(c)))
            .map(|v| ElementId::Vertex(*v))
            .chain(created.edges.iter().map(|e| ElementId::Edge(*e)))
            .chain(created.cuts.iter().map(|c| ElementId::Cut(*c)))
            .filter(|e| !self.history.last().is_some_and(|g| g.contains(*e)))
            .collect();
        if ids.len() < step.bindings.len() {
            return Err(ScenarioError::step_setup(
                &step.name,
                format!(
                    "{} names for {} created elements",
                    step.bindings.len(),
                    ids.len()
                ),
            ));
        }
        for (name, id) in step.bindings.iter().zip(ids) {
            self.names.bind(name, id)?;
        }
        Ok(())
    }
}

/// Runs a scenario's steps in order.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    pub fn run(&self) -> ScenarioResult<State> {
        // 1. Build the starting graph
        let (graph, names) = self.scenario.fixture_ref().build()?;
        let mut state = State::new(graph, names, self.scenario.rule_config().clone());

        // 2. Run each step and check its expectation
        for step in self.scenario.steps() {
            let params = (step.params)(&state).map_err(|err| {
                ScenarioError::step_setup(
                    format!("{}:{}", self.scenario.name(), step.name),
                    err.to_string(),
                )
            })?;

            let outcome: Outcome = {
                let engine = state.engine();
                engine
                    .validate(&params)
                    .map_err(RuleError::from)
                    .and_then(|delta| {
                        let graph = engine.apply(&delta)?;
                        Ok(Applied { delta, graph })
                    })
            };

            step.expectation.verify(&step.name, state.graph(), &outcome)?;

            // 3. Applied steps move the scenario forward
            if let Ok(applied) = outcome {
                state.advance(applied);
                state.bind_created(step)?;
            }
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use crate::fixture::{Fixture, SHEET};
    use crate::scenario::Scenario;
    use peirce_rule::RuleParams;

    #[test]
    fn test_rejected_step_keeps_graph() {
        // GIVEN
        let scenario = Scenario::new("reject")
            .fixture(Fixture::new().cut("c", SHEET).edge("p", "c", "P", &[]))
            .step(
                "erase in cut",
                |s| {
                    Ok(RuleParams::Erasure {
                        subgraph: s.subgraph("c", &["p"])?,
                    })
                },
                |e| e.violation("negative-context"),
            );

        // WHEN
        let state = scenario.run().unwrap();

        // THEN
        assert!(state.history().is_empty());
        assert_eq!(state.graph().edge_count(), 1);
    }

    #[test]
    fn test_created_elements_get_names() {
        // GIVEN
        let scenario = Scenario::new("bind")
            .fixture(Fixture::new().edge("p", SHEET, "P", &[]))
            .step_binding(
                "double cut",
                |s| {
                    Ok(RuleParams::DoubleCutAddition {
                        subgraph: s.subgraph(SHEET, &["p"])?,
                    })
                },
                |e| e.created_cuts(2),
                &["outer", "inner"],
            );

        // WHEN
        let mut state = scenario.run().unwrap();

        // THEN
        let outer = state.names().context("outer").unwrap();
        let inner = state.names().context("inner").unwrap();
        assert_eq!(state.graph().parent_of(inner), Some(outer));
        assert!(state.undo());
        assert_eq!(state.graph().cut_count(), 0);
    }
}
