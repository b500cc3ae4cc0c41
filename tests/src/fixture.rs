//! Graphs described by name.
//!
//! A [`Fixture`] lists cuts, vertices and edges under names of the test's
//! choosing; [`Fixture::build`] turns it into a [`Graph`] plus the [`Names`]
//! that map those names to ids. The name `sheet` always means the sheet.

use std::collections::HashMap;

use peirce_core::{ContextId, CutId, EdgeId, ElementId, VertexId};
use peirce_graph::{Graph, GraphBuilder};

use crate::error::{ScenarioError, ScenarioResult};

/// The reserved name of the sheet of assertion.
pub const SHEET: &str = "sheet";

#[derive(Debug, Clone)]
enum Decl {
    Cut {
        name: String,
        parent: String,
    },
    Vertex {
        name: String,
        context: String,
        label: Option<String>,
        constant: bool,
    },
    Edge {
        name: String,
        context: String,
        relation: String,
        args: Vec<String>,
    },
}

/// Named declarations, resolved in order by [`Fixture::build`].
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    decls: Vec<Decl>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a cut inside `parent`.
    pub fn cut(mut self, name: &str, parent: &str) -> Self {
        self.decls.push(Decl::Cut {
            name: name.to_string(),
            parent: parent.to_string(),
        });
        self
    }

    /// Declare an unlabelled generic vertex.
    pub fn vertex(mut self, name: &str, context: &str) -> Self {
        self.decls.push(Decl::Vertex {
            name: name.to_string(),
            context: context.to_string(),
            label: None,
            constant: false,
        });
        self
    }

    /// Declare a generic vertex labelled with its own name, as in `*x`.
    pub fn variable(mut self, name: &str, context: &str) -> Self {
        self.decls.push(Decl::Vertex {
            name: name.to_string(),
            context: context.to_string(),
            label: Some(name.to_string()),
            constant: false,
        });
        self
    }

    /// Declare a constant vertex.
    pub fn constant(mut self, name: &str, context: &str, label: &str) -> Self {
        self.decls.push(Decl::Vertex {
            name: name.to_string(),
            context: context.to_string(),
            label: Some(label.to_string()),
            constant: true,
        });
        self
    }

    /// Declare an edge over previously declared vertices.
    pub fn edge(mut self, name: &str, context: &str, relation: &str, args: &[&str]) -> Self {
        self.decls.push(Decl::Edge {
            name: name.to_string(),
            context: context.to_string(),
            relation: relation.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn build(&self) -> ScenarioResult<(Graph, Names)> {
        let mut builder = GraphBuilder::new();
        let mut names = Names::default();

        for decl in &self.decls {
            match decl {
                Decl::Cut { name, parent } => {
                    let parent = names.context(parent)?;
                    names.claim(name)?;
                    let id = builder.cut(parent);
                    names.bind(name, ElementId::Cut(id))?;
                }
                Decl::Vertex {
                    name,
                    context,
                    label,
                    constant,
                } => {
                    let context = names.context(context)?;
                    names.claim(name)?;
                    let id = match (label, constant) {
                        (Some(label), true) => builder.constant_vertex(context, label.as_str()),
                        (Some(label), false) => builder.generic_vertex(context, label.as_str()),
                        (None, _) => builder.vertex(context),
                    };
                    names.bind(name, ElementId::Vertex(id))?;
                }
                Decl::Edge {
                    name,
                    context,
                    relation,
                    args,
                } => {
                    let context = names.context(context)?;
                    let args = args
                        .iter()
                        .map(|a| names.vertex(a))
                        .collect::<ScenarioResult<Vec<_>>>()?;
                    names.claim(name)?;
                    let id = builder.edge(context, relation.as_str(), &args);
                    names.bind(name, ElementId::Edge(id))?;
                }
            }
        }

        Ok((builder.build()?, names))
    }
}

/// Test names for graph elements. Every name is unique across kinds.
#[derive(Debug, Clone, Default)]
pub struct Names {
    elements: HashMap<String, ElementId>,
}

impl Names {
    /// Bind `name` to an element, e.g. one a rule just created.
    pub fn bind(&mut self, name: &str, element: ElementId) -> ScenarioResult<()> {
        self.claim(name)?;
        self.elements.insert(name.to_string(), element);
        Ok(())
    }

    pub fn element(&self, name: &str) -> ScenarioResult<ElementId> {
        self.elements
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::unknown_name(name))
    }

    pub fn context(&self, name: &str) -> ScenarioResult<ContextId> {
        if name == SHEET {
            return Ok(ContextId::Sheet);
        }
        Ok(ContextId::Cut(self.cut(name)?))
    }

    pub fn cut(&self, name: &str) -> ScenarioResult<CutId> {
        self.element(name)?
            .as_cut()
            .ok_or_else(|| ScenarioError::wrong_kind(name, "cut"))
    }

    pub fn vertex(&self, name: &str) -> ScenarioResult<VertexId> {
        self.element(name)?
            .as_vertex()
            .ok_or_else(|| ScenarioError::wrong_kind(name, "vertex"))
    }

    pub fn edge(&self, name: &str) -> ScenarioResult<EdgeId> {
        self.element(name)?
            .as_edge()
            .ok_or_else(|| ScenarioError::wrong_kind(name, "edge"))
    }

    /// Resolve several names at once.
    pub fn elements(&self, names: &[&str]) -> ScenarioResult<Vec<ElementId>> {
        names.iter().map(|n| self.element(n)).collect()
    }

    fn claim(&self, name: &str) -> ScenarioResult<()> {
        if name == SHEET {
            return Err(ScenarioError::ReservedName {
                name: name.to_string(),
            });
        }
        if self.elements.contains_key(name) {
            return Err(ScenarioError::duplicate_name(name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_resolves_names() {
        // GIVEN
        let fixture = Fixture::new()
            .cut("c1", SHEET)
            .variable("x", "c1")
            .edge("human", "c1", "Human", &["x"]);

        // WHEN
        let (graph, names) = fixture.build().unwrap();

        // THEN
        let c1 = names.context("c1").unwrap();
        let x = names.vertex("x").unwrap();
        assert_eq!(graph.context_of(x), Some(c1));
        assert_eq!(graph.vertex(x).unwrap().label(), Some("x"));
        assert_eq!(
            graph.incident_vertices(names.edge("human").unwrap()),
            Some(&[x][..])
        );
    }

    #[test]
    fn test_fixture_name_errors() {
        let reserved = Fixture::new().vertex(SHEET, SHEET).build();
        assert!(matches!(reserved, Err(ScenarioError::ReservedName { .. })));

        let duplicate = Fixture::new().vertex("x", SHEET).cut("x", SHEET).build();
        assert!(matches!(duplicate, Err(ScenarioError::DuplicateName { .. })));

        let unknown = Fixture::new().edge("p", SHEET, "P", &["y"]).build();
        assert!(matches!(unknown, Err(ScenarioError::UnknownName { .. })));

        let kind = Fixture::new().vertex("x", SHEET).vertex("y", "x").build();
        assert!(matches!(kind, Err(ScenarioError::WrongKind { .. })));
    }
}
