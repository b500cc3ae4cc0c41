//! Rule scenarios over small hand-written graphs.

use peirce_tests::prelude::*;

/// sheet: ~[ Human(x) ~[ Mortal(x) ] ] with x in the outer cut.
fn mortal() -> Fixture {
    Fixture::new()
        .cut("c1", SHEET)
        .variable("x", "c1")
        .edge("human", "c1", "Human", &["x"])
        .cut("c2", "c1")
        .edge("mortal", "c2", "Mortal", &["x"])
}

/// sheet: A(*x) B(*y) ~[ C(x) B(y) ].
fn abc() -> Fixture {
    Fixture::new()
        .variable("x", SHEET)
        .variable("y", SHEET)
        .edge("a", SHEET, "A", &["x"])
        .edge("b", SHEET, "B", &["y"])
        .cut("neg", SHEET)
        .edge("cx", "neg", "C", &["x"])
        .edge("by", "neg", "B", &["y"])
}

mod mortal {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("mortal")
            .fixture(mortal())
            .step(
                "erase human in negative cut",
                |s| {
                    Ok(RuleParams::Erasure {
                        subgraph: s.subgraph("c1", &["x", "human"])?,
                    })
                },
                |e| e.violation("negative-context"),
            )
            .step(
                "erase mortal in positive cut",
                |s| {
                    Ok(RuleParams::Erasure {
                        subgraph: s.subgraph("c2", &["x", "mortal"])?,
                    })
                },
                |e| e.removed(1).edges(1).vertices(1).cuts(2),
            )
    }

    #[test]
    fn test_erasure_follows_polarity() {
        let state = scenario().run().unwrap();

        let c2 = state.names().context("c2").unwrap();
        assert!(state.graph().direct_contents(c2).is_empty());
    }

    #[test]
    fn test_polarity_of_nested_cuts() {
        let (graph, names) = mortal().build().unwrap();
        let resolver = ContextResolver::new(&graph);

        let c1 = names.context("c1").unwrap();
        let c2 = names.context("c2").unwrap();
        assert_eq!(resolver.polarity(c1).unwrap(), Polarity::Negative);
        assert_eq!(resolver.polarity(c2).unwrap(), Polarity::Positive);
        assert_eq!(resolver.depth(c2).unwrap(), 2);
    }

    #[test]
    fn test_iterate_inward_then_deiterate() {
        let state = Scenario::new("iterate human")
            .fixture(mortal())
            .step(
                "iterate human into c2",
                |s| {
                    Ok(RuleParams::Iteration {
                        subgraph: s.subgraph("c1", &["x", "human"])?,
                        target: s.names().context("c2")?,
                    })
                },
                |e| e.created_edges(1).created_vertices(1).edges(3).vertices(2),
            )
            .step(
                "de-iterate the copy",
                |s| {
                    Ok(RuleParams::Deiteration {
                        copy: s.created()?.clone(),
                        base: s.subgraph("c1", &["x", "human"])?,
                    })
                },
                |e| e.removed(2).edges(2).vertices(1),
            )
            .run()
            .unwrap();

        assert_eq!(state.graph(), &state.history()[0]);
    }
}

mod abc {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("abc")
            .fixture(abc())
            .step(
                "iterate B(y) out to the sheet",
                |s| {
                    Ok(RuleParams::Iteration {
                        subgraph: s.subgraph("neg", &["y", "by"])?,
                        target: ContextId::Sheet,
                    })
                },
                |e| e.violation("invalid-nesting"),
            )
            .step(
                "iterate B(y) within the cut",
                |s| {
                    Ok(RuleParams::Iteration {
                        subgraph: s.subgraph("neg", &["y", "by"])?,
                        target: s.names().context("neg")?,
                    })
                },
                |e| e.created_edges(1).edges(5).vertices(2),
            )
    }

    #[test]
    fn test_iteration_respects_nesting() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_deiterate_inner_copy_of_sheet_edge() {
        Scenario::new("deiterate by")
            .fixture(abc())
            .step(
                "de-iterate B(y) in the cut against B(y) on the sheet",
                |s| {
                    Ok(RuleParams::Deiteration {
                        copy: s.subgraph("neg", &["y", "by"])?,
                        base: s.subgraph(SHEET, &["y", "b"])?,
                    })
                },
                |e| e.removed(1).edges(3),
            )
            .step(
                "C(x) is no copy of A(x)",
                |s| {
                    Ok(RuleParams::Deiteration {
                        copy: s.subgraph("neg", &["x", "cx"])?,
                        base: s.subgraph(SHEET, &["x", "a"])?,
                    })
                },
                |e| e.violation("non-identical-pattern"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_erase_selected_cut_keeps_identity_lines() {
        Scenario::new("erase neg")
            .fixture(abc())
            .step(
                "erase the whole cut",
                |s| {
                    Ok(RuleParams::Erasure {
                        subgraph: s.select(SHEET, &["by"])?,
                    })
                },
                |e| e.removed(3).cuts(0).edges(2).vertices(2),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_insert_into_negative_cut() {
        Scenario::new("insert")
            .fixture(abc())
            .step(
                "insert D(x) into the cut",
                |s| {
                    let mut fragment = Fragment::new();
                    fragment.edge(Placement::Target, "D", &[FragmentArg::Existing(s.vertex("x")?)]);
                    Ok(RuleParams::Insertion {
                        target: s.names().context("neg")?,
                        fragment,
                    })
                },
                |e| e.created_edges(1).created_vertices(1).edges(5),
            )
            .step(
                "insert on the sheet",
                |_| {
                    Ok(RuleParams::Insertion {
                        target: ContextId::Sheet,
                        fragment: Fragment::new(),
                    })
                },
                |e| e.violation("positive-context"),
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_find_copies_of_sheet_edge() {
        let (graph, names) = abc().build().unwrap();
        let engine = RuleEngine::new(&graph);
        let base = engine
            .select(
                [ElementId::Edge(names.edge("b").unwrap())],
                ContextId::Sheet,
            )
            .unwrap();

        let copies = engine.find_copies(&base).unwrap();

        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].root, names.context("neg").unwrap());
        assert!(copies[0].edges.contains(&names.edge("by").unwrap()));
    }
}

mod double_cut {
    use super::*;

    #[test]
    fn test_add_then_remove_double_cut() {
        let state = Scenario::new("double cut")
            .fixture(abc())
            .step_binding(
                "enclose A(x)",
                |s| {
                    Ok(RuleParams::DoubleCutAddition {
                        subgraph: s.subgraph(SHEET, &["x", "a"])?,
                    })
                },
                |e| e.created_cuts(2).cuts(3),
                &["outer", "inner"],
            )
            .step(
                "double cut with something between is not removable",
                |s| {
                    Ok(RuleParams::DoubleCutRemoval {
                        outer: s.names().cut("neg")?,
                        inner: s.names().cut("inner")?,
                    })
                },
                |e| e.violation("not-a-double-cut"),
            )
            .step(
                "remove the double cut",
                |s| {
                    Ok(RuleParams::DoubleCutRemoval {
                        outer: s.names().cut("outer")?,
                        inner: s.names().cut("inner")?,
                    })
                },
                |e| e.removed(2).cuts(1),
            )
            .run()
            .unwrap();

        // x stayed on the sheet because C(x) still uses it
        let x = state.names().vertex("x").unwrap();
        assert_eq!(state.graph().context_of(x), Some(ContextId::Sheet));
        assert_eq!(state.graph(), &state.history()[0]);
    }
}

mod isolated_vertex {
    use super::*;

    #[test]
    fn test_add_and_remove_constant() {
        let state = Scenario::new("isolated")
            .fixture(abc())
            .step_binding(
                "add Socrates",
                |_| {
                    Ok(RuleParams::IsolatedVertexAddition {
                        context: ContextId::Sheet,
                        vertex: NewVertex::constant("Socrates"),
                    })
                },
                |e| e.created_vertices(1).vertices(3),
                &["socrates"],
            )
            .step(
                "remove Socrates",
                |s| {
                    Ok(RuleParams::IsolatedVertexRemoval {
                        vertex: s.vertex("socrates")?,
                    })
                },
                |e| e.removed(1).vertices(2),
            )
            .step(
                "x is on an identity line",
                |s| {
                    Ok(RuleParams::IsolatedVertexRemoval {
                        vertex: s.vertex("x")?,
                    })
                },
                |e| e.violation("vertex-not-isolated"),
            )
            .run()
            .unwrap();

        assert_eq!(state.graph(), &state.history()[0]);
    }
}
