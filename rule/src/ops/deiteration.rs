//! De-iteration - remove a copy whose original sits at the same level or further out.

use peirce_context::ContextResolver;
use peirce_core::{ElementId, VertexId};
use peirce_pattern::Matcher;
use peirce_subgraph::Subgraph;
use std::collections::BTreeSet;

use crate::error::{RuleViolation, ViolationResult};
use crate::params::RuleKind;
use crate::result::RuleDelta;
use crate::validation::{removal_delta, require_closed, require_same_or_deeper, require_well_formed};

/// Validate removing `copy` on the strength of `base`.
///
/// Checks run in a fixed order: both selections well formed, nesting, overlap,
/// identity, then closedness of what would be removed. Vertices the matcher maps
/// onto themselves belong to both sides and are never removed.
pub fn validate_deiteration(
    resolver: &ContextResolver<'_>,
    copy: &Subgraph,
    base: &Subgraph,
) -> ViolationResult<RuleDelta> {
    require_well_formed(resolver, base)?;
    require_well_formed(resolver, copy)?;
    require_same_or_deeper(resolver, base.root, copy.root)?;
    check_disjoint(copy, base)?;

    let bindings = Matcher::new(resolver, base)?.match_copy(copy)?;
    let shared: BTreeSet<VertexId> = bindings.shared_vertices();

    let graph = resolver.graph();
    require_closed(graph, copy, &shared)?;

    let removed: BTreeSet<ElementId> = copy
        .interior_elements(graph)
        .into_iter()
        .filter(|e| e.as_vertex().map_or(true, |v| !shared.contains(&v)))
        .collect();
    let changes = removal_delta(&removed);
    Ok(RuleDelta::new(RuleKind::Deiteration, changes).with_removed(removed))
}

fn check_disjoint(copy: &Subgraph, base: &Subgraph) -> ViolationResult<()> {
    let overlapping = copy.edges.iter().any(|e| base.edges.contains(e))
        || copy.cuts.iter().any(|c| base.cuts.contains(c))
        || base.covers(copy.root)
        || copy.covers(base.root);
    if overlapping {
        return Err(RuleViolation::malformed_target("copy and base overlap"));
    }
    Ok(())
}
