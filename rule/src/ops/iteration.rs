//! Iteration - copy a subgraph into the same or a deeper context.

use peirce_context::ContextResolver;
use peirce_core::ContextId;
use peirce_pattern::Fragment;
use peirce_subgraph::Subgraph;

use crate::error::{RuleViolation, ViolationResult};
use crate::params::RuleKind;
use crate::result::RuleDelta;
use crate::validation::{require_same_or_deeper, require_well_formed};

/// Validate iteration of `subgraph` into `target`.
///
/// Interior elements get fresh ids. Boundary vertices are not copied: the copy's
/// edges attach to the originals, which is what keeps the identity line intact.
pub fn validate_iteration(
    resolver: &ContextResolver<'_>,
    subgraph: &Subgraph,
    target: ContextId,
) -> ViolationResult<RuleDelta> {
    require_well_formed(resolver, subgraph)?;
    require_same_or_deeper(resolver, subgraph.root, target)?;
    if subgraph.covers(target) {
        return Err(RuleViolation::malformed_target(format!(
            "{} lies inside the iterated subgraph",
            target
        )));
    }

    let graph = resolver.graph();
    let fragment = Fragment::from_subgraph(graph, subgraph)?;
    let mut ids = graph.allocator();
    let materialized = fragment.materialize(target, &mut ids)?;
    Ok(RuleDelta::new(RuleKind::Iteration, materialized.delta).with_created(materialized.created))
}
