//! Insertion - add any graph into a negative context.

use peirce_context::ContextResolver;
use peirce_core::{ContextId, ElementId};
use peirce_pattern::Fragment;

use crate::error::{RuleViolation, ViolationResult};
use crate::params::RuleKind;
use crate::result::RuleDelta;
use crate::validation::{check_polarity, require_valid_names, PolarityRequirement};

/// Validate insertion of `fragment` into `target`.
pub fn validate_insertion(
    resolver: &ContextResolver<'_>,
    target: ContextId,
    fragment: &Fragment,
) -> ViolationResult<RuleDelta> {
    check_polarity(resolver, target, PolarityRequirement::Negative)?;
    fragment.validate()?;

    let graph = resolver.graph();
    for vertex in fragment.existing_vertices() {
        let context = graph
            .context_of(vertex)
            .ok_or(RuleViolation::UnknownElement(ElementId::Vertex(vertex)))?;
        if !resolver.encloses(context, target)? {
            return Err(RuleViolation::malformed_target(format!(
                "{} lives in {}, which does not enclose {}",
                vertex, context, target
            )));
        }
    }

    let mut ids = graph.allocator();
    let materialized = fragment.materialize(target, &mut ids)?;
    require_valid_names(&materialized.delta)?;
    Ok(RuleDelta::new(RuleKind::Insertion, materialized.delta).with_created(materialized.created))
}
