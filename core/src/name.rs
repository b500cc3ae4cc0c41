//! Relation-name and label validation.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// A name is one token: no whitespace and none of the EGIF delimiters.
static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s()\[\]~*]+$").expect("name pattern is a valid regex"));

/// Check that a relation name can label an edge.
pub fn is_valid_relation_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Check that a vertex label (constant name or variable name) is well formed.
pub fn is_valid_label(label: &str) -> bool {
    NAME.is_match(label)
}
