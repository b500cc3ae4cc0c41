//! Configuration for the rule engine

use peirce_pattern::SearchOptions;
use peirce_subgraph::DEFAULT_MAX_CLOSURE_ROUNDS;

/// Knobs for subgraph selection and copy search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    /// Widening rounds the extractor may spend closing a selection
    pub max_closure_rounds: usize,
    /// Scan candidate contexts in parallel when searching for copies
    pub parallel_search: bool,
    /// Fewest candidate contexts before the parallel scan kicks in
    pub parallel_search_threshold: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_closure_rounds: DEFAULT_MAX_CLOSURE_ROUNDS,
            parallel_search: true,
            parallel_search_threshold: 8,
        }
    }
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_closure_rounds(mut self, rounds: usize) -> Self {
        self.max_closure_rounds = rounds;
        self
    }

    pub fn with_parallel_search(mut self, enabled: bool) -> Self {
        self.parallel_search = enabled;
        self
    }

    pub fn with_parallel_search_threshold(mut self, threshold: usize) -> Self {
        self.parallel_search_threshold = threshold;
        self
    }

    /// Single-threaded search and a short closure budget.
    pub fn minimal() -> Self {
        Self {
            max_closure_rounds: 4,
            parallel_search: false,
            parallel_search_threshold: usize::MAX,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            parallel: self.parallel_search,
            parallel_threshold: self.parallel_search_threshold,
        }
    }
}
