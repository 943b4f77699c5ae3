//! Build options
//!
//! Subset construction is exponential in the worst case, so callers that
//! accept untrusted patterns can cap how large the automata may grow.
//! Group nesting is always capped, since parsing and construction recurse
//! once per level.

/// Default cap on nested groups
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits applied while building automata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Maximum number of NFA nodes Thompson construction may allocate
    pub max_nfa_nodes: Option<usize>,
    /// Maximum number of DFA states subset construction may discover
    pub max_dfa_states: Option<usize>,
    /// Maximum number of groups open at once while parsing
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            max_nfa_nodes: None,
            max_dfa_states: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildOptions {
    /// Options with no size limits and the default nesting cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of NFA nodes
    pub fn with_max_nfa_nodes(mut self, limit: usize) -> Self {
        self.max_nfa_nodes = Some(limit);
        self
    }

    /// Cap the number of DFA states
    pub fn with_max_dfa_states(mut self, limit: usize) -> Self {
        self.max_dfa_states = Some(limit);
        self
    }

    /// Cap the number of nested groups
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }
}
