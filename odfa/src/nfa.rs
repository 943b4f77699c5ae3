//! NFA (Nondeterministic Finite Automaton) construction
//!
//! This module implements Thompson's construction to build an NFA from a
//! syntax tree, the flattened transition table derived from it, and the
//! two set primitives subset construction relies on: epsilon-closure and
//! move.
//!
//! Nodes live in an arena and edges refer to them by tag, so the back
//! edges introduced by `*` and `+` need no special handling.

use crate::ast::Expr;
use crate::config::BuildOptions;
use crate::error::{AutomatonError, Result};
use crate::transition::{StateId, Symbol, Target, Transition};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashSet};

/// A node of the NFA graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaNode {
    /// Tag, equal to the node's index in the arena
    pub tag: StateId,
    /// Whether this is the accepting node
    pub is_accepting: bool,
    /// Outgoing edges, in creation order
    pub edges: Vec<(Symbol, StateId)>,
}

impl NfaNode {
    fn new(tag: StateId) -> Self {
        NfaNode {
            tag,
            is_accepting: false,
            edges: Vec::new(),
        }
    }

    /// A node is significant when it has no outgoing epsilon edge
    pub fn is_significant(&self) -> bool {
        !self.edges.iter().any(|(symbol, _)| symbol.is_epsilon())
    }
}

/// An NFA (Nondeterministic Finite Automaton)
#[derive(Debug, Clone)]
pub struct Nfa {
    /// All nodes, indexed by tag
    pub nodes: Vec<NfaNode>,
    /// The start node
    pub start: StateId,
    /// The accepting node
    pub accepting: StateId,
    /// One row per node reachable from `start`
    pub transitions: Vec<Transition>,
}

/// Allocates nodes for a single build
///
/// The tag counter lives here, so independent builds never share tags.
struct Builder {
    nodes: Vec<NfaNode>,
    limit: Option<usize>,
}

impl Builder {
    fn new(limit: Option<usize>) -> Self {
        Builder {
            nodes: Vec::new(),
            limit,
        }
    }

    /// Allocate a new node and return its tag
    fn new_node(&mut self) -> Result<StateId> {
        let tag = self.nodes.len();
        if let Some(limit) = self.limit {
            if tag >= limit {
                return Err(AutomatonError::NodeLimitExceeded { limit });
            }
        }
        self.nodes.push(NfaNode::new(tag));
        Ok(tag)
    }

    fn add_edge(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.nodes[from].edges.push((symbol, to));
    }

    /// Build `expr` starting at `initial` and return the fragment's accepting node
    fn build(&mut self, expr: &Expr, initial: StateId) -> Result<StateId> {
        match expr {
            Expr::Literal(c) => {
                let accepting = self.new_node()?;
                self.add_edge(initial, Symbol::Char(*c), accepting);
                Ok(accepting)
            }
            Expr::Concatenation(parts) => {
                let mut accepting = initial;
                for part in parts {
                    accepting = self.build(part, accepting)?;
                }
                Ok(accepting)
            }
            Expr::Alternation(parts) => {
                let mut ends = Vec::with_capacity(parts.len());
                for part in parts {
                    let branch = self.new_node()?;
                    self.add_edge(initial, Symbol::Epsilon, branch);
                    ends.push(self.build(part, branch)?);
                }
                let accepting = self.new_node()?;
                for end in ends {
                    self.add_edge(end, Symbol::Epsilon, accepting);
                }
                Ok(accepting)
            }
            Expr::Star(sub) => self.build_repeat(sub, initial, true, true),
            Expr::Plus(sub) => self.build_repeat(sub, initial, true, false),
            Expr::Optional(sub) => self.build_repeat(sub, initial, false, true),
        }
    }

    /// Shared shape of `*`, `+` and `?`
    fn build_repeat(
        &mut self,
        sub: &Expr,
        initial: StateId,
        repeat: bool,
        skippable: bool,
    ) -> Result<StateId> {
        let temp = self.new_node()?;
        self.add_edge(initial, Symbol::Epsilon, temp);
        let inner = self.build(sub, temp)?;
        if repeat {
            self.add_edge(inner, Symbol::Epsilon, temp);
        }
        let accepting = self.new_node()?;
        self.add_edge(inner, Symbol::Epsilon, accepting);
        if skippable {
            self.add_edge(initial, Symbol::Epsilon, accepting);
        }
        Ok(accepting)
    }
}

impl Nfa {
    /// Build an NFA from a syntax tree with no size limit
    pub fn from_expr(expr: &Expr) -> Result<Self> {
        Self::with_options(expr, &BuildOptions::default())
    }

    /// Build an NFA from a syntax tree, honoring `options.max_nfa_nodes`
    pub fn with_options(expr: &Expr, options: &BuildOptions) -> Result<Self> {
        let mut builder = Builder::new(options.max_nfa_nodes);
        let start = builder.new_node()?;
        let accepting = builder.build(expr, start)?;
        builder.nodes[accepting].is_accepting = true;

        let mut nfa = Nfa {
            nodes: builder.nodes,
            start,
            accepting,
            transitions: Vec::new(),
        };
        nfa.transitions = nfa.transition_table();
        Ok(nfa)
    }

    /// Look up a node by tag
    pub fn node(&self, tag: StateId) -> Option<&NfaNode> {
        self.nodes.get(tag)
    }

    /// Flatten the graph into one row per node reachable from `start`
    ///
    /// Rows appear in depth-first pre-order; edges are grouped by symbol.
    fn transition_table(&self) -> Vec<Transition> {
        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![self.start];

        while let Some(tag) = stack.pop() {
            if !visited.insert(tag) {
                continue;
            }
            let node = &self.nodes[tag];

            let mut grouped: IndexMap<Symbol, BTreeSet<StateId>> = IndexMap::new();
            for (symbol, target) in &node.edges {
                grouped.entry(*symbol).or_default().insert(*target);
            }

            let mut row = Transition::new(tag, tag == self.start, node.is_accepting);
            row.to = grouped
                .into_iter()
                .map(|(symbol, targets)| (symbol, Target::Nondeterministic(targets)))
                .collect();
            rows.push(row);

            // Reverse so the first edge is explored first
            for (_, target) in node.edges.iter().rev() {
                if !visited.contains(target) {
                    stack.push(*target);
                }
            }
        }

        rows
    }

    /// Every node reachable from `states` through epsilon edges alone,
    /// including `states` themselves
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<_> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for (symbol, target) in &self.nodes[state].edges {
                if symbol.is_epsilon() && closure.insert(*target) {
                    stack.push(*target);
                }
            }
        }

        closure
    }

    /// Every node reachable from `states` through exactly one `c` edge
    pub fn move_on(&self, states: &BTreeSet<StateId>, c: char) -> BTreeSet<StateId> {
        states
            .iter()
            .flat_map(|&state| self.nodes[state].edges.iter())
            .filter(|(symbol, _)| *symbol == Symbol::Char(c))
            .map(|(_, target)| *target)
            .collect()
    }

    /// Whether any node in `states` is accepting
    pub fn contains_accepting(&self, states: &BTreeSet<StateId>) -> bool {
        states.iter().any(|&tag| self.nodes[tag].is_accepting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn build(pattern: &str) -> Nfa {
        Nfa::from_expr(&parse(pattern).unwrap()).unwrap()
    }

    fn set(tags: &[StateId]) -> BTreeSet<StateId> {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_nfa_from_literal() {
        let nfa = build("a");
        assert_eq!(nfa.nodes.len(), 2);
        assert_eq!(nfa.start, 0);
        assert_eq!(nfa.accepting, 1);
        assert!(!nfa.node(nfa.start).unwrap().is_accepting);
        assert!(nfa.node(nfa.accepting).unwrap().is_accepting);
        assert_eq!(nfa.node(0).unwrap().edges, vec![(Symbol::Char('a'), 1)]);
    }

    #[test]
    fn test_nfa_from_concatenation() {
        let nfa = build("ab");
        assert_eq!(nfa.nodes.len(), 3);
        assert_eq!(nfa.node(1).unwrap().edges, vec![(Symbol::Char('b'), 2)]);
        assert_eq!(nfa.accepting, 2);
    }

    #[test]
    fn test_nfa_from_alternation() {
        let nfa = build("a|b");
        // start, two branches, two literals, shared accept
        assert_eq!(nfa.nodes.len(), 6);
        assert_eq!(
            nfa.node(0).unwrap().edges,
            vec![(Symbol::Epsilon, 1), (Symbol::Epsilon, 3)]
        );
        assert_eq!(nfa.node(2).unwrap().edges, vec![(Symbol::Epsilon, 5)]);
        assert_eq!(nfa.node(4).unwrap().edges, vec![(Symbol::Epsilon, 5)]);
        assert_eq!(nfa.accepting, 5);
    }

    #[test]
    fn test_nfa_from_star() {
        let nfa = build("a*");
        assert_eq!(nfa.nodes.len(), 4);
        assert_eq!(
            nfa.node(0).unwrap().edges,
            vec![(Symbol::Epsilon, 1), (Symbol::Epsilon, 3)]
        );
        assert_eq!(
            nfa.node(2).unwrap().edges,
            vec![(Symbol::Epsilon, 1), (Symbol::Epsilon, 3)]
        );
    }

    #[test]
    fn test_nfa_from_plus() {
        let nfa = build("a+");
        assert_eq!(nfa.node(0).unwrap().edges, vec![(Symbol::Epsilon, 1)]);
        assert_eq!(
            nfa.node(2).unwrap().edges,
            vec![(Symbol::Epsilon, 1), (Symbol::Epsilon, 3)]
        );
    }

    #[test]
    fn test_nfa_from_optional() {
        let nfa = build("a?");
        assert_eq!(
            nfa.node(0).unwrap().edges,
            vec![(Symbol::Epsilon, 1), (Symbol::Epsilon, 3)]
        );
        assert_eq!(nfa.node(2).unwrap().edges, vec![(Symbol::Epsilon, 3)]);
    }

    #[test]
    fn test_tags_are_per_build() {
        let first = build("ab");
        let second = build("ab");
        assert_eq!(first.start, second.start);
        assert_eq!(first.accepting, second.accepting);
    }

    #[test]
    fn test_transition_rows_are_unique() {
        let nfa = build("(a|b)*c(d|e)+f?");
        let froms: HashSet<_> = nfa.transitions.iter().map(|t| t.from).collect();
        assert_eq!(froms.len(), nfa.transitions.len());
        assert_eq!(nfa.transitions.len(), nfa.nodes.len());
    }

    #[test]
    fn test_transition_rows_group_by_symbol() {
        let nfa = build("a*");
        let row = &nfa.transitions[0];
        assert_eq!(row.from, 0);
        assert!(row.start);
        assert!(!row.accepting);
        assert_eq!(
            row.to.get(&Symbol::Epsilon),
            Some(&Target::Nondeterministic(set(&[1, 3])))
        );
        let accept_row = nfa.transitions.iter().find(|t| t.from == 3).unwrap();
        assert!(accept_row.accepting);
        assert!(accept_row.to.is_empty());
    }

    #[test]
    fn test_epsilon_closure() {
        let nfa = build("a*");
        assert_eq!(nfa.epsilon_closure(&set(&[0])), set(&[0, 1, 3]));
        assert_eq!(nfa.epsilon_closure(&set(&[2])), set(&[1, 2, 3]));
    }

    #[test]
    fn test_epsilon_closure_is_idempotent() {
        let nfa = build("(a|b)*c");
        for tag in 0..nfa.nodes.len() {
            let once = nfa.epsilon_closure(&set(&[tag]));
            assert!(once.contains(&tag));
            assert_eq!(nfa.epsilon_closure(&once), once);
        }
    }

    #[test]
    fn test_move_on() {
        let nfa = build("a|b");
        let closure = nfa.epsilon_closure(&set(&[0]));
        assert_eq!(nfa.move_on(&closure, 'a'), set(&[2]));
        assert_eq!(nfa.move_on(&closure, 'b'), set(&[4]));
        assert!(nfa.move_on(&closure, 'c').is_empty());
    }

    #[test]
    fn test_significant_nodes() {
        let nfa = build("a|b");
        assert!(!nfa.node(0).unwrap().is_significant());
        assert!(nfa.node(1).unwrap().is_significant());
        assert!(nfa.node(5).unwrap().is_significant());
    }

    #[test]
    fn test_node_outside_arena() {
        let nfa = build("a|b");
        assert_eq!(nfa.nodes.len(), 6);
        assert!(nfa.node(6).is_none());
    }

    #[test]
    fn test_node_limit() {
        let expr = parse("(a|b)*").unwrap();
        let options = BuildOptions::new().with_max_nfa_nodes(3);
        let err = Nfa::with_options(&expr, &options).unwrap_err();
        assert_eq!(err, AutomatonError::NodeLimitExceeded { limit: 3 });
    }
}
