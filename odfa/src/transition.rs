//! Flattened transition records shared by every automaton kind
//!
//! NFA, DFA and reduced DFA all describe themselves as a list of
//! [`Transition`] rows, one per state. NFA rows map a symbol to a set of
//! targets; deterministic rows map it to exactly one.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A node tag or state id
pub type StateId = usize;

/// An edge label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A regular alphabet character
    Char(char),
    /// An epsilon edge (no input consumed)
    Epsilon,
}

impl Symbol {
    /// Returns true for the epsilon marker
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::Epsilon => write!(f, "ε"),
        }
    }
}

impl Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where an edge leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Target {
    /// Set of targets, used by the NFA
    Nondeterministic(BTreeSet<StateId>),
    /// Single target, used by the DFA and reduced DFA
    Deterministic(StateId),
}

impl Target {
    /// Iterate over every target id
    pub fn ids(&self) -> Box<dyn Iterator<Item = StateId> + '_> {
        match self {
            Target::Nondeterministic(set) => Box::new(set.iter().copied()),
            Target::Deterministic(id) => Box::new(std::iter::once(*id)),
        }
    }

    /// The single target, if this edge is deterministic in effect
    ///
    /// A one-element set counts as deterministic.
    pub fn single(&self) -> Option<StateId> {
        match self {
            Target::Deterministic(id) => Some(*id),
            Target::Nondeterministic(set) if set.len() == 1 => set.iter().next().copied(),
            Target::Nondeterministic(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Deterministic(id) => write!(f, "{}", id),
            Target::Nondeterministic(set) => {
                let ids: Vec<_> = set.iter().map(|id| id.to_string()).collect();
                write!(f, "{{{}}}", ids.join(", "))
            }
        }
    }
}

/// All outgoing edges of one state, plus its start/accepting flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// The source state
    pub from: StateId,
    /// Outgoing edges keyed by symbol, in insertion order
    pub to: IndexMap<Symbol, Target>,
    /// Whether `from` is the start state
    pub start: bool,
    /// Whether `from` is accepting
    pub accepting: bool,
}

impl Transition {
    /// Create a row with no edges
    pub fn new(from: StateId, start: bool, accepting: bool) -> Self {
        Transition {
            from,
            to: IndexMap::new(),
            start,
            accepting,
        }
    }

    /// The target reached on `c`, if this row has a deterministic edge for it
    pub fn next(&self, c: char) -> Option<StateId> {
        self.to.get(&Symbol::Char(c)).and_then(Target::single)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match (self.start, self.accepting) {
            (true, true) => "->*",
            (true, false) => "-> ",
            (false, true) => "  *",
            (false, false) => "   ",
        };
        let edges: Vec<_> = self
            .to
            .iter()
            .map(|(symbol, target)| format!("{} -> {}", symbol, target))
            .collect();
        write!(f, "{} {:>3} | {}", marker, self.from, edges.join(", "))
    }
}

/// Find the row for a given source state
pub fn find(transitions: &[Transition], from: StateId) -> Option<&Transition> {
    transitions.iter().find(|t| t.from == from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::Char('a').to_string(), "a");
        assert_eq!(Symbol::Epsilon.to_string(), "ε");
    }

    #[test]
    fn test_target_single() {
        assert_eq!(Target::Deterministic(3).single(), Some(3));
        let one: BTreeSet<_> = [4].into_iter().collect();
        assert_eq!(Target::Nondeterministic(one).single(), Some(4));
        let two: BTreeSet<_> = [4, 5].into_iter().collect();
        assert_eq!(Target::Nondeterministic(two).single(), None);
    }

    #[test]
    fn test_target_ids() {
        let set: BTreeSet<_> = [2, 1].into_iter().collect();
        let ids: Vec<_> = Target::Nondeterministic(set).ids().collect();
        assert_eq!(ids, vec![1, 2]);
        let ids: Vec<_> = Target::Deterministic(7).ids().collect();
        assert_eq!(ids, vec![7]);
    }

    #[test]
    fn test_transition_display() {
        let mut row = Transition::new(0, true, false);
        row.to.insert(Symbol::Char('a'), Target::Deterministic(1));
        row.to.insert(Symbol::Char('b'), Target::Deterministic(2));
        assert_eq!(row.to_string(), "->    0 | a -> 1, b -> 2");
    }

    #[test]
    fn test_transition_next() {
        let mut row = Transition::new(0, true, false);
        row.to.insert(Symbol::Char('a'), Target::Deterministic(1));
        row.to
            .insert(Symbol::Epsilon, Target::Nondeterministic([2, 3].into()));
        assert_eq!(row.next('a'), Some(1));
        assert_eq!(row.next('b'), None);
    }

    #[test]
    fn test_transition_serializes() {
        let mut row = Transition::new(2, false, true);
        row.to.insert(Symbol::Char('a'), Target::Deterministic(1));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"from":2,"to":{"a":1},"start":false,"accepting":true}"#
        );
    }
}
