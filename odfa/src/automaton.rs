//! One entry point for all three automaton kinds
//!
//! [`Automaton::build`] parses a pattern and runs the pipeline as far as
//! the requested kind needs, keeping the outputs a presentation layer
//! consumes: the alphabet, the transition table, and for the
//! deterministic kinds the states (and merged groups).

use crate::config::BuildOptions;
use crate::dfa::{Dfa, DfaState};
use crate::engine::{self, RecognitionResult};
use crate::error::{RecognitionError, Result};
use crate::graph::{self, Graph};
use crate::nfa::Nfa;
use crate::parser::{Parser, symbols};
use crate::reduce::{Equal, Odfa};
use crate::transition::Transition;
use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;

/// Which automaton to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutomatonKind {
    /// Thompson NFA
    Nfa,
    /// Subset-construction DFA
    Dfa,
    /// DFA after equivalence reduction
    Odfa,
}

impl AutomatonKind {
    /// Whether the kind has a deterministic recognizer
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, AutomatonKind::Nfa)
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AutomatonKind::Nfa => "nfa",
            AutomatonKind::Dfa => "dfa",
            AutomatonKind::Odfa => "odfa",
        };
        f.write_str(name)
    }
}

impl FromStr for AutomatonKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfa" => Ok(AutomatonKind::Nfa),
            "dfa" => Ok(AutomatonKind::Dfa),
            "odfa" => Ok(AutomatonKind::Odfa),
            other => Err(format!("unknown automaton kind '{}'", other)),
        }
    }
}

/// A built automaton and everything derived from it
#[derive(Debug, Clone)]
pub struct Automaton {
    /// The kind that was built
    pub kind: AutomatonKind,
    /// The source pattern
    pub pattern: String,
    /// Alphabet characters, in order of first appearance
    pub symbols: IndexSet<char>,
    /// The transition table
    pub transitions: Vec<Transition>,
    /// DFA states (DFA and ODFA only)
    pub states: Option<Vec<DfaState>>,
    /// Merged groups (ODFA only)
    pub equals: Option<Vec<Equal>>,
}

impl Automaton {
    /// Build an automaton of the given kind with no size limits
    pub fn new(kind: AutomatonKind, pattern: &str) -> Result<Self> {
        Self::build(kind, pattern, &BuildOptions::default())
    }

    /// Build an automaton of the given kind
    pub fn build(kind: AutomatonKind, pattern: &str, options: &BuildOptions) -> Result<Self> {
        let expr = Parser::with_max_depth(pattern, options.max_depth).parse()?;
        let alphabet = symbols(pattern);
        let nfa = Nfa::with_options(&expr, options)?;

        let mut automaton = Automaton {
            kind,
            pattern: pattern.to_string(),
            symbols: alphabet,
            transitions: Vec::new(),
            states: None,
            equals: None,
        };

        match kind {
            AutomatonKind::Nfa => {
                automaton.transitions = nfa.transitions;
            }
            AutomatonKind::Dfa => {
                let dfa = Dfa::with_options(&nfa, &automaton.symbols, options)?;
                automaton.transitions = dfa.transitions;
                automaton.states = Some(dfa.states);
            }
            AutomatonKind::Odfa => {
                let dfa = Dfa::with_options(&nfa, &automaton.symbols, options)?;
                let odfa = Odfa::from_dfa(dfa, &nfa);
                automaton.transitions = odfa.transitions;
                automaton.states = Some(odfa.states);
                automaton.equals = Some(odfa.equals);
            }
        }

        Ok(automaton)
    }

    /// Run `input` through the automaton
    ///
    /// NFAs have no deterministic recognizer and always yield
    /// [`RecognitionError::Nondeterministic`] for their start node.
    pub fn recognize(&self, input: &str) -> Result<RecognitionResult> {
        if !self.kind.is_deterministic() {
            let state = self
                .transitions
                .iter()
                .find(|row| row.start)
                .map_or(0, |row| row.from);
            return Err(RecognitionError::Nondeterministic { state }.into());
        }
        Ok(engine::recognize(&self.transitions, input)?)
    }

    /// Export the transition table as a graph
    pub fn graph(&self) -> Graph {
        graph::export_graph(&self.transitions)
    }

    /// Print a formatted report of the build
    pub fn report(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Report", self.kind.to_string().to_uppercase())?;
        writeln!(f, "==========")?;
        writeln!(f, "Pattern: {}", self.pattern)?;
        let alphabet: Vec<_> = self.symbols.iter().map(|c| c.to_string()).collect();
        writeln!(f, "Symbols: {{{}}}", alphabet.join(", "))?;

        writeln!(f, "Transitions:")?;
        for row in &self.transitions {
            writeln!(f, "  {}", row)?;
        }

        if let Some(states) = &self.states {
            writeln!(f, "States:")?;
            for state in states {
                let label: Vec<_> = state.label.iter().map(|tag| tag.to_string()).collect();
                writeln!(f, "  {:>3} = {{{}}}", state.id, label.join(", "))?;
            }
        }

        if let Some(equals) = &self.equals {
            writeln!(f, "Equals:")?;
            for group in equals {
                let members: Vec<_> = group.equals.iter().map(|id| id.to_string()).collect();
                writeln!(f, "  {:>3} = {}", group.tag, members.join(", "))?;
            }
        }

        Ok(())
    }
}
