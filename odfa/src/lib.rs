//! Odfa Core Library
//!
//! Compiles a small regex dialect into finite automata and tests strings
//! against them. The pipeline runs parse -> Thompson NFA -> subset
//! construction DFA -> equivalence-reduced DFA ("ODFA"), and every stage
//! exposes a flat transition table plus a graph export for renderers.

pub mod ast;
pub mod automaton;
pub mod config;
pub mod dfa;
pub mod engine;
pub mod error;
pub mod graph;
pub mod nfa;
pub mod parser;
pub mod reduce;
pub mod transition;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ast::Expr;
pub use automaton::{Automaton, AutomatonKind};
pub use config::{BuildOptions, DEFAULT_MAX_DEPTH};
pub use dfa::{Dfa, DfaState};
pub use engine::{RecognitionResult, recognize};
pub use error::{AutomatonError, RecognitionError, Result, SyntaxError};
pub use graph::{Graph, export_graph};
pub use nfa::{Nfa, NfaNode};
pub use parser::{Parser, parse, symbols};
pub use reduce::{Equal, Odfa};
pub use transition::{StateId, Symbol, Target, Transition};

/// Parse a pattern and build its Thompson NFA
pub fn build_nfa(pattern: &str) -> Result<Nfa> {
    let expr = parse(pattern)?;
    Nfa::from_expr(&expr)
}

/// Parse a pattern and build its DFA
pub fn build_dfa(pattern: &str) -> Result<Dfa> {
    let nfa = build_nfa(pattern)?;
    Dfa::from_nfa(&nfa, &symbols(pattern))
}

/// Parse a pattern and build its equivalence-reduced DFA
pub fn build_odfa(pattern: &str) -> Result<Odfa> {
    let nfa = build_nfa(pattern)?;
    let dfa = Dfa::from_nfa(&nfa, &symbols(pattern))?;
    Ok(Odfa::from_dfa(dfa, &nfa))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        // pattern -> tree -> NFA -> DFA -> ODFA -> recognition
        let odfa = build_odfa("(a|b)*abb").unwrap();
        let result = recognize(&odfa.transitions, "babb").unwrap();
        assert!(result.recognized);
        assert_eq!(result.route.len(), 5);
    }

    #[test]
    fn test_build_functions_agree() {
        let dfa = build_dfa("ab*").unwrap();
        let odfa = build_odfa("ab*").unwrap();
        for input in ["a", "ab", "abbb", "b", ""] {
            assert_eq!(
                recognize(&dfa.transitions, input).unwrap().recognized,
                recognize(&odfa.transitions, input).unwrap().recognized,
                "Failed for input: {}",
                input
            );
        }
    }
}
