//! Error types for automaton construction and recognition
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by the stage that produced them: parsing the
//! regex, building the automata, or running the recognizer.

use thiserror::Error;

/// The main error type for the crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutomatonError {
    /// The regex could not be parsed
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// An input string could not be run against an automaton
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Thompson construction allocated more nodes than allowed
    #[error("NFA node limit of {limit} exceeded")]
    NodeLimitExceeded {
        /// The configured limit
        limit: usize,
    },

    /// Subset construction discovered more states than allowed
    #[error("DFA state limit of {limit} exceeded")]
    StateLimitExceeded {
        /// The configured limit
        limit: usize,
    },
}

/// Errors raised while parsing a regex into a syntax tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The pattern ended right after a `|`
    #[error("unexpected end of input after '|'")]
    UnexpectedEndOfInput,

    /// A term with no factors, such as an empty alternative or `()`
    #[error("empty term at position {position}")]
    EmptyTerm {
        /// Where the empty term begins
        position: usize,
    },

    /// A `(` was never closed
    #[error("unmatched parenthesis opened at position {position}")]
    UnmatchedParenthesis {
        /// Position of the opening parenthesis
        position: usize,
    },

    /// An operator appeared where an atom was expected
    #[error("unexpected operator '{ch}' at position {position}")]
    UnexpectedOperator {
        /// The offending operator
        ch: char,
        /// Its position in the pattern (in characters)
        position: usize,
    },

    /// More groups were open at once than the nesting cap allows
    #[error("groups nested deeper than {limit} at position {position}")]
    NestingTooDeep {
        /// Position of the `(` that crossed the cap
        position: usize,
        /// The configured cap
        limit: usize,
    },
}

/// Errors raised before a recognition run starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// The input contains a reserved operator character
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter {
        /// The offending character
        ch: char,
        /// Its position in the input (in characters)
        position: usize,
    },

    /// No transition record is flagged as the start state
    #[error("no start state found in transitions")]
    NoStartState,

    /// The transition set has epsilon or multi-target edges
    #[error("state {state} has nondeterministic transitions")]
    Nondeterministic {
        /// The first offending state
        state: usize,
    },
}

/// Result type alias for automaton operations
pub type Result<T> = std::result::Result<T, AutomatonError>;
