//! Deterministic recognition
//!
//! This module runs an input string through a deterministic transition
//! table and records the route taken. A string that falls off the table
//! is a normal rejection, not an error; errors are only raised before
//! the run starts.

use crate::ast::is_operator;
use crate::error::RecognitionError;
use crate::transition::{StateId, Transition, find};
use serde::Serialize;

/// The outcome of a recognition run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecognitionResult {
    /// Whether the whole input was consumed and ended in an accepting state
    pub recognized: bool,
    /// The start state, then one `"<char> -> <state>"` step per consumed character
    pub route: Vec<String>,
}

/// Recognize `input` against a deterministic transition table
///
/// One-element target sets are accepted as deterministic, so NFA rows
/// without choices can be run too.
pub fn recognize(
    transitions: &[Transition],
    input: &str,
) -> Result<RecognitionResult, RecognitionError> {
    if let Some((position, ch)) = input.chars().enumerate().find(|(_, c)| is_operator(*c)) {
        return Err(RecognitionError::InvalidCharacter { ch, position });
    }

    let start = transitions
        .iter()
        .find(|row| row.start)
        .ok_or(RecognitionError::NoStartState)?;

    if let Some(row) = transitions.iter().find(|row| !is_deterministic(row)) {
        return Err(RecognitionError::Nondeterministic { state: row.from });
    }

    let mut current: StateId = start.from;
    let mut route = vec![current.to_string()];

    for c in input.chars() {
        let next = find(transitions, current).and_then(|row| row.next(c));
        match next {
            Some(next) => {
                route.push(format!("{} -> {}", c, next));
                current = next;
            }
            None => {
                return Ok(RecognitionResult {
                    recognized: false,
                    route,
                });
            }
        }
    }

    let recognized = find(transitions, current).is_some_and(|row| row.accepting);
    Ok(RecognitionResult { recognized, route })
}

fn is_deterministic(row: &Transition) -> bool {
    row.to
        .iter()
        .all(|(symbol, target)| !symbol.is_epsilon() && target.single().is_some())
}
