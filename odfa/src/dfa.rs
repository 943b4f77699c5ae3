//! Subset construction (NFA to DFA)
//!
//! Each DFA state stands for an epsilon-closed set of NFA nodes, its
//! label. Two states are the same state exactly when their labels are
//! equal, so labels are kept as sorted sets and used as map keys.

use crate::config::BuildOptions;
use crate::error::{AutomatonError, Result};
use crate::nfa::Nfa;
use crate::transition::{StateId, Symbol, Target, Transition};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// A state discovered by subset construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfaState {
    /// State id, assigned in discovery order starting at 0
    pub id: StateId,
    /// The NFA node tags this state represents
    pub label: BTreeSet<StateId>,
    /// Worklist flag, set once the state's edges have been computed
    pub marked: bool,
}

/// A DFA (Deterministic Finite Automaton)
#[derive(Debug, Clone)]
pub struct Dfa {
    /// All states, indexed by id
    pub states: Vec<DfaState>,
    /// One row per state
    pub transitions: Vec<Transition>,
}

impl Dfa {
    /// Run subset construction over `symbols` with no size limit
    pub fn from_nfa(nfa: &Nfa, symbols: &IndexSet<char>) -> Result<Self> {
        Self::with_options(nfa, symbols, &BuildOptions::default())
    }

    /// Run subset construction, honoring `options.max_dfa_states`
    pub fn with_options(
        nfa: &Nfa,
        symbols: &IndexSet<char>,
        options: &BuildOptions,
    ) -> Result<Self> {
        let mut states: Vec<DfaState> = Vec::new();
        let mut by_label: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
        let mut transitions = Vec::new();

        let initial = nfa.epsilon_closure(&[nfa.start].into_iter().collect());
        by_label.insert(initial.clone(), 0);
        states.push(DfaState {
            id: 0,
            label: initial,
            marked: false,
        });

        while let Some(current) = states.iter().position(|state| !state.marked) {
            states[current].marked = true;

            let accepting = nfa.contains_accepting(&states[current].label);
            let mut row = Transition::new(current, current == 0, accepting);

            for &c in symbols {
                let next = nfa.epsilon_closure(&nfa.move_on(&states[current].label, c));
                if next.is_empty() {
                    continue;
                }

                let target = match by_label.get(&next) {
                    Some(&existing) => existing,
                    None => {
                        let id = states.len();
                        if let Some(limit) = options.max_dfa_states {
                            if id >= limit {
                                return Err(AutomatonError::StateLimitExceeded { limit });
                            }
                        }
                        by_label.insert(next.clone(), id);
                        states.push(DfaState {
                            id,
                            label: next,
                            marked: false,
                        });
                        id
                    }
                };
                row.to.insert(Symbol::Char(c), Target::Deterministic(target));
            }

            transitions.push(row);
        }

        Ok(Dfa {
            states,
            transitions,
        })
    }

    /// Look up a state by id
    pub fn state(&self, id: StateId) -> Option<&DfaState> {
        self.states.get(id)
    }
}
