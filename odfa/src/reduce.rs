//! Equivalence reduction of a DFA ("ODFA")
//!
//! Only NFA nodes without outgoing epsilon edges decide how a DFA state
//! behaves: they carry every character edge, and the accepting node is
//! one of them. Stripping the other nodes from each label and merging
//! states whose stripped labels are equal therefore preserves the
//! recognized language.

use crate::dfa::{Dfa, DfaState};
use crate::nfa::{Nfa, NfaNode};
use crate::transition::{StateId, Target, Transition};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// A group of states folded into one canonical state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equal {
    /// The canonical (lowest) state id of the group
    pub tag: StateId,
    /// The other members, in ascending order
    pub equals: Vec<StateId>,
}

/// A DFA after equivalence reduction
#[derive(Debug, Clone)]
pub struct Odfa {
    /// Every original state, with its label reduced to significant nodes
    ///
    /// Merged states stay in this list even though their rows are gone.
    pub states: Vec<DfaState>,
    /// Rows of the canonical states only, targets redirected to canonical ids
    pub transitions: Vec<Transition>,
    /// The merged groups
    pub equals: Vec<Equal>,
}

impl Odfa {
    /// Reduce `dfa`, which should have been built from `nfa`
    ///
    /// Label tags that `nfa` does not contain count as insignificant.
    pub fn from_dfa(dfa: Dfa, nfa: &Nfa) -> Self {
        let Dfa {
            mut states,
            mut transitions,
        } = dfa;

        for state in &mut states {
            state.label.retain(|&tag| nfa.node(tag).is_some_and(NfaNode::is_significant));
        }

        let equals = group_equal_labels(&states);

        let canonical: HashMap<StateId, StateId> = equals
            .iter()
            .flat_map(|group| group.equals.iter().map(move |&id| (id, group.tag)))
            .collect();

        transitions.retain(|row| !canonical.contains_key(&row.from));
        for row in &mut transitions {
            for target in row.to.values_mut() {
                if let Target::Deterministic(id) = target {
                    if let Some(&tag) = canonical.get(&*id) {
                        *id = tag;
                    }
                }
            }
        }

        Odfa {
            states,
            transitions,
            equals,
        }
    }
}

/// Group states by equal labels; groups of one are not reported
fn group_equal_labels(states: &[DfaState]) -> Vec<Equal> {
    let mut groups: IndexMap<&BTreeSet<StateId>, Equal> = IndexMap::new();

    for state in states {
        groups
            .entry(&state.label)
            .and_modify(|group| group.equals.push(state.id))
            .or_insert(Equal {
                tag: state.id,
                equals: Vec::new(),
            });
    }

    groups
        .into_values()
        .filter(|group| !group.equals.is_empty())
        .collect()
}
