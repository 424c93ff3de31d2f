use super::{traits::Simulate, StateId};
use std::collections::BTreeMap;

/// Deterministic finite-state machine produced by subset construction.
///
/// A missing transition means the machine moves to the implicit dead state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    start_state: StateId,
    states: Vec<DfaState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DfaState {
    pub(crate) fin: bool,
    pub(crate) transitions: BTreeMap<char, StateId>,
}

impl Dfa {
    pub(crate) fn new(start_state: StateId, states: Vec<DfaState>) -> Self {
        Self {
            start_state,
            states,
        }
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Amount of live states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.states.get(state).map_or(false, |s| s.fin)
    }

    /// Returns the state reached from `state` on `input`, or `None` when the
    /// transition leads to the dead state.
    pub fn step(&self, state: StateId, input: char) -> Option<StateId> {
        self.states
            .get(state)
            .and_then(|s| s.transitions.get(&input))
            .copied()
    }

    pub fn to_simulator(&self) -> DfaSimulator<'_> {
        DfaSimulator::new(self)
    }

    /// Converts the DFA to the [graphviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language.
    pub fn to_dot(&self) -> String {
        let final_states = self
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.fin)
            .map(|(id, _)| id.to_string())
            .collect::<Vec<String>>()
            .join(" ");

        let transitions = self
            .states
            .iter()
            .enumerate()
            .flat_map(|(id, s)| {
                s.transitions.iter().map(move |(c, dest)| {
                    format!("\t{} -> {} [label = \"{}\"];", id, dest, c.escape_default())
                })
            })
            .collect::<Vec<String>>()
            .join("\n");

        format!(
            "digraph dfa {{\n\
                \trankdir = LR;\n\
            \n\
                \t// final states\n\
                \tnode [shape = doublecircle]; {};\n\
                \tnode [shape = circle]; {};\n\
            \n\
                {}\n\
            }}",
            final_states, self.start_state, transitions
        )
    }
}

/// Current position of a run over a [`Dfa`].
///
/// `None` stands for the dead state, which has no outgoing transitions and is
/// never accepting.
#[derive(Debug, Clone)]
pub struct DfaSimulator<'a> {
    dfa: &'a Dfa,
    current: Option<StateId>,
}

impl<'a> DfaSimulator<'a> {
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current: Some(dfa.start_state),
        }
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }
}

impl Simulate for DfaSimulator<'_> {
    fn is_accepting(&self) -> bool {
        self.current.map_or(false, |state| self.dfa.is_final(state))
    }

    fn is_dead(&self) -> bool {
        self.current.is_none()
    }

    fn feed(&mut self, input: char) -> bool {
        self.current = self.current.and_then(|state| self.dfa.step(state, input));
        self.is_accepting()
    }

    fn reset(&mut self) {
        self.current = Some(self.dfa.start_state);
    }
}
