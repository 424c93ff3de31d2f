use super::{super::traits::Simulate, model::Nfa, StateId};
use std::collections::BTreeSet;

/// Runs an [`Nfa`] directly by tracking the set of states it can be in.
pub struct NfaSimulator<'a> {
    nfa: &'a Nfa,
    current: BTreeSet<StateId>,
}

impl<'a> NfaSimulator<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            current: nfa.eps_closure(nfa.start_state),
        }
    }

    /// States the automaton can currently be in.
    pub fn current(&self) -> &BTreeSet<StateId> {
        &self.current
    }
}

impl Nfa {
    pub fn to_simulator(&self) -> NfaSimulator<'_> {
        NfaSimulator::new(self)
    }
}

impl Simulate for NfaSimulator<'_> {
    fn is_accepting(&self) -> bool {
        self.current.contains(&self.nfa.final_state)
    }

    fn is_dead(&self) -> bool {
        self.current.is_empty()
    }

    fn feed(&mut self, input: char) -> bool {
        self.current = self.nfa.move_on(&self.current, input);
        self.is_accepting()
    }

    fn reset(&mut self) {
        self.current = self.nfa.eps_closure(self.nfa.start_state);
    }
}
