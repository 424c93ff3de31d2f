pub use self::{
    item::{Item, ItemDisplay, ItemSet},
    state::{State, StateId},
};
use crate::{Grammar, Symbol};

use std::collections::{HashMap, VecDeque};

mod dot;
mod item;
mod state;

/// Characteristic finite-state machine: the canonical collection of LR(0)
/// item sets of a grammar together with the transitions between them.
#[derive(Debug, Clone)]
pub struct Cfsm {
    states: Vec<State>,
}

impl Cfsm {
    /// Builds the canonical collection breadth first from the closure of the
    /// augmenting item. Item sets are deduplicated by set equality and new
    /// states are numbered in order of discovery.
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let start = ItemSet::closure([Item::new(grammar.augmenting_production(), 0)], grammar);

        let mut states = vec![State::new(0, start.clone())];
        let mut ids = HashMap::from([(start, 0)]);
        let mut pending_states = VecDeque::from([0]);

        while let Some(id) = pending_states.pop_front() {
            let item_set = states[id].item_set.clone();

            for symbol in item_set.transition_symbols(grammar) {
                let target = item_set.goto(symbol, grammar);

                let target_id = match ids.get(&target) {
                    Some(target_id) => *target_id,
                    None => {
                        let target_id = states.len();
                        states.push(State::new(target_id, target.clone()));
                        ids.insert(target, target_id);
                        pending_states.push_back(target_id);
                        target_id
                    }
                };

                states[id].transitions.insert(symbol.clone(), target_id);
            }
        }

        log::debug!("canonical lr(0) collection has {} states", states.len());

        Self { states }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Target of the transition on `symbol` out of `state`.
    pub fn transition(&self, state: StateId, symbol: &str) -> Option<StateId> {
        self.states
            .get(state)
            .and_then(|s| s.transitions.get(symbol))
            .copied()
    }

    /// Returns the state whose item set equals `item_set`.
    pub fn find(&self, item_set: &ItemSet) -> Option<StateId> {
        self.states
            .iter()
            .find(|s| s.item_set == *item_set)
            .map(|s| s.id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub(crate) fn transitions_of(&self, state: StateId) -> impl Iterator<Item = (&Symbol, StateId)> {
        self.states
            .get(state)
            .into_iter()
            .flat_map(|s| s.transitions.iter().map(|(symbol, target)| (symbol, *target)))
    }
}
