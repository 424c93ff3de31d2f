use super::item::ItemSet;
use crate::Symbol;

use std::collections::BTreeMap;

/// Identifier of a state of the [`Cfsm`](super::Cfsm), assigned in order of
/// discovery.
pub type StateId = usize;

/// State of the [`Cfsm`](super::Cfsm).
#[derive(Debug, Clone)]
pub struct State {
    pub(super) id: StateId,
    pub(super) item_set: ItemSet,
    pub(super) transitions: BTreeMap<Symbol, StateId>,
}

impl State {
    pub(super) fn new(id: StateId, item_set: ItemSet) -> Self {
        Self {
            id,
            item_set,
            transitions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn item_set(&self) -> &ItemSet {
        &self.item_set
    }

    /// Transitions on terminals and non-terminals alike.
    pub fn transitions(&self) -> &BTreeMap<Symbol, StateId> {
        &self.transitions
    }
}
