use super::StateId;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Thompson NFA stored as an arena of states.
///
/// Every automaton produced by the constructors in this module has its start
/// state at index `0` and its single final state at the last index. The merge
/// operations rely on that layout when they shift one automaton behind
/// another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(super) start_state: StateId,
    pub(super) final_state: StateId,
    pub(super) states: Vec<State>,
}

/// A state in the NFA. Its id is its index in the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct State {
    pub(super) transitions: Transitions,
}

type Transitions = BTreeMap<Input, BTreeSet<StateId>>;

/// Label of an NFA transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Input {
    /// Transition taken without consuming input.
    Eps,
    /// Transition taken on exactly this character.
    Symbol(char),
}

impl Nfa {
    /// Creates the two-state automaton accepting exactly `symbol`.
    pub fn symbol(symbol: char) -> Self {
        let mut builder = NfaBuilder::new();
        let start = builder.add_state();
        let fin = builder.add_state();
        builder.add_transition(start, fin, Input::Symbol(symbol));
        builder.build(start, fin)
    }

    /// Creates an automaton accepting the language of either `self` or
    /// `other`.
    ///
    /// A fresh start state is placed in front of both operands and a fresh
    /// final state behind them, connected by ε-transitions.
    pub fn union(self, other: Nfa) -> Self {
        let mut builder = NfaBuilder::new();
        let start = builder.add_state();
        let (lhs_start, lhs_final) = builder.append(self);
        let (rhs_start, rhs_final) = builder.append(other);
        let fin = builder.add_state();

        builder.add_transition(start, lhs_start, Input::Eps);
        builder.add_transition(start, rhs_start, Input::Eps);
        builder.add_transition(lhs_final, fin, Input::Eps);
        builder.add_transition(rhs_final, fin, Input::Eps);
        builder.build(start, fin)
    }

    /// Creates an automaton accepting the words of `self` followed by the
    /// words of `other`.
    pub fn concatenate(self, other: Nfa) -> Self {
        let mut builder = NfaBuilder::new();
        let (lhs_start, lhs_final) = builder.append(self);
        let (rhs_start, rhs_final) = builder.append(other);

        builder.add_transition(lhs_final, rhs_start, Input::Eps);
        builder.build(lhs_start, rhs_final)
    }

    /// Creates an automaton accepting zero or more repetitions of the words
    /// of `self`.
    pub fn star(self) -> Self {
        let mut builder = NfaBuilder::new();
        let start = builder.add_state();
        let (inner_start, inner_final) = builder.append(self);
        let fin = builder.add_state();

        builder.add_transition(start, inner_start, Input::Eps);
        builder.add_transition(start, fin, Input::Eps);
        builder.add_transition(inner_final, fin, Input::Eps);
        builder.add_transition(inner_final, inner_start, Input::Eps);
        builder.build(start, fin)
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn final_state(&self) -> StateId {
        self.final_state
    }

    /// Amount of states in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the destinations of the transitions leaving `state` on `input`.
    pub fn transitions(&self, state: StateId, input: Input) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .get(state)
            .and_then(|s| s.transitions.get(&input))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Returns the set of states reachable from `state_id` using only
    /// ε-transitions, `state_id` included.
    pub fn eps_closure(&self, state_id: StateId) -> BTreeSet<StateId> {
        self.eps_closure_of(std::iter::once(state_id))
    }

    /// Returns the union of the ε-closures of all given states.
    pub fn eps_closure_of(&self, states: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
        let mut result = BTreeSet::new();
        let mut not_visited = VecDeque::new();

        for state_id in states {
            if result.insert(state_id) {
                not_visited.push_back(state_id);
            }
        }

        while let Some(state_id) = not_visited.pop_front() {
            for dest in self.transitions(state_id, Input::Eps) {
                if result.insert(dest) {
                    not_visited.push_back(dest);
                }
            }
        }

        result
    }

    /// Returns the ε-closure of every state reachable from `states` by a single
    /// transition on `input`.
    pub fn move_on(&self, states: &BTreeSet<StateId>, input: char) -> BTreeSet<StateId> {
        self.eps_closure_of(
            states
                .iter()
                .flat_map(|state| self.transitions(*state, Input::Symbol(input))),
        )
    }

    /// Returns the sorted set of characters labelling a transition out of any
    /// of the given states.
    pub(super) fn symbols_leaving(&self, states: &BTreeSet<StateId>) -> BTreeSet<char> {
        states
            .iter()
            .filter_map(|state| self.states.get(*state))
            .flat_map(|state| state.transitions.keys())
            .filter_map(|input| match input {
                Input::Symbol(c) => Some(*c),
                Input::Eps => None,
            })
            .collect()
    }

    /// Consumes the automaton and returns its states with every id shifted by
    /// `offset`, together with the shifted start and final ids.
    fn relocate(self, offset: StateId) -> (Vec<State>, StateId, StateId) {
        let remap = |id: StateId| id + offset;

        let states = self
            .states
            .into_iter()
            .map(|state| State {
                transitions: state
                    .transitions
                    .into_iter()
                    .map(|(input, dests)| (input, dests.into_iter().map(remap).collect()))
                    .collect(),
            })
            .collect();

        (states, remap(self.start_state), remap(self.final_state))
    }
}

/// Builder for a fresh [`Nfa`] arena.
pub(super) struct NfaBuilder {
    states: Vec<State>,
}

impl NfaBuilder {
    pub(super) fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Returns the id the next created state will have.
    fn new_state_id(&self) -> StateId {
        self.states.len()
    }

    pub(super) fn add_state(&mut self) -> StateId {
        let id = self.new_state_id();
        self.states.push(State::default());
        id
    }

    /// Moves all states of `nfa` to the end of the arena and returns their new
    /// start and final ids.
    fn append(&mut self, nfa: Nfa) -> (StateId, StateId) {
        let (states, start, fin) = nfa.relocate(self.new_state_id());
        self.states.extend(states);
        (start, fin)
    }

    pub(super) fn add_transition(&mut self, start: StateId, end: StateId, input: Input) {
        debug_assert!(end < self.states.len(), "transition to a state that does not exist");

        if let Some(state) = self.states.get_mut(start) {
            state.transitions.entry(input).or_default().insert(end);
        }
    }

    pub(super) fn build(self, start_state: StateId, final_state: StateId) -> Nfa {
        debug_assert!(start_state < self.states.len() && final_state < self.states.len());

        Nfa {
            start_state,
            final_state,
            states: self.states,
        }
    }
}
