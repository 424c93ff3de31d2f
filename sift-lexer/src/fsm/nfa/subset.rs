use super::{
    super::dfa::{Dfa, DfaState},
    model::Nfa,
    StateId,
};
use std::collections::{BTreeSet, HashMap, VecDeque};

impl Nfa {
    /// Converts the NFA into an equivalent [`Dfa`] using subset construction.
    ///
    /// Subsets are explored breadth first from the ε-closure of the start
    /// state, and the symbols leaving a subset are tried in ascending order, so
    /// state ids of the result are deterministic. A DFA state is final when its
    /// subset contains the final state of the NFA.
    pub fn to_dfa(&self) -> Dfa {
        let start = self.eps_closure(self.start_state);

        let mut ids: HashMap<BTreeSet<StateId>, StateId> = HashMap::from([(start.clone(), 0)]);
        let mut states = vec![DfaState {
            fin: start.contains(&self.final_state),
            ..Default::default()
        }];
        let mut not_visited = VecDeque::from([(0, start)]);

        while let Some((id, subset)) = not_visited.pop_front() {
            for symbol in self.symbols_leaving(&subset) {
                let target = self.move_on(&subset, symbol);

                if target.is_empty() {
                    continue;
                }

                let target_id = match ids.get(&target) {
                    Some(target_id) => *target_id,
                    None => {
                        let target_id = states.len();
                        states.push(DfaState {
                            fin: target.contains(&self.final_state),
                            ..Default::default()
                        });
                        ids.insert(target.clone(), target_id);
                        not_visited.push_back((target_id, target));
                        target_id
                    }
                };

                states[id].transitions.insert(symbol, target_id);
            }
        }

        log::debug!(
            "subset construction turned {} nfa states into {} dfa states",
            self.len(),
            states.len()
        );

        Dfa::new(0, states)
    }
}
