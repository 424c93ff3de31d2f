use super::Production;
use crate::{Symbol, END_MARKER};

use std::collections::{BTreeSet, HashMap};

/// FIRST and FOLLOW sets of every non-terminal, computed by fixed-point
/// iteration.
#[derive(Debug, Clone, Default)]
pub(super) struct FirstFollow {
    nullable: BTreeSet<Symbol>,
    first: HashMap<Symbol, BTreeSet<Symbol>>,
    follow: HashMap<Symbol, BTreeSet<Symbol>>,
}

/// Extends `set` and returns whether it grew.
fn extend(set: &mut BTreeSet<Symbol>, symbols: impl IntoIterator<Item = Symbol>) -> bool {
    let len = set.len();
    set.extend(symbols);
    len != set.len()
}

impl FirstFollow {
    pub(super) fn compute(
        start: &Symbol,
        productions: &[Production],
        non_terminals: &BTreeSet<Symbol>,
    ) -> Self {
        let empty = || {
            non_terminals
                .iter()
                .map(|nt| (nt.clone(), BTreeSet::new()))
                .collect::<HashMap<_, _>>()
        };

        let mut sets = Self {
            nullable: BTreeSet::new(),
            first: empty(),
            follow: empty(),
        };

        sets.compute_first(productions);
        sets.compute_follow(start, productions);
        sets
    }

    /// Repeats over all productions until neither a FIRST set nor the nullable
    /// set changes.
    fn compute_first(&mut self, productions: &[Production]) {
        let mut rounds = 0;
        let mut changed = true;

        while changed {
            changed = false;
            rounds += 1;

            for production in productions {
                let (first, nullable) = self.first_of_sequence(production.body());

                if nullable {
                    changed |= self.nullable.insert(production.head().clone());
                }

                if let Some(entry) = self.first.get_mut(production.head()) {
                    changed |= extend(entry, first);
                }
            }
        }

        log::trace!("first sets stable after {} rounds", rounds);
    }

    fn compute_follow(&mut self, start: &Symbol, productions: &[Production]) {
        if let Some(entry) = self.follow.get_mut(start) {
            entry.insert(Symbol::from(END_MARKER));
        }

        let mut rounds = 0;
        let mut changed = true;

        while changed {
            changed = false;
            rounds += 1;

            for production in productions {
                let body = production.body();

                for (pos, symbol) in body.iter().enumerate() {
                    if !self.follow.contains_key(symbol) {
                        continue;
                    }

                    let (mut follow, nullable) = self.first_of_sequence(&body[pos + 1..]);

                    if nullable {
                        follow.extend(self.follow(production.head().as_str()));
                    }

                    if let Some(entry) = self.follow.get_mut(symbol) {
                        changed |= extend(entry, follow);
                    }
                }
            }
        }

        log::trace!("follow sets stable after {} rounds", rounds);
    }

    pub(super) fn is_nullable(&self, symbol: &str) -> bool {
        self.nullable.contains(symbol)
    }

    pub(super) fn first(&self, symbol: &str) -> BTreeSet<Symbol> {
        match self.first.get(symbol) {
            Some(first) => first.clone(),
            None => BTreeSet::from([Symbol::from(symbol)]),
        }
    }

    pub(super) fn follow(&self, symbol: &str) -> BTreeSet<Symbol> {
        self.follow.get(symbol).cloned().unwrap_or_default()
    }

    /// Returns the FIRST set of `sequence` and whether every symbol in it is
    /// nullable.
    pub(super) fn first_of_sequence(&self, sequence: &[Symbol]) -> (BTreeSet<Symbol>, bool) {
        let mut result = BTreeSet::new();

        for symbol in sequence {
            match self.first.get(symbol) {
                Some(first) => {
                    result.extend(first.iter().cloned());

                    if !self.nullable.contains(symbol) {
                        return (result, false);
                    }
                }
                None => {
                    result.insert(symbol.clone());
                    return (result, false);
                }
            }
        }

        (result, true)
    }
}
