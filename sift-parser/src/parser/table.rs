use crate::{
    cfsm::{Cfsm, StateId},
    Grammar, ProductionId, Symbol,
};

use std::{collections::HashMap, fmt};

/// SLR(1) parse table. GOTO entries are stored as [`Action::Shift`] on
/// non-terminals, next to the terminal actions.
#[derive(Debug, Clone)]
pub struct ParseTable {
    grammar: Grammar,
    action: ActionTable,
}

type ActionTable = Vec<HashMap<Symbol, Action>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Push the state and, on a terminal, consume the lookahead.
    Shift(StateId),
    /// Pop the body of the production and take the GOTO on its head.
    Reduce(ProductionId),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "shift({})", state),
            Action::Reduce(production) => write!(f, "reduce({})", production),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// What to do when two actions claim the same table cell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail with [`TableError::NotSlr1`].
    #[default]
    Reject,
    /// Overwrite the cell with the later action and log a warning. Shifts are
    /// written before reductions.
    LastWins,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("grammar is not SLR(1): state {state} on `{symbol}` has both {existing} and {incoming}")]
    NotSlr1 {
        state: StateId,
        symbol: Symbol,
        existing: Action,
        incoming: Action,
    },
}

impl ParseTable {
    /// Creates a [`ParseTableBuilder`] rejecting conflicts.
    pub fn builder(grammar: Grammar) -> ParseTableBuilder {
        ParseTableBuilder {
            grammar,
            policy: ConflictPolicy::default(),
        }
    }

    /// Builds the table of `grammar`, failing on the first conflict.
    pub fn new(grammar: Grammar) -> Result<Self, TableError> {
        Self::builder(grammar).build()
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Amount of states.
    pub fn len(&self) -> usize {
        self.action.len()
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_empty()
    }

    pub fn action(&self, state: StateId, symbol: &str) -> Option<Action> {
        self.action.get(state).and_then(|row| row.get(symbol)).copied()
    }

    /// GOTO function: the state entered after reducing to `non_terminal` with
    /// `state` exposed on top of the stack.
    pub fn goto(&self, state: StateId, non_terminal: &str) -> Option<StateId> {
        match self.action(state, non_terminal) {
            Some(Action::Shift(target)) => Some(target),
            _ => None,
        }
    }

    /// Terminals with an action in `state`, sorted.
    pub fn expected(&self, state: StateId) -> Vec<Symbol> {
        let mut expected = self
            .action
            .get(state)
            .into_iter()
            .flat_map(|row| row.keys())
            .filter(|symbol| self.grammar.is_terminal(symbol.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        expected.sort();
        expected
    }

    fn insert_action(
        table: &mut ActionTable,
        policy: ConflictPolicy,
        state: StateId,
        symbol: &Symbol,
        action: Action,
    ) -> Result<(), TableError> {
        if table.len() <= state {
            table.resize_with(state + 1, Default::default);
        }

        let row = &mut table[state];

        match row.get(symbol).copied() {
            Some(existing) if existing == action => Ok(()),
            Some(existing) => match policy {
                ConflictPolicy::Reject => Err(TableError::NotSlr1 {
                    state,
                    symbol: symbol.clone(),
                    existing,
                    incoming: action,
                }),
                ConflictPolicy::LastWins => {
                    log::warn!(
                        "conflict in state {} on `{}`: {} replaces {}",
                        state,
                        symbol,
                        action,
                        existing
                    );
                    row.insert(symbol.clone(), action);
                    Ok(())
                }
            },
            None => {
                row.insert(symbol.clone(), action);
                Ok(())
            }
        }
    }
}

/// Builder struct for the [`ParseTable`].
#[derive(Debug, Clone)]
pub struct ParseTableBuilder {
    grammar: Grammar,
    policy: ConflictPolicy,
}

impl ParseTableBuilder {
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the canonical LR(0) collection, records its transitions as shifts
    /// and overlays the reductions on the FOLLOW set of each reducible item.
    pub fn build(self) -> Result<ParseTable, TableError> {
        let Self { grammar, policy } = self;
        let cfsm = Cfsm::from_grammar(&grammar);

        let mut action = ActionTable::new();
        action.resize_with(cfsm.len(), Default::default);

        for state in cfsm.iter() {
            for (symbol, target) in cfsm.transitions_of(state.id()) {
                ParseTable::insert_action(
                    &mut action,
                    policy,
                    state.id(),
                    symbol,
                    Action::Shift(target),
                )?;
            }
        }

        for state in cfsm.iter() {
            for item in state.item_set().reducible_items(&grammar) {
                let Some(production) = grammar.production(item.production()) else {
                    continue;
                };

                let head = production.head();
                let accepting = head == grammar.start_symbol();

                for terminal in grammar.follow(head.as_str()) {
                    let incoming = if accepting && terminal.is_end_marker() {
                        Action::Accept
                    } else {
                        Action::Reduce(item.production())
                    };

                    ParseTable::insert_action(&mut action, policy, state.id(), &terminal, incoming)?;
                }
            }
        }

        log::debug!(
            "built slr(1) table with {} states and {} entries",
            action.len(),
            action.iter().map(HashMap::len).sum::<usize>()
        );

        Ok(ParseTable { grammar, action })
    }
}
