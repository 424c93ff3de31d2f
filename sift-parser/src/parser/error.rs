use super::slr::ParseAction;
use crate::{cfsm::StateId, Symbol};

fn one_of(expected: &[Symbol]) -> String {
    expected
        .iter()
        .map(|s| format!("`{}`", s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The parser got stuck: the table has no action for the lookahead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[ERROR] ({position}): unexpected `{lookahead}`, expected one of {}", one_of(.expected))]
pub struct ParseError {
    /// State on top of the stack when the parser got stuck.
    pub state: StateId,
    /// Index of the lookahead in the input.
    pub position: usize,
    /// Lookahead symbol. Running past the input reads the end marker.
    pub lookahead: Symbol,
    /// Terminals the state has an action for.
    pub expected: Vec<Symbol>,
    /// Actions taken up to and including the final [`ParseAction::Error`].
    pub trace: Vec<ParseAction>,
}
