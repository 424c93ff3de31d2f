pub use self::{
    dfa::{Dfa, DfaSimulator},
    nfa::{Input, Nfa, NfaSimulator},
    traits::Simulate,
};

pub(crate) use self::nfa::compiler::Compiler as NfaCompiler;

/// Identifier of a state inside a single automaton. Ids are indices into the
/// state arena of that automaton.
pub type StateId = usize;

mod dfa;
mod nfa;
mod traits;
