pub use self::{
    model::{Input, Nfa},
    sim::NfaSimulator,
};

use super::StateId;

pub(crate) mod compiler;
mod dot;
mod model;
mod sim;
mod subset;

#[cfg(test)]
mod tests;
