use std::{borrow::Borrow, fmt, sync::Arc};

pub use cfsm::{Cfsm, Item, ItemDisplay, ItemSet, State, StateId};
pub use grammar::{
    Grammar, GrammarBuilder, GrammarError, Production, ProductionId, SyntaxDirectedDefinition,
};
pub use parser::{
    error::ParseError,
    slr::{ParseAction, Parser},
    table::{Action, ConflictPolicy, ParseTable, ParseTableBuilder, TableError},
};
pub use tree::{build_tree, Node, TreeError};

mod cfsm;
mod grammar;
mod parser;
mod tree;

/// Terminal appended to every input, marking its end.
pub const END_MARKER: &str = "$";

/// Named terminal or non-terminal in the body of a production.
///
/// Whether a symbol is a terminal is decided by the grammar: it is one exactly
/// when no production has it as head. Cloning is cheap, the name is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The [`END_MARKER`] symbol.
    pub fn end_marker() -> Self {
        Self::new(END_MARKER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_end_marker(&self) -> bool {
        &*self.0 == END_MARKER
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
