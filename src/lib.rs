//! Compiler front-end toolkit: regex-driven maximal-munch tokenizing, SLR(1)
//! parsing and syntax-tree construction.
//!
//! The pieces live in [`sift_lexer`] and [`sift_parser`]; this crate wires
//! them into a [`Frontend`] and ships the arithmetic language in
//! [`arithmetic`].

pub use sift_lexer::{
    Dfa, DfaSimulator, LexError, Lexicon, LexiconBuilder, Nfa, NfaSimulator, Regex, RegexError,
    Simulate, Token, Tokenizer,
};
pub use sift_parser::{
    build_tree, Action, Cfsm, ConflictPolicy, Grammar, GrammarBuilder, GrammarError, Item,
    ItemSet, Node, ParseAction, ParseError, ParseTable, ParseTableBuilder, Parser, Production,
    ProductionId, Symbol, SyntaxDirectedDefinition, TableError, TreeError, END_MARKER,
};

pub use self::{arithmetic::TokenType, error::FrontendError, frontend::Frontend};

pub mod arithmetic;
mod error;
mod frontend;
