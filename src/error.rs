use sift_lexer::{LexError, RegexError};
use sift_parser::{GrammarError, ParseError, TableError, TreeError};

/// Any failure of a [`Frontend`](crate::Frontend), from construction to the
/// finished syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error(transparent)]
    Regex(#[from] RegexError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}
