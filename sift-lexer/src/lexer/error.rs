pub type LexResult<T> = Result<T, LexError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// No token class accepts a non-empty prefix of the remaining input.
    #[error("[ERROR] ({pos}): lexer could not identify token starting with {found:?}")]
    NoMatch { pos: usize, found: char },
    /// A token was requested after all input was consumed.
    #[error("[ERROR] ({pos}): no input left to tokenize")]
    EndOfInput { pos: usize },
}

impl LexError {
    /// Byte offset in the input at which lexing stopped.
    pub fn pos(&self) -> usize {
        match self {
            LexError::NoMatch { pos, .. } | LexError::EndOfInput { pos } => *pos,
        }
    }
}
