/// Whether compiling the regex succeeded.
pub type RegexResult<T> = core::result::Result<T, RegexError>;

/// Malformed regular expression. Positions count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegexError {
    #[error("[ERROR]: regular expression is empty")]
    Empty,
    #[error("[ERROR] ({pos}): unbalanced parenthesis")]
    UnbalancedParen { pos: usize },
    #[error("[ERROR] ({pos}): expected an operand")]
    EmptyOperand { pos: usize },
    #[error("[ERROR] ({pos}): `*` does not follow an operand")]
    DanglingStar { pos: usize },
}
