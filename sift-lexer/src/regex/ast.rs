//! Regex ast with three operators ordered by binding strength:
//!
//! ```ebnf
//!     expression ::= concatenation (VERTICAL expression)?;
//!     concatenation ::= item+;
//!     item ::= (CHARACTER | LEFT_PAREN expression RIGHT_PAREN) ASTERISK*;
//! ```

pub(crate) struct Ast(pub(crate) ExprKind);

/// Regular expression kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExprKind {
    /// A single character matched literally.
    Symbol(char),
    /// Either of the expressions (e.g., `<expression>|<expression>`).
    Union(Box<ExprKind>, Box<ExprKind>),
    /// The first expression followed by the second.
    Concat(Box<ExprKind>, Box<ExprKind>),
    /// Zero or more repetitions (e.g., `a*`, `(ab)*`).
    Star(Box<ExprKind>),
}

impl ExprKind {
    pub(crate) fn union(lhs: ExprKind, rhs: ExprKind) -> Self {
        Self::Union(Box::new(lhs), Box::new(rhs))
    }

    pub(crate) fn concat(lhs: ExprKind, rhs: ExprKind) -> Self {
        Self::Concat(Box::new(lhs), Box::new(rhs))
    }

    pub(crate) fn star(inner: ExprKind) -> Self {
        Self::Star(Box::new(inner))
    }
}
