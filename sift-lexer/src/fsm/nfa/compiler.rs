use super::model::Nfa;
use crate::regex::ast::ExprKind;

/// Regex AST to NFA compiler.
///
/// Every node becomes a Thompson fragment, which is then merged into its
/// parent with the union, concatenation and star constructions of [`Nfa`].
pub(crate) struct Compiler;

impl Compiler {
    pub(crate) fn compile(expr: &ExprKind) -> Nfa {
        match expr {
            ExprKind::Symbol(c) => Nfa::symbol(*c),
            ExprKind::Union(lhs, rhs) => Self::compile(lhs).union(Self::compile(rhs)),
            ExprKind::Concat(lhs, rhs) => Self::compile(lhs).concatenate(Self::compile(rhs)),
            ExprKind::Star(inner) => Self::compile(inner).star(),
        }
    }
}
