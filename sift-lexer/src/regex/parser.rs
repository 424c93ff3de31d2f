//! Operand/operator decomposition of the regex source into an [`Ast`].
//!
//! A source of exactly one character is always that character, which lets
//! token classes such as `(` or `*` be written directly. Longer sources split
//! on the first top-level `|`, otherwise the first operand (a character or a
//! parenthesized group) is taken off the front, starred when followed by `*`
//! and concatenated with the rest.

use self::error::{RegexError, RegexResult};
use super::ast::{Ast, ExprKind};
use std::ops::Range;

pub mod error;

/// Regex parser over the characters of a source string.
pub(crate) struct Parser {
    chars: Vec<char>,
}

impl Parser {
    /// Creates a new regex parser from the `input`.
    pub(crate) fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
        }
    }

    /// Parses the `input` into a regex [`Ast`].
    pub(crate) fn parse(&self) -> RegexResult<Ast> {
        match self.chars.as_slice() {
            [] => Err(RegexError::Empty),
            [c] => Ok(Ast(ExprKind::Symbol(*c))),
            _ => {
                self.check_balance()?;
                self.expression(0..self.chars.len()).map(Ast)
            }
        }
    }

    fn expression(&self, span: Range<usize>) -> RegexResult<ExprKind> {
        if span.is_empty() {
            return Err(RegexError::EmptyOperand { pos: span.start });
        }

        if span.len() == 1 {
            return match self.chars[span.start] {
                '(' | ')' => Err(RegexError::UnbalancedParen { pos: span.start }),
                '*' => Err(RegexError::DanglingStar { pos: span.start }),
                '|' => Err(RegexError::EmptyOperand { pos: span.start }),
                c => Ok(ExprKind::Symbol(c)),
            };
        }

        if self.chars[span.start] == '(' && self.matching_paren(span.start)? + 1 == span.end {
            return self.expression(span.start + 1..span.end - 1);
        }

        if let Some(bar) = self.top_level_union(span.clone()) {
            let lhs = self.expression(span.start..bar)?;
            let rhs = self.expression(bar + 1..span.end)?;
            return Ok(ExprKind::union(lhs, rhs));
        }

        let operand_end = self.operand_end(span.clone())?;
        let mut first = self.expression(span.start..operand_end)?;

        let mut rest = operand_end;
        while rest < span.end && self.chars[rest] == '*' {
            first = ExprKind::star(first);
            rest += 1;
        }

        if rest == span.end {
            Ok(first)
        } else {
            Ok(ExprKind::concat(first, self.expression(rest..span.end)?))
        }
    }

    /// Fails on the first parenthesis without a partner.
    fn check_balance(&self) -> RegexResult<()> {
        let mut open = Vec::new();

        for (pos, c) in self.chars.iter().enumerate() {
            match c {
                '(' => open.push(pos),
                ')' => {
                    if open.pop().is_none() {
                        return Err(RegexError::UnbalancedParen { pos });
                    }
                }
                _ => (),
            }
        }

        match open.first() {
            Some(pos) => Err(RegexError::UnbalancedParen { pos: *pos }),
            None => Ok(()),
        }
    }

    /// Returns the position of the first `|` outside of any group. Spans are
    /// balanced once [`Parser::check_balance`] passed.
    fn top_level_union(&self, span: Range<usize>) -> Option<usize> {
        let mut depth = 0usize;

        for pos in span {
            match self.chars[pos] {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                '|' if depth == 0 => return Some(pos),
                _ => (),
            }
        }

        None
    }

    /// Returns the end (exclusive) of the operand starting the span.
    fn operand_end(&self, span: Range<usize>) -> RegexResult<usize> {
        match self.chars[span.start] {
            '(' => Ok(self.matching_paren(span.start)? + 1),
            ')' => Err(RegexError::UnbalancedParen { pos: span.start }),
            '*' => Err(RegexError::DanglingStar { pos: span.start }),
            '|' => Err(RegexError::EmptyOperand { pos: span.start }),
            _ => Ok(span.start + 1),
        }
    }

    /// Returns the position of the `)` closing the group opened at `open`.
    fn matching_paren(&self, open: usize) -> RegexResult<usize> {
        let mut stack = Vec::new();

        for (pos, c) in self.chars.iter().enumerate().skip(open) {
            match c {
                '(' => stack.push(pos),
                ')' => {
                    stack.pop();
                    if stack.is_empty() {
                        return Ok(pos);
                    }
                }
                _ => (),
            }
        }

        Err(RegexError::UnbalancedParen { pos: open })
    }
}
