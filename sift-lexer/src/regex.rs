use self::parser::{error::RegexResult, Parser};
use crate::fsm::{Dfa, Nfa, NfaCompiler, Simulate};
use std::str::FromStr;

pub(crate) mod ast;
pub(crate) mod parser;

#[cfg(test)]
mod tests;

/// Compiled regular expression over `|`, `*`, parentheses and literal
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    source: String,
    nfa: Nfa,
    dfa: Dfa,
}

impl Regex {
    /// Compiles `source` to an NFA and determinizes it.
    pub fn new(source: &str) -> RegexResult<Self> {
        let ast = Parser::new(source).parse()?;
        let nfa = NfaCompiler::compile(&ast.0);
        let dfa = nfa.to_dfa();

        log::trace!(
            "compiled regex {:?} into {} nfa states and {} dfa states",
            source,
            nfa.len(),
            dfa.len()
        );

        Ok(Self {
            source: source.to_string(),
            nfa,
            dfa,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Returns the longest prefix of `input` the expression accepts, or the
    /// empty string when no non-empty prefix is accepted.
    pub fn match_prefix<'i>(&self, input: &'i str) -> &'i str {
        &input[..self.longest_prefix(input).unwrap_or(0)]
    }

    /// Length in bytes of the longest non-empty accepted prefix of `input`.
    pub fn longest_prefix(&self, input: &str) -> Option<usize> {
        self.dfa.to_simulator().longest_prefix(input)
    }

    /// Whether the whole of `input` is in the language of the expression.
    pub fn is_match(&self, input: &str) -> bool {
        self.dfa.to_simulator().run(input)
    }
}

impl FromStr for Regex {
    type Err = parser::error::RegexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Regex::new(s)
    }
}

impl std::fmt::Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
