//! Token classes and grammars of a small arithmetic language.

use sift_lexer::{Lexicon, RegexResult};
use sift_parser::{Grammar, GrammarError, Symbol, SyntaxDirectedDefinition as Sdd};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Id,
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    Comma,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Equals,
    DoubleEquals,
    /// Explicit end of input.
    Dollar,
}

impl TokenType {
    /// Name of the grammar terminal tokens of this type are parsed as.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Id => "id",
            TokenType::Number => "number",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Comma => ",",
            TokenType::OpenBracket => "[",
            TokenType::CloseBracket => "]",
            TokenType::OpenParen => "(",
            TokenType::CloseParen => ")",
            TokenType::Equals => "=",
            TokenType::DoubleEquals => "==",
            TokenType::Dollar => sift_parser::END_MARKER,
        }
    }

    pub fn terminal(&self) -> Symbol {
        Symbol::from(self.as_str())
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(c1|c2|...)` over the given characters.
fn any_of(chars: impl IntoIterator<Item = char>) -> String {
    let alternatives = chars
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .join("|");

    format!("({})", alternatives)
}

/// Token classes of the language. Whitespace is skipped.
///
/// `==` is registered before `=`, although maximal munch already prefers it.
pub fn lexicon() -> RegexResult<Lexicon<TokenType>> {
    let letter = any_of(('a'..='z').chain('A'..='Z'));
    let digit = any_of('0'..='9');
    let whitespace = any_of([' ', '\t', '\n', '\r']);

    Ok(Lexicon::builder()
        .with_token_class(&format!("{letter}(({letter}|{digit})*)"), TokenType::Id)?
        .with_token_class(&format!("{digit}({digit}*)"), TokenType::Number)?
        .with_token_class("+", TokenType::Plus)?
        .with_token_class("-", TokenType::Minus)?
        .with_token_class("*", TokenType::Star)?
        .with_token_class("/", TokenType::Slash)?
        .with_token_class(",", TokenType::Comma)?
        .with_token_class("[", TokenType::OpenBracket)?
        .with_token_class("]", TokenType::CloseBracket)?
        .with_token_class("(", TokenType::OpenParen)?
        .with_token_class(")", TokenType::CloseParen)?
        .with_token_class("==", TokenType::DoubleEquals)?
        .with_token_class("=", TokenType::Equals)?
        .with_token_class("$", TokenType::Dollar)?
        .with_ignored(&format!("{whitespace}({whitespace}*)"))?
        .build())
}

/// ```text
/// expr   -> expr + term | term
/// term   -> term * factor | factor
/// factor -> number | ( expr )
/// ```
///
/// Operators become nodes labelled with the operator over both operands and
/// parentheses are dropped from the tree.
pub fn grammar() -> Result<Grammar, GrammarError> {
    Grammar::builder()
        .with_augmented_start("expr")
        .with_defined_rule("expr", ["expr", "+", "term"], Sdd::tree("+", [0, 2]))
        .with_rule("expr", ["term"])
        .with_defined_rule("term", ["term", "*", "factor"], Sdd::tree("*", [0, 2]))
        .with_rule("term", ["factor"])
        .with_rule("factor", ["number"])
        .with_defined_rule("factor", ["(", "expr", ")"], Sdd::Copy(1))
        .build()
}

/// [`grammar`] with `-`, `/` and identifiers.
pub fn extended_grammar() -> Result<Grammar, GrammarError> {
    let binary = |head: &str, operator: &str, operand: &str| {
        (
            head.to_owned(),
            [head.to_owned(), operator.to_owned(), operand.to_owned()],
            Sdd::tree(operator, [0, 2]),
        )
    };

    let operators = [
        binary("expr", "+", "term"),
        binary("expr", "-", "term"),
        binary("term", "*", "factor"),
        binary("term", "/", "factor"),
    ];

    let mut builder = Grammar::builder().with_augmented_start("expr");

    for (head, body, definition) in operators {
        builder = builder.with_defined_rule(head, body, definition);
    }

    builder
        .with_rule("expr", ["term"])
        .with_rule("term", ["factor"])
        .with_rules("factor", [["number"], ["id"]])
        .with_defined_rule("factor", ["(", "expr", ")"], Sdd::Copy(1))
        .build()
}

#[cfg(test)]
mod tests {
    use super::{extended_grammar, grammar, lexicon, TokenType};
    use sift_lexer::Tokenizer;
    use sift_parser::{Grammar, GrammarError, ParseTable, Symbol};

    use std::{collections::BTreeSet, sync::Arc};

    fn set(symbols: &[&str]) -> BTreeSet<Symbol> {
        symbols.iter().copied().map(Symbol::from).collect()
    }

    #[test]
    fn token_types() {
        let lexicon = Arc::new(lexicon().expect("valid regexes"));
        let tokens = Tokenizer::with_input(lexicon, "x1 = [a, 2] == b - 3 / 4 $")
            .map(|token| token.map(|token| token.kind))
            .collect::<Result<Vec<_>, _>>()
            .expect("tokens");

        use TokenType::*;
        assert_eq!(
            tokens,
            [
                Id, Equals, OpenBracket, Id, Comma, Number, CloseBracket, DoubleEquals, Id, Minus,
                Number, Slash, Number, Dollar
            ]
        );
    }

    #[test]
    fn terminals() {
        assert_eq!(TokenType::Number.terminal(), "number");
        assert_eq!(TokenType::DoubleEquals.terminal(), "==");
        assert!(TokenType::Dollar.terminal().is_end_marker());
        assert_eq!(TokenType::OpenBracket.to_string(), "[");
    }

    #[test]
    fn first_and_follow() {
        let grammar = grammar().expect("valid grammar");

        assert_eq!(grammar.first("expr"), set(&["number", "("]));
        assert_eq!(grammar.follow("expr"), set(&["$", "+", ")"]));
        assert_eq!(grammar.follow("factor"), set(&["$", "+", "*", ")"]));
    }

    #[test]
    fn grammars_are_slr1() {
        let grammars: [fn() -> Result<Grammar, GrammarError>; 2] = [grammar, extended_grammar];

        for grammar in grammars {
            let grammar = grammar().expect("valid grammar");
            assert!(ParseTable::new(grammar).is_ok());
        }
    }

    #[test]
    fn extended_terminals() {
        let grammar = extended_grammar().expect("valid grammar");

        assert_eq!(
            grammar.terminals().cloned().collect::<BTreeSet<_>>(),
            set(&["(", ")", "*", "+", "-", "/", "id", "number"])
        );
    }
}
