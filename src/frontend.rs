use crate::{arithmetic, FrontendError, TokenType};
use sift_lexer::{Lexicon, Token, Tokenizer};
use sift_parser::{build_tree, Node, ParseAction, ParseError, ParseTable, Parser, Symbol};

use std::{fmt::Debug, sync::Arc};

/// Tokenizer, parser and tree reducer for one language.
///
/// The lexicon and the table are built once and shared, so cloning a
/// [`Frontend`] and parsing from several threads is cheap.
#[derive(Debug, Clone)]
pub struct Frontend<K> {
    lexicon: Arc<Lexicon<K>>,
    table: Arc<ParseTable>,
    /// Maps token kinds to the terminals of the grammar.
    terminal: fn(&K) -> Symbol,
}

impl<K: Clone + Debug> Frontend<K> {
    pub fn new(lexicon: Lexicon<K>, table: ParseTable, terminal: fn(&K) -> Symbol) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            table: Arc::new(table),
            terminal,
        }
    }

    pub fn lexicon(&self) -> &Lexicon<K> {
        &self.lexicon
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Creates a [`Tokenizer`] over `input` sharing this frontend's lexicon.
    pub fn tokenizer(&self, input: &str) -> Tokenizer<K> {
        Tokenizer::with_input(Arc::clone(&self.lexicon), input)
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token<K>>, FrontendError> {
        Ok(self.tokenizer(input).collect_tokens()?)
    }

    /// Parses `tokens` and returns the action trace.
    pub fn trace(&self, tokens: &[Token<K>]) -> Result<Vec<ParseAction>, ParseError> {
        Parser::from_tokens(&self.table, tokens, self.terminal).run()
    }

    /// Runs the whole pipeline over `input`.
    pub fn parse(&self, input: &str) -> Result<Node, FrontendError> {
        let tokens = self.tokenize(input)?;
        let trace = self.trace(&tokens)?;
        log::debug!("parsed {} tokens in {} moves", tokens.len(), trace.len());

        let lexemes = tokens
            .iter()
            .map(|token| token.lexeme.as_str())
            .collect::<Vec<_>>();

        Ok(build_tree(self.table.grammar(), &lexemes, &trace)?)
    }
}

impl Frontend<TokenType> {
    /// Frontend for [`arithmetic::grammar`].
    pub fn arithmetic() -> Result<Self, FrontendError> {
        Self::for_grammar(arithmetic::grammar()?)
    }

    /// Frontend for [`arithmetic::extended_grammar`].
    pub fn extended_arithmetic() -> Result<Self, FrontendError> {
        Self::for_grammar(arithmetic::extended_grammar()?)
    }

    fn for_grammar(grammar: sift_parser::Grammar) -> Result<Self, FrontendError> {
        Ok(Self::new(
            arithmetic::lexicon()?,
            ParseTable::new(grammar)?,
            TokenType::terminal,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::Frontend;
    use crate::{FrontendError, LexError, TokenType};

    #[test]
    fn parse_error_carries_the_trace() {
        let frontend = Frontend::arithmetic().expect("frontend");
        let tokens = frontend.tokenize("1 * )").expect("tokens");
        let error = frontend.trace(&tokens).expect_err("unbalanced parenthesis");

        assert_eq!(error.position, 2);
        assert_eq!(error.lookahead, ")");
        assert!(!error.trace.is_empty());
    }

    #[test]
    fn lex_error_stops_the_pipeline() {
        let frontend = Frontend::arithmetic().expect("frontend");

        assert!(matches!(
            frontend.parse("1 + 2 ; 3"),
            Err(FrontendError::Lex(LexError::NoMatch { pos: 6, found: ';' }))
        ));
    }

    #[test]
    fn tokens_map_to_terminals() {
        let frontend = Frontend::arithmetic().expect("frontend");
        let tokens = frontend.tokenize("(1)").expect("tokens");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();

        assert_eq!(
            kinds,
            [TokenType::OpenParen, TokenType::Number, TokenType::CloseParen]
        );
    }
}
