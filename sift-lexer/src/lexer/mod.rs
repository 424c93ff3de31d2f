use self::{
    error::{LexError, LexResult},
    input::Input,
};
use crate::regex::{parser::error::RegexResult, Regex};
use std::sync::Arc;

pub mod error;
mod input;

/// Ordered set of compiled token classes.
///
/// The order of registration decides which class wins when several of them
/// match a prefix of the same length.
#[derive(Debug, Clone)]
pub struct Lexicon<TokenKind> {
    classes: Vec<TokenClass<TokenKind>>,
}

#[derive(Debug, Clone)]
struct TokenClass<TokenKind> {
    regex: Regex,
    /// `None` for classes whose matches are skipped (e.g., whitespace).
    kind: Option<TokenKind>,
}

/// [`Token`] returned by the [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<TokenKind> {
    /// Kind of token configured by the user.
    pub kind: TokenKind,
    /// Source text of the token.
    pub lexeme: String,
    /// Position of the token in the input in bytes. The end points one position
    /// beyond the end of the token.
    pub pos: (usize, usize),
}

impl<TokenKind> Lexicon<TokenKind> {
    /// Creates a [`LexiconBuilder`].
    pub fn builder() -> LexiconBuilder<TokenKind> {
        LexiconBuilder::new()
    }

    /// Amount of registered token classes, skipped classes included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Runs every class over `input` and returns the class with the longest
    /// match. Ties go to the class registered first.
    fn longest_match(&self, input: &str) -> Option<(&TokenClass<TokenKind>, usize)> {
        self.classes
            .iter()
            .filter_map(|class| class.regex.longest_prefix(input).map(|len| (class, len)))
            .fold(None, |best, (class, len)| match best {
                Some((_, best_len)) if best_len >= len => best,
                _ => Some((class, len)),
            })
    }
}

/// Builder struct for the [`Lexicon`].
#[derive(Debug, Clone)]
pub struct LexiconBuilder<TokenKind> {
    classes: Vec<TokenClass<TokenKind>>,
}

impl<TokenKind> Default for LexiconBuilder<TokenKind> {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
        }
    }
}

impl<TokenKind> LexiconBuilder<TokenKind> {
    /// Creates a new empty [`LexiconBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token class producing tokens of `kind`.
    ///
    /// # Fails
    ///
    /// When the provided `regex` is malformed.
    pub fn with_token_class(mut self, regex: &str, kind: TokenKind) -> RegexResult<Self> {
        self.classes.push(TokenClass {
            regex: Regex::new(regex)?,
            kind: Some(kind),
        });
        Ok(self)
    }

    /// Adds a class whose matches are consumed without producing a token.
    ///
    /// # Fails
    ///
    /// When the provided `regex` is malformed.
    pub fn with_ignored(mut self, regex: &str) -> RegexResult<Self> {
        self.classes.push(TokenClass {
            regex: Regex::new(regex)?,
            kind: None,
        });
        Ok(self)
    }

    pub fn build(self) -> Lexicon<TokenKind> {
        log::debug!("built lexicon with {} token classes", self.classes.len());

        Lexicon {
            classes: self.classes,
        }
    }
}

/// Maximal-munch tokenizer over a shared [`Lexicon`].
///
/// Iterating yields tokens until the input is exhausted or the first
/// [`LexError`], after which the iterator is fused.
#[derive(Debug, Clone)]
pub struct Tokenizer<TokenKind> {
    lexicon: Arc<Lexicon<TokenKind>>,
    input: Input,
    failed: bool,
}

impl<TokenKind: Clone + std::fmt::Debug> Tokenizer<TokenKind> {
    /// Creates a tokenizer without input.
    pub fn new(lexicon: Arc<Lexicon<TokenKind>>) -> Self {
        Self {
            lexicon,
            input: Input::default(),
            failed: false,
        }
    }

    /// Creates a tokenizer positioned at the start of `input`.
    pub fn with_input(lexicon: Arc<Lexicon<TokenKind>>, input: &str) -> Self {
        let mut tokenizer = Self::new(lexicon);
        tokenizer.tokenize(input);
        tokenizer
    }

    /// Replaces the input and restarts at its first byte.
    pub fn tokenize(&mut self, input: &str) {
        self.input = Input::new(input);
        self.failed = false;
        self.skip_ignored();
    }

    /// Whether unconsumed input remains. Input consisting only of skipped
    /// classes does not count.
    pub fn has_more(&self) -> bool {
        !self.input.is_exhausted()
    }

    /// Byte offset of the next token.
    pub fn offset(&self) -> usize {
        self.input.offset()
    }

    /// Consumes and returns the longest token at the current offset.
    ///
    /// On failure the offset is left where it was.
    pub fn next_token(&mut self) -> LexResult<Token<TokenKind>> {
        let pos = self.input.offset();
        let rest = self.input.rest();

        let Some(found) = rest.chars().next() else {
            return Err(LexError::EndOfInput { pos });
        };

        let Some((class, len)) = self.lexicon.longest_match(rest) else {
            log::trace!("no token class matches at {} ({:?})", pos, found);
            return Err(LexError::NoMatch { pos, found });
        };

        // `skip_ignored` ran last, so the winner produces a token.
        let Some(kind) = class.kind.clone() else {
            return Err(LexError::NoMatch { pos, found });
        };

        let consumed = self.input.consume(len);
        log::trace!(
            "matched {:?} {:?} at {}..{}",
            kind,
            consumed.lexeme,
            consumed.pos.0,
            consumed.pos.1
        );

        self.skip_ignored();

        Ok(Token {
            kind,
            lexeme: consumed.lexeme,
            pos: consumed.pos,
        })
    }

    /// Tokenizes the rest of the input.
    pub fn collect_tokens(&mut self) -> LexResult<Vec<Token<TokenKind>>> {
        let mut tokens = Vec::new();

        while self.has_more() {
            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn skip_ignored(&mut self) {
        while let Some((class, len)) = self.lexicon.longest_match(self.input.rest()) {
            if class.kind.is_some() {
                break;
            }

            let skipped = self.input.consume(len);
            log::trace!("skipped {:?} at {}", skipped.lexeme, skipped.pos.0);
        }
    }
}

impl<TokenKind: Clone + std::fmt::Debug> Iterator for Tokenizer<TokenKind> {
    type Item = LexResult<Token<TokenKind>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.has_more() {
            return None;
        }

        let result = self.next_token();
        self.failed = result.is_err();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    macro_rules! tokens {
        ($(($start:expr, $end:expr, $lexeme:expr) => $token_kind:expr),*) => {
           vec![$(Token {kind: $token_kind, lexeme: $lexeme.into(), pos: ($start, $end) }),*]
        };
    }

    use super::{error::LexError, Lexicon, Token, Tokenizer};
    use std::sync::Arc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Id,
        Number,
        Plus,
        Star,
        Equals,
        DoubleEquals,
        OpenParen,
        CloseParen,
    }

    const LETTER: &str = "(a|b|c|d|e|f)";
    const DIGIT: &str = "(0|1|2|3|4|5|6|7|8|9)";

    fn lexicon() -> Arc<Lexicon<Kind>> {
        let id = format!("{LETTER}(({LETTER}|{DIGIT})*)");
        let number = format!("{DIGIT}({DIGIT}*)");

        Arc::new(
            Lexicon::builder()
                .with_token_class(&id, Kind::Id)
                .and_then(|b| b.with_token_class(&number, Kind::Number))
                .and_then(|b| b.with_token_class("+", Kind::Plus))
                .and_then(|b| b.with_token_class("*", Kind::Star))
                .and_then(|b| b.with_token_class("=", Kind::Equals))
                .and_then(|b| b.with_token_class("==", Kind::DoubleEquals))
                .and_then(|b| b.with_token_class("(", Kind::OpenParen))
                .and_then(|b| b.with_token_class(")", Kind::CloseParen))
                .and_then(|b| b.with_ignored(" "))
                .expect("valid token classes")
                .build(),
        )
    }

    fn lex(input: &str) -> Result<Vec<Token<Kind>>, LexError> {
        Tokenizer::with_input(lexicon(), input).collect()
    }

    #[test]
    fn single_number() {
        assert_eq!(lex("123"), Ok(tokens![(0, 3, "123") => Kind::Number]));
    }

    #[test]
    fn maximal_munch() -> Result<(), Box<dyn std::error::Error>> {
        let expected = tokens![
            (0, 7, "adf2123") => Kind::Id,
            (7, 9, "==") => Kind::DoubleEquals,
            (9, 13, "3123") => Kind::Number
        ];
        assert_eq!(lex("adf2123==3123")?, expected);

        let expected = tokens![
            (0, 5, "12143") => Kind::Number,
            (5, 6, "+") => Kind::Plus,
            (6, 9, "132") => Kind::Number
        ];
        assert_eq!(lex("12143+132")?, expected);

        Ok(())
    }

    #[test]
    fn ties_go_to_the_first_class() -> Result<(), Box<dyn std::error::Error>> {
        let lexicon = Arc::new(
            Lexicon::builder()
                .with_token_class("ab", Kind::Id)?
                .with_token_class("a(b*)", Kind::Number)?
                .build(),
        );

        let tokens = Tokenizer::with_input(lexicon, "ababb").collect::<Result<Vec<_>, _>>()?;
        assert_eq!(
            tokens,
            tokens![(0, 2, "ab") => Kind::Id, (2, 5, "abb") => Kind::Number]
        );

        Ok(())
    }

    #[test]
    fn ignored_classes() {
        assert_eq!(
            lex("  (a1 * 2)  "),
            Ok(tokens![
                (2, 3, "(") => Kind::OpenParen,
                (3, 5, "a1") => Kind::Id,
                (6, 7, "*") => Kind::Star,
                (8, 9, "2") => Kind::Number,
                (9, 10, ")") => Kind::CloseParen
            ])
        );

        let mut tokenizer = Tokenizer::with_input(lexicon(), "   ");
        assert!(!tokenizer.has_more());
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn unknown_character_stops_without_advancing() {
        let mut tokenizer = Tokenizer::with_input(lexicon(), "12?3");

        assert_eq!(
            tokenizer.next_token(),
            Ok(Token {
                kind: Kind::Number,
                lexeme: "12".into(),
                pos: (0, 2)
            })
        );
        assert_eq!(
            tokenizer.next_token(),
            Err(LexError::NoMatch { pos: 2, found: '?' })
        );
        assert_eq!(tokenizer.offset(), 2);
        assert!(tokenizer.has_more());

        let mut tokenizer = Tokenizer::with_input(lexicon(), "12?3");
        assert!(matches!(tokenizer.next(), Some(Ok(_))));
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn tokenize_restarts() {
        let mut tokenizer = Tokenizer::with_input(lexicon(), "abc");
        assert!(tokenizer.next_token().is_ok());
        assert!(!tokenizer.has_more());
        assert_eq!(
            tokenizer.next_token(),
            Err(LexError::EndOfInput { pos: 3 })
        );

        tokenizer.tokenize("1+2");
        assert_eq!(
            tokenizer.collect_tokens(),
            Ok(tokens![
                (0, 1, "1") => Kind::Number,
                (1, 2, "+") => Kind::Plus,
                (2, 3, "2") => Kind::Number
            ])
        );
    }
}
