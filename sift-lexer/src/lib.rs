pub use fsm::{Dfa, DfaSimulator, Input, Nfa, NfaSimulator, Simulate, StateId};
pub use lexer::{
    error::{LexError, LexResult},
    Lexicon, LexiconBuilder, Token, Tokenizer,
};
pub use regex::{
    parser::error::{RegexError, RegexResult},
    Regex,
};

mod fsm;
mod lexer;
mod regex;
