use sift_lexer::{Lexicon, Tokenizer};
use sift_parser::{Grammar, ParseTable, Symbol};

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminal {
    Mul,
    Plus,
    Val,
}

impl Terminal {
    fn symbol(&self) -> Symbol {
        match self {
            Terminal::Mul => "*".into(),
            Terminal::Plus => "+".into(),
            Terminal::Val => "val".into(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let grammar = Grammar::builder()
        .with_augmented_start("expr")
        .with_rules(
            "expr",
            [
                vec!["expr", "*", "val"],
                vec!["expr", "+", "val"],
                vec!["val"],
            ],
        )
        .build()?;

    println!("{}", grammar);

    let table = ParseTable::new(grammar)?;

    let lexicon = Lexicon::builder()
        .with_token_class("(0|1|2|3|4|5|6|7|8|9)", Terminal::Val)?
        .with_token_class("+", Terminal::Plus)?
        .with_token_class("*", Terminal::Mul)?
        .build();

    // `_` is not a token, lexing stops in front of it.
    let mut tokens = Vec::new();
    for token in Tokenizer::with_input(Arc::new(lexicon), "3+4_") {
        match token {
            Ok(token) => tokens.push(token),
            Err(error) => println!("{}", error),
        }
    }

    let terminals = tokens.iter().map(|token| token.kind.symbol());
    println!("{:#?}", table.parse(terminals));

    Ok(())
}
