use sift_lexer::Token;

use super::{
    error::ParseError,
    table::{Action, ParseTable},
};
use crate::{cfsm::StateId, ProductionId, Symbol, END_MARKER};

/// Record of a single move of the [`Parser`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseAction {
    Shift,
    Reduce(ProductionId),
    Accept,
    Error,
}

/// Table-driven shift-reduce parser over a sequence of terminal symbols, with
/// one symbol of lookahead.
#[derive(Debug, Clone)]
pub struct Parser<'t> {
    table: &'t ParseTable,
    input: Vec<Symbol>,
    position: usize,
    stack: Vec<StateId>,
    accepted: bool,
    stuck: bool,
}

impl<'t> Parser<'t> {
    /// Creates a parser in the start state. Reading past the end of `input`
    /// yields the end marker, so it need not be appended.
    pub fn new<S: Into<Symbol>>(table: &'t ParseTable, input: impl IntoIterator<Item = S>) -> Self {
        Self {
            table,
            input: input.into_iter().map(Into::into).collect(),
            position: 0,
            stack: Vec::from([0]),
            accepted: false,
            stuck: false,
        }
    }

    /// Creates a parser over the terminals `terminal` maps the token kinds to.
    pub fn from_tokens<K>(
        table: &'t ParseTable,
        tokens: &[Token<K>],
        terminal: impl Fn(&K) -> Symbol,
    ) -> Self {
        Self::new(table, tokens.iter().map(|token| terminal(&token.kind)))
    }

    pub fn has_accepted(&self) -> bool {
        self.accepted
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Whether the parser accepted or got stuck.
    pub fn is_done(&self) -> bool {
        self.accepted || self.stuck
    }

    /// Index of the lookahead in the input.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn stack(&self) -> &[StateId] {
        &self.stack
    }

    pub fn lookahead(&self) -> Symbol {
        self.input
            .get(self.position)
            .cloned()
            .unwrap_or_else(|| Symbol::from(END_MARKER))
    }

    /// Performs the action of the table cell for the top of the stack and the
    /// lookahead. Once the parser accepted or got stuck, every further call
    /// repeats the final action without changing state.
    pub fn make_next_move(&mut self) -> ParseAction {
        if self.accepted {
            return ParseAction::Accept;
        }

        if self.stuck {
            return ParseAction::Error;
        }

        let Some(&state) = self.stack.last() else {
            return self.get_stuck();
        };

        let lookahead = self.lookahead();

        // GOTO entries share the table, so non-terminals in the input must not
        // reach the lookup.
        if !self.table.grammar().is_terminal(lookahead.as_str()) {
            log::trace!("state {} on non-terminal `{}`", state, lookahead);
            return self.get_stuck();
        }

        let action = match self.table.action(state, lookahead.as_str()) {
            Some(Action::Shift(target)) => {
                self.stack.push(target);
                self.position += 1;
                ParseAction::Shift
            }
            Some(Action::Reduce(production)) => self.reduce(production),
            // Input after an explicit end marker is not part of the sentence.
            Some(Action::Accept) if self.position + 1 < self.input.len() => {
                self.position += 1;
                self.get_stuck()
            }
            Some(Action::Accept) => {
                self.accepted = true;
                ParseAction::Accept
            }
            None => self.get_stuck(),
        };

        log::trace!(
            "state {} on `{}`: {:?}, stack {:?}",
            state,
            lookahead,
            action,
            self.stack
        );

        action
    }

    fn reduce(&mut self, production_id: ProductionId) -> ParseAction {
        let table = self.table;

        let Some(production) = table.grammar().production(production_id) else {
            return self.get_stuck();
        };

        if self.stack.len() <= production.len() {
            return self.get_stuck();
        }

        self.stack.truncate(self.stack.len() - production.len());

        let goto = self
            .stack
            .last()
            .and_then(|exposed| table.goto(*exposed, production.head().as_str()));

        match goto {
            Some(target) => {
                self.stack.push(target);
                ParseAction::Reduce(production_id)
            }
            None => self.get_stuck(),
        }
    }

    fn get_stuck(&mut self) -> ParseAction {
        self.stuck = true;
        ParseAction::Error
    }

    /// Moves until the parser accepts or gets stuck and returns the trace of
    /// actions.
    pub fn run(mut self) -> Result<Vec<ParseAction>, ParseError> {
        let mut trace = Vec::new();

        loop {
            let action = self.make_next_move();
            trace.push(action);

            match action {
                ParseAction::Accept => return Ok(trace),
                ParseAction::Error => {
                    let state = self.stack.last().copied().unwrap_or_default();

                    return Err(ParseError {
                        state,
                        position: self.position,
                        lookahead: self.lookahead(),
                        expected: self.table.expected(state),
                        trace,
                    });
                }
                ParseAction::Shift | ParseAction::Reduce(_) => (),
            }
        }
    }
}

impl ParseTable {
    /// Parses `input` from the start state and returns the action trace.
    pub fn parse<S: Into<Symbol>>(
        &self,
        input: impl IntoIterator<Item = S>,
    ) -> Result<Vec<ParseAction>, ParseError> {
        Parser::new(self, input).run()
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseAction, Parser};
    use crate::{Grammar, ParseTable, Symbol};

    fn table() -> ParseTable {
        let grammar = Grammar::builder()
            .with_augmented_start("expr")
            .with_rules("expr", [vec!["expr", "+", "term"], vec!["term"]])
            .with_rules("term", [vec!["term", "*", "factor"], vec!["factor"]])
            .with_rules("factor", [vec!["number"], vec!["(", "expr", ")"]])
            .build()
            .expect("valid grammar");

        ParseTable::new(grammar).expect("grammar is SLR(1)")
    }

    fn symbols(input: &str) -> Vec<&str> {
        input.split_whitespace().collect()
    }

    #[test]
    fn single_number() {
        use ParseAction::*;

        assert_eq!(
            table().parse(["number"]),
            Ok(vec![Shift, Reduce(5), Reduce(4), Reduce(2), Accept])
        );
    }

    #[test]
    fn nested_expression_is_accepted() {
        let table = table();
        let mut parser = Parser::new(&table, symbols("( number + number ) * ( number * number )"));

        while !parser.is_done() {
            parser.make_next_move();
        }

        assert!(parser.has_accepted());
        assert!(!parser.is_stuck());
        assert_eq!(parser.position(), 11);
    }

    #[test]
    fn explicit_end_marker() {
        let table = table();

        assert!(table.parse(["number", "+", "number", "$"]).is_ok());
    }

    #[test]
    fn stuck_on_missing_operand() {
        let table = table();
        let mut parser = Parser::new(&table, symbols("number + +"));

        while !parser.is_done() {
            parser.make_next_move();
        }

        assert!(parser.is_stuck());
        assert!(!parser.has_accepted());
        assert_eq!(parser.position(), 2);

        // Terminal states do not move anymore.
        let stack = parser.stack().to_vec();
        assert_eq!(parser.make_next_move(), ParseAction::Error);
        assert_eq!(parser.stack(), stack);

        let error = table.parse(symbols("number + +")).expect_err("stuck");
        assert_eq!(error.position, 2);
        assert_eq!(error.lookahead, "+");
        assert_eq!(error.expected, [Symbol::from("("), Symbol::from("number")]);
        assert_eq!(error.trace.last(), Some(&ParseAction::Error));
        assert_eq!(
            error.to_string(),
            "[ERROR] (2): unexpected `+`, expected one of `(`, `number`"
        );
    }

    #[test]
    fn input_after_end_marker() {
        let table = table();
        let error = table
            .parse(symbols("number $ + number * number"))
            .expect_err("trailing input");

        assert_eq!(error.position, 2);
        assert_eq!(error.lookahead, "+");
        assert_eq!(error.trace.last(), Some(&ParseAction::Error));

        let mut parser = Parser::new(&table, symbols("number $ number"));
        while !parser.is_done() {
            parser.make_next_move();
        }
        assert!(parser.is_stuck());
        assert!(!parser.has_accepted());
    }

    #[test]
    fn non_terminals_in_input() {
        let table = table();

        let error = table.parse(symbols("expr + term")).expect_err("non-terminal");
        assert_eq!(error.position, 0);
        assert_eq!(error.lookahead, "expr");
        assert_eq!(error.trace, [ParseAction::Error]);

        assert!(table.parse(symbols("number + term")).is_err());
    }

    #[test]
    fn stuck_at_end_of_input() {
        let error = table().parse(symbols("( number")).expect_err("stuck");

        assert_eq!(error.lookahead, "$");
        assert_eq!(error.position, 2);
        assert!(error.expected.contains(&Symbol::from(")")));
    }

    #[test]
    fn empty_productions() {
        let grammar = Grammar::builder()
            .with_augmented_start("list")
            .with_rules("list", [vec!["list", "item"], vec![]])
            .build()
            .expect("valid grammar");
        let table = ParseTable::new(grammar).expect("grammar is SLR(1)");

        use ParseAction::*;
        assert_eq!(table.parse(Vec::<&str>::new()), Ok(vec![Reduce(2), Accept]));
        assert_eq!(
            table.parse(["item", "item"]),
            Ok(vec![Reduce(2), Shift, Reduce(1), Shift, Reduce(1), Accept])
        );
    }

    mod proptest {
        use super::{table, ParseAction};
        use crate::build_tree;
        use ::proptest::prelude::*;

        fn arb_expr() -> impl Strategy<Value = Vec<&'static str>> {
            Just(vec!["number"]).prop_recursive(4, 32, 2, |inner| {
                prop_oneof![
                    (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| [lhs, vec!["+"], rhs].concat()),
                    (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| [lhs, vec!["*"], rhs].concat()),
                    inner.prop_map(|expr| [vec!["("], expr, vec![")"]].concat()),
                ]
            })
        }

        fn arb_terminals() -> impl Strategy<Value = Vec<&'static str>> {
            prop::collection::vec(prop::sample::select(vec!["number", "+", "*", "(", ")"]), 0..16)
        }

        proptest! {
            #[test]
            fn expressions_are_accepted(input in arb_expr()) {
                let table = table();
                let trace = table.parse(input.iter().copied()).expect("accepted");

                let shifts = trace.iter().filter(|action| **action == ParseAction::Shift).count();
                prop_assert_eq!(shifts, input.len());
                prop_assert!(build_tree(table.grammar(), &input, &trace).is_ok());
            }

            #[test]
            fn every_run_ends_in_accept_or_error(input in arb_terminals()) {
                let table = table();

                match table.parse(input.iter().copied()) {
                    Ok(trace) => prop_assert_eq!(trace.last(), Some(&ParseAction::Accept)),
                    Err(error) => {
                        prop_assert_eq!(error.trace.last(), Some(&ParseAction::Error));
                        prop_assert!(error.position <= input.len());
                    }
                }
            }
        }
    }
}
