use self::first_follow::FirstFollow;
use crate::Symbol;

use std::{borrow::Cow, collections::BTreeSet, fmt};

mod first_follow;

/// Index of a production in the production sequence of its [`Grammar`].
pub type ProductionId = usize;

/// How the syntax-tree node of a reduction is built from the nodes of the
/// body symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxDirectedDefinition {
    /// Reuse the node of the body symbol at this index.
    Copy(usize),
    /// Create a node with `label` whose children are the nodes of the body
    /// symbols at `children`, in that order.
    Tree { label: String, children: Vec<usize> },
}

impl SyntaxDirectedDefinition {
    pub fn tree(label: impl Into<String>, children: impl IntoIterator<Item = usize>) -> Self {
        Self::Tree {
            label: label.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Body indices the definition reads.
    pub fn indices(&self) -> &[usize] {
        match self {
            Self::Copy(index) => std::slice::from_ref(index),
            Self::Tree { children, .. } => children,
        }
    }
}

/// Rewrite rule `head -> body`. An empty body derives ε.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    head: Symbol,
    body: Vec<Symbol>,
    definition: Option<SyntaxDirectedDefinition>,
}

impl Production {
    pub fn new<S: Into<Symbol>>(head: impl Into<Symbol>, body: impl IntoIterator<Item = S>) -> Self {
        Self {
            head: head.into(),
            body: body.into_iter().map(Into::into).collect(),
            definition: None,
        }
    }

    pub fn with_definition(mut self, definition: SyntaxDirectedDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn head(&self) -> &Symbol {
        &self.head
    }

    pub fn body(&self) -> &[Symbol] {
        &self.body
    }

    /// Amount of symbols in the body.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether this is an ε-production.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The definition given at construction, if any.
    pub fn definition(&self) -> Option<&SyntaxDirectedDefinition> {
        self.definition.as_ref()
    }

    /// The definition used when reducing by this production.
    ///
    /// Without an explicit definition, a single-symbol body copies its only
    /// node and any other body becomes a node labelled with the head over all
    /// body nodes.
    pub fn effective_definition(&self) -> Cow<'_, SyntaxDirectedDefinition> {
        match &self.definition {
            Some(definition) => Cow::Borrowed(definition),
            None if self.body.len() == 1 => Cow::Owned(SyntaxDirectedDefinition::Copy(0)),
            None => Cow::Owned(SyntaxDirectedDefinition::tree(
                self.head.as_str(),
                0..self.body.len(),
            )),
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.head)?;

        if self.body.is_empty() {
            return write!(f, " ε");
        }

        for symbol in &self.body {
            write!(f, " {}", symbol)?;
        }

        Ok(())
    }
}

/// Why a [`GrammarBuilder`] could not build a [`Grammar`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("start symbol not set")]
    MissingStartSymbol,
    #[error("start symbol {start} needs exactly one production, found {found}")]
    StartProductions { start: Symbol, found: usize },
    #[error("production `{production}` for the start symbol must derive a single non-terminal")]
    NotAugmenting { production: String },
    #[error("definition of production `{production}` reads body index {index}, but the body has {len} symbols")]
    InvalidDefinition {
        production: String,
        index: usize,
        len: usize,
    },
}

/// Context-free grammar with an augmenting start production.
///
/// FIRST and FOLLOW sets are computed once, when the grammar is built.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Start symbol of the [`Grammar`].
    start_symbol: Symbol,
    /// Id of the single production of the start symbol.
    augmenting_production: ProductionId,
    productions: Vec<Production>,
    non_terminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
    sets: FirstFollow,
}

impl Grammar {
    /// Creates a new [`GrammarBuilder`].
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(id)
    }

    /// Returns the productions with `head` as head, together with their ids.
    pub fn productions_of<'a>(
        &'a self,
        head: &'a str,
    ) -> impl Iterator<Item = (ProductionId, &'a Production)> + 'a {
        self.productions
            .iter()
            .enumerate()
            .filter(move |(_, production)| production.head == *head)
    }

    /// Id of the augmenting production `start -> S`.
    pub fn augmenting_production(&self) -> ProductionId {
        self.augmenting_production
    }

    pub fn is_terminal(&self, symbol: &str) -> bool {
        !self.non_terminals.contains(symbol)
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.non_terminals.iter()
    }

    /// Terminals used in production bodies, without the end marker.
    pub fn terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.terminals.iter()
    }

    /// Whether `symbol` derives the empty string.
    pub fn is_nullable(&self, symbol: &str) -> bool {
        self.sets.is_nullable(symbol)
    }

    /// FIRST set of `symbol`. The FIRST set of a terminal is the terminal
    /// itself.
    pub fn first(&self, symbol: &str) -> BTreeSet<Symbol> {
        self.sets.first(symbol)
    }

    /// FIRST set of a sequence of symbols and whether the whole sequence is
    /// nullable.
    pub fn first_of_sequence(&self, sequence: &[Symbol]) -> (BTreeSet<Symbol>, bool) {
        self.sets.first_of_sequence(sequence)
    }

    /// FOLLOW set of `non_terminal`. Empty for terminals.
    pub fn follow(&self, non_terminal: &str) -> BTreeSet<Symbol> {
        self.sets.follow(non_terminal)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, production) in self.productions.iter().enumerate() {
            writeln!(f, "{:>3}: {}", id, production)?;
        }

        Ok(())
    }
}

/// Builder struct for the [`Grammar`].
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    start_symbol: Option<Symbol>,
    productions: Vec<Production>,
}

impl GrammarBuilder {
    /// Creates a new [`GrammarBuilder`] with no start symbol and no
    /// productions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start symbol of the [`Grammar`]. It must head exactly one
    /// production, deriving a single non-terminal.
    pub fn with_start_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.start_symbol = Some(symbol.into());
        self
    }

    /// Adds the production `symbol' -> symbol` and makes `symbol'` the start
    /// symbol.
    pub fn with_augmented_start(self, symbol: impl Into<Symbol>) -> Self {
        let symbol = symbol.into();
        let start = Symbol::from(format!("{}'", symbol));

        self.with_start_symbol(start.clone())
            .with_production(Production::new(start, [symbol]))
    }

    pub fn with_production(mut self, production: Production) -> Self {
        self.add_production(production);
        self
    }

    /// Adds `head -> body` without a syntax-directed definition.
    pub fn with_rule<S: Into<Symbol>>(
        self,
        head: impl Into<Symbol>,
        body: impl IntoIterator<Item = S>,
    ) -> Self {
        self.with_production(Production::new(head, body))
    }

    /// Adds `head -> body` with the given syntax-directed definition.
    pub fn with_defined_rule<S: Into<Symbol>>(
        self,
        head: impl Into<Symbol>,
        body: impl IntoIterator<Item = S>,
        definition: SyntaxDirectedDefinition,
    ) -> Self {
        self.with_production(Production::new(head, body).with_definition(definition))
    }

    /// Adds a production for every body in `bodies`.
    pub fn with_rules<B, S>(mut self, head: impl Into<Symbol>, bodies: impl IntoIterator<Item = B>) -> Self
    where
        B: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let head = head.into();

        for body in bodies {
            self.add_production(Production::new(head.clone(), body));
        }

        self
    }

    pub fn add_production(&mut self, production: Production) {
        self.productions.push(production);
    }

    /// Builds the [`Grammar`], validates the start production and the
    /// syntax-directed definitions, and computes FIRST and FOLLOW sets.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let start_symbol = self.start_symbol.ok_or(GrammarError::MissingStartSymbol)?;

        let non_terminals = self
            .productions
            .iter()
            .map(|p| p.head.clone())
            .collect::<BTreeSet<_>>();

        let terminals = self
            .productions
            .iter()
            .flat_map(|p| p.body.iter())
            .filter(|s| !non_terminals.contains(*s))
            .cloned()
            .collect::<BTreeSet<_>>();

        let start_productions = self
            .productions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.head == start_symbol)
            .collect::<Vec<_>>();

        let augmenting_production = match start_productions.as_slice() {
            [(id, production)] => {
                if !matches!(production.body.as_slice(), [s] if non_terminals.contains(s)) {
                    return Err(GrammarError::NotAugmenting {
                        production: production.to_string(),
                    });
                }
                *id
            }
            productions => {
                return Err(GrammarError::StartProductions {
                    start: start_symbol,
                    found: productions.len(),
                })
            }
        };

        for production in &self.productions {
            let Some(definition) = &production.definition else {
                continue;
            };

            if let Some(index) = definition
                .indices()
                .iter()
                .find(|index| **index >= production.body.len())
            {
                return Err(GrammarError::InvalidDefinition {
                    production: production.to_string(),
                    index: *index,
                    len: production.body.len(),
                });
            }
        }

        let sets = FirstFollow::compute(&start_symbol, &self.productions, &non_terminals);

        log::debug!(
            "built grammar with {} productions, {} non-terminals and {} terminals",
            self.productions.len(),
            non_terminals.len(),
            terminals.len()
        );

        Ok(Grammar {
            start_symbol,
            augmenting_production,
            productions: self.productions,
            non_terminals,
            terminals,
            sets,
        })
    }
}
