use crate::{Grammar, ProductionId, Symbol};

use std::{
    collections::{BTreeSet, VecDeque},
    fmt,
};

/// [Item](https://en.wikipedia.org/wiki/LR_parser#Items) of a production with
/// a bullet/cursor before the body symbol at `dot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    production: ProductionId,
    dot: usize,
}

/// Set of [`Item`]s in a state of the [`Cfsm`].
///
/// Items are kept sorted, so two sets holding the same items compare and hash
/// equal no matter in which order they were added.
///
/// [`Cfsm`]: super::Cfsm
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemSet {
    items: BTreeSet<Item>,
}

impl Item {
    pub fn new(production: ProductionId, dot: usize) -> Self {
        Self { production, dot }
    }

    pub fn production(&self) -> ProductionId {
        self.production
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    /// Returns the [`Symbol`] the bullet/cursor is currently reading.
    pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar
            .production(self.production)
            .and_then(|p| p.body().get(self.dot))
    }

    /// Whether the bullet/cursor is past the last body symbol.
    pub fn is_reducible(&self, grammar: &Grammar) -> bool {
        grammar
            .production(self.production)
            .map_or(false, |p| self.dot >= p.len())
    }

    /// Advances the bullet/cursor by one symbol.
    fn advance(self) -> Self {
        Self {
            dot: self.dot + 1,
            ..self
        }
    }

    /// Formats the item as `head -> a • b`.
    pub fn display<'g>(&self, grammar: &'g Grammar) -> ItemDisplay<'g> {
        ItemDisplay {
            item: *self,
            grammar,
        }
    }
}

pub struct ItemDisplay<'g> {
    item: Item,
    grammar: &'g Grammar,
}

impl fmt::Display for ItemDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(production) = self.grammar.production(self.item.production) else {
            return write!(f, "<unknown production {}>", self.item.production);
        };

        write!(f, "{} ->", production.head())?;

        for (pos, symbol) in production.body().iter().enumerate() {
            if pos == self.item.dot {
                write!(f, " •")?;
            }
            write!(f, " {}", symbol)?;
        }

        if self.item.dot >= production.len() {
            write!(f, " •")?;
        }

        Ok(())
    }
}

impl ItemSet {
    /// Constructs the closure of the `kernel` items based on the [`Grammar`].
    ///
    /// Whenever the bullet/cursor of an item reads a non-terminal, every
    /// production of that non-terminal is added with the bullet/cursor at its
    /// start, until no new items appear.
    pub fn closure(kernel: impl IntoIterator<Item = Item>, grammar: &Grammar) -> Self {
        let mut items = BTreeSet::new();
        let mut pending_items = VecDeque::new();

        for item in kernel {
            if items.insert(item) {
                pending_items.push_back(item);
            }
        }

        while let Some(item) = pending_items.pop_front() {
            let Some(symbol) = item.next_symbol(grammar) else {
                continue;
            };

            for (production, _) in grammar.productions_of(symbol.as_str()) {
                let new_item = Item::new(production, 0);

                if items.insert(new_item) {
                    pending_items.push_back(new_item);
                }
            }
        }

        Self { items }
    }

    /// Closes this set again. For a set built by [`ItemSet::closure`] the
    /// result equals the set itself.
    pub fn close(&self, grammar: &Grammar) -> Self {
        Self::closure(self.items.iter().copied(), grammar)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the distinct symbols read by a bullet/cursor, in order of first
    /// appearance over the sorted items.
    pub(super) fn transition_symbols<'g>(&self, grammar: &'g Grammar) -> Vec<&'g Symbol> {
        self.items
            .iter()
            .filter_map(|item| item.next_symbol(grammar))
            .fold(Vec::new(), |mut symbols, symbol| {
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
                symbols
            })
    }

    /// Advances every item reading `symbol` and closes the result.
    pub fn goto(&self, symbol: &Symbol, grammar: &Grammar) -> Self {
        Self::closure(
            self.items
                .iter()
                .filter(|item| item.next_symbol(grammar) == Some(symbol))
                .map(|item| item.advance()),
            grammar,
        )
    }

    /// Items whose bullet/cursor has read the whole body.
    pub fn reducible_items<'a>(&'a self, grammar: &'a Grammar) -> impl Iterator<Item = Item> + 'a {
        self.items
            .iter()
            .filter(move |item| item.is_reducible(grammar))
            .copied()
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
