use crate::{Grammar, ParseAction, ProductionId, SyntaxDirectedDefinition};

use std::fmt;

/// Node of a syntax tree. Leaves carry lexemes, inner nodes the labels of
/// their syntax-directed definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Writes the tree as an s-expression, e.g. `(* (+ 1 2) 3)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.label);
        }

        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("trace ends without accepting")]
    IncompleteTrace,
    #[error("trace records a parse error at action {index}")]
    ParseFailed { index: usize },
    #[error("shift at action {index} has no lexeme left")]
    TokenUnderflow { index: usize },
    #[error("reduction by production {production} pops {needed} nodes, but the stack holds {available}")]
    StackUnderflow {
        production: ProductionId,
        needed: usize,
        available: usize,
    },
    #[error("trace reduces by unknown production {production}")]
    UnknownProduction { production: ProductionId },
    #[error("definition of production {production} reads body node {index} more than once or out of range")]
    InvalidDefinition {
        production: ProductionId,
        index: usize,
    },
    #[error("accepted with {nodes} nodes on the stack instead of one")]
    UnfinishedStack { nodes: usize },
}

/// Replays `trace` over `lexemes` and builds the syntax tree.
///
/// Every shift pushes a leaf for the next lexeme and every reduction replaces
/// the nodes of the body with the node its definition describes. On accept the
/// single remaining node is the root.
pub fn build_tree<S: AsRef<str>>(
    grammar: &Grammar,
    lexemes: &[S],
    trace: &[ParseAction],
) -> Result<Node, TreeError> {
    let mut stack: Vec<Node> = Vec::new();
    let mut lexemes = lexemes.iter();

    for (index, action) in trace.iter().enumerate() {
        match *action {
            ParseAction::Shift => {
                let lexeme = lexemes.next().ok_or(TreeError::TokenUnderflow { index })?;
                stack.push(Node::leaf(lexeme.as_ref()));
            }
            ParseAction::Reduce(production) => {
                let node = reduce(grammar, production, &mut stack)?;
                log::trace!("reduced by {} into `{}`", production, node.label);
                stack.push(node);
            }
            ParseAction::Accept => {
                return match (stack.pop(), stack.len()) {
                    (Some(root), 0) => Ok(root),
                    (root, rest) => Err(TreeError::UnfinishedStack {
                        nodes: rest + usize::from(root.is_some()),
                    }),
                };
            }
            ParseAction::Error => return Err(TreeError::ParseFailed { index }),
        }
    }

    Err(TreeError::IncompleteTrace)
}

fn reduce(
    grammar: &Grammar,
    production_id: ProductionId,
    stack: &mut Vec<Node>,
) -> Result<Node, TreeError> {
    let production = grammar
        .production(production_id)
        .ok_or(TreeError::UnknownProduction {
            production: production_id,
        })?;

    if stack.len() < production.len() {
        return Err(TreeError::StackUnderflow {
            production: production_id,
            needed: production.len(),
            available: stack.len(),
        });
    }

    let mut body = stack
        .split_off(stack.len() - production.len())
        .into_iter()
        .map(Some)
        .collect::<Vec<_>>();

    let mut take = |index: usize| {
        body.get_mut(index)
            .and_then(Option::take)
            .ok_or(TreeError::InvalidDefinition {
                production: production_id,
                index,
            })
    };

    match production.effective_definition().as_ref() {
        SyntaxDirectedDefinition::Copy(index) => take(*index),
        SyntaxDirectedDefinition::Tree { label, children } => {
            let children = children
                .iter()
                .map(|index| take(*index))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Node::new(label.as_str(), children))
        }
    }
}
