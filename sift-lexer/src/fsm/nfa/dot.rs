use super::model::{Input, Nfa};
use std::fmt;

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Eps => write!(f, "ε"),
            Input::Symbol(c) => write!(f, "{}", c.escape_default()),
        }
    }
}

impl Nfa {
    /// Converts the NFA to the [graphviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language.
    pub fn to_dot(&self) -> String {
        format!(
            "digraph nfa {{\n\
                \trankdir = LR;\n\
            \n\
                \t// final state\n\
                \tnode [shape = doublecircle]; {};\n\
                \tnode [shape = circle]; {};\n\
            \n\
                {}\n\
            }}",
            self.final_state,
            self.start_state,
            self.transition_dot()
                .map(|l| format!("\t{}", l))
                .collect::<Vec<String>>()
                .join("\n")
        )
    }

    fn transition_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.states.iter().enumerate().flat_map(|(id, state)| {
            state.transitions.iter().flat_map(move |(input, dests)| {
                dests
                    .iter()
                    .map(move |dest| format!("{} -> {} [label = \"{}\"];", id, dest, input))
            })
        })
    }
}
