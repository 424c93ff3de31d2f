use super::{state::State, Cfsm};
use crate::Grammar;

fn escape(label: &str) -> String {
    label.replace('\\', r"\\").replace('"', "\\\"")
}

impl Cfsm {
    /// Converts the CFSM to the [graphviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language.
    pub fn to_dot(&self, grammar: &Grammar) -> String {
        format!(
            "digraph cfsm {{\n\
                \trankdir=LR;\n\
            \n\
                \tnode [shape=rectangle];\n\
                {}\n\
                {}\
            }}\n",
            self.node_labels_dot(grammar)
                .map(|l| format!("\t{}\n", l))
                .collect::<String>(),
            self.transitions_dot()
                .map(|l| format!("\t{}\n", l))
                .collect::<String>(),
        )
    }

    fn node_labels_dot<'a>(&'a self, grammar: &'a Grammar) -> impl Iterator<Item = String> + 'a {
        self.states.iter().map(move |State { id, item_set, .. }| {
            let label = item_set
                .iter()
                .map(|item| escape(&item.display(grammar).to_string()))
                .collect::<Vec<_>>()
                .join(r"\n");

            format!("{} [label=\"{}\"];", id, label)
        })
    }

    fn transitions_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.states.iter().flat_map(|State { id, transitions, .. }| {
            transitions.iter().map(move |(symbol, target)| {
                format!("{} -> {} [label = \"{}\"];", id, target, escape(symbol.as_str()))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cfsm, Grammar};

    #[test]
    fn dot() {
        let grammar = Grammar::builder()
            .with_augmented_start("s")
            .with_rule("s", ["x"])
            .build()
            .expect("valid grammar");

        let dot = Cfsm::from_grammar(&grammar).to_dot(&grammar);

        assert!(dot.starts_with("digraph cfsm {"));
        assert!(dot.contains(r#"0 [label="s' -> • s\ns -> • x"];"#));
        assert!(dot.contains(r#"0 -> 1 [label = "s"];"#));
        assert!(dot.contains(r#"0 -> 2 [label = "x"];"#));
    }
}
