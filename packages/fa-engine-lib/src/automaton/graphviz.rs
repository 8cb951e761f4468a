use itertools::Itertools;

use crate::automaton::Automaton;

impl Automaton {
    /// Renders the automaton in the graphviz dot language. Terminal vertices
    /// are drawn as double circles, epsilon transitions are labelled `ε`.
    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        if !self.terminals.is_empty() {
            dot.push_str(&format!(
                "node [shape = doublecircle]; {};\n",
                self.terminals.iter().join(" ")
            ));
        }
        dot.push_str("node [shape = circle];\n");
        dot.push_str(&format!("START -> {};\n", self.start));

        for vertex in self.vertices() {
            dot.push_str(&format!("{0} [ label=\"{0}\" ];\n", vertex.id()));
        }

        let epsilon = self.alphabet.epsilon();
        for vertex in self.vertices() {
            for (symbol, to) in vertex.iter_edges() {
                let label = if symbol == epsilon {
                    "ε".to_string()
                } else {
                    symbol.to_string()
                };

                dot.push_str(&format!(
                    "{} -> {} [ label=\"{}\" ];\n",
                    vertex.id(),
                    to,
                    label
                ));
            }
        }

        dot.push_str("}\n");

        dot
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Alphabet, Automaton};

    #[test]
    fn renders_edges_and_terminals() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        a.add_edge(0, 'a', 1);
        a.add_edge(1, '1', 2);
        a.add_terminal(1);
        a.add_terminal(2);

        let dot = a.to_graphviz();

        assert!(dot.starts_with("digraph finite_state_machine {"));
        assert!(dot.contains("node [shape = doublecircle]; 1 2;"));
        assert!(dot.contains("START -> 0;"));
        assert!(dot.contains("0 -> 1 [ label=\"a\" ];"));
        assert!(dot.contains("1 -> 2 [ label=\"ε\" ];"));
    }
}
