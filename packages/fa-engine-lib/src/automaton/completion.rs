use crate::automaton::Automaton;

impl Automaton {
    /// Makes the automaton total by routing every missing (vertex, real
    /// symbol) transition into a fresh sink vertex, see
    /// [`Automaton::fresh_vertex_id`].
    ///
    /// If no vertex other than the sink itself needed it, the sink is removed
    /// again, so completing an already complete automaton changes nothing.
    ///
    /// The result is only deterministic if the input was. On a
    /// nondeterministic automaton only the missing symbols are filled in and
    /// the existing nondeterminism is kept.
    pub fn complete(&mut self) {
        if !self.is_deterministic() {
            tracing::warn!(
                "completing a nondeterministic automaton, the result stays nondeterministic"
            );
        }

        let sink = self.fresh_vertex_id();
        let symbols = self.alphabet.real_symbols().to_vec();
        let ids = self.vertex_ids().chain(std::iter::once(sink)).collect::<Vec<_>>();

        self.add_vertex(sink);

        let mut needed = false;
        for vertex in ids {
            for &symbol in &symbols {
                if self.next_vertices(vertex, symbol).is_empty() {
                    self.add_edge(vertex, symbol, sink);
                    needed |= vertex != sink;
                }
            }
        }

        if needed {
            tracing::debug!(sink, edges = self.edge_count(), "completed with sink vertex");
        } else {
            self.remove_vertex(sink);
        }
    }

    /// Replaces the language by its complement over the real alphabet.
    ///
    /// The automaton is determinized and completed first, then the terminal
    /// set is flipped.
    pub fn complement(&mut self) {
        self.to_deterministic();
        self.complete();

        let terminals = self
            .vertex_ids()
            .filter(|&v| !self.is_terminal(v))
            .collect();
        self.terminals = terminals;

        tracing::debug!(
            vertices = self.vertex_count(),
            terminals = self.terminals.len(),
            "complemented"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Alphabet, Automaton};

    #[test]
    fn adds_sink_for_missing_symbols() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        a.add_edge(0, 'a', 1);
        a.add_terminal(1);

        a.complete();

        assert!(a.is_complete());
        assert_eq!(a.vertex_count(), 3);
        // 0 -b-> 2, 1 -a-> 2, 1 -b-> 2 and two sink loops
        assert_eq!(a.edge_count(), 6);
        assert_eq!(a.next_vertices(2, 'a'), vec![2]);
    }

    #[test]
    fn sink_id_after_maximal_vertex_id() {
        let mut a = Automaton::new(Alphabet::new("1a").unwrap(), 0);
        a.add_edge(0, 'a', u32::MAX);
        a.add_terminal(u32::MAX);

        a.complete();

        assert!(a.is_complete());
        assert_eq!(a.vertex_count(), 3);
        assert_eq!(a.next_vertices(0, 'a'), vec![u32::MAX]);
        assert_eq!(a.next_vertices(u32::MAX, 'a'), vec![1]);
        assert_eq!(a.next_vertices(1, 'a'), vec![1]);
        assert!(a.has_word("a"));
        assert!(!a.has_word("aa"));
    }

    #[test]
    fn complete_automaton_is_left_alone() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        a.add_edge(0, 'a', 0);
        a.add_edge(0, 'b', 0);
        let before = a.clone();

        a.complete();

        assert_eq!(a, before);
    }

    #[test]
    fn complement_of_empty_language_accepts_everything() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);

        a.complement();

        assert!(a.has_word(""));
        assert!(a.has_word("abba"));
        assert_eq!(a.vertex_count(), 2);
    }
}
