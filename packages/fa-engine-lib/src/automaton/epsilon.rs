use hashbrown::HashSet;

use crate::automaton::{Automaton, VertexId};

impl Automaton {
    /// Calculates the vertices reachable from `vertex` through epsilon
    /// transitions only. `vertex` itself is not part of the result.
    pub fn epsilon_closure(&self, vertex: VertexId) -> Vec<VertexId> {
        let epsilon = self.alphabet.epsilon();
        let mut closure = vec![];
        let mut visited = HashSet::new();
        let mut stack = vec![vertex];
        visited.insert(vertex);

        while let Some(current) = stack.pop() {
            for next in self.next_vertices(current, epsilon) {
                if visited.insert(next) {
                    closure.push(next);
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Turns the automaton into an equivalent one without epsilon
    /// transitions.
    ///
    /// Every vertex inherits the real transitions and the terminality of the
    /// vertices in its epsilon closure. Afterwards all epsilon transitions are
    /// dropped and the vertices that became unreachable are pruned.
    pub fn eliminate_epsilon(&mut self) {
        tracing::debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "eliminating epsilon transitions"
        );

        let epsilon = self.alphabet.epsilon();
        let mut result = self.clone();

        for vertex in self.vertex_ids() {
            for reached in self.epsilon_closure(vertex) {
                let Some(data) = self.vertex(reached) else {
                    continue;
                };

                for (symbol, to) in data.iter_edges() {
                    if symbol != epsilon {
                        result.add_edge(vertex, symbol, to);
                    }
                }

                if self.is_terminal(reached) {
                    result.add_terminal(vertex);
                }
            }
        }

        for vertex in result.vertices.values_mut() {
            vertex.delete_symbol(epsilon);
        }

        let pruned = result.remove_unreachable();

        tracing::debug!(
            vertices = result.vertex_count(),
            edges = result.edge_count(),
            pruned,
            "eliminated epsilon transitions"
        );

        *self = result;
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Alphabet, Automaton};

    #[test]
    fn closure_excludes_the_vertex_itself() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        a.add_edge(0, '1', 1);
        a.add_edge(1, '1', 2);
        a.add_edge(2, '1', 0);
        a.add_edge(2, 'a', 3);

        let mut closure = a.epsilon_closure(0);
        closure.sort();
        assert_eq!(closure, vec![1, 2]);
        assert!(a.epsilon_closure(3).is_empty());
    }

    #[test]
    fn terminality_is_pulled_through_epsilon() {
        let mut a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        a.add_edge(0, '1', 1);
        a.add_edge(1, 'a', 0);
        a.add_terminal(1);

        a.eliminate_epsilon();

        assert!(a.is_terminal(0));
        assert!(!a.has_epsilon_transitions());
        // 1 is only reachable through the epsilon edge
        assert_eq!(a.vertex_count(), 1);
        assert_eq!(a.edge_count(), 1);
        assert!(a.has_word("aaa"));
    }
}
