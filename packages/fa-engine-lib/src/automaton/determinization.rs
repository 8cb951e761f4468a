use std::collections::{BTreeSet, VecDeque};

use hashbrown::HashMap;

use crate::automaton::{Automaton, VertexId};

impl Automaton {
    /// Determinizes the automaton with the subset construction.
    ///
    /// Every vertex of the result stands for a set of source vertices. The
    /// sets are kept as [`BTreeSet`]s so that equal sets hash equally no matter
    /// in which order their members were collected. The start set `{start}`
    /// gets id 0, further sets are numbered in the order in which the
    /// breadth-first search discovers them. Only reachable sets are built, but
    /// in the worst case there are `2^vertex_count` of them.
    ///
    /// Remaining epsilon transitions are eliminated first.
    pub fn to_deterministic(&mut self) {
        if self.has_epsilon_transitions() {
            self.eliminate_epsilon();
        }

        tracing::debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "determinizing"
        );

        let mut result = Automaton::new(self.alphabet.clone(), 0);
        let mut ids: HashMap<BTreeSet<VertexId>, VertexId> = HashMap::new();
        let mut queue = VecDeque::new();

        let start_set = BTreeSet::from([self.start]);
        ids.insert(start_set.clone(), 0);
        queue.push_back(start_set);

        while let Some(set) = queue.pop_front() {
            let id = ids[&set];

            if set.iter().any(|&v| self.is_terminal(v)) {
                result.add_terminal(id);
            }

            for &symbol in self.alphabet.real_symbols() {
                let target = set
                    .iter()
                    .filter_map(|&v| self.vertex(v))
                    .filter_map(|v| v.destinations(symbol))
                    .flatten()
                    .copied()
                    .collect::<BTreeSet<_>>();

                if target.is_empty() {
                    continue;
                }

                let target_id = match ids.get(&target) {
                    Some(&existing) => existing,
                    None => {
                        let new_id = ids.len() as VertexId;
                        ids.insert(target.clone(), new_id);
                        queue.push_back(target);
                        new_id
                    }
                };

                result.add_edge(id, symbol, target_id);
            }
        }

        tracing::debug!(
            vertices = result.vertex_count(),
            edges = result.edge_count(),
            "determinized"
        );

        *self = result;
    }
}
