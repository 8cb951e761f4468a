use hashbrown::HashMap;

use crate::automaton::{Automaton, VertexId};

/// The class table used by Moore's partition refinement.
///
/// Vertices are addressed by their position in ascending id order. For every
/// vertex the table stores the position of its unique successor on each real
/// symbol, and the class the vertex currently belongs to.
#[derive(Debug, Clone)]
struct PartitionTable {
    successors: Vec<Vec<usize>>,
    classes: Vec<usize>,
}

impl PartitionTable {
    /// Builds the table of a deterministic, complete automaton. The initial
    /// partition separates terminal (class 0) from non-terminal (class 1)
    /// vertices.
    fn new(automaton: &Automaton, ids: &[VertexId]) -> Self {
        let position = ids
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect::<HashMap<_, _>>();

        let successors = ids
            .iter()
            .map(|&v| {
                automaton
                    .alphabet
                    .real_symbols()
                    .iter()
                    .map(|&symbol| {
                        let target = automaton
                            .next_vertices(v, symbol)
                            .first()
                            .copied()
                            .expect("a complete automaton has a successor on every real symbol");
                        position[&target]
                    })
                    .collect()
            })
            .collect();

        let classes = ids
            .iter()
            .map(|&v| if automaton.is_terminal(v) { 0 } else { 1 })
            .collect();

        PartitionTable {
            successors,
            classes,
        }
    }

    /// The vector `[class, class of successor on symbol 1, ...]`.
    fn signature(&self, vertex: usize) -> Vec<usize> {
        let mut signature = Vec::with_capacity(self.successors[vertex].len() + 1);
        signature.push(self.classes[vertex]);
        signature.extend(self.successors[vertex].iter().map(|&t| self.classes[t]));
        signature
    }

    fn class_count(&self) -> usize {
        self.classes.iter().max().map_or(0, |max| max + 1)
    }

    /// Regroups the vertices by signature. Class ids are handed out in
    /// ascending vertex order. Returns the new number of classes.
    fn refine(&mut self) -> usize {
        let signatures = (0..self.classes.len())
            .map(|v| self.signature(v))
            .collect::<Vec<_>>();

        let mut class_ids: HashMap<&[usize], usize> = HashMap::new();
        let classes = signatures
            .iter()
            .map(|signature| {
                let next = class_ids.len();
                *class_ids.entry(signature.as_slice()).or_insert(next)
            })
            .collect();

        self.classes = classes;
        class_ids.len()
    }

    /// Refines until the partition is stable. Every round that does not
    /// stabilize splits at least one class, so there are at most as many
    /// rounds as vertices.
    fn run(&mut self) {
        let mut count = {
            let mut initial = self.classes.clone();
            initial.sort_unstable();
            initial.dedup();
            initial.len()
        };

        for round in 0..self.classes.len() {
            let next = self.refine();
            if next == count {
                tracing::debug!(rounds = round + 1, classes = next, "partition is stable");
                return;
            }
            count = next;
        }
    }
}

impl Automaton {
    /// Minimizes the automaton with Moore's partition refinement.
    ///
    /// The automaton is determinized and completed first. Vertices of the
    /// result are the final equivalence classes, numbered densely in the order
    /// of their smallest member, so the start vertex of the result is 0.
    pub fn minimize(&mut self) {
        self.to_deterministic();
        self.complete();

        tracing::debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "minimizing"
        );

        let ids = self.vertex_ids().collect::<Vec<_>>();
        let mut table = PartitionTable::new(self, &ids);
        table.run();

        let start = ids
            .iter()
            .position(|&v| v == self.start)
            .map_or(0, |i| table.classes[i]);

        let mut result = Automaton::new(self.alphabet.clone(), start as VertexId);
        let mut built = vec![false; table.class_count()];

        for (i, &vertex) in ids.iter().enumerate() {
            let class = table.classes[i];
            if built[class] {
                continue;
            }
            built[class] = true;

            for (k, &symbol) in self.alphabet.real_symbols().iter().enumerate() {
                let target = table.classes[table.successors[i][k]];
                result.add_edge(class as VertexId, symbol, target as VertexId);
            }

            if self.is_terminal(vertex) {
                result.add_terminal(class as VertexId);
            }
        }

        tracing::debug!(
            vertices = result.vertex_count(),
            edges = result.edge_count(),
            "minimized"
        );

        *self = result;
    }
}
