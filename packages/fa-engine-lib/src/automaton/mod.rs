use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

pub mod alphabet;
pub mod completion;
pub mod determinization;
pub mod epsilon;
pub mod equivalence;
pub mod graphviz;
pub mod minimization;
pub mod vertex;

pub use alphabet::Alphabet;
pub use vertex::Vertex;

/// Identifies a vertex inside one automaton. Ids carry no meaning beyond
/// identity, except that freshly built automata number their vertices
/// 0, 1, 2, ... in creation order and start at 0.
pub type VertexId = u32;

/// A finite automaton over a fixed alphabet, possibly nondeterministic and
/// possibly with epsilon transitions.
///
/// Vertices are stored by id. Every id that is referenced as the start, as a
/// terminal or as an edge endpoint exists in the vertex map, the mutation
/// primitives create missing vertices on first reference.
///
/// The edge count is derived from the transition tables, so it stays exact
/// across every kind of removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
    alphabet: Alphabet,
    start: VertexId,
    terminals: BTreeSet<VertexId>,
    vertices: BTreeMap<VertexId, Vertex>,
}

impl Automaton {
    pub fn new(alphabet: Alphabet, start: VertexId) -> Self {
        let mut automaton = Automaton {
            alphabet,
            start,
            terminals: BTreeSet::new(),
            vertices: BTreeMap::new(),
        };
        automaton.add_vertex(start);
        automaton
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Replaces the alphabet. Existing transitions are kept as they are.
    pub fn set_alphabet(&mut self, alphabet: Alphabet) {
        self.alphabet = alphabet;
    }

    pub fn start(&self) -> VertexId {
        self.start
    }

    pub fn set_start(&mut self, start: VertexId) {
        self.add_vertex(start);
        self.start = start;
    }

    pub fn terminals(&self) -> &BTreeSet<VertexId> {
        &self.terminals
    }

    pub fn is_terminal(&self, vertex: VertexId) -> bool {
        self.terminals.contains(&vertex)
    }

    pub fn add_terminal(&mut self, vertex: VertexId) {
        self.add_vertex(vertex);
        self.terminals.insert(vertex);
    }

    pub fn clear_terminals(&mut self) {
        self.terminals.clear();
    }

    /// Inserts an empty vertex unless `id` is already present.
    pub fn add_vertex(&mut self, id: VertexId) {
        self.vertices.entry(id).or_insert_with(|| Vertex::new(id));
    }

    /// Adds the transition `from --symbol--> to`, creating both endpoints if
    /// needed. Returns false if the transition already existed.
    pub fn add_edge(&mut self, from: VertexId, symbol: char, to: VertexId) -> bool {
        self.add_vertex(to);
        self.vertex_mut(from).add_edge(symbol, to)
    }

    /// Removes the transition `from --symbol--> to` if present. `from` is
    /// created if it does not exist yet.
    pub fn delete_edge(&mut self, from: VertexId, symbol: char, to: VertexId) -> bool {
        self.vertex_mut(from).delete_edge(symbol, to)
    }

    /// Removes a vertex together with all transitions leading into it. The
    /// start vertex cannot be removed.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        if id == self.start || self.vertices.remove(&id).is_none() {
            return false;
        }

        self.terminals.remove(&id);

        for vertex in self.vertices.values_mut() {
            let incoming = vertex
                .iter_edges()
                .filter(|&(_, to)| to == id)
                .collect::<Vec<_>>();

            for (symbol, to) in incoming {
                vertex.delete_edge(symbol, to);
            }
        }

        true
    }

    /// Returns the destinations of `from` on `symbol`. An unknown source
    /// vertex simply has no successors.
    pub fn next_vertices(&self, from: VertexId, symbol: char) -> Vec<VertexId> {
        self.vertices
            .get(&from)
            .map(|v| v.edges(symbol))
            .unwrap_or_default()
    }

    /// The first destination of `from` on `symbol`. On a deterministic
    /// automaton this is the unique successor.
    pub fn successor(&self, from: VertexId, symbol: char) -> Option<VertexId> {
        self.vertices
            .get(&from)
            .and_then(|v| v.destinations(symbol))
            .and_then(|set| set.first().copied())
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        self.vertices.entry(id).or_insert_with(|| Vertex::new(id))
    }

    /// Iterates the vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.vertices.keys().next_back().copied()
    }

    /// An id that is not in use yet: one past the current maximum, or the
    /// smallest unused id if the maximum is `VertexId::MAX`.
    pub fn fresh_vertex_id(&self) -> VertexId {
        if let Some(next) = self.max_vertex_id().map_or(Some(0), |max| max.checked_add(1)) {
            return next;
        }

        self.vertex_ids()
            .zip(0..)
            .find(|&(id, expected)| id != expected)
            .map_or(0, |(_, expected)| expected)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of `(from, symbol, to)` triples currently present.
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::edge_count).sum()
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        let epsilon = self.alphabet.epsilon();
        self.vertices.values().any(|v| v.out_degree(epsilon) > 0)
    }

    /// True if there are no epsilon transitions and every (vertex, symbol)
    /// pair has at most one destination.
    pub fn is_deterministic(&self) -> bool {
        !self.has_epsilon_transitions()
            && self
                .vertices
                .values()
                .all(|v| v.iter().all(|(_, destinations)| destinations.len() <= 1))
    }

    /// True if every vertex has at least one transition on every real symbol.
    pub fn is_complete(&self) -> bool {
        self.vertices.values().all(|v| {
            self.alphabet
                .real_symbols()
                .iter()
                .all(|&symbol| v.out_degree(symbol) > 0)
        })
    }

    /// Checks whether the automaton accepts `word`.
    ///
    /// This is a depth-first search over `(vertex, position)` pairs. Epsilon
    /// transitions are followed without consuming input. Visited pairs are
    /// never expanded twice, so the search is bounded by
    /// `vertex_count * (word length + 1)` even for heavily nondeterministic
    /// automata.
    pub fn has_word(&self, word: &str) -> bool {
        self.accepts(word.chars())
    }

    pub fn accepts(&self, input: impl IntoIterator<Item = char>) -> bool {
        let input = input.into_iter().collect::<Vec<_>>();
        let epsilon = self.alphabet.epsilon();

        let mut visited = HashSet::new();
        let mut stack = vec![(self.start, 0usize)];

        while let Some((vertex, position)) = stack.pop() {
            if !visited.insert((vertex, position)) {
                continue;
            }

            if position == input.len() && self.is_terminal(vertex) {
                return true;
            }

            let Some(data) = self.vertices.get(&vertex) else {
                continue;
            };

            if let Some(destinations) = data.destinations(epsilon) {
                stack.extend(destinations.iter().map(|&next| (next, position)));
            }

            if position < input.len()
                && input[position] != epsilon
                && let Some(destinations) = data.destinations(input[position])
            {
                stack.extend(destinations.iter().map(|&next| (next, position + 1)));
            }
        }

        false
    }

    /// Removes every vertex that cannot be reached from the start vertex.
    /// Returns the number of removed vertices.
    pub fn remove_unreachable(&mut self) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![self.start];
        visited.insert(self.start);

        while let Some(vertex) = stack.pop() {
            let Some(data) = self.vertices.get(&vertex) else {
                continue;
            };

            for (_, next) in data.iter_edges() {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }

        let before = self.vertices.len();
        // Reachable vertices never point at unreachable ones, so dropping the
        // unreachable vertices leaves no dangling transitions behind.
        self.vertices.retain(|id, _| visited.contains(id));
        self.terminals.retain(|id| visited.contains(id));

        before - self.vertices.len()
    }
}
