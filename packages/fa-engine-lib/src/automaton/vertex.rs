use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::automaton::VertexId;

/// A vertex of an automaton together with its outgoing transition table.
///
/// Every symbol maps to the set of destination vertices. Nondeterminism is a
/// symbol mapping to more than one destination.
///
/// Invariant: a symbol never maps to an empty set, a missing key means "no
/// transition".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    id: VertexId,
    transitions: BTreeMap<char, BTreeSet<VertexId>>,
}

impl Vertex {
    pub fn new(id: VertexId) -> Self {
        Vertex {
            id,
            transitions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Adds `to` to the destinations of `symbol`. Returns false if the
    /// transition was already present.
    pub fn add_edge(&mut self, symbol: char, to: VertexId) -> bool {
        self.transitions.entry(symbol).or_default().insert(to)
    }

    /// Returns the destinations reachable on `symbol` in ascending order.
    pub fn edges(&self, symbol: char) -> Vec<VertexId> {
        self.transitions
            .get(&symbol)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn destinations(&self, symbol: char) -> Option<&BTreeSet<VertexId>> {
        self.transitions.get(&symbol)
    }

    /// Removes a single transition. Returns whether it was present.
    pub fn delete_edge(&mut self, symbol: char, to: VertexId) -> bool {
        let Some(set) = self.transitions.get_mut(&symbol) else {
            return false;
        };

        let removed = set.remove(&to);
        if set.is_empty() {
            self.transitions.remove(&symbol);
        }

        removed
    }

    /// Drops every transition on `symbol` and returns how many were dropped.
    pub fn delete_symbol(&mut self, symbol: char) -> usize {
        self.transitions
            .remove(&symbol)
            .map(|set| set.len())
            .unwrap_or(0)
    }

    pub fn out_degree(&self, symbol: char) -> usize {
        self.transitions.get(&symbol).map_or(0, |set| set.len())
    }

    /// Total number of outgoing transitions over all symbols.
    pub fn edge_count(&self) -> usize {
        self.transitions.values().map(|set| set.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &BTreeSet<VertexId>)> {
        self.transitions.iter().map(|(&symbol, set)| (symbol, set))
    }

    /// Iterates all `(symbol, destination)` pairs.
    pub fn iter_edges(&self) -> impl Iterator<Item = (char, VertexId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&symbol, set)| set.iter().map(move |&to| (symbol, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_edges_collapse() {
        let mut v = Vertex::new(3);
        assert_eq!(v.id(), 3);

        assert!(v.add_edge('a', 2));
        v.add_edge('b', 5);
        v.add_edge('b', 1);

        assert_eq!(v.edges('a').len(), 1);
        assert_eq!(v.edges('b'), vec![1, 5]);

        assert!(!v.add_edge('a', 2));
        assert_eq!(v.out_degree('a'), 1);
        assert_eq!(v.edge_count(), 3);
    }

    #[test]
    fn deleting_the_last_edge_drops_the_symbol() {
        let mut v = Vertex::new(0);
        v.add_edge('a', 1);

        assert!(!v.delete_edge('a', 7));
        assert!(!v.delete_edge('c', 1));
        assert!(v.delete_edge('a', 1));

        assert!(v.destinations('a').is_none());
        assert!(v.edges('a').is_empty());
        assert_eq!(v.iter().count(), 0);
    }

    #[test]
    fn delete_symbol_reports_dropped_count() {
        let mut v = Vertex::new(0);
        v.add_edge('1', 1);
        v.add_edge('1', 2);
        v.add_edge('a', 2);

        assert_eq!(v.delete_symbol('1'), 2);
        assert_eq!(v.delete_symbol('1'), 0);
        assert_eq!(v.iter_edges().collect::<Vec<_>>(), vec![('a', 2)]);
    }
}
