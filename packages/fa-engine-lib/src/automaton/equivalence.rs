use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::automaton::{Alphabet, Automaton, VertexId};

type Pair = (VertexId, VertexId);

impl Automaton {
    /// A minimized, complete copy over `alphabet`. Epsilon transitions are
    /// resolved under the original alphabet before it is swapped, transitions
    /// on symbols that are not real in `alphabet` are dropped.
    fn working_copy(&self, alphabet: &Alphabet) -> Automaton {
        let mut copy = self.clone();
        if copy.has_epsilon_transitions() {
            copy.eliminate_epsilon();
        }

        for vertex in copy.vertices.values_mut() {
            let foreign = vertex
                .iter()
                .map(|(symbol, _)| symbol)
                .filter(|&symbol| !alphabet.is_real(symbol))
                .collect::<Vec<_>>();
            for symbol in foreign {
                vertex.delete_symbol(symbol);
            }
        }
        copy.set_alphabet(alphabet.clone());
        copy.minimize();
        copy
    }

    /// Finds a shortest word accepted by exactly one of `self` and `other`,
    /// or `None` if both accept the same language.
    ///
    /// Both operands are copied, extended to the union of their real
    /// alphabets and minimized, so neither is modified. The synchronized
    /// product is then explored breadth first from the pair of start vertices.
    /// A pair where exactly one side is terminal witnesses a difference.
    pub fn distinguishing_word(&self, other: &Automaton) -> Option<String> {
        let alphabet = self.alphabet.union(&other.alphabet);
        let left = self.working_copy(&alphabet);
        let right = other.working_copy(&alphabet);

        let start = (left.start(), right.start());
        let mut parents: HashMap<Pair, Option<(Pair, char)>> = HashMap::new();
        let mut queue = VecDeque::new();
        parents.insert(start, None);
        queue.push_back(start);

        while let Some(pair @ (l, r)) = queue.pop_front() {
            if left.is_terminal(l) != right.is_terminal(r) {
                let word = witness(&parents, pair);
                tracing::debug!(word = %word, "automata differ");
                return Some(word);
            }

            for &symbol in alphabet.real_symbols() {
                let (Some(next_l), Some(next_r)) =
                    (left.successor(l, symbol), right.successor(r, symbol))
                else {
                    continue;
                };

                let next = (next_l, next_r);
                if !parents.contains_key(&next) {
                    parents.insert(next, Some((pair, symbol)));
                    queue.push_back(next);
                }
            }
        }

        tracing::debug!(pairs = parents.len(), "automata are equivalent");

        None
    }

    /// Checks whether both automata accept the same language.
    pub fn is_equivalent(&self, other: &Automaton) -> bool {
        self.distinguishing_word(other).is_none()
    }
}

/// Walks the parent links back to the start pair and spells the word.
fn witness(parents: &HashMap<Pair, Option<(Pair, char)>>, mut pair: Pair) -> String {
    let mut symbols = vec![];

    while let Some(Some((parent, symbol))) = parents.get(&pair) {
        symbols.push(*symbol);
        pair = *parent;
    }

    symbols.iter().rev().collect()
}
