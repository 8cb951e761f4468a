use std::iter::repeat_n;

use itertools::Itertools;

use crate::automaton::Automaton;

/// All words over the real symbols of `automaton` with at most
/// `max_word_length` symbols, shortest first. The empty word comes first.
fn words(automaton: &Automaton, max_word_length: usize) -> impl Iterator<Item = String> + '_ {
    std::iter::once(String::new()).chain((1..=max_word_length).flat_map(move |i| {
        repeat_n(automaton.alphabet().real_symbols(), i)
            .multi_cartesian_product()
            .map(|word| word.into_iter().collect::<String>())
    }))
}

/// Checks if two automata accept the same language.
/// This is done by checking if the real alphabets are the same and then
/// checking if the automata accept the same words up to a certain length.
pub fn same_language(a: &Automaton, b: &Automaton, max_word_length: usize) -> bool {
    if a.alphabet().real_symbols() != b.alphabet().real_symbols() {
        return false;
    }

    for word in words(a, max_word_length) {
        if a.has_word(&word) != b.has_word(&word) {
            tracing::debug!(word = %word, "languages differ");
            return false;
        }
    }

    true
}

pub fn assert_same_language(a: &Automaton, b: &Automaton, max_word_length: usize) {
    if a.alphabet().real_symbols() != b.alphabet().real_symbols() {
        panic!("Alphabets are not the same");
    }

    for word in words(a, max_word_length) {
        match (a.has_word(&word), b.has_word(&word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language(a: &Automaton, b: &Automaton, max_word_length: usize) {
    if a.alphabet().real_symbols() != b.alphabet().real_symbols() {
        panic!("Alphabets are not the same");
    }

    for word in words(a, max_word_length) {
        match (a.has_word(&word), b.has_word(&word)) {
            (true, true) => {
                panic!(
                    "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            (false, false) => {
                panic!(
                    "{:?} is rejected by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Alphabet;

    #[test]
    fn enumerates_the_empty_word() {
        let a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        let words = words(&a, 2).collect::<Vec<_>>();

        assert_eq!(words, vec!["", "a", "b", "aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn empty_word_decides() {
        let a = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        let mut b = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
        b.add_edge(0, 'a', 0);
        b.add_edge(0, 'b', 0);
        b.add_terminal(0);

        assert!(!same_language(&a, &b, 0));
        assert_inverse_language(&a, &b, 3);
    }
}
