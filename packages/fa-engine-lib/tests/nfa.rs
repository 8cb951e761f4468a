use fa_engine_lib::{
    automaton::{Alphabet, Automaton},
    validation::same_language::assert_same_language,
};

/// `(ab|ba)*` optionally followed by a single `a` or `b`.
fn example_nfa() -> Automaton {
    let mut nfa = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
    nfa.add_edge(0, 'a', 1);
    nfa.add_edge(1, 'b', 0);
    nfa.add_edge(0, 'b', 2);
    nfa.add_edge(2, 'a', 0);
    nfa.add_edge(0, 'a', 3);
    nfa.add_edge(0, 'b', 3);
    nfa.add_terminal(0);
    nfa.add_terminal(3);
    nfa
}

#[test]
fn test_nfa() {
    let nfa = example_nfa();

    assert!(!nfa.is_deterministic());
    assert!(nfa.has_word(""));
    assert!(nfa.has_word("aba"));
    assert!(nfa.has_word("abba"));
    assert!(!nfa.has_word("bba"));
    assert!(!nfa.has_word("aaab"));
}

#[test]
fn test_nfa_to_dfa() {
    let nfa = example_nfa();
    let mut dfa = nfa.clone();
    dfa.to_deterministic();

    assert!(dfa.is_deterministic());
    assert_eq!(dfa.start(), 0);
    // {0}, {1, 3} and {2, 3}
    assert_eq!(dfa.vertex_count(), 3);
    assert_eq!(dfa.edge_count(), 4);
    assert_eq!(dfa.terminals().len(), 3);

    assert!(dfa.has_word(""));
    assert!(dfa.has_word("aba"));
    assert!(!dfa.has_word("bba"));
    assert!(!dfa.has_word("aaab"));

    assert_same_language(&nfa, &dfa, 8);
}

#[test]
fn test_nfa_minimize() {
    let nfa = example_nfa();
    let mut min = nfa.clone();
    min.minimize();

    // the three subsets are pairwise distinguishable, plus the sink
    assert_eq!(min.vertex_count(), 4);
    assert_eq!(min.edge_count(), 8);
    assert!(min.is_complete());
    assert!(min.is_deterministic());

    assert_same_language(&nfa, &min, 8);
}

#[test]
fn test_epsilon_nfa() {
    // a* b* with an epsilon transition between the two loops
    let mut nfa = Automaton::new(Alphabet::new("1ab").unwrap(), 0);
    nfa.add_edge(0, 'a', 0);
    nfa.add_edge(0, '1', 1);
    nfa.add_edge(1, 'b', 1);
    nfa.add_terminal(1);

    assert!(nfa.has_word(""));
    assert!(nfa.has_word("aabbb"));
    assert!(!nfa.has_word("aba"));

    let mut eliminated = nfa.clone();
    eliminated.eliminate_epsilon();

    assert!(!eliminated.has_epsilon_transitions());
    assert!(eliminated.is_terminal(0));
    assert_same_language(&nfa, &eliminated, 7);

    let mut dfa = nfa.clone();
    dfa.to_deterministic();

    assert!(dfa.is_deterministic());
    assert_same_language(&nfa, &dfa, 7);
}

#[test]
fn test_epsilon_elimination_prunes() {
    // vertex 1 is only reachable through epsilon, after elimination it is not
    // needed anymore
    let mut nfa = Automaton::new(Alphabet::new("1a").unwrap(), 0);
    nfa.add_edge(0, '1', 1);
    nfa.add_edge(1, 'a', 2);
    nfa.add_terminal(2);

    nfa.eliminate_epsilon();

    assert_eq!(nfa.vertex_ids().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(nfa.next_vertices(0, 'a'), vec![2]);
    assert!(nfa.has_word("a"));
    assert!(!nfa.has_word(""));
}
