use super::{
    super::{traits::Simulate, StateId},
    Input, Nfa,
};
use std::collections::BTreeSet;

fn set(ids: &[StateId]) -> BTreeSet<StateId> {
    ids.iter().copied().collect()
}

#[test]
fn symbol() {
    let nfa = Nfa::symbol('a');

    assert_eq!(nfa.len(), 2);
    assert_eq!((nfa.start_state(), nfa.final_state()), (0, 1));
    assert_eq!(nfa.transitions(0, Input::Symbol('a')).collect::<Vec<_>>(), [1]);
}

#[test]
fn union_layout() {
    let nfa = Nfa::symbol('a').union(Nfa::symbol('b'));

    assert_eq!(nfa.len(), 6);
    assert_eq!((nfa.start_state(), nfa.final_state()), (0, 5));
    assert_eq!(nfa.transitions(0, Input::Eps).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(nfa.transitions(1, Input::Symbol('a')).collect::<Vec<_>>(), [2]);
    assert_eq!(nfa.transitions(3, Input::Symbol('b')).collect::<Vec<_>>(), [4]);
    assert_eq!(nfa.transitions(2, Input::Eps).collect::<Vec<_>>(), [5]);
    assert_eq!(nfa.transitions(4, Input::Eps).collect::<Vec<_>>(), [5]);
}

#[test]
fn concatenate_layout() {
    let nfa = Nfa::symbol('a').concatenate(Nfa::symbol('b'));

    assert_eq!(nfa.len(), 4);
    assert_eq!((nfa.start_state(), nfa.final_state()), (0, 3));
    assert_eq!(nfa.transitions(1, Input::Eps).collect::<Vec<_>>(), [2]);
    assert_eq!(nfa.transitions(2, Input::Symbol('b')).collect::<Vec<_>>(), [3]);
}

#[test]
fn star_layout() {
    let nfa = Nfa::symbol('a').star();

    assert_eq!(nfa.len(), 4);
    assert_eq!((nfa.start_state(), nfa.final_state()), (0, 3));
    assert_eq!(nfa.transitions(0, Input::Eps).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(nfa.transitions(2, Input::Eps).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(nfa.eps_closure(0), set(&[0, 1, 3]));
    assert_eq!(nfa.eps_closure(2), set(&[1, 2, 3]));
}

#[test]
fn move_on_follows_eps_closure() {
    let nfa = Nfa::symbol('a').star();
    let start = nfa.eps_closure(0);

    assert_eq!(nfa.move_on(&start, 'a'), set(&[1, 2, 3]));
    assert!(nfa.move_on(&start, 'b').is_empty());
}

#[test]
fn nfa_simulator() {
    let nfa = Nfa::symbol('c').concatenate(Nfa::symbol('a').union(Nfa::symbol('b')).star());
    let mut sim = nfa.to_simulator();

    assert!(sim.run("c"));
    assert!(sim.run("cabba"));
    assert!(!sim.run("ca c"));
    assert!(!sim.run(""));

    sim.reset();
    sim.feed('x');
    assert!(sim.is_dead());
}

#[test]
fn subset_construction_is_deterministic() {
    let build = || {
        Nfa::symbol('a')
            .union(Nfa::symbol('b'))
            .concatenate(Nfa::symbol('c').union(Nfa::symbol('d')).star())
            .to_dfa()
    };

    let dfa = build();
    assert_eq!(dfa, build());
    assert_eq!(dfa.start_state(), 0);
    assert!(!dfa.is_final(0));
    // a and b reach distinct subsets of the nfa, discovered in symbol order.
    assert_eq!(dfa.step(0, 'a'), Some(1));
    assert_eq!(dfa.step(0, 'b'), Some(2));
    assert_eq!(dfa.step(0, 'c'), None);
}

#[test]
fn dfa_and_nfa_agree() {
    let nfa = Nfa::symbol('a')
        .concatenate(Nfa::symbol('b'))
        .union(Nfa::symbol('a').star());
    let dfa = nfa.to_dfa();

    for input in ["", "a", "aa", "ab", "aab", "b", "abab"] {
        assert_eq!(
            nfa.to_simulator().run(input),
            dfa.to_simulator().run(input),
            "disagreement on {:?}",
            input
        );
    }
}

#[test]
fn dot() {
    let dot = Nfa::symbol('a').star().to_dot();

    assert!(dot.starts_with("digraph nfa {"));
    assert!(dot.contains("node [shape = doublecircle]; 3;"));
    assert!(dot.contains("1 -> 2 [label = \"a\"];"));
    assert!(dot.contains("0 -> 3 [label = \"ε\"];"));
}
