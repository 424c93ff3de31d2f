use super::Regex;
use crate::fsm::Simulate;


fn prefix(regex: &str, input: &str) -> String {
    Regex::new(regex)
        .expect("valid regex")
        .match_prefix(input)
        .to_string()
}

#[test]
fn single_symbol() {
    assert_eq!(prefix("a", "a"), "a");
    assert_eq!(prefix("a", "ab"), "a");
    assert_eq!(prefix("a", "b"), "");
}

#[test]
fn union() {
    assert_eq!(prefix("a|b", "a"), "a");
    assert_eq!(prefix("a|b", "b"), "b");
    assert_eq!(prefix("a|b", "c"), "");
}

#[test]
fn concatenation() {
    assert_eq!(prefix("ab", "ab"), "ab");
    assert_eq!(prefix("ab", "abc"), "ab");
    assert_eq!(prefix("ab", "a"), "");
}

#[test]
fn star() {
    assert_eq!(prefix("a*", "aaa"), "aaa");
    assert_eq!(prefix("a*", "aaab"), "aaa");
    assert_eq!(prefix("a*", "cdef"), "");
}

#[test]
fn grouped_union_followed_by_literals() {
    let regex = Regex::new("(a|b|c)def").expect("valid regex");

    assert_eq!(regex.match_prefix("adef"), "adef");
    assert_eq!(regex.match_prefix("bdef"), "bdef");
    assert_eq!(regex.match_prefix("cdefg"), "cdef");
    assert_eq!(regex.match_prefix("ddef"), "");
    assert_eq!(regex.match_prefix("ade"), "");
}

#[test]
fn adjacent_groups() {
    assert_eq!(prefix("(a|b)(m|n)", "bm"), "bm");
    assert_eq!(prefix("(a|b)(m|n)", "an"), "an");
    assert_eq!(prefix("(a|b)(m|n)", "ab"), "");
    assert_eq!(prefix("(a|b)(c|d)*", "acdcd"), "acdcd");
    assert_eq!(prefix("(a|b)(c|d)*", "b"), "b");
}

#[test]
fn operator_characters_as_single_symbol_classes() {
    assert_eq!(prefix("*", "**"), "*");
    assert_eq!(prefix("(", "(("), "(");
    assert_eq!(prefix("==", "==="), "==");
}

#[test]
fn dfa_states_are_stable_and_dead_state_is_sticky() {
    let regex = Regex::new("c(a|b)*").expect("valid regex");
    let dfa = regex.dfa();
    let mut sim = dfa.to_simulator();

    let mut states = Vec::new();
    for c in "cbaba".chars() {
        assert!(sim.feed(c));
        states.push(sim.current());
    }
    // After the first `c`, reading `a` or `b` loops between states that
    // accept.
    assert!(states.iter().all(Option::is_some));
    assert_eq!(states[2], states[4]);

    assert!(!sim.feed('c'));
    assert!(sim.is_dead());
    assert!(!sim.feed('a'));
    assert!(sim.is_dead());

    sim.reset();
    assert!(!sim.is_dead());
    assert!(sim.feed('c'));
    assert_eq!(sim.current(), states[0]);
}

#[test]
fn invalid_sources() {
    assert!(Regex::new("").is_err());
    assert!(Regex::new("(a|b").is_err());
    assert!("a|".parse::<Regex>().is_err());

    // Operators are literals only when they make up the whole source.
    for source in ["(a)|(", "a|)", "a|*", "a(*)"] {
        assert!(Regex::new(source).is_err(), "{:?}", source);
    }
}
