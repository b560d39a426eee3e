use std::sync::Arc;
use std::thread;

use combinate::grammar::expression;
use combinate::parsing::*;

fn text(s: &str) -> Value {
    Value::from(s)
}

fn grammars() -> Vec<Parser> {
    vec![
        literal("ab"),
        digits(),
        sequence([digits(), literal("+"), digits()]),
        any_of([literal("ab"), literal("ac")]),
        many(literal("a")),
        optional(literal("x")),
        separated_by(literal("+"), digits()),
        digits().map(|value| Value::list([value])),
        digits().between(&literal("("), &literal(")")),
        expression(),
    ]
}

#[test]
fn parsing_leaves_input_state_alone() {
    for input in ["", "ab", "1+2", "(1+2", "ax", "aaa", "12+3+45"] {
        let state = ParseState::new(input, false);
        let before = state.clone();

        for parser in grammars() {
            let _ = parser.parse(&state);
            assert_eq!(state, before, "{:?} altered state for '{}'", parser, input);
        }
    }
}

#[test]
fn parsing_is_repeatable() {
    for input in ["ab", "1+2", "(1+(2+3))", "ax", "1+1+"] {
        for parser in grammars() {
            let first = parser.run(input);
            let second = parser.run(input);
            assert_eq!(first, second, "{:?} differed for '{}'", parser, input);

            let seed = ParseState::new(input, false);
            assert_eq!(parser.parse(&seed), parser.parse(&seed.clone()));
        }
    }
}

#[test]
fn trailing_separator_left_untouched() {
    let parser = separated_by(literal("+"), digits());
    let state = parser.run("1+1+");

    assert!(!state.is_error());
    assert_eq!(
        state.result(),
        Some(&Value::list([text("1"), text("+"), text("1")]))
    );
    assert_eq!(state.index(), 3);
    assert!(state.is_incomplete_match());
}

#[test]
fn alternatives_report_deepest_reach() {
    let state = any_of([literal("ab"), literal("ac")]).run("ax");

    assert!(state.is_error());
    assert_eq!(state.index(), 0);
    assert_eq!(state.furthest_index(), 1);
}

#[test]
fn optional_never_fails() {
    let state = optional(literal("x")).run("y");

    assert!(!state.is_error());
    assert_eq!(state.result(), None);
    assert_eq!(state.index(), 0);

    let state = optional(literal("xy")).run("xz");
    assert!(!state.is_error());
    assert_eq!(state.furthest_index(), 1);
}

#[test]
fn separated_digits() {
    let state = separated_by(literal("+"), digits()).run("12+3+45");

    assert_eq!(
        state.result(),
        Some(&Value::list([text("12"), text("+"), text("3"), text("+"), text("45")]))
    );
    assert_eq!(state.index(), 7);
    assert!(!state.is_incomplete_match());
}

#[test]
fn recursive_grammar() {
    let state = expression().run("(1+(2+3))");

    assert!(!state.is_error());
    assert!(!state.is_incomplete_match());
    assert_eq!(
        state.result(),
        Some(&Value::list([Value::list([
            text("1"),
            text("+"),
            Value::list([text("2"), text("+"), text("3")]),
        ])]))
    );

    let state = expression().run("(1+2");
    assert!(state.is_error());
    assert_eq!(state.errors()[0].kind, ErrorKind::Exhausted);
    assert_eq!(state.furthest_index(), 4);
}

#[test]
fn deep_nesting() {
    let depth = 40;
    let input = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));

    let state = expression().run(&input);

    assert!(!state.is_error());
    assert_eq!(state.index(), input.len());
}

#[test]
fn traversal_scans_ahead() {
    let parser = sequence([literal("key"), literal("=")]);

    let state = parser.run_traversing("some key here = value");
    assert!(!state.is_error());
    assert_eq!(state.index(), 15);

    let state = parser.run("some key here = value");
    assert!(state.is_error());
}

#[test]
fn grammar_shared_between_threads() {
    let grammar = Arc::new(expression());

    let handles: Vec<_> = ["1+2", "(3*4)", "5**(6-7)", "(8"]
        .into_iter()
        .map(|input| {
            let grammar = Arc::clone(&grammar);
            thread::spawn(move || grammar.run(input))
        })
        .collect();

    let states: Vec<ParseState> = handles
        .into_iter()
        .map(|handle| {
            handle
                .join()
                .unwrap()
        })
        .collect();

    assert!(!states[0].is_error());
    assert!(!states[1].is_error());
    assert!(!states[2].is_error());
    assert!(states[3].is_error());

    assert_eq!(states[1], expression().run("(3*4)"));
}
