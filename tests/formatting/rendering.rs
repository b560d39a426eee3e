use combinate::formatting::*;
use combinate::grammar::expression;
use combinate::output;
use combinate::parsing::Value;
use combinate::problem::{concise_syntax_error, full_syntax_error, syntax_error};

// Marks each fragment with the kind of syntax it was styled as.
struct Tags;

impl Render for Tags {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        format!("<{:?}:{}>", syntax, content)
    }
}

#[test]
fn fragments_styled_by_kind() {
    let value = Value::list([Value::from("1"), Value::from("+"), Value::from(2.0)]);

    assert_eq!(
        render_value(&value, &Tags),
        "<Bracket:[><Text:1><Neutral: ><Text:+><Neutral: ><Number:2><Bracket:]>"
    );
    assert_eq!(render_result(None, &Tags), "<Absent:(none)>");
}

#[test]
fn terminal_adds_escapes() {
    let value = Value::list([Value::from("1")]);

    let plain = render_value(&value, &Identity);
    let coloured = render_value(&value, &Terminal);

    assert_eq!(plain, "[1]");
    assert!(coloured.contains("\u{1b}["));
    assert!(coloured.len() > plain.len());
}

#[test]
fn pointer_at_unclosed_group() {
    let state = expression().run("(1+2");

    assert_eq!(
        syntax_error(&state),
        format!("Syntax error at 4 near '(1+2'\n{}^", " ".repeat(28))
    );
}

#[test]
fn trailing_input() {
    let state = expression().run("1+2)");

    assert!(!state.is_error());
    assert_eq!(
        concise_syntax_error(&state, "input", &Identity),
        "error: input:1:4 Unexpected trailing input"
    );
}

#[test]
fn full_report_of_unclosed_group() {
    let state = expression().run("(1+2");
    let rendered = full_syntax_error(&state, "input", &Identity);

    let expected = r#"
error: input:1:5 No alternative matched

    |
  1 | (1+2
    |     ^

None of the alternatives at this point matched. The position shown is the
furthest any of them got before failing.
  separated_by: any_of: no target matched
        "#
    .trim_ascii();

    assert_eq!(rendered, expected);
}

#[test]
fn state_report() {
    let state = expression().run("1 + 2");
    let text = output::report(&state, false).unwrap();

    assert!(text.starts_with("ParseState"));
    assert!(text.contains("Current Index         = 5 (furthest 5)"));
    assert!(text.contains("Parsing Result        = [1 + 2]"));
}
