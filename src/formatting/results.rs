//! Rendering of parse results

use crate::parsing::Value;

use super::syntax::{Render, Syntax};

/// Render a result tree, lists bracketed with their elements separated by
/// spaces, each fragment styled by the given renderer.
pub fn render_value(value: &Value, renderer: &impl Render) -> String {
    let mut output = String::new();
    append_value(&mut output, value, renderer);
    output
}

/// Render the result of a state, which may be absent.
pub fn render_result(result: Option<&Value>, renderer: &impl Render) -> String {
    match result {
        Some(value) => render_value(value, renderer),
        None => renderer.style(Syntax::Absent, "(none)"),
    }
}

fn append_value(output: &mut String, value: &Value, renderer: &impl Render) {
    match value {
        Value::Text(text) => output.push_str(&renderer.style(Syntax::Text, text)),
        Value::Number(number) => {
            output.push_str(&renderer.style(Syntax::Number, &number.to_string()))
        }
        Value::List(values) => {
            output.push_str(&renderer.style(Syntax::Bracket, "["));
            for (i, child) in values
                .iter()
                .enumerate()
            {
                if i > 0 {
                    output.push_str(&renderer.style(Syntax::Neutral, " "));
                }
                append_value(output, child, renderer);
            }
            output.push_str(&renderer.style(Syntax::Bracket, "]"));
        }
    }
}
