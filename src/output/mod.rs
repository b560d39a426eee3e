//! Human readable reports of a ParseState

use serde::Serialize;
use tinytemplate::{error::Error, format_unescaped, TinyTemplate};
use tracing::debug;

use crate::parsing::ParseState;

static TEMPLATE: &'static str = r#"ParseState
{{ if debugging }}
                        {furthest_marker}
Target string         = {target}
                        {index_marker}
Can Parsers Traverse? = {traverse}
{{ endif }}
Current Index         = {index} (furthest {furthest})
{{ if failed }}Error                 = {errors}{{ else }}Parsing Result        = {result}{{ endif }}
"#;

#[derive(Serialize)]
struct Context {
    debugging: bool,
    target: String,
    furthest_marker: String,
    index_marker: String,
    traverse: bool,
    index: usize,
    furthest: usize,
    failed: bool,
    errors: String,
    result: String,
}

/// Describe a state: where it is, how far the parse got, and either its
/// result or its errors. When debugging, the target is also shown with a
/// `V` above the furthest index and a `^` below the current one.
pub fn report(state: &ParseState, debugging: bool) -> Result<String, Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("state", TEMPLATE)?;

    let context = Context {
        debugging,
        target: state
            .target()
            .to_string(),
        furthest_marker: marker(state, state.furthest_index(), 'V'),
        index_marker: marker(state, state.index(), '^'),
        traverse: state.traverse(),
        index: state.index(),
        furthest: state.furthest_index(),
        failed: state.is_error(),
        errors: state
            .messages()
            .join(", "),
        result: match state.result() {
            Some(value) => value.to_string(),
            None => "(none)".to_string(),
        },
    };

    let rendered = tt.render("state", &context)?;
    debug!("Rendered report of {} bytes", rendered.len());

    Ok(rendered)
}

// A marker character positioned under (or over) the character at `offset`.
fn marker(state: &ParseState, offset: usize, symbol: char) -> String {
    let before = state
        .target()
        .get(..offset)
        .unwrap_or("");

    let mut result = " ".repeat(
        before
            .chars()
            .count(),
    );
    result.push(symbol);
    result
}
