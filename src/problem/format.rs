use super::messages::generate_error_message;
use crate::formatting::{Render, Syntax};
use crate::parsing::ParseState;

/// Point at the furthest index reached, showing a window of the input
/// around it with a caret underneath:
///
/// ```text
/// Syntax error at 4 near '12+(3'
///                             ^
/// ```
pub fn syntax_error(state: &ParseState) -> String {
    let furthest = state.furthest_index();
    let window = state.incomplete_window();

    // characters of the window that come before the furthest index
    let lead = state
        .target()
        .get(state.window_offset()..furthest)
        .map(|before| {
            before
                .chars()
                .count()
        })
        .unwrap_or(0);

    let prefix = format!("Syntax error at {} near '", furthest);
    let offset = prefix
        .chars()
        .count()
        + lead;

    format!("{}{}'\n{}^", prefix, window, " ".repeat(offset))
}

/// Format a failed parse with full details including source code context
pub fn full_syntax_error(state: &ParseState, name: &str, renderer: &impl Render) -> String {
    let (problem, details) = generate_error_message(state);
    let source = state.target();
    let offset = state
        .furthest_index()
        .min(source.len());

    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);

    let code = source
        .lines()
        .nth(i)
        .unwrap_or("");
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    let bar = renderer.style(Syntax::Gutter, "|");

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{} {} {}
{:width$} {} {}{}

{}
        "#,
        renderer.style(Syntax::Error, "error"),
        renderer.style(Syntax::Location, name),
        line,
        column,
        renderer.style(Syntax::Problem, &problem),
        ' ',
        bar,
        renderer.style(Syntax::Gutter, &format!("{:>width$}", line)),
        bar,
        code,
        ' ',
        bar,
        " ".repeat(j),
        renderer.style(Syntax::Caret, "^"),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a failed parse with concise single-line output
pub fn concise_syntax_error(state: &ParseState, name: &str, renderer: &impl Render) -> String {
    let (problem, _) = generate_error_message(state);
    let source = state.target();
    let offset = state
        .furthest_index()
        .min(source.len());

    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);
    let line = i + 1;
    let column = j + 1;

    format!(
        "{}: {}:{}:{} {}",
        renderer.style(Syntax::Error, "error"),
        renderer.style(Syntax::Location, name),
        line,
        column,
        renderer.style(Syntax::Problem, &problem),
    )
}

// This returns a zero-origin result so that it can subsequently be used for
// splitting; for display to humans you'll have to add 1.
fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

// Calculate the column number, also zero-origin for consistency.
fn calculate_column_number(content: &str, offset: usize) -> usize {
    let before = &content[..offset];
    match before.rfind('\n') {
        Some(start) => content[start + 1..offset]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}
