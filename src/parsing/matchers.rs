//! Primitive parsers that turn raw text into a state transition

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::parsing::error::ParsingError;
use crate::parsing::parser::Parser;
use crate::parsing::state::ParseState;
use crate::parsing::value::Value;

// How much of the remaining input to quote back in a mismatch message.
const PREVIEW: usize = 10;

macro_rules! compile {
    ($pattern:expr) => {{
        static REGEX: OnceLock<Regex> = OnceLock::new();
        REGEX.get_or_init(|| Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

/// Match `text` exactly at the cursor. When the run is traversing, scan
/// forward one character at a time to the first occurrence instead.
pub fn literal(text: &str) -> Parser {
    let expected = text.to_string();
    let name = format!("literal '{}'", text);

    Parser::new(name, move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        let mut cursor = state.index();

        loop {
            if state.is_remaining_empty(Some(cursor)) {
                return state.add_error(ParsingError::end_of_input("literal"), None);
            }

            let current = state.segment(Some(cursor));

            debug!("literal: matching '{}' in '{}' (index {})", expected, current, cursor);

            if current.starts_with(expected.as_str()) {
                return state.update_result(
                    Some(Value::from(expected.as_str())),
                    Some(cursor + expected.len()),
                );
            }

            if state.traverse() {
                let step = current
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);

                if state.has_chars_remaining(expected.len(), Some(cursor + step)) {
                    cursor += step;
                    continue;
                }

                // Scanned to the end without finding it; quote everything.
                return state.add_error(
                    ParsingError::mismatch(format!(
                        "literal: expected '{}', found '{}'",
                        expected,
                        state.remaining()
                    )),
                    None,
                );
            }

            let reached = cursor + common_prefix(current, &expected);
            let found = preview(current, expected.chars().count() + PREVIEW);

            return state.add_error(
                ParsingError::mismatch(format!("literal: expected '{}', found '{}'", expected, found)),
                Some(reached),
            );
        }
    })
}

/// Match whichever of `texts` appears first in declaration order. Built as
/// a single alternation of the escaped texts.
pub fn literals<I, S>(texts: I) -> Parser
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let escaped: Vec<String> = texts
        .into_iter()
        .map(|text| format!("({})", regex::escape(text.as_ref())))
        .collect();
    let alternation = escaped.join("|");

    debug!("literals: matching using regex `{}`", alternation);

    regex(&alternation).named(format!("literals {}", alternation))
}

/// Match a regular expression anchored at the cursor.
///
/// # Panics
///
/// A malformed pattern is a mistake in the grammar, not in the input, so it
/// is reported immediately rather than surfacing in the middle of a parse.
/// Use try_regex() to handle the error instead.
pub fn regex(pattern: &str) -> Parser {
    try_regex(pattern).unwrap_or_else(|e| panic!("{}", e))
}

/// Match a regular expression anchored at the cursor, returning any error
/// compiling the pattern.
pub fn try_regex(pattern: &str) -> Result<Parser, regex::Error> {
    let compiled = Regex::new(&format!("^(?:{})", pattern))?;
    Ok(pattern_matcher(compiled, pattern.to_string()))
}

/// Match an already compiled expression. The match must begin exactly at
/// the cursor; a match found later in the input does not count.
pub fn from_regex(compiled: Regex) -> Parser {
    let pattern = compiled
        .as_str()
        .to_string();

    // anchor it, so a mismatch doesn't search the rest of the input
    let anchored = match Regex::new(&format!("^(?:{})", pattern)) {
        Ok(anchored) => anchored,
        Err(_) => compiled,
    };

    pattern_matcher(anchored, pattern)
}

/// One or more ASCII digits.
pub fn digits() -> Parser {
    pattern_matcher(compile!("^[0-9]+").clone(), "[0-9]+".to_string()).named("digits")
}

/// One or more ASCII letters.
pub fn letters() -> Parser {
    pattern_matcher(compile!("^[A-Za-z]+").clone(), "[A-Za-z]+".to_string()).named("letters")
}

/// A run of whitespace.
pub fn whitespace() -> Parser {
    pattern_matcher(compile!(r"^\s+").clone(), r"\s+".to_string()).named("whitespace")
}

fn pattern_matcher(compiled: Regex, pattern: String) -> Parser {
    let name = format!("regex `{}`", pattern);

    Parser::new(name, move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        if state.is_remaining_empty(None) {
            return state.add_error(ParsingError::end_of_input("regex"), None);
        }

        let current = state.remaining();

        debug!("regex: matching `{}` in '{}'", pattern, current);

        match compiled.find(current) {
            Some(found) if found.start() == 0 => state.update_result_shift_by_length(found.as_str()),
            _ => state.add_error(
                ParsingError::mismatch(format!(
                    "regex: expected '{}', found '{}'",
                    pattern,
                    preview(current, PREVIEW)
                )),
                None,
            ),
        }
    })
}

// The first `count` characters of `text`, with an ellipsis if that was
// not all of it.
fn preview(text: &str, count: usize) -> String {
    match text
        .char_indices()
        .nth(count)
    {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

// Length in bytes of the longest common prefix of the two strings.
fn common_prefix(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}
