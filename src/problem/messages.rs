use crate::parsing::{ErrorKind, ParseState};

/// Generate problem and detail messages describing why a parse did not
/// succeed. The problem is a one-line summary; the details explain it and
/// list the trail of errors, newest first.
pub fn generate_error_message(state: &ParseState) -> (String, String) {
    let (problem, explanation) = match state
        .errors()
        .first()
    {
        Some(error) => match error.kind {
            ErrorKind::EndOfInput => (
                "Unexpected end of input".to_string(),
                "The input ended while the parser still expected more.".to_string(),
            ),
            ErrorKind::Mismatch => (
                "Unexpected input".to_string(),
                "The input did not match what the parser was looking for.".to_string(),
            ),
            ErrorKind::Composition => (
                "Incomplete match".to_string(),
                "Part of the grammar matched, but not enough of it to succeed.".to_string(),
            ),
            ErrorKind::Exhausted => (
                "No alternative matched".to_string(),
                r#"
None of the alternatives at this point matched. The position shown is the
furthest any of them got before failing.
                "#
                .trim_ascii()
                .to_string(),
            ),
        },
        None if state.is_incomplete_match() => (
            "Unexpected trailing input".to_string(),
            format!(
                "The parser stopped at index {} but the input continues.",
                state.index()
            ),
        ),
        None => return ("No error".to_string(), String::new()),
    };

    let mut details = explanation;
    for message in state.messages() {
        details.push_str("\n  ");
        details.push_str(message);
    }

    (problem, details)
}
