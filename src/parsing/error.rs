use std::fmt;

/// Broad classification of why a parser failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The match needed input but none remained.
    EndOfInput,
    /// The remaining input did not match a literal or a pattern.
    Mismatch,
    /// A composite parser's own rule was violated.
    Composition,
    /// No alternative of an `any_of()` matched.
    Exhausted,
}

/// A failure recorded in a ParseState. These are data, not Rust errors in
/// the `Result` sense: a failed branch is an ordinary state that the
/// enclosing combinator inspects and either propagates or discards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ParsingError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> ParsingError {
        ParsingError {
            kind,
            message: message.into(),
        }
    }

    pub fn end_of_input(parser: &str) -> ParsingError {
        ParsingError::new(ErrorKind::EndOfInput, format!("{}: reached EOF", parser))
    }

    pub fn mismatch(message: impl Into<String>) -> ParsingError {
        ParsingError::new(ErrorKind::Mismatch, message)
    }

    pub fn composition(message: impl Into<String>) -> ParsingError {
        ParsingError::new(ErrorKind::Composition, message)
    }

    pub fn exhausted(message: impl Into<String>) -> ParsingError {
        ParsingError::new(ErrorKind::Exhausted, message)
    }

    /// Prefix the message with the name of the parser it passed through.
    pub fn labelled(&self, label: &str) -> ParsingError {
        ParsingError {
            kind: self.kind,
            message: format!("{}: {}", label, self.message),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
