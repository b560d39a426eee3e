//! The immutable snapshot threaded through every parser

use std::fmt;
use std::sync::Arc;

use crate::observe::Observer;
use crate::parsing::error::ParsingError;
use crate::parsing::options::Options;
use crate::parsing::value::Value;

/// Progress of one parse over one input. States are never modified once
/// built; every transition below borrows `self` and hands back a new
/// state, so a caller holding an earlier state can always resume from it
/// after a failed attempt.
///
/// Indices are byte offsets into `target`.
#[derive(Clone)]
pub struct ParseState {
    target: Arc<str>,
    traverse: bool,
    index: usize,
    furthest_index: usize,
    result: Option<Value>,
    errors: Vec<ParsingError>,
    observer: Option<Arc<dyn Observer>>,
}

impl ParseState {
    pub fn new(target: &str, traverse: bool) -> ParseState {
        ParseState {
            target: Arc::from(target),
            traverse,
            index: 0,
            furthest_index: 0,
            result: None,
            errors: Vec::new(),
            observer: None,
        }
    }

    /// The initial state for a run with the given options.
    pub fn seed(target: &str, options: &Options) -> ParseState {
        ParseState {
            observer: options
                .observer
                .clone(),
            ..ParseState::new(target, options.traverse)
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn traverse(&self) -> bool {
        self.traverse
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn furthest_index(&self) -> usize {
        self.furthest_index
    }

    pub fn result(&self) -> Option<&Value> {
        self.result
            .as_ref()
    }

    pub fn into_result(self) -> Option<Value> {
        self.result
    }

    pub fn is_error(&self) -> bool {
        !self
            .errors
            .is_empty()
    }

    /// Errors recorded on this branch, most recent first.
    pub fn errors(&self) -> &[ParsingError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .map(|error| error.message.as_str())
            .collect()
    }

    pub(crate) fn observer(&self) -> Option<&Arc<dyn Observer>> {
        self.observer
            .as_ref()
    }

    // Every transition funnels through here so the furthest index is kept
    // at or above the index, and so an observer sees each new state.
    fn derive(
        &self,
        index: usize,
        furthest_index: usize,
        result: Option<Value>,
        errors: Vec<ParsingError>,
    ) -> ParseState {
        let next = ParseState {
            target: Arc::clone(&self.target),
            traverse: self.traverse,
            index,
            furthest_index: furthest_index
                .max(index)
                .max(self.furthest_index),
            result,
            errors,
            observer: self
                .observer
                .clone(),
        };

        if let Some(observer) = &next.observer {
            observer.derived(&next);
        }

        next
    }

    /// Replace the result and optionally move the cursor. Moving past the
    /// furthest index raises it.
    pub fn update_result(&self, result: Option<Value>, next_index: Option<usize>) -> ParseState {
        self.derive(
            next_index.unwrap_or(self.index),
            self.furthest_index,
            result,
            self.errors
                .clone(),
        )
    }

    /// Replace the result, leaving the cursor where it is, while carrying
    /// forward how far some discarded attempt got.
    pub fn update_result_reaching(&self, result: Option<Value>, furthest_index: usize) -> ParseState {
        self.derive(
            self.index,
            furthest_index,
            result,
            self.errors
                .clone(),
        )
    }

    /// Record a matched piece of text as the result and step over it.
    pub fn update_result_shift_by_length(&self, text: &str) -> ParseState {
        self.update_result(Some(Value::from(text)), Some(self.index + text.len()))
    }

    /// Keep everything but raise the furthest index, if `index` is beyond it.
    pub fn raise_furthest(&self, index: usize) -> ParseState {
        self.derive(
            self.index,
            index,
            self.result
                .clone(),
            self.errors
                .clone(),
        )
    }

    /// Mark this branch as failed, putting `error` in front of any earlier
    /// ones. `at_index` records how far the failing attempt got.
    pub fn add_error(&self, error: ParsingError, at_index: Option<usize>) -> ParseState {
        let mut errors = Vec::with_capacity(
            self.errors
                .len()
                + 1,
        );
        errors.push(error);
        errors.extend(
            self.errors
                .iter()
                .cloned(),
        );

        self.derive(
            self.index,
            at_index.unwrap_or(self.furthest_index),
            self.result
                .clone(),
            errors,
        )
    }

    /// Prefix every error with the name of the parser reporting it.
    pub fn assign_errors(&self, label: &str) -> ParseState {
        let errors = self
            .errors
            .iter()
            .map(|error| error.labelled(label))
            .collect();

        self.derive(
            self.index,
            self.furthest_index,
            self.result
                .clone(),
            errors,
        )
    }

    /// The input from the given offset (or the cursor) onward.
    pub fn segment(&self, from: Option<usize>) -> &str {
        let start = from.unwrap_or(self.index);
        self.target
            .get(start..)
            .unwrap_or("")
    }

    pub fn remaining(&self) -> &str {
        self.segment(None)
    }

    pub fn has_chars_remaining(&self, count: usize, from: Option<usize>) -> bool {
        self.segment(from)
            .len()
            >= count
    }

    pub fn is_remaining_empty(&self, from: Option<usize>) -> bool {
        !self.has_chars_remaining(1, from)
    }

    /// Did the parse stop short of the end of the input?
    pub fn is_incomplete_match(&self) -> bool {
        self.index
            < self
                .target
                .len()
    }

    /// Twenty characters of input surrounding the furthest index, starting
    /// up to ten characters before it.
    pub fn incomplete_window(&self) -> &str {
        let segment = &self.target[self.window_offset()..];
        let end = segment
            .char_indices()
            .nth(WINDOW_WIDTH)
            .map(|(offset, _)| offset)
            .unwrap_or(segment.len());
        &segment[..end]
    }

    /// Byte offset at which incomplete_window() begins.
    pub(crate) fn window_offset(&self) -> usize {
        window_start(&self.target, self.furthest_index)
    }
}

const WINDOW_WIDTH: usize = 20;
const WINDOW_LEAD: usize = 10;

// Offset at which the diagnostic window begins: ten characters before the
// given offset, or the start of the input.
fn window_start(target: &str, offset: usize) -> usize {
    let offset = offset.min(target.len());
    target[..offset]
        .char_indices()
        .rev()
        .nth(WINDOW_LEAD - 1)
        .map(|(start, _)| start)
        .unwrap_or(0)
}

impl PartialEq for ParseState {
    fn eq(&self, other: &ParseState) -> bool {
        self.target == other.target
            && self.traverse == other.traverse
            && self.index == other.index
            && self.furthest_index == other.furthest_index
            && self.result == other.result
            && self.errors == other.errors
    }
}

impl fmt::Debug for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseState")
            .field("target", &self.target)
            .field("traverse", &self.traverse)
            .field("index", &self.index)
            .field("furthest_index", &self.furthest_index)
            .field("result", &self.result)
            .field("errors", &self.errors)
            .field(
                "observed",
                &self
                    .observer
                    .is_some(),
            )
            .finish()
    }
}
