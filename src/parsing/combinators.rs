//! Combinators assembling parsers into larger parsers
//!
//! Each of these returns a Parser whose function hands an incoming state to
//! its children and builds a new state from what comes back. An incoming
//! state that has already failed is returned as is. Backtracking is simply
//! a matter of ignoring the state a failed child returned and carrying on
//! from a state held earlier.

use tracing::debug;

use crate::parsing::error::ParsingError;
use crate::parsing::parser::Parser;
use crate::parsing::state::ParseState;
use crate::parsing::value::Value;

/// Match each parser in turn, each starting where the previous one ended.
/// The result is a list of the children's results, skipping any that
/// produced nothing.
pub fn sequence<I>(parsers: I) -> Parser
where
    I: IntoIterator<Item = Parser>,
{
    let parsers: Vec<Parser> = parsers
        .into_iter()
        .collect();

    Parser::new("sequence", move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        if parsers.is_empty() {
            return state.add_error(
                ParsingError::composition("sequence: no parsers to match"),
                None,
            );
        }

        let mut results = Vec::with_capacity(parsers.len());
        let mut current = state.clone();

        for (position, parser) in parsers
            .iter()
            .enumerate()
        {
            debug!(
                "sequence ({}/{}): matching `{}` against '{}'",
                position + 1,
                parsers.len(),
                parser.name(),
                current.remaining()
            );

            current = parser.parse(&current);

            if current.is_error() {
                return current.assign_errors("sequence");
            }

            if let Some(value) = current.result() {
                results.push(value.clone());
            }
        }

        current.update_result(Some(Value::List(results)), None)
    })
}

/// Try each parser against the same incoming state and take the first that
/// succeeds. Either way the outcome carries the furthest index reached by
/// any alternative attempted.
pub fn any_of<I>(parsers: I) -> Parser
where
    I: IntoIterator<Item = Parser>,
{
    let parsers: Vec<Parser> = parsers
        .into_iter()
        .collect();

    Parser::new("any_of", move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        let mut furthest = state.furthest_index();

        for (position, parser) in parsers
            .iter()
            .enumerate()
        {
            debug!(
                "any_of ({}/{}): matching `{}` against '{}'",
                position + 1,
                parsers.len(),
                parser.name(),
                state.remaining()
            );

            let attempt = parser.parse(state);

            furthest = furthest.max(attempt.furthest_index());

            if !attempt.is_error() {
                debug!("any_of: found match");
                if furthest > attempt.furthest_index() {
                    return attempt.raise_furthest(furthest);
                }
                return attempt;
            }
        }

        state.add_error(
            ParsingError::exhausted("any_of: no target matched"),
            Some(furthest),
        )
    })
}

/// Match `parser` as many times as possible, but at least once.
pub fn many(parser: Parser) -> Parser {
    many_at_least(parser, 1)
}

/// Match `parser` as many times as possible, failing unless it matched at
/// least `minimum` times. The result is the list of each match's result.
///
/// A match that consumes no input ends the repetition, since repeating it
/// could never get any further. It still counts as one match towards the
/// minimum.
pub fn many_at_least(parser: Parser, minimum: usize) -> Parser {
    Parser::new("many", move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        let mut results = Vec::new();
        let mut count = 0;
        let mut current = state.clone();

        loop {
            debug!(
                "many ({} found): matching `{}` against '{}'",
                count,
                parser.name(),
                current.remaining()
            );

            let attempt = parser.parse(&current);

            if attempt.is_error() {
                if count < minimum {
                    return too_few(state, count, minimum, attempt.furthest_index());
                }

                return current.update_result_reaching(
                    Some(Value::List(results)),
                    attempt.furthest_index(),
                );
            }

            count += 1;
            if let Some(value) = attempt.result() {
                results.push(value.clone());
            }

            let advanced = attempt.index() > current.index();
            current = attempt;

            if !advanced {
                debug!("many: match consumed nothing, stopping");
                if count < minimum {
                    return too_few(state, count, minimum, current.furthest_index());
                }
                return current.update_result(Some(Value::List(results)), None);
            }
        }
    })
}

fn too_few(state: &ParseState, count: usize, minimum: usize, furthest: usize) -> ParseState {
    state.add_error(
        ParsingError::composition(format!("many: {} matches, {} required", count, minimum)),
        Some(furthest),
    )
}

/// Attempt `parser`; if it fails carry on as if nothing happened, with no
/// result. The failed attempt still counts towards the furthest index.
pub fn optional(parser: Parser) -> Parser {
    Parser::new("optional", move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        debug!(
            "optional: attempting to match `{}` against '{}'",
            parser.name(),
            state.remaining()
        );

        let attempt = parser.parse(state);

        if attempt.is_error() {
            debug!("optional: no match");
            return state.update_result_reaching(None, attempt.furthest_index());
        }

        debug!("optional: found match");
        attempt
    })
}

/// Match one or more `item`s with a `separator` between each. The result
/// alternates item and separator results, `[item, sep, item, ...]`.
///
/// Only the first item is required. Matching stops quietly at the first
/// separator that is not followed by an item, leaving that separator
/// unconsumed; a trailing separator is therefore never an error.
pub fn separated_by(separator: Parser, item: Parser) -> Parser {
    Parser::new("separated_by", move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        debug!(
            "separated_by: matching `{}` separated by `{}`",
            item.name(),
            separator.name()
        );

        let mut current = item.parse(state);

        if current.is_error() {
            return current.assign_errors("separated_by");
        }

        let mut results = Vec::new();

        loop {
            if let Some(value) = current.result() {
                results.push(value.clone());
            }

            if current.is_remaining_empty(None) {
                return current.update_result(Some(Value::List(results)), None);
            }

            let divider = separator.parse(&current);

            if divider.is_error() || divider.is_remaining_empty(None) {
                debug!("separated_by: complete, no more separators");
                return current
                    .update_result_reaching(Some(Value::List(results)), divider.furthest_index());
            }

            let next = item.parse(&divider);

            if next.is_error() || next.index() == current.index() {
                debug!(
                    "separated_by: found separator but no next value at {}",
                    next.furthest_index()
                );
                return current
                    .update_result_reaching(Some(Value::List(results)), next.furthest_index());
            }

            if let Some(value) = divider.result() {
                results.push(value.clone());
            }

            current = next;
        }
    })
}

/// Defer building a parser until it is first applied. This is how a
/// grammar refers to itself, or to a rule defined after it:
///
/// ```
/// use combinate::parsing::*;
///
/// fn group() -> Parser {
///     any_of([
///         lazy(|| group().between(&literal("("), &literal(")"))),
///         digits(),
///     ])
/// }
///
/// let state = group().run("((7))");
/// assert_eq!(state.result(), Some(&Value::from("7")));
/// ```
///
/// The supplier is called on each application. A grammar that can recurse
/// without consuming input will recurse until the stack is exhausted.
///
/// On an empty remainder `lazy` fails with `lazy: reached EOF` without
/// building the parser at all, even if that parser could have succeeded
/// there by matching nothing. So `sequence([literal("a"), lazy(|| optional(literal("b")))])`
/// fails on `"a"` where the same grammar without `lazy` succeeds, and a
/// list written as `optional(sequence([item, lazy(list)]))` stops one
/// item early. Put optional parts outside the `lazy` when they may fall at
/// the end of the input.
pub fn lazy<F>(supplier: F) -> Parser
where
    F: Fn() -> Parser + Send + Sync + 'static,
{
    Parser::new("lazy", move |state: &ParseState| {
        if state.is_error() {
            return state.clone();
        }

        if state.is_remaining_empty(None) {
            return state.add_error(ParsingError::end_of_input("lazy"), None);
        }

        let parser = supplier();

        debug!("lazy: loaded {}", parser.name());

        parser.parse(state)
    })
}
