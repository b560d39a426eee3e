//! The uniform handle every matcher and combinator is built behind

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::parsing::options::Options;
use crate::parsing::state::ParseState;
use crate::parsing::value::Value;

type Transformer = dyn Fn(&ParseState) -> ParseState + Send + Sync;

/// A reusable parser: a pure function from one ParseState to the next.
///
/// Parsers hold no per-run data, so a single grammar can be applied to any
/// number of inputs, embedded in any number of other parsers, and shared
/// across threads. Cloning is cheap; clones share the same function.
#[derive(Clone)]
pub struct Parser {
    name: Cow<'static, str>,
    transformer: Arc<Transformer>,
}

impl Parser {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, transformer: F) -> Parser
    where
        F: Fn(&ParseState) -> ParseState + Send + Sync + 'static,
    {
        Parser {
            name: name.into(),
            transformer: Arc::new(transformer),
        }
    }

    /// The name this parser reports itself under in traces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same parser, reporting under a different name.
    pub fn named(self, name: impl Into<Cow<'static, str>>) -> Parser {
        Parser {
            name: name.into(),
            transformer: self.transformer,
        }
    }

    /// Apply this parser to a state. Combinators call this on their
    /// children; to begin a parse from the start of some input, use run().
    pub fn parse(&self, state: &ParseState) -> ParseState {
        match state.observer() {
            Some(observer) => {
                observer.enter(&self.name, state);
                let after = (self.transformer)(state);
                observer.leave(&self.name, state, &after);
                after
            }
            None => (self.transformer)(state),
        }
    }

    /// Parse `target` from its beginning, literal matches anchored.
    pub fn run(&self, target: &str) -> ParseState {
        self.run_with(target, &Options::default())
    }

    /// Parse `target` from its beginning, letting literal matches scan
    /// forward for their first occurrence.
    pub fn run_traversing(&self, target: &str) -> ParseState {
        self.run_with(target, &Options::new().traverse(true))
    }

    pub fn run_with(&self, target: &str, options: &Options) -> ParseState {
        debug!("{}: running over {} bytes", self.name, target.len());
        self.parse(&ParseState::seed(target, options))
    }

    /// Transform the result of a successful match. Failures, and successes
    /// that produced no result, pass through untouched.
    pub fn map<F>(&self, transform: F) -> Parser
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let inner = self.clone();
        let name = format!("{}_with_map_transform", self.name);

        Parser::new(name, move |state: &ParseState| {
            let next = inner.parse(state);

            if next.is_error() {
                return next;
            }

            match next.result() {
                Some(value) => {
                    let mapped = transform(value.clone());
                    debug!("{}: mapped result: `{}` -> `{}`", inner.name, value, mapped);
                    next.update_result(Some(mapped), None)
                }
                None => next,
            }
        })
    }

    /// Require this parser to match between `left` and `right`, keeping only
    /// this parser's result.
    pub fn between(&self, left: &Parser, right: &Parser) -> Parser {
        let parts = [left.clone(), self.clone(), right.clone()];
        let name = format!("{}_between", self.name);

        Parser::new(name, move |state: &ParseState| {
            if state.is_error() {
                return state.clone();
            }

            let mut current = state.clone();
            let mut middle = None;

            for (position, parser) in parts
                .iter()
                .enumerate()
            {
                current = parser.parse(&current);

                if current.is_error() {
                    return current.assign_errors("between");
                }

                if position == 1 {
                    middle = current
                        .result()
                        .cloned();
                }
            }

            current.update_result(middle, None)
        })
    }

    /// Require this parser to be surrounded by the same delimiter on both
    /// sides, as in a quoted string.
    pub fn enclosed_by(&self, delimiter: &Parser) -> Parser {
        self.between(delimiter, delimiter)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parser")
            .field(&self.name)
            .finish()
    }
}
