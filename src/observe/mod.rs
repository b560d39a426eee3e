//! Passive observation of a parse as it runs

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, trace};

use crate::parsing::ParseState;

/// Hook called as a run progresses. Observers cannot influence the parse;
/// they only see states after they have been built. Every method defaults
/// to doing nothing.
pub trait Observer: Send + Sync {
    /// A new state was derived from an earlier one.
    fn derived(&self, _state: &ParseState) {}

    /// The named parser is about to be applied to `state`.
    fn enter(&self, _name: &str, _state: &ParseState) {}

    /// The named parser turned `before` into `after`.
    fn leave(&self, _name: &str, _before: &ParseState, _after: &ParseState) {}
}

/// Totals gathered by a Tracer over one or more runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// How many states were derived.
    pub transformations: usize,
    /// Deepest nesting of parser applications reached.
    pub max_depth: usize,
}

/// Counts transformations and nesting depth, and optionally logs every
/// transition through `tracing`.
#[derive(Debug, Default)]
pub struct Tracer {
    verbose: AtomicBool,
    transformations: AtomicUsize,
    depth: AtomicUsize,
    max_depth: AtomicUsize,
}

impl Tracer {
    pub fn new() -> Tracer {
        Tracer::default()
    }

    /// A tracer that also emits an event for each transition.
    pub fn verbose() -> Tracer {
        let tracer = Tracer::default();
        tracer
            .verbose
            .store(true, Ordering::Relaxed);
        tracer
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.verbose
            .store(verbose, Ordering::Relaxed);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
            .load(Ordering::Relaxed)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            transformations: self
                .transformations
                .load(Ordering::Relaxed),
            max_depth: self
                .max_depth
                .load(Ordering::Relaxed),
        }
    }

    /// Zero the counters, ready for another run.
    pub fn reset(&self) {
        self.transformations
            .store(0, Ordering::Relaxed);
        self.depth
            .store(0, Ordering::Relaxed);
        self.max_depth
            .store(0, Ordering::Relaxed);
    }
}

impl Observer for Tracer {
    fn derived(&self, state: &ParseState) {
        self.transformations
            .fetch_add(1, Ordering::Relaxed);

        if self.is_verbose() {
            trace!(
                index = state.index(),
                furthest = state.furthest_index(),
                error = state.is_error(),
                "derived state"
            );
        }
    }

    fn enter(&self, name: &str, state: &ParseState) {
        let depth = self
            .depth
            .fetch_add(1, Ordering::Relaxed)
            + 1;
        self.max_depth
            .fetch_max(depth, Ordering::Relaxed);

        if self.is_verbose() {
            debug!(depth, "{}: entering at {} '{}'", name, state.index(), state.remaining());
        }
    }

    fn leave(&self, name: &str, before: &ParseState, after: &ParseState) {
        let depth = self
            .depth
            .fetch_sub(1, Ordering::Relaxed);

        if self.is_verbose() {
            match after.errors() {
                [] => debug!(
                    depth,
                    "{}: index {} -> {}, result {}",
                    name,
                    before.index(),
                    after.index(),
                    describe(after)
                ),
                [newest, ..] => debug!(
                    depth,
                    "{}: failed at {} (furthest {}): {}",
                    name,
                    before.index(),
                    after.furthest_index(),
                    newest
                ),
            }
        }
    }
}

fn describe(state: &ParseState) -> String {
    match state.result() {
        Some(value) => value.to_string(),
        None => "(none)".to_string(),
    }
}
