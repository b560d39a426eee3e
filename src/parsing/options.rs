use std::fmt;
use std::sync::Arc;

use crate::observe::Observer;

/// Settings for a single run of a parser.
#[derive(Clone, Default)]
pub struct Options {
    /// Allow literal matches to scan forward to the first occurrence rather
    /// than being anchored at the cursor.
    pub traverse: bool,
    /// Receives every transition of the run. No effect on the outcome.
    pub observer: Option<Arc<dyn Observer>>,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    pub fn traverse(mut self, traverse: bool) -> Options {
        self.traverse = traverse;
        self
    }

    pub fn observe(mut self, observer: Arc<dyn Observer>) -> Options {
        self.observer = Some(observer);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("traverse", &self.traverse)
            .field(
                "observer",
                &self
                    .observer
                    .is_some(),
            )
            .finish()
    }
}
