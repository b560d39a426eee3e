//! Parser combinators over an immutable parse state
//!
//! A grammar is assembled once from the primitive matchers and the
//! combinators, then applied with run(). Every step of a run takes a
//! ParseState and returns a fresh one; nothing is shared or mutated, so a
//! grammar can be reused freely, including from several threads at once.

mod combinators;
mod error;
mod matchers;
mod options;
mod parser;
mod state;
mod value;

// Re-export all public symbols
pub use combinators::*;
pub use error::*;
pub use matchers::*;
pub use options::*;
pub use parser::*;
pub use state::ParseState;
pub use value::*;
