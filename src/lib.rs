//! Parser combinators that thread an immutable parse state through pure
//! functions.

pub mod formatting;
pub mod grammar;
pub mod observe;
pub mod output;
pub mod parsing;
pub mod problem;
pub mod source;
