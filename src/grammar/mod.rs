//! Grammars built from the parsing combinators

mod arithmetic;

pub use arithmetic::*;
