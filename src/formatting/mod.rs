//! Presentation of results and diagnostics

mod results;
mod syntax;
mod terminal;

// Re-export all public symbols
pub use results::*;
pub use syntax::*;
pub use terminal::*;
