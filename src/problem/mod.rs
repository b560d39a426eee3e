// Presentation of parse failures

mod format;
mod messages;

// Re-export all public symbols
pub use format::*;
pub use messages::*;
