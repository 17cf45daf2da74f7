// Diagnostics collected while compiling a scenario

mod diagnostic;
mod format;

// Re-export all public symbols
pub use diagnostic::*;
pub use format::*;
