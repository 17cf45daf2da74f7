//! Block-level tokenization of markdown input
//!
//! The compiler consumes an ordered sequence of [`BlockToken`] values and
//! has no opinion on character-level markdown syntax. This module is the
//! collaborator producing that sequence, built on pulldown-cmark.

mod lexer;

// Re-export all public symbols
pub use lexer::*;
