//! A compiler for markdown test and procedure scenarios.
//!
//! A scenario document declares tasks under a `# Scenario` heading and
//! typed elements (actions, checks, hardware, meta, settings) under their
//! own top-level headings. Compilation happens in two passes: a walk over
//! the block tokens that builds the [`language::Scenario`] data model, and
//! a validation pass that resolves every run-list reference against the
//! declared elements. Diagnostics accumulate; they never abort a parse.

pub mod language;
pub mod markdown;
pub mod parsing;
pub mod problem;

mod regex;
