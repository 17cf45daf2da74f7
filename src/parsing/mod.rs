//! The two-pass scenario compiler

use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

pub mod parser;
mod validate;

pub use parser::{Parsed, ParserOptions, ScenarioParser};

/// Read a file and return an owned String. We pass that ownership back to
/// the caller so that borrowing parse results can share its lifetime.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Compile text into a Scenario with its accumulated diagnostics.
pub fn parse(content: &str) -> Parsed {
    let parsed = ScenarioParser::new().parse(content);

    debug!(
        "Found {} task{}",
        parsed
            .scenario
            .tasks
            .len(),
        if parsed
            .scenario
            .tasks
            .len()
            == 1
        {
            ""
        } else {
            "s"
        }
    );
    debug!(
        "{} warnings, {} errors",
        parsed
            .warnings
            .len(),
        parsed
            .errors
            .len()
    );

    parsed
}
