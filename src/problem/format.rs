use owo_colors::OwoColorize;
use std::path::Path;

use crate::language::LoadingError;
use crate::problem::Diagnostic;

/// Format a warning with concise single-line output
pub fn concise_warning(diagnostic: &Diagnostic, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "warning".bright_yellow(),
        filename.to_string_lossy(),
        diagnostic
            .message()
            .bold()
    )
}

/// Format an error with concise single-line output
pub fn concise_error(diagnostic: &Diagnostic, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        diagnostic
            .message()
            .bold()
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}
