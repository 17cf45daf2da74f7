use std::fmt;

use crate::language::Kind;

/// A problem found while compiling a scenario. Diagnostics are advisory;
/// they accumulate on the parse result and never abort the walk. Which of
/// the two sequences one lands in is fixed per variant: empty task
/// headings, missing colons, and spaced parameter keys are warnings,
/// everything else is an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Diagnostic {
    EmptyTaskHeading,
    EmptyElementHeading(Kind),
    MissingColon,
    UnknownReferenceKind(String),
    MalformedReferenceLink,
    SpaceInParameterKey(String),
    UndefinedReference(Kind, String),
}

impl Diagnostic {
    pub fn message(&self) -> String {
        match self {
            Diagnostic::EmptyTaskHeading => "empty task heading".to_string(),
            Diagnostic::EmptyElementHeading(kind) => {
                format!("empty {} heading", kind)
            }
            Diagnostic::MissingColon => {
                "reference badly formatted; missing colon".to_string()
            }
            Diagnostic::UnknownReferenceKind(name) => {
                format!("unknown reference kind '{}'", name)
            }
            Diagnostic::MalformedReferenceLink => {
                "reference badly formatted; invalid link".to_string()
            }
            Diagnostic::SpaceInParameterKey(key) => {
                format!("parameter key '{}' contains a space", key)
            }
            Diagnostic::UndefinedReference(kind, id) => {
                format!("referenced undefined {}#{}", kind, id)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
