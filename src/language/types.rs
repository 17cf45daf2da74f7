//! Types representing the data model for a compiled scenario

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The five kinds of typed element a scenario document can declare, and
/// the only kinds a run-list reference can name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Action,
    Check,
    Hardware,
    Meta,
    Setting,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Action,
        Kind::Check,
        Kind::Hardware,
        Kind::Meta,
        Kind::Setting,
    ];

    /// Map a top-level section heading to the kind of element it declares.
    pub fn from_section(name: &str) -> Option<Kind> {
        match name {
            "Actions" => Some(Kind::Action),
            "Checks" => Some(Kind::Check),
            "Hardware" => Some(Kind::Hardware),
            "Meta" => Some(Kind::Meta),
            "Settings" => Some(Kind::Setting),
            _ => None,
        }
    }

    /// Map the singular name used in a special reference to its kind.
    pub fn from_reference(name: &str) -> Option<Kind> {
        match name {
            "action" => Some(Kind::Action),
            "check" => Some(Kind::Check),
            "hardware" => Some(Kind::Hardware),
            "meta" => Some(Kind::Meta),
            "setting" => Some(Kind::Setting),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Action => "action",
            Kind::Check => "check",
            Kind::Hardware => "hardware",
            Kind::Meta => "meta",
            Kind::Setting => "setting",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The root of a compiled document: tasks in declaration order plus one
/// collection per element kind, also in declaration order. Ids are not
/// guaranteed unique at declaration time; resolution treats the first
/// match as authoritative.
#[derive(Debug, Default, Eq, PartialEq, Serialize)]
pub struct Scenario {
    pub tasks: Vec<Task>,
    pub actions: Vec<TypedElement>,
    pub checks: Vec<TypedElement>,
    pub hardware: Vec<TypedElement>,
    pub meta: Vec<TypedElement>,
    pub settings: Vec<TypedElement>,
}

impl Scenario {
    pub fn elements(&self, kind: Kind) -> &[TypedElement] {
        match kind {
            Kind::Action => &self.actions,
            Kind::Check => &self.checks,
            Kind::Hardware => &self.hardware,
            Kind::Meta => &self.meta,
            Kind::Setting => &self.settings,
        }
    }

    pub(crate) fn elements_mut(&mut self, kind: Kind) -> &mut Vec<TypedElement> {
        match kind {
            Kind::Action => &mut self.actions,
            Kind::Check => &mut self.checks,
            Kind::Hardware => &mut self.hardware,
            Kind::Meta => &mut self.meta,
            Kind::Setting => &mut self.settings,
        }
    }
}

/// One depth-2 unit inside the Scenario section. The description is left
/// empty by the compiler; surrounding tooling fills it in.
#[derive(Debug, Default, Eq, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub run_list: Vec<RunListItem>,
}

/// A declared action, check, hardware requirement, meta entry, or setting.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct TypedElement {
    #[serde(rename = "type")]
    pub kind: Kind,
    pub id: String,
    pub params: HashMap<String, String>,
}

/// One entry in a task's run-list: either a pointer to a typed element,
/// resolved after the token walk completes, or a run of narrative
/// markdown.
#[derive(Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunListItem {
    Reference {
        #[serde(rename = "type")]
        kind: Kind,
        id: String,
        description: String,
        params: HashMap<String, String>,
        solution: bool,
    },
    Content {
        content: String,
    },
}

impl RunListItem {
    pub fn is_content(&self) -> bool {
        matches!(self, RunListItem::Content { .. })
    }
}
