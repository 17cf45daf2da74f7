use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::language::{Kind, RunListItem, Scenario};
use crate::problem::Diagnostic;

/// The second pass: confirm that every reference in every task's run-list
/// names a declared element of its kind. Runs once, over the final
/// scenario, so forward references are always legal. Never mutates the
/// scenario; dangling references only append errors.
pub(crate) fn validate_references(scenario: &Scenario, errors: &mut Vec<Diagnostic>) {
    let mut declared: HashMap<Kind, HashSet<&str>> = HashMap::new();
    for kind in Kind::ALL {
        declared.insert(
            kind,
            scenario
                .elements(kind)
                .iter()
                .map(|element| {
                    element
                        .id
                        .as_str()
                })
                .collect(),
        );
    }

    let before = errors.len();

    for task in &scenario.tasks {
        for item in &task.run_list {
            if let RunListItem::Reference { kind, id, .. } = item {
                if !declared[kind].contains(id.as_str()) {
                    errors.push(Diagnostic::UndefinedReference(*kind, id.clone()));
                }
            }
        }
    }

    debug!("{} dangling references", errors.len() - before);
}
