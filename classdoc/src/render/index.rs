//! "All classes" index page: the hierarchy as a nested list.

use crate::hierarchy::{ClassRecord, Hierarchy};
use crate::model::KnownClasses;
use crate::render::markup::make_type;

/// File name of the index page in the output directory.
pub const INDEX_FILE: &str = "all_classes.md";

const INDENT: &str = "    ";

/// Render every root and its descendants, depth first, children alphabetically.
///
/// Roots are always bare names; descendants link to their page when they
/// have one.
pub fn render_index(hierarchy: &Hierarchy, known: &KnownClasses) -> String {
    let mut lines = vec!["# All classes".to_string(), String::new()];

    for root in hierarchy.roots() {
        lines.push(format!("- {}", root.name));
        branch(&mut lines, hierarchy, root, 1, known);
    }

    lines.push(String::new());
    lines.join("\n")
}

fn branch(
    lines: &mut Vec<String>,
    hierarchy: &Hierarchy,
    parent: &ClassRecord,
    level: usize,
    known: &KnownClasses,
) {
    for child in hierarchy.children(parent) {
        let label = if child.is_known_in_set() {
            make_type(&child.name, known)
        } else {
            child.name.clone()
        };
        lines.push(format!("{}- {}", INDENT.repeat(level), label));
        branch(lines, hierarchy, child, level + 1, known);
    }
}
