// src/suggest/actions.rs
//! Refactoring action text.
//!
//! Well-known file names get curated action lists; everything else falls back
//! to defaults for its category, adjusted by what the metrics show.

use crate::analysis::{ISSUE_COMPLEXITY, ISSUE_IMPORTS, ISSUE_STATE};
use crate::types::{ComponentMetrics, FileCategory, FileMetrics};

/// Curated actions keyed by lower-cased file stem.
const CURATED: &[(&str, &[&str])] = &[
    (
        "app",
        &[
            "extract route definitions into a dedicated router module",
            "move global providers into an AppProviders component",
            "lazy-load page-level components",
            "extract the layout shell into its own component",
        ],
    ),
    (
        "index",
        &[
            "keep the entry point to re-exports and bootstrapping only",
            "move implementation code into named modules",
            "group re-exports by feature",
        ],
    ),
    (
        "api",
        &[
            "split endpoints into per-resource client modules",
            "extract shared request and error handling into one helper",
            "move request and response types into a types module",
        ],
    ),
    (
        "store",
        &[
            "split the store into feature slices",
            "extract selectors into a selectors module",
            "move side-effecting actions out of reducers",
        ],
    ),
    (
        "utils",
        &[
            "split helpers by domain into focused modules",
            "delete helpers with no remaining callers",
            "add unit coverage before moving shared helpers",
        ],
    ),
    (
        "helpers",
        &[
            "split helpers by domain into focused modules",
            "inline single-use helpers at their call site",
        ],
    ),
    (
        "types",
        &[
            "split type definitions by domain",
            "derive related types with utility types instead of duplicating fields",
        ],
    ),
];

/// Actions for a whole-file suggestion, capped at `max`.
#[must_use]
pub fn file_actions(
    file: &FileMetrics,
    component: Option<&ComponentMetrics>,
    max: usize,
) -> Vec<String> {
    let stem = file
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if let Some((_, curated)) = CURATED.iter().find(|(name, _)| *name == stem) {
        return curated.iter().take(max).map(ToString::to_string).collect();
    }

    let mut actions: Vec<String> = Vec::new();
    match file.category {
        FileCategory::Component => {
            actions.push("split into smaller focused units".into());
            if component.is_some_and(|c| c.state_variable_count > 3) {
                actions.push("extract reusable state into a custom hook".into());
            }
            if component.is_some_and(|c| c.effect_count > 2) {
                actions.push("consolidate side effects behind a single hook".into());
            }
        }
        FileCategory::Page => {
            actions.push("extract page sections into child components".into());
            actions.push("move data fetching into dedicated hooks".into());
        }
        FileCategory::Hook => {
            actions.push("split into single-purpose hooks".into());
            actions.push("extract pure helpers out of the hook body".into());
        }
        FileCategory::Utility => {
            actions.push("group functions by responsibility into separate modules".into());
        }
        FileCategory::Type => {
            actions.push("split type definitions by domain".into());
        }
        FileCategory::Unknown => {
            actions.push("split into smaller modules".into());
        }
    }

    if file.issues.contains(ISSUE_COMPLEXITY) {
        actions.push("extract complex branches into named helpers".into());
    }
    if file.issues.contains(ISSUE_IMPORTS) {
        actions.push("reduce the import surface by introducing a facade module".into());
    }
    if file.issues.contains(ISSUE_STATE) && file.category != FileCategory::Component {
        actions.push("extract custom state management into a reducer".into());
    }

    actions.dedup();
    actions.truncate(max);
    actions
}

/// Actions for a structural-unit suggestion, capped at `max`.
#[must_use]
pub fn component_actions(component: &ComponentMetrics, max: usize) -> Vec<String> {
    let mut actions = Vec::new();
    if component.render_complexity > 5 {
        actions.push(format!("break the render tree of {} into subcomponents", component.name));
    }
    if component.state_variable_count > 3 {
        actions.push("extract reusable state into a custom hook".to_string());
    }
    if component.props_count > 7 {
        actions.push("group related props into configuration objects".to_string());
    }
    if component.effect_count > 2 {
        actions.push("consolidate side effects behind a single hook".to_string());
    }
    if !component.has_error_boundary {
        actions.push(format!("wrap {} in an error boundary", component.name));
    }
    if actions.is_empty() {
        actions.push(format!("simplify {}", component.name));
    }
    actions.truncate(max);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn file(path: &str, category: FileCategory, issues: &[&str]) -> FileMetrics {
        FileMetrics {
            path: PathBuf::from(path),
            line_count: 400,
            complexity_score: 30,
            maintainability_index: 20.0,
            imports: 20,
            exports: 1,
            state_hooks: 5,
            category,
            issues: issues.iter().map(ToString::to_string).collect::<BTreeSet<_>>(),
        }
    }

    fn component(state: usize, effects: usize) -> ComponentMetrics {
        ComponentMetrics {
            name: "Grid".into(),
            owning_file: PathBuf::from("src/Grid.tsx"),
            props_count: 9,
            state_variable_count: state,
            effect_count: effects,
            render_complexity: 8,
            has_error_boundary: false,
            is_oversized: true,
        }
    }

    #[test]
    fn curated_names_win() {
        let actions = file_actions(&file("src/App.tsx", FileCategory::Component, &[]), None, 4);
        assert_eq!(actions.len(), 4);
        assert!(actions[0].contains("router"));
    }

    #[test]
    fn component_defaults_include_state_extraction() {
        let c = component(4, 0);
        let actions = file_actions(&file("src/Grid.tsx", FileCategory::Component, &[]), Some(&c), 4);
        assert_eq!(actions[0], "split into smaller focused units");
        assert!(actions.iter().any(|a| a.contains("custom hook")));
    }

    #[test]
    fn actions_are_capped() {
        let c = component(6, 5);
        let f = file(
            "src/Grid.tsx",
            FileCategory::Component,
            &[ISSUE_COMPLEXITY, ISSUE_IMPORTS, ISSUE_STATE],
        );
        assert_eq!(file_actions(&f, Some(&c), 4).len(), 4);
        assert_eq!(component_actions(&c, 4).len(), 4);
    }

    #[test]
    fn component_without_findings_still_gets_one_action() {
        let c = ComponentMetrics {
            props_count: 0,
            state_variable_count: 0,
            effect_count: 0,
            render_complexity: 0,
            has_error_boundary: true,
            ..component(0, 0)
        };
        assert_eq!(component_actions(&c, 4), vec!["simplify Grid".to_string()]);
    }
}
