// src/file_class.rs
//! File classification: decides which structural role a source file plays.
//!
//! The category selects the size threshold a file is judged against and the
//! default refactoring actions offered for it. Classification is purely
//! path-based so it never needs the file content.

use crate::types::FileCategory;
use std::path::Path;

/// Classifies a file path into a `FileCategory`.
///
/// Decision order:
/// 1. Declaration files and `types` modules → `Type`
/// 2. `useXxx` file names or a `hooks/` directory → `Hook`
/// 3. `pages/`/`app/` directories or `*Page` names → `Page`
/// 4. JSX-bearing extensions or a `components/` directory → `Component`
/// 5. Any other recognised source extension → `Utility`
#[must_use]
pub fn classify(path: &Path) -> FileCategory {
    let normalized = path.to_string_lossy().replace('\\', "/").to_ascii_lowercase();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if !is_source_ext(&ext) {
        return FileCategory::Unknown;
    }
    if is_type_module(&normalized, stem) {
        return FileCategory::Type;
    }
    if is_hook(&normalized, stem) {
        return FileCategory::Hook;
    }
    if is_page(&normalized, stem) {
        return FileCategory::Page;
    }
    if matches!(ext.as_str(), "tsx" | "jsx") || in_dir(&normalized, "components") {
        return FileCategory::Component;
    }
    FileCategory::Utility
}

fn is_source_ext(ext: &str) -> bool {
    matches!(ext, "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" | "rs" | "py")
}

fn is_type_module(normalized: &str, stem: &str) -> bool {
    normalized.ends_with(".d.ts")
        || in_dir(normalized, "types")
        || matches!(stem.to_ascii_lowercase().as_str(), "types" | "interfaces" | "models")
}

fn is_hook(normalized: &str, stem: &str) -> bool {
    let mut chars = stem.chars();
    let named_hook = stem.starts_with("use")
        && chars.nth(3).is_some_and(|c| c.is_ascii_uppercase());
    named_hook || in_dir(normalized, "hooks")
}

fn is_page(normalized: &str, stem: &str) -> bool {
    in_dir(normalized, "pages")
        || (in_dir(normalized, "app") && stem == "page")
        || stem.len() > 4 && stem.ends_with("Page")
}

fn in_dir(normalized: &str, dir: &str) -> bool {
    normalized.starts_with(&format!("{dir}/")) || normalized.contains(&format!("/{dir}/"))
}
