// src/analysis/mod.rs
//! Per-file metrics collection.

pub mod components;
pub mod metrics;

pub use components::ComponentAnalyzer;

use crate::config::ThresholdConfig;
use crate::source::{FileSource, SourceEntry};
use crate::types::{ComponentMetrics, FileCategory, FileMetrics};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const ISSUE_TOO_LARGE: &str = "file too large";
pub const ISSUE_COMPLEXITY: &str = "high cyclomatic complexity";
pub const ISSUE_IMPORTS: &str = "too many imports";
pub const ISSUE_STATE: &str = "extract custom state management";

/// Everything collected from one inventory walk.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub files: Vec<FileMetrics>,
    pub components: Vec<ComponentMetrics>,
    /// Files listed but not readable, with the error text.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Computes [`FileMetrics`] for source text.
pub struct MetricsCollector<'a> {
    thresholds: &'a ThresholdConfig,
}

impl<'a> MetricsCollector<'a> {
    #[must_use]
    pub fn new(thresholds: &'a ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Measures one file. Always returns a record, clean files included.
    #[must_use]
    pub fn measure(&self, path: &Path, content: &str, category: FileCategory) -> FileMetrics {
        let line_count = metrics::count_lines(content);
        let complexity_score = metrics::complexity(content);
        let imports = metrics::count_imports(content);
        let state_hooks = metrics::count_state_hooks(content);

        let mut issues = BTreeSet::new();
        if line_count > self.thresholds.large_file_lines {
            issues.insert(ISSUE_TOO_LARGE.to_string());
        }
        if complexity_score > self.thresholds.complexity_issue {
            issues.insert(ISSUE_COMPLEXITY.to_string());
        }
        if imports > self.thresholds.max_imports {
            issues.insert(ISSUE_IMPORTS.to_string());
        }
        if state_hooks > self.thresholds.max_state_hooks {
            issues.insert(ISSUE_STATE.to_string());
        }

        FileMetrics {
            path: path.to_path_buf(),
            line_count,
            complexity_score,
            maintainability_index: metrics::maintainability_index(line_count, complexity_score),
            imports,
            exports: metrics::count_exports(content),
            state_hooks,
            category,
            issues,
        }
    }

    /// Reads and measures one inventory entry.
    ///
    /// # Errors
    /// Returns error only when the file cannot be read.
    pub fn collect_entry(
        &self,
        source: &dyn FileSource,
        entry: &SourceEntry,
    ) -> anyhow::Result<(FileMetrics, String)> {
        let content = source.read(entry)?;
        Ok((self.measure(&entry.path, &content, entry.category), content))
    }

    /// Measures every listed entry, deriving component metrics along the way.
    /// Unreadable files are recorded in `skipped` and the walk continues.
    pub fn collect(&self, source: &dyn FileSource, entries: &[SourceEntry]) -> Collection {
        let analyzer = ComponentAnalyzer::new(self.thresholds);
        let mut collection = Collection::default();

        for entry in entries {
            match self.collect_entry(source, entry) {
                Ok((file, content)) => {
                    tracing::debug!(
                        path = %file.path.display(),
                        lines = file.line_count,
                        complexity = file.complexity_score,
                        mi = file.maintainability_index,
                        "measured"
                    );
                    if let Some(component) = analyzer.analyze(&file, &content) {
                        collection.components.push(component);
                    }
                    collection.files.push(file);
                }
                Err(e) => {
                    tracing::warn!(path = %entry.path.display(), error = %e, "skipping unreadable file");
                    collection.skipped.push((entry.path.clone(), e.to_string()));
                }
            }
        }
        collection
    }
}
