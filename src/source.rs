// src/source.rs
//! File inventory providers.
//!
//! The engine never walks the disk itself; it asks a [`FileSource`] for the
//! inventory and then reads each entry. Listing and reading are separate so a
//! single unreadable file can be dropped from a pass without losing the rest.

use crate::config::{SourceConfig, PRUNE_DIRS};
use crate::file_class;
use crate::types::FileCategory;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file known to a source, before its content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: PathBuf,
    pub category: FileCategory,
}

/// Supplies `(path, content)` pairs for analysis.
pub trait FileSource {
    /// Lists every file in the inventory, in a stable order.
    ///
    /// # Errors
    /// Returns error if the inventory itself cannot be enumerated.
    fn list(&self) -> Result<Vec<SourceEntry>>;

    /// Reads the content of one listed file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read.
    fn read(&self, entry: &SourceEntry) -> Result<String>;
}

/// Walks a directory tree on disk.
pub struct FsSource {
    root: PathBuf,
    extensions: Vec<String>,
    exclude: Vec<Regex>,
}

impl FsSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = SourceConfig::default();
        Self {
            root: root.into(),
            extensions: defaults.extensions,
            exclude: Vec::new(),
        }
    }

    /// Builds a source from the `[source]` config section.
    ///
    /// # Errors
    /// Returns error if an exclude pattern is not a valid regex.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid exclude pattern `{p}`")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            root: PathBuf::from(&config.root),
            extensions: config.extensions.clone(),
            exclude,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn wants(&self, rel: &Path) -> bool {
        let ext = rel.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }
        let normalized = normalize_path(rel);
        !self.exclude.iter().any(|re| re.is_match(&normalized))
    }
}

impl FileSource for FsSource {
    fn list(&self) -> Result<Vec<SourceEntry>> {
        if !self.root.is_dir() {
            return Err(anyhow!("source root {} is not a directory", self.root.display()));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !should_prune(&e.file_name().to_string_lossy()));

        let mut entries = Vec::new();
        let mut errors = 0usize;
        for item in walker {
            let Ok(entry) = item else {
                errors += 1;
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            if self.wants(rel) {
                entries.push(SourceEntry {
                    path: rel.to_path_buf(),
                    category: file_class::classify(rel),
                });
            }
        }
        if errors > 0 {
            tracing::warn!(errors, root = %self.root.display(), "errors during file walk");
        }
        Ok(entries)
    }

    fn read(&self, entry: &SourceEntry) -> Result<String> {
        let full = self.root.join(&entry.path);
        fs::read_to_string(&full).with_context(|| format!("reading {}", full.display()))
    }
}

/// An in-memory inventory, used by hosts that already hold the content.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, Option<String>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file; its category is derived from the path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds a listed file whose read always fails.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), None);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), Some(content.into()));
    }

    pub fn remove(&mut self, path: &Path) {
        self.files.remove(path);
    }
}

impl FileSource for MemorySource {
    fn list(&self) -> Result<Vec<SourceEntry>> {
        Ok(self
            .files
            .keys()
            .map(|path| SourceEntry {
                path: path.clone(),
                category: file_class::classify(path),
            })
            .collect())
    }

    fn read(&self, entry: &SourceEntry) -> Result<String> {
        match self.files.get(&entry.path) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(anyhow!("{} is unreadable", entry.path.display())),
            None => Err(anyhow!("{} is not in the inventory", entry.path.display())),
        }
    }
}

fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_lists_sorted_with_categories() {
        let source = MemorySource::new()
            .with_file("src/b.ts", "export const b = 1;")
            .with_file("src/App.tsx", "export default function App() {}");
        let entries = source.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, PathBuf::from("src/App.tsx"));
        assert_eq!(entries[0].category, FileCategory::Component);
        assert_eq!(entries[1].category, FileCategory::Utility);
    }

    #[test]
    fn unreadable_entry_errors_on_read_only() {
        let source = MemorySource::new().with_unreadable("src/gone.ts");
        let entries = source.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(source.read(&entries[0]).is_err());
    }

    #[test]
    fn fs_source_prunes_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/components/Nav.tsx"), "export function Nav() {}").unwrap();
        fs::write(root.join("src/notes.md"), "# notes").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "module.exports = 1;").unwrap();

        let source = FsSource::new(root);
        let entries = source.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("src/components/Nav.tsx"));
        assert!(source.read(&entries[0]).unwrap().contains("Nav"));
    }

    #[test]
    fn fs_source_honours_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/generated")).unwrap();
        fs::write(root.join("src/generated/api.ts"), "export {}").unwrap();
        fs::write(root.join("src/main.ts"), "export {}").unwrap();

        let config = SourceConfig {
            root: root.display().to_string(),
            exclude: vec!["^src/generated/".into()],
            ..SourceConfig::default()
        };
        let source = FsSource::from_config(&config).unwrap();
        let entries = source.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("src/main.ts"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let source = FsSource::new("/definitely/not/a/dir");
        assert!(source.list().is_err());
    }
}
