// src/history.rs
//! Cooldown bookkeeping: when each file was last handed off for refactoring.
//!
//! This is the only state that survives between passes. It is owned by the
//! engine and mutated only when a file is selected for action.

use crate::error::{CleaverError, Result};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    #[must_use]
    pub fn at(now_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance_ms(&self, delta: u64) {
        self.now.set(self.now.get().saturating_add(delta));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Map of file path to the time it was last marked refactored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefactorHistory {
    entries: BTreeMap<PathBuf, u64>,
}

impl RefactorHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, path: impl Into<PathBuf>, at_ms: u64) {
        self.entries.insert(path.into(), at_ms);
    }

    #[must_use]
    pub fn last_marked(&self, path: &Path) -> Option<u64> {
        self.entries.get(path).copied()
    }

    /// True while `now_ms` is inside `[marked, marked + window_ms)`.
    #[must_use]
    pub fn is_cooling(&self, path: &Path, now_ms: u64, window_ms: u64) -> bool {
        self.last_marked(path)
            .is_some_and(|at| now_ms < at.saturating_add(window_ms))
    }

    /// Drops entries whose window has fully elapsed. Returns how many were removed.
    pub fn prune(&mut self, now_ms: u64, window_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, at| now_ms < at.saturating_add(window_ms));
        before - self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &BTreeMap<PathBuf, u64> {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a history file; a missing file is an empty history.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CleaverError::io(e, path)),
        }
    }

    /// Writes the history as pretty JSON, creating parent directories.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CleaverError::io(e, parent))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| CleaverError::io(e, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    #[test]
    fn cooling_window_is_half_open() {
        let mut history = RefactorHistory::new();
        let path = Path::new("src/App.tsx");
        history.mark(path, 1_000);

        assert!(history.is_cooling(path, 1_000, DAY_MS));
        assert!(history.is_cooling(path, 1_000 + DAY_MS - 1, DAY_MS));
        assert!(!history.is_cooling(path, 1_000 + DAY_MS, DAY_MS));
        assert!(!history.is_cooling(Path::new("src/other.ts"), 1_000, DAY_MS));
    }

    #[test]
    fn remark_moves_window() {
        let mut history = RefactorHistory::new();
        let path = Path::new("a.ts");
        history.mark(path, 0);
        history.mark(path, DAY_MS);
        assert!(history.is_cooling(path, DAY_MS + 10, DAY_MS));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn prune_drops_expired() {
        let mut history = RefactorHistory::new();
        history.mark("old.ts", 0);
        history.mark("new.ts", DAY_MS);
        assert_eq!(history.prune(DAY_MS + 5, DAY_MS), 1);
        assert!(history.last_marked(Path::new("old.ts")).is_none());
        assert!(history.last_marked(Path::new("new.ts")).is_some());
    }

    #[test]
    fn load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = RefactorHistory::load(&dir.path().join("nope.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cleaver").join("history.json");
        let mut history = RefactorHistory::new();
        history.mark("src/App.tsx", 42);
        history.save(&path).unwrap();
        assert_eq!(RefactorHistory::load(&path).unwrap(), history);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();
        assert!(RefactorHistory::load(&path).is_err());
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::at(10);
        let handle = clock.clone();
        handle.advance_ms(5);
        assert_eq!(clock.now_ms(), 15);
    }
}
