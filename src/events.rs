// src/events.rs
//! Machine-readable event logging for audit trails.
//!
//! Events are appended to `.cleaver/events.jsonl`.

use crate::executor::{ActionSink, RefactorNotification};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PassCompleted {
        overall: String,
        files: usize,
        suggestions: usize,
        should_execute: bool,
    },
    RefactorRequested {
        notification: RefactorNotification,
    },
    FileMarked {
        path: String,
    },
    FixAttempted {
        check: String,
        success: bool,
    },
    FixSkipped {
        check: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaverEvent {
    pub timestamp: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub struct EventLogger {
    log_path: PathBuf,
}

impl EventLogger {
    #[must_use]
    pub fn new(repo_root: &Path) -> Self {
        let log_path = repo_root.join(".cleaver").join("events.jsonl");
        Self { log_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, kind: EventKind) {
        // Logging is best-effort. We swallow errors to avoid crashing main flow.
        if let Err(e) = self.try_log(kind) {
            tracing::warn!(path = %self.log_path.display(), error = %e, "event not recorded");
        }
    }

    /// Appends one event.
    ///
    /// # Errors
    /// Returns error if serialization or the append fails.
    pub fn try_log(&self, kind: EventKind) -> Result<()> {
        let json = Self::serialize_event(kind)?;
        self.append_to_file(&json)
    }

    /// Reads every recorded event back, skipping malformed lines.
    ///
    /// # Errors
    /// Returns error if the log exists but cannot be read.
    pub fn read_all(&self) -> Result<Vec<CleaverEvent>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.log_path)?;
        Ok(content
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }

    fn serialize_event(kind: EventKind) -> Result<String> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let event = CleaverEvent { timestamp, kind };
        Ok(serde_json::to_string(&event)?)
    }

    fn append_to_file(&self, line: &str) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl ActionSink for EventLogger {
    fn deliver(&mut self, notification: &RefactorNotification) -> Result<()> {
        self.try_log(EventKind::RefactorRequested {
            notification: notification.clone(),
        })
    }
}
