// src/executor.rs
//! Hands an `execute` decision to whatever performs the edits.
//!
//! The executor builds one message per selected suggestion, delivers them as a
//! single notification, and marks every selected file in the history before
//! the consumer confirms anything.

use crate::history::RefactorHistory;
use crate::types::{Decision, Priority, Suggestion};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::mpsc::Sender;

/// Event name carried by every notification.
pub const REFACTOR_EVENT: &str = "refactor-suggestions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub message: String,
    pub label: String,
    pub auto_execute: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMeta {
    pub confidence: f64,
    pub reason: String,
    pub total_files: usize,
}

/// The `refactor-suggestions` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactorNotification {
    pub event: String,
    pub suggestions: Vec<ActionRequest>,
    pub metadata: NotificationMeta,
}

/// The single registered consumer of action requests.
pub trait ActionSink {
    /// Delivers one notification.
    ///
    /// # Errors
    /// Returns error if the consumer could not accept it.
    fn deliver(&mut self, notification: &RefactorNotification) -> Result<()>;
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ActionSink for NullSink {
    fn deliver(&mut self, _notification: &RefactorNotification) -> Result<()> {
        Ok(())
    }
}

/// Forwards notifications over an outbound channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<RefactorNotification>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(tx: Sender<RefactorNotification>) -> Self {
        Self { tx }
    }
}

impl ActionSink for ChannelSink {
    fn deliver(&mut self, notification: &RefactorNotification) -> Result<()> {
        self.tx
            .send(notification.clone())
            .map_err(|_| anyhow!("action consumer hung up"))
    }
}

/// What an execution handed off.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub notification: RefactorNotification,
    pub delivered: bool,
}

pub struct RefactoringExecutor;

impl RefactoringExecutor {
    /// `{CRITICAL: }{file} ({lines} lines, {complexity} complexity, {mi} maintainability): {actions}. Preserve behavior; remove now-unused imports.`
    #[must_use]
    pub fn message(suggestion: &Suggestion) -> String {
        let prefix = if suggestion.priority == Priority::Critical {
            "CRITICAL: "
        } else {
            ""
        };
        let actions: Vec<&str> = suggestion
            .actions
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        format!(
            "{prefix}{} ({} lines, {} complexity, {:.0} maintainability): {}. Preserve behavior; remove now-unused imports.",
            suggestion.label(),
            suggestion.current_size,
            suggestion.complexity,
            suggestion.maintainability,
            actions.join("; ")
        )
    }

    #[must_use]
    pub fn build(decision: &Decision) -> RefactorNotification {
        let suggestions = decision
            .selected
            .iter()
            .map(|s| ActionRequest {
                message: Self::message(s),
                label: format!("Refactor {}", s.label()),
                auto_execute: decision.should_execute,
            })
            .collect();

        RefactorNotification {
            event: REFACTOR_EVENT.to_string(),
            suggestions,
            metadata: NotificationMeta {
                confidence: decision.confidence,
                reason: decision.reason.clone(),
                total_files: distinct_files(&decision.selected),
            },
        }
    }

    /// Marks every selected file at `now_ms`, then delivers the notification.
    ///
    /// Returns `None` when the decision is to wait. Delivery failure is logged
    /// and reported through [`Dispatch::delivered`]; the marks stay.
    pub fn execute(
        decision: &Decision,
        history: &mut RefactorHistory,
        now_ms: u64,
        sink: &mut dyn ActionSink,
    ) -> Option<Dispatch> {
        if !decision.should_execute || decision.selected.is_empty() {
            return None;
        }

        let notification = Self::build(decision);
        for s in &decision.selected {
            history.mark(s.file.clone(), now_ms);
        }

        let delivered = match sink.deliver(&notification) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "refactor notification not delivered");
                false
            }
        };
        tracing::info!(
            files = notification.metadata.total_files,
            confidence = decision.confidence,
            delivered,
            "refactor requested"
        );

        Some(Dispatch {
            notification,
            delivered,
        })
    }
}

fn distinct_files(selected: &[Suggestion]) -> usize {
    selected.iter().map(|s| &s.file).collect::<BTreeSet<_>>().len()
}
