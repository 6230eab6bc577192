// src/autofix.rs
//! Per-check remediation dispatch.
//!
//! Each failing outcome is routed to a [`FixStrategy`] keyed by the check
//! name's prefix (the part before `:`). Check families that need human
//! judgement are skipped and logged, as are targets still inside their
//! refactor cooldown. Nothing is retried inside a dispatch; callers that want
//! another round re-run the analysis and dispatch again.

use crate::config::CheckConfig;
use crate::events::{EventKind, EventLogger};
use crate::executor::{ActionRequest, ActionSink, NotificationMeta, RefactorNotification, REFACTOR_EVENT};
use crate::suggest::Cooldown;
use crate::types::CheckOutcome;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A remediation for one family of failing checks.
pub trait FixStrategy {
    /// Attempts a fix for `outcome`.
    ///
    /// # Errors
    /// Returns error if the remediation could not be carried out.
    fn attempt(&self, outcome: &CheckOutcome, sink: &mut dyn ActionSink) -> Result<()>;
}

/// Forwards a targeted refactor request to the action consumer.
#[derive(Debug, Clone)]
pub struct RequestFix {
    instruction: String,
}

impl RequestFix {
    #[must_use]
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }
}

impl FixStrategy for RequestFix {
    fn attempt(&self, outcome: &CheckOutcome, sink: &mut dyn ActionSink) -> Result<()> {
        let target = check_target(&outcome.name).unwrap_or(outcome.name.as_str());
        let notification = RefactorNotification {
            event: REFACTOR_EVENT.to_string(),
            suggestions: vec![ActionRequest {
                message: format!("{target}: {}. {}", outcome.message, self.instruction),
                label: format!("Fix {}", outcome.name),
                auto_execute: true,
            }],
            metadata: NotificationMeta {
                confidence: 100.0,
                reason: format!("failing check: {}", outcome.name),
                total_files: 1,
            },
        };
        sink.deliver(&notification)
    }
}

/// Counters for one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Human-judgement checks that were deliberately left alone.
    pub skipped: usize,
    /// Checks whose target file is still in its refactor cooldown.
    #[serde(default)]
    pub cooling: usize,
    /// Failing checks with no registered strategy.
    pub unhandled: usize,
}

pub struct AutoFixDispatcher<'a> {
    config: &'a CheckConfig,
    strategies: BTreeMap<String, Box<dyn FixStrategy>>,
}

impl<'a> AutoFixDispatcher<'a> {
    /// An empty table.
    #[must_use]
    pub fn new(config: &'a CheckConfig) -> Self {
        Self {
            config,
            strategies: BTreeMap::new(),
        }
    }

    /// The built-in table covering the generated check families.
    #[must_use]
    pub fn with_defaults(config: &'a CheckConfig) -> Self {
        let mut dispatcher = Self::new(config);
        dispatcher.register(
            "Size Limit",
            RequestFix::new("Split it along its responsibilities; preserve behavior."),
        );
        dispatcher.register(
            "Complexity Budget",
            RequestFix::new("Flatten nested branches and extract helpers; preserve behavior."),
        );
        dispatcher.register(
            "Import Fan-in",
            RequestFix::new("Group related imports behind a facade module."),
        );
        dispatcher.register(
            "Error Boundary",
            RequestFix::new("Wrap the component in an error boundary."),
        );
        dispatcher.register(
            "State Management",
            RequestFix::new("Move related state into a custom hook."),
        );
        dispatcher.register(
            "Data Module Size",
            RequestFix::new("Move inline data into a separate fixture file."),
        );
        dispatcher
    }

    pub fn register(&mut self, prefix: impl Into<String>, strategy: impl FixStrategy + 'static) {
        self.strategies.insert(prefix.into(), Box::new(strategy));
    }

    /// Whether the check's family (the name before `:`) carries a
    /// human-judgement marker. The target after `:` is not considered.
    #[must_use]
    pub fn requires_human_judgement(&self, check_name: &str) -> bool {
        let family = strategy_key(check_name);
        self.config
            .human_judgement_markers
            .iter()
            .any(|m| family.contains(m.as_str()))
    }

    /// Walks every failing outcome once.
    pub fn dispatch(
        &self,
        outcomes: &[CheckOutcome],
        sink: &mut dyn ActionSink,
        cooldown: &Cooldown<'_>,
        events: Option<&EventLogger>,
    ) -> FixSummary {
        let mut summary = FixSummary::default();
        let skip = |check: &str, reason: &str| {
            if let Some(log) = events {
                log.log(EventKind::FixSkipped {
                    check: check.to_string(),
                    reason: reason.to_string(),
                });
            }
        };

        for outcome in outcomes.iter().filter(|o| o.failed()) {
            if self.requires_human_judgement(&outcome.name) {
                tracing::warn!(check = %outcome.name, "auto-fix skipped: requires human judgement");
                summary.skipped += 1;
                skip(&outcome.name, "requires human judgement");
                continue;
            }

            if target_file(&outcome.name).is_some_and(|path| cooldown.excludes(path)) {
                tracing::info!(check = %outcome.name, "auto-fix skipped: target in cooldown");
                summary.cooling += 1;
                skip(&outcome.name, "target in cooldown");
                continue;
            }

            let Some(strategy) = self.strategies.get(strategy_key(&outcome.name)) else {
                tracing::debug!(check = %outcome.name, "no fix strategy registered");
                summary.unhandled += 1;
                continue;
            };

            summary.attempted += 1;
            let success = match strategy.attempt(outcome, sink) {
                Ok(()) => {
                    summary.succeeded += 1;
                    true
                }
                Err(e) => {
                    tracing::warn!(check = %outcome.name, error = %e, "auto-fix failed");
                    summary.failed += 1;
                    false
                }
            };
            if let Some(log) = events {
                log.log(EventKind::FixAttempted {
                    check: outcome.name.clone(),
                    success,
                });
            }
        }

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            skipped = summary.skipped,
            cooling = summary.cooling,
            "auto-fix dispatch complete"
        );
        summary
    }
}

fn strategy_key(check_name: &str) -> &str {
    check_name
        .split_once(':')
        .map_or(check_name, |(prefix, _)| prefix)
        .trim()
}

fn check_target(check_name: &str) -> Option<&str> {
    check_name.split_once(':').map(|(_, rest)| rest.trim())
}

/// The file a check is about; component checks name `file#Component`.
fn target_file(check_name: &str) -> Option<&Path> {
    check_target(check_name)
        .map(|target| Path::new(target.split_once('#').map_or(target, |(file, _)| file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ChannelSink, NullSink};
    use crate::history::RefactorHistory;
    use crate::types::CheckStatus;
    use anyhow::bail;
    use std::sync::mpsc;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    fn idle(history: &RefactorHistory) -> Cooldown<'_> {
        Cooldown { history, now_ms: 0, window_ms: DAY_MS }
    }

    fn failing(name: &str) -> CheckOutcome {
        CheckOutcome {
            name: name.into(),
            status: CheckStatus::Fail,
            message: "broken".into(),
            performance_ms: Some(1.0),
            category: "size".into(),
            is_data_related: false,
        }
    }

    struct Refuses;

    impl FixStrategy for Refuses {
        fn attempt(&self, _outcome: &CheckOutcome, _sink: &mut dyn ActionSink) -> Result<()> {
            bail!("cannot fix")
        }
    }

    #[test]
    fn routes_by_prefix_and_forwards_requests() {
        let config = CheckConfig::default();
        let history = RefactorHistory::new();
        let dispatcher = AutoFixDispatcher::with_defaults(&config);
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);

        let outcomes = [failing("Size Limit: src/Grid.tsx")];
        let summary = dispatcher.dispatch(&outcomes, &mut sink, &idle(&history), None);
        assert_eq!(summary.attempted, 1);
        assert_eq!(summary.succeeded, 1);

        let sent = rx.recv().unwrap();
        assert!(sent.suggestions[0].message.starts_with("src/Grid.tsx: broken."));
    }

    #[test]
    fn human_judgement_checks_are_skipped() {
        let config = CheckConfig::default();
        let history = RefactorHistory::new();
        let dispatcher = AutoFixDispatcher::with_defaults(&config);
        let outcomes = vec![
            failing("Maintainability Analysis"),
            failing("Scan Throughput"),
            failing("Dynamic Import Load"),
        ];
        let summary = dispatcher.dispatch(&outcomes, &mut NullSink, &idle(&history), None);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.attempted, 0);
    }

    #[test]
    fn failures_are_counted_not_retried() {
        let config = CheckConfig::default();
        let history = RefactorHistory::new();
        let mut dispatcher = AutoFixDispatcher::new(&config);
        dispatcher.register("Size Limit", Refuses);
        let outcomes = vec![failing("Size Limit: a.ts"), failing("Size Limit: b.ts")];
        let summary = dispatcher.dispatch(&outcomes, &mut NullSink, &idle(&history), None);
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.succeeded, 0);
    }

    #[test]
    fn passing_and_unknown_checks() {
        let config = CheckConfig::default();
        let history = RefactorHistory::new();
        let dispatcher = AutoFixDispatcher::with_defaults(&config);
        let mut passing = failing("Size Limit: ok.ts");
        passing.status = CheckStatus::Pass;
        let outcomes = [passing, failing("Mystery")];
        let summary = dispatcher.dispatch(&outcomes, &mut NullSink, &idle(&history), None);
        assert_eq!(summary.attempted, 0);
        assert_eq!(summary.unhandled, 1);
    }

    #[test]
    fn dispatch_is_recorded_in_event_log() {
        let dir = tempfile::tempdir().unwrap();
        let logger = EventLogger::new(dir.path());
        let config = CheckConfig::default();
        let history = RefactorHistory::new();
        let dispatcher = AutoFixDispatcher::with_defaults(&config);
        let outcomes = vec![failing("Size Limit: a.ts"), failing("Maintainability Analysis")];
        let _ = dispatcher.dispatch(&outcomes, &mut NullSink, &idle(&history), Some(&logger));

        let events = logger.read_all().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].kind, EventKind::FixAttempted { success: true, .. }));
        assert!(matches!(events[1].kind, EventKind::FixSkipped { .. }));
    }

    #[test]
    fn judgement_markers_ignore_the_target_path() {
        let config = CheckConfig::default();
        let history = RefactorHistory::new();
        let dispatcher = AutoFixDispatcher::with_defaults(&config);
        let outcomes = vec![
            failing("Size Limit: src/components/DynamicForm.tsx"),
            failing("Size Limit: src/lib/Loader.ts"),
            failing("Complexity Budget: src/AnalysisPanel.tsx"),
        ];
        let summary = dispatcher.dispatch(&outcomes, &mut NullSink, &idle(&history), None);
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.skipped, 0);
        assert!(!dispatcher.requires_human_judgement("Size Limit: src/ThroughputChart.tsx"));
        assert!(dispatcher.requires_human_judgement("Scan Throughput"));
    }

    #[test]
    fn cooling_targets_are_not_requested_again() {
        let config = CheckConfig::default();
        let mut history = RefactorHistory::new();
        history.mark(Path::new("src/lib/big.ts"), 1_000);
        history.mark(Path::new("src/Grid.tsx"), 1_000);
        let cooldown = Cooldown { history: &history, now_ms: 2_000, window_ms: DAY_MS };

        let dispatcher = AutoFixDispatcher::with_defaults(&config);
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);
        let outcomes = vec![
            failing("Size Limit: src/lib/big.ts"),
            failing("Complexity Budget: src/lib/big.ts"),
            failing("State Management: src/Grid.tsx#Grid"),
            failing("Size Limit: src/lib/other.ts"),
        ];
        let summary = dispatcher.dispatch(&outcomes, &mut sink, &cooldown, None);
        assert_eq!(summary.cooling, 3);
        assert_eq!(summary.attempted, 1);

        let sent: Vec<_> = rx.try_iter().collect();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].suggestions[0].message.starts_with("src/lib/other.ts:"));
    }
}
