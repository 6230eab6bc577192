// src/engine.rs
//! The analysis service: one pass is metrics → suggestions → decision →
//! checks → report, single-threaded and in that order.
//!
//! [`HealthEngine::run_analysis`] always returns a [`Report`]. A pass that
//! errors or panics comes back as a degraded report instead.

use crate::analysis::MetricsCollector;
use crate::autofix::{AutoFixDispatcher, FixSummary};
use crate::checks::generate::CheckInputs;
use crate::checks::{self, CheckOrchestrator};
use crate::config::Config;
use crate::decision::DecisionEngine;
use crate::events::{EventKind, EventLogger};
use crate::executor::{ActionSink, NullSink, RefactoringExecutor};
use crate::history::{Clock, RefactorHistory, SystemClock};
use crate::report::{self, MemoryMonitor, MemoryProbe, ProcStatmProbe, ReportAggregator, ReportParts};
use crate::source::FileSource;
use crate::suggest::{Cooldown, SuggestionGenerator};
use crate::types::Report;
use anyhow::{Context, Result};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct HealthEngine {
    config: Config,
    source: Box<dyn FileSource>,
    clock: Box<dyn Clock>,
    sink: Box<dyn ActionSink>,
    history: RefactorHistory,
    history_path: Option<PathBuf>,
    events: Option<EventLogger>,
    memory: MemoryMonitor,
}

impl HealthEngine {
    /// An engine on the system clock, with no action consumer and an empty history.
    #[must_use]
    pub fn new(config: Config, source: Box<dyn FileSource>) -> Self {
        let memory = MemoryMonitor::new(Box::new(ProcStatmProbe), &config.report);
        Self {
            config,
            source,
            clock: Box::new(SystemClock),
            sink: Box::new(NullSink),
            history: RefactorHistory::new(),
            history_path: None,
            events: None,
            memory,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl ActionSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    #[must_use]
    pub fn with_memory_probe(mut self, probe: impl MemoryProbe + 'static) -> Self {
        self.memory = MemoryMonitor::new(Box::new(probe), &self.config.report);
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: RefactorHistory) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: EventLogger) -> Self {
        self.events = Some(events);
        self
    }

    /// Loads history from `path` and saves it back after every mutation.
    /// Entries whose cooldown has already elapsed are dropped on load.
    ///
    /// # Errors
    /// Returns error if an existing history file cannot be read or parsed.
    pub fn persist_history_at(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut history = RefactorHistory::load(&path)
            .with_context(|| format!("loading history from {}", path.display()))?;
        let pruned = history.prune(self.clock.now_ms(), self.config.decision.cooldown_ms());
        if pruned > 0 {
            tracing::debug!(pruned, "dropped expired history entries");
        }
        self.history = history;
        self.history_path = Some(path);
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn history(&self) -> &RefactorHistory {
        &self.history
    }

    /// Runs one full pass.
    pub fn run_analysis(&mut self) -> Report {
        let started = Instant::now();
        let now = self.clock.now_ms();

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run_pass(now, started)));
        let message = match result {
            Ok(Ok(report)) => return report,
            Ok(Err(e)) => format!("analysis pass failed: {e:#}"),
            Err(payload) => format!("analysis pass panicked: {}", checks::panic_message(&*payload)),
        };

        tracing::error!(%message, "returning degraded report");
        let report = report::degraded(now, &message, elapsed_ms(started));
        self.record_pass(&report);
        report
    }

    fn run_pass(&mut self, now: u64, started: Instant) -> Result<Report> {
        let entries = self.source.list().context("listing source inventory")?;
        tracing::debug!(count = entries.len(), "inventory listed");

        let scan_start = Instant::now();
        let collection = MetricsCollector::new(&self.config.thresholds).collect(self.source.as_ref(), &entries);
        let scan_ms = scan_start.elapsed().as_secs_f64() * 1000.0;

        let cooldown = Cooldown {
            history: &self.history,
            now_ms: now,
            window_ms: self.config.decision.cooldown_ms(),
        };
        let suggestions = SuggestionGenerator::new(&self.config.thresholds, &self.config.scoring)
            .generate(&collection.files, &collection.components, &cooldown);
        let decision = DecisionEngine::new(&self.config.decision).decide(&suggestions);
        tracing::info!(
            execute = decision.should_execute,
            confidence = decision.confidence,
            reason = %decision.reason,
            "decision"
        );

        if self.config.decision.auto_execute {
            let dispatch = RefactoringExecutor::execute(&decision, &mut self.history, now, self.sink.as_mut());
            if dispatch.is_some() {
                for s in &decision.selected {
                    self.log_event(EventKind::FileMarked {
                        path: s.file.display().to_string(),
                    });
                }
                self.save_history();
            }
        }

        let inputs = CheckInputs {
            files: &collection.files,
            components: &collection.components,
            skipped: collection.skipped.len(),
            scan_ms,
        };
        let battery = checks::generate(&inputs, &self.config.thresholds, &self.config.checks);
        let outcomes = CheckOrchestrator::new(&self.config.checks).run(battery, |name, idx, total| {
            tracing::debug!(check = name, "[{idx}/{total}]");
        });

        let memory = self.memory.sample();
        let report = ReportAggregator::new(&self.config.report, &self.config.thresholds, &self.config.checks)
            .assemble(ReportParts {
                timestamp: now,
                files_skipped: collection.skipped.len(),
                files: collection.files,
                components: collection.components,
                suggestions,
                decision,
                checks: outcomes,
                memory,
                duration_ms: elapsed_ms(started),
            });

        tracing::info!(
            overall = report.overall.label(),
            files = report.files_analyzed,
            suggestions = report.suggestions.len(),
            failed = report.counts.failed,
            "pass complete"
        );
        self.record_pass(&report);
        Ok(report)
    }

    /// Marks `path` as refactored now.
    pub fn mark_refactored(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.history.mark(path, self.clock.now_ms());
        self.log_event(EventKind::FileMarked {
            path: path.display().to_string(),
        });
        self.save_history();
    }

    /// Dispatches fixes for every failing outcome in `report`, once.
    /// Targets still inside their refactor cooldown are left alone.
    pub fn auto_fix(&mut self, report: &Report) -> FixSummary {
        let cooldown = Cooldown {
            history: &self.history,
            now_ms: self.clock.now_ms(),
            window_ms: self.config.decision.cooldown_ms(),
        };
        AutoFixDispatcher::with_defaults(&self.config.checks).dispatch(
            &report.checks,
            self.sink.as_mut(),
            &cooldown,
            self.events.as_ref(),
        )
    }

    /// One fix dispatch followed by exactly one fresh pass.
    pub fn fix_and_recheck(&mut self, report: &Report) -> (FixSummary, Report) {
        let summary = self.auto_fix(report);
        let recheck = self.run_analysis();
        (summary, recheck)
    }

    fn record_pass(&self, report: &Report) {
        self.log_event(EventKind::PassCompleted {
            overall: report.overall.label().to_string(),
            files: report.files_analyzed,
            suggestions: report.suggestions.len(),
            should_execute: report.decision.should_execute,
        });
    }

    fn log_event(&self, kind: EventKind) {
        if let Some(events) = &self.events {
            events.log(kind);
        }
    }

    fn save_history(&self) {
        let Some(path) = &self.history_path else {
            return;
        };
        if let Err(e) = self.history.save(path) {
            tracing::warn!(path = %path.display(), error = %e, "history not persisted");
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
