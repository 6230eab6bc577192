// src/checks/mod.rs
//! Priority-ordered, fault-isolated check execution.
//!
//! Checks run one at a time: every high-priority check, then medium, then
//! low, keeping generation order inside a tier. A check that errors or panics
//! becomes a `fail` outcome and the batch carries on.

pub mod generate;

pub use generate::generate;

use crate::config::CheckConfig;
use crate::types::{CheckOutcome, CheckStatus};
use anyhow::Result;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Execution tier. Declared order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckPriority {
    High,
    Medium,
    Low,
}

/// What a check body reports when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckVerdict {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckVerdict {
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Pass, message: message.into() }
    }

    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Warning, message: message.into() }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Fail, message: message.into() }
    }

    #[must_use]
    pub fn skip(message: impl Into<String>) -> Self {
        Self { status: CheckStatus::Skip, message: message.into() }
    }
}

type CheckBody = Box<dyn Fn() -> Result<CheckVerdict>>;

/// A named, prioritized unit of verification.
pub struct Check {
    pub name: String,
    pub category: String,
    pub priority: CheckPriority,
    body: CheckBody,
}

impl Check {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        priority: CheckPriority,
        body: impl Fn() -> Result<CheckVerdict> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            priority,
            body: Box::new(body),
        }
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

pub struct CheckOrchestrator<'a> {
    config: &'a CheckConfig,
}

impl<'a> CheckOrchestrator<'a> {
    #[must_use]
    pub fn new(config: &'a CheckConfig) -> Self {
        Self { config }
    }

    /// Runs every check in priority order and returns one outcome per check.
    ///
    /// The `on_check` callback is invoked before each check executes.
    pub fn run<F>(&self, mut checks: Vec<Check>, mut on_check: F) -> Vec<CheckOutcome>
    where
        F: FnMut(&str, usize, usize),
    {
        // Stable: generation order survives inside a tier.
        checks.sort_by_key(|c| c.priority);
        let total = checks.len();

        checks
            .iter()
            .enumerate()
            .map(|(idx, check)| {
                on_check(&check.name, idx + 1, total);
                self.run_single(check)
            })
            .collect()
    }

    fn run_single(&self, check: &Check) -> CheckOutcome {
        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| (check.body)()));
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        let verdict = match result {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(e)) => CheckVerdict::fail(format!("check errored: {e:#}")),
            Err(payload) => CheckVerdict::fail(format!("check panicked: {}", panic_message(&*payload))),
        };

        if verdict.status == CheckStatus::Fail {
            tracing::debug!(check = %check.name, message = %verdict.message, "check failed");
        }

        CheckOutcome {
            is_data_related: self.is_data_related(&check.name),
            name: check.name.clone(),
            status: verdict.status,
            message: verdict.message,
            performance_ms: Some(elapsed),
            category: check.category.clone(),
        }
    }

    /// Keyword match on the check name, case-insensitive.
    #[must_use]
    pub fn is_data_related(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        self.config
            .data_keywords
            .iter()
            .any(|kw| lower.contains(&kw.to_ascii_lowercase()))
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
