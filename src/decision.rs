// src/decision.rs
//! The execute/wait cascade.

use crate::config::DecisionConfig;
use crate::types::{Decision, Priority, Suggestion};
use std::collections::BTreeSet;

pub struct DecisionEngine<'a> {
    config: &'a DecisionConfig,
}

impl<'a> DecisionEngine<'a> {
    #[must_use]
    pub fn new(config: &'a DecisionConfig) -> Self {
        Self { config }
    }

    /// Decides over the full suggestion set. First matching rule wins:
    ///
    /// 1. any critical suggestion
    /// 2. enough suggestions above the urgent score
    /// 3. enough auto-eligible suggestions for a bulk batch
    /// 4. at least one auto-eligible suggestion
    /// 5. otherwise wait
    #[must_use]
    pub fn decide(&self, suggestions: &[Suggestion]) -> Decision {
        let cfg = self.config;
        let critical = suggestions
            .iter()
            .filter(|s| s.priority == Priority::Critical)
            .count();
        let eligible: Vec<&Suggestion> = suggestions
            .iter()
            .filter(|s| s.auto_eligible || s.priority == Priority::Critical)
            .collect();
        let urgent = eligible
            .iter()
            .filter(|s| s.urgency_score > cfg.urgent_score)
            .count();

        let (confidence, reason) = if critical > 0 {
            (
                cfg.critical_confidence,
                format!("{critical} critical refactoring target(s) detected"),
            )
        } else if urgent >= cfg.urgent_count {
            (
                cfg.urgent_confidence,
                format!("{urgent} files exceed urgency {:.0}", cfg.urgent_score),
            )
        } else if eligible.len() >= cfg.bulk_count {
            (
                cfg.bulk_confidence,
                format!("{} files qualify for automatic refactoring", eligible.len()),
            )
        } else if !eligible.is_empty() {
            (
                cfg.single_confidence,
                format!("{} file(s) qualify for automatic refactoring", eligible.len()),
            )
        } else {
            let reason = if suggestions.is_empty() {
                "codebase within thresholds".to_string()
            } else {
                format!("{} suggestion(s), none eligible for automatic refactoring", suggestions.len())
            };
            return Decision::wait(cfg.idle_confidence, reason);
        };

        let selected = select_batch(eligible, cfg.max_batch);
        let estimated_minutes = selected.iter().map(|s| minutes_for(s.priority)).sum();

        Decision {
            should_execute: true,
            confidence: confidence.clamp(0.0, 100.0),
            reason,
            selected,
            estimated_minutes,
        }
    }
}

/// Highest urgency first, one suggestion per file, capped at `max`.
fn select_batch(mut eligible: Vec<&Suggestion>, max: usize) -> Vec<Suggestion> {
    eligible.sort_by(|a, b| {
        b.urgency_score
            .partial_cmp(&a.urgency_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label().cmp(&b.label()))
    });
    let mut seen = BTreeSet::new();
    eligible
        .into_iter()
        .filter(|s| seen.insert(s.file.clone()))
        .take(max)
        .cloned()
        .collect()
}

fn minutes_for(priority: Priority) -> u32 {
    match priority {
        Priority::Critical => 15,
        Priority::High => 10,
        Priority::Medium => 6,
        Priority::Low => 3,
    }
}
