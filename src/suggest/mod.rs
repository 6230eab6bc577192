// src/suggest/mod.rs
//! Turns metrics into prioritized refactoring suggestions.

pub mod actions;
pub mod scoring;

use crate::config::{ComponentScoring, ScoringConfig, ThresholdConfig};
use crate::history::RefactorHistory;
use crate::types::{ComponentMetrics, FileMetrics, Suggestion};
use scoring::ScoreInput;
use std::fmt::Write;

/// Cooldown view used to keep recently refactored files out of a pass.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown<'a> {
    pub history: &'a RefactorHistory,
    pub now_ms: u64,
    pub window_ms: u64,
}

impl Cooldown<'_> {
    #[must_use]
    pub fn excludes(&self, path: &std::path::Path) -> bool {
        self.history.is_cooling(path, self.now_ms, self.window_ms)
    }
}

pub struct SuggestionGenerator<'a> {
    thresholds: &'a ThresholdConfig,
    scoring: &'a ScoringConfig,
}

impl<'a> SuggestionGenerator<'a> {
    #[must_use]
    pub fn new(thresholds: &'a ThresholdConfig, scoring: &'a ScoringConfig) -> Self {
        Self { thresholds, scoring }
    }

    /// Scores every file and structural unit not inside its cooldown window.
    ///
    /// Output is ordered by urgency, highest first, ties by label.
    #[must_use]
    pub fn generate(
        &self,
        files: &[FileMetrics],
        components: &[ComponentMetrics],
        cooldown: &Cooldown<'_>,
    ) -> Vec<Suggestion> {
        let mut out = Vec::new();

        for file in files {
            if cooldown.excludes(&file.path) {
                tracing::debug!(path = %file.path.display(), "in cooldown, not scored");
                continue;
            }
            let component = components.iter().find(|c| c.owning_file == file.path);
            if let Some(s) = self.for_file(file, component) {
                out.push(s);
            }
        }

        for component in components {
            if cooldown.excludes(&component.owning_file) {
                continue;
            }
            let Some(file) = files.iter().find(|f| f.path == component.owning_file) else {
                continue;
            };
            if let Some(s) = self.for_component(component, file) {
                out.push(s);
            }
        }

        out.sort_by(|a, b| {
            b.urgency_score
                .partial_cmp(&a.urgency_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.label().cmp(&b.label()))
        });
        out
    }

    /// Whole-file suggestion, or `None` for a clean file.
    #[must_use]
    pub fn for_file(
        &self,
        file: &FileMetrics,
        component: Option<&ComponentMetrics>,
    ) -> Option<Suggestion> {
        let threshold = self.thresholds.for_category(file.category);
        if file.line_count <= threshold
            && file.complexity_score <= self.thresholds.clean_complexity
            && file.is_clean()
        {
            return None;
        }

        let input = ScoreInput::from_file(file, threshold);
        let urgency = scoring::file_urgency(&input, self.scoring);
        let priority = scoring::priority(urgency, &input, self.scoring);

        Some(Suggestion {
            file: file.path.clone(),
            component: None,
            category: file.category,
            current_size: file.line_count,
            size_threshold: threshold,
            complexity: file.complexity_score,
            maintainability: file.maintainability_index,
            priority,
            urgency_score: urgency,
            reason: file_reason(file, threshold),
            actions: actions::file_actions(file, component, self.scoring.max_actions),
            auto_eligible: scoring::auto_eligible(priority, urgency, &input, self.scoring),
            estimated_impact: scoring::impact(urgency, self.scoring),
        })
    }

    /// Structural-unit suggestion, gated so only high-value units surface.
    #[must_use]
    pub fn for_component(
        &self,
        component: &ComponentMetrics,
        file: &FileMetrics,
    ) -> Option<Suggestion> {
        let urgency = scoring::component_urgency(component, &self.scoring.component);
        if urgency < self.scoring.component_gate {
            return None;
        }

        let threshold = self.thresholds.for_category(file.category);
        let findings = component_findings(component, &self.scoring.component);
        let input = ScoreInput {
            issue_count: findings.len(),
            ..ScoreInput::from_file(file, threshold)
        };
        let priority = scoring::priority(urgency, &input, self.scoring);

        Some(Suggestion {
            file: file.path.clone(),
            component: Some(component.name.clone()),
            category: file.category,
            current_size: file.line_count,
            size_threshold: threshold,
            complexity: file.complexity_score,
            maintainability: file.maintainability_index,
            priority,
            urgency_score: urgency,
            reason: format!("{} has {}", component.name, findings.join(", ")),
            actions: actions::component_actions(component, self.scoring.max_actions),
            auto_eligible: scoring::auto_eligible(priority, urgency, &input, self.scoring),
            estimated_impact: scoring::impact(urgency, self.scoring),
        })
    }
}

fn file_reason(file: &FileMetrics, threshold: usize) -> String {
    let mut reason = format!(
        "{} lines (threshold {threshold}), complexity {}, maintainability {:.0}",
        file.line_count, file.complexity_score, file.maintainability_index
    );
    if !file.issues.is_empty() {
        let issues: Vec<&str> = file.issues.iter().map(String::as_str).collect();
        let _ = write!(reason, "; issues: {}", issues.join(", "));
    }
    reason
}

fn component_findings(c: &ComponentMetrics, cfg: &ComponentScoring) -> Vec<String> {
    let mut findings = Vec::new();
    if c.render_complexity > cfg.render_finding {
        findings.push(format!("{} render branches", c.render_complexity));
    }
    if c.state_variable_count > cfg.state_finding {
        findings.push(format!("{} state variables", c.state_variable_count));
    }
    if c.props_count > cfg.props_finding {
        findings.push(format!("{} props", c.props_count));
    }
    if c.effect_count > cfg.effect_finding {
        findings.push(format!("{} effects", c.effect_count));
    }
    if !c.has_error_boundary {
        findings.push("no error boundary".to_string());
    }
    if findings.is_empty() {
        findings.push("a dense structure".to_string());
    }
    findings
}
