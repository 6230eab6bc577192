// src/suggest/scoring.rs
//! Urgency scoring, priority bands and auto-eligibility.

use crate::config::{ComponentScoring, ScoringConfig};
use crate::types::{ComponentMetrics, FileCategory, FileMetrics, Impact, Priority};

/// Inputs the priority and eligibility rules look at.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput {
    pub category: FileCategory,
    pub lines: usize,
    pub threshold: usize,
    pub complexity: usize,
    pub maintainability: f64,
    pub issue_count: usize,
}

impl ScoreInput {
    #[must_use]
    pub fn from_file(file: &FileMetrics, threshold: usize) -> Self {
        Self {
            category: file.category,
            lines: file.line_count,
            threshold,
            complexity: file.complexity_score,
            maintainability: file.maintainability_index,
            issue_count: file.issues.len(),
        }
    }
}

/// Size, complexity, maintainability and issue factors summed and clamped to `[0, 100]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn file_urgency(input: &ScoreInput, cfg: &ScoringConfig) -> f64 {
    let threshold = input.threshold.max(1) as f64;
    let size = (cfg.size_weight * input.lines as f64 / threshold).min(cfg.size_cap);
    let complexity = (cfg.complexity_weight * input.complexity as f64).min(cfg.complexity_cap);
    let maintain = ((100.0 - input.maintainability) * cfg.maintainability_weight).max(0.0);
    let issues = input.issue_count as f64 * cfg.issue_weight;
    (size + complexity + maintain + issues).clamp(0.0, 100.0)
}

/// Weighted structural score for a component. With default weights: render
/// 0–30, state 0–25, props 0–20, effects 0–15, plus 10 without an error
/// boundary.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn component_urgency(component: &ComponentMetrics, cfg: &ComponentScoring) -> f64 {
    let factor = |count: usize, weight: f64, cap: f64| (count as f64 * weight).min(cap);
    let render = factor(component.render_complexity, cfg.render_weight, cfg.render_cap);
    let state = factor(component.state_variable_count, cfg.state_weight, cfg.state_cap);
    let props = factor(component.props_count, cfg.props_weight, cfg.props_cap);
    let effects = factor(component.effect_count, cfg.effect_weight, cfg.effect_cap);
    let boundary = if component.has_error_boundary { 0.0 } else { cfg.boundary_penalty };
    (render + state + props + effects + boundary).clamp(0.0, 100.0)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn priority(urgency: f64, input: &ScoreInput, cfg: &ScoringConfig) -> Priority {
    let lines = input.lines as f64;
    let threshold = input.threshold as f64;
    if urgency > cfg.critical_band || input.issue_count >= cfg.critical_issue_count {
        Priority::Critical
    } else if urgency > cfg.high_band || lines > 2.0 * threshold {
        Priority::High
    } else if urgency > cfg.medium_band || lines > 1.5 * threshold {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Whether a suggestion may join an automatically executed batch.
///
/// Cooldown is not considered here; cooling files never reach scoring.
#[must_use]
pub fn auto_eligible(
    priority: Priority,
    urgency: f64,
    input: &ScoreInput,
    cfg: &ScoringConfig,
) -> bool {
    priority == Priority::Critical
        || (priority == Priority::High && urgency > cfg.eligible_high_urgency)
        || input.issue_count >= cfg.eligible_issue_count
        || input.maintainability < cfg.eligible_min_maintainability
        || category_override(input, cfg)
}

fn category_override(input: &ScoreInput, cfg: &ScoringConfig) -> bool {
    match input.category {
        FileCategory::Component => input.lines > cfg.component_override_lines,
        FileCategory::Utility => input.complexity > cfg.utility_override_complexity,
        FileCategory::Page => input.lines > cfg.page_override_lines,
        FileCategory::Hook | FileCategory::Type | FileCategory::Unknown => false,
    }
}

#[must_use]
pub fn impact(urgency: f64, cfg: &ScoringConfig) -> Impact {
    if urgency > cfg.high_band {
        Impact::High
    } else if urgency > cfg.medium_band {
        Impact::Medium
    } else {
        Impact::Low
    }
}
