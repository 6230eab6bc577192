// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Structural role of a source file. Drives size thresholds and action text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Component,
    Hook,
    Utility,
    Page,
    Type,
    Unknown,
}

impl FileCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Hook => "hook",
            Self::Utility => "utility",
            Self::Page => "page",
            Self::Type => "type",
            Self::Unknown => "unknown",
        }
    }

    /// Components and pages are the categories that carry structural units.
    #[must_use]
    pub fn has_structure(self) -> bool {
        matches!(self, Self::Component | Self::Page)
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measurements for a single file from one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub line_count: usize,
    pub complexity_score: usize,
    /// Bounded to `[0, 100]`, higher is healthier.
    pub maintainability_index: f64,
    pub imports: usize,
    pub exports: usize,
    pub state_hooks: usize,
    pub category: FileCategory,
    pub issues: BTreeSet<String>,
}

impl FileMetrics {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Estimated structure of a component or page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMetrics {
    pub name: String,
    pub owning_file: PathBuf,
    pub props_count: usize,
    pub state_variable_count: usize,
    pub effect_count: usize,
    pub render_complexity: usize,
    pub has_error_boundary: bool,
    pub is_oversized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A prioritized refactoring proposal for one file or structural unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub file: PathBuf,
    /// Set when the suggestion targets a structural unit rather than the whole file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub category: FileCategory,
    pub current_size: usize,
    pub size_threshold: usize,
    pub complexity: usize,
    pub maintainability: f64,
    pub priority: Priority,
    /// Clamped to `[0, 100]`.
    pub urgency_score: f64,
    pub reason: String,
    pub actions: Vec<String>,
    pub auto_eligible: bool,
    pub estimated_impact: Impact,
}

impl Suggestion {
    /// Human label: `file` or `file#Component`.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.component {
            Some(name) => format!("{}#{name}", self.file.display()),
            None => self.file.display().to_string(),
        }
    }
}

/// The execute/wait verdict for one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub should_execute: bool,
    /// Clamped to `[0, 100]`.
    pub confidence: f64,
    pub reason: String,
    /// At most the configured batch cap (3 by default), highest urgency first.
    pub selected: Vec<Suggestion>,
    pub estimated_minutes: u32,
}

impl Decision {
    /// A do-nothing decision.
    #[must_use]
    pub fn wait(confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            should_execute: false,
            confidence: confidence.clamp(0.0, 100.0),
            reason: reason.into(),
            selected: Vec::new(),
            estimated_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    Skip,
}

impl CheckStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warning => "warning",
            Self::Skip => "skip",
        }
    }
}

/// Result of executing one generated check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_ms: Option<f64>,
    pub category: String,
    pub is_data_related: bool,
}

impl CheckOutcome {
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Warning,
    Fail,
}

impl OverallStatus {
    /// `fail` if anything failed, else `warning` if anything warned, else `pass`.
    #[must_use]
    pub fn from_counts(failed: usize, warnings: usize) -> Self {
        if failed > 0 {
            Self::Fail
        } else if warnings > 0 {
            Self::Warning
        } else {
            Self::Pass
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub skipped: usize,
}

impl CheckCounts {
    #[must_use]
    pub fn tally(outcomes: &[CheckOutcome]) -> Self {
        let mut counts = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.status {
                CheckStatus::Pass => counts.passed += 1,
                CheckStatus::Fail => counts.failed += 1,
                CheckStatus::Warning => counts.warnings += 1,
                CheckStatus::Skip => counts.skipped += 1,
            }
        }
        counts
    }
}

/// Memory observations backing `memory_efficiency`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident_mb: Option<f64>,
    pub window_growth_mb: f64,
    pub leak_suspected: bool,
}

/// Everything one analysis pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub overall: OverallStatus,
    pub counts: CheckCounts,
    pub files_analyzed: usize,
    pub files_skipped: usize,
    pub files: Vec<FileMetrics>,
    pub components: Vec<ComponentMetrics>,
    pub suggestions: Vec<Suggestion>,
    pub decision: Decision,
    pub checks: Vec<CheckOutcome>,
    pub system_efficiency: f64,
    pub memory_efficiency: f64,
    pub codebase_health: f64,
    pub memory: MemoryStats,
    pub duration_ms: u64,
}

impl Report {
    #[must_use]
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| c.failed())
    }

    /// Outcomes tagged as touching data files, for downstream filtering.
    #[must_use]
    pub fn data_checks(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| c.is_data_related)
    }
}
