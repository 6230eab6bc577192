use serde::{Deserialize, Serialize};

use crate::types::FileCategory;

/// Per-category size limits and issue-detection cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_component_lines")]
    pub component: usize,
    #[serde(default = "default_page_lines")]
    pub page: usize,
    #[serde(default = "default_hook_lines")]
    pub hook: usize,
    #[serde(default = "default_utility_lines")]
    pub utility: usize,
    #[serde(default = "default_type_lines")]
    pub types: usize,
    #[serde(default = "default_unknown_lines")]
    pub unknown: usize,

    /// Any file above this is flagged "file too large" regardless of category.
    #[serde(default = "default_large_file")]
    pub large_file_lines: usize,
    #[serde(default = "default_complexity_issue")]
    pub complexity_issue: usize,
    #[serde(default = "default_max_imports")]
    pub max_imports: usize,
    #[serde(default = "default_max_state_hooks")]
    pub max_state_hooks: usize,
    /// Files at or under this complexity (and size, with no issues) are clean.
    #[serde(default = "default_clean_complexity")]
    pub clean_complexity: usize,
}

impl ThresholdConfig {
    /// Size threshold for a file category.
    #[must_use]
    pub fn for_category(&self, category: FileCategory) -> usize {
        match category {
            FileCategory::Component => self.component,
            FileCategory::Page => self.page,
            FileCategory::Hook => self.hook,
            FileCategory::Utility => self.utility,
            FileCategory::Type => self.types,
            FileCategory::Unknown => self.unknown,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            component: default_component_lines(),
            page: default_page_lines(),
            hook: default_hook_lines(),
            utility: default_utility_lines(),
            types: default_type_lines(),
            unknown: default_unknown_lines(),
            large_file_lines: default_large_file(),
            complexity_issue: default_complexity_issue(),
            max_imports: default_max_imports(),
            max_state_hooks: default_max_state_hooks(),
            clean_complexity: default_clean_complexity(),
        }
    }
}

const fn default_component_lines() -> usize { 200 }
const fn default_page_lines() -> usize { 300 }
const fn default_hook_lines() -> usize { 150 }
const fn default_utility_lines() -> usize { 250 }
const fn default_type_lines() -> usize { 100 }
const fn default_unknown_lines() -> usize { 200 }
const fn default_large_file() -> usize { 300 }
const fn default_complexity_issue() -> usize { 20 }
const fn default_max_imports() -> usize { 15 }
const fn default_max_state_hooks() -> usize { 4 }
const fn default_clean_complexity() -> usize { 20 }

/// Urgency weights, priority bands and auto-eligibility rules.
///
/// These are empirical and open to tuning; nothing here is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_size_weight")]
    pub size_weight: f64,
    #[serde(default = "default_size_cap")]
    pub size_cap: f64,
    #[serde(default = "default_complexity_weight")]
    pub complexity_weight: f64,
    #[serde(default = "default_complexity_cap")]
    pub complexity_cap: f64,
    #[serde(default = "default_maintainability_weight")]
    pub maintainability_weight: f64,
    #[serde(default = "default_issue_weight")]
    pub issue_weight: f64,

    #[serde(default = "default_critical_band")]
    pub critical_band: f64,
    #[serde(default = "default_high_band")]
    pub high_band: f64,
    #[serde(default = "default_medium_band")]
    pub medium_band: f64,
    #[serde(default = "default_critical_issue_count")]
    pub critical_issue_count: usize,

    #[serde(default = "default_eligible_issue_count")]
    pub eligible_issue_count: usize,
    #[serde(default = "default_eligible_high_urgency")]
    pub eligible_high_urgency: f64,
    #[serde(default = "default_eligible_min_maintainability")]
    pub eligible_min_maintainability: f64,
    #[serde(default = "default_component_override_lines")]
    pub component_override_lines: usize,
    #[serde(default = "default_utility_override_complexity")]
    pub utility_override_complexity: usize,
    #[serde(default = "default_page_override_lines")]
    pub page_override_lines: usize,

    /// Structural-unit suggestions below this urgency are dropped.
    #[serde(default = "default_component_gate")]
    pub component_gate: f64,
    #[serde(default = "default_max_actions")]
    pub max_actions: usize,

    #[serde(default)]
    pub component: ComponentScoring,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            size_weight: default_size_weight(),
            size_cap: default_size_cap(),
            complexity_weight: default_complexity_weight(),
            complexity_cap: default_complexity_cap(),
            maintainability_weight: default_maintainability_weight(),
            issue_weight: default_issue_weight(),
            critical_band: default_critical_band(),
            high_band: default_high_band(),
            medium_band: default_medium_band(),
            critical_issue_count: default_critical_issue_count(),
            eligible_issue_count: default_eligible_issue_count(),
            eligible_high_urgency: default_eligible_high_urgency(),
            eligible_min_maintainability: default_eligible_min_maintainability(),
            component_override_lines: default_component_override_lines(),
            utility_override_complexity: default_utility_override_complexity(),
            page_override_lines: default_page_override_lines(),
            component_gate: default_component_gate(),
            max_actions: default_max_actions(),
            component: ComponentScoring::default(),
        }
    }
}

const fn default_size_weight() -> f64 { 20.0 }
const fn default_size_cap() -> f64 { 30.0 }
const fn default_complexity_weight() -> f64 { 1.25 }
const fn default_complexity_cap() -> f64 { 25.0 }
const fn default_maintainability_weight() -> f64 { 0.25 }
const fn default_issue_weight() -> f64 { 5.0 }
const fn default_critical_band() -> f64 { 85.0 }
const fn default_high_band() -> f64 { 70.0 }
const fn default_medium_band() -> f64 { 50.0 }
const fn default_critical_issue_count() -> usize { 4 }
const fn default_eligible_issue_count() -> usize { 3 }
const fn default_eligible_high_urgency() -> f64 { 75.0 }
const fn default_eligible_min_maintainability() -> f64 { 25.0 }
const fn default_component_override_lines() -> usize { 300 }
const fn default_utility_override_complexity() -> usize { 25 }
const fn default_page_override_lines() -> usize { 400 }
const fn default_component_gate() -> f64 { 50.0 }
const fn default_max_actions() -> usize { 4 }

/// Structural-unit weights (`[scoring.component]`). Each factor is
/// `count * weight`, capped; the `*_finding` values are the counts above
/// which a factor is named in the suggestion's reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScoring {
    #[serde(default = "default_render_weight")]
    pub render_weight: f64,
    #[serde(default = "default_render_cap")]
    pub render_cap: f64,
    #[serde(default = "default_state_weight")]
    pub state_weight: f64,
    #[serde(default = "default_state_cap")]
    pub state_cap: f64,
    #[serde(default = "default_props_weight")]
    pub props_weight: f64,
    #[serde(default = "default_props_cap")]
    pub props_cap: f64,
    #[serde(default = "default_effect_weight")]
    pub effect_weight: f64,
    #[serde(default = "default_effect_cap")]
    pub effect_cap: f64,
    /// Added when the unit has no error boundary.
    #[serde(default = "default_boundary_penalty")]
    pub boundary_penalty: f64,

    #[serde(default = "default_render_finding")]
    pub render_finding: usize,
    #[serde(default = "default_state_finding")]
    pub state_finding: usize,
    #[serde(default = "default_props_finding")]
    pub props_finding: usize,
    #[serde(default = "default_effect_finding")]
    pub effect_finding: usize,
}

impl Default for ComponentScoring {
    fn default() -> Self {
        Self {
            render_weight: default_render_weight(),
            render_cap: default_render_cap(),
            state_weight: default_state_weight(),
            state_cap: default_state_cap(),
            props_weight: default_props_weight(),
            props_cap: default_props_cap(),
            effect_weight: default_effect_weight(),
            effect_cap: default_effect_cap(),
            boundary_penalty: default_boundary_penalty(),
            render_finding: default_render_finding(),
            state_finding: default_state_finding(),
            props_finding: default_props_finding(),
            effect_finding: default_effect_finding(),
        }
    }
}

const fn default_render_weight() -> f64 { 3.0 }
const fn default_render_cap() -> f64 { 30.0 }
const fn default_state_weight() -> f64 { 5.0 }
const fn default_state_cap() -> f64 { 25.0 }
const fn default_props_weight() -> f64 { 2.0 }
const fn default_props_cap() -> f64 { 20.0 }
const fn default_effect_weight() -> f64 { 5.0 }
const fn default_effect_cap() -> f64 { 15.0 }
const fn default_boundary_penalty() -> f64 { 10.0 }
const fn default_render_finding() -> usize { 5 }
const fn default_state_finding() -> usize { 3 }
const fn default_props_finding() -> usize { 7 }
const fn default_effect_finding() -> usize { 2 }

/// Decision cascade confidences, batch cap and cooldown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    #[serde(default = "default_critical_confidence")]
    pub critical_confidence: f64,
    #[serde(default = "default_urgent_confidence")]
    pub urgent_confidence: f64,
    #[serde(default = "default_bulk_confidence")]
    pub bulk_confidence: f64,
    #[serde(default = "default_single_confidence")]
    pub single_confidence: f64,
    #[serde(default = "default_idle_confidence")]
    pub idle_confidence: f64,

    #[serde(default = "default_urgent_score")]
    pub urgent_score: f64,
    #[serde(default = "default_urgent_count")]
    pub urgent_count: usize,
    #[serde(default = "default_bulk_count")]
    pub bulk_count: usize,
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,

    #[serde(default = "default_cooldown_hours")]
    pub cooldown_hours: u64,
    /// Emit action requests automatically when the decision says execute.
    #[serde(default = "default_true")]
    pub auto_execute: bool,
}

impl DecisionConfig {
    #[must_use]
    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_hours.saturating_mul(60 * 60 * 1000)
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            critical_confidence: default_critical_confidence(),
            urgent_confidence: default_urgent_confidence(),
            bulk_confidence: default_bulk_confidence(),
            single_confidence: default_single_confidence(),
            idle_confidence: default_idle_confidence(),
            urgent_score: default_urgent_score(),
            urgent_count: default_urgent_count(),
            bulk_count: default_bulk_count(),
            max_batch: default_max_batch(),
            cooldown_hours: default_cooldown_hours(),
            auto_execute: true,
        }
    }
}

const fn default_true() -> bool { true }
const fn default_critical_confidence() -> f64 { 95.0 }
const fn default_urgent_confidence() -> f64 { 85.0 }
const fn default_bulk_confidence() -> f64 { 75.0 }
const fn default_single_confidence() -> f64 { 65.0 }
const fn default_idle_confidence() -> f64 { 90.0 }
const fn default_urgent_score() -> f64 { 75.0 }
const fn default_urgent_count() -> usize { 2 }
const fn default_bulk_count() -> usize { 3 }
const fn default_max_batch() -> usize { 3 }
const fn default_cooldown_hours() -> u64 { 24 }

/// Check generation and auto-fix routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Outcomes whose name contains one of these are tagged data-related.
    #[serde(default = "default_data_keywords")]
    pub data_keywords: Vec<String>,
    /// Failing check families (the name before `:`) containing one of these
    /// are never auto-fixed.
    #[serde(default = "default_human_markers")]
    pub human_judgement_markers: Vec<String>,
    #[serde(default = "default_fast_check_ms")]
    pub fast_check_ms: f64,
    #[serde(default = "default_scan_budget")]
    pub scan_budget_ms_per_file: f64,
    /// Complexity above this fails the per-file budget check; above
    /// `thresholds.complexity_issue` it only warns.
    #[serde(default = "default_complexity_fail")]
    pub complexity_fail: usize,
    /// Average maintainability below this fails the aggregate check.
    #[serde(default = "default_maintainability_fail")]
    pub maintainability_fail: f64,
    /// Average maintainability below this warns.
    #[serde(default = "default_maintainability_warn")]
    pub maintainability_warn: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            data_keywords: default_data_keywords(),
            human_judgement_markers: default_human_markers(),
            fast_check_ms: default_fast_check_ms(),
            scan_budget_ms_per_file: default_scan_budget(),
            complexity_fail: default_complexity_fail(),
            maintainability_fail: default_maintainability_fail(),
            maintainability_warn: default_maintainability_warn(),
        }
    }
}

fn default_data_keywords() -> Vec<String> {
    ["data", "dataset", "schema", "fixture", "record"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_human_markers() -> Vec<String> {
    ["Dynamic", "Analysis", "Load", "Throughput"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

const fn default_fast_check_ms() -> f64 { 50.0 }
const fn default_scan_budget() -> f64 { 25.0 }
const fn default_complexity_fail() -> usize { 30 }
const fn default_maintainability_fail() -> f64 { 25.0 }
const fn default_maintainability_warn() -> f64 { 50.0 }

/// Efficiency and health score tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_fail_penalty")]
    pub fail_penalty: f64,
    #[serde(default = "default_warning_penalty")]
    pub warning_penalty: f64,
    #[serde(default = "default_fast_bonus")]
    pub fast_bonus: f64,

    /// Resident-memory tiers in MB, paired with the score awarded at or below each.
    #[serde(default = "default_memory_tiers")]
    pub memory_tiers: Vec<(f64, f64)>,
    #[serde(default = "default_memory_floor")]
    pub memory_floor: f64,
    #[serde(default = "default_leak_growth_mb")]
    pub leak_growth_mb: f64,
    #[serde(default = "default_leak_penalty")]
    pub leak_penalty: f64,
    #[serde(default = "default_memory_window")]
    pub memory_window: usize,

    #[serde(default = "default_large_ratio_weight")]
    pub large_ratio_weight: f64,
    #[serde(default = "default_complex_ratio_weight")]
    pub complex_ratio_weight: f64,
    #[serde(default = "default_band_low")]
    pub average_band_low: f64,
    #[serde(default = "default_band_high")]
    pub average_band_high: f64,
    #[serde(default = "default_band_adjust")]
    pub band_adjust: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fail_penalty: default_fail_penalty(),
            warning_penalty: default_warning_penalty(),
            fast_bonus: default_fast_bonus(),
            memory_tiers: default_memory_tiers(),
            memory_floor: default_memory_floor(),
            leak_growth_mb: default_leak_growth_mb(),
            leak_penalty: default_leak_penalty(),
            memory_window: default_memory_window(),
            large_ratio_weight: default_large_ratio_weight(),
            complex_ratio_weight: default_complex_ratio_weight(),
            average_band_low: default_band_low(),
            average_band_high: default_band_high(),
            band_adjust: default_band_adjust(),
        }
    }
}

const fn default_fail_penalty() -> f64 { 15.0 }
const fn default_warning_penalty() -> f64 { 5.0 }
const fn default_fast_bonus() -> f64 { 10.0 }
fn default_memory_tiers() -> Vec<(f64, f64)> {
    vec![(100.0, 100.0), (200.0, 85.0), (500.0, 70.0), (1000.0, 50.0)]
}
const fn default_memory_floor() -> f64 { 30.0 }
const fn default_leak_growth_mb() -> f64 { 50.0 }
const fn default_leak_penalty() -> f64 { 25.0 }
const fn default_memory_window() -> usize { 10 }
const fn default_large_ratio_weight() -> f64 { 30.0 }
const fn default_complex_ratio_weight() -> f64 { 25.0 }
const fn default_band_low() -> f64 { 150.0 }
const fn default_band_high() -> f64 { 300.0 }
const fn default_band_adjust() -> f64 { 15.0 }

/// Where and what to scan when reading from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Regex patterns matched against forward-slash relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

fn default_root() -> String { ".".to_string() }
fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx", "rs", "py"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Top-level shape of `cleaver.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub checks: CheckConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub source: SourceConfig,
}
