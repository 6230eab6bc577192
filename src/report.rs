// src/report.rs
//! Efficiency/health scoring and final report assembly.

use crate::config::{CheckConfig, ReportConfig, ThresholdConfig};
use crate::types::{
    CheckCounts, CheckOutcome, CheckStatus, ComponentMetrics, Decision, FileMetrics, MemoryStats,
    OverallStatus, Report, Suggestion,
};
use std::collections::VecDeque;
use std::fs;

/// Name of the synthetic outcome carried by a degraded report.
pub const PASS_FAILURE_CHECK: &str = "Analysis Pass";

/// Source of resident-memory readings.
pub trait MemoryProbe {
    /// Current resident set in MB, or `None` when unavailable.
    fn resident_mb(&self) -> Option<f64>;
}

/// Reads `/proc/self/statm`. Yields `None` off Linux.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcStatmProbe;

const PAGE_BYTES: f64 = 4096.0;

impl MemoryProbe for ProcStatmProbe {
    fn resident_mb(&self) -> Option<f64> {
        let statm = fs::read_to_string("/proc/self/statm").ok()?;
        let pages: f64 = statm.split_whitespace().nth(1)?.parse().ok()?;
        Some(pages * PAGE_BYTES / (1024.0 * 1024.0))
    }
}

/// Always reports the same reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe(pub Option<f64>);

impl MemoryProbe for FixedProbe {
    fn resident_mb(&self) -> Option<f64> {
        self.0
    }
}

/// Sliding window of memory samples across passes.
pub struct MemoryMonitor {
    probe: Box<dyn MemoryProbe>,
    samples: VecDeque<f64>,
    capacity: usize,
    leak_growth_mb: f64,
}

impl MemoryMonitor {
    #[must_use]
    pub fn new(probe: Box<dyn MemoryProbe>, config: &ReportConfig) -> Self {
        Self {
            probe,
            samples: VecDeque::new(),
            capacity: config.memory_window.max(1),
            leak_growth_mb: config.leak_growth_mb,
        }
    }

    /// Takes one reading and summarizes the window.
    ///
    /// Growth is the latest sample minus the smallest one still in the window.
    pub fn sample(&mut self) -> MemoryStats {
        let Some(current) = self.probe.resident_mb() else {
            return MemoryStats::default();
        };

        self.samples.push_back(current);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }

        let low = self.samples.iter().copied().fold(current, f64::min);
        let growth = current - low;
        MemoryStats {
            resident_mb: Some(current),
            window_growth_mb: growth,
            leak_suspected: growth > self.leak_growth_mb,
        }
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples.len()
    }
}

/// Pass-local inputs to [`ReportAggregator::assemble`].
#[derive(Debug, Clone)]
pub struct ReportParts {
    pub timestamp: u64,
    pub files: Vec<FileMetrics>,
    pub files_skipped: usize,
    pub components: Vec<ComponentMetrics>,
    pub suggestions: Vec<Suggestion>,
    pub decision: Decision,
    pub checks: Vec<CheckOutcome>,
    pub memory: MemoryStats,
    pub duration_ms: u64,
}

pub struct ReportAggregator<'a> {
    config: &'a ReportConfig,
    thresholds: &'a ThresholdConfig,
    checks: &'a CheckConfig,
}

impl<'a> ReportAggregator<'a> {
    #[must_use]
    pub fn new(config: &'a ReportConfig, thresholds: &'a ThresholdConfig, checks: &'a CheckConfig) -> Self {
        Self {
            config,
            thresholds,
            checks,
        }
    }

    /// `100 − fail·failed − warn·warnings (+ bonus when checks average under the fast cut-off)`, clamped.
    #[must_use]
    pub fn system_efficiency(&self, outcomes: &[CheckOutcome]) -> f64 {
        let counts = CheckCounts::tally(outcomes);
        #[allow(clippy::cast_precision_loss)]
        let mut score = 100.0
            - self.config.fail_penalty * counts.failed as f64
            - self.config.warning_penalty * counts.warnings as f64;

        let timings: Vec<f64> = outcomes.iter().filter_map(|o| o.performance_ms).collect();
        if !timings.is_empty() {
            #[allow(clippy::cast_precision_loss)]
            let avg = timings.iter().sum::<f64>() / timings.len() as f64;
            if avg < self.checks.fast_check_ms {
                score += self.config.fast_bonus;
            }
        }
        score.clamp(0.0, 100.0)
    }

    /// Tiered on resident memory, penalized when the window suggests a leak.
    #[must_use]
    pub fn memory_efficiency(&self, stats: &MemoryStats) -> f64 {
        let Some(resident) = stats.resident_mb else {
            return 100.0;
        };
        let mut score = self
            .config
            .memory_tiers
            .iter()
            .find(|(limit, _)| resident <= *limit)
            .map_or(self.config.memory_floor, |(_, score)| *score);
        if stats.leak_suspected {
            score -= self.config.leak_penalty;
        }
        score.clamp(0.0, 100.0)
    }

    /// Penalizes large and complex file ratios, then nudges by average size band.
    #[must_use]
    pub fn codebase_health(&self, files: &[FileMetrics]) -> f64 {
        if files.is_empty() {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = files.len() as f64;
        let large = files
            .iter()
            .filter(|f| f.line_count > self.thresholds.large_file_lines)
            .count();
        let complex = files
            .iter()
            .filter(|f| f.complexity_score > self.thresholds.complexity_issue)
            .count();
        let total_lines: usize = files.iter().map(|f| f.line_count).sum();

        #[allow(clippy::cast_precision_loss)]
        let (large_ratio, complex_ratio, avg) = (large as f64 / n, complex as f64 / n, total_lines as f64 / n);

        let mut score = 100.0
            - self.config.large_ratio_weight * large_ratio
            - self.config.complex_ratio_weight * complex_ratio;
        if avg > self.config.average_band_high {
            score -= self.config.band_adjust;
        } else if avg < self.config.average_band_low {
            score += self.config.band_adjust;
        }
        score.clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn assemble(&self, parts: ReportParts) -> Report {
        let counts = CheckCounts::tally(&parts.checks);
        Report {
            timestamp: parts.timestamp,
            overall: OverallStatus::from_counts(counts.failed, counts.warnings),
            counts,
            files_analyzed: parts.files.len(),
            files_skipped: parts.files_skipped,
            system_efficiency: self.system_efficiency(&parts.checks),
            memory_efficiency: self.memory_efficiency(&parts.memory),
            codebase_health: self.codebase_health(&parts.files),
            files: parts.files,
            components: parts.components,
            suggestions: parts.suggestions,
            decision: parts.decision,
            checks: parts.checks,
            memory: parts.memory,
            duration_ms: parts.duration_ms,
        }
    }
}

/// A report standing in for a pass that could not complete.
///
/// Scores are zeroed; the single outcome carries `message`.
#[must_use]
pub fn degraded(timestamp: u64, message: &str, duration_ms: u64) -> Report {
    let checks = vec![CheckOutcome {
        name: PASS_FAILURE_CHECK.to_string(),
        status: CheckStatus::Fail,
        message: message.to_string(),
        performance_ms: None,
        category: "pipeline".to_string(),
        is_data_related: false,
    }];
    let counts = CheckCounts::tally(&checks);
    Report {
        timestamp,
        overall: OverallStatus::Fail,
        counts,
        files_analyzed: 0,
        files_skipped: 0,
        files: Vec::new(),
        components: Vec::new(),
        suggestions: Vec::new(),
        decision: Decision::wait(0.0, "analysis pass failed"),
        checks,
        system_efficiency: 0.0,
        memory_efficiency: 0.0,
        codebase_health: 0.0,
        memory: MemoryStats::default(),
        duration_ms,
    }
}
