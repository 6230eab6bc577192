// src/checks/generate.rs
//! Derives the per-pass check battery from collected metrics.

use super::{Check, CheckPriority, CheckVerdict};
use crate::config::{CheckConfig, ThresholdConfig};
use crate::types::{ComponentMetrics, FileMetrics};
use anyhow::ensure;

/// What the battery is derived from.
#[derive(Debug, Clone, Copy)]
pub struct CheckInputs<'a> {
    pub files: &'a [FileMetrics],
    pub components: &'a [ComponentMetrics],
    /// Files the source listed but could not be read.
    pub skipped: usize,
    /// Wall time spent collecting metrics.
    pub scan_ms: f64,
}

/// Builds every check for one pass, in generation order.
#[must_use]
pub fn generate(inputs: &CheckInputs<'_>, thresholds: &ThresholdConfig, config: &CheckConfig) -> Vec<Check> {
    let mut checks = vec![inventory_check(inputs.files.len(), inputs.skipped)];

    for file in inputs.files {
        checks.push(size_check(file, thresholds.for_category(file.category)));
    }
    for file in inputs.files {
        checks.push(complexity_check(file, thresholds.complexity_issue, config.complexity_fail));
        checks.push(imports_check(file, thresholds.max_imports));
    }
    for component in inputs.components {
        checks.push(boundary_check(component));
        checks.push(state_check(component, thresholds.max_state_hooks));
    }

    checks.push(maintainability_check(
        inputs.files,
        config.maintainability_fail,
        config.maintainability_warn,
    ));
    checks.push(throughput_check(
        inputs.files.len(),
        inputs.scan_ms,
        config.scan_budget_ms_per_file,
    ));
    for file in inputs.files.iter().filter(|f| mentions_data(f, config)) {
        checks.push(data_size_check(file, thresholds.for_category(file.category)));
    }

    checks
}

fn inventory_check(analyzed: usize, skipped: usize) -> Check {
    Check::new("Source Inventory", "inventory", CheckPriority::High, move || {
        Ok(if skipped > 0 {
            CheckVerdict::warn(format!("{analyzed} analyzed, {skipped} unreadable"))
        } else if analyzed == 0 {
            CheckVerdict::skip("no source files")
        } else {
            CheckVerdict::pass(format!("{analyzed} files analyzed"))
        })
    })
}

fn size_check(file: &FileMetrics, threshold: usize) -> Check {
    let lines = file.line_count;
    let name = format!("Size Limit: {}", file.path.display());
    Check::new(name, "size", CheckPriority::High, move || {
        ensure!(threshold > 0, "size threshold is zero");
        Ok(if lines > threshold * 2 {
            CheckVerdict::fail(format!("{lines} lines, more than twice the {threshold}-line limit"))
        } else if lines > threshold {
            CheckVerdict::warn(format!("{lines} lines over the {threshold}-line limit"))
        } else {
            CheckVerdict::pass(format!("{lines}/{threshold} lines"))
        })
    })
}

fn complexity_check(file: &FileMetrics, limit: usize, hard: usize) -> Check {
    let complexity = file.complexity_score;
    let name = format!("Complexity Budget: {}", file.path.display());
    Check::new(name, "complexity", CheckPriority::Medium, move || {
        Ok(if complexity > hard {
            CheckVerdict::fail(format!("complexity {complexity} exceeds {hard}"))
        } else if complexity > limit {
            CheckVerdict::warn(format!("complexity {complexity} above {limit}"))
        } else {
            CheckVerdict::pass(format!("complexity {complexity}"))
        })
    })
}

fn imports_check(file: &FileMetrics, max: usize) -> Check {
    let imports = file.imports;
    let name = format!("Import Fan-in: {}", file.path.display());
    Check::new(name, "dependencies", CheckPriority::Medium, move || {
        Ok(if imports > max {
            CheckVerdict::warn(format!("{imports} imports (max {max})"))
        } else {
            CheckVerdict::pass(format!("{imports} imports"))
        })
    })
}

fn boundary_check(component: &ComponentMetrics) -> Check {
    let exposed = component.is_oversized && !component.has_error_boundary;
    let name = format!("Error Boundary: {}#{}", component.owning_file.display(), component.name);
    Check::new(name, "structure", CheckPriority::Medium, move || {
        Ok(if exposed {
            CheckVerdict::warn("oversized without an error boundary")
        } else {
            CheckVerdict::pass("ok")
        })
    })
}

fn state_check(component: &ComponentMetrics, max: usize) -> Check {
    let state = component.state_variable_count;
    let name = format!("State Management: {}#{}", component.owning_file.display(), component.name);
    Check::new(name, "structure", CheckPriority::Medium, move || {
        Ok(if state > max {
            CheckVerdict::warn(format!("{state} state variables (max {max})"))
        } else {
            CheckVerdict::pass(format!("{state} state variables"))
        })
    })
}

fn maintainability_check(files: &[FileMetrics], fail_below: f64, warn_below: f64) -> Check {
    let indices: Vec<f64> = files.iter().map(|f| f.maintainability_index).collect();
    Check::new("Maintainability Analysis", "maintainability", CheckPriority::Low, move || {
        if indices.is_empty() {
            return Ok(CheckVerdict::skip("no files"));
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = indices.iter().sum::<f64>() / indices.len() as f64;
        Ok(if avg < fail_below {
            CheckVerdict::fail(format!("average maintainability {avg:.1}"))
        } else if avg < warn_below {
            CheckVerdict::warn(format!("average maintainability {avg:.1}"))
        } else {
            CheckVerdict::pass(format!("average maintainability {avg:.1}"))
        })
    })
}

fn throughput_check(files: usize, scan_ms: f64, budget: f64) -> Check {
    Check::new("Scan Throughput", "performance", CheckPriority::Low, move || {
        if files == 0 {
            return Ok(CheckVerdict::skip("nothing scanned"));
        }
        #[allow(clippy::cast_precision_loss)]
        let per_file = scan_ms / files as f64;
        Ok(if per_file > budget {
            CheckVerdict::warn(format!("{per_file:.2}ms per file (budget {budget}ms)"))
        } else {
            CheckVerdict::pass(format!("{per_file:.2}ms per file"))
        })
    })
}

fn data_size_check(file: &FileMetrics, threshold: usize) -> Check {
    let lines = file.line_count;
    let name = format!("Data Module Size: {}", file.path.display());
    Check::new(name, "data", CheckPriority::Low, move || {
        Ok(if lines > threshold {
            CheckVerdict::warn(format!("{lines} lines of inline data"))
        } else {
            CheckVerdict::pass(format!("{lines} lines"))
        })
    })
}

fn mentions_data(file: &FileMetrics, config: &CheckConfig) -> bool {
    let path = file.path.to_string_lossy().to_ascii_lowercase();
    config
        .data_keywords
        .iter()
        .any(|kw| path.contains(&kw.to_ascii_lowercase()))
}
