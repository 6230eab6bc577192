// src/reporting.rs
//! Console output for analysis reports.

use crate::autofix::FixSummary;
use crate::history::RefactorHistory;
use crate::types::{CheckOutcome, CheckStatus, OverallStatus, Priority, Report, Suggestion};
use anyhow::Result;
use colored::Colorize;
use std::fmt::Write;
use std::time::Duration;

const TOP_SUGGESTIONS: usize = 5;

/// Prints a formatted report to stdout.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_report(report: &Report) -> Result<()> {
    print!("{}", format_report(report)?);
    Ok(())
}

/// Renders the report as it is printed.
///
/// # Errors
/// Returns error if formatting fails.
pub fn format_report(report: &Report) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "{} {} files analyzed, {} skipped",
        "CLEAVER".cyan().bold(),
        report.files_analyzed,
        report.files_skipped
    )?;
    writeln!(
        out,
        "  health {:.0}  system {:.0}  memory {:.0}",
        report.codebase_health, report.system_efficiency, report.memory_efficiency
    )?;
    if report.memory.leak_suspected {
        writeln!(
            out,
            "  {} memory grew {:.1}MB across recent passes",
            "!".yellow().bold(),
            report.memory.window_growth_mb
        )?;
    }
    writeln!(out)?;

    write_suggestions(&mut out, &report.suggestions)?;
    write_decision(&mut out, report)?;
    write_checks(&mut out, &report.checks)?;
    write_summary(&mut out, report)?;
    Ok(out)
}

fn write_suggestions(out: &mut String, suggestions: &[Suggestion]) -> Result<()> {
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", "Suggestions".bold())?;
    for s in suggestions.iter().take(TOP_SUGGESTIONS) {
        let tag = match s.priority {
            Priority::Critical => s.priority.label().red().bold(),
            Priority::High => s.priority.label().red(),
            Priority::Medium => s.priority.label().yellow(),
            Priority::Low => s.priority.label().dimmed(),
        };
        let auto = if s.auto_eligible { " auto" } else { "" };
        writeln!(out, "  [{tag}{auto}] {} (urgency {:.0})", s.label(), s.urgency_score)?;
        writeln!(out, "    {} {}", "-->".blue(), s.reason.dimmed())?;
        if let Some(first) = s.actions.first() {
            writeln!(out, "    {} {first}", "=".blue())?;
        }
    }
    if suggestions.len() > TOP_SUGGESTIONS {
        writeln!(out, "  ... and {} more", suggestions.len() - TOP_SUGGESTIONS)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_decision(out: &mut String, report: &Report) -> Result<()> {
    let d = &report.decision;
    let verdict = if d.should_execute {
        "EXECUTE".green().bold()
    } else {
        "WAIT".dimmed().bold()
    };
    writeln!(out, "{verdict} ({:.0}% confidence) {}", d.confidence, d.reason)?;
    for s in &d.selected {
        writeln!(out, "  -> {}", s.label())?;
    }
    if d.estimated_minutes > 0 {
        writeln!(out, "  ~{} min", d.estimated_minutes)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_checks(out: &mut String, checks: &[CheckOutcome]) -> Result<()> {
    let notable: Vec<&CheckOutcome> = checks
        .iter()
        .filter(|c| matches!(c.status, CheckStatus::Fail | CheckStatus::Warning))
        .collect();
    if notable.is_empty() {
        return Ok(());
    }
    for c in notable {
        let mark = if c.failed() {
            "FAIL".red().bold()
        } else {
            "WARN".yellow()
        };
        writeln!(out, "{mark} {}: {}", c.name, c.message)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_summary(out: &mut String, report: &Report) -> Result<()> {
    let duration = Duration::from_millis(report.duration_ms);
    let c = &report.counts;
    let line = format!(
        "{} checks: {} passed, {} failed, {} {}, {} skipped ({duration:?}).",
        c.total,
        c.passed,
        c.failed,
        c.warnings,
        pluralize("warning", c.warnings),
        c.skipped
    );
    match report.overall {
        OverallStatus::Pass => writeln!(out, "{} {line}", "OK".green().bold())?,
        OverallStatus::Warning => writeln!(out, "{} {line}", "~".yellow().bold())?,
        OverallStatus::Fail => writeln!(out, "{} {line}", "X".red().bold())?,
    }
    Ok(())
}

/// Prints the cooldown map, marking entries still inside the window.
pub fn print_history(history: &RefactorHistory, now_ms: u64, window_ms: u64) {
    if history.is_empty() {
        println!("{}", "No files in cooldown.".dimmed());
        return;
    }
    for (path, at) in history.entries() {
        let remaining = at.saturating_add(window_ms).saturating_sub(now_ms);
        if remaining > 0 {
            let hours = remaining / (60 * 60 * 1000);
            println!("{} {} ({hours}h left)", "cooling".yellow(), path.display());
        } else {
            println!("{} {}", "expired".dimmed(), path.display());
        }
    }
}

pub fn print_fix_summary(summary: &FixSummary) {
    println!(
        "{} {} attempted, {} succeeded, {} failed, {} left for review, {} cooling down, {} without a strategy",
        "FIX".cyan().bold(),
        summary.attempted,
        summary.succeeded,
        summary.failed,
        summary.skipped,
        summary.cooling,
        summary.unhandled
    );
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::degraded;

    #[test]
    fn degraded_report_renders_failure() {
        let report = degraded(0, "inventory unavailable", 2);
        let text = format_report(&report).unwrap();
        assert!(text.contains("Analysis Pass: inventory unavailable"));
        assert!(text.contains("1 failed"));
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("warning", 1), "warning");
        assert_eq!(pluralize("warning", 2), "warnings");
    }
}
