// src/cli/handlers.rs
//! Command handlers. Each one builds an engine rooted at the project
//! directory and persists history under `.cleaver/`.

use crate::config::{Config, CONFIG_FILE};
use crate::engine::HealthEngine;
use crate::events::EventLogger;
use crate::exit::CleaverExit;
use crate::history::{Clock, SystemClock};
use crate::reporting;
use crate::source::FsSource;
use anyhow::Result;
use std::path::{Component, Path, PathBuf};

/// Where the cooldown map lives, relative to the project root.
pub const HISTORY_FILE: &str = ".cleaver/history.json";

#[must_use]
pub fn resolve_root(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Loads `cleaver.toml` from `root` and points the source walk at it.
#[must_use]
pub fn load_config(root: &Path) -> Config {
    let mut config = Config::load_from(&root.join(CONFIG_FILE));
    config.source.root = root.join(&config.source.root).to_string_lossy().into_owned();
    config
}

/// Builds the engine used by every command.
///
/// # Errors
/// Returns error if the exclude patterns or the history file are invalid.
pub fn build_engine(root: &Path, config: Config) -> Result<HealthEngine> {
    let source = FsSource::from_config(&config.source)?;
    let events = EventLogger::new(root);
    HealthEngine::new(config, Box::new(source))
        .with_sink(events.clone())
        .with_events(events)
        .persist_history_at(root.join(HISTORY_FILE))
}

/// Handles `cleaver analyze`.
///
/// # Errors
/// Returns error if the engine cannot be built or output fails.
pub fn handle_analyze(root: Option<PathBuf>, json: bool, no_execute: bool) -> Result<CleaverExit> {
    let root = resolve_root(root);
    let mut config = load_config(&root);
    if no_execute {
        config.decision.auto_execute = false;
    }

    let mut engine = build_engine(&root, config)?;
    let report = engine.run_analysis();

    if json {
        reporting::print_json(&report)?;
    } else {
        reporting::print_report(&report)?;
    }
    Ok(CleaverExit::from_status(report.overall))
}

/// Handles `cleaver fix`: one pass, one fix dispatch, one recheck.
///
/// # Errors
/// Returns error if the engine cannot be built or output fails.
pub fn handle_fix(root: Option<PathBuf>, json: bool) -> Result<CleaverExit> {
    let root = resolve_root(root);
    let mut engine = build_engine(&root, load_config(&root))?;

    let first = engine.run_analysis();
    let (summary, recheck) = engine.fix_and_recheck(&first);

    if json {
        reporting::print_json(&serde_json::json!({
            "fixes": summary,
            "report": recheck,
        }))?;
    } else {
        reporting::print_fix_summary(&summary);
        println!();
        reporting::print_report(&recheck)?;
    }
    Ok(CleaverExit::from_status(recheck.overall))
}

/// Handles `cleaver history`.
///
/// # Errors
/// Returns error if the history file is unreadable or output fails.
pub fn handle_history(root: Option<PathBuf>, json: bool) -> Result<CleaverExit> {
    let root = resolve_root(root);
    let config = load_config(&root);
    let window = config.decision.cooldown_ms();
    let engine = build_engine(&root, config)?;

    if json {
        reporting::print_json(engine.history())?;
    } else {
        reporting::print_history(engine.history(), SystemClock.now_ms(), window);
    }
    Ok(CleaverExit::Success)
}

/// Handles `cleaver mark`.
///
/// # Errors
/// Returns error if the engine cannot be built.
pub fn handle_mark(root: Option<PathBuf>, paths: &[PathBuf]) -> Result<CleaverExit> {
    let root = resolve_root(root);
    let mut engine = build_engine(&root, load_config(&root))?;
    for path in paths {
        let rel = inventory_path(&root, path);
        engine.mark_refactored(&rel);
        println!("marked {}", rel.display());
    }
    Ok(CleaverExit::Success)
}

/// Rewrites a user-supplied path into the root-relative form the source walk
/// produces: absolute paths lose the root prefix and `.` segments are dropped.
fn inventory_path(root: &Path, path: &Path) -> PathBuf {
    let relative = if path.is_absolute() {
        path.strip_prefix(root)
            .ok()
            .or_else(|| {
                let canonical = root.canonicalize().ok()?;
                path.strip_prefix(canonical).ok()
            })
            .unwrap_or(path)
    } else {
        path
    };
    relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
