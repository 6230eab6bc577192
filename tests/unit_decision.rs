// tests/unit_decision.rs
use cleaver_core::config::{DecisionConfig, ScoringConfig, ThresholdConfig};
use cleaver_core::decision::DecisionEngine;
use cleaver_core::history::RefactorHistory;
use cleaver_core::suggest::{Cooldown, SuggestionGenerator};
use cleaver_core::types::{FileCategory, FileMetrics, Impact, Priority, Suggestion};
use std::collections::BTreeSet;
use std::path::PathBuf;

fn file(path: &str, category: FileCategory, lines: usize, complexity: usize, mi: f64) -> FileMetrics {
    FileMetrics {
        path: PathBuf::from(path),
        line_count: lines,
        complexity_score: complexity,
        maintainability_index: mi,
        imports: 0,
        exports: 1,
        state_hooks: 0,
        category,
        issues: BTreeSet::new(),
    }
}

fn suggestion(i: usize, priority: Priority, urgency: f64, eligible: bool) -> Suggestion {
    Suggestion {
        file: PathBuf::from(format!("src/f{i}.ts")),
        component: None,
        category: FileCategory::Utility,
        current_size: 300,
        size_threshold: 250,
        complexity: 10,
        maintainability: 40.0,
        priority,
        urgency_score: urgency,
        reason: String::new(),
        actions: Vec::new(),
        auto_eligible: eligible,
        estimated_impact: Impact::Medium,
    }
}

#[test]
fn test_small_component_yields_nothing() {
    let t = ThresholdConfig::default();
    let s = ScoringConfig::default();
    let f = file("src/components/Card.tsx", FileCategory::Component, 150, 10, 60.0);
    assert!(SuggestionGenerator::new(&t, &s).for_file(&f, None).is_none());
}

#[test]
fn test_large_component_scores_at_least_55() {
    let t = ThresholdConfig::default();
    let s = ScoringConfig::default();
    let f = file("src/components/Grid.tsx", FileCategory::Component, 600, 30, 100.0);
    let sugg = SuggestionGenerator::new(&t, &s).for_file(&f, None).unwrap();
    assert!(sugg.urgency_score >= 55.0);
    assert!(matches!(sugg.priority, Priority::High | Priority::Critical));
}

#[test]
fn test_batch_cap_for_any_size() {
    let cfg = DecisionConfig::default();
    let engine = DecisionEngine::new(&cfg);
    for n in [0usize, 1, 3, 4, 25, 200] {
        let input: Vec<Suggestion> = (0..n)
            .map(|i| suggestion(i, Priority::High, 80.0, true))
            .collect();
        let d = engine.decide(&input);
        assert!(d.selected.len() <= 3, "{n} inputs selected {}", d.selected.len());
        assert!((0.0..=100.0).contains(&d.confidence));
    }
}

#[test]
fn test_any_critical_executes_at_95() {
    let cfg = DecisionConfig::default();
    let input = vec![
        suggestion(0, Priority::Low, 10.0, true),
        suggestion(1, Priority::Critical, 88.0, true),
    ];
    let d = DecisionEngine::new(&cfg).decide(&input);
    assert!(d.should_execute);
    assert!((d.confidence - 95.0).abs() < f64::EPSILON);
}

#[test]
fn test_nothing_eligible_waits_at_90() {
    let cfg = DecisionConfig::default();
    let input: Vec<Suggestion> = (0..5)
        .map(|i| suggestion(i, Priority::Medium, 60.0, false))
        .collect();
    let d = DecisionEngine::new(&cfg).decide(&input);
    assert!(!d.should_execute);
    assert!((d.confidence - 90.0).abs() < f64::EPSILON);
}

#[test]
fn test_generated_suggestions_feed_decision() {
    let t = ThresholdConfig::default();
    let s = ScoringConfig::default();
    let d = DecisionConfig::default();
    let history = RefactorHistory::new();
    let files: Vec<FileMetrics> = (0..6)
        .map(|i| file(&format!("src/lib/m{i}.ts"), FileCategory::Utility, 900, 40, 5.0))
        .collect();
    let cooldown = Cooldown { history: &history, now_ms: 0, window_ms: d.cooldown_ms() };
    let suggestions = SuggestionGenerator::new(&t, &s).generate(&files, &[], &cooldown);
    assert_eq!(suggestions.len(), 6);

    let decision = DecisionEngine::new(&d).decide(&suggestions);
    assert!(decision.should_execute);
    assert_eq!(decision.selected.len(), 3);
    assert!(decision.estimated_minutes > 0);
}
