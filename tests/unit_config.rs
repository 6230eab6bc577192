// tests/unit_config.rs
use cleaver_core::config::{Config, ThresholdConfig, CONFIG_FILE};
use cleaver_core::types::FileCategory;
use std::fs;

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join(CONFIG_FILE),
        "[decision]\ncooldown_hours = 6\nmax_batch = 2\n\n[scoring]\ncomponent_gate = 60.0\n",
    )
    .unwrap();
    let c = Config::load_from(&d.path().join(CONFIG_FILE));
    assert_eq!(c.decision.cooldown_hours, 6);
    assert_eq!(c.decision.cooldown_ms(), 6 * 60 * 60 * 1000);
    assert_eq!(c.decision.max_batch, 2);
    assert!((c.scoring.component_gate - 60.0).abs() < f64::EPSILON);
}

#[test]
fn test_defaults() {
    let t = ThresholdConfig::default();
    assert_eq!(t.for_category(FileCategory::Component), 200);
    assert_eq!(t.for_category(FileCategory::Page), 300);
    assert_eq!(t.for_category(FileCategory::Hook), 150);
    assert_eq!(t.for_category(FileCategory::Utility), 250);
    assert_eq!(t.for_category(FileCategory::Type), 100);
    assert_eq!(t.complexity_issue, 20);

    let c = Config::default();
    assert_eq!(c.decision.cooldown_hours, 24);
    assert_eq!(c.decision.max_batch, 3);
    assert!(c.decision.auto_execute);
}

#[test]
fn test_malformed_falls_back() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join(CONFIG_FILE), "[decision\ncooldown_hours = ").unwrap();
    let c = Config::load_from(&d.path().join(CONFIG_FILE));
    assert_eq!(c, Config::default());
}

#[test]
fn test_wrong_type_rejected() {
    assert!(Config::from_toml_str("[decision]\nauto_execute = \"yes\"\n").is_err());
}

#[test]
fn test_markers_overridable() {
    let c = Config::from_toml_str("[checks]\nhuman_judgement_markers = [\"Manual\"]\n").unwrap();
    assert_eq!(c.checks.human_judgement_markers, vec!["Manual".to_string()]);
    assert!(c.checks.data_keywords.contains(&"schema".to_string()));
}

#[test]
fn test_tuning_tables_overridable() {
    let c = Config::from_toml_str(
        "[scoring.component]\nrender_weight = 4.0\nboundary_penalty = 0.0\n\n[checks]\ncomplexity_fail = 40\nmaintainability_warn = 60.0\n",
    )
    .unwrap();
    assert!((c.scoring.component.render_weight - 4.0).abs() < f64::EPSILON);
    assert!(c.scoring.component.boundary_penalty.abs() < f64::EPSILON);
    assert!((c.scoring.component.state_cap - 25.0).abs() < f64::EPSILON);
    assert_eq!(c.checks.complexity_fail, 40);
    assert!((c.checks.maintainability_warn - 60.0).abs() < f64::EPSILON);
    assert!((c.checks.maintainability_fail - 25.0).abs() < f64::EPSILON);
}

#[test]
fn test_inverted_maintainability_bands_rejected() {
    assert!(Config::from_toml_str("[checks]\nmaintainability_fail = 70.0\n").is_err());
}
