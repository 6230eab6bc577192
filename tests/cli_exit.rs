// tests/cli_exit.rs - Exit code tests
use cleaver_core::cli::handlers::handle_analyze;
use cleaver_core::exit::CleaverExit;
use std::fs;
use tempfile::TempDir;

fn temp() -> TempDir {
    let d = tempfile::tempdir().unwrap();
    fs::create_dir_all(d.path().join("src")).unwrap();
    d
}

#[test]
fn test_exit_0_clean() {
    let d = temp();
    fs::write(d.path().join("src/a.ts"), "export const a = 1;\n").unwrap();
    let exit = handle_analyze(Some(d.path().to_path_buf()), true, true).unwrap();
    assert_eq!(exit, CleaverExit::Success);
}

#[test]
fn test_exit_6_failed_checks() {
    let d = temp();
    let body: String = (0..700).map(|i| format!("const v{i} = {i};\n")).collect();
    fs::write(d.path().join("src/big.ts"), body).unwrap();
    let exit = handle_analyze(Some(d.path().to_path_buf()), true, true).unwrap();
    assert_eq!(exit, CleaverExit::CheckFailed);
    assert_eq!(exit.code(), 6);
}

#[test]
fn test_no_execute_leaves_history_untouched() {
    let d = temp();
    let body: String = (0..700).map(|i| format!("if (x{i}) {{ y(); }}\n")).collect();
    fs::write(d.path().join("src/big.ts"), body).unwrap();
    let _ = handle_analyze(Some(d.path().to_path_buf()), true, true).unwrap();
    assert!(!d.path().join(".cleaver/history.json").exists());
}

#[test]
fn test_execute_persists_history() {
    let d = temp();
    let body: String = (0..700).map(|i| format!("if (x{i}) {{ y(); }}\n")).collect();
    fs::write(d.path().join("src/big.ts"), body).unwrap();
    let _ = handle_analyze(Some(d.path().to_path_buf()), true, false).unwrap();
    let raw = fs::read_to_string(d.path().join(".cleaver/history.json")).unwrap();
    assert!(raw.contains("big.ts"));
}

#[test]
fn test_exit_codes_distinct() {
    assert_ne!(CleaverExit::Success.code(), CleaverExit::Error.code());
    assert_ne!(CleaverExit::Error.code(), CleaverExit::CheckFailed.code());
}
