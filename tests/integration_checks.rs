// tests/integration_checks.rs
use cleaver_core::autofix::AutoFixDispatcher;
use cleaver_core::checks::{Check, CheckOrchestrator, CheckPriority, CheckVerdict};
use cleaver_core::config::CheckConfig;
use cleaver_core::executor::NullSink;
use cleaver_core::history::RefactorHistory;
use cleaver_core::suggest::Cooldown;
use cleaver_core::types::CheckStatus;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_faulty_checks_do_not_abort_batch() {
    let config = CheckConfig::default();
    let ran = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&ran);

    let mut checks = vec![
        Check::new("Loader", "io", CheckPriority::High, || {
            Err(anyhow::anyhow!("fixture missing"))
        }),
        Check::new("Indexer", "io", CheckPriority::Medium, || -> anyhow::Result<CheckVerdict> {
            let v: Vec<u8> = Vec::new();
            Ok(CheckVerdict::pass(format!("{}", v[3])))
        }),
    ];
    checks.push(Check::new("Tail", "io", CheckPriority::Low, move || {
        counter.set(counter.get() + 1);
        Ok(CheckVerdict::pass("done"))
    }));

    let outcomes = CheckOrchestrator::new(&config).run(checks, |_, _, _| {});
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].status, CheckStatus::Fail);
    assert!(outcomes[0].message.contains("fixture missing"));
    assert_eq!(outcomes[1].status, CheckStatus::Fail);
    assert!(outcomes[1].message.contains("panicked"));
    assert_eq!(outcomes[2].status, CheckStatus::Pass);
    assert_eq!(ran.get(), 1);
}

#[test]
fn test_failures_flow_into_autofix() {
    let config = CheckConfig::default();
    let checks = vec![
        Check::new("Size Limit: src/a.ts", "size", CheckPriority::High, || {
            Ok(CheckVerdict::fail("too big"))
        }),
        Check::new("Dynamic Load Analysis", "performance", CheckPriority::Low, || {
            Ok(CheckVerdict::fail("slow"))
        }),
        Check::new("Import Fan-in: src/a.ts", "dependencies", CheckPriority::Medium, || {
            Ok(CheckVerdict::warn("many"))
        }),
    ];
    let outcomes = CheckOrchestrator::new(&config).run(checks, |_, _, _| {});
    let history = RefactorHistory::new();
    let cooldown = Cooldown { history: &history, now_ms: 0, window_ms: 24 * 60 * 60 * 1000 };
    let summary =
        AutoFixDispatcher::with_defaults(&config).dispatch(&outcomes, &mut NullSink, &cooldown, None);
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn test_data_tagging_in_outcomes() {
    let config = CheckConfig::default();
    let checks = vec![
        Check::new("Dataset Row Count", "data", CheckPriority::Low, || Ok(CheckVerdict::pass("ok"))),
        Check::new("Size Limit: src/App.tsx", "size", CheckPriority::High, || Ok(CheckVerdict::pass("ok"))),
    ];
    let outcomes = CheckOrchestrator::new(&config).run(checks, |_, _, _| {});
    let data: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.is_data_related)
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(data, vec!["Dataset Row Count"]);
}
