//! Integration tests for the CLI context
//!
//! These run the full flow from config through report file, ledger backend
//! and engine on a temporary data directory.

use signoff_cli::{commands, AppConfig, AppContext, LedgerBackend};
use signoff_core::{BusinessDate, SignOffForm, SignOffLevel};
use signoff_engine::{SignOffError, SignOffState};
use tempfile::TempDir;

fn config(dir: &TempDir, ledger: LedgerBackend) -> AppConfig {
    AppConfig {
        ledger,
        ..AppConfig::with_data_dir(dir.path())
    }
}

fn form(level: &str, dataset: &str) -> SignOffForm {
    SignOffForm {
        level: level.to_string(),
        business_date: "2026-10-19".to_string(),
        report_id: "daily-pnl".to_string(),
        dataset_id: dataset.to_string(),
        data_source_id: "warehouse".to_string(),
    }
}

fn date() -> BusinessDate {
    "2026-10-19".parse().unwrap()
}

fn setup_reviewers(config: &AppConfig) {
    commands::grant(config, "daily-pnl", "alice", Some("Daily P&L")).unwrap();
    commands::grant(config, "daily-pnl", "bob", None).unwrap();
}

fn full_workflow(ledger: LedgerBackend) {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, ledger);
    setup_reviewers(&config);

    let ctx = AppContext::new(config).unwrap();

    // 1. Nothing signed yet
    assert_eq!(commands::status(&ctx, "daily-pnl", date()).unwrap(), SignOffState::NotSignedOff);

    // 2. First level by alice
    let first = commands::sign(&ctx, form("FIRST", "positions"), "alice").unwrap();
    assert_eq!(first.level, SignOffLevel::First);

    // 3. alice cannot complete the second level herself
    let err = commands::sign(&ctx, form("SECOND", "positions"), "alice").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SignOffError>(),
        Some(SignOffError::Unauthorized { .. })
    ));

    // 4. Second level by bob
    commands::sign(&ctx, form("SECOND", "positions"), "bob").unwrap();
    let state = commands::status(&ctx, "daily-pnl", date()).unwrap();
    assert!(state.is_finalized());

    let history = commands::history(&ctx, "daily-pnl").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].created_by, "alice");
    assert_eq!(history[1].created_by, "bob");
}

#[test]
fn test_full_workflow_sqlite() {
    full_workflow(LedgerBackend::Sqlite);
}

#[test]
fn test_full_workflow_jsonl() {
    full_workflow(LedgerBackend::Jsonl);
}

#[test]
fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, LedgerBackend::Sqlite);
    setup_reviewers(&config);

    {
        let ctx = AppContext::new(config.clone()).unwrap();
        commands::sign(&ctx, form("FIRST", "positions"), "alice").unwrap();
    }

    let ctx = AppContext::new(config).unwrap();

    // First level already recorded before the restart
    let err = commands::sign(&ctx, form("FIRST", "positions"), "bob").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SignOffError>(),
        Some(SignOffError::FirstLevelAlreadySignedOff(_))
    ));

    // Dataset must match what alice signed
    let err = commands::sign(&ctx, form("SECOND", "exposures"), "bob").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SignOffError>(),
        Some(SignOffError::DataSetIdMismatch { .. })
    ));

    commands::sign(&ctx, form("SECOND", "positions"), "bob").unwrap();
    assert!(ctx.engine.is_finalized("daily-pnl", date()).unwrap());
}

#[test]
fn test_reports_and_grant() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, LedgerBackend::Jsonl);

    let report = commands::grant(&config, "daily-pnl", " alice ", Some("Daily P&L")).unwrap();
    assert_eq!(report.first_level_reviewers, vec!["alice"]);
    assert!(commands::grant(&config, "daily-pnl", "  ", None).is_err());

    let ctx = AppContext::new(config).unwrap();
    let reports = commands::reports(&ctx).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].name.as_deref(), Some("Daily P&L"));
    assert!(ctx.reports_path().exists());
}

#[test]
fn test_grant_keeps_existing_report() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, LedgerBackend::Sqlite);
    setup_reviewers(&config);

    let report = commands::grant(&config, "daily-pnl", "carol", None).unwrap();
    assert_eq!(report.first_level_reviewers, vec!["alice", "bob", "carol"]);
    assert_eq!(report.name.as_deref(), Some("Daily P&L"));
}

#[test]
fn test_grant_fails_on_unreadable_reports() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, LedgerBackend::Sqlite);
    std::fs::create_dir_all(&config.data_dir).unwrap();
    std::fs::write(config.reports_path(), "not json").unwrap();

    assert!(commands::grant(&config, "daily-pnl", "alice", None).is_err());
    assert_eq!(std::fs::read_to_string(config.reports_path()).unwrap(), "not json");
}

#[test]
fn test_unknown_report_and_invalid_level() {
    let dir = TempDir::new().unwrap();
    let ctx = AppContext::new(config(&dir, LedgerBackend::Sqlite)).unwrap();

    let err = commands::sign(&ctx, form("FIRST", "positions"), "alice").unwrap_err();
    assert!(matches!(err.downcast_ref::<SignOffError>(), Some(SignOffError::Directory(_))));

    let err = commands::sign(&ctx, form("THIRD", "positions"), "alice").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SignOffError>(),
        Some(SignOffError::InvalidSignOffLevel(_))
    ));
}

#[test]
fn test_config_file_drives_backend() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("signoff.json");
    let data_dir = dir.path().join("data");
    std::fs::write(
        &config_path,
        format!(
            r#"{{ "data_dir": {:?}, "ledger": "jsonl", "engine": {{ "event_id_prefix": "PNL" }} }}"#,
            data_dir.to_str().unwrap()
        ),
    )
    .unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    setup_reviewers(&config);
    let ctx = AppContext::new(config).unwrap();

    let event = commands::sign(&ctx, form("FIRST", "positions"), "alice").unwrap();
    assert!(event.id.starts_with("PNL-"));
    assert!(data_dir.join("events.jsonl").exists());
}
