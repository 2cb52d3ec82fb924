//! End-to-end: seed -> store -> engine -> artifacts
//!
//! GREEN when:
//! - Scenario A: only active records count; the at_risk-status record stays
//!   out of the at-risk subset
//! - Scenario B: one active high-churn record triggers churn prevention
//!   naming exactly that client, and shows up in the risk report
//! - Scenario C: an empty portfolio yields zero metrics, the healthy
//!   sentinel, and a header-only export

use csm_artifacts::{
    export_clients_csv, render_report, ExportOptions, ReportContext, ReportKind,
};
use csm_portfolio::{Category, Engine, FieldUpdate, PortfolioStore, Priority};
use csm_testkit::{as_of, scenario_a, scenario_b, scratch_dir, write_seed};

#[test]
fn scenario_a_active_scope() {
    let store = PortfolioStore::new(scenario_a()).unwrap();
    let m = Engine::new(&store, as_of()).metrics();

    assert_eq!(m.total_mrr, 225_000);
    assert_eq!(m.total_clients, 2);
    assert_eq!(m.at_risk_count, 0);
    assert_eq!(m.at_risk_mrr, 0);
}

#[test]
fn scenario_b_churn_rule_and_risk_report() {
    let store = PortfolioStore::new(scenario_b()).unwrap();
    let snap = Engine::new(&store, as_of()).snapshot();

    assert_eq!(snap.metrics.at_risk_count, 1);
    assert_eq!(snap.metrics.at_risk_mrr, 40_000);

    let first = &snap.recommendations[0];
    assert_eq!(first.category, Category::ChurnPrevention);
    assert_eq!(first.priority, Priority::Critical);
    assert_eq!(first.affected_clients, vec!["Volga Retail".to_string()]);

    let ctx = ReportContext {
        records: store.get_all(),
        snapshot: &snap,
        operator_name: "Ivan Ivanov",
        currency: "RUB",
        generated_at: as_of().and_hms_opt(0, 0, 0).unwrap(),
    };
    let risk = render_report(ReportKind::Risk, &ctx);
    assert!(risk.contains("Volga Retail"));
    assert!(risk.contains("Sidorov A.V. (sole trader)"));
    assert!(!risk.contains("TechnoProfit"));
}

#[test]
fn scenario_c_empty_portfolio() {
    let store = PortfolioStore::new(Vec::new()).unwrap();
    let snap = Engine::new(&store, as_of()).snapshot();

    assert_eq!(snap.metrics.total_mrr, 0);
    assert_eq!(snap.metrics.avg_health_score, 0.0);
    assert_eq!(snap.recommendations.len(), 1);
    assert!(snap.recommendations[0].is_healthy_sentinel());

    let dir = scratch_dir().unwrap();
    let path = dir.path().join("empty.csv");
    let summary = export_clients_csv(store.get_all(), &path, ExportOptions::default()).unwrap();
    assert_eq!(summary.rows, 0);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.trim_start_matches('\u{feff}').lines().count(), 1);
}

#[test]
fn updates_flow_through_to_next_snapshot() {
    let mut store = PortfolioStore::new(scenario_a()).unwrap();
    let before = Engine::new(&store, as_of()).metrics();

    store.update_field(2, FieldUpdate::ChurnRisk(0.45)).unwrap();
    store.update_field(2, FieldUpdate::Mrr(80_000)).unwrap();

    let after = Engine::new(&store, as_of()).metrics();
    assert_eq!(before.at_risk_count, 0);
    assert_eq!(after.at_risk_count, 1);
    assert_eq!(after.at_risk_mrr, 80_000);
    assert_eq!(after.total_mrr, 230_000);
}

#[test]
fn seed_file_round_trips_through_store() {
    let dir = scratch_dir().unwrap();
    let path = write_seed(dir.path(), &scenario_b()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let records: Vec<csm_portfolio::ClientRecord> = serde_json::from_str(&raw).unwrap();
    let store = PortfolioStore::new(records).unwrap();
    assert_eq!(store.len(), 4);
    assert_eq!(store.find_by_id(4).map(|r| r.name.as_str()), Some("Volga Retail"));
}
