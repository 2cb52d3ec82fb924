//! Recommendation rules fire independently and come out in a fixed order.
//!
//! GREEN when:
//! - each rule selects exactly the active records it describes
//! - several rules can fire at once, ordered churn → scheduled → growth →
//!   engagement → payment
//! - window boundaries (7-day schedule, 14-day inactivity) are honoured
//! - nothing firing produces exactly one healthy-portfolio sentinel

use std::collections::BTreeSet;

use chrono::NaiveDate;
use csm_portfolio::{
    generate_recommendations, Category, ClientRecord, ClientStatus, Contact, Priority, Tier,
    UsageTrend,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn as_of() -> NaiveDate {
    d(2025, 12, 15)
}

/// A quiet active account that trips no rule on `as_of()`.
fn quiet(id: u32) -> ClientRecord {
    ClientRecord {
        id,
        name: format!("Quiet {id}"),
        tier: Tier::Business,
        manager: "Maria Petrova".to_string(),
        status: ClientStatus::Active,
        health_score: 70,
        mrr: 10_000,
        churn_risk: 0.1,
        last_activity: d(2025, 12, 12),
        nps: 8,
        onboarding_date: d(2025, 2, 1),
        tags: BTreeSet::new(),
        contact: Contact::default(),
        usage_trend: UsageTrend::Stable,
        last_interaction: String::new(),
        next_action: String::new(),
        next_action_date: None,
    }
}

fn categories(records: &[ClientRecord]) -> Vec<Category> {
    generate_recommendations(records, as_of())
        .into_iter()
        .map(|r| r.category)
        .collect()
}

#[test]
fn quiet_portfolio_yields_healthy_sentinel() {
    let recs = generate_recommendations(&[quiet(1), quiet(2)], as_of());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, Category::Portfolio);
    assert!(recs[0].affected_clients.is_empty());
}

#[test]
fn scenario_b_churn_rule_names_the_single_client() {
    let mut risky = quiet(4);
    risky.name = "Northwind".to_string();
    risky.churn_risk = 0.55;
    risky.mrr = 40_000;

    // at_risk-status record with high churn must not be picked up
    let mut not_active = quiet(3);
    not_active.status = ClientStatus::AtRisk;
    not_active.churn_risk = 0.65;

    let recs = generate_recommendations(&[quiet(1), not_active, risky], as_of());
    let churn = recs
        .iter()
        .find(|r| r.category == Category::ChurnPrevention)
        .expect("churn rule fires");

    assert_eq!(churn.priority, Priority::Critical);
    assert_eq!(churn.affected_clients, vec!["Northwind".to_string()]);
    assert!(churn.description.contains("1 client"));
    assert!(churn.description.contains("40000"));
    assert!(churn.action.to_lowercase().contains("urgent outreach"));
}

#[test]
fn churn_rule_truncates_affected_list() {
    let records: Vec<ClientRecord> = (1..=5)
        .map(|id| {
            let mut c = quiet(id);
            c.churn_risk = 0.7;
            c
        })
        .collect();
    let recs = generate_recommendations(&records, as_of());
    assert_eq!(
        recs[0].affected_clients,
        vec!["Quiet 1", "Quiet 2", "Quiet 3", "+2 more"]
    );
}

#[test]
fn schedule_window_is_inclusive_on_both_ends() {
    let mut today = quiet(1);
    today.next_action_date = Some(as_of());
    let mut edge = quiet(2);
    edge.next_action_date = Some(d(2025, 12, 22));
    let mut beyond = quiet(3);
    beyond.next_action_date = Some(d(2025, 12, 23));
    let mut past = quiet(4);
    past.next_action_date = Some(d(2025, 12, 14));

    let recs = generate_recommendations(&[today, edge, beyond, past], as_of());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, Category::ScheduledActions);
    assert_eq!(recs[0].priority, Priority::Medium);
    assert_eq!(recs[0].affected_clients, vec!["Quiet 1", "Quiet 2"]);
}

#[test]
fn growth_rule_requires_health_churn_and_tag() {
    let mut eligible = quiet(1);
    eligible.health_score = 86;
    eligible.churn_risk = 0.05;
    eligible.mrr = 150_000;
    eligible.tags.insert("expansion".to_string());

    let mut no_tag = eligible.clone();
    no_tag.id = 2;
    no_tag.tags.clear();

    let mut health_80 = eligible.clone();
    health_80.id = 3;
    health_80.health_score = 80;

    let mut churn_02 = eligible.clone();
    churn_02.id = 4;
    churn_02.churn_risk = 0.2;

    let recs = generate_recommendations(&[eligible, no_tag, health_80, churn_02], as_of());
    assert_eq!(recs.len(), 1);
    let growth = &recs[0];
    assert_eq!(growth.category, Category::RevenueGrowth);
    assert_eq!(growth.priority, Priority::Low);
    assert_eq!(growth.affected_clients, vec!["Quiet 1"]);
    // 150_000 * 30%
    assert!(growth.description.contains("45000"), "{}", growth.description);
}

#[test]
fn engagement_rule_needs_stale_activity_and_flat_usage() {
    let mut stale_stable = quiet(1);
    stale_stable.last_activity = d(2025, 11, 30);
    let mut stale_decreasing = quiet(2);
    stale_decreasing.last_activity = d(2025, 11, 1);
    stale_decreasing.usage_trend = UsageTrend::Decreasing;
    let mut stale_increasing = quiet(3);
    stale_increasing.last_activity = d(2025, 11, 1);
    stale_increasing.usage_trend = UsageTrend::Increasing;
    // exactly 14 days: not "more than" 14
    let mut boundary = quiet(4);
    boundary.last_activity = d(2025, 12, 1);

    let recs = generate_recommendations(
        &[stale_stable, stale_decreasing, stale_increasing, boundary],
        as_of(),
    );
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, Category::EngagementRisk);
    assert_eq!(recs[0].affected_clients, vec!["Quiet 1", "Quiet 2"]);
}

#[test]
fn payment_rule_escalates_tagged_accounts() {
    let mut late = quiet(1);
    late.tags.insert("payment_delay".to_string());
    let mut churned_late = quiet(2);
    churned_late.status = ClientStatus::Churned;
    churned_late.tags.insert("payment_delay".to_string());

    let recs = generate_recommendations(&[late, churned_late], as_of());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, Category::PaymentIssues);
    assert_eq!(recs[0].priority, Priority::Critical);
    assert!(recs[0].action.to_lowercase().contains("finance"));
    assert_eq!(recs[0].affected_clients, vec!["Quiet 1"]);
}

#[test]
fn all_rules_fire_in_priority_sequence() {
    let mut churn = quiet(1);
    churn.churn_risk = 0.6;
    let mut sched = quiet(2);
    sched.next_action_date = Some(d(2025, 12, 18));
    let mut growth = quiet(3);
    growth.health_score = 90;
    growth.churn_risk = 0.1;
    growth.tags.insert("upsell".to_string());
    let mut idle = quiet(4);
    idle.last_activity = d(2025, 10, 1);
    let mut late = quiet(5);
    late.tags.insert("payment_delay".to_string());

    assert_eq!(
        categories(&[late, idle, growth, sched, churn]),
        vec![
            Category::ChurnPrevention,
            Category::ScheduledActions,
            Category::RevenueGrowth,
            Category::EngagementRisk,
            Category::PaymentIssues,
        ]
    );
}

#[test]
fn one_record_can_trigger_several_rules() {
    let mut c = quiet(1);
    c.churn_risk = 0.7;
    c.last_activity = d(2025, 11, 1);
    c.usage_trend = UsageTrend::Decreasing;
    c.tags.insert("payment_delay".to_string());

    assert_eq!(
        categories(&[c]),
        vec![
            Category::ChurnPrevention,
            Category::EngagementRisk,
            Category::PaymentIssues,
        ]
    );
}

#[test]
fn scenario_c_empty_portfolio_returns_sentinel_only() {
    let recs = generate_recommendations(&[], as_of());
    assert_eq!(recs.len(), 1);
    assert!(recs[0].is_healthy_sentinel());
}
