//! Built-in demo portfolio.
//!
//! Used by the console when no seed file is configured. It is plain data
//! handed to [`crate::PortfolioStore::new`]; the store itself knows nothing
//! about it.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::types::{ClientRecord, ClientStatus, Contact, Tier, UsageTrend};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Three-account sample: a healthy enterprise expansion candidate, a stable
/// mid-market account, and a startup flagged at risk.
pub fn sample_portfolio() -> Vec<ClientRecord> {
    vec![
        ClientRecord {
            id: 1,
            name: "TechnoProfit LLC".to_string(),
            tier: Tier::Enterprise,
            manager: "Ivan Ivanov".to_string(),
            status: ClientStatus::Active,
            health_score: 86,
            mrr: 150_000,
            churn_risk: 0.05,
            last_activity: date(2025, 12, 10),
            nps: 9,
            onboarding_date: date(2025, 1, 15),
            tags: tags(&["tech", "high_value", "expansion"]),
            contact: Contact {
                name: "Alexey Petrov".to_string(),
                email: "alexey@techprofit.example".to_string(),
                phone: "+7 (999) 123-45-67".to_string(),
            },
            usage_trend: UsageTrend::Increasing,
            last_interaction: "New feature demo".to_string(),
            next_action: "Discuss plan upgrade".to_string(),
            next_action_date: Some(date(2025, 12, 20)),
        },
        ClientRecord {
            id: 2,
            name: "StroyGrad Group".to_string(),
            tier: Tier::Business,
            manager: "Maria Petrova".to_string(),
            status: ClientStatus::Active,
            health_score: 72,
            mrr: 75_000,
            churn_risk: 0.15,
            last_activity: date(2025, 12, 12),
            nps: 7,
            onboarding_date: date(2025, 3, 20),
            tags: tags(&["construction", "stable"]),
            contact: Contact {
                name: "Sergey Ivanov".to_string(),
                email: "sergey@stroygrad.example".to_string(),
                phone: "+7 (999) 234-56-78".to_string(),
            },
            usage_trend: UsageTrend::Stable,
            last_interaction: "Staff training".to_string(),
            next_action: "Effectiveness review".to_string(),
            next_action_date: Some(date(2025, 12, 18)),
        },
        ClientRecord {
            id: 3,
            name: "Sidorov A.V. (sole trader)".to_string(),
            tier: Tier::Startup,
            manager: "Ivan Ivanov".to_string(),
            status: ClientStatus::AtRisk,
            health_score: 42,
            mrr: 25_000,
            churn_risk: 0.65,
            last_activity: date(2025, 11, 28),
            nps: 3,
            onboarding_date: date(2025, 6, 10),
            tags: tags(&["risk", "needs_attention"]),
            contact: Contact {
                name: "Andrey Sidorov".to_string(),
                email: "andrey@sidorov.example".to_string(),
                phone: "+7 (999) 345-67-89".to_string(),
            },
            usage_trend: UsageTrend::Decreasing,
            last_interaction: "Integration problems".to_string(),
            next_action: "Urgent call".to_string(),
            next_action_date: Some(date(2025, 12, 16)),
        },
    ]
}
