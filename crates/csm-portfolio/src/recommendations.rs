//! Heuristic "next action" alerts over the current portfolio.
//!
//! Rules are evaluated independently and emitted in a fixed order:
//!
//! | # | Rule               | Priority | Selects (active records only)                         |
//! |---|--------------------|----------|-------------------------------------------------------|
//! | 1 | churn prevention   | critical | churn_risk > 0.5                                      |
//! | 2 | scheduled actions  | medium   | next_action_date in [as_of, as_of + 7d]               |
//! | 3 | revenue growth     | low      | health > 80, churn_risk < 0.2, upsell tag             |
//! | 4 | engagement risk    | medium   | last_activity < as_of - 14d, usage stable/decreasing  |
//! | 5 | payment issues     | critical | payment-delay tag                                     |
//!
//! When nothing fires the result is a single "portfolio healthy" entry, so the
//! output is never empty.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::types::{ClientRecord, UsageTrend};

pub const URGENT_CHURN_THRESHOLD: f64 = 0.5;
pub const SCHEDULE_WINDOW_DAYS: i64 = 7;
pub const UPSELL_MIN_HEALTH: u8 = 80;
pub const UPSELL_MAX_CHURN: f64 = 0.2;
/// Illustrative uplift applied to upsell candidates' MRR.
pub const UPSELL_UPLIFT_PCT: u64 = 30;
pub const INACTIVITY_DAYS: i64 = 14;
/// Names shown per recommendation before collapsing into "+N more".
pub const AFFECTED_PREVIEW: usize = 3;

/// Tags marking an account as upsell-eligible.
pub const UPSELL_TAGS: &[&str] = &["expansion", "upsell"];
/// Tags marking an account with overdue invoices.
pub const PAYMENT_DELAY_TAGS: &[&str] = &["payment_delay", "payment_issues"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule produced a recommendation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ChurnPrevention,
    ScheduledActions,
    RevenueGrowth,
    EngagementRisk,
    PaymentIssues,
    /// Sentinel emitted when no rule fires.
    Portfolio,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ChurnPrevention => "churn_prevention",
            Category::ScheduledActions => "scheduled_actions",
            Category::RevenueGrowth => "revenue_growth",
            Category::EngagementRisk => "engagement_risk",
            Category::PaymentIssues => "payment_issues",
            Category::Portfolio => "portfolio",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub action: String,
    /// Up to [`AFFECTED_PREVIEW`] names, then a "+N more" entry if truncated.
    pub affected_clients: Vec<String>,
}

impl Recommendation {
    pub fn is_healthy_sentinel(&self) -> bool {
        self.category == Category::Portfolio
    }
}

/// Cap a name list, appending a "+N more" summary when truncated.
pub fn preview_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let all: Vec<&str> = names.into_iter().collect();
    let mut out: Vec<String> = all
        .iter()
        .take(AFFECTED_PREVIEW)
        .map(|s| s.to_string())
        .collect();
    if all.len() > AFFECTED_PREVIEW {
        out.push(format!("+{} more", all.len() - AFFECTED_PREVIEW));
    }
    out
}

fn affected(selected: &[&ClientRecord]) -> Vec<String> {
    preview_names(selected.iter().map(|r| r.name.as_str()))
}

fn mrr_sum(selected: &[&ClientRecord]) -> u64 {
    selected.iter().fold(0u64, |acc, r| acc.saturating_add(r.mrr))
}

/// Σ mrr × UPSELL_UPLIFT_PCT / 100, floored.
pub fn upsell_uplift(selected: &[&ClientRecord]) -> u64 {
    let total: u128 = selected
        .iter()
        .map(|r| u128::from(r.mrr) * u128::from(UPSELL_UPLIFT_PCT))
        .sum::<u128>()
        / 100;
    u64::try_from(total).unwrap_or(u64::MAX)
}

/// Evaluate all rules against `records` as of the calendar date `as_of`.
pub fn generate_recommendations(records: &[ClientRecord], as_of: NaiveDate) -> Vec<Recommendation> {
    let active: Vec<&ClientRecord> = records.iter().filter(|r| r.is_active()).collect();
    let mut out = Vec::new();

    // 1) churn prevention
    let urgent: Vec<&ClientRecord> = active
        .iter()
        .copied()
        .filter(|r| r.churn_risk > URGENT_CHURN_THRESHOLD)
        .collect();
    if !urgent.is_empty() {
        out.push(Recommendation {
            priority: Priority::Critical,
            category: Category::ChurnPrevention,
            title: "Churn prevention".to_string(),
            description: format!(
                "{} client(s) with churn risk above {:.0}%; MRR at risk: {}",
                urgent.len(),
                URGENT_CHURN_THRESHOLD * 100.0,
                mrr_sum(&urgent)
            ),
            action: "Initiate urgent outreach today: emergency call with the decision maker"
                .to_string(),
            affected_clients: affected(&urgent),
        });
    }

    // 2) scheduled actions
    let window_end = as_of + Duration::days(SCHEDULE_WINDOW_DAYS);
    let scheduled: Vec<&ClientRecord> = active
        .iter()
        .copied()
        .filter(|r| {
            r.next_action_date
                .is_some_and(|d| d >= as_of && d <= window_end)
        })
        .collect();
    if !scheduled.is_empty() {
        out.push(Recommendation {
            priority: Priority::Medium,
            category: Category::ScheduledActions,
            title: "Scheduled actions this week".to_string(),
            description: format!(
                "{} planned action(s) due within {} days",
                scheduled.len(),
                SCHEDULE_WINDOW_DAYS
            ),
            action: "Confirm meetings and prepare agendas for the planned actions".to_string(),
            affected_clients: affected(&scheduled),
        });
    }

    // 3) revenue growth
    let upsell: Vec<&ClientRecord> = active
        .iter()
        .copied()
        .filter(|r| {
            r.health_score > UPSELL_MIN_HEALTH
                && r.churn_risk < UPSELL_MAX_CHURN
                && r.has_any_tag(UPSELL_TAGS)
        })
        .collect();
    if !upsell.is_empty() {
        out.push(Recommendation {
            priority: Priority::Low,
            category: Category::RevenueGrowth,
            title: "Revenue growth opportunity".to_string(),
            description: format!(
                "{} healthy client(s) eligible for upsell; potential uplift ~{} MRR (illustrative, +{}%)",
                upsell.len(),
                upsell_uplift(&upsell),
                UPSELL_UPLIFT_PCT
            ),
            action: "Schedule an expansion conversation and present the next plan tier"
                .to_string(),
            affected_clients: affected(&upsell),
        });
    }

    // 4) engagement risk
    let inactive_before = as_of - Duration::days(INACTIVITY_DAYS);
    let disengaged: Vec<&ClientRecord> = active
        .iter()
        .copied()
        .filter(|r| {
            r.last_activity < inactive_before
                && matches!(r.usage_trend, UsageTrend::Stable | UsageTrend::Decreasing)
        })
        .collect();
    if !disengaged.is_empty() {
        out.push(Recommendation {
            priority: Priority::Medium,
            category: Category::EngagementRisk,
            title: "Engagement risk".to_string(),
            description: format!(
                "{} client(s) inactive for more than {} days with flat or falling usage",
                disengaged.len(),
                INACTIVITY_DAYS
            ),
            action: "Send check-in emails and offer a usage review session".to_string(),
            affected_clients: affected(&disengaged),
        });
    }

    // 5) payment issues
    let overdue: Vec<&ClientRecord> = active
        .iter()
        .copied()
        .filter(|r| r.has_any_tag(PAYMENT_DELAY_TAGS))
        .collect();
    if !overdue.is_empty() {
        out.push(Recommendation {
            priority: Priority::Critical,
            category: Category::PaymentIssues,
            title: "Payment issues".to_string(),
            description: format!(
                "{} client(s) with delayed payments; affected MRR: {}",
                overdue.len(),
                mrr_sum(&overdue)
            ),
            action: "Escalate to finance and agree a payment plan with the client".to_string(),
            affected_clients: affected(&overdue),
        });
    }

    if out.is_empty() {
        out.push(healthy_portfolio());
    }
    out
}

fn healthy_portfolio() -> Recommendation {
    Recommendation {
        priority: Priority::Low,
        category: Category::Portfolio,
        title: "Portfolio healthy".to_string(),
        description: "No churn, engagement, scheduling or payment signals need attention"
            .to_string(),
        action: "Keep the regular check-in cadence".to_string(),
        affected_clients: Vec::new(),
    }
}
