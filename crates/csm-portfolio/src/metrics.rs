use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{ClientRecord, ClientStatus, Tier};

/// Active clients with churn risk strictly above this count as "at risk".
pub const AT_RISK_CHURN_THRESHOLD: f64 = 0.3;

/// Portfolio KPIs derived from the current records. Never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PortfolioMetrics {
    /// Σ MRR over active records.
    pub total_mrr: u64,
    /// Number of active records.
    pub total_clients: usize,
    /// Mean health over active records, one decimal. 0.0 when none are active.
    pub avg_health_score: f64,
    /// Mean NPS over active records, one decimal. 0.0 when none are active.
    pub avg_nps: f64,
    /// Counts over the whole collection.
    pub status_distribution: BTreeMap<ClientStatus, usize>,
    /// Counts over active records only.
    pub tier_distribution: BTreeMap<Tier, usize>,
    pub at_risk_count: usize,
    pub at_risk_mrr: u64,
    pub total_churned: usize,
    pub churned_mrr: u64,
}

impl PortfolioMetrics {
    pub fn status_count(&self, status: ClientStatus) -> usize {
        self.status_distribution.get(&status).copied().unwrap_or(0)
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tier_distribution.get(&tier).copied().unwrap_or(0)
    }
}

/// Round to one decimal place, ties to even (`72.25` -> `72.2`, `72.35` -> `72.4`).
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

fn mean_round1(sum: u64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    round1(sum as f64 / n as f64)
}

/// Aggregate KPIs over `records` in a single pass.
///
/// Status distribution counts every record; everything else (MRR, averages,
/// tier distribution, at-risk subset) is scoped to `status == active`.
/// Churned totals count records whose status is churned.
pub fn compute_metrics(records: &[ClientRecord]) -> PortfolioMetrics {
    let mut total_mrr: u64 = 0;
    let mut active: usize = 0;
    let mut health_sum: u64 = 0;
    let mut nps_sum: u64 = 0;
    let mut status_distribution = BTreeMap::new();
    let mut tier_distribution = BTreeMap::new();
    let mut at_risk_count = 0;
    let mut at_risk_mrr: u64 = 0;
    let mut total_churned = 0;
    let mut churned_mrr: u64 = 0;

    for rec in records {
        *status_distribution.entry(rec.status).or_insert(0) += 1;

        match rec.status {
            ClientStatus::Active => {
                active += 1;
                total_mrr = total_mrr.saturating_add(rec.mrr);
                health_sum += u64::from(rec.health_score);
                nps_sum += u64::from(rec.nps);
                *tier_distribution.entry(rec.tier).or_insert(0) += 1;

                if rec.churn_risk > AT_RISK_CHURN_THRESHOLD {
                    at_risk_count += 1;
                    at_risk_mrr = at_risk_mrr.saturating_add(rec.mrr);
                }
            }
            ClientStatus::Churned => {
                total_churned += 1;
                churned_mrr = churned_mrr.saturating_add(rec.mrr);
            }
            ClientStatus::AtRisk => {}
        }
    }

    PortfolioMetrics {
        total_mrr,
        total_clients: active,
        avg_health_score: mean_round1(health_sum, active),
        avg_nps: mean_round1(nps_sum, active),
        status_distribution,
        tier_distribution,
        at_risk_count,
        at_risk_mrr,
        total_churned,
        churned_mrr,
    }
}
