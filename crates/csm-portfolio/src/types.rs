use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Commercial tier of an account.
///
/// Ordering is declaration order, which is also the order distributions are
/// reported in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Enterprise,
    Business,
    Startup,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Enterprise, Tier::Business, Tier::Startup];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Enterprise => "Enterprise",
            Tier::Business => "Business",
            Tier::Startup => "Startup",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. Set by the operator; never derived from churn risk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    AtRisk,
    Churned,
}

impl ClientStatus {
    pub const ALL: [ClientStatus; 3] = [
        ClientStatus::Active,
        ClientStatus::AtRisk,
        ClientStatus::Churned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::AtRisk => "at_risk",
            ClientStatus::Churned => "churned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(ClientStatus::Active),
            "at_risk" | "at-risk" => Some(ClientStatus::AtRisk),
            "churned" => Some(ClientStatus::Churned),
            _ => None,
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of product usage over the recent window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageTrend {
    Increasing,
    Stable,
    Decreasing,
    Stopped,
}

impl UsageTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTrend::Increasing => "increasing",
            UsageTrend::Stable => "stable",
            UsageTrend::Decreasing => "decreasing",
            UsageTrend::Stopped => "stopped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increasing" => Some(UsageTrend::Increasing),
            "stable" => Some(UsageTrend::Stable),
            "decreasing" => Some(UsageTrend::Decreasing),
            "stopped" => Some(UsageTrend::Stopped),
            _ => None,
        }
    }
}

impl fmt::Display for UsageTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point of contact on the client side.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One customer account.
///
/// `mrr` is in whole currency units. `churn_risk` is a fraction in [0, 1];
/// `health_score` is 0..=100. The two are independent inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: u32,
    pub name: String,
    pub tier: Tier,
    pub manager: String,
    pub status: ClientStatus,
    pub health_score: u8,
    pub mrr: u64,
    pub churn_risk: f64,
    pub last_activity: NaiveDate,
    pub nps: u8,
    pub onboarding_date: NaiveDate,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub contact: Contact,
    pub usage_trend: UsageTrend,
    #[serde(default)]
    pub last_interaction: String,
    #[serde(default)]
    pub next_action: String,
    #[serde(default)]
    pub next_action_date: Option<NaiveDate>,
}

impl ClientRecord {
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| self.tags.contains(*t))
    }
}
