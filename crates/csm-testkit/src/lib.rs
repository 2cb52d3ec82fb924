//! Shared fixtures for cross-crate scenario tests.
//!
//! Builders here produce fully-populated records so each scenario only
//! states the fields it cares about.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csm_portfolio::{ClientRecord, ClientStatus, Contact, Tier, UsageTrend};

/// Reference date used by every scenario.
pub fn as_of() -> NaiveDate {
    date(2025, 12, 15)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Fluent builder over a quiet active record: recent activity, stable usage,
/// no tags, nothing scheduled. Fires no recommendation rule on its own.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    rec: ClientRecord,
}

impl ClientBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            rec: ClientRecord {
                id,
                name: format!("Client {id}"),
                tier: Tier::Business,
                manager: "Ivan Ivanov".to_string(),
                status: ClientStatus::Active,
                health_score: 70,
                mrr: 10_000,
                churn_risk: 0.1,
                last_activity: as_of(),
                nps: 7,
                onboarding_date: date(2024, 1, 10),
                tags: BTreeSet::new(),
                contact: Contact {
                    name: format!("Contact {id}"),
                    email: format!("contact{id}@client.example"),
                    phone: "+7 (900) 000-00-00".to_string(),
                },
                usage_trend: UsageTrend::Stable,
                last_interaction: String::new(),
                next_action: String::new(),
                next_action_date: None,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.rec.name = name.to_string();
        self
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.rec.tier = tier;
        self
    }

    pub fn status(mut self, status: ClientStatus) -> Self {
        self.rec.status = status;
        self
    }

    pub fn health(mut self, score: u8) -> Self {
        self.rec.health_score = score;
        self
    }

    pub fn mrr(mut self, mrr: u64) -> Self {
        self.rec.mrr = mrr;
        self
    }

    pub fn churn(mut self, risk: f64) -> Self {
        self.rec.churn_risk = risk;
        self
    }

    pub fn nps(mut self, nps: u8) -> Self {
        self.rec.nps = nps;
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.rec.tags.insert(tag.to_string());
        self
    }

    pub fn last_activity(mut self, d: NaiveDate) -> Self {
        self.rec.last_activity = d;
        self
    }

    pub fn usage(mut self, trend: UsageTrend) -> Self {
        self.rec.usage_trend = trend;
        self
    }

    pub fn next_action(mut self, what: &str, when: NaiveDate) -> Self {
        self.rec.next_action = what.to_string();
        self.rec.next_action_date = Some(when);
        self
    }

    pub fn build(self) -> ClientRecord {
        self.rec
    }
}

/// Two active accounts and one at_risk account (150k / 75k / 25k MRR).
pub fn scenario_a() -> Vec<ClientRecord> {
    vec![
        ClientBuilder::new(1)
            .name("TechnoProfit LLC")
            .tier(Tier::Enterprise)
            .health(86)
            .mrr(150_000)
            .churn(0.05)
            .nps(9)
            .build(),
        ClientBuilder::new(2)
            .name("StroyGrad Group")
            .health(72)
            .mrr(75_000)
            .churn(0.15)
            .nps(7)
            .build(),
        ClientBuilder::new(3)
            .name("Sidorov A.V. (sole trader)")
            .tier(Tier::Startup)
            .status(ClientStatus::AtRisk)
            .health(42)
            .mrr(25_000)
            .churn(0.65)
            .nps(3)
            .build(),
    ]
}

/// Scenario A plus one active account above the urgent churn threshold.
pub fn scenario_b() -> Vec<ClientRecord> {
    let mut records = scenario_a();
    records.push(
        ClientBuilder::new(4)
            .name("Volga Retail")
            .mrr(40_000)
            .churn(0.55)
            .health(50)
            .build(),
    );
    records
}

/// Write `records` as a JSON seed file under `dir`.
pub fn write_seed(dir: &Path, records: &[ClientRecord]) -> Result<PathBuf> {
    let path = dir.join("clients.json");
    let body = serde_json::to_string_pretty(records).context("serialize seed failed")?;
    fs::write(&path, body).with_context(|| format!("write seed failed: {}", path.display()))?;
    Ok(path)
}

/// Fresh temp dir for artifact output.
pub fn scratch_dir() -> Result<tempfile::TempDir> {
    tempfile::tempdir().context("create temp dir failed")
}
