//! Command handler modules for csm-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod dashboard;
pub mod files;
pub mod views;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csm_config::DeskConfig;
use csm_portfolio::{
    sample_portfolio, ClientRecord, ClientStatus, DashboardSnapshot, Engine, FieldUpdate,
    PortfolioStore, UsageTrend,
};
use tracing::info;

use crate::console::ConsoleError;
use crate::render::{renderer_for, Renderer, ViewContext};

/// Names accepted by [`parse_field_update`], in menu order.
pub const EDITABLE_FIELDS: [&str; 13] = [
    "name",
    "manager",
    "status",
    "health_score",
    "mrr",
    "churn_risk",
    "nps",
    "usage_trend",
    "add_tag",
    "remove_tag",
    "last_interaction",
    "next_action",
    "next_action_date",
];

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one CLI invocation works with.
pub struct Desk {
    pub store: PortfolioStore,
    pub cfg: DeskConfig,
    pub config_hash: String,
    pub as_of: NaiveDate,
    pub renderer: Box<dyn Renderer>,
}

impl Desk {
    pub fn new(store: PortfolioStore, cfg: DeskConfig, config_hash: String, as_of: NaiveDate) -> Self {
        let renderer = renderer_for(cfg.style);
        Self {
            store,
            cfg,
            config_hash,
            as_of,
            renderer,
        }
    }

    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            operator_name: &self.cfg.operator_name,
            operator_email: &self.cfg.operator_email,
            currency: &self.cfg.currency,
            as_of: self.as_of,
        }
    }

    /// Fresh metrics + recommendations from the current store contents.
    pub fn snapshot(&self) -> DashboardSnapshot {
        Engine::new(&self.store, self.as_of).snapshot()
    }

    pub fn client(&self, id: u32) -> Result<&ClientRecord, ConsoleError> {
        self.store
            .find_by_id(id)
            .ok_or(ConsoleError::NotFound { id })
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load the portfolio from a JSON seed file, or the built-in sample when
/// no path is configured.
pub fn load_portfolio(seed_path: Option<&Path>) -> Result<PortfolioStore> {
    let records = match seed_path {
        Some(p) => {
            let bytes =
                fs::read(p).with_context(|| format!("read seed file failed: {}", p.display()))?;
            let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
            let records: Vec<ClientRecord> = serde_json::from_slice(bytes)
                .with_context(|| format!("seed file must be a JSON array of clients: {}", p.display()))?;
            let store = PortfolioStore::new(records)
                .with_context(|| format!("seed file rejected: {}", p.display()))?;
            info!(path = %p.display(), clients = store.len(), "portfolio loaded from seed file");
            return Ok(store);
        }
        None => {
            let records = sample_portfolio();
            info!(clients = records.len(), "portfolio loaded from built-in sample");
            records
        }
    };
    PortfolioStore::new(records).context("built-in portfolio rejected")
}

/// Parse an operator-typed client id.
pub fn parse_client_id(raw: &str) -> Result<u32, ConsoleError> {
    let raw = raw.trim();
    raw.parse::<u32>()
        .map_err(|_| ConsoleError::InvalidInput(format!("'{raw}' is not a client id")))
}

/// Parse an operator-typed `field` / `value` pair into a store update.
///
/// Range checks (health 0..=100, churn 0..=1) stay with the store; this only
/// checks that the value has the right shape.
pub fn parse_field_update(field: &str, value: &str) -> Result<FieldUpdate, ConsoleError> {
    let value = value.trim();
    let bad = |expected: &str| {
        ConsoleError::InvalidInput(format!("{field} expects {expected}, got '{value}'"))
    };

    let update = match field.trim().to_ascii_lowercase().as_str() {
        "name" => FieldUpdate::Name(value.to_string()),
        "manager" => FieldUpdate::Manager(value.to_string()),
        "status" => FieldUpdate::Status(
            ClientStatus::parse(value).ok_or_else(|| bad("active | at_risk | churned"))?,
        ),
        "health_score" | "health" => {
            FieldUpdate::HealthScore(value.parse().map_err(|_| bad("an integer 0..=100"))?)
        }
        "mrr" => FieldUpdate::Mrr(value.parse().map_err(|_| bad("a whole amount"))?),
        "churn_risk" | "risk" => {
            FieldUpdate::ChurnRisk(value.parse().map_err(|_| bad("a fraction 0.0..=1.0"))?)
        }
        "nps" => FieldUpdate::Nps(value.parse().map_err(|_| bad("an integer 0..=10"))?),
        "usage_trend" => FieldUpdate::UsageTrend(
            UsageTrend::parse(value).ok_or_else(|| bad("increasing | stable | decreasing | stopped"))?,
        ),
        "add_tag" => FieldUpdate::AddTag(value.to_string()),
        "remove_tag" => FieldUpdate::RemoveTag(value.to_string()),
        "last_interaction" => FieldUpdate::LastInteraction(value.to_string()),
        "next_action" => FieldUpdate::NextAction(value.to_string()),
        "next_action_date" => {
            if value.is_empty() || value == "-" {
                FieldUpdate::NextActionDate(None)
            } else {
                FieldUpdate::NextActionDate(Some(parse_date(value).map_err(|_| bad("YYYY-MM-DD or -"))?))
            }
        }
        other => {
            return Err(ConsoleError::InvalidInput(format!(
                "unknown field '{other}'. editable: {}",
                EDITABLE_FIELDS.join(", ")
            )))
        }
    };
    Ok(update)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn client_id_must_be_numeric() {
        assert_eq!(parse_client_id(" 2 "), Ok(2));
        assert!(matches!(
            parse_client_id("two"),
            Err(ConsoleError::InvalidInput(_))
        ));
        assert!(matches!(parse_client_id("-1"), Err(ConsoleError::InvalidInput(_))));
    }

    #[test]
    fn field_updates_parse_by_shape() {
        assert_eq!(
            parse_field_update("health_score", "91"),
            Ok(FieldUpdate::HealthScore(91))
        );
        assert_eq!(
            parse_field_update("status", "at_risk"),
            Ok(FieldUpdate::Status(ClientStatus::AtRisk))
        );
        assert_eq!(
            parse_field_update("next_action_date", "-"),
            Ok(FieldUpdate::NextActionDate(None))
        );
        assert!(parse_field_update("health_score", "lots").is_err());
        assert!(parse_field_update("tier", "Startup").is_err());
    }

    #[test]
    fn out_of_range_values_are_left_to_the_store() {
        // 150 fits in u8, so parsing succeeds and the store rejects it.
        assert_eq!(
            parse_field_update("health_score", "150"),
            Ok(FieldUpdate::HealthScore(150))
        );
    }

    #[test]
    fn seed_file_with_bom_loads() {
        let records = sample_portfolio();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        f.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let store = load_portfolio(Some(f.path())).unwrap();
        assert_eq!(store.get_all(), records.as_slice());
    }

    #[test]
    fn out_of_range_seed_record_is_rejected() {
        let mut records = sample_portfolio();
        records[0].health_score = 250;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let err = load_portfolio(Some(f.path())).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("seed file rejected"), "{msg}");
        assert!(msg.contains("client 1 has invalid health_score"), "{msg}");
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let err = load_portfolio(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("read seed file failed"));
    }
}
