//! Portfolio store — the ordered, in-memory collection of client records.
//!
//! # Purpose
//! The store owns the records and exposes the minimal surface the console
//! needs:
//!
//! - Construction from an injected collection (seed file, fixture, or the
//!   built-in sample). Nothing is hardcoded here.
//! - Read-only access in stable insertion order.
//! - Lookup by id (absent is `None`, never an error).
//! - Typed single-field updates that validate ranges before touching state.
//!
//! There is no create/delete flow. Access is single-threaded; `&mut self` on
//! [`PortfolioStore::update_field`] is the only write guard.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::types::{ClientRecord, ClientStatus, Contact, UsageTrend};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures surfaced by [`PortfolioStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No record carries this id.
    NotFound { id: u32 },
    /// Two records in the injected collection share an id.
    DuplicateId { id: u32 },
    /// Ids must be positive.
    ZeroId { name: String },
    /// The update value is outside the field's domain. Record left unchanged.
    InvalidValue { field: &'static str, reason: String },
    /// An injected record carries an out-of-domain field.
    InvalidRecord {
        id: u32,
        field: &'static str,
        reason: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "client {id} not found"),
            Self::DuplicateId { id } => write!(f, "duplicate client id {id} in portfolio"),
            Self::ZeroId { name } => write!(f, "client '{name}' has id 0; ids must be positive"),
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid value for {field}: {reason}")
            }
            Self::InvalidRecord { id, field, reason } => {
                write!(f, "client {id} has invalid {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

/// One field change applied by [`PortfolioStore::update_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Manager(String),
    Status(ClientStatus),
    HealthScore(u8),
    Mrr(u64),
    ChurnRisk(f64),
    LastActivity(NaiveDate),
    Nps(u8),
    UsageTrend(UsageTrend),
    Contact(Contact),
    AddTag(String),
    RemoveTag(String),
    Tags(BTreeSet<String>),
    LastInteraction(String),
    NextAction(String),
    NextActionDate(Option<NaiveDate>),
}

impl FieldUpdate {
    /// Field name as it appears in the seed file.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Manager(_) => "manager",
            Self::Status(_) => "status",
            Self::HealthScore(_) => "health_score",
            Self::Mrr(_) => "mrr",
            Self::ChurnRisk(_) => "churn_risk",
            Self::LastActivity(_) => "last_activity",
            Self::Nps(_) => "nps",
            Self::UsageTrend(_) => "usage_trend",
            Self::Contact(_) => "contact",
            Self::AddTag(_) | Self::RemoveTag(_) | Self::Tags(_) => "tags",
            Self::LastInteraction(_) => "last_interaction",
            Self::NextAction(_) => "next_action",
            Self::NextActionDate(_) => "next_action_date",
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        match self {
            Self::HealthScore(h) if *h > 100 => Err(StoreError::InvalidValue {
                field: self.field_name(),
                reason: format!("{h} is outside 0..=100"),
            }),
            Self::ChurnRisk(r) if !(0.0..=1.0).contains(r) => Err(StoreError::InvalidValue {
                field: self.field_name(),
                reason: format!("{r} is outside 0.0..=1.0"),
            }),
            Self::Name(s) if s.trim().is_empty() => Err(StoreError::InvalidValue {
                field: self.field_name(),
                reason: "must not be empty".to_string(),
            }),
            Self::AddTag(t) | Self::RemoveTag(t) if t.trim().is_empty() => {
                Err(StoreError::InvalidValue {
                    field: self.field_name(),
                    reason: "tag must not be empty".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn apply(self, rec: &mut ClientRecord) {
        match self {
            Self::Name(v) => rec.name = v,
            Self::Manager(v) => rec.manager = v,
            Self::Status(v) => rec.status = v,
            Self::HealthScore(v) => rec.health_score = v,
            Self::Mrr(v) => rec.mrr = v,
            Self::ChurnRisk(v) => rec.churn_risk = v,
            Self::LastActivity(v) => rec.last_activity = v,
            Self::Nps(v) => rec.nps = v,
            Self::UsageTrend(v) => rec.usage_trend = v,
            Self::Contact(v) => rec.contact = v,
            Self::AddTag(t) => {
                rec.tags.insert(t);
            }
            Self::RemoveTag(t) => {
                rec.tags.remove(&t);
            }
            Self::Tags(v) => rec.tags = v,
            Self::LastInteraction(v) => rec.last_interaction = v,
            Self::NextAction(v) => rec.next_action = v,
            Self::NextActionDate(v) => rec.next_action_date = v,
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct PortfolioStore {
    records: Vec<ClientRecord>,
    /// id -> position in `records`.
    index: HashMap<u32, usize>,
}

impl PortfolioStore {
    /// Build a store from an injected collection, preserving its order.
    ///
    /// Every record must pass the same domain checks as [`Self::update_field`].
    pub fn new(records: Vec<ClientRecord>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, rec) in records.iter().enumerate() {
            if rec.id == 0 {
                return Err(StoreError::ZeroId {
                    name: rec.name.clone(),
                });
            }
            check_record(rec)?;
            if index.insert(rec.id, pos).is_some() {
                return Err(StoreError::DuplicateId { id: rec.id });
            }
        }
        Ok(Self { records, index })
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn find_by_id(&self, id: u32) -> Option<&ClientRecord> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Apply one field change.
    ///
    /// Unknown ids yield [`StoreError::NotFound`]; out-of-range values yield
    /// [`StoreError::InvalidValue`]. In both cases nothing is modified.
    pub fn update_field(&mut self, id: u32, update: FieldUpdate) -> Result<(), StoreError> {
        let pos = *self.index.get(&id).ok_or(StoreError::NotFound { id })?;
        update.validate()?;
        update.apply(&mut self.records[pos]);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with a next-action date on or after `from`, soonest first
    /// (ties broken by id).
    pub fn upcoming_actions(&self, from: NaiveDate) -> Vec<&ClientRecord> {
        let mut out: Vec<&ClientRecord> = self
            .records
            .iter()
            .filter(|r| r.next_action_date.is_some_and(|d| d >= from))
            .collect();
        out.sort_by_key(|r| (r.next_action_date, r.id));
        out
    }

    /// Hand the records back, e.g. to reseed a new store.
    pub fn into_records(self) -> Vec<ClientRecord> {
        self.records
    }
}

/// Domain checks an injected record must pass (same rules as updates).
fn check_record(rec: &ClientRecord) -> Result<(), StoreError> {
    let checks = [
        FieldUpdate::Name(rec.name.clone()),
        FieldUpdate::HealthScore(rec.health_score),
        FieldUpdate::ChurnRisk(rec.churn_risk),
    ];
    for check in checks {
        if let Err(StoreError::InvalidValue { field, reason }) = check.validate() {
            return Err(StoreError::InvalidRecord {
                id: rec.id,
                field,
                reason,
            });
        }
    }
    Ok(())
}
