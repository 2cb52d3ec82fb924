use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::{compute_metrics, PortfolioMetrics};
use crate::recommendations::{generate_recommendations, Recommendation};
use crate::store::PortfolioStore;

/// Everything one render cycle needs, computed from a single store snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub as_of: NaiveDate,
    pub metrics: PortfolioMetrics,
    pub recommendations: Vec<Recommendation>,
}

/// Read-only view of a store pinned to an as-of date.
///
/// Holds no state of its own; every call recomputes from the store.
pub struct Engine<'a> {
    store: &'a PortfolioStore,
    as_of: NaiveDate,
}

impl<'a> Engine<'a> {
    pub fn new(store: &'a PortfolioStore, as_of: NaiveDate) -> Self {
        Self { store, as_of }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn metrics(&self) -> PortfolioMetrics {
        compute_metrics(self.store.get_all())
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        generate_recommendations(self.store.get_all(), self.as_of)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            as_of: self.as_of,
            metrics: self.metrics(),
            recommendations: self.recommendations(),
        }
    }
}
