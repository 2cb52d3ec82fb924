//! csm-portfolio
//!
//! Client portfolio store plus the metrics & recommendation engine.
//! - Store: injected, ordered collection of client records; typed updates
//! - Metrics: active-scoped KPIs, at-risk subset, distributions
//! - Recommendations: fixed-order heuristic rules with a healthy sentinel
//! - Pure deterministic logic (no IO, no clock: callers pass the as-of date)

mod engine;
mod metrics;
mod seed;
mod types;

pub mod recommendations;
pub mod store;

pub use engine::{DashboardSnapshot, Engine};
pub use metrics::{compute_metrics, PortfolioMetrics, AT_RISK_CHURN_THRESHOLD};
pub use recommendations::{generate_recommendations, Category, Priority, Recommendation};
pub use seed::sample_portfolio;
pub use store::{FieldUpdate, PortfolioStore, StoreError};
pub use types::{ClientRecord, ClientStatus, Contact, Tier, UsageTrend};
