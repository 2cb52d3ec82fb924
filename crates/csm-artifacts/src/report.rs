use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use csm_portfolio::{ClientRecord, ClientStatus, DashboardSnapshot, Tier, AT_RISK_CHURN_THRESHOLD};
use serde::Serialize;
use tracing::info;

use crate::format::{format_amount, format_risk_pct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Portfolio KPIs plus the current recommendations.
    Weekly,
    /// Accounts that need retention work.
    Risk,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Weekly => "weekly",
            ReportKind::Risk => "risk",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(ReportKind::Weekly),
            "risk" => Ok(ReportKind::Risk),
            other => bail!("invalid report kind '{}'. expected one of: weekly | risk", other),
        }
    }
}

/// Inputs shared by every report.
pub struct ReportContext<'a> {
    pub records: &'a [ClientRecord],
    pub snapshot: &'a DashboardSnapshot,
    pub operator_name: &'a str,
    pub currency: &'a str,
    pub generated_at: NaiveDateTime,
}

/// `report_<kind>_<YYYYMMDD_HHMMSS>.txt`
pub fn report_file_name(kind: ReportKind, generated_at: NaiveDateTime) -> String {
    format!(
        "report_{}_{}.txt",
        kind.as_str(),
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Render a report as free text. Layout is informational, not a contract.
pub fn render_report(kind: ReportKind, ctx: &ReportContext<'_>) -> String {
    let m = &ctx.snapshot.metrics;
    let cur = ctx.currency;
    let mut s = String::new();

    let title = match kind {
        ReportKind::Weekly => "WEEKLY PORTFOLIO REPORT",
        ReportKind::Risk => "RISK REPORT",
    };
    let _ = writeln!(s, "{title}");
    let _ = writeln!(s, "{}", "=".repeat(60));
    let _ = writeln!(s, "Generated: {}", ctx.generated_at.format("%d.%m.%Y %H:%M"));
    let _ = writeln!(s, "As of:     {}", ctx.snapshot.as_of);
    let _ = writeln!(s, "Manager:   {}", ctx.operator_name);
    let _ = writeln!(s);

    match kind {
        ReportKind::Weekly => {
            let _ = writeln!(s, "KEY METRICS");
            let _ = writeln!(s, "{}", "-".repeat(40));
            let _ = writeln!(s, "Active clients:   {}", m.total_clients);
            let _ = writeln!(s, "Total MRR:        {} {cur}", format_amount(m.total_mrr));
            let _ = writeln!(s, "Avg health score: {:.1}/100", m.avg_health_score);
            let _ = writeln!(s, "Avg NPS:          {:.1}/10", m.avg_nps);
            let _ = writeln!(
                s,
                "At risk:          {} ({} {cur})",
                m.at_risk_count,
                format_amount(m.at_risk_mrr)
            );
            let _ = writeln!(
                s,
                "Churned:          {} ({} {cur})",
                m.total_churned,
                format_amount(m.churned_mrr)
            );
            let _ = writeln!(s);

            let _ = writeln!(s, "STATUS DISTRIBUTION (all clients)");
            for status in ClientStatus::ALL {
                let _ = writeln!(s, "  {:<10} {}", status.as_str(), m.status_count(status));
            }
            let _ = writeln!(s, "TIER DISTRIBUTION (active clients)");
            for tier in Tier::ALL {
                let _ = writeln!(s, "  {:<10} {}", tier.as_str(), m.tier_count(tier));
            }
            let _ = writeln!(s);

            let _ = writeln!(s, "RECOMMENDATIONS");
            let _ = writeln!(s, "{}", "-".repeat(40));
            for rec in &ctx.snapshot.recommendations {
                let _ = writeln!(s, "[{}] {}", rec.priority.as_str().to_uppercase(), rec.title);
                let _ = writeln!(s, "    {}", rec.description);
                let _ = writeln!(s, "    Action: {}", rec.action);
                if !rec.affected_clients.is_empty() {
                    let _ = writeln!(s, "    Clients: {}", rec.affected_clients.join(", "));
                }
            }
        }
        ReportKind::Risk => {
            let flagged: Vec<&ClientRecord> = ctx
                .records
                .iter()
                .filter(|r| {
                    r.status == ClientStatus::AtRisk
                        || (r.is_active() && r.churn_risk > AT_RISK_CHURN_THRESHOLD)
                })
                .collect();

            let _ = writeln!(
                s,
                "Active at-risk clients: {} | MRR at risk: {} {cur}",
                m.at_risk_count,
                format_amount(m.at_risk_mrr)
            );
            let _ = writeln!(s);
            if flagged.is_empty() {
                let _ = writeln!(s, "No clients flagged.");
            } else {
                let _ = writeln!(
                    s,
                    "{:<4} {:<28} {:<10} {:<7} {:<8} {:<12}",
                    "ID", "Client", "Status", "Health", "Risk", "MRR"
                );
                for r in flagged {
                    let _ = writeln!(
                        s,
                        "{:<4} {:<28} {:<10} {:<7} {:<8} {:<12}",
                        r.id,
                        truncate(&r.name, 26),
                        r.status.as_str(),
                        r.health_score,
                        format_risk_pct(r.churn_risk),
                        format_amount(r.mrr)
                    );
                    if !r.next_action.is_empty() {
                        let _ = writeln!(s, "     next: {}", r.next_action);
                    }
                }
            }
        }
    }

    s
}

/// Render and write a report into `dir`, returning the file path.
pub fn write_report(dir: &Path, kind: ReportKind, ctx: &ReportContext<'_>) -> Result<PathBuf> {
    crate::ensure_dir(dir)?;
    let path = dir.join(report_file_name(kind, ctx.generated_at));
    let body = render_report(kind, ctx);
    fs::write(&path, body).with_context(|| format!("write report failed: {}", path.display()))?;
    info!(path = %path.display(), kind = kind.as_str(), "report written");
    Ok(path)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
