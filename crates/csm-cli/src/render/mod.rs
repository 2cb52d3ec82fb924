//! Interchangeable console renderers.
//!
//! Layout lives in the default methods of [`Renderer`]; each style only
//! overrides the decoration hooks (markers, colours). Padding is applied
//! before painting so ANSI escapes never skew column widths.

mod ansi;
mod emoji;
mod icons;
mod plain;

pub use ansi::AnsiRenderer;
pub use emoji::EmojiRenderer;
pub use icons::IconRenderer;
pub use plain::PlainRenderer;

use std::fmt::Write as _;

use chrono::NaiveDate;
use csm_artifacts::{format_amount, format_risk_pct, EmailDraft, EmailTemplate};
use csm_config::{DeskConfig, RenderStyle};
use csm_portfolio::{ClientRecord, ClientStatus, PortfolioMetrics, Priority, Recommendation};

pub const RULE_WIDE: usize = 70;
pub const RULE_NARROW: usize = 50;

/// Menu entries of the interactive loop, in display order.
pub const MENU_ITEMS: [(&str, Section, &str); 9] = [
    ("1", Section::Detail, "Client detail"),
    ("2", Section::Email, "Email drafts"),
    ("3", Section::Report, "Create report"),
    ("4", Section::Schedule, "Upcoming actions"),
    ("5", Section::Refresh, "Refresh metrics"),
    ("6", Section::Export, "Export to CSV"),
    ("7", Section::Settings, "Settings"),
    ("8", Section::Exit, "Exit"),
    ("9", Section::Update, "Update client field"),
];

/// Which block of the screen a heading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Metrics,
    Clients,
    Recommendations,
    Detail,
    Email,
    Report,
    Schedule,
    Refresh,
    Export,
    Settings,
    Exit,
    Update,
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Good,
    Fair,
    Poor,
}

impl HealthBand {
    pub fn of(score: u8) -> Self {
        if score >= 80 {
            HealthBand::Good
        } else if score >= 60 {
            HealthBand::Fair
        } else {
            HealthBand::Poor
        }
    }
}

/// Operator-facing facts every view may print.
pub struct ViewContext<'a> {
    pub operator_name: &'a str,
    pub operator_email: &'a str,
    pub currency: &'a str,
    pub as_of: NaiveDate,
}

pub fn status_label(status: ClientStatus) -> &'static str {
    match status {
        ClientStatus::Active => "Active",
        ClientStatus::AtRisk => "At risk",
        ClientStatus::Churned => "Churned",
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

pub trait Renderer {
    // ---- decoration hooks -------------------------------------------------

    /// Prefix placed before a section title.
    fn section_marker(&self, _section: Section) -> String {
        String::new()
    }

    fn paint_title(&self, text: &str) -> String {
        text.to_string()
    }

    fn priority_marker(&self, priority: Priority) -> String {
        format!("[{}]", priority.as_str().to_uppercase())
    }

    fn paint_priority(&self, _priority: Priority, text: &str) -> String {
        text.to_string()
    }

    fn paint_health(&self, _score: u8, text: &str) -> String {
        text.to_string()
    }

    fn health_marker(&self, _score: u8) -> String {
        String::new()
    }

    fn paint_status(&self, _status: ClientStatus, text: &str) -> String {
        text.to_string()
    }

    fn ok(&self, msg: &str) -> String {
        format!("[OK] {msg}")
    }

    fn error(&self, msg: &str) -> String {
        format!("[ERROR] {msg}")
    }

    // ---- layout -----------------------------------------------------------

    fn heading(&self, section: Section, title: &str) -> String {
        let marker = self.section_marker(section);
        let text = if marker.is_empty() {
            title.to_string()
        } else {
            format!("{marker} {title}")
        };
        format!("{}\n{}\n", self.paint_title(&text), "-".repeat(RULE_NARROW))
    }

    fn header(&self, ctx: &ViewContext<'_>, m: &PortfolioMetrics) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "{}", "=".repeat(RULE_WIDE));
        let _ = writeln!(s, "{}", self.paint_title("                CSM DESK"));
        let _ = writeln!(s, "           Customer Success Manager Console");
        let _ = writeln!(s, "{}", "=".repeat(RULE_WIDE));
        let _ = writeln!(s, "Date: {}", ctx.as_of.format("%d %B %Y, %A"));
        let _ = writeln!(
            s,
            "Manager: {} | Email: {}",
            ctx.operator_name, ctx.operator_email
        );
        let _ = writeln!(s, "Portfolio: {} active clients", m.total_clients);
        let _ = writeln!(s, "Total MRR: {} {}", format_amount(m.total_mrr), ctx.currency);
        s
    }

    fn metrics(&self, ctx: &ViewContext<'_>, m: &PortfolioMetrics) -> String {
        let mut s = self.heading(Section::Metrics, "KEY PORTFOLIO METRICS");
        let cur = ctx.currency;
        let _ = writeln!(s, "  MRR:              {} {cur}", format_amount(m.total_mrr));
        let _ = writeln!(s, "  Active clients:   {}", m.total_clients);
        let _ = writeln!(
            s,
            "  Health score:     {}",
            self.paint_health(m.avg_health_score.round() as u8, &format!("{:.1}/100", m.avg_health_score))
        );
        let _ = writeln!(s, "  NPS:              {:.1}/10", m.avg_nps);
        let _ = writeln!(
            s,
            "  At risk:          {} ({} {cur})",
            m.at_risk_count,
            format_amount(m.at_risk_mrr)
        );
        let _ = writeln!(
            s,
            "  Churned:          {} ({} {cur})",
            m.total_churned,
            format_amount(m.churned_mrr)
        );
        s
    }

    fn clients_table(&self, records: &[ClientRecord]) -> String {
        let mut s = self.heading(Section::Clients, "CLIENT PORTFOLIO");
        let _ = writeln!(
            s,
            "{:<3} {:<22} {:<10} {:<7} {:<12} {:<7} {:<10}",
            "ID", "Client", "Tier", "Health", "MRR", "Risk", "Status"
        );
        let _ = writeln!(s, "{}", "-".repeat(RULE_WIDE));
        for r in records {
            let health = format!("{:<7}", r.health_score);
            let status = format!("{:<10}", status_label(r.status));
            let _ = writeln!(
                s,
                "{:<3} {:<22} {:<10} {} {:<12} {:<7} {}",
                r.id,
                truncate(&r.name, 20),
                r.tier.as_str(),
                self.paint_health(r.health_score, &health),
                format_amount(r.mrr),
                format_risk_pct(r.churn_risk),
                self.paint_status(r.status, &status).trim_end()
            );
        }
        let _ = writeln!(s, "{}", "-".repeat(RULE_WIDE));
        s
    }

    fn recommendations(&self, recs: &[Recommendation]) -> String {
        let mut s = self.heading(Section::Recommendations, "RECOMMENDATIONS");
        for rec in recs {
            let head = format!("{} {}", self.priority_marker(rec.priority), rec.title);
            let _ = writeln!(s, "{}", self.paint_priority(rec.priority, &head));
            let _ = writeln!(s, "    {}", rec.description);
            let _ = writeln!(s, "    Action: {}", rec.action);
            if !rec.affected_clients.is_empty() {
                let _ = writeln!(s, "    Clients: {}", rec.affected_clients.join(", "));
            }
        }
        s
    }

    fn client_detail(&self, ctx: &ViewContext<'_>, r: &ClientRecord) -> String {
        let mut s = self.heading(Section::Detail, &r.name);
        let _ = writeln!(s, "Tier: {}", r.tier);
        let _ = writeln!(s, "Manager: {}", r.manager);
        let _ = writeln!(
            s,
            "Status: {}",
            self.paint_status(r.status, status_label(r.status))
        );
        let _ = writeln!(s, "Onboarded: {}", r.onboarding_date);
        let _ = writeln!(s);
        let marker = self.health_marker(r.health_score);
        let health = self.paint_health(r.health_score, &format!("{}/100", r.health_score));
        if marker.is_empty() {
            let _ = writeln!(s, "Health score: {health}");
        } else {
            let _ = writeln!(s, "Health score: {health} {marker}");
        }
        let _ = writeln!(s, "MRR: {} {}", format_amount(r.mrr), ctx.currency);
        let _ = writeln!(s, "Churn risk: {}", format_risk_pct(r.churn_risk));
        let _ = writeln!(s, "NPS: {}/10", r.nps);
        let _ = writeln!(s, "Usage trend: {}", r.usage_trend);
        let _ = writeln!(s, "Last activity: {}", r.last_activity);
        let _ = writeln!(s);
        let _ = writeln!(s, "Contact: {}", r.contact.name);
        let _ = writeln!(s, "  Email: {}", r.contact.email);
        let _ = writeln!(s, "  Phone: {}", r.contact.phone);
        if !r.tags.is_empty() {
            let tags: Vec<&str> = r.tags.iter().map(|t| t.as_str()).collect();
            let _ = writeln!(s, "Tags: {}", tags.join(", "));
        }
        if !r.last_interaction.is_empty() {
            let _ = writeln!(s, "Last interaction: {}", r.last_interaction);
        }
        if !r.next_action.is_empty() {
            let when = r
                .next_action_date
                .map(|d| format!(" ({d})"))
                .unwrap_or_default();
            let _ = writeln!(s, "Next action: {}{}", r.next_action, when);
        }
        s
    }

    fn upcoming(&self, records: &[&ClientRecord]) -> String {
        let mut s = self.heading(Section::Schedule, "UPCOMING ACTIONS");
        if records.is_empty() {
            let _ = writeln!(s, "  Nothing scheduled.");
        }
        for r in records {
            if let Some(d) = r.next_action_date {
                let _ = writeln!(s, "  {d} - {} - {}", r.name, r.next_action);
            }
        }
        s
    }

    fn menu(&self) -> String {
        let mut s = self.heading(Section::Menu, "MENU");
        for pair in MENU_ITEMS.chunks(2) {
            let cell = |(key, section, label): &(&str, Section, &str)| {
                let marker = self.section_marker(*section);
                if marker.is_empty() {
                    format!("{key}. {label}")
                } else {
                    format!("{key}. {marker} {label}")
                }
            };
            match pair {
                [a, b] => {
                    let _ = writeln!(s, "  {:<34} {}", cell(a), cell(b));
                }
                [a] => {
                    let _ = writeln!(s, "  {}", cell(a));
                }
                _ => {}
            }
        }
        let _ = writeln!(s, "{}", "-".repeat(RULE_NARROW));
        s
    }

    fn email_templates(&self) -> String {
        let mut s = self.heading(Section::Email, "EMAIL DRAFTS");
        for (i, t) in EmailTemplate::ALL.iter().enumerate() {
            let _ = writeln!(s, "  {}. {}", i + 1, t.label());
        }
        let _ = writeln!(s, "  {}. Back to menu", EmailTemplate::ALL.len() + 1);
        s
    }

    fn email_draft(&self, draft: &EmailDraft) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "{}", self.ok("Draft generated"));
        let _ = writeln!(s, "{}", "-".repeat(40));
        let _ = writeln!(s, "To: {}", draft.to);
        let _ = writeln!(s, "Subject: {}", draft.subject);
        let _ = writeln!(s);
        let _ = write!(s, "{}", draft.body);
        let _ = writeln!(s, "{}", "-".repeat(40));
        s
    }

    fn settings(&self, cfg: &DeskConfig, config_hash: &str) -> String {
        let mut s = self.heading(Section::Settings, "SETTINGS");
        let _ = writeln!(s, "  Operator:        {} <{}>", cfg.operator_name, cfg.operator_email);
        let _ = writeln!(s, "  Display style:   {}", cfg.style.as_str());
        let _ = writeln!(s, "  Currency:        {}", cfg.currency);
        let _ = writeln!(s, "  Export dir:      {}", cfg.export_dir.display());
        let _ = writeln!(
            s,
            "  Extended CSV:    {}",
            if cfg.extended_columns { "on" } else { "off" }
        );
        let _ = writeln!(
            s,
            "  Seed file:       {}",
            cfg.seed_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in sample".to_string())
        );
        let _ = writeln!(s, "  Log level:       {}", cfg.log_level);
        let _ = writeln!(s, "  Config hash:     {config_hash}");
        s
    }

    fn session_summary(&self, ctx: &ViewContext<'_>, m: &PortfolioMetrics, viewed: usize) -> String {
        let mut s = self.heading(Section::Exit, "SESSION SUMMARY");
        let _ = writeln!(s, "  Clients viewed:   {viewed}");
        let _ = writeln!(s, "  Total MRR:        {} {}", format_amount(m.total_mrr), ctx.currency);
        let _ = writeln!(s, "  Avg health score: {:.1}", m.avg_health_score);
        let _ = writeln!(s);
        let _ = writeln!(s, "Thank you for using CSM Desk!");
        s
    }

    /// Full dashboard screen for one render cycle.
    fn dashboard(
        &self,
        ctx: &ViewContext<'_>,
        records: &[ClientRecord],
        m: &PortfolioMetrics,
        recs: &[Recommendation],
    ) -> String {
        [
            self.header(ctx, m),
            self.metrics(ctx, m),
            self.clients_table(records),
            self.recommendations(recs),
            self.menu(),
        ]
        .join("\n")
    }
}

/// Pick the renderer for a configured style.
pub fn renderer_for(style: RenderStyle) -> Box<dyn Renderer> {
    match style {
        RenderStyle::Plain => Box::new(PlainRenderer),
        RenderStyle::Ansi => Box::new(AnsiRenderer),
        RenderStyle::Icons => Box::new(IconRenderer),
        RenderStyle::Emoji => Box::new(EmojiRenderer),
    }
}
