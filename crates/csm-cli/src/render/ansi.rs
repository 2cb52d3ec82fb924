use colored::Colorize;
use csm_portfolio::{ClientStatus, Priority};

use super::{HealthBand, Renderer};

/// Terminal colours via `colored`. Honours `NO_COLOR` / `CLICOLOR`.
pub struct AnsiRenderer;

impl Renderer for AnsiRenderer {
    fn paint_title(&self, text: &str) -> String {
        text.bold().cyan().to_string()
    }

    fn paint_priority(&self, priority: Priority, text: &str) -> String {
        match priority {
            Priority::Critical => text.red().bold().to_string(),
            Priority::Medium => text.yellow().to_string(),
            Priority::Low => text.green().to_string(),
        }
    }

    fn paint_health(&self, score: u8, text: &str) -> String {
        match HealthBand::of(score) {
            HealthBand::Good => text.green().to_string(),
            HealthBand::Fair => text.yellow().to_string(),
            HealthBand::Poor => text.red().to_string(),
        }
    }

    fn paint_status(&self, status: ClientStatus, text: &str) -> String {
        match status {
            ClientStatus::Active => text.green().to_string(),
            ClientStatus::AtRisk => text.yellow().bold().to_string(),
            ClientStatus::Churned => text.red().to_string(),
        }
    }

    fn ok(&self, msg: &str) -> String {
        format!("{} {msg}", "OK".green().bold())
    }

    fn error(&self, msg: &str) -> String {
        format!("{} {msg}", "ERROR".red().bold())
    }
}
