use csm_portfolio::Priority;

use super::{HealthBand, Renderer, Section};

/// Pictogram markers. Table cells stay undecorated; emoji widths vary by
/// terminal and would break column alignment.
pub struct EmojiRenderer;

impl Renderer for EmojiRenderer {
    fn section_marker(&self, section: Section) -> String {
        let icon = match section {
            Section::Metrics => "📊",
            Section::Clients => "👥",
            Section::Recommendations => "💡",
            Section::Detail => "📋",
            Section::Email => "📧",
            Section::Report => "📝",
            Section::Schedule => "📅",
            Section::Refresh => "🔄",
            Section::Export => "💾",
            Section::Settings => "⚙️",
            Section::Exit => "👋",
            Section::Update => "✏️",
            Section::Menu => "🧭",
        };
        icon.to_string()
    }

    fn priority_marker(&self, priority: Priority) -> String {
        match priority {
            Priority::Critical => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        }
        .to_string()
    }

    fn health_marker(&self, score: u8) -> String {
        match HealthBand::of(score) {
            HealthBand::Good => "💚",
            HealthBand::Fair => "💛",
            HealthBand::Poor => "❤️",
        }
        .to_string()
    }

    fn ok(&self, msg: &str) -> String {
        format!("✅ {msg}")
    }

    fn error(&self, msg: &str) -> String {
        format!("❌ {msg}")
    }
}
