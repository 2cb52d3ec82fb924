use csm_portfolio::Priority;

use super::{HealthBand, Renderer, Section};

/// ASCII tags in place of pictograms, for terminals without emoji fonts.
pub struct IconRenderer;

impl Renderer for IconRenderer {
    fn section_marker(&self, section: Section) -> String {
        let tag = match section {
            Section::Metrics => "[CHART]",
            Section::Clients => "[LIST]",
            Section::Recommendations => "[TIP]",
            Section::Detail => "[CARD]",
            Section::Email => "[MAIL]",
            Section::Report => "[DOC]",
            Section::Schedule => "[CAL]",
            Section::Refresh => "[SYNC]",
            Section::Export => "[SAVE]",
            Section::Settings => "[CONF]",
            Section::Exit => "[EXIT]",
            Section::Update => "[EDIT]",
            Section::Menu => "[MENU]",
        };
        tag.to_string()
    }

    fn priority_marker(&self, priority: Priority) -> String {
        match priority {
            Priority::Critical => "[WARN]",
            Priority::Medium => "[INFO]",
            Priority::Low => "[IDEA]",
        }
        .to_string()
    }

    fn health_marker(&self, score: u8) -> String {
        match HealthBand::of(score) {
            HealthBand::Good => "[GOOD]",
            HealthBand::Fair => "[FAIR]",
            HealthBand::Poor => "[POOR]",
        }
        .to_string()
    }
}
