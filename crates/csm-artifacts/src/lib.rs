//! csm-artifacts
//!
//! Flat-file outputs of the console. Everything here consumes engine output
//! or client fields; nothing feeds back into the store.
//! - `export`: client CSV (UTF-8 BOM, header first, unquoted fields)
//! - `report`: plain-text weekly / risk reports
//! - `email`: email drafts rendered from templates (never sent)
//! - `format`: amount / percentage formatting shared with the console views

pub mod email;
pub mod export;
pub mod format;
pub mod report;

pub use email::{draft_email, EmailDraft, EmailTemplate};
pub use export::{export_clients_csv, ExportOptions, ExportSummary, UTF8_BOM};
pub use format::{format_amount, format_risk_pct};
pub use report::{render_report, report_file_name, write_report, ReportContext, ReportKind};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create `dir` (and parents) if missing.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create exports dir failed: {}", dir.display()))
}
