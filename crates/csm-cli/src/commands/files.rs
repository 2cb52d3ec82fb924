//! Commands that produce artifacts: CSV exports, reports, email drafts.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use csm_artifacts::{
    draft_email, export_clients_csv, write_report, EmailDraft, EmailTemplate, ExportOptions,
    ExportSummary, ReportContext, ReportKind,
};

use super::Desk;
use crate::console::ConsoleError;

/// Default export file name, stamped with the wall-clock time.
pub fn default_export_path(dir: &Path, now: NaiveDateTime) -> PathBuf {
    dir.join(format!("clients_export_{}.csv", now.format("%Y%m%d_%H%M%S")))
}

pub fn export(
    desk: &Desk,
    out_path: Option<&Path>,
    extended: bool,
) -> Result<ExportSummary, ConsoleError> {
    let path = match out_path {
        Some(p) => p.to_path_buf(),
        None => default_export_path(&desk.cfg.export_dir, Local::now().naive_local()),
    };
    let opts = ExportOptions {
        extended_columns: extended || desk.cfg.extended_columns,
    };
    export_clients_csv(desk.store.get_all(), &path, opts).map_err(ConsoleError::io)
}

pub fn report(
    desk: &Desk,
    kind: ReportKind,
    dir: Option<&Path>,
    generated_at: NaiveDateTime,
) -> Result<PathBuf, ConsoleError> {
    let snapshot = desk.snapshot();
    let ctx = ReportContext {
        records: desk.store.get_all(),
        snapshot: &snapshot,
        operator_name: &desk.cfg.operator_name,
        currency: &desk.cfg.currency,
        generated_at,
    };
    let dir = dir.unwrap_or(desk.cfg.export_dir.as_path());
    write_report(dir, kind, &ctx).map_err(ConsoleError::io)
}

pub fn email(desk: &Desk, id: u32, template: EmailTemplate) -> Result<EmailDraft, ConsoleError> {
    let rec = desk.client(id)?;
    Ok(draft_email(template, rec, &desk.cfg.operator_name))
}

pub fn print_export<W: Write>(desk: &Desk, summary: &ExportSummary, out: &mut W) -> Result<()> {
    let msg = format!(
        "Exported {} clients to {}",
        summary.rows,
        summary.path.display()
    );
    writeln!(out, "{}", desk.renderer.ok(&msg))?;
    Ok(())
}

pub fn print_report<W: Write>(desk: &Desk, path: &Path, out: &mut W) -> Result<()> {
    let msg = format!("Report saved: {}", path.display());
    writeln!(out, "{}", desk.renderer.ok(&msg))?;
    Ok(())
}
