//! Client CSV export.
//!
//! ## Column contract
//!
//! | Column  | Example            | Notes                              |
//! |---------|--------------------|------------------------------------|
//! | `ID`    | `1`                |                                    |
//! | `Name`  | `TechnoProfit LLC` | written as-is                      |
//! | `Tier`  | `Enterprise`       |                                    |
//! | `Health`| `86`               |                                    |
//! | `MRR`   | `150000`           | whole units, no separators         |
//! | `Risk`  | `5.0%`             | churn risk, one decimal            |
//! | `Status`| `active`           |                                    |
//!
//! Extended exports append `Manager`, `Contact`, `Email`, `Tags` (tags joined
//! with `;`).
//!
//! Fields are never quoted. A name containing a comma therefore shifts the
//! row; spreadsheet consumers of the legacy export rely on this shape.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csm_portfolio::ClientRecord;
use serde::Serialize;
use tracing::info;

use crate::format::format_risk_pct;

/// Byte-order mark written first so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const BASE_HEADER: [&str; 7] = ["ID", "Name", "Tier", "Health", "MRR", "Risk", "Status"];
const EXTENDED_HEADER: [&str; 4] = ["Manager", "Contact", "Email", "Tags"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub extended_columns: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

fn row(rec: &ClientRecord, opts: ExportOptions) -> Vec<String> {
    let mut out = vec![
        rec.id.to_string(),
        rec.name.clone(),
        rec.tier.to_string(),
        rec.health_score.to_string(),
        rec.mrr.to_string(),
        format_risk_pct(rec.churn_risk),
        rec.status.to_string(),
    ];
    if opts.extended_columns {
        out.push(rec.manager.clone());
        out.push(rec.contact.name.clone());
        out.push(rec.contact.email.clone());
        out.push(rec.tags.iter().cloned().collect::<Vec<_>>().join(";"));
    }
    out
}

/// Write `records` to `path` as CSV, one row per client in store order.
///
/// Parent directories are created. An existing file is overwritten.
pub fn export_clients_csv(
    records: &[ClientRecord],
    path: &Path,
    opts: ExportOptions,
) -> Result<ExportSummary> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::ensure_dir(parent)?;
    }

    let file = File::create(path).with_context(|| format!("create csv failed: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)
        .with_context(|| format!("write csv BOM failed: {}", path.display()))?;

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);

    let mut header: Vec<&str> = BASE_HEADER.to_vec();
    if opts.extended_columns {
        header.extend(EXTENDED_HEADER);
    }
    wtr.write_record(&header)
        .with_context(|| format!("write csv header failed: {}", path.display()))?;

    for rec in records {
        wtr.write_record(row(rec, opts))
            .with_context(|| format!("write csv row failed: client {}", rec.id))?;
    }
    wtr.flush()
        .with_context(|| format!("flush csv failed: {}", path.display()))?;

    info!(path = %path.display(), rows = records.len(), "clients exported");

    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use csm_portfolio::sample_portfolio;

    #[test]
    fn row_formats_risk_as_percentage() {
        let recs = sample_portfolio();
        let r = row(&recs[0], ExportOptions::default());
        assert_eq!(
            r,
            vec!["1", "TechnoProfit LLC", "Enterprise", "86", "150000", "5.0%", "active"]
        );
    }

    #[test]
    fn extended_row_joins_tags() {
        let recs = sample_portfolio();
        let r = row(
            &recs[0],
            ExportOptions {
                extended_columns: true,
            },
        );
        assert_eq!(r.len(), BASE_HEADER.len() + EXTENDED_HEADER.len());
        assert_eq!(r[10], "expansion;high_value;tech");
    }
}
