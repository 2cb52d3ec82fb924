//! One-shot read-only views.

use std::io::Write;

use anyhow::Result;

use super::Desk;

pub fn metrics<W: Write>(desk: &Desk, json: bool, out: &mut W) -> Result<()> {
    let m = desk.snapshot().metrics;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&m)?)?;
    } else {
        write!(out, "{}", desk.renderer.metrics(&desk.view_context(), &m))?;
    }
    Ok(())
}

pub fn recommendations<W: Write>(desk: &Desk, json: bool, out: &mut W) -> Result<()> {
    let recs = desk.snapshot().recommendations;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&recs)?)?;
    } else {
        write!(out, "{}", desk.renderer.recommendations(&recs))?;
    }
    Ok(())
}

pub fn clients<W: Write>(desk: &Desk, out: &mut W) -> Result<()> {
    write!(out, "{}", desk.renderer.clients_table(desk.store.get_all()))?;
    Ok(())
}

pub fn client<W: Write>(desk: &Desk, id: u32, out: &mut W) -> Result<()> {
    let rec = desk.client(id)?;
    write!(out, "{}", desk.renderer.client_detail(&desk.view_context(), rec))?;
    Ok(())
}

pub fn schedule<W: Write>(desk: &Desk, out: &mut W) -> Result<()> {
    let upcoming = desk.store.upcoming_actions(desk.as_of);
    write!(out, "{}", desk.renderer.upcoming(&upcoming))?;
    Ok(())
}

/// Print the whole dashboard once without entering the menu loop.
pub fn snapshot<W: Write>(desk: &Desk, out: &mut W) -> Result<()> {
    let snap = desk.snapshot();
    let screen = desk.renderer.dashboard(
        &desk.view_context(),
        desk.store.get_all(),
        &snap.metrics,
        &snap.recommendations,
    );
    write!(out, "{screen}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_portfolio;
    use chrono::NaiveDate;
    use csm_config::DeskConfig;

    fn desk() -> Desk {
        Desk::new(
            load_portfolio(None).unwrap(),
            DeskConfig::default(),
            "hash".to_string(),
            NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
        )
    }

    #[test]
    fn metrics_json_is_machine_readable() {
        let mut buf = Vec::new();
        metrics(&desk(), true, &mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["total_mrr"], 225000);
        assert_eq!(v["total_clients"], 2);
        assert_eq!(v["at_risk_count"], 0);
    }

    #[test]
    fn unknown_client_is_not_found() {
        let mut buf = Vec::new();
        let err = client(&desk(), 42, &mut buf).unwrap_err();
        assert_eq!(err.to_string(), "client 42 not found");
        assert!(buf.is_empty());
    }

    #[test]
    fn schedule_is_sorted_soonest_first() {
        let mut buf = Vec::new();
        schedule(&desk(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let sidorov = text.find("Sidorov").unwrap();
        let stroy = text.find("StroyGrad").unwrap();
        let techno = text.find("TechnoProfit").unwrap();
        assert!(sidorov < stroy && stroy < techno);
    }
}
