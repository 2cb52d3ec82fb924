//! Interactive menu loop.
//!
//! Reads operator input line by line; EOF on any prompt ends the session.
//! A [`ConsoleError`] from an action is printed and the loop goes on; any
//! other error (stdout gone) ends it.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use csm_artifacts::{EmailTemplate, ReportKind};
use tracing::{debug, info};

use super::{files, parse_client_id, parse_field_update, Desk, EDITABLE_FIELDS};
use crate::console::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the menu again.
    Menu,
    /// Recompute and show the full dashboard.
    Redraw,
    Exit,
}

pub struct Dashboard<'d, R, W> {
    desk: &'d mut Desk,
    input: R,
    out: W,
    /// Distinct client ids opened in the detail view this session.
    viewed: BTreeSet<u32>,
}

impl<'d, R: BufRead, W: Write> Dashboard<'d, R, W> {
    pub fn new(desk: &'d mut Desk, input: R, out: W) -> Self {
        Self {
            desk,
            input,
            out,
            viewed: BTreeSet::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.draw()?;
        loop {
            let Some(choice) = self.prompt("Choose an action (1-9): ")? else {
                break;
            };
            let flow = match self.dispatch(choice.trim()) {
                Ok(flow) => flow,
                Err(e) => match e.downcast_ref::<ConsoleError>() {
                    Some(ce) => {
                        debug!(error = %ce, "action failed");
                        writeln!(self.out, "{}", self.desk.renderer.error(&ce.to_string()))?;
                        Flow::Menu
                    }
                    None => return Err(e),
                },
            };
            match flow {
                Flow::Menu => write!(self.out, "\n{}", self.desk.renderer.menu())?,
                Flow::Redraw => self.draw()?,
                Flow::Exit => break,
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let snap = self.desk.snapshot();
        let screen = self.desk.renderer.dashboard(
            &self.desk.view_context(),
            self.desk.store.get_all(),
            &snap.metrics,
            &snap.recommendations,
        );
        write!(self.out, "{screen}")?;
        Ok(())
    }

    /// Print `label`, read one line. `None` on EOF.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.client_detail(),
            "2" => self.email_draft(),
            "3" => self.create_report(),
            "4" => self.upcoming(),
            "5" => {
                info!("dashboard refreshed");
                Ok(Flow::Redraw)
            }
            "6" => self.export(),
            "7" => self.settings(),
            "8" => self.exit(),
            "9" => self.update_field(),
            other => Err(ConsoleError::InvalidInput(format!("unknown menu choice '{other}'")).into()),
        }
    }

    fn read_client_id(&mut self) -> Result<Option<u32>> {
        let Some(raw) = self.prompt("Client ID: ")? else {
            return Ok(None);
        };
        let id = parse_client_id(&raw)?;
        self.desk.client(id)?;
        Ok(Some(id))
    }

    fn client_detail(&mut self) -> Result<Flow> {
        let Some(id) = self.read_client_id()? else {
            return Ok(Flow::Exit);
        };
        let rec = self.desk.client(id)?;
        let text = self.desk.renderer.client_detail(&self.desk.view_context(), rec);
        write!(self.out, "\n{text}")?;
        self.viewed.insert(id);
        Ok(Flow::Menu)
    }

    fn email_draft(&mut self) -> Result<Flow> {
        write!(self.out, "\n{}", self.desk.renderer.email_templates())?;
        let Some(raw) = self.prompt("Template: ")? else {
            return Ok(Flow::Exit);
        };
        let raw = raw.trim();
        let back = (EmailTemplate::ALL.len() + 1).to_string();
        if raw == back {
            return Ok(Flow::Menu);
        }
        let template = match raw.parse::<usize>() {
            Ok(n) if (1..=EmailTemplate::ALL.len()).contains(&n) => EmailTemplate::ALL[n - 1],
            _ => EmailTemplate::parse(raw).map_err(|e| ConsoleError::InvalidInput(e.to_string()))?,
        };
        let Some(id) = self.read_client_id()? else {
            return Ok(Flow::Exit);
        };
        let draft = files::email(self.desk, id, template)?;
        write!(self.out, "\n{}", self.desk.renderer.email_draft(&draft))?;
        Ok(Flow::Menu)
    }

    fn create_report(&mut self) -> Result<Flow> {
        let Some(raw) = self.prompt("Report type (1 = weekly, 2 = risk): ")? else {
            return Ok(Flow::Exit);
        };
        let kind = match raw.trim() {
            "1" => ReportKind::Weekly,
            "2" => ReportKind::Risk,
            other => ReportKind::parse(other).map_err(|e| ConsoleError::InvalidInput(e.to_string()))?,
        };
        let path = files::report(self.desk, kind, None, Local::now().naive_local())?;
        files::print_report(self.desk, &path, &mut self.out)?;
        Ok(Flow::Menu)
    }

    fn upcoming(&mut self) -> Result<Flow> {
        let upcoming = self.desk.store.upcoming_actions(self.desk.as_of);
        write!(self.out, "\n{}", self.desk.renderer.upcoming(&upcoming))?;
        Ok(Flow::Menu)
    }

    fn export(&mut self) -> Result<Flow> {
        let summary = files::export(self.desk, None, false)?;
        files::print_export(self.desk, &summary, &mut self.out)?;
        Ok(Flow::Menu)
    }

    fn settings(&mut self) -> Result<Flow> {
        let text = self.desk.renderer.settings(&self.desk.cfg, &self.desk.config_hash);
        write!(self.out, "\n{text}")?;
        Ok(Flow::Menu)
    }

    fn exit(&mut self) -> Result<Flow> {
        let m = self.desk.snapshot().metrics;
        let text = self
            .desk
            .renderer
            .session_summary(&self.desk.view_context(), &m, self.viewed.len());
        write!(self.out, "\n{text}")?;
        Ok(Flow::Exit)
    }

    fn update_field(&mut self) -> Result<Flow> {
        let Some(id) = self.read_client_id()? else {
            return Ok(Flow::Exit);
        };
        writeln!(self.out, "Editable fields: {}", EDITABLE_FIELDS.join(", "))?;
        let Some(field) = self.prompt("Field: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(value) = self.prompt("New value: ")? else {
            return Ok(Flow::Exit);
        };
        let update = parse_field_update(&field, &value)?;
        let field_name = update.field_name();
        self.desk
            .store
            .update_field(id, update)
            .map_err(ConsoleError::from)?;
        info!(client_id = id, field = field_name, "client field updated");

        let msg = format!("Updated {field_name} for client {id}");
        writeln!(self.out, "{}", self.desk.renderer.ok(&msg))?;
        Ok(Flow::Redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_portfolio;
    use chrono::NaiveDate;
    use csm_config::DeskConfig;
    use csm_portfolio::ClientStatus;

    fn desk() -> Desk {
        Desk::new(
            load_portfolio(None).unwrap(),
            DeskConfig::default(),
            "hash".to_string(),
            NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
        )
    }

    fn run_session(desk: &mut Desk, input: &str) -> (String, BTreeSet<u32>) {
        let mut out = Vec::new();
        let viewed = {
            let mut dash = Dashboard::new(desk, input.as_bytes(), &mut out);
            dash.run().unwrap();
            dash.viewed.clone()
        };
        (String::from_utf8(out).unwrap(), viewed)
    }

    #[test]
    fn eof_ends_session_cleanly() {
        let mut d = desk();
        let (out, viewed) = run_session(&mut d, "");
        assert!(out.contains("CSM DESK"));
        assert!(viewed.is_empty());
    }

    #[test]
    fn bad_input_is_reported_and_loop_continues() {
        let mut d = desk();
        let (out, _) = run_session(&mut d, "x\n1\n99\n1\nabc\n8\n");
        assert!(out.contains("[ERROR] invalid input: unknown menu choice 'x'"));
        assert!(out.contains("[ERROR] client 99 not found"));
        assert!(out.contains("[ERROR] invalid input: 'abc' is not a client id"));
        assert!(out.contains("SESSION SUMMARY"));
    }

    #[test]
    fn viewed_clients_are_counted_once() {
        let mut d = desk();
        let (out, viewed) = run_session(&mut d, "1\n2\n1\n2\n1\n3\n8\n");
        assert_eq!(viewed.into_iter().collect::<Vec<_>>(), vec![2, 3]);
        assert!(out.contains("Clients viewed:   2"));
    }

    #[test]
    fn update_changes_store_and_redraws() {
        let mut d = desk();
        let (out, _) = run_session(&mut d, "9\n3\nstatus\nactive\n8\n");
        assert!(out.contains("[OK] Updated status for client 3"));
        assert_eq!(d.store.find_by_id(3).unwrap().status, ClientStatus::Active);
        // Sidorov is now active with churn 0.65: urgent recommendation appears.
        assert!(out.contains("Churn prevention"));
    }

    #[test]
    fn invalid_update_leaves_record_unchanged() {
        let mut d = desk();
        let before = d.store.find_by_id(1).unwrap().clone();
        let (out, _) = run_session(&mut d, "9\n1\nhealth_score\n150\n8\n");
        assert!(out.contains("[ERROR] invalid input: invalid value for health_score"));
        assert_eq!(d.store.find_by_id(1).unwrap(), &before);
    }

    #[test]
    fn email_draft_by_number() {
        let mut d = desk();
        let (out, _) = run_session(&mut d, "2\n2\n2\n8\n");
        assert!(out.contains("Subject: Follow-up: Staff training"));
        assert!(out.contains("Dear Sergey Ivanov,"));
    }

    #[test]
    fn export_writes_into_configured_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut d = desk();
        d.cfg.export_dir = tmp.path().to_path_buf();
        let (out, _) = run_session(&mut d, "6\n8\n");
        assert!(out.contains("[OK] Exported 3 clients to"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
