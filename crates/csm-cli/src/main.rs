mod commands;
mod console;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use csm_artifacts::{EmailTemplate, ReportKind};
use csm_config::{DeskConfig, LoadedConfig, RenderStyle, UnusedKeyPolicy};
use tracing::{debug, warn};

use commands::{dashboard::Dashboard, files, views, Desk};

#[derive(Parser)]
#[command(name = "csm")]
#[command(about = "CSM Desk: customer success manager console", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (falls back to CSM_CONFIG)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    /// JSON seed file with the client portfolio (overrides data.seed_path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Display style: plain | ansi | icons | emoji (overrides display.style)
    #[arg(long, global = true)]
    style: Option<String>,

    /// Reference date for recommendations and the schedule (YYYY-MM-DD, default today)
    #[arg(long = "as-of", global = true)]
    as_of: Option<String>,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard (default when no command is given)
    Dashboard {
        /// Print the dashboard once and exit
        #[arg(long, default_value_t = false)]
        once: bool,
    },

    /// Portfolio KPIs over active clients
    Metrics {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Prioritized action recommendations
    Recommendations {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Client portfolio table
    Clients,

    /// Full client card
    Client {
        #[arg(long)]
        id: u32,
    },

    /// Next actions scheduled on or after the as-of date
    Schedule,

    /// Export all clients to CSV
    Export {
        /// Output file (default: <export.dir>/clients_export_<timestamp>.csv)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Append manager / contact / email / tags columns
        #[arg(long, default_value_t = false)]
        extended: bool,
    },

    /// Write a plain-text report
    Report {
        /// weekly | risk
        #[arg(long, default_value = "weekly")]
        kind: String,

        /// Output directory (default: export.dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Render an email draft for a client (never sent)
    Email {
        #[arg(long)]
        id: u32,

        /// welcome | follow_up | payment_reminder
        #[arg(long)]
        template: String,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash,
}

fn main() -> Result<()> {
    // Dev convenience: load .env.local if present (ignored if missing).
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let loaded = load_config(&cli.config_paths)?;
    let mut cfg = DeskConfig::from_loaded(&loaded)?;
    if let Some(style) = cli.style.as_deref() {
        cfg.style = RenderStyle::parse(style)?;
    }
    if let Some(data) = cli.data.clone() {
        cfg.seed_path = Some(data);
    }

    init_tracing(&cfg.log_level);

    let report = csm_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        warn!(keys = ?report.unused_leaf_pointers, "config contains unused keys");
    }
    debug!(config_hash = %loaded.config_hash, style = cfg.style.as_str(), "config loaded");

    if let Some(Commands::ConfigHash) = cli.cmd {
        println!("config_hash={}", loaded.config_hash);
        println!("{}", loaded.canonical_json);
        return Ok(());
    }

    let as_of = match cli.as_of.as_deref() {
        Some(raw) => commands::parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let store = commands::load_portfolio(cfg.seed_path.as_deref())?;
    let mut desk = Desk::new(store, cfg, loaded.config_hash, as_of);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.cmd.unwrap_or(Commands::Dashboard { once: false }) {
        Commands::Dashboard { once: true } => views::snapshot(&desk, &mut out)?,
        Commands::Dashboard { once: false } => {
            let stdin = io::stdin();
            Dashboard::new(&mut desk, stdin.lock(), &mut out).run()?;
        }
        Commands::Metrics { json } => views::metrics(&desk, json, &mut out)?,
        Commands::Recommendations { json } => views::recommendations(&desk, json, &mut out)?,
        Commands::Clients => views::clients(&desk, &mut out)?,
        Commands::Client { id } => views::client(&desk, id, &mut out)?,
        Commands::Schedule => views::schedule(&desk, &mut out)?,
        Commands::Export { out: path, extended } => {
            let summary = files::export(&desk, path.as_deref(), extended)?;
            files::print_export(&desk, &summary, &mut out)?;
        }
        Commands::Report { kind, dir } => {
            let kind = ReportKind::parse(&kind)?;
            let path = files::report(&desk, kind, dir.as_deref(), Local::now().naive_local())?;
            files::print_report(&desk, &path, &mut out)?;
        }
        Commands::Email { id, template } => {
            let template = EmailTemplate::parse(&template)?;
            let draft = files::email(&desk, id, template)?;
            write!(out, "{}", desk.renderer.email_draft(&draft))?;
        }
        Commands::ConfigHash => {}
    }

    out.flush()?;
    Ok(())
}

/// Explicit `--config` paths win; otherwise `CSM_CONFIG`; otherwise defaults only.
fn load_config(cli_paths: &[String]) -> Result<LoadedConfig> {
    let paths = if cli_paths.is_empty() {
        csm_config::config_paths_from_env()
    } else {
        cli_paths.to_vec()
    };
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    csm_config::load_layered_yaml(&path_refs).context("config load failed")
}

/// Logs go to stderr so they never interleave with rendered views.
/// `RUST_LOG` wins over `logging.level`.
fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
