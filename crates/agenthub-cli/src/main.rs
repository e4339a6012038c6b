//! AgentHub CLI - monitor and drive the prediction-market agent simulation
//!
//! # Quick Start
//!
//! ```bash
//! # Dashboard against the default backend (http://localhost:8000)
//! agenthub
//!
//! # One-shot commands
//! agenthub status
//! agenthub markets --locale en
//! agenthub cycle
//! agenthub phase market-maker
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use agenthub_client::{BackendClient, SimulationBackend};
use agenthub_session::{RunOutcome, Session};
use agenthub_types::{CyclePhase, Locale};
use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod display;

use crate::config::MonitorConfig;

/// AgentHub - monitor for the multi-agent prediction-market simulation
#[derive(Parser)]
#[command(name = "agenthub")]
#[command(author = "AgentHub Contributors")]
#[command(version)]
#[command(about = "Watch agents and markets, and step the simulation one cycle at a time", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Simulation backend URL (overrides backend.base_url)
    #[arg(long, global = true, env = "AGENTHUB_SERVER")]
    server: Option<String>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display language: zh or en (overrides display.locale)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full-screen dashboard (default)
    Tui,

    /// Show simulation status and agents
    Status,

    /// List markets
    Markets,

    /// Run one full simulation cycle
    Cycle,

    /// Run a single pipeline phase
    Phase {
        /// discovery, listing, audit, market-maker, trading or governance
        phase: CyclePhase,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = MonitorConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(server) = cli.server {
        config.backend.base_url = server;
    }
    if let Some(locale) = cli.locale {
        config.display.locale = locale;
    }
    config.validate()?;

    let command = cli.command.unwrap_or(Commands::Tui);
    init_tracing(&config, matches!(command, Commands::Tui))?;

    let client = BackendClient::new(&config.backend.base_url, config.request_timeout())
        .context("building HTTP client")?;
    let locale = config.display.locale;

    if matches!(command, Commands::Tui) {
        if !client.is_available().await {
            tracing::warn!(server = %client.base_url(), "backend not reachable, starting anyway");
        }
        let session = Session::start(Arc::new(client), config.session_config());
        let result = agenthub_tui::run_dashboard(&session);
        session.shutdown();
        return result.context("running dashboard");
    }

    print_banner();
    match client.info().await {
        Ok(info) => {
            println!(
                "  {} Connected to backend at {}",
                "●".bright_green(),
                client.base_url().bright_cyan()
            );
            if !info.version.is_empty() {
                display::info(&format!("{} v{}", info.message, info.version));
            }
        }
        Err(err) => {
            println!(
                "  {} Could not reach backend at {}",
                "○".yellow(),
                client.base_url()
            );
            tracing::debug!(error = %err, "backend probe failed");
        }
    }

    match command {
        Commands::Tui => {}
        Commands::Status => {
            let status = client.fetch_status().await.context("fetching status")?;
            display::print_status(&status, locale);
        }
        Commands::Markets => {
            let markets = client.fetch_markets().await.context("fetching markets")?;
            display::print_markets(&markets, locale);
        }
        Commands::Cycle => {
            let session = Session::start(Arc::new(client), config.session_config());
            let outcome = session.cycles().run_cycle().await;
            finish_run(session, outcome.map(|report| format!("cycle {} complete", report.cycle)))?;
        }
        Commands::Phase { phase } => {
            let session = Session::start(Arc::new(client), config.session_config());
            let outcome = session.cycles().run_phase(phase).await;
            let outcome = outcome.map(|report| {
                format!("{} phase complete ({} results)", phase, report.results.len())
            });
            finish_run(session, outcome)?;
        }
    }

    Ok(())
}

/// Print what the run wrote to the session log, then end the session
fn finish_run(session: Session, outcome: RunOutcome<String>) -> anyhow::Result<()> {
    display::section("Run log");
    display::print_log(&session.log().entries());
    session.shutdown();

    println!();
    match outcome {
        RunOutcome::Completed(summary) => {
            display::success(&summary);
            Ok(())
        }
        RunOutcome::Failed(reason) => {
            display::error(&reason);
            anyhow::bail!("run failed: {}", reason)
        }
        RunOutcome::Busy => {
            display::warning("another run is already in flight");
            Ok(())
        }
    }
}

fn init_tracing(config: &MonitorConfig, dashboard: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(std::sync::Mutex::new(file)))
                .init();
        }
        // The dashboard owns the terminal; without a file there is nowhere to write
        None if dashboard => {}
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn print_banner() {
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════╗".bright_cyan());
    println!(
        "{}{}{}",
        "║  ".bright_cyan(),
        "AgentHub".bright_white().bold(),
        " - Prediction Market Agent Simulation Monitor  ║".bright_cyan()
    );
    println!("{}", "╚══════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
