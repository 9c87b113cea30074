//! tally — command-line front-end for the election session coordinator.
//!
//! Pure display and dispatch: every election decision lives in
//! `tally-session`; this binary builds the production boundary objects,
//! drives one coordinator operation, and renders the resulting snapshot.

mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use tally_chain::{ChainBinder, ChainClient, NodeProvider, SystemClock};
use tally_session::{SessionCoordinator, Snapshot};
use tally_types::{CandidateId, Timestamp};

use crate::config::CliConfig;
use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Election client: register candidates, configure the window, cast a vote, view tallies"
)]
struct Cli {
    /// Node endpoint acting as wallet provider and contract gateway.
    #[arg(long, env = "TALLY_NODE_URL")]
    node_url: Option<String>,

    /// Gas ceiling for write transactions.
    #[arg(long, env = "TALLY_GAS_LIMIT")]
    gas_limit: Option<u64>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "TALLY_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TALLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TALLY_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Show the full session snapshot.
    Status,
    /// List registered candidates with their vote counts.
    Candidates,
    /// Register a candidate.
    Register { name: String, party: String },
    /// Configure the election window (unix seconds, start before end).
    SetWindow { starts_at: u64, ends_at: u64 },
    /// Cast a vote for a candidate id.
    Vote { candidate_id: u32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if cli.node_url.is_some() {
        cfg.node_url = cli.node_url.clone();
    }
    if let Some(gas_limit) = cli.gas_limit {
        cfg.gas_limit = gas_limit;
    }
    if let Some(timeout) = cli.request_timeout_secs {
        cfg.request_timeout_secs = timeout;
    }
    if let Some(level) = &cli.log_level {
        cfg.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        cfg.log_format = format.clone();
    }

    let format: LogFormat = cfg
        .log_format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("invalid log_format")?;
    logging::init_logging(format, &cfg.log_level);

    let endpoint = NodeProvider::resolve_endpoint(cfg.node_url.as_deref())?;
    let client = ChainClient::with_timeout(
        endpoint.as_str(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?;
    tracing::debug!(endpoint = %endpoint, gas_limit = cfg.gas_limit, "node client configured");
    let provider = Arc::new(NodeProvider::new(client.clone()));
    let binder = Arc::new(ChainBinder::with_gas_limit(client, cfg.gas_limit));

    let mut coordinator = SessionCoordinator::new(provider, binder, Arc::new(SystemClock));
    coordinator.start().await.context("session start failed")?;

    match &cli.command {
        Command::Status | Command::Candidates => {}
        Command::Register { name, party } => {
            coordinator.register_candidate(name, party).await?;
            println!("Candidate registered.");
        }
        Command::SetWindow { starts_at, ends_at } => {
            coordinator
                .configure_window(Timestamp::new(*starts_at), Timestamp::new(*ends_at))
                .await?;
            println!("Election window configured.");
        }
        Command::Vote { candidate_id } => {
            coordinator
                .cast_vote(Some(CandidateId::new(*candidate_id)))
                .await?;
            println!("Voted.");
        }
    }

    let snapshot = coordinator.snapshot();
    match cli.command {
        Command::Status => render_status(&snapshot)?,
        _ => render_candidates(&snapshot),
    }

    Ok(())
}

fn render_status(snapshot: &Snapshot) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

fn render_candidates(snapshot: &Snapshot) {
    if let Some(account) = &snapshot.account {
        println!("Account: {account}");
    }
    println!("Election state: {:?}", snapshot.election_state);
    if let Some(window) = &snapshot.window {
        println!("Window: {} - {}", window.starts_at, window.ends_at);
    }
    if let Some(has_voted) = snapshot.has_voted {
        println!("Voted: {has_voted}");
    }
    for candidate in &snapshot.candidates {
        println!(
            "Candidate {}: {} ({}) - {} votes",
            candidate.id, candidate.name, candidate.party, candidate.vote_count
        );
    }
    for failure in &snapshot.candidate_failures {
        println!("Candidate {}: read failed ({})", failure.id, failure.reason);
    }
    for failure in &snapshot.read_failures {
        println!("warning: failed to read {}: {}", failure.field, failure.reason);
    }
}
