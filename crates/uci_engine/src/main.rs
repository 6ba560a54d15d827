use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uci_engine::{Channel, EngineConfig, EngineSession, Reply, SearchHandle};

#[derive(Parser)]
#[command(name = "uci_engine")]
#[command(about = "Strength-calibrated heuristic chess engine", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Difficulty level 1-10, overrides the config file
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    skill: Option<u8>,

    /// RNG seed for reproducible play
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Speak UCI on stdin/stdout (default)
    Uci,

    /// Analyse a game from the initial position and print a JSON report
    Analyze {
        /// Space-separated moves, UCI or SAN
        #[arg(long)]
        moves: String,

        /// Analysis depth per ply
        #[arg(long)]
        depth: Option<u8>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(skill) = cli.skill {
        config.skill_level = skill;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command.unwrap_or(Mode::Uci) {
        Mode::Uci => run_uci(config).await,
        Mode::Analyze { moves, depth } => {
            if let Some(depth) = depth {
                config.game_analysis_depth = depth;
            }
            run_analysis(config, &moves).await
        }
    }
}

async fn run_uci(config: EngineConfig) -> anyhow::Result<()> {
    let engine = config.build_engine();
    let mut channel = Channel::new(Box::new(engine), config);
    channel.initialize()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<JoinHandle<()>> = None;

    while let Some(line) = lines.next_line().await? {
        match channel.submit(&line) {
            Ok(Reply::None) => {}
            Ok(Reply::Events(events)) => {
                for event in events {
                    println!("{event}");
                }
            }
            Ok(Reply::Search(handle)) => pending = Some(tokio::spawn(print_events(handle))),
            // Already logged by the channel
            Err(_) => {}
        }
        if channel.is_terminated() {
            return Ok(());
        }
    }

    // Input closed without `quit`: let the last search finish
    if let Some(task) = pending {
        if let Err(err) = task.await {
            warn!(%err, "output task failed");
        }
    }
    Ok(())
}

async fn print_events(mut handle: SearchHandle) {
    while let Some(event) = handle.recv().await {
        println!("{event}");
    }
}

async fn run_analysis(config: EngineConfig, moves: &str) -> anyhow::Result<()> {
    let moves: Vec<&str> = moves.split_whitespace().collect();
    let mut session = EngineSession::new(config);
    session.initialize()?;

    let report = session
        .game_report(&moves[..], |progress| {
            info!("analysed {:.0}%", progress * 100.0);
        })
        .await?;
    session.terminate();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
