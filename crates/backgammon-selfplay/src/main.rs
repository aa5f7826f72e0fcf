use anyhow::Context;
use backgammon_engine::DiceRule;
use backgammon_selfplay::config::{AdvisorKind, SelfPlayConfig};
use backgammon_selfplay::runner::{GameRecord, GameRunner, MatchSummary};
use backgammon_selfplay::store::MemoryStore;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backgammon-selfplay")]
#[command(about = "Plays backgammon games between built-in move advisors")]
struct Cli {
    /// Config file (defaults to selfplay.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of games to play
    #[arg(short, long)]
    games: Option<u32>,
    /// Seed for dice and random advisors
    #[arg(short, long)]
    seed: Option<u64>,
    /// Advisor playing white
    #[arg(long, value_enum)]
    white: Option<AdvisorKind>,
    /// Advisor playing black
    #[arg(long, value_enum)]
    black: Option<AdvisorKind>,
    /// Require every play to use as many dice as possible
    #[arg(long)]
    maximal: bool,
    /// Abandon a game after this many turns
    #[arg(long)]
    max_turns: Option<u32>,
    /// Print results as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a MatchSummary,
    games: &'a [GameRecord],
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SelfPlayConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SelfPlayConfig::load()?,
    };
    if let Some(games) = cli.games {
        config.games = games;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(white) = cli.white {
        config.advisor.white = white;
    }
    if let Some(black) = cli.black {
        config.advisor.black = black;
    }
    if let Some(max_turns) = cli.max_turns {
        config.max_turns = max_turns;
    }
    if cli.maximal {
        config.dice_rule = DiceRule::Maximal;
    }
    config.check()?;

    tracing::info!(
        games = config.games,
        seed = config.seed,
        dice_rule = ?config.dice_rule,
        "starting self-play"
    );

    let mut runner = GameRunner::from_config(MemoryStore::new(), &config);
    let (records, summary) = runner.play_match(config.games)?;

    if cli.json {
        let report = Report {
            summary: &summary,
            games: &records,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}
