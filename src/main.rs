//! Command-line entry point for courtside
//!
//! Loads a users/matches snapshot, then prints leaderboards, player
//! statistics or the recent-match feed.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use courtside::config::AppConfig;
use courtside::rating::{Leaderboard, RatingEngine};
use courtside::score::parse_set_score;
use courtside::source::{load_snapshot, JsonFileSource};
use courtside::stats::{recent_matches, PlayerStats, StatsAggregator};
use courtside::types::{PlayType, PlayerId, Snapshot};
use std::path::PathBuf;
use tracing::{info, warn};

/// Courtside - head-to-head statistics and Elo ratings
#[derive(Parser)]
#[command(
    name = "courtside",
    version,
    about = "Match statistics and Elo ratings for a racket league",
    long_about = "Courtside reads a snapshot of users and head-to-head matches and derives \
                 per-player statistics, head-to-head records and Elo ratings for singles \
                 players and doubles pairings, with exclusion and season filters."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Snapshot file override
    #[arg(short, long, value_name = "FILE", help = "JSON snapshot with users and matches")]
    snapshot: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Players to leave out of ratings and statistics
    #[arg(long = "exclude", value_name = "ID", help = "Exclude a player (repeatable)")]
    exclude: Vec<PlayerId>,

    /// Season split point override
    #[arg(long, value_name = "RFC3339", help = "Boundary between season 1 and season 2")]
    season_boundary: Option<DateTime<Utc>>,

    #[arg(long, help = "Leave season 1 matches out of the ratings")]
    no_season1: bool,

    #[arg(long, help = "Leave season 2 matches out of the ratings")]
    no_season2: bool,

    #[arg(long, value_name = "N", help = "Minimum qualifying matches to be ranked")]
    min_matches: Option<u32>,

    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Singles and doubles leaderboards
    Ratings,
    /// Statistics for one player, optionally against one opponent
    Stats {
        #[arg(long, value_name = "ID")]
        player: PlayerId,
        #[arg(long, value_name = "ID")]
        opponent: Option<PlayerId>,
    },
    /// Most recent matches first
    Feed {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Validate configuration and snapshot, then exit
    Check,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if let Some(snapshot) = &args.snapshot {
        config.snapshot.path = Some(snapshot.clone());
    }
    for id in &args.exclude {
        config.rating.exclude_player(*id);
    }
    if let Some(boundary) = args.season_boundary {
        config.rating.season_boundary = Some(boundary);
    }
    if args.no_season1 {
        config.rating.season1_enabled = false;
    }
    if args.no_season2 {
        config.rating.season2_enabled = false;
    }
    if let Some(minimum) = args.min_matches {
        config.rating.minimum_qualifying_matches = minimum;
    }

    courtside::config::validate_config(&config)?;
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_leaderboard(board: &Leaderboard) {
    println!("{} Elo Ratings", board.play_type);
    if board.is_empty() {
        println!("  (no ranked players)");
    }
    for row in &board.rows {
        let medal = match row.medal {
            Some(medal) => format!(" [{:?}]", medal),
            None => String::new(),
        };
        println!(
            "  {:>2}. {:<24} {:>5}{}",
            row.rank, row.username, row.display_rating, medal
        );
    }
    println!();
}

fn print_stats(title: &str, stats: &PlayerStats) {
    println!("{}", title);
    println!("  Wins: {}", stats.wins);
    println!("  Losses: {}", stats.losses);
    println!("  Draws: {}", stats.draws);
    println!("  Win Rate: {:.2}%", stats.win_rate);
    println!("  Total Matches: {}", stats.total_matches);
    println!("  Sets Won: {}", stats.sets_won);
    println!("  Sets Lost: {}", stats.sets_lost);
    println!("  Games Won: {}", stats.games_won);
    println!("  Games Lost: {}", stats.games_lost);
}

fn username(snapshot: &Snapshot, id: PlayerId) -> String {
    snapshot
        .user(id)
        .map(|user| user.username.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

fn run_ratings(config: &AppConfig, snapshot: &Snapshot, json: bool) -> Result<()> {
    let engine = RatingEngine::from_config(&config.rating)?;
    let report = engine.compute(&snapshot.users, &snapshot.matches)?;

    for warning in report.warnings() {
        warn!("{}", warning);
    }

    let singles = Leaderboard::build(&snapshot.users, &report, PlayType::Singles);
    let doubles = Leaderboard::build(&snapshot.users, &report, PlayType::Doubles);

    if json {
        return print_json(&serde_json::json!({
            "singles": singles,
            "doubles": doubles,
            "processed_matches": report.processed_matches,
            "skipped_matches": report.skipped_matches,
        }));
    }

    print_leaderboard(&singles);
    print_leaderboard(&doubles);
    Ok(())
}

fn run_stats(
    config: &AppConfig,
    snapshot: &Snapshot,
    player: PlayerId,
    opponent: Option<PlayerId>,
    json: bool,
) -> Result<()> {
    let aggregator = StatsAggregator::new(snapshot)
        .with_excluded(config.rating.excluded_player_ids.iter().copied());

    let overall = aggregator.stats_for(player)?;
    let versus = opponent
        .map(|opponent| aggregator.head_to_head(player, opponent))
        .transpose()?;

    if json {
        return print_json(&serde_json::json!({
            "player": player,
            "stats": overall,
            "opponent": opponent,
            "head_to_head": versus,
        }));
    }

    print_stats(&format!("Stats for {}", username(snapshot, player)), &overall);
    if let (Some(opponent), Some(versus)) = (opponent, versus) {
        println!();
        print_stats(
            &format!(
                "Stats for {} vs {}",
                username(snapshot, player),
                username(snapshot, opponent)
            ),
            &versus,
        );
    }
    Ok(())
}

fn run_feed(snapshot: &Snapshot, limit: usize, json: bool) -> Result<()> {
    let feed: Vec<_> = recent_matches(snapshot).into_iter().take(limit).collect();

    if json {
        return print_json(&feed);
    }

    for summary in &feed {
        println!(
            "{}  {} vs {} at {}: {}",
            summary.date.format("%Y-%m-%d"),
            summary.player1.as_deref().unwrap_or("?"),
            summary.player2.as_deref().unwrap_or("?"),
            summary.location,
            summary.score.join(", ")
        );
    }
    Ok(())
}

async fn run(args: Args, config: AppConfig) -> Result<()> {
    let path = config
        .snapshot
        .path
        .clone()
        .ok_or_else(|| anyhow!("No snapshot file given (use --snapshot or SNAPSHOT_PATH)"))?;

    info!("Loading snapshot from: {}", path.display());
    let source = JsonFileSource::new(path);
    let snapshot = load_snapshot(&source, &config.rating.doubles_separator).await?;

    match args.command {
        Command::Ratings => run_ratings(&config, &snapshot, args.json),
        Command::Stats { player, opponent } => {
            run_stats(&config, &snapshot, player, opponent, args.json)
        }
        Command::Feed { limit } => run_feed(&snapshot, limit, args.json),
        Command::Check => {
            for m in &snapshot.matches {
                for token in &m.score {
                    parse_set_score(token)
                        .with_context(|| format!("Match {} has a bad score", m.id))?;
                }
            }
            let report = RatingEngine::from_config(&config.rating)?
                .compute(&snapshot.users, &snapshot.matches)?;
            for warning in report.warnings() {
                warn!("{}", warning);
            }
            info!(
                "Snapshot OK: {} users, {} matches",
                snapshot.users.len(),
                snapshot.matches.len()
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args, config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
