//! Gomoku-Rust command line.
//!
//! ## Usage
//!
//! - `gomoku-rust` - Play a demo game (random vs greedy)
//! - `gomoku-rust play --black console --white greedy_defender` - Play one game
//! - `gomoku-rust tournament --games 100` - Run many quiet games and tally results
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) to change log verbosity.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gomoku_rust::agent::AgentKind;
use gomoku_rust::board::Side;
use gomoku_rust::constants::DEFAULT_SIZE;
use gomoku_rust::manager::GameManager;

/// Gomoku-Rust: a five-in-a-row rules engine
#[derive(Parser)]
#[command(name = "gomoku-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and print the final board
    Play {
        #[command(flatten)]
        setup: MatchSetup,
        /// Write every move as CSV to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Suppress game narration
        #[arg(long, short)]
        quiet: bool,
    },
    /// Run many quiet games and print how they ended
    Tournament {
        #[command(flatten)]
        setup: MatchSetup,
        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
}

#[derive(Args)]
struct MatchSetup {
    /// Agent playing Black (moves first)
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    black: AgentKind,
    /// Agent playing White
    #[arg(long, value_enum, default_value_t = AgentKind::Greedy)]
    white: AgentKind,
    /// Board size (at least 5)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Seed for the agents' random choices
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            setup,
            output,
            quiet,
        }) => play(&setup, output, quiet),
        Some(Commands::Tournament { setup, games }) => tournament(&setup, games),
        None => {
            let setup = MatchSetup {
                black: AgentKind::Random,
                white: AgentKind::Greedy,
                size: DEFAULT_SIZE,
                seed: None,
            };
            play(&setup, None, false)
        }
    }
}

fn play(setup: &MatchSetup, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let mut manager = GameManager::new(setup.size, quiet).context("failed to set up board")?;
    let mut black = setup.black.create(setup.seed);
    let mut white = setup.white.create(setup.seed.map(|s| s.wrapping_add(1)));

    let winner = manager
        .run_game_custom(black.as_mut(), white.as_mut(), output.is_some(), output.as_deref())
        .context("game failed")?;

    println!("{}", manager.board());
    println!("Result: {}", describe(winner));
    Ok(())
}

fn tournament(setup: &MatchSetup, games: usize) -> Result<()> {
    let mut manager = GameManager::new(setup.size, true).context("failed to set up board")?;
    let mut black = setup.black.create(setup.seed);
    let mut white = setup.white.create(setup.seed.map(|s| s.wrapping_add(1)));

    info!(
        black = setup.black.name(),
        white = setup.white.name(),
        games,
        "starting tournament"
    );

    let (mut black_wins, mut white_wins, mut ties) = (0, 0, 0);
    for _ in 0..games {
        match manager.run_game_custom(black.as_mut(), white.as_mut(), false, None)? {
            Side::Black => black_wins += 1,
            Side::White => white_wins += 1,
            _ => ties += 1,
        }
    }

    println!("{} (black): {black_wins}", setup.black.name());
    println!("{} (white): {white_wins}", setup.white.name());
    println!("ties: {ties}");
    Ok(())
}

fn describe(winner: Side) -> String {
    match winner {
        Side::Tie => "tie".to_string(),
        side => format!("{side} wins"),
    }
}
