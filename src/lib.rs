//! Gomoku-Rust: a five-in-a-row rules engine and match driver.
//!
//! This crate enforces the rules of free-style Gomoku and runs matches between
//! pluggable agents. It is not a strong player; the agents shipped here are
//! simple baselines.
//!
//! ## Modules
//!
//! - [`constants`] - Run length, retry budget and line directions
//! - [`board`] - Grid state, legality, win scan and incremental tie tracking
//! - [`agent`] - The `Agent` trait, baseline agents and the agent factory
//! - [`manager`] - Turn-taking, retries, forfeits and full matches
//! - [`record`] - Move log sinks (in-memory and CSV)
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use gomoku_rust::agent::{GreedyAgent, RandomAgent};
//! use gomoku_rust::board::Side;
//! use gomoku_rust::manager::GameManager;
//!
//! let mut manager = GameManager::new(9, true).unwrap();
//! let mut black = RandomAgent::with_seed(1);
//! let mut white = GreedyAgent::new(fastrand::Rng::with_seed(2));
//!
//! let winner = manager
//!     .run_game_custom(&mut black, &mut white, false, None)
//!     .unwrap();
//! assert_ne!(winner, Side::None);
//! println!("{}", manager.board());
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod manager;
pub mod record;
