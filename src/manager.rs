//! Turn-taking between two agents.
//!
//! The [`GameManager`] owns the only mutable [`Board`] of a match. Each call
//! to [`GameManager::make_agent_move`] asks one agent for a move, retrying
//! illegal answers up to [`NUM_RETRIES`] times, and turns the board's state
//! after the move into an outcome:
//!
//! - the mover's side if the move completed five in a row,
//! - `Side::Tie` if no side can complete a line any more,
//! - the opponent's side if the agent forfeited,
//! - `Side::None` while the game continues.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::agent::{Agent, AgentKind};
use crate::board::{Board, Coord, Side};
use crate::constants::NUM_RETRIES;
use crate::error::GameError;
use crate::record::{CsvSink, MoveRecord, MoveSink};

pub struct GameManager {
    board: Board,
    /// Suppresses narration; never changes results
    quiet: bool,
}

impl GameManager {
    pub fn new(size: usize, quiet: bool) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(size)?,
            quiet,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reset_game(&mut self) {
        self.board.reset();
    }

    /// Place a piece and evaluate the result.
    ///
    /// Returns `(false, Side::None)` if the move was rejected. A win takes
    /// precedence over a tie.
    pub fn add_piece(&mut self, coord: Coord, side: Side) -> (bool, Side) {
        if !self.board.add_piece(coord, side) {
            return (false, Side::None);
        }

        let outcome = if self.board.check_win(coord, side) {
            if !self.quiet {
                info!("{side} wins!");
            }
            side
        } else if self.board.check_tie() {
            if !self.quiet {
                info!("game tied!");
            }
            Side::Tie
        } else {
            Side::None
        };

        (true, outcome)
    }

    /// Let `agent` make one move, recording it to `sink` if given.
    ///
    /// An agent that fails to propose a valid move within [`NUM_RETRIES`]
    /// attempts forfeits and its opponent is returned as the winner. Fails if
    /// the agent has no player side or the sink cannot record the move.
    pub fn make_agent_move(
        &mut self,
        agent: &mut dyn Agent,
        sink: Option<&mut dyn MoveSink>,
    ) -> Result<Side, GameError> {
        let side = agent.side();
        if !side.is_player() {
            return Err(GameError::SideNotAssigned(side));
        }

        let mut chosen = None;
        for attempt in 1..=NUM_RETRIES {
            let coord = agent.next_move(&self.board);
            if self.board.is_valid_move(coord) {
                chosen = Some(coord);
                break;
            }
            debug!(%side, ?coord, attempt, "agent proposed invalid move");
        }

        let Some(coord) = chosen else {
            if !self.quiet {
                warn!("{side} failed to find a valid move");
            }
            return Ok(agent.opponent());
        };

        let (accepted, outcome) = self.add_piece(coord, side);
        if !accepted {
            return Ok(Side::None);
        }
        if let Some(sink) = sink {
            sink.record(&MoveRecord {
                side,
                coord,
                grid: self.board.cells().to_vec(),
                outcome,
            })?;
        }
        Ok(outcome)
    }

    /// Play a full match, `agent1` as Black and `agent2` as White.
    ///
    /// When `output` is set the moves are written as CSV to `path`, which must
    /// then be given.
    pub fn run_game_custom(
        &mut self,
        agent1: &mut dyn Agent,
        agent2: &mut dyn Agent,
        output: bool,
        path: Option<&Path>,
    ) -> Result<Side, GameError> {
        if !output {
            return self.run_game_with_sink(agent1, agent2, None);
        }
        let path = path.ok_or(GameError::MissingOutputPath)?;
        let mut sink = CsvSink::create(path, self.board.size())?;
        self.run_game_with_sink(agent1, agent2, Some(&mut sink))
    }

    /// Play a full match, sending every move to `sink`.
    pub fn run_game_with_sink(
        &mut self,
        agent1: &mut dyn Agent,
        agent2: &mut dyn Agent,
        mut sink: Option<&mut dyn MoveSink>,
    ) -> Result<Side, GameError> {
        self.reset_game();

        agent1.set_side(Side::Black);
        agent2.set_side(Side::White);

        let winner = loop {
            let outcome = self.make_agent_move(agent1, reborrow(&mut sink))?;
            if outcome != Side::None {
                break outcome;
            }
            let outcome = self.make_agent_move(agent2, reborrow(&mut sink))?;
            if outcome != Side::None {
                break outcome;
            }
        };

        if !self.quiet {
            info!(%winner, "game done");
        }
        Ok(winner)
    }

    /// Play a full match between two agents built by name.
    pub fn run_game(
        &mut self,
        black: AgentKind,
        white: AgentKind,
        output: bool,
        path: Option<&Path>,
    ) -> Result<Side, GameError> {
        let mut agent1 = black.create(None);
        let mut agent2 = white.create(None);
        self.run_game_custom(agent1.as_mut(), agent2.as_mut(), output, path)
    }
}

/// Shorten the sink borrow so it can be handed out once per move.
fn reborrow<'s>(sink: &'s mut Option<&mut dyn MoveSink>) -> Option<&'s mut dyn MoveSink> {
    match sink {
        Some(s) => Some(&mut **s),
        None => None,
    }
}
