//! Move-choosing agents.
//!
//! An [`Agent`] only ever sees a read-only [`Board`] and answers with a
//! candidate coordinate. Legality is checked by the
//! [`GameManager`](crate::manager::GameManager), which retries illegal answers
//! and declares a forfeit once the retry budget runs out.
//!
//! Agents are selected by name through [`AgentKind`].

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use clap::ValueEnum;

use crate::board::{Board, Coord, Side};
use crate::error::GameError;

/// Coordinate returned when an agent has nothing to propose.
pub const NO_MOVE: Coord = (-1, -1);

/// A player that picks moves from the board state.
pub trait Agent {
    /// Propose a coordinate to play. May be illegal.
    fn next_move(&mut self, board: &Board) -> Coord;

    /// Assign the side this agent plays for the coming match.
    fn set_side(&mut self, side: Side);

    fn side(&self) -> Side;

    fn opponent(&self) -> Side {
        self.side().opponent()
    }
}

/// Uniform choice among `moves`, or [`NO_MOVE`] if there are none.
fn pick(rng: &mut fastrand::Rng, moves: &[Coord]) -> Coord {
    if moves.is_empty() {
        NO_MOVE
    } else {
        moves[rng.usize(..moves.len())]
    }
}

/// Valid moves sharing the highest score.
fn best_moves<K: Ord>(board: &Board, mut score: impl FnMut(Coord) -> K) -> Vec<Coord> {
    let mut best: Option<K> = None;
    let mut moves = Vec::new();
    for coord in board.get_valid_moves() {
        let s = score(coord);
        if best.as_ref().is_some_and(|b| s < *b) {
            continue;
        }
        if best.as_ref() != Some(&s) {
            best = Some(s);
            moves.clear();
        }
        moves.push(coord);
    }
    moves
}

// =============================================================================
// Random
// =============================================================================

/// Plays a uniformly random empty cell.
pub struct RandomAgent {
    side: Side,
    rng: fastrand::Rng,
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            side: Side::None,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            side: Side::None,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn next_move(&mut self, board: &Board) -> Coord {
        pick(&mut self.rng, &board.get_valid_moves())
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn side(&self) -> Side {
        self.side
    }
}

// =============================================================================
// Console
// =============================================================================

/// Human player reading `row col` lines.
///
/// Anything that does not parse becomes [`NO_MOVE`], which the manager treats
/// like any other illegal move.
pub struct ConsoleAgent<R> {
    side: Side,
    input: R,
}

impl ConsoleAgent<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConsoleAgent<R> {
    pub fn new(input: R) -> Self {
        Self {
            side: Side::None,
            input,
        }
    }
}

/// Parse `"row col"` or `"row,col"`.
pub fn parse_coord(s: &str) -> Option<Coord> {
    let mut parts = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

impl<R: BufRead> Agent for ConsoleAgent<R> {
    fn next_move(&mut self, board: &Board) -> Coord {
        println!("{board}");
        print!("{} to move (row col): ", self.side);
        io::stdout().flush().ok();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(n) if n > 0 => parse_coord(&line).unwrap_or(NO_MOVE),
            _ => NO_MOVE,
        }
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn side(&self) -> Side {
        self.side
    }
}

// =============================================================================
// Greedy
// =============================================================================

/// Extends its own longest line, breaking ties at random.
pub struct GreedyAgent {
    side: Side,
    rng: fastrand::Rng,
}

impl GreedyAgent {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            side: Side::None,
            rng,
        }
    }
}

impl Agent for GreedyAgent {
    fn next_move(&mut self, board: &Board) -> Coord {
        let side = self.side;
        let moves = best_moves(board, |c| board.longest_line_through(c, side));
        pick(&mut self.rng, &moves)
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn side(&self) -> Side {
        self.side
    }
}

/// Like [`GreedyAgent`], but also blocks the opponent's longest line when it
/// is longer than anything it can build itself.
pub struct GreedyDefendingAgent {
    side: Side,
    rng: fastrand::Rng,
}

impl GreedyDefendingAgent {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            side: Side::None,
            rng,
        }
    }
}

impl Agent for GreedyDefendingAgent {
    fn next_move(&mut self, board: &Board) -> Coord {
        let (own, other) = (self.side, self.opponent());
        let moves = best_moves(board, |c| {
            let attack = board.longest_line_through(c, own);
            let defend = board.longest_line_through(c, other);
            // Equal threats favour attacking
            (attack.max(defend), attack)
        });
        pick(&mut self.rng, &moves)
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn side(&self) -> Side {
        self.side
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Registered agent types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Random,
    Console,
    Greedy,
    #[value(name = "greedy_defender")]
    GreedyDefender,
}

impl AgentKind {
    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Console => "console",
            AgentKind::Greedy => "greedy",
            AgentKind::GreedyDefender => "greedy_defender",
        }
    }

    /// Build an agent of this kind. `seed` makes the random choices
    /// reproducible; the console agent ignores it.
    pub fn create(self, seed: Option<u64>) -> Box<dyn Agent> {
        let rng = || seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        match self {
            AgentKind::Random => Box::new(RandomAgent {
                side: Side::None,
                rng: rng(),
            }),
            AgentKind::Console => Box::new(ConsoleAgent::stdin()),
            AgentKind::Greedy => Box::new(GreedyAgent::new(rng())),
            AgentKind::GreedyDefender => Box::new(GreedyDefendingAgent::new(rng())),
        }
    }
}

impl FromStr for AgentKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(AgentKind::Random),
            "console" => Ok(AgentKind::Console),
            "greedy" => Ok(AgentKind::Greedy),
            "greedy_defender" => Ok(AgentKind::GreedyDefender),
            other => Err(GameError::UnknownAgent(other.to_string())),
        }
    }
}
