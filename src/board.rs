//! Gomoku board: grid state, move legality, win scan and tie tracking.
//!
//! The grid is stored row-major as a flat `Vec<Side>`. Alongside it the board
//! keeps a tracker of blocked lines: for every player side, direction and
//! anchor cell, whether the five-cell window starting at that anchor can still
//! be completed by that side. A window is blocked when it runs off the board
//! or when the opposing side holds one of its cells. Entries only ever flip
//! from open to blocked, so a running count of blocked entries answers the tie
//! question in constant time.

use std::fmt;

use tracing::{debug, trace};

use crate::constants::{DIRECTIONS, NUM_DIRECTIONS, NUM_REQUIRED};
use crate::error::GameError;

/// Contents of a cell, or the outcome of a game.
///
/// `Tie` is only ever used as an outcome and is never stored on the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    None,
    Black,
    White,
    Tie,
}

impl Side {
    /// Sides that own pieces, in tracker order.
    pub const PLAYERS: [Side; 2] = [Side::Black, Side::White];

    /// True for `Black` and `White`.
    pub fn is_player(self) -> bool {
        matches!(self, Side::Black | Side::White)
    }

    /// The other player. `None` and `Tie` map to themselves.
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
            other => other,
        }
    }

    /// Numeric code used in move logs.
    pub fn code(self) -> i8 {
        match self {
            Side::None => 0,
            Side::Black => 1,
            Side::White => 2,
            Side::Tie => -1,
        }
    }

    fn tracker_slot(self) -> Option<usize> {
        match self {
            Side::Black => Some(0),
            Side::White => Some(1),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::None => "none",
            Side::Black => "black",
            Side::White => "white",
            Side::Tie => "tie",
        };
        f.write_str(name)
    }
}

/// A `(row, col)` coordinate. Signed so that off-board proposals can be
/// represented and rejected.
pub type Coord = (isize, isize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major grid, only `None`, `Black` or `White`
    cells: Vec<Side>,
    /// Blocked-line tracker indexed by (side, direction, row, col)
    blocked: Vec<bool>,
    /// Number of `true` entries in `blocked`
    blocked_count: usize,
}

impl Board {
    /// Create an empty board. Fails if `size` is below the winning run length.
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size < NUM_REQUIRED {
            return Err(GameError::InvalidBoardSize { size });
        }
        let area = size * size;
        let mut board = Self {
            size,
            cells: vec![Side::None; area],
            blocked: vec![false; Side::PLAYERS.len() * NUM_DIRECTIONS * area],
            blocked_count: 0,
        };
        board.reset();
        Ok(board)
    }

    /// Clear the grid and restore the tracker to its baseline, where only
    /// windows running off the board are blocked.
    pub fn reset(&mut self) {
        self.cells.fill(Side::None);
        self.blocked.fill(false);
        self.blocked_count = 0;

        for side in Side::PLAYERS {
            for dir in 0..NUM_DIRECTIONS {
                for row in 0..self.size as isize {
                    for col in 0..self.size as isize {
                        if !self.window_fits((row, col), dir) {
                            self.block(side, dir, (row, col));
                        }
                    }
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major snapshot of the grid.
    pub fn cells(&self) -> &[Side] {
        &self.cells
    }

    pub fn is_on_board(&self, coord: Coord) -> bool {
        let n = self.size as isize;
        (0..n).contains(&coord.0) && (0..n).contains(&coord.1)
    }

    fn idx(&self, coord: Coord) -> Option<usize> {
        if self.is_on_board(coord) {
            Some(coord.0 as usize * self.size + coord.1 as usize)
        } else {
            None
        }
    }

    /// Piece at `coord`, or `Side::None` if empty or off the board.
    pub fn get_piece(&self, coord: Coord) -> Side {
        self.idx(coord).map_or(Side::None, |i| self.cells[i])
    }

    pub fn is_valid_move(&self, coord: Coord) -> bool {
        self.idx(coord).is_some_and(|i| self.cells[i] == Side::None)
    }

    /// All empty coordinates in row-major order.
    pub fn get_valid_moves(&self) -> Vec<Coord> {
        let n = self.size as isize;
        (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .filter(|&coord| self.get_piece(coord) == Side::None)
            .collect()
    }

    /// Place a piece for `side` at `coord`.
    ///
    /// Returns `false` without touching the board if `side` is not a player or
    /// the coordinate is off the board or occupied. On success every window
    /// passing through `coord` becomes blocked for the opponent.
    pub fn add_piece(&mut self, coord: Coord, side: Side) -> bool {
        if !side.is_player() {
            debug!(%side, "rejected piece for non-player side");
            return false;
        }
        let Some(idx) = self.idx(coord).filter(|&i| self.cells[i] == Side::None) else {
            debug!(?coord, %side, "invalid coordinate");
            return false;
        };

        self.cells[idx] = side;

        let opponent = side.opponent();
        for (dir, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
            for offset in 0..NUM_REQUIRED as isize {
                let anchor = (coord.0 - dr * offset, coord.1 - dc * offset);
                if self.is_on_board(anchor) {
                    self.block(opponent, dir, anchor);
                }
            }
        }

        trace!(?coord, %side, blocked = self.blocked_count, "placed piece");
        true
    }

    /// Whether `side` has five in a row through `coord`.
    ///
    /// Only lines through `coord` are scanned, so this must be called with the
    /// coordinate that was just played.
    pub fn check_win(&self, coord: Coord, side: Side) -> bool {
        if !self.is_on_board(coord) {
            return false;
        }
        let reach = NUM_REQUIRED as isize - 1;
        for &(dr, dc) in &DIRECTIONS {
            let mut count = 0;
            for offset in -reach..=reach {
                if self.get_piece((coord.0 + dr * offset, coord.1 + dc * offset)) == side {
                    count += 1;
                    if count == NUM_REQUIRED {
                        return true;
                    }
                } else {
                    count = 0;
                }
            }
        }
        false
    }

    /// True once no side can complete any window anywhere on the board.
    pub fn check_tie(&self) -> bool {
        self.blocked_count == self.blocked.len()
    }

    /// Whether the window anchored at `anchor` in direction `dir` can no
    /// longer be completed by `side`. Off-board anchors and non-player sides
    /// report `true`.
    pub fn is_blocked(&self, side: Side, dir: usize, anchor: Coord) -> bool {
        match side.tracker_slot() {
            Some(slot) if self.is_on_board(anchor) && dir < NUM_DIRECTIONS => {
                self.blocked[self.tracker_idx(slot, dir, anchor)]
            }
            _ => true,
        }
    }

    /// Length of the run of `side` pieces through `coord`, counting `coord`
    /// itself as `side`, along the longest of the four directions.
    pub fn longest_line_through(&self, coord: Coord, side: Side) -> usize {
        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| {
                1 + self.count_from(coord, (dr, dc), side) + self.count_from(coord, (-dr, -dc), side)
            })
            .max()
            .unwrap_or(1)
    }

    fn count_from(&self, coord: Coord, (dr, dc): (isize, isize), side: Side) -> usize {
        let mut count = 0;
        let mut cur = (coord.0 + dr, coord.1 + dc);
        while self.get_piece(cur) == side && side.is_player() {
            count += 1;
            cur = (cur.0 + dr, cur.1 + dc);
        }
        count
    }

    fn window_fits(&self, anchor: Coord, dir: usize) -> bool {
        let (dr, dc) = DIRECTIONS[dir];
        let reach = NUM_REQUIRED as isize - 1;
        self.is_on_board(anchor) && self.is_on_board((anchor.0 + dr * reach, anchor.1 + dc * reach))
    }

    fn tracker_idx(&self, slot: usize, dir: usize, anchor: Coord) -> usize {
        let cell = anchor.0 as usize * self.size + anchor.1 as usize;
        (slot * NUM_DIRECTIONS + dir) * self.size * self.size + cell
    }

    fn block(&mut self, side: Side, dir: usize, anchor: Coord) {
        // Only player sides have a tracker
        let Some(slot) = side.tracker_slot() else {
            return;
        };
        let i = self.tracker_idx(slot, dir, anchor);
        if !self.blocked[i] {
            self.blocked[i] = true;
            self.blocked_count += 1;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size as isize {
            for col in 0..self.size as isize {
                let ch = match self.get_piece((row, col)) {
                    Side::Black => 'X',
                    Side::White => 'O',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
