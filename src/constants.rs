//! Rule constants shared by the board, the agents and the game manager.
//!
//! Everything here is fixed for the standard free-style Gomoku rules: five in
//! a row wins, overlines count, and the four line directions are scanned.

// =============================================================================
// Rules
// =============================================================================

/// Number of consecutive pieces needed to win.
pub const NUM_REQUIRED: usize = 5;

/// How many times an agent may propose an illegal move before it forfeits.
pub const NUM_RETRIES: usize = 10;

/// Board size used when none is given.
pub const DEFAULT_SIZE: usize = 19;

// =============================================================================
// Directions
// =============================================================================

/// Number of line directions.
pub const NUM_DIRECTIONS: usize = 4;

/// Line directions as `(d_row, d_col)` steps.
/// Order: horizontal, vertical, diagonal (down-right), anti-diagonal (down-left)
pub const DIRECTIONS: [(isize, isize); NUM_DIRECTIONS] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal
    (1, -1), // Anti-diagonal
];
