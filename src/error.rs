//! Error type for board construction, match setup and move logging.

use std::fmt;
use std::io;

use crate::board::Side;
use crate::constants::NUM_REQUIRED;

/// Errors raised by the game engine.
///
/// Illegal moves are not errors: they are reported as `false` from
/// [`Board::add_piece`](crate::board::Board::add_piece) and handled by the
/// manager's retry policy.
#[derive(Debug)]
pub enum GameError {
    /// Board is smaller than the winning run length
    InvalidBoardSize { size: usize },
    /// Move output was requested without a destination
    MissingOutputPath,
    /// No agent is registered under this name
    UnknownAgent(String),
    /// Agent was asked to move without playing Black or White
    SideNotAssigned(Side),
    /// Writing the move log failed
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidBoardSize { size } => write!(
                f,
                "invalid board size {size}: must be at least {NUM_REQUIRED}"
            ),
            GameError::MissingOutputPath => {
                write!(f, "move output requested but no output path given")
            }
            GameError::UnknownAgent(name) => write!(f, "invalid agent type: {name}"),
            GameError::SideNotAssigned(side) => {
                write!(f, "agent cannot move for side {side}: not a player")
            }
            GameError::Io(e) => write!(f, "failed to write move log: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_board_size() {
        let e = GameError::InvalidBoardSize { size: 3 };
        assert_eq!(e.to_string(), "invalid board size 3: must be at least 5");
    }

    #[test]
    fn test_display_side_not_assigned() {
        let e = GameError::SideNotAssigned(Side::None);
        assert_eq!(e.to_string(), "agent cannot move for side none: not a player");
    }

    #[test]
    fn test_io_source() {
        let e: GameError = io::Error::other("disk full").into();
        assert!(e.source().is_some());
        assert!(GameError::MissingOutputPath.source().is_none());
    }
}
