//! Integration tests for gomoku-rust
//!
//! Board scenarios (wins, ties, rejected moves) and full matches driven
//! through the game manager.

use std::path::PathBuf;

use gomoku_rust::agent::{Agent, AgentKind, GreedyAgent, GreedyDefendingAgent, RandomAgent};
use gomoku_rust::board::{Board, Coord, Side};
use gomoku_rust::constants::NUM_RETRIES;
use gomoku_rust::error::GameError;
use gomoku_rust::manager::GameManager;
use gomoku_rust::record::{MoveLog, MoveSink};

// =============================================================================
// Helper functions
// =============================================================================

/// Play moves alternately, Black first, asserting each is accepted.
fn setup_board(size: usize, moves: &[Coord]) -> Board {
    let mut board = Board::new(size).unwrap();
    let mut side = Side::Black;
    for &mv in moves {
        assert!(board.add_piece(mv, side), "move {mv:?} should be legal");
        side = side.opponent();
    }
    board
}

/// Agent that always proposes the same coordinate.
struct Stubborn {
    side: Side,
    coord: Coord,
    calls: usize,
}

impl Stubborn {
    fn new(coord: Coord) -> Self {
        Self {
            side: Side::None,
            coord,
            calls: 0,
        }
    }
}

impl Agent for Stubborn {
    fn next_move(&mut self, _board: &Board) -> Coord {
        self.calls += 1;
        self.coord
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn side(&self) -> Side {
        self.side
    }
}

fn temp_csv(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gomoku-rust-{}-{name}.csv", std::process::id()))
}

// =============================================================================
// Fresh and reset boards
// =============================================================================

#[test]
fn test_fresh_board_is_empty() {
    for size in [5, 6, 9, 15, 19] {
        let board = Board::new(size).unwrap();
        assert!(!board.check_tie(), "size {size} should not start tied");
        assert_eq!(board.get_valid_moves().len(), size * size);
        assert!(board.cells().iter().all(|&c| c == Side::None));
    }
}

#[test]
fn test_reset_restores_baseline() {
    let fresh = Board::new(7).unwrap();
    let mut board = setup_board(7, &[(0, 0), (3, 3), (6, 6), (2, 5)]);
    assert_ne!(board, fresh);

    board.reset();
    assert_eq!(board, fresh);
    board.reset();
    assert_eq!(board, fresh);
}

#[test]
fn test_board_too_small() {
    for size in 0..5 {
        assert!(matches!(
            Board::new(size),
            Err(GameError::InvalidBoardSize { .. })
        ));
        assert!(GameManager::new(size, true).is_err());
    }
}

// =============================================================================
// Move legality
// =============================================================================

#[test]
fn test_invalid_moves_do_not_mutate() {
    let mut board = setup_board(6, &[(2, 2), (3, 3)]);
    let before = board.clone();

    for coord in [(2, 2), (3, 3), (-1, 0), (0, -1), (6, 0), (0, 6), (100, 100)] {
        assert!(!board.is_valid_move(coord));
        assert!(!board.add_piece(coord, Side::Black));
        assert!(!board.add_piece(coord, Side::White));
        assert_eq!(board, before, "{coord:?} changed the board");
    }
}

#[test]
fn test_piece_is_stored() {
    let mut board = Board::new(5).unwrap();
    assert!(board.add_piece((4, 0), Side::White));
    assert_eq!(board.get_piece((4, 0)), Side::White);
    assert!(!board.is_valid_move((4, 0)));
    assert!(!board.get_valid_moves().contains(&(4, 0)));
}

// =============================================================================
// Wins
// =============================================================================

#[test]
fn test_row_win_on_fifth_piece() {
    let mut board = Board::new(5).unwrap();
    for col in 0..4 {
        assert!(board.add_piece((0, col), Side::Black));
        assert!(!board.check_win((0, col), Side::Black));
    }
    assert!(board.add_piece((0, 4), Side::Black));
    assert!(board.check_win((0, 4), Side::Black));
    assert!(!board.check_win((0, 4), Side::White));
}

#[test]
fn test_win_completed_in_the_middle() {
    let mut board = Board::new(9).unwrap();
    for row in [1, 2, 4, 5] {
        board.add_piece((row, 6), Side::White);
    }
    assert!(!board.check_win((5, 6), Side::White));
    board.add_piece((3, 6), Side::White);
    assert!(board.check_win((3, 6), Side::White));
}

#[test]
fn test_overline_wins() {
    let mut board = Board::new(9).unwrap();
    for i in [0, 1, 2, 4, 5, 6] {
        board.add_piece((i, i), Side::Black);
    }
    board.add_piece((3, 3), Side::Black);
    assert!(board.check_win((3, 3), Side::Black));
}

// =============================================================================
// Ties
// =============================================================================

/// Ten moves on 5x5 that leave every row, column and diagonal holding both
/// colours. The last move closes the final window open to Black.
const EARLY_TIE: [Coord; 10] = [
    (0, 0),
    (0, 1),
    (1, 2),
    (1, 3),
    (2, 4),
    (2, 0),
    (3, 1),
    (3, 2),
    (4, 3),
    (4, 4),
];

#[test]
fn test_tie_before_board_is_full() {
    let mut board = Board::new(5).unwrap();
    let mut side = Side::Black;
    for (i, &mv) in EARLY_TIE.iter().enumerate() {
        assert!(board.add_piece(mv, side));
        assert!(!board.check_win(mv, side));
        let last = i == EARLY_TIE.len() - 1;
        assert_eq!(board.check_tie(), last, "tie state wrong after move {i}");
        side = side.opponent();
    }
    assert_eq!(board.get_valid_moves().len(), 15);
}

#[test]
fn test_manager_reports_tie() {
    let mut manager = GameManager::new(5, true).unwrap();
    let mut side = Side::Black;
    for (i, &mv) in EARLY_TIE.iter().enumerate() {
        let expected = if i == EARLY_TIE.len() - 1 {
            Side::Tie
        } else {
            Side::None
        };
        assert_eq!(manager.add_piece(mv, side), (true, expected));
        side = side.opponent();
    }
}

#[test]
fn test_winning_move_closes_last_window() {
    // Before the final move Black can only complete row 0 and White only the
    // anti-diagonal. Black's (0, 4) wins and closes White's last window.
    let mut manager = GameManager::new(5, true).unwrap();
    let black = [(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (2, 4), (3, 2), (4, 1)];
    let white = [(1, 1), (2, 2), (3, 3), (4, 4), (1, 3), (2, 0), (3, 4), (4, 2), (3, 1)];
    for &mv in &black {
        assert!(manager.add_piece(mv, Side::Black).0);
    }
    for &mv in &white {
        assert!(manager.add_piece(mv, Side::White).0);
    }
    assert!(!manager.board().check_tie());
    assert!(!manager.board().is_blocked(Side::White, 3, (0, 4)));

    assert_eq!(manager.add_piece((0, 4), Side::Black), (true, Side::Black));
    assert!(manager.board().is_blocked(Side::White, 3, (0, 4)));
    // The completed row stays open for Black, so a won board is never tied
    assert!(!manager.board().is_blocked(Side::Black, 0, (0, 0)));
    assert!(!manager.board().check_tie());
}

// =============================================================================
// Game manager
// =============================================================================

#[test]
fn test_stubborn_agent_forfeits() {
    let mut manager = GameManager::new(5, true).unwrap();
    manager.add_piece((2, 2), Side::Black);

    let mut agent = Stubborn::new((2, 2));
    agent.set_side(Side::White);
    let outcome = manager.make_agent_move(&mut agent, None).unwrap();

    assert_eq!(outcome, Side::Black);
    assert_eq!(agent.calls, NUM_RETRIES);
}

#[test]
fn test_forfeit_ends_match() {
    let mut manager = GameManager::new(5, true).unwrap();
    let mut black = Stubborn::new((2, 2));
    let mut white = Stubborn::new((2, 2));
    let mut log = MoveLog::new();

    let winner = manager
        .run_game_with_sink(&mut black, &mut white, Some(&mut log))
        .unwrap();

    // Black takes the centre, White keeps asking for it
    assert_eq!(winner, Side::Black);
    assert_eq!(black.calls, 1);
    assert_eq!(white.calls, NUM_RETRIES);
    assert_eq!(log.len(), 1);
}

#[test]
fn test_output_requires_path() {
    let mut manager = GameManager::new(5, true).unwrap();
    let mut black = Stubborn::new((0, 0));
    let mut white = Stubborn::new((1, 1));

    let result = manager.run_game_custom(&mut black, &mut white, true, None);
    assert!(matches!(result, Err(GameError::MissingOutputPath)));
    assert_eq!(black.calls + white.calls, 0);

    let result = manager.run_game(AgentKind::Random, AgentKind::Random, true, None);
    assert!(matches!(result, Err(GameError::MissingOutputPath)));
}

#[test]
fn test_unassigned_agent_records_nothing() {
    let mut manager = GameManager::new(5, true).unwrap();
    let mut agent = RandomAgent::with_seed(1);
    let mut log = MoveLog::new();

    let result = manager.make_agent_move(&mut agent, Some(&mut log));
    assert!(matches!(result, Err(GameError::SideNotAssigned(Side::None))));
    assert!(log.is_empty());
    assert!(manager.board().cells().iter().all(|&c| c == Side::None));
}

#[test]
fn test_match_from_agent_names() {
    let mut manager = GameManager::new(9, true).unwrap();
    let winner = manager
        .run_game(AgentKind::Random, AgentKind::GreedyDefender, false, None)
        .unwrap();
    assert_ne!(winner, Side::None);
    assert!(manager.board().cells().iter().any(|&c| c != Side::None));

    let winner = manager
        .run_game(AgentKind::Greedy, AgentKind::Random, false, None)
        .unwrap();
    assert_ne!(winner, Side::None);
}

#[test]
fn test_full_match_is_logged() {
    let mut manager = GameManager::new(9, true).unwrap();
    let mut black = RandomAgent::with_seed(11);
    let mut white = GreedyDefendingAgent::new(fastrand::Rng::with_seed(12));
    let mut log = MoveLog::new();

    let winner = manager
        .run_game_with_sink(&mut black, &mut white, Some(&mut log))
        .unwrap();

    assert_ne!(winner, Side::None);
    assert_eq!(log.final_outcome(), Some(winner));
    let placed = manager
        .board()
        .cells()
        .iter()
        .filter(|&&c| c != Side::None)
        .count();
    assert_eq!(log.len(), placed);

    // Sides alternate and every snapshot grows by one piece
    for (i, record) in log.records.iter().enumerate() {
        let side = if i % 2 == 0 { Side::Black } else { Side::White };
        assert_eq!(record.side, side);
        assert_eq!(record.grid.iter().filter(|&&c| c != Side::None).count(), i + 1);
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = || {
        let mut manager = GameManager::new(9, true).unwrap();
        let mut black = GreedyAgent::new(fastrand::Rng::with_seed(5));
        let mut white = RandomAgent::with_seed(6);
        let mut log = MoveLog::new();
        manager
            .run_game_with_sink(&mut black, &mut white, Some(&mut log))
            .unwrap();
        log.records
    };
    assert_eq!(play(), play());
}

#[test]
fn test_csv_output() {
    let path = temp_csv("match");
    let mut manager = GameManager::new(5, true).unwrap();
    let mut black = RandomAgent::with_seed(21);
    let mut white = RandomAgent::with_seed(22);

    manager
        .run_game_custom(&mut black, &mut white, true, Some(&path))
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("side,row,col,outcome"));
    let placed = manager
        .board()
        .cells()
        .iter()
        .filter(|&&c| c != Side::None)
        .count();
    assert_eq!(lines.len(), 1 + placed);
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 4 + 25);
    }
}

#[test]
fn test_failing_sink_is_reported() {
    struct Broken;
    impl MoveSink for Broken {
        fn record(&mut self, _: &gomoku_rust::record::MoveRecord) -> std::io::Result<()> {
            Err(std::io::Error::other("sink closed"))
        }
    }

    let mut manager = GameManager::new(5, true).unwrap();
    let mut agent = Stubborn::new((0, 0));
    agent.set_side(Side::Black);
    let result = manager.make_agent_move(&mut agent, Some(&mut Broken));
    assert!(matches!(result, Err(GameError::Io(_))));
    // The move itself still stands
    assert_eq!(manager.board().get_piece((0, 0)), Side::Black);
}

#[test]
fn test_reset_between_matches() {
    let mut manager = GameManager::new(7, true).unwrap();
    let mut black = RandomAgent::with_seed(1);
    let mut white = RandomAgent::with_seed(2);

    manager
        .run_game_custom(&mut black, &mut white, false, None)
        .unwrap();
    manager.reset_game();
    assert_eq!(manager.board(), &Board::new(7).unwrap());
}
