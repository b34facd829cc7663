use serde::{Deserialize, Serialize};

pub mod board;
pub mod wire;

pub use board::{Board, Snapshot};

/// Board side length used by every session.
pub const BOARD_SIDE: usize = 5;
/// Consecutive equal marks needed to win a line.
pub const WIN_RUN: usize = 3;
/// Move value a client sends to resign instead of placing a mark.
pub const RESIGN: i32 = -2;
/// Default port the server binds and clients dial.
pub const DEFAULT_PORT: u16 = 4545;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum Packet {
    // server -> client
    Welcome {
        player: u8,
    },
    Ready {
        marks: Vec<char>,
        colors: Vec<String>,
    },
    YourTurn {
        board: Snapshot,
    },
    MoveAccepted {
        notice: String,
        board: Snapshot,
    },
    MoveRejected {
        reason: String,
        board: Snapshot,
    },
    GameOver {
        outcome: Outcome,
        board: Snapshot,
    },

    // client -> server
    Mark {
        symbol: char,
    },
    Color {
        value: String,
    },
    Move {
        value: i32,
    },
}

impl Packet {
    /// Short name for logging and protocol-violation reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Packet::Welcome { .. } => "Welcome",
            Packet::Ready { .. } => "Ready",
            Packet::YourTurn { .. } => "YourTurn",
            Packet::MoveAccepted { .. } => "MoveAccepted",
            Packet::MoveRejected { .. } => "MoveRejected",
            Packet::GameOver { .. } => "GameOver",
            Packet::Mark { .. } => "Mark",
            Packet::Color { .. } => "Color",
            Packet::Move { .. } => "Move",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Outcome {
    Win { player: u8 },
    Resignation { player: u8 },
}

/// A structurally valid move, decoded from its wire integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Resign,
    Place { row: usize, col: usize },
}

/// Decodes a wire move value: `RESIGN`, or `row*10 + column` (both
/// zero-based). Returns None when either coordinate falls outside `side`.
pub fn decode_move(value: i32, side: usize) -> Option<Move> {
    if value == RESIGN {
        return Some(Move::Resign);
    }
    if value < 0 {
        return None;
    }
    let row = (value / 10) as usize;
    let col = (value % 10) as usize;
    if row >= side || col >= side {
        return None;
    }
    Some(Move::Place { row, col })
}

pub fn encode_move(row: usize, col: usize) -> i32 {
    (row * 10 + col) as i32
}

/// Human-readable cell name: row letter from 'A', column from 1.
pub fn describe_cell(row: usize, col: usize) -> String {
    format!("{}{}", (b'A' + row as u8) as char, col + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_move_in_bounds() {
        assert_eq!(decode_move(0, 5), Some(Move::Place { row: 0, col: 0 }));
        assert_eq!(decode_move(23, 5), Some(Move::Place { row: 2, col: 3 }));
        assert_eq!(decode_move(44, 5), Some(Move::Place { row: 4, col: 4 }));
    }

    #[test]
    fn test_decode_move_out_of_bounds() {
        // Column 5 on a 5-wide board is invalid even though row 4 is fine.
        assert_eq!(decode_move(45, 5), None);
        assert_eq!(decode_move(50, 5), None);
        assert_eq!(decode_move(99, 5), None);
        assert_eq!(decode_move(-1, 5), None);
        assert_eq!(decode_move(-3, 5), None);
    }

    #[test]
    fn test_decode_resign_sentinel() {
        assert_eq!(decode_move(RESIGN, 5), Some(Move::Resign));
    }

    #[test]
    fn test_encode_decode_agree() {
        for row in 0..BOARD_SIDE {
            for col in 0..BOARD_SIDE {
                let value = encode_move(row, col);
                assert_eq!(decode_move(value, BOARD_SIDE), Some(Move::Place { row, col }));
            }
        }
    }

    #[test]
    fn test_describe_cell() {
        assert_eq!(describe_cell(0, 0), "A1");
        assert_eq!(describe_cell(1, 2), "B3");
        assert_eq!(describe_cell(4, 4), "E5");
    }

    #[test]
    fn test_packet_serialization_roundtrip() {
        let packet = Packet::Ready {
            marks: vec!['X', 'O'],
            colors: vec!["red".to_string(), "blue".to_string()],
        };

        let serialized = bincode::serialize(&packet).unwrap();
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Packet::Ready { marks, colors } => {
                assert_eq!(marks, vec!['X', 'O']);
                assert_eq!(colors, vec!["red", "blue"]);
            }
            other => panic!("Wrong packet type after deserialization: {}", other.kind()),
        }
    }

    #[test]
    fn test_outcome_serialization_roundtrip() {
        let packet = Packet::GameOver {
            outcome: Outcome::Win { player: 1 },
            board: Board::new(BOARD_SIDE).snapshot(),
        };

        let serialized = bincode::serialize(&packet).unwrap();
        let deserialized: Packet = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Packet::GameOver { outcome, board } => {
                assert_eq!(outcome, Outcome::Win { player: 1 });
                assert_eq!(board.len(), BOARD_SIDE);
            }
            other => panic!("Wrong packet type after deserialization: {}", other.kind()),
        }
    }
}
