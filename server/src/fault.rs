//! Session fault taxonomy.
//!
//! Every variant is unrecoverable for the running session; the recovery
//! controller answers all of them with the same full reset.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Fault {
    /// I/O or decode failure while accepting and greeting a connection.
    #[error("handshake with player {player} failed: {source}")]
    Handshake {
        player: usize,
        #[source]
        source: io::Error,
    },

    /// I/O or decode failure while awaiting or acknowledging a move.
    #[error("turn i/o with player {player} failed: {source}")]
    TurnIo {
        player: usize,
        #[source]
        source: io::Error,
    },

    /// The peer sent a well-formed packet of the wrong type.
    #[error("player {player} sent {got} where {expected} was required")]
    Protocol {
        player: usize,
        got: &'static str,
        expected: &'static str,
    },

    /// Two players chose the same mark symbol during the handshake.
    #[error("mark symbol '{symbol}' already taken")]
    DuplicateMark { symbol: char },

    /// A mark symbol that would render as blank or invisible.
    #[error("mark symbol {symbol:?} is not a visible character")]
    InvalidMark { symbol: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        let fault = Fault::Protocol {
            player: 1,
            got: "Color",
            expected: "Mark",
        };
        assert_eq!(
            fault.to_string(),
            "player 1 sent Color where Mark was required"
        );

        let fault = Fault::DuplicateMark { symbol: 'X' };
        assert_eq!(fault.to_string(), "mark symbol 'X' already taken");

        let fault = Fault::InvalidMark { symbol: ' ' };
        assert_eq!(
            fault.to_string(),
            "mark symbol ' ' is not a visible character"
        );
    }

    #[test]
    fn test_fault_preserves_io_source() {
        let fault = Fault::TurnIo {
            player: 0,
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "peer closed"),
        };
        let source = std::error::Error::source(&fault).unwrap();
        assert!(source.to_string().contains("peer closed"));
    }
}
