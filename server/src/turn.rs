//! Turn coordinator: the request/validate/apply/broadcast cycle.
//!
//! Exactly one slot's stream is read at a time, so turn order is enforced
//! by the protocol itself and no move-arrival race can exist. Invalid
//! moves are rejected and the same player re-prompted; the turn never
//! advances past an unapplied move.

use crate::fault::Fault;
use crate::session::Session;
use log::{info, warn};
use shared::{decode_move, describe_cell, Move, Outcome, Packet};
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};

/// Why a session stopped. A fault carries the concrete failure so the
/// recovery controller can say which player and error forced the reset.
#[derive(Debug)]
pub enum EndReason {
    Win(usize),
    Resignation(usize),
    Fault(Fault),
}

enum TurnState {
    AwaitingMove(usize),
    Applying { player: usize, value: i32 },
    Broadcasting { player: usize, row: usize, col: usize },
    Ended(EndReason),
}

pub struct TurnCoordinator<S> {
    session: Session<S>,
}

/// Logs the fault and wraps it in the terminal state.
fn fault(fault: Fault) -> TurnState {
    warn!("{}", fault);
    TurnState::Ended(EndReason::Fault(fault))
}

impl<S> TurnCoordinator<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(session: Session<S>) -> Self {
        Self { session }
    }

    /// Drives the session to a terminal condition and returns it together
    /// with the reason, so the caller can tear it down.
    pub async fn run(mut self) -> (Session<S>, EndReason) {
        let mut state = TurnState::AwaitingMove(self.session.current());

        loop {
            state = match state {
                TurnState::AwaitingMove(player) => self.await_move(player).await,
                TurnState::Applying { player, value } => self.apply(player, value).await,
                TurnState::Broadcasting { player, row, col } => {
                    self.acknowledge(player, row, col).await
                }
                TurnState::Ended(reason) => {
                    self.finish(&reason).await;
                    return (self.session, reason);
                }
            };
        }
    }

    /// Prompts `player` with the current board and blocks on their reply.
    /// Nothing is read from any other slot meanwhile.
    async fn await_move(&mut self, player: usize) -> TurnState {
        let prompt = Packet::YourTurn {
            board: self.session.board().snapshot(),
        };
        let slot = self.session.slot_mut(player);

        if let Err(source) = slot.send(&prompt).await {
            return fault(Fault::TurnIo { player, source });
        }

        match slot.recv().await {
            Ok(Packet::Move { value }) => TurnState::Applying { player, value },
            Ok(other) => fault(Fault::Protocol {
                player,
                got: other.kind(),
                expected: "Move",
            }),
            Err(source) => fault(Fault::TurnIo { player, source }),
        }
    }

    async fn apply(&mut self, player: usize, value: i32) -> TurnState {
        let side = self.session.board().side();
        let (row, col) = match decode_move(value, side) {
            Some(Move::Resign) => {
                info!("Player {} resigned", player);
                return TurnState::Ended(EndReason::Resignation(player));
            }
            Some(Move::Place { row, col }) => (row, col),
            None => {
                return self
                    .reject(player, format!("move {} is out of range", value))
                    .await;
            }
        };

        if self.session.board().cell(row, col).is_some() {
            return self
                .reject(player, format!("cell {} is occupied", describe_cell(row, col)))
                .await;
        }

        let mark = self.session.slot_mut(player).mark;
        if !self.session.board_mut().mark(row, col, mark) {
            // Validated above; a failure here means the board and the
            // validation disagree.
            return fault(Fault::TurnIo {
                player,
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("board rejected validated move {}", value),
                ),
            });
        }

        if self.session.board().has_won() {
            TurnState::Ended(EndReason::Win(player))
        } else {
            TurnState::Broadcasting { player, row, col }
        }
    }

    /// Reject-and-reprompt: the board is untouched and the same player
    /// keeps the turn.
    async fn reject(&mut self, player: usize, reason: String) -> TurnState {
        info!("Rejected move from player {}: {}", player, reason);
        let rejection = Packet::MoveRejected {
            reason,
            board: self.session.board().snapshot(),
        };
        match self.session.slot_mut(player).send(&rejection).await {
            Ok(()) => TurnState::AwaitingMove(player),
            Err(source) => fault(Fault::TurnIo { player, source }),
        }
    }

    /// Acknowledges the applied move to the mover only, then hands the
    /// turn to the next seat.
    async fn acknowledge(&mut self, player: usize, row: usize, col: usize) -> TurnState {
        let snapshot = self.session.board().snapshot();
        let slot = self.session.slot_mut(player);
        let notice = format!("{} played {}", slot.mark, describe_cell(row, col));

        let ack = Packet::MoveAccepted {
            notice,
            board: snapshot,
        };
        if let Err(source) = slot.send(&ack).await {
            return fault(Fault::TurnIo { player, source });
        }

        self.session.advance();
        TurnState::AwaitingMove(self.session.current())
    }

    /// Terminal handling. Win and resignation are broadcast to every slot
    /// best-effort; a fault broadcasts nothing, since the faulting link is
    /// what just proved unusable.
    async fn finish(&mut self, reason: &EndReason) {
        let outcome = match *reason {
            EndReason::Win(player) => {
                info!("Player {} won", player);
                Outcome::Win {
                    player: player as u8,
                }
            }
            EndReason::Resignation(player) => {
                info!("Player {} resigned, session over", player);
                Outcome::Resignation {
                    player: player as u8,
                }
            }
            EndReason::Fault(ref fault) => {
                warn!("Session ended on fault ({}), skipping outcome broadcast", fault);
                return;
            }
        };

        let game_over = Packet::GameOver {
            outcome,
            board: self.session.board().snapshot(),
        };
        self.session.broadcast_best_effort(&game_over).await;
    }
}
