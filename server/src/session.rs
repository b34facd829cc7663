//! One complete game from handshake to terminal condition.
//!
//! A `Session` owns the board, the ordered player slots, and the
//! current-player index. It has exactly one owner at any time (the turn
//! coordinator during play, the recovery controller between games), so no
//! locking exists anywhere in this crate.

use log::warn;
use shared::{wire, Board, Packet, BOARD_SIDE};
use std::io;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

/// One fixed seat, bound to one connection for its lifetime.
#[derive(Debug)]
pub struct PlayerSlot<S> {
    pub index: usize,
    pub mark: char,
    pub color: String,
    stream: S,
}

impl<S> PlayerSlot<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(index: usize, mark: char, color: String, stream: S) -> Self {
        Self {
            index,
            mark,
            color,
            stream,
        }
    }

    pub async fn send(&mut self, packet: &Packet) -> io::Result<()> {
        wire::write_packet(&mut self.stream, packet).await
    }

    pub async fn recv(&mut self) -> io::Result<Packet> {
        wire::read_packet(&mut self.stream).await
    }
}

#[derive(Debug)]
pub struct Session<S> {
    slots: Vec<PlayerSlot<S>>,
    board: Board,
    current: usize,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(slots: Vec<PlayerSlot<S>>) -> Self {
        Self {
            slots,
            board: Board::new(BOARD_SIDE),
            current: 0,
        }
    }

    pub fn player_count(&self) -> usize {
        self.slots.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Hands the turn to the next seat: `(current + 1) % N`.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.slots.len();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut PlayerSlot<S> {
        &mut self.slots[index]
    }

    pub fn marks(&self) -> Vec<char> {
        self.slots.iter().map(|slot| slot.mark).collect()
    }

    pub fn colors(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.color.clone()).collect()
    }

    /// Sends `packet` to every slot, failing on the first broken link.
    pub async fn broadcast(&mut self, packet: &Packet) -> Result<(), (usize, io::Error)> {
        for slot in &mut self.slots {
            slot.send(packet).await.map_err(|e| (slot.index, e))?;
        }
        Ok(())
    }

    /// Sends `packet` to every slot, logging rather than failing on broken
    /// links. Used for the terminal outcome, where some peers may already
    /// be gone.
    pub async fn broadcast_best_effort(&mut self, packet: &Packet) {
        for slot in &mut self.slots {
            if let Err(e) = slot.send(packet).await {
                warn!("Could not deliver {} to player {}: {}", packet.kind(), slot.index, e);
            }
        }
    }

    /// Closes every connection. Errors are ignored; the session is being
    /// discarded either way.
    pub async fn shutdown(mut self) {
        for slot in &mut self.slots {
            let _ = slot.stream.shutdown().await;
        }
    }
}
