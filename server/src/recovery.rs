//! Recovery controller: all-or-nothing session semantics.
//!
//! A plain iterative loop, never recursion: accept, play, reset, repeat.
//! Every fault anywhere in handshake or play converges on the same reset
//! path. Reset discards the whole session, so the next iteration starts
//! from zero shared state.

use crate::registry::ConnectionRegistry;
use crate::turn::{EndReason, TurnCoordinator};
use log::{error, info, warn};
use tokio::net::TcpListener;

pub struct RecoveryController {
    registry: ConnectionRegistry,
}

impl RecoveryController {
    pub fn new(listener: TcpListener, expected_players: usize) -> Self {
        Self {
            registry: ConnectionRegistry::new(listener, expected_players),
        }
    }

    /// Serves sessions until the process is killed. One bad connection
    /// ends the game for all players; no per-slot reconnect exists.
    pub async fn run_forever(&mut self) {
        loop {
            let session = match self.registry.accept_all().await {
                Ok(session) => session,
                Err(fault) => {
                    warn!("Handshake phase failed: {}; resetting", fault);
                    continue;
                }
            };

            let (session, reason) = TurnCoordinator::new(session).run().await;
            match reason {
                EndReason::Win(player) => info!("Session over: player {} won", player),
                EndReason::Resignation(player) => {
                    info!("Session over: player {} resigned", player)
                }
                EndReason::Fault(fault) => error!("Session over: {}", fault),
            }

            session.shutdown().await;
            info!("Session state discarded, accepting a fresh game");
        }
    }
}
