//! Connection registry: brings exactly N connections from "not yet
//! connected" to "fully handshaked and ready for play", or fails the whole
//! phase.
//!
//! Handshakes are strictly sequential: slot i completes (or faults) before
//! slot i+1 is accepted, in connection-arrival order. Any failure aborts
//! the entire phase; a partial session never reaches play.

use crate::fault::Fault;
use crate::session::{PlayerSlot, Session};
use log::{debug, info};
use shared::Packet;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};

pub struct ConnectionRegistry {
    listener: TcpListener,
    expected: usize,
}

impl ConnectionRegistry {
    pub fn new(listener: TcpListener, expected: usize) -> Self {
        Self { listener, expected }
    }

    /// Accepts and handshakes `expected` connections, then broadcasts the
    /// ready message with every player's mark and color. All-or-nothing:
    /// the first fault discards every slot accepted so far.
    pub async fn accept_all(&mut self) -> Result<Session<TcpStream>, Fault> {
        let mut slots: Vec<PlayerSlot<TcpStream>> = Vec::with_capacity(self.expected);

        while slots.len() < self.expected {
            let index = slots.len();
            let (stream, addr) = self.listener.accept().await.map_err(|source| {
                Fault::Handshake {
                    player: index,
                    source,
                }
            })?;
            debug!("Accepted connection from {} for slot {}", addr, index);

            let slot = handshake(index, stream).await?;
            if slots.iter().any(|s| s.mark == slot.mark) {
                return Err(Fault::DuplicateMark { symbol: slot.mark });
            }
            info!(
                "Player {} joined with mark '{}' and color '{}'",
                index, slot.mark, slot.color
            );
            slots.push(slot);
        }

        let mut session = Session::new(slots);
        let ready = Packet::Ready {
            marks: session.marks(),
            colors: session.colors(),
        };
        session
            .broadcast(&ready)
            .await
            .map_err(|(player, source)| Fault::Handshake { player, source })?;

        info!("All {} players ready, session starts", self.expected);
        Ok(session)
    }
}

/// Per-connection handshake: Welcome out, then Mark and Color in, in that
/// order. Generic over the stream so tests can drive it in memory.
pub async fn handshake<S>(index: usize, stream: S) -> Result<PlayerSlot<S>, Fault>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut slot = PlayerSlot::new(index, ' ', String::new(), stream);
    let io_fault = |source| Fault::Handshake {
        player: index,
        source,
    };

    slot.send(&Packet::Welcome {
        player: index as u8,
    })
    .await
    .map_err(io_fault)?;

    slot.mark = match slot.recv().await.map_err(io_fault)? {
        // Whitespace and control marks would render the same as empty
        // cells, so they never enter a session.
        Packet::Mark { symbol } if symbol.is_whitespace() || symbol.is_control() => {
            return Err(Fault::InvalidMark { symbol })
        }
        Packet::Mark { symbol } => symbol,
        other => {
            return Err(Fault::Protocol {
                player: index,
                got: other.kind(),
                expected: "Mark",
            })
        }
    };

    slot.color = match slot.recv().await.map_err(io_fault)? {
        Packet::Color { value } => value,
        other => {
            return Err(Fault::Protocol {
                player: index,
                got: other.kind(),
                expected: "Color",
            })
        }
    };

    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::wire;

    async fn client_side_handshake(
        peer: &mut tokio::io::DuplexStream,
        mark: char,
        color: &str,
    ) -> Packet {
        let welcome = wire::read_packet(peer).await.unwrap();
        wire::write_packet(peer, &Packet::Mark { symbol: mark })
            .await
            .unwrap();
        wire::write_packet(
            peer,
            &Packet::Color {
                value: color.to_string(),
            },
        )
        .await
        .unwrap();
        welcome
    }

    #[tokio::test]
    async fn test_handshake_assigns_identity() {
        let (server_end, mut peer) = tokio::io::duplex(1024);

        let client = tokio::spawn(async move { client_side_handshake(&mut peer, 'X', "red").await });

        let slot = handshake(3, server_end).await.unwrap();
        assert_eq!(slot.index, 3);
        assert_eq!(slot.mark, 'X');
        assert_eq!(slot.color, "red");

        let welcome = client.await.unwrap();
        assert!(matches!(welcome, Packet::Welcome { player: 3 }));
    }

    #[tokio::test]
    async fn test_handshake_rejects_wrong_packet_order() {
        let (server_end, mut peer) = tokio::io::duplex(1024);

        let client = tokio::spawn(async move {
            let _ = wire::read_packet(&mut peer).await.unwrap();
            // Color before Mark violates the handshake sequence.
            wire::write_packet(
                &mut peer,
                &Packet::Color {
                    value: "red".to_string(),
                },
            )
            .await
            .unwrap();
            peer
        });

        let err = handshake(0, server_end).await.unwrap_err();
        match err {
            Fault::Protocol { player, got, expected } => {
                assert_eq!(player, 0);
                assert_eq!(got, "Color");
                assert_eq!(expected, "Mark");
            }
            other => panic!("Expected protocol fault, got: {}", other),
        }
        drop(client.await.unwrap());
    }

    #[tokio::test]
    async fn test_handshake_rejects_invisible_mark() {
        for symbol in [' ', '\t', '\u{7f}'] {
            let (server_end, mut peer) = tokio::io::duplex(1024);

            let client = tokio::spawn(async move {
                let _ = wire::read_packet(&mut peer).await.unwrap();
                wire::write_packet(&mut peer, &Packet::Mark { symbol })
                    .await
                    .unwrap();
                peer
            });

            let err = handshake(0, server_end).await.unwrap_err();
            match err {
                Fault::InvalidMark { symbol: got } => assert_eq!(got, symbol),
                other => panic!("Expected invalid-mark fault, got: {}", other),
            }
            drop(client.await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_handshake_faults_on_disconnect() {
        let (server_end, peer) = tokio::io::duplex(1024);
        drop(peer);

        let err = handshake(1, server_end).await.unwrap_err();
        assert!(matches!(err, Fault::Handshake { player: 1, .. }));
    }
}
