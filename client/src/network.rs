//! Connection handling and the interactive play loop.
//!
//! The protocol is strictly request/response from the client's point of
//! view: block on the next server packet, and only when prompted block on
//! one line of local input. No polling anywhere.

use crate::render::{parse_move, render_board};
use log::{debug, info};
use shared::{wire, Packet, Outcome, BOARD_SIDE};
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::net::TcpStream;

pub struct Client {
    stream: TcpStream,
    input: Lines<BufReader<Stdin>>,
    player: u8,
    marks: Vec<char>,
}

impl Client {
    /// Connects and runs the full handshake: Welcome in, Mark and Color
    /// out, Ready in.
    pub async fn connect(server_addr: &str, mark: char, color: String) -> io::Result<Client> {
        let mut stream = TcpStream::connect(server_addr).await?;
        info!("Connected to {}", server_addr);

        let player = match wire::read_packet(&mut stream).await? {
            Packet::Welcome { player } => player,
            other => return Err(unexpected(&other)),
        };
        println!("Joined as player {}", player);

        wire::write_packet(&mut stream, &Packet::Mark { symbol: mark }).await?;
        wire::write_packet(&mut stream, &Packet::Color { value: color }).await?;

        let marks = match wire::read_packet(&mut stream).await? {
            Packet::Ready { marks, colors } => {
                println!("All players ready:");
                for (mark, color) in marks.iter().zip(&colors) {
                    println!("  {} ({})", mark, color);
                }
                marks
            }
            other => return Err(unexpected(&other)),
        };

        Ok(Client {
            stream,
            input: BufReader::new(tokio::io::stdin()).lines(),
            player,
            marks,
        })
    }

    /// Plays until the session ends or the connection drops.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            match wire::read_packet(&mut self.stream).await? {
                Packet::YourTurn { board } => {
                    println!("\n{}", render_board(&board));
                    let value = self.prompt_move().await?;
                    wire::write_packet(&mut self.stream, &Packet::Move { value }).await?;
                }
                Packet::MoveAccepted { notice, board } => {
                    println!("{}", notice);
                    println!("{}", render_board(&board));
                }
                Packet::MoveRejected { reason, .. } => {
                    println!("Move rejected: {}", reason);
                }
                Packet::GameOver { outcome, board } => {
                    println!("\n{}", render_board(&board));
                    self.announce(&outcome);
                    return Ok(());
                }
                other => {
                    debug!("Ignoring unexpected {} packet", other.kind());
                }
            }
        }
    }

    /// Blocks on one line of input and re-asks until it parses.
    async fn prompt_move(&mut self) -> io::Result<i32> {
        loop {
            println!("Your move (e.g. B3, or 'resign'):");
            match self.input.next_line().await? {
                Some(line) => {
                    if let Some(value) = parse_move(&line, BOARD_SIDE) {
                        return Ok(value);
                    }
                    println!("Could not read '{}' as a move", line.trim());
                }
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "stdin closed",
                    ))
                }
            }
        }
    }

    fn announce(&self, outcome: &Outcome) {
        match *outcome {
            Outcome::Win { player } => {
                let mark = self.marks.get(player as usize).copied().unwrap_or('?');
                if player == self.player {
                    println!("You won! ({})", mark);
                } else {
                    println!("Player {} ({}) won", player, mark);
                }
            }
            Outcome::Resignation { player } => {
                if player == self.player {
                    println!("You resigned");
                } else {
                    println!("Player {} resigned", player);
                }
            }
        }
    }
}

fn unexpected(packet: &Packet) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("unexpected {} packet from server", packet.kind()),
    )
}
