//! Terminal client for the trigrid game server.
//!
//! Rendering here is deliberately plain text: the client's job is the
//! handshake, the board display, and turning typed coordinates into wire
//! moves. Everything authoritative happens on the server.

pub mod network;
pub mod render;
