//! # Trigrid Game Server
//!
//! Authoritative server for a turn-based board game played over persistent
//! TCP connections. It seats a fixed number of players, exchanges identity
//! and appearance data during a strictly sequential handshake, then hands
//! control to exactly one player at a time until somebody completes a
//! three-in-a-row run, resigns, or a connection fails.
//!
//! ## Architecture
//!
//! A single task drives everything. The source of truth for whose turn it
//! is lives in the session's current-player index, and only that player's
//! stream is ever read during play, so turn order is enforced by the
//! protocol rather than by locks. Concurrency never exceeds one mutator;
//! the session is owned by the turn coordinator while a game is active and
//! by the recovery controller between games.
//!
//! ## Module Organization
//!
//! - [`registry`] accepts and handshakes exactly N connections, or fails
//!   the whole phase. No partial session ever reaches play.
//! - [`session`] owns the board, the ordered player slots, and the
//!   current-player index for one game.
//! - [`turn`] runs the request/validate/apply/broadcast cycle as an
//!   explicit state machine and detects terminal conditions.
//! - [`recovery`] wraps the rest in an iterative accept/play/reset loop;
//!   every fault converges on a full session reset.
//! - [`fault`] is the error taxonomy shared by the above.
//!
//! ## Example
//!
//! ```rust,no_run
//! use server::recovery::RecoveryController;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4545").await?;
//!     RecoveryController::new(listener, 2).run_forever().await;
//!     Ok(())
//! }
//! ```

pub mod fault;
pub mod recovery;
pub mod registry;
pub mod session;
pub mod turn;
