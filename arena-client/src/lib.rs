//! Arena gRPC client library
//!
//! Two match drivers for the rock/paper/scissors arena, one per integration
//! style:
//!
//! - [`UnaryMatchClient`] registers, submits a move per round and polls for
//!   each round's result.
//! - [`StreamingMatchClient`] holds one bidirectional stream and answers
//!   server triggers as they arrive.
//!
//! Both are generic over the transport ([`UnaryArena`], [`BattleArena`]) and
//! the [`MoveSource`], so tests can drive them without a server.
//!
//! # Example
//!
//! ```no_run
//! use arena_client::{Identity, StreamingMatchClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let identity = Identity::new("Rust", "StdRng");
//!     let mut client = StreamingMatchClient::connect("http://localhost:9000", identity).await?;
//!     let summary = client.play_match().await?;
//!     println!("Rounds completed: {}", summary.rounds_completed);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod converters;
mod error;
mod model;
mod moves;
mod streaming;
mod summary;
mod traits;
mod unary;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::{GrpcArena, GrpcBattleChannel};
pub use config::{
    PollPolicy, UnaryConfig, DEFAULT_MAX_ROUNDS, DEFAULT_OPPONENT_GRACE, DEFAULT_POLL_INTERVAL,
};
pub use error::{ClientError, ClientResult};
pub use model::{
    ClientMessage, Identity, MatchStatus, Move, Outcome, Registration, RoundCheck, RoundResult,
    ServerEvent,
};
pub use moves::{MoveSource, RandomMoveSource};
pub use streaming::StreamingMatchClient;
pub use summary::{MatchEnd, MatchSummary};
pub use traits::{BattleArena, BattleChannel, UnaryArena};
pub use unary::{poll_round_result, UnaryMatchClient};
