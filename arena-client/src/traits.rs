//! Transport abstractions consumed by the match drivers.
//! Implemented by both the gRPC `GrpcArena` and the mocks.

use crate::error::ClientResult;
use crate::model::{
    ClientMessage, Identity, MatchStatus, Move, Registration, RoundCheck, ServerEvent,
};
use async_trait::async_trait;

/// Request/response surface of the arena.
#[async_trait]
pub trait UnaryArena: Send {
    /// Register for a match
    async fn register(&mut self, identity: &Identity) -> ClientResult<Registration>;

    /// Submit this client's move for a round, returning the arena's status
    async fn submit_move(
        &mut self,
        match_id: &str,
        round: u32,
        mv: Move,
    ) -> ClientResult<MatchStatus>;

    /// Ask whether a round has been resolved yet
    async fn check_round_result(&mut self, match_id: &str, round: u32)
        -> ClientResult<RoundCheck>;
}

/// Streaming surface of the arena.
#[async_trait]
pub trait BattleArena: Send {
    type Channel: BattleChannel;

    /// Open a battle stream with the handshake queued as its first message.
    ///
    /// The handshake goes out with the stream itself, so a server that holds
    /// back its response headers until it has seen the handshake still makes
    /// progress.
    async fn open_battle(&mut self, identity: &Identity) -> ClientResult<Self::Channel>;
}

/// One open battle stream. Dropping it releases both directions.
#[async_trait]
pub trait BattleChannel: Send {
    /// Send one message; completes before the caller may receive again.
    async fn send(&mut self, message: ClientMessage) -> ClientResult<()>;

    /// Next server event, or `None` once the server has ended the stream.
    async fn recv(&mut self) -> ClientResult<Option<ServerEvent>>;

    /// Close the send direction. Later sends fail with `ChannelClosed`.
    fn close_send(&mut self);
}
