//! Bidirectional streaming match driver.
//!
//! One stream per match. After the handshake the client only reacts: a
//! trigger is answered with exactly one move before the next receive, a
//! result is tallied, and a terminal status closes the send half. There is
//! never more than one outstanding send on the stream.

use tracing::{debug, info, warn};

use crate::client::GrpcArena;
use crate::error::ClientResult;
use crate::model::{ClientMessage, Identity, ServerEvent};
use crate::moves::{MoveSource, RandomMoveSource};
use crate::summary::{MatchEnd, MatchSummary};
use crate::traits::{BattleArena, BattleChannel};

/// Plays one match against the streaming arena.
pub struct StreamingMatchClient<A, M = RandomMoveSource> {
    arena: A,
    identity: Identity,
    moves: M,
}

impl StreamingMatchClient<GrpcArena, RandomMoveSource> {
    /// Connect to the arena at `addr` with an entropy-seeded move source.
    pub async fn connect(addr: &str, identity: Identity) -> ClientResult<Self> {
        let arena = GrpcArena::connect(addr).await?;
        Ok(Self::new(arena, identity, RandomMoveSource::from_entropy()))
    }
}

impl<A: BattleArena, M: MoveSource> StreamingMatchClient<A, M> {
    pub fn new(arena: A, identity: Identity, moves: M) -> Self {
        Self {
            arena,
            identity,
            moves,
        }
    }

    pub fn with_moves<N: MoveSource>(self, moves: N) -> StreamingMatchClient<A, N> {
        StreamingMatchClient {
            arena: self.arena,
            identity: self.identity,
            moves,
        }
    }

    pub fn arena(&self) -> &A {
        &self.arena
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Drive one match until the server ends it.
    ///
    /// A terminal status or the server closing the stream is a normal end.
    /// Failing to open, send or receive is fatal and not retried. The stream
    /// is owned by this call and released on every return path.
    pub async fn play_match(&mut self) -> ClientResult<MatchSummary> {
        info!(identity = %self.identity, "Streaming client starting");

        let mut channel = self
            .arena
            .open_battle(&self.identity)
            .await
            .map_err(|e| e.during("open battle stream"))?;

        let mut summary = MatchSummary::new(MatchEnd::StreamClosed);
        loop {
            let event = channel.recv().await.map_err(|e| e.during("receive"))?;
            let Some(event) = event else {
                info!(rounds = summary.rounds_completed, "Stream closed by server");
                break;
            };

            match event {
                ServerEvent::Status(status) => {
                    if status.is_terminal() {
                        info!(%status, rounds = summary.rounds_completed, "Match finished");
                        summary.ended_by = MatchEnd::from_status(&status);
                        channel.close_send();
                        break;
                    }
                    info!(%status, "Status");
                }
                ServerEvent::Trigger { round_id } => {
                    let mv = self.moves.next_move();
                    channel
                        .send(ClientMessage::Move(mv))
                        .await
                        .map_err(|e| e.during("send move"))?;
                    summary.moves_submitted += 1;
                    debug!(?round_id, %mv, "Move sent");
                }
                ServerEvent::Result(result) => {
                    if summary.rounds_completed >= summary.moves_submitted {
                        warn!(
                            round = ?result.round_id,
                            "Result for a round this client has not moved in, ignoring"
                        );
                        continue;
                    }
                    summary.record(&result.outcome);
                    if summary.rounds_completed % 100 == 0 {
                        info!(round = ?result.round_id, outcome = %result.outcome, "Progress");
                    }
                }
            }
        }

        info!(
            rounds = summary.rounds_completed,
            wins = summary.wins,
            losses = summary.losses,
            ties = summary.ties,
            "Match completed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::mock::{BattleCall, MockBattleArena, ScriptedMoveSource};
    use crate::model::{MatchStatus, Move, RoundResult};
    use tokio_test::{assert_err, assert_ok};

    fn result(round_id: u32, outcome: &str) -> ServerEvent {
        ServerEvent::Result(RoundResult {
            round_id: Some(round_id),
            outcome: outcome.to_string(),
        })
    }

    fn trigger(round_id: u32) -> ServerEvent {
        ServerEvent::Trigger {
            round_id: Some(round_id),
        }
    }

    fn client(
        arena: MockBattleArena,
    ) -> StreamingMatchClient<MockBattleArena, ScriptedMoveSource> {
        StreamingMatchClient::new(
            arena,
            Identity::new("Rust", "StdRng"),
            ScriptedMoveSource::new(vec![Move::Paper, Move::Scissors]),
        )
    }

    fn moves_sent(calls: &[BattleCall]) -> Vec<Move> {
        calls
            .iter()
            .filter_map(|call| match call {
                BattleCall::Send(ClientMessage::Move(mv)) => Some(*mv),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_two_rounds_then_match_complete() {
        let arena = MockBattleArena::new().with_events(vec![
            trigger(1),
            result(1, "WIN"),
            trigger(2),
            result(2, "LOSS"),
            ServerEvent::Status(MatchStatus::MatchComplete),
        ]);

        let mut client = client(arena.clone());
        let summary = assert_ok!(client.play_match().await);

        let calls = arena.get_calls();
        assert_eq!(moves_sent(&calls), vec![Move::Paper, Move::Scissors]);
        assert_eq!(summary.rounds_completed, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.ended_by, MatchEnd::MatchComplete);
        assert!(matches!(
            calls.as_slice(),
            [.., BattleCall::CloseSend, BattleCall::Released]
        ));
    }

    #[tokio::test]
    async fn test_handshake_is_first_and_carries_identity() {
        let arena = MockBattleArena::new()
            .with_events(vec![ServerEvent::Status(MatchStatus::MatchComplete)]);

        let mut client = client(arena.clone());
        assert_ok!(client.play_match().await);

        let calls = arena.get_calls();
        assert_eq!(
            calls.first(),
            Some(&BattleCall::Open(Identity::new("Rust", "StdRng")))
        );
        let handshakes = calls
            .iter()
            .filter(|call| matches!(call, BattleCall::Send(ClientMessage::Handshake(_))))
            .count();
        assert_eq!(handshakes, 0, "handshake travels with open, never as a later send");
    }

    #[tokio::test]
    async fn test_every_trigger_is_answered_before_the_next_receive() {
        let arena = MockBattleArena::new().with_events(vec![
            ServerEvent::Status(MatchStatus::Connected),
            ServerEvent::Status(MatchStatus::OpponentFound("Go".to_string())),
            trigger(1),
            trigger(2),
            result(1, "TIE"),
            result(2, "TIE"),
            trigger(3),
            result(3, "WIN"),
        ]);

        let mut client = client(arena.clone());
        let summary = assert_ok!(client.play_match().await);

        let calls = arena.get_calls();
        let mut awaiting_move = false;
        for call in &calls {
            match call {
                BattleCall::Received(ServerEvent::Trigger { .. }) => {
                    assert!(!awaiting_move, "received before answering a trigger");
                    awaiting_move = true;
                }
                BattleCall::Received(_) => assert!(!awaiting_move),
                BattleCall::Send(ClientMessage::Move(_)) => {
                    assert!(awaiting_move, "move sent without a trigger");
                    awaiting_move = false;
                }
                _ => {}
            }
        }
        assert_eq!(moves_sent(&calls).len(), 3);
        assert_eq!(summary.rounds_completed, 3);
        assert_eq!(summary.ended_by, MatchEnd::StreamClosed);
    }

    #[tokio::test]
    async fn test_opponent_disconnected_ends_without_further_sends() {
        let arena = MockBattleArena::new().with_events(vec![
            trigger(1),
            ServerEvent::Status(MatchStatus::OpponentDisconnected),
            trigger(2),
            result(1, "WIN"),
        ]);

        let mut client = client(arena.clone());
        let summary = assert_ok!(client.play_match().await);

        let calls = arena.get_calls();
        assert_eq!(moves_sent(&calls).len(), 1);
        assert_eq!(summary.ended_by, MatchEnd::OpponentDisconnected);
        let after_close: Vec<_> = calls
            .iter()
            .skip_while(|call| !matches!(call, BattleCall::CloseSend))
            .skip(1)
            .collect();
        assert_eq!(after_close, vec![&BattleCall::Released]);
    }

    #[tokio::test]
    async fn test_game_over_ends_like_match_complete() {
        let arena = MockBattleArena::new().with_events(vec![
            trigger(1),
            ServerEvent::Status(MatchStatus::GameOver),
            trigger(2),
        ]);

        let mut client = client(arena.clone());
        let summary = assert_ok!(client.play_match().await);

        let calls = arena.get_calls();
        assert_eq!(moves_sent(&calls), vec![Move::Paper]);
        assert_eq!(summary.ended_by, MatchEnd::GameOver);
        assert!(matches!(
            calls.as_slice(),
            [.., BattleCall::CloseSend, BattleCall::Released]
        ));
    }

    #[tokio::test]
    async fn test_unsolicited_result_is_not_counted() {
        let arena = MockBattleArena::new().with_events(vec![
            result(1, "WIN"),
            trigger(1),
            result(1, "WIN"),
            ServerEvent::Status(MatchStatus::MatchComplete),
        ]);

        let mut client = client(arena);
        let summary = assert_ok!(client.play_match().await);

        assert_eq!(summary.rounds_completed, 1);
        assert_eq!(summary.moves_submitted, 1);
    }

    #[tokio::test]
    async fn test_receive_error_is_fatal_and_releases_the_stream() {
        let arena = MockBattleArena::new()
            .with_events(vec![trigger(1)])
            .with_recv_error_after(1, || tonic::Status::aborted("reset").into());

        let mut client = client(arena.clone());
        let err = assert_err!(client.play_match().await);

        assert!(err.to_string().starts_with("receive failed"));
        let calls = arena.get_calls();
        assert_eq!(calls.last(), Some(&BattleCall::Released));
        assert!(!calls.contains(&BattleCall::CloseSend));
    }

    #[tokio::test]
    async fn test_send_failure_is_fatal() {
        let arena = MockBattleArena::new()
            .with_events(vec![trigger(1), result(1, "WIN")])
            .with_failing_sends();

        let mut client = client(arena.clone());
        let err = assert_err!(client.play_match().await);

        assert!(matches!(err.root(), ClientError::ChannelClosed));
        assert!(err.to_string().starts_with("send move failed"));
        assert_eq!(arena.get_calls().last(), Some(&BattleCall::Released));
    }

    #[tokio::test]
    async fn test_open_failure_is_fatal() {
        let arena = MockBattleArena::new()
            .with_open_error(|| tonic::Status::unavailable("no arena").into());

        let mut client = client(arena.clone());
        let err = assert_err!(client.play_match().await);

        assert!(err.to_string().starts_with("open battle stream failed"));
        assert_eq!(arena.get_calls().len(), 1);
    }
}
