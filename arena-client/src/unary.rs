//! Request/response match driver.
//!
//! Registers, then for every round submits one move and polls
//! `CheckRoundResult` until the arena stops answering `PENDING`. Every call
//! blocks the match; the fixed poll interval is the only throttle.

use tracing::{debug, info, warn};

use crate::client::GrpcArena;
use crate::config::{PollPolicy, UnaryConfig};
use crate::error::{ClientError, ClientResult};
use crate::model::{Identity, MatchStatus, RoundCheck};
use crate::moves::{MoveSource, RandomMoveSource};
use crate::summary::{MatchEnd, MatchSummary};
use crate::traits::UnaryArena;

/// Poll a round until its status is no longer pending.
///
/// Sleeps `policy.interval` between attempts, never before the first. With
/// no `max_attempts` this waits for as long as the arena keeps answering
/// `PENDING`. Returns the resolving response and the number of calls made.
pub async fn poll_round_result<A>(
    arena: &mut A,
    match_id: &str,
    round: u32,
    policy: &PollPolicy,
) -> ClientResult<(RoundCheck, u32)>
where
    A: UnaryArena + ?Sized,
{
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let check = arena
            .check_round_result(match_id, round)
            .await
            .map_err(|e| e.during("check round result"))?;

        if !check.status.is_pending() {
            return Ok((check, attempts));
        }

        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Err(ClientError::PollLimitExceeded { round, attempts });
            }
        }

        tokio::time::sleep(policy.interval).await;
    }
}

/// Plays one match against the unary arena.
pub struct UnaryMatchClient<A, M = RandomMoveSource> {
    arena: A,
    identity: Identity,
    moves: M,
    config: UnaryConfig,
}

impl UnaryMatchClient<GrpcArena, RandomMoveSource> {
    /// Connect to the arena at `addr` with an entropy-seeded move source.
    pub async fn connect(addr: &str, identity: Identity) -> ClientResult<Self> {
        let arena = GrpcArena::connect(addr).await?;
        Ok(Self::new(arena, identity, RandomMoveSource::from_entropy()))
    }
}

impl<A: UnaryArena, M: MoveSource> UnaryMatchClient<A, M> {
    pub fn new(arena: A, identity: Identity, moves: M) -> Self {
        Self {
            arena,
            identity,
            moves,
            config: UnaryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: UnaryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_moves<N: MoveSource>(self, moves: N) -> UnaryMatchClient<A, N> {
        UnaryMatchClient {
            arena: self.arena,
            identity: self.identity,
            moves,
            config: self.config,
        }
    }

    pub fn arena(&self) -> &A {
        &self.arena
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Drive one match to completion.
    ///
    /// Ends after `max_rounds` rounds or as soon as the arena reports a
    /// terminal status. Any transport failure aborts the match; a move the
    /// arena does not accept only skips that round's result.
    pub async fn play_match(&mut self) -> ClientResult<MatchSummary> {
        info!(identity = %self.identity, "Unary client starting");

        let registration = self
            .arena
            .register(&self.identity)
            .await
            .map_err(|e| e.during("registration"))?;
        let match_id = registration.match_id;
        info!(
            match_id = %match_id,
            status = %registration.status,
            opponent = registration.opponent_name.as_deref().unwrap_or("-"),
            "Registered"
        );

        if registration.status == MatchStatus::WaitingForOpponent {
            info!(grace = ?self.config.opponent_grace, "Waiting for opponent");
            tokio::time::sleep(self.config.opponent_grace).await;
        }

        let mut summary = MatchSummary::new(MatchEnd::RoundLimit);
        summary.match_id = Some(match_id.clone());

        for round in 1..=self.config.max_rounds {
            let mv = self.moves.next_move();
            let status = self
                .arena
                .submit_move(&match_id, round, mv)
                .await
                .map_err(|e| e.during("submit move"))?;
            summary.moves_submitted += 1;

            match status {
                MatchStatus::Accepted => {}
                terminal if terminal.is_terminal() => {
                    info!(round, status = %terminal, "Game is over");
                    summary.ended_by = MatchEnd::from_status(&terminal);
                    break;
                }
                rejected => {
                    warn!(round, status = %rejected, "Move not accepted");
                    summary.rejected_moves += 1;
                    continue;
                }
            }

            let (check, attempts) =
                poll_round_result(&mut self.arena, &match_id, round, &self.config.poll).await?;
            summary.poll_attempts += u64::from(attempts);

            if check.status.is_terminal() {
                info!(round, status = %check.status, "Match ended while polling");
                summary.ended_by = MatchEnd::from_status(&check.status);
                break;
            }

            summary.record(&check.outcome);
            debug!(round, %mv, outcome = %check.outcome, polls = attempts, "Round resolved");
            if round % 100 == 0 {
                info!(round, outcome = %check.outcome, polls = attempts, "Progress");
            }
        }

        info!(
            rounds = summary.rounds_completed,
            wins = summary.wins,
            losses = summary.losses,
            ties = summary.ties,
            polls = summary.poll_attempts,
            "Match completed"
        );
        Ok(summary)
    }
}
