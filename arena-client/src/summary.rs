//! Per-match tallies returned by `play_match`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{MatchStatus, Outcome};

/// Why a match stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchEnd {
    /// The unary round bound was reached.
    RoundLimit,
    GameOver,
    MatchComplete,
    OpponentDisconnected,
    /// The server closed the battle stream without a final status.
    StreamClosed,
}

impl MatchEnd {
    /// End reason for a terminal status. Anything else terminal is a
    /// game over.
    pub fn from_status(status: &MatchStatus) -> Self {
        match status {
            MatchStatus::MatchComplete => MatchEnd::MatchComplete,
            MatchStatus::OpponentDisconnected => MatchEnd::OpponentDisconnected,
            _ => MatchEnd::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub match_id: Option<String>,
    pub rounds_completed: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Outcomes that do not say which side this client was on.
    pub unknown_outcomes: u32,
    /// Every resolved round, keyed by the outcome string as the arena sent it.
    pub outcomes: BTreeMap<String, u32>,
    pub moves_submitted: u32,
    /// Unary only: moves the arena did not accept.
    pub rejected_moves: u32,
    /// Unary only: total `CheckRoundResult` calls.
    pub poll_attempts: u64,
    pub ended_by: MatchEnd,
}

impl MatchSummary {
    pub(crate) fn new(ended_by: MatchEnd) -> Self {
        Self {
            match_id: None,
            rounds_completed: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            unknown_outcomes: 0,
            outcomes: BTreeMap::new(),
            moves_submitted: 0,
            rejected_moves: 0,
            poll_attempts: 0,
            ended_by,
        }
    }

    /// Count one resolved round from its raw outcome string.
    pub(crate) fn record(&mut self, raw_outcome: &str) {
        self.rounds_completed += 1;
        *self.outcomes.entry(raw_outcome.to_string()).or_insert(0) += 1;

        match Outcome::from_wire(raw_outcome) {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Unknown(_) => self.unknown_outcomes += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tallies_each_outcome() {
        let mut summary = MatchSummary::new(MatchEnd::RoundLimit);
        for raw in ["WIN", "WIN", "LOSS", "TIE", "?"] {
            summary.record(raw);
        }

        assert_eq!(summary.rounds_completed, 5);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.ties, 1);
        assert_eq!(summary.unknown_outcomes, 1);
        assert_eq!(summary.outcomes.get("WIN"), Some(&2));
        assert_eq!(summary.outcomes.get("?"), Some(&1));
    }

    #[test]
    fn test_round_relative_outcomes_are_kept_raw() {
        let mut summary = MatchSummary::new(MatchEnd::RoundLimit);
        for raw in ["PLAYER_ONE_WIN", "PLAYER_TWO_WIN", "PLAYER_TWO_WIN", "TIE"] {
            summary.record(raw);
        }

        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.ties, 1);
        assert_eq!(summary.unknown_outcomes, 3);
        assert_eq!(summary.outcomes.get("PLAYER_TWO_WIN"), Some(&2));
        assert_eq!(summary.outcomes.get("PLAYER_ONE_WIN"), Some(&1));
    }

    #[test]
    fn test_end_reason_for_terminal_statuses() {
        assert_eq!(
            MatchEnd::from_status(&MatchStatus::MatchComplete),
            MatchEnd::MatchComplete
        );
        assert_eq!(
            MatchEnd::from_status(&MatchStatus::OpponentDisconnected),
            MatchEnd::OpponentDisconnected
        );
        assert_eq!(
            MatchEnd::from_status(&MatchStatus::GameOver),
            MatchEnd::GameOver
        );
    }
}
