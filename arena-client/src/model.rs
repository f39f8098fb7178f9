//! Domain types shared by both match drivers.
//!
//! The arena speaks in loosely typed strings and integers; everything is
//! parsed into these types at the transport boundary so the drivers can
//! branch exhaustively.

use std::fmt;

/// Identity announced once per match, at registration or handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Free-text label of the competing implementation.
    pub language_name: String,
    /// Free-text label of the move-generation method.
    pub prng_algorithm: String,
}

impl Identity {
    pub fn new(language_name: impl Into<String>, prng_algorithm: impl Into<String>) -> Self {
        Self {
            language_name: language_name.into(),
            prng_algorithm: prng_algorithm.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.language_name, self.prng_algorithm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Wire value: 0 = rock, 1 = paper, 2 = scissors.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Move {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Move::Rock),
            1 => Ok(Move::Paper),
            2 => Ok(Move::Scissors),
            other => Err(other),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Rock => "ROCK",
            Move::Paper => "PAPER",
            Move::Scissors => "SCISSORS",
        };
        f.write_str(name)
    }
}

/// Session state as signalled by the arena.
///
/// Anything the client does not recognise, including an empty string, lands
/// in [`MatchStatus::Other`] and is treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    WaitingForOpponent,
    Ready,
    Connected,
    OpponentFound(String),
    Accepted,
    InvalidTurn,
    Pending,
    Complete,
    MatchComplete,
    OpponentDisconnected,
    GameOver,
    Other(String),
}

impl MatchStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(name) = trimmed.strip_prefix("OPPONENT_FOUND") {
            let name = name.trim_start_matches(':').trim();
            return MatchStatus::OpponentFound(name.to_string());
        }
        match trimmed {
            "WAITING_FOR_OPPONENT" => MatchStatus::WaitingForOpponent,
            "READY" => MatchStatus::Ready,
            "CONNECTED" => MatchStatus::Connected,
            "ACCEPTED" => MatchStatus::Accepted,
            "INVALID_TURN" => MatchStatus::InvalidTurn,
            "PENDING" => MatchStatus::Pending,
            "COMPLETE" => MatchStatus::Complete,
            "MATCH_COMPLETE" => MatchStatus::MatchComplete,
            "OPPONENT_DISCONNECTED" => MatchStatus::OpponentDisconnected,
            "GAME_OVER" => MatchStatus::GameOver,
            _ => MatchStatus::Other(raw.to_string()),
        }
    }

    /// No further moves may be submitted once one of these is observed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MatchStatus::MatchComplete | MatchStatus::OpponentDisconnected | MatchStatus::GameOver
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MatchStatus::Pending)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::WaitingForOpponent => f.write_str("WAITING_FOR_OPPONENT"),
            MatchStatus::Ready => f.write_str("READY"),
            MatchStatus::Connected => f.write_str("CONNECTED"),
            MatchStatus::OpponentFound(name) => write!(f, "OPPONENT_FOUND: {}", name),
            MatchStatus::Accepted => f.write_str("ACCEPTED"),
            MatchStatus::InvalidTurn => f.write_str("INVALID_TURN"),
            MatchStatus::Pending => f.write_str("PENDING"),
            MatchStatus::Complete => f.write_str("COMPLETE"),
            MatchStatus::MatchComplete => f.write_str("MATCH_COMPLETE"),
            MatchStatus::OpponentDisconnected => f.write_str("OPPONENT_DISCONNECTED"),
            MatchStatus::GameOver => f.write_str("GAME_OVER"),
            MatchStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// Round outcome from this client's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    Unknown(String),
}

impl Outcome {
    /// Reads a player-relative outcome string.
    ///
    /// The unary arena reports outcomes from the round's point of view
    /// (`PLAYER_ONE_WIN`), where player one is whoever submitted first in
    /// that round. Nothing the client sees says which player it was, so
    /// those stay unknown; only `TIE` can be read from them.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "WIN" => Outcome::Win,
            "LOSS" => Outcome::Loss,
            "TIE" | "DRAW" => Outcome::Tie,
            _ => Outcome::Unknown(raw.to_string()),
        }
    }
}

/// Result of the unary `Register` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub match_id: String,
    pub status: MatchStatus,
    pub opponent_name: Option<String>,
}

/// Result of one unary `CheckRoundResult` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundCheck {
    pub status: MatchStatus,
    pub outcome: String,
}

impl RoundCheck {
    pub fn pending() -> Self {
        Self {
            status: MatchStatus::Pending,
            outcome: String::new(),
        }
    }

    pub fn resolved(outcome: impl Into<String>) -> Self {
        Self {
            status: MatchStatus::Complete,
            outcome: outcome.into(),
        }
    }
}

/// A round outcome pushed on the battle stream.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    /// `None` when the server sent no usable round number.
    pub round_id: Option<u32>,
    pub outcome: String,
}

/// Client to server messages on the battle stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// Sent once, first.
    Handshake(Identity),
    /// Sent only in answer to a trigger.
    Move(Move),
}

/// Server to client events on the battle stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Status(MatchStatus),
    /// The server wants the next move now.
    Trigger { round_id: Option<u32> },
    Result(RoundResult),
}
