//! Tunables for the unary match driver.

use std::time::Duration;

/// Default number of rounds in a unary match.
pub const DEFAULT_MAX_ROUNDS: u32 = 1000;

/// Default wait after registering into an empty match.
pub const DEFAULT_OPPONENT_GRACE: Duration = Duration::from_secs(2);

/// Default sleep between `CheckRoundResult` calls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How the unary driver polls for a round result.
///
/// The default polls forever at a fixed interval with no backoff. That is the
/// latency cost of the request/response integration; `max_attempts` turns an
/// endless wait into a `PollLimitExceeded` error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryConfig {
    pub max_rounds: u32,
    pub opponent_grace: Duration,
    pub poll: PollPolicy,
}

impl Default for UnaryConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            opponent_grace: DEFAULT_OPPONENT_GRACE,
            poll: PollPolicy::default(),
        }
    }
}
