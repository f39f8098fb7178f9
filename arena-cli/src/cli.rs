//! Command-line arguments shared by the two arena clients.
//!
//! Connection and identity flags are optional; anything left unset falls back
//! to the `ARENA_*` environment variables and then to the defaults in
//! [`crate::config`].

use std::path::PathBuf;
use std::time::Duration;

use arena_client::{
    Identity, PollPolicy, RandomMoveSource, UnaryConfig, DEFAULT_MAX_ROUNDS,
    DEFAULT_OPPONENT_GRACE, DEFAULT_POLL_INTERVAL,
};
use clap::{Args, Parser};

use crate::config;

/// Flags common to both clients.
#[derive(Debug, Args)]
pub struct ArenaArgs {
    /// Arena host [env: ARENA_HOST] [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Arena port [env: ARENA_PORT] [default: 9000]
    #[arg(long)]
    pub port: Option<u16>,

    /// Implementation label announced to the arena [env: ARENA_LANGUAGE]
    #[arg(long)]
    pub language: Option<String>,

    /// Move-generation label announced to the arena [env: ARENA_PRNG]
    #[arg(long)]
    pub prng: Option<String>,

    /// Seed the move generator for a reproducible move sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the match summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl ArenaArgs {
    pub fn endpoint(&self) -> String {
        let host = self.host.clone().unwrap_or_else(config::get_host);
        let port = self.port.unwrap_or_else(config::get_port);
        format!("http://{}:{}", host, port)
    }

    pub fn identity(&self) -> Identity {
        Identity::new(
            self.language.clone().unwrap_or_else(config::get_language),
            self.prng.clone().unwrap_or_else(config::get_prng),
        )
    }

    pub fn move_source(&self) -> RandomMoveSource {
        match self.seed {
            Some(seed) => RandomMoveSource::seeded(seed),
            None => RandomMoveSource::from_entropy(),
        }
    }
}

/// Plays one match against the request/response arena.
#[derive(Debug, Parser)]
#[command(name = "unary-client", version)]
pub struct UnaryArgs {
    #[command(flatten)]
    pub arena: ArenaArgs,

    /// Number of rounds to play
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    pub rounds: u32,

    /// Delay between result polls, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    pub poll_interval_ms: u64,

    /// Give up on a round after this many result polls (unbounded if unset)
    #[arg(long)]
    pub max_poll_attempts: Option<u32>,

    /// Wait after registering while the arena looks for an opponent, in milliseconds
    #[arg(long, default_value_t = DEFAULT_OPPONENT_GRACE.as_millis() as u64)]
    pub opponent_grace_ms: u64,
}

impl UnaryArgs {
    pub fn match_config(&self) -> UnaryConfig {
        UnaryConfig {
            max_rounds: self.rounds,
            opponent_grace: Duration::from_millis(self.opponent_grace_ms),
            poll: PollPolicy {
                interval: Duration::from_millis(self.poll_interval_ms),
                max_attempts: self.max_poll_attempts,
            },
        }
    }
}

/// Plays one match against the streaming arena.
#[derive(Debug, Parser)]
#[command(name = "streaming-client", version)]
pub struct StreamingArgs {
    #[command(flatten)]
    pub arena: ArenaArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_client::MoveSource;

    #[test]
    fn test_unary_defaults_match_library_defaults() {
        let args = UnaryArgs::try_parse_from(["unary-client"]).unwrap();
        assert_eq!(args.match_config(), UnaryConfig::default());
        assert!(!args.arena.json);
        assert_eq!(args.arena.seed, None);
    }

    #[test]
    fn test_unary_tuning_flags() {
        let args = UnaryArgs::try_parse_from([
            "unary-client",
            "--rounds",
            "25",
            "--poll-interval-ms",
            "50",
            "--max-poll-attempts",
            "300",
            "--opponent-grace-ms",
            "0",
        ])
        .unwrap();

        let config = args.match_config();
        assert_eq!(config.max_rounds, 25);
        assert_eq!(config.poll.interval, Duration::from_millis(50));
        assert_eq!(config.poll.max_attempts, Some(300));
        assert_eq!(config.opponent_grace, Duration::ZERO);
    }

    #[test]
    fn test_flags_override_environment() {
        let args = StreamingArgs::try_parse_from([
            "streaming-client",
            "--host",
            "arena.internal",
            "--port",
            "9443",
            "--language",
            "Rust",
            "--prng",
            "Xoshiro",
        ])
        .unwrap();

        assert_eq!(args.arena.endpoint(), "http://arena.internal:9443");
        assert_eq!(args.arena.identity(), Identity::new("Rust", "Xoshiro"));
    }

    #[test]
    fn test_seed_gives_reproducible_moves() {
        let args =
            StreamingArgs::try_parse_from(["streaming-client", "--seed", "7"]).unwrap();

        let mut a = args.arena.move_source();
        let mut b = args.arena.move_source();
        for _ in 0..32 {
            assert_eq!(a.next_move(), b.next_move());
        }
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(StreamingArgs::try_parse_from(["streaming-client", "--port", "70000"]).is_err());
    }
}
