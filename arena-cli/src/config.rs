//! Configuration for the arena clients.
//!
//! Every connection and identity setting has a compile-time default that can
//! be overridden at runtime via a dedicated environment variable. A flag on
//! the command line wins over both.

/// Default arena host.
const DEFAULT_HOST: &str = "localhost";

/// Default arena port.
const DEFAULT_PORT: u16 = 9000;

/// Default implementation label sent in the handshake/registration.
const DEFAULT_LANGUAGE: &str = "Rust-tonic";

/// Default move-generation label. `rand`'s `StdRng` is ChaCha12.
const DEFAULT_PRNG: &str = "rand::StdRng (ChaCha12)";

/// Get the arena host.
///
/// Priority:
/// 1. `ARENA_HOST` env variable if set
/// 2. `localhost` as fallback
pub fn get_host() -> String {
    std::env::var("ARENA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

/// Get the arena port.
///
/// Priority:
/// 1. `ARENA_PORT` env variable if set (falls back to default if the value
///    cannot be parsed as a `u16`)
/// 2. `9000` as fallback
pub fn get_port() -> u16 {
    if let Ok(port) = std::env::var("ARENA_PORT") {
        return port.parse().unwrap_or(DEFAULT_PORT);
    }

    DEFAULT_PORT
}

/// Get the implementation label.
///
/// Priority:
/// 1. `ARENA_LANGUAGE` env variable if set
/// 2. `Rust-tonic` as fallback
pub fn get_language() -> String {
    std::env::var("ARENA_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string())
}

/// Get the move-generation label.
///
/// Priority:
/// 1. `ARENA_PRNG` env variable if set
/// 2. `rand::StdRng (ChaCha12)` as fallback
pub fn get_prng() -> String {
    std::env::var("ARENA_PRNG").unwrap_or_else(|_| DEFAULT_PRNG.to_string())
}
