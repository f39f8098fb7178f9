//! Shared plumbing for the `unary-client` and `streaming-client` binaries.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
