//! Request/response arena client: register, then submit and poll each round.

use std::process::ExitCode;

use anyhow::Context;
use arena_cli::cli::UnaryArgs;
use arena_cli::{logging, report};
use arena_client::UnaryMatchClient;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = UnaryArgs::parse();

    let _guard = match logging::init(args.arena.log_dir.as_deref(), "unary-client") {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: UnaryArgs) -> anyhow::Result<()> {
    let endpoint = args.arena.endpoint();
    tracing::info!(%endpoint, "Connecting to unary arena");

    let mut client = UnaryMatchClient::connect(&endpoint, args.arena.identity())
        .await
        .with_context(|| format!("failed to connect to {endpoint}"))?
        .with_moves(args.arena.move_source())
        .with_config(args.match_config());

    let summary = client.play_match().await.context("match aborted")?;
    report::write_summary(&mut std::io::stdout().lock(), &summary, args.arena.json)
}
