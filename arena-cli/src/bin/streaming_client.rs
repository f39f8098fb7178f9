//! Bidirectional streaming arena client: one stream, moves on demand.

use std::process::ExitCode;

use anyhow::Context;
use arena_cli::cli::StreamingArgs;
use arena_cli::{logging, report};
use arena_client::StreamingMatchClient;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = StreamingArgs::parse();

    let _guard = match logging::init(args.arena.log_dir.as_deref(), "streaming-client") {
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

async fn run(args: StreamingArgs) -> anyhow::Result<()> {
    let endpoint = args.arena.endpoint();
    tracing::info!(%endpoint, "Connecting to streaming arena");

    let mut client = StreamingMatchClient::connect(&endpoint, args.arena.identity())
        .await
        .with_context(|| format!("failed to connect to {endpoint}"))?
        .with_moves(args.arena.move_source());

    let summary = client.play_match().await.context("match aborted")?;
    report::write_summary(&mut std::io::stdout().lock(), &summary, args.arena.json)
}
