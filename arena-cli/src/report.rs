//! End-of-match output on stdout.

use std::io::Write;

use arena_client::MatchSummary;

/// Write `summary` as pretty JSON or as a short human-readable block.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &MatchSummary,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "Match {} ended: {:?}",
        summary.match_id.as_deref().unwrap_or("-"),
        summary.ended_by
    )?;
    writeln!(out, "Rounds completed: {}", summary.rounds_completed)?;
    writeln!(
        out,
        "Wins: {}  Losses: {}  Ties: {}",
        summary.wins, summary.losses, summary.ties
    )?;
    if summary.unknown_outcomes > 0 {
        writeln!(out, "Outcomes without a side: {}", summary.unknown_outcomes)?;
        for (outcome, count) in &summary.outcomes {
            writeln!(out, "  {}: {}", outcome, count)?;
        }
    }
    if summary.rejected_moves > 0 {
        writeln!(out, "Rejected moves: {}", summary.rejected_moves)?;
    }
    if summary.poll_attempts > 0 {
        writeln!(out, "Result polls: {}", summary.poll_attempts)?;
    }
    Ok(())
}
