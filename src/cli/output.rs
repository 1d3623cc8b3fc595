//! Output formatting utilities for CLI.

// Throughput and win rates are intentional float conversions
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use std::fmt::Write;
use tigerzone::game::catalog::{CatalogEntry, START_TILE};
use tigerzone::simulate::{BatchStats, GameResult};

/// JSON-serializable catalogue entry.
#[derive(Debug, Serialize)]
pub(super) struct JsonCatalogEntry {
    /// Shape name.
    pub(super) name: &'static str,
    /// Copies in a standard deck.
    pub(super) count: u8,
    /// Edge codes plus centre marker.
    pub(super) code: String,
}

impl JsonCatalogEntry {
    /// Create from a catalogue entry.
    pub(super) fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name,
            count: entry.count,
            code: entry.tile.code(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_game_text(result: &GameResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    if let Some(winner) = result.winner {
        let _ = writeln!(output, "  Winner: Player {winner}");
    } else {
        let _ = writeln!(output, "  Winner: Draw");
    }
    let _ = writeln!(
        output,
        "  Turns: {} ({} tiles discarded)",
        result.turns_played, result.discarded
    );
    let _ = writeln!(
        output,
        "  Tokens: {} tigers, {} crocodiles",
        result.tigers_placed, result.crocodiles_placed
    );
    let _ = writeln!(
        output,
        "  Regions completed in play: {}\n",
        result.regions_completed
    );

    for player in &result.final_scores.players {
        let _ = writeln!(output, "  Player {}: {} points", player.id, player.score);
    }
    output
}

/// Format aggregate statistics as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, base_seed: u64) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Batch Results ({} games, seeds from {base_seed})",
        stats.games_played
    );
    if stats.failures > 0 {
        let _ = writeln!(output, "  Failed games: {}", stats.failures);
    }
    for (i, wins) in stats.wins.iter().enumerate() {
        let rate = if stats.games_played > 0 {
            100.0 * *wins as f64 / stats.games_played as f64
        } else {
            0.0
        };
        let _ = writeln!(
            output,
            "  Player {}: {wins} wins ({rate:.1}%), mean score {:.1}",
            i + 1,
            stats.mean_score(i)
        );
    }
    let _ = writeln!(output, "  Draws: {}", stats.draws);
    if stats.games_played > 0 {
        let games = stats.games_played as f64;
        let _ = writeln!(
            output,
            "  Mean turns: {:.1}, mean discards: {:.2}, mean completions: {:.1}",
            stats.total_turns as f64 / games,
            stats.total_discarded as f64 / games,
            stats.total_completed as f64 / games
        );
    }
    output
}

/// Format the tile catalogue as a table.
pub(super) fn format_catalog_text(entries: &[CatalogEntry]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{:<16} {:>5}  code", "name", "count");
    for entry in entries {
        let marker = if entry.name == START_TILE { " (start)" } else { "" };
        let _ = writeln!(
            output,
            "{:<16} {:>5}  {}{marker}",
            entry.name,
            entry.count,
            entry.tile.code()
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tigerzone::game::catalog;
    use tigerzone::simulate::{SimulationConfig, run_game};

    #[test]
    fn test_game_text_mentions_both_players() {
        let result = run_game(5, &SimulationConfig::default()).unwrap();
        let text = format_game_text(&result);
        assert!(text.contains("seed: 5"));
        assert!(text.contains("Player 1:"));
        assert!(text.contains("Player 2:"));
    }

    #[test]
    fn test_catalog_text_marks_start() {
        let text = format_catalog_text(catalog::catalog());
        assert!(text.contains("lake-trail"));
        assert!(text.contains("(start)"));
    }

    #[test]
    fn test_batch_text_empty() {
        let text = format_batch_text(&BatchStats::default(), 1);
        assert!(text.contains("0 games"));
        assert!(text.contains("Draws: 0"));
    }
}
