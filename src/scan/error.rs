//! Error types for the game scan

use thiserror::Error;

/// Malformed event streams. Fatal for the game being scanned, never for the
/// run: the season driver reports and skips the offending game.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("game {game_id}: empty event stream")]
    EmptyGame { game_id: String },

    #[error(
        "game {game_id}: event {sequence} out of order \
         (quarter {quarter} at {clock_secs}s follows quarter {prev_quarter} at {prev_clock_secs}s)"
    )]
    OutOfOrder {
        game_id: String,
        sequence: u32,
        quarter: u8,
        clock_secs: u32,
        prev_quarter: u8,
        prev_clock_secs: u32,
    },

    #[error("game {game_id}: event {sequence} references unknown team {team_id}")]
    UnknownTeam {
        game_id: String,
        sequence: u32,
        team_id: i64,
    },
}
