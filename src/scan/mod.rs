//! Single-pass scan of one game's normalized events.

mod bonus;
mod error;
mod possession;
mod record;


pub use bonus::{BonusInterval, BonusTracker, FoulLedger, TeamFoulState};
pub use error::ScanError;
pub use possession::{PossessionAttributor, PossessionOutcome};
pub use record::GameTeamRecord;

use crate::pbp::PbpEvent;
use crate::rules::LeagueRules;

/// Game identity and outcome, supplied by the driver.
#[derive(Debug, Clone)]
pub struct GameMeta {
    pub game_id: String,
    pub home_team_id: i64,
    pub away_team_id: i64,
    /// `None` when the feed carries no decided winner.
    pub winner_team_id: Option<i64>,
}

/// Scan a game's events in order, producing one record per team.
///
/// Events must be sorted by (quarter, descending clock); a violation or an
/// event crediting an unknown team fails the whole game.
pub fn scan_game(
    meta: &GameMeta,
    events: &[PbpEvent],
    rules: &LeagueRules,
) -> Result<Vec<GameTeamRecord>, ScanError> {
    if events.is_empty() {
        return Err(ScanError::EmptyGame {
            game_id: meta.game_id.clone(),
        });
    }

    let mut tracker = BonusTracker::new(*rules, meta.home_team_id, meta.away_team_id);
    let mut attributor = PossessionAttributor::new();
    let mut prev: Option<(u8, u32)> = None;

    for event in events {
        if let Some(team_id) = event.team_id
            && team_id != meta.home_team_id
            && team_id != meta.away_team_id
        {
            return Err(ScanError::UnknownTeam {
                game_id: meta.game_id.clone(),
                sequence: event.sequence,
                team_id,
            });
        }

        if let Some((prev_quarter, prev_clock_secs)) = prev
            && (event.quarter < prev_quarter
                || (event.quarter == prev_quarter && event.clock_secs > prev_clock_secs))
        {
            return Err(ScanError::OutOfOrder {
                game_id: meta.game_id.clone(),
                sequence: event.sequence,
                quarter: event.quarter,
                clock_secs: event.clock_secs,
                prev_quarter,
                prev_clock_secs,
            });
        }
        prev = Some((event.quarter, event.clock_secs));

        while event.quarter > tracker.quarter() {
            attributor.flush();
            tracker.end_quarter();
            tracker.set_quarter(tracker.quarter() + 1);
        }

        tracker.advance(event);

        if let Some(team_id) = event.team_id {
            let defender = if team_id == meta.home_team_id {
                meta.away_team_id
            } else {
                meta.home_team_id
            };
            attributor.consume(event, tracker.in_penalty(defender));
        }
    }

    let last_quarter = tracker.quarter();
    tracker.end_quarter();
    let ledgers = tracker.into_ledgers();
    let outcomes = attributor.into_outcomes();

    Ok(record::build_records(
        meta,
        rules,
        last_quarter,
        &ledgers,
        &outcomes,
    ))
}
