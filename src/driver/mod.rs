//! Season-level orchestration: pull each date's games, scan them, and write
//! the accumulated rows to CSV.

mod error;
mod output;
mod stats_api;

pub use error::FetchError;
pub use output::{output_filename, write_records};
pub use stats_api::{GameSummary, StatsClient};

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::pbp::normalize_game;
use crate::rules::{League, LeagueRules};
use crate::scan::{GameMeta, GameTeamRecord, scan_game};

pub struct SeasonDriver {
    client: StatsClient,
    rules: LeagueRules,
    /// Pause between games, to go easy on the API.
    game_delay: Duration,
}

impl SeasonDriver {
    pub fn new(league: League, game_delay: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: StatsClient::new(league)?,
            rules: LeagueRules::for_league(league),
            game_delay,
        })
    }

    /// Scan every game played between `start` and `end` inclusive. A bad
    /// game or a bad date is logged and skipped; the run continues.
    pub async fn run(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<GameTeamRecord>> {
        let mut records = Vec::new();
        let mut date = start;
        while date <= end {
            info!(%date, "pulling games");
            match self.client.game_ids(date).await {
                Ok(game_ids) => {
                    for game_id in game_ids {
                        tokio::time::sleep(self.game_delay).await;
                        match self.process_game(&game_id).await {
                            Ok(Some(game_records)) => records.extend(game_records),
                            Ok(None) => info!(%game_id, "no decided winner yet, skipping"),
                            Err(error) => warn!(%game_id, %error, "skipping game"),
                        }
                    }
                }
                Err(error) => warn!(%date, %error, "skipping date"),
            }
            let Some(next) = date.succ_opt() else { break };
            date = next;
        }
        Ok(records)
    }

    async fn process_game(&self, game_id: &str) -> Result<Option<Vec<GameTeamRecord>>> {
        info!(game_id, "processing");
        let summary = self
            .client
            .game_summary(game_id)
            .await
            .with_context(|| format!("summary for game {game_id}"))?;
        let Some(winner_team_id) = summary.winner_team_id else {
            return Ok(None);
        };

        let plays = self
            .client
            .play_by_play(game_id)
            .await
            .with_context(|| format!("play-by-play for game {game_id}"))?;

        let meta = GameMeta {
            game_id: game_id.to_string(),
            home_team_id: summary.home_team_id,
            away_team_id: summary.away_team_id,
            winner_team_id: Some(winner_team_id),
        };
        let events = normalize_game(
            &plays,
            summary.home_team_id,
            summary.away_team_id,
            &self.rules,
        );
        let records = scan_game(&meta, &events, &self.rules)
            .with_context(|| format!("scanning game {game_id}"))?;
        Ok(Some(records))
    }
}
