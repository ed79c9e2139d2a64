//! Client for the stats.nba.com result-set endpoints.
//!
//! Every endpoint returns the same envelope: a list of named result sets,
//! each a header row plus positional data rows. Rows are decoded by zipping
//! headers with values into an object and deserializing that.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::FetchError;
use crate::pbp::RawPlay;
use crate::rules::League;

const BASE_URL: &str = "https://stats.nba.com/stats";

/// Header set the stats API requires before it will answer.
fn stats_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));
    headers.insert("Host", HeaderValue::from_static("stats.nba.com"));
    headers.insert("Origin", HeaderValue::from_static("http://stats.nba.com"));
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers.insert("Referer", HeaderValue::from_static("stats.nba.com"));
    headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
    headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
    headers.insert(
        "Accept-Language",
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        "X-NewRelic-ID",
        HeaderValue::from_static("VQECWF5UChAHUlNTBwgBVw=="),
    );
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_6) \
             AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/81.0.4044.129 Safari/537.36",
        ),
    );
    headers
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<serde_json::Value>>,
}

impl StatsResponse {
    fn rows_as<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        name: &'static str,
    ) -> Result<Vec<T>, FetchError> {
        let set = self
            .result_sets
            .iter()
            .find(|s| s.name == name)
            .ok_or(FetchError::MissingResultSet { endpoint, name })?;

        set.row_set
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = set
                    .headers
                    .iter()
                    .zip(row.iter())
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                serde_json::from_value(serde_json::Value::Object(object)).map_err(FetchError::from)
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GameHeaderRow {
    #[serde(rename = "GAME_ID")]
    game_id: String,
}

#[derive(Debug, Deserialize)]
struct GameSummaryRow {
    #[serde(rename = "HOME_TEAM_ID")]
    home_team_id: i64,
    #[serde(rename = "VISITOR_TEAM_ID")]
    visitor_team_id: i64,
}

#[derive(Debug, Deserialize)]
struct LineScoreRow {
    #[serde(rename = "TEAM_ID")]
    team_id: i64,
    #[serde(rename = "PTS")]
    pts: Option<i64>,
}

/// Team ids and outcome for one game.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub home_team_id: i64,
    pub away_team_id: i64,
    /// `None` until the game has a decided winner in the line score.
    pub winner_team_id: Option<i64>,
}

pub struct StatsClient {
    http: reqwest::Client,
    league: League,
}

impl StatsClient {
    pub fn new(league: League) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .default_headers(stats_headers())
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, league })
    }

    async fn fetch(
        &self,
        endpoint: &'static str,
        query: &[(&str, String)],
    ) -> Result<StatsResponse, FetchError> {
        let url = format!("{BASE_URL}/{endpoint}");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let parsed = response.json::<StatsResponse>().await?;
        debug!(endpoint, sets = parsed.result_sets.len(), "fetched");
        Ok(parsed)
    }

    /// Ids of all games played on `date`.
    pub async fn game_ids(&self, date: chrono::NaiveDate) -> Result<Vec<String>, FetchError> {
        let response = self
            .fetch(
                "scoreboardv2",
                &[
                    ("GameDate", date.format("%m/%d/%Y").to_string()),
                    ("LeagueID", self.league.stats_id().to_string()),
                    ("DayOffset", "0".to_string()),
                ],
            )
            .await?;
        let rows: Vec<GameHeaderRow> = response.rows_as("scoreboardv2", "GameHeader")?;
        Ok(rows.into_iter().map(|r| r.game_id).collect())
    }

    /// Team ids and winner for one game.
    pub async fn game_summary(&self, game_id: &str) -> Result<GameSummary, FetchError> {
        let endpoint = "boxscoresummaryv2";
        let response = self
            .fetch(endpoint, &[("GameID", game_id.to_string())])
            .await?;

        let summary: GameSummaryRow = response
            .rows_as::<GameSummaryRow>(endpoint, "GameSummary")?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MalformedResponse {
                endpoint,
                detail: format!("empty GameSummary for game {game_id}"),
            })?;

        let line_scores: Vec<LineScoreRow> = response.rows_as(endpoint, "LineScore")?;
        Ok(GameSummary {
            home_team_id: summary.home_team_id,
            away_team_id: summary.visitor_team_id,
            winner_team_id: decide_winner(&summary, &line_scores),
        })
    }

    /// Raw play-by-play rows for one game, in feed order.
    pub async fn play_by_play(&self, game_id: &str) -> Result<Vec<RawPlay>, FetchError> {
        let response = self
            .fetch(
                "playbyplayv2",
                &[
                    ("GameID", game_id.to_string()),
                    ("StartPeriod", "0".to_string()),
                    ("EndPeriod", "14".to_string()),
                ],
            )
            .await?;
        response.rows_as("playbyplayv2", "PlayByPlay")
    }
}

/// An unplayed game carries null line-score points; leaving the winner unset
/// lets the caller skip it.
fn decide_winner(summary: &GameSummaryRow, line_scores: &[LineScoreRow]) -> Option<i64> {
    let points_for = |team_id: i64| {
        line_scores
            .iter()
            .find(|r| r.team_id == team_id)
            .and_then(|r| r.pts)
    };
    let home = points_for(summary.home_team_id)?;
    let away = points_for(summary.visitor_team_id)?;
    if home > away {
        Some(summary.home_team_id)
    } else if away > home {
        Some(summary.visitor_team_id)
    } else {
        None
    }
}
