use serde::Deserialize;

/// Event message types used by the play-by-play feed.
pub mod msg_type {
    pub const SHOT_MADE: i64 = 1;
    pub const SHOT_MISSED: i64 = 2;
    pub const FREE_THROW: i64 = 3;
    pub const REBOUND: i64 = 4;
    pub const TURNOVER: i64 = 5;
    pub const FOUL: i64 = 6;
    pub const PERIOD_START: i64 = 12;
    pub const PERIOD_END: i64 = 13;
}

/// Foul action subtypes.
pub mod action_type {
    /// Subtypes that increment the team-foul count.
    pub const TEAM_FOULS: [i64; 12] = [1, 2, 3, 5, 6, 9, 14, 15, 26, 27, 28, 29];
    /// Subtypes that only produce free throws with the team in the penalty.
    pub const NON_SHOOTING_FOULS: [i64; 4] = [1, 3, 27, 28];
    /// Offensive charge: a team foul only when the description says so.
    pub const CHARGE: i64 = 26;
}

/// One row of a `playbyplayv2` result set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlay {
    #[serde(rename = "EVENTNUM")]
    pub event_num: u32,
    #[serde(rename = "EVENTMSGTYPE")]
    pub event_msg_type: i64,
    #[serde(rename = "EVENTMSGACTIONTYPE")]
    pub action_type: i64,
    #[serde(rename = "PERIOD")]
    pub period: u8,
    #[serde(rename = "PCTIMESTRING")]
    pub clock: Option<String>,
    #[serde(rename = "HOMEDESCRIPTION")]
    pub home_description: Option<String>,
    #[serde(rename = "VISITORDESCRIPTION")]
    pub visitor_description: Option<String>,
    #[serde(rename = "PLAYER1_TEAM_ID")]
    pub team_id: Option<i64>,
}
