/// Classification of one play-by-play entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Shot {
        points: u8,
        made: bool,
    },
    FreeThrow {
        made: bool,
    },
    Rebound,
    Turnover,
    Foul {
        /// Counts toward the quarter team-foul total (offensive charges that
        /// are not marked as team fouls, technicals, etc. do not).
        counts_toward_penalty: bool,
        /// Would only produce free throws with the team in the penalty.
        non_shooting: bool,
    },
    PeriodStart,
    PeriodEnd,
    Other,
}

/// One normalized play-by-play event.
///
/// Events for a game are totally ordered by (quarter ascending, clock
/// descending), with `sequence` breaking ties between entries logged at the
/// same clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PbpEvent {
    pub sequence: u32,
    /// Period number: 1..=4 regulation, 5+ overtime.
    pub quarter: u8,
    /// Seconds remaining in the period.
    pub clock_secs: u32,
    /// Acting team, `None` for neutral entries (period markers, jump balls
    /// credited to no team, team rebounds without an id).
    pub team_id: Option<i64>,
    pub kind: EventKind,
    /// Raw feed subtype (shot/foul/turnover flavor), kept for exploration.
    pub action_type: i64,
}
