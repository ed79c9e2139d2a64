//! Per-team foul counters and the penalty-state machine.
//!
//! The tracker replays qualifying team fouls in game order. Crossing the
//! league threshold (or the closing-window rule) puts the fouling team "in
//! the penalty" for the rest of the period; the span of clock from that foul
//! to the period boundary is the opponent's time in the bonus.

use hashbrown::HashMap;

use crate::pbp::{EventKind, PbpEvent};
use crate::rules::LeagueRules;

/// Quarter-scoped foul state for one team.
#[derive(Debug, Clone, Default)]
pub struct TeamFoulState {
    pub fouls_this_quarter: u32,
    /// Team fouls inside the closing window of the period.
    pub fouls_last_two: u32,
    /// Game-level counter, never reset.
    pub fouls_total: u32,
    pub in_penalty: bool,
    /// Clock at which the team entered the penalty this quarter.
    penalty_entry_clock: Option<u32>,
}

/// Closed span of game clock during which a team sat in the penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusInterval {
    pub quarter: u8,
    /// Seconds remaining when the interval opened.
    pub start_secs: u32,
    /// Seconds remaining when it closed (0 unless the feed ends early).
    pub end_secs: u32,
}

impl BonusInterval {
    pub fn duration_secs(&self) -> u32 {
        self.start_secs - self.end_secs
    }
}

/// Per-quarter ledger accumulated for one team over a full game.
///
/// Everything here is indexed by the *fouling* team: `penalty_free_throws`
/// are the free throws this team surrendered, and `intervals` are the spans
/// its opponent spent in the bonus.
#[derive(Debug, Clone, Default)]
pub struct FoulLedger {
    pub fouls_by_quarter: HashMap<u8, u32>,
    pub penalty_free_throws: HashMap<u8, u32>,
    pub intervals: Vec<BonusInterval>,
}

impl FoulLedger {
    pub fn fouls(&self, through_quarter: Option<u8>) -> u32 {
        sum_through(&self.fouls_by_quarter, through_quarter)
    }

    pub fn free_throws(&self, through_quarter: Option<u8>) -> u32 {
        sum_through(&self.penalty_free_throws, through_quarter)
    }

    pub fn time_in_bonus(&self, through_quarter: Option<u8>) -> u32 {
        self.intervals
            .iter()
            .filter(|iv| through_quarter.is_none_or(|q| iv.quarter <= q))
            .map(BonusInterval::duration_secs)
            .sum()
    }
}

fn sum_through(map: &HashMap<u8, u32>, through_quarter: Option<u8>) -> u32 {
    map.iter()
        .filter(|(q, _)| through_quarter.is_none_or(|limit| **q <= limit))
        .map(|(_, n)| n)
        .sum()
}

#[derive(Debug)]
struct TrackerSide {
    team_id: i64,
    state: TeamFoulState,
    ledger: FoulLedger,
}

/// Replays team fouls for both sides of one game.
#[derive(Debug)]
pub struct BonusTracker {
    rules: LeagueRules,
    quarter: u8,
    sides: [TrackerSide; 2],
}

impl BonusTracker {
    pub fn new(rules: LeagueRules, home_id: i64, away_id: i64) -> Self {
        let side = |team_id| TrackerSide {
            team_id,
            state: TeamFoulState::default(),
            ledger: FoulLedger::default(),
        };
        Self {
            rules,
            quarter: 1,
            sides: [side(home_id), side(away_id)],
        }
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    pub fn in_penalty(&self, team_id: i64) -> bool {
        self.side(team_id).is_some_and(|s| s.state.in_penalty)
    }

    /// Advance the state machine by one event. Only qualifying team fouls
    /// change state; everything else is a no-op here.
    pub fn advance(&mut self, event: &PbpEvent) {
        let EventKind::Foul {
            counts_toward_penalty: true,
            non_shooting,
        } = event.kind
        else {
            return;
        };
        let Some(team_id) = event.team_id else {
            return;
        };

        let quarter = self.quarter;
        let rules = self.rules;
        let Some(side) = self.side_mut(team_id) else {
            return;
        };

        // Penalty status *before* this foul decides the free throws: the
        // foul that crosses the threshold is the one the next foul shoots
        // on, not itself.
        let was_in_penalty = side.state.in_penalty;

        side.state.fouls_this_quarter += 1;
        side.state.fouls_total += 1;
        if event.clock_secs <= rules.closing_window_secs {
            side.state.fouls_last_two += 1;
        }

        if was_in_penalty && non_shooting {
            *side
                .ledger
                .penalty_free_throws
                .entry(quarter)
                .or_insert(0) += 2;
        }

        let qualifies = side.state.fouls_this_quarter >= rules.penalty_fouls(quarter)
            || side.state.fouls_last_two >= rules.closing_window_fouls;
        if qualifies && !was_in_penalty {
            side.state.in_penalty = true;
            side.state.penalty_entry_clock = Some(event.clock_secs);
        }
    }

    /// Close out the current quarter: seal any open bonus interval at 0:00,
    /// snapshot the foul count, and reset quarter-scoped state.
    pub fn end_quarter(&mut self) {
        let quarter = self.quarter;
        for side in &mut self.sides {
            if let Some(start_secs) = side.state.penalty_entry_clock.take() {
                side.ledger.intervals.push(BonusInterval {
                    quarter,
                    start_secs,
                    end_secs: 0,
                });
            }
            side.ledger
                .fouls_by_quarter
                .insert(quarter, side.state.fouls_this_quarter);
            side.state.fouls_this_quarter = 0;
            side.state.fouls_last_two = 0;
            side.state.in_penalty = false;
        }
    }

    pub fn set_quarter(&mut self, quarter: u8) {
        self.quarter = quarter;
    }

    /// Consume the tracker, yielding each side's ledger in construction
    /// order (home first).
    pub fn into_ledgers(self) -> [(i64, FoulLedger); 2] {
        self.sides.map(|side| (side.team_id, side.ledger))
    }

    fn side(&self, team_id: i64) -> Option<&TrackerSide> {
        self.sides.iter().find(|s| s.team_id == team_id)
    }

    fn side_mut(&mut self, team_id: i64) -> Option<&mut TrackerSide> {
        self.sides.iter_mut().find(|s| s.team_id == team_id)
    }
}
