//! Possession attribution over the normalized event stream.
//!
//! A possession opens on a team's first offensive act and closes on a
//! defensive rebound, a turnover, a made basket not followed by the same
//! team's offensive rebound, or the period boundary. Each closed possession
//! is tagged with whether the *defending* team was in the penalty when it
//! opened, so totals can be split by penalty state downstream.

use crate::pbp::{EventKind, PbpEvent};

/// One closed possession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossessionOutcome {
    pub offense_team_id: i64,
    pub quarter: u8,
    /// Whether the defense was in the penalty when the possession opened.
    pub defender_in_penalty: bool,
    pub points: u32,
    pub field_goal_attempts: u32,
    pub free_throw_attempts: u32,
    pub offensive_rebounds: u32,
    pub turnovers: u32,
}

impl PossessionOutcome {
    fn open(offense_team_id: i64, quarter: u8, defender_in_penalty: bool) -> Self {
        Self {
            offense_team_id,
            quarter,
            defender_in_penalty,
            points: 0,
            field_goal_attempts: 0,
            free_throw_attempts: 0,
            offensive_rebounds: 0,
            turnovers: 0,
        }
    }
}

struct OpenPossession {
    outcome: PossessionOutcome,
    /// Set after a made basket: the possession is over unless the same team
    /// pulls down an offensive rebound first (e.g. off a missed and-one).
    pending_close: bool,
}

/// Folds offensive acts into [`PossessionOutcome`]s.
#[derive(Default)]
pub struct PossessionAttributor {
    current: Option<OpenPossession>,
    outcomes: Vec<PossessionOutcome>,
}

impl PossessionAttributor {
    pub fn new() -> Self {
        Self {
            current: None,
            outcomes: Vec::new(),
        }
    }

    /// Feed one event. `defender_in_penalty` is the penalty status of the
    /// acting team's opponent at this instant; it is only consulted when the
    /// event opens a new possession.
    pub fn consume(&mut self, event: &PbpEvent, defender_in_penalty: bool) {
        let Some(team_id) = event.team_id else {
            return;
        };
        match event.kind {
            EventKind::Shot { points, made } => {
                let open = self.possession_for(team_id, event.quarter, defender_in_penalty, true);
                open.outcome.field_goal_attempts += 1;
                if made {
                    open.outcome.points += u32::from(points);
                    open.pending_close = true;
                }
            }
            EventKind::FreeThrow { made } => {
                // A pending close never applies to same-team free throws:
                // and-one attempts belong to the possession of the basket.
                let open = self.possession_for(team_id, event.quarter, defender_in_penalty, false);
                open.outcome.free_throw_attempts += 1;
                if made {
                    open.outcome.points += 1;
                }
            }
            EventKind::Rebound => match &mut self.current {
                Some(open) if open.outcome.offense_team_id == team_id => {
                    open.outcome.offensive_rebounds += 1;
                    open.pending_close = false;
                }
                Some(_) => self.flush(),
                None => {}
            },
            EventKind::Turnover => {
                let open = self.possession_for(team_id, event.quarter, defender_in_penalty, true);
                open.outcome.turnovers += 1;
                self.flush();
            }
            _ => {}
        }
    }

    /// Close any open possession, at a period boundary or end of feed.
    pub fn flush(&mut self) {
        if let Some(open) = self.current.take() {
            self.outcomes.push(open.outcome);
        }
    }

    pub fn into_outcomes(mut self) -> Vec<PossessionOutcome> {
        self.flush();
        self.outcomes
    }

    /// An open possession for `team_id`, flushing whatever stood in its way:
    /// the opponent's possession, or (when `respect_pending_close` is set)
    /// the team's own completed one.
    fn possession_for(
        &mut self,
        team_id: i64,
        quarter: u8,
        defender_in_penalty: bool,
        respect_pending_close: bool,
    ) -> &mut OpenPossession {
        let stale = match &self.current {
            Some(open) => {
                open.outcome.offense_team_id != team_id
                    || (respect_pending_close && open.pending_close)
            }
            None => true,
        };
        if stale {
            self.flush();
        }
        self.current.get_or_insert_with(|| OpenPossession {
            outcome: PossessionOutcome::open(team_id, quarter, defender_in_penalty),
            pending_close: false,
        })
    }
}
