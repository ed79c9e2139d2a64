//! Folds foul ledgers and possession outcomes into per-team output rows.

use serde::Serialize;

use super::GameMeta;
use super::bonus::FoulLedger;
use super::possession::PossessionOutcome;
use crate::rules::LeagueRules;

/// One output row per team per game. Field order is the CSV column order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameTeamRecord {
    pub team_id: i64,
    /// Game length in seconds, overtime included.
    pub game_length: u32,
    pub fouls_committed: u32,
    pub fouls_3q_committed: u32,
    /// Seconds the opponent spent in the bonus (off this team's fouls).
    pub opp_tib: u32,
    pub opp_3q_tib: u32,
    /// Bonus free throws surrendered by this team's non-shooting fouls.
    pub ft_allowed: u32,
    pub ft_3q_allowed: u32,
    pub fouls_against: u32,
    pub fouls_3q_against: u32,
    /// Seconds this team spent in the bonus.
    pub own_tib: u32,
    pub own_3q_tib: u32,
    pub ft_gained: u32,
    pub ft_3q_gained: u32,
    pub win: u8,
    pub opp_percent_tib: f64,
    pub own_percent_tib: f64,
    pub opp_percent_3q_tib: f64,
    pub own_percent_3q_tib: f64,
    pub game_id: String,
    pub off_points_p: u32,
    pub off_poss_p: f64,
    pub off_tov_p: u32,
    pub def_points_p: u32,
    pub def_poss_p: f64,
    pub def_tov_p: u32,
    pub off_points_np: u32,
    pub off_poss_np: f64,
    pub off_tov_np: u32,
    pub def_points_np: u32,
    pub def_poss_np: f64,
    pub def_tov_np: u32,
}

/// Running totals for one (team, penalty-state) bucket of possessions.
#[derive(Debug, Clone, Copy, Default)]
struct BucketTotals {
    points: u32,
    possessions: f64,
    turnovers: u32,
}

impl BucketTotals {
    fn fold(&mut self, outcome: &PossessionOutcome) {
        self.points += outcome.points;
        // Estimated possessions per trip: fga - oreb + tov + 0.44 * fta.
        self.possessions += f64::from(outcome.field_goal_attempts + outcome.turnovers)
            - f64::from(outcome.offensive_rebounds)
            + 0.44 * f64::from(outcome.free_throw_attempts);
        self.turnovers += outcome.turnovers;
    }
}

fn bucket_totals(outcomes: &[PossessionOutcome], team_id: i64) -> (BucketTotals, BucketTotals) {
    let mut penalty = BucketTotals::default();
    let mut non_penalty = BucketTotals::default();
    for outcome in outcomes.iter().filter(|o| o.offense_team_id == team_id) {
        if outcome.defender_in_penalty {
            penalty.fold(outcome);
        } else {
            non_penalty.fold(outcome);
        }
    }
    (penalty, non_penalty)
}

/// Build both teams' rows from a finished scan.
pub fn build_records(
    meta: &GameMeta,
    rules: &LeagueRules,
    last_quarter: u8,
    ledgers: &[(i64, FoulLedger); 2],
    outcomes: &[PossessionOutcome],
) -> Vec<GameTeamRecord> {
    let game_length = rules.game_length_secs(last_quarter);
    let three_q = rules.three_quarter_secs();
    let pct = |secs: u32, denom: u32| f64::from(secs) / f64::from(denom);

    (0..2usize)
        .map(|i| {
            let (team_id, own) = &ledgers[i];
            let (opp_id, opp) = &ledgers[1 - i];

            let opp_tib = own.time_in_bonus(None);
            let opp_3q_tib = own.time_in_bonus(Some(3));
            let own_tib = opp.time_in_bonus(None);
            let own_3q_tib = opp.time_in_bonus(Some(3));

            let (off_p, off_np) = bucket_totals(outcomes, *team_id);
            let (def_p, def_np) = bucket_totals(outcomes, *opp_id);

            GameTeamRecord {
                team_id: *team_id,
                game_length,
                fouls_committed: own.fouls(None),
                fouls_3q_committed: own.fouls(Some(3)),
                opp_tib,
                opp_3q_tib,
                ft_allowed: own.free_throws(None),
                ft_3q_allowed: own.free_throws(Some(3)),
                fouls_against: opp.fouls(None),
                fouls_3q_against: opp.fouls(Some(3)),
                own_tib,
                own_3q_tib,
                ft_gained: opp.free_throws(None),
                ft_3q_gained: opp.free_throws(Some(3)),
                win: u8::from(meta.winner_team_id == Some(*team_id)),
                opp_percent_tib: pct(opp_tib, game_length),
                own_percent_tib: pct(own_tib, game_length),
                opp_percent_3q_tib: pct(opp_3q_tib, three_q),
                own_percent_3q_tib: pct(own_3q_tib, three_q),
                game_id: meta.game_id.clone(),
                off_points_p: off_p.points,
                off_poss_p: off_p.possessions,
                off_tov_p: off_p.turnovers,
                def_points_p: def_p.points,
                def_poss_p: def_p.possessions,
                def_tov_p: def_p.turnovers,
                off_points_np: off_np.points,
                off_poss_np: off_np.possessions,
                off_tov_np: off_np.turnovers,
                def_points_np: def_np.points,
                def_poss_np: def_np.possessions,
                def_tov_np: def_np.turnovers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::bonus::BonusInterval;
    use super::*;
    use crate::rules::League;
    use hashbrown::HashMap;

    const HOME: i64 = 100;
    const AWAY: i64 = 200;

    fn meta() -> GameMeta {
        GameMeta {
            game_id: "0022300001".into(),
            home_team_id: HOME,
            away_team_id: AWAY,
            winner_team_id: Some(HOME),
        }
    }

    fn ledger(fouls: &[(u8, u32)], fts: &[(u8, u32)], intervals: &[BonusInterval]) -> FoulLedger {
        FoulLedger {
            fouls_by_quarter: fouls.iter().copied().collect::<HashMap<_, _>>(),
            penalty_free_throws: fts.iter().copied().collect::<HashMap<_, _>>(),
            intervals: intervals.to_vec(),
        }
    }

    fn outcome(
        team: i64,
        in_penalty: bool,
        points: u32,
        fga: u32,
        fta: u32,
        oreb: u32,
        tov: u32,
    ) -> PossessionOutcome {
        PossessionOutcome {
            offense_team_id: team,
            quarter: 1,
            defender_in_penalty: in_penalty,
            points,
            field_goal_attempts: fga,
            free_throw_attempts: fta,
            offensive_rebounds: oreb,
            turnovers: tov,
        }
    }

    #[test]
    fn symmetric_columns_mirror_the_opponent() {
        let rules = LeagueRules::for_league(League::Nba);
        let home = ledger(
            &[(1, 5), (2, 3), (3, 2), (4, 4)],
            &[(1, 4)],
            &[BonusInterval {
                quarter: 1,
                start_secs: 300,
                end_secs: 0,
            }],
        );
        let away = ledger(&[(1, 2), (2, 2), (3, 2), (4, 6)], &[(4, 2)], &[]);
        let ledgers = [(HOME, home), (AWAY, away)];
        let records = build_records(&meta(), &rules, 4, &ledgers, &[]);

        let (h, a) = (&records[0], &records[1]);
        assert_eq!(h.fouls_committed, 14);
        assert_eq!(h.fouls_3q_committed, 10);
        assert_eq!(h.fouls_against, a.fouls_committed);
        assert_eq!(h.opp_tib, a.own_tib);
        assert_eq!(a.own_tib, 300);
        assert_eq!(h.ft_allowed, 4);
        assert_eq!(a.ft_gained, 4);
        assert_eq!(a.ft_3q_gained, 4);
        assert_eq!(h.ft_gained, 2);
        assert_eq!(h.ft_3q_gained, 0);
        assert_eq!(h.win, 1);
        assert_eq!(a.win, 0);
    }

    #[test]
    fn percentages_use_game_and_three_quarter_lengths() {
        let rules = LeagueRules::for_league(League::Nba);
        let home = ledger(
            &[],
            &[],
            &[BonusInterval {
                quarter: 2,
                start_secs: 360,
                end_secs: 0,
            }],
        );
        let away = ledger(&[], &[], &[]);
        let ledgers = [(HOME, home), (AWAY, away)];
        let records = build_records(&meta(), &rules, 4, &ledgers, &[]);

        assert_eq!(records[0].game_length, 2880);
        assert!((records[0].opp_percent_tib - 360.0 / 2880.0).abs() < 1e-9);
        assert!((records[0].opp_percent_3q_tib - 360.0 / 2160.0).abs() < 1e-9);
        assert!((records[1].own_percent_tib - 360.0 / 2880.0).abs() < 1e-9);
    }

    #[test]
    fn overtime_extends_game_length() {
        let rules = LeagueRules::for_league(League::Nba);
        let ledgers = [
            (HOME, FoulLedger::default()),
            (AWAY, FoulLedger::default()),
        ];
        let records = build_records(&meta(), &rules, 6, &ledgers, &[]);
        assert_eq!(records[0].game_length, 2880 + 2 * 300);
    }

    #[test]
    fn possession_buckets_split_by_penalty_state() {
        let rules = LeagueRules::for_league(League::Nba);
        let ledgers = [
            (HOME, FoulLedger::default()),
            (AWAY, FoulLedger::default()),
        ];
        let outcomes = vec![
            outcome(HOME, true, 2, 1, 0, 0, 0),
            outcome(HOME, true, 3, 2, 2, 1, 0),
            outcome(HOME, false, 0, 0, 0, 0, 1),
            outcome(AWAY, false, 2, 1, 1, 0, 0),
        ];
        let records = build_records(&meta(), &rules, 4, &ledgers, &outcomes);

        let h = &records[0];
        assert_eq!(h.off_points_p, 5);
        assert!((h.off_poss_p - (1.0 + (2.0 - 1.0 + 0.44 * 2.0))).abs() < 1e-9);
        assert_eq!(h.off_tov_p, 0);
        assert_eq!(h.off_points_np, 0);
        assert_eq!(h.off_tov_np, 1);
        assert_eq!(h.def_points_np, 2);
        assert!((h.def_poss_np - (1.0 + 0.44)).abs() < 1e-9);

        // Defensive buckets are the opponent's offensive buckets.
        let a = &records[1];
        assert_eq!(a.def_points_p, h.off_points_p);
        assert_eq!(a.def_tov_np, h.off_tov_np);
    }
}
