//! Raw feed rows to typed events.
//!
//! The feed encodes everything interesting about a play in a message type, a
//! subtype, and two free-text description columns (home and visitor). The
//! description is authoritative for a few things the numeric columns do not
//! carry: three-point attempts, missed free throws, and whether an offensive
//! charge counts as a team foul.

use super::event::{EventKind, PbpEvent};
use super::raw::{RawPlay, action_type, msg_type};
use crate::rules::LeagueRules;

/// Normalize one game's raw rows into the typed event stream.
///
/// Rows keep their feed order; clock readings that fail to parse inherit the
/// previous row's clock so no entry is dropped. Inheritance is scoped to the
/// period: before the first parseable reading of a period, the fallback is
/// the period's full length.
pub fn normalize_game(
    plays: &[RawPlay],
    home_id: i64,
    away_id: i64,
    rules: &LeagueRules,
) -> Vec<PbpEvent> {
    let mut events = Vec::with_capacity(plays.len());
    let mut last_clock: Option<u32> = None;
    let mut last_period = 0u8;

    for play in plays {
        if play.period != last_period {
            last_period = play.period;
            last_clock = None;
        }
        let clock_secs = match play.clock.as_deref().and_then(parse_clock) {
            Some(secs) => {
                last_clock = Some(secs);
                secs
            }
            None => last_clock.unwrap_or_else(|| rules.period_secs(play.period)),
        };

        events.push(PbpEvent {
            sequence: play.event_num,
            quarter: play.period,
            clock_secs,
            team_id: play.team_id,
            kind: classify(play, home_id, away_id),
            action_type: play.action_type,
        });
    }

    events
}

fn classify(play: &RawPlay, home_id: i64, _away_id: i64) -> EventKind {
    let desc = acting_description(play, home_id);
    match play.event_msg_type {
        msg_type::SHOT_MADE => EventKind::Shot {
            points: shot_points(desc),
            made: true,
        },
        msg_type::SHOT_MISSED => EventKind::Shot {
            points: shot_points(desc),
            made: false,
        },
        msg_type::FREE_THROW => EventKind::FreeThrow {
            made: !desc.contains("MISS "),
        },
        msg_type::REBOUND => EventKind::Rebound,
        msg_type::TURNOVER => EventKind::Turnover,
        msg_type::FOUL => EventKind::Foul {
            counts_toward_penalty: is_team_foul(play),
            non_shooting: action_type::NON_SHOOTING_FOULS.contains(&play.action_type),
        },
        msg_type::PERIOD_START => EventKind::PeriodStart,
        msg_type::PERIOD_END => EventKind::PeriodEnd,
        _ => EventKind::Other,
    }
}

/// Description column for the acting team (fouls and shots are described on
/// the side of the player charged/credited).
fn acting_description(play: &RawPlay, home_id: i64) -> &str {
    let (first, second) = if play.team_id == Some(home_id) {
        (&play.home_description, &play.visitor_description)
    } else {
        (&play.visitor_description, &play.home_description)
    };
    first
        .as_deref()
        .or(second.as_deref())
        .unwrap_or_default()
}

fn shot_points(desc: &str) -> u8 {
    if desc.contains(" 3PT ") { 3 } else { 2 }
}

fn is_team_foul(play: &RawPlay) -> bool {
    if !action_type::TEAM_FOULS.contains(&play.action_type) {
        return false;
    }
    // Offensive charges are team fouls only when a description column carries
    // a team-foul marker (".T<digit>") or a penalty marker (".PN").
    if play.action_type == action_type::CHARGE {
        return has_team_foul_marker(play.home_description.as_deref())
            || has_team_foul_marker(play.visitor_description.as_deref());
    }
    true
}

fn has_team_foul_marker(desc: Option<&str>) -> bool {
    let Some(desc) = desc else {
        return false;
    };
    if desc.contains(".PN") {
        return true;
    }
    desc.match_indices(".T")
        .any(|(idx, _)| desc[idx + 2..].bytes().next().is_some_and(|b| b.is_ascii_digit()))
}

/// Parse a "MM:SS" game clock into seconds remaining in the period.
fn parse_clock(clock: &str) -> Option<u32> {
    let (minutes, seconds) = clock.split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    Some(minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: i64 = 1610612744;
    const AWAY: i64 = 1610612747;

    fn play(msg: i64, action: i64, team: Option<i64>) -> RawPlay {
        RawPlay {
            event_num: 1,
            event_msg_type: msg,
            action_type: action,
            period: 1,
            clock: Some("10:30".to_string()),
            home_description: None,
            visitor_description: None,
            team_id: team,
        }
    }

    #[test]
    fn parses_clock_strings() {
        assert_eq!(parse_clock("12:00"), Some(720));
        assert_eq!(parse_clock("0:00"), Some(0));
        assert_eq!(parse_clock("6:07"), Some(367));
        assert_eq!(parse_clock("garbage"), None);
    }

    #[test]
    fn three_pointers_detected_from_description() {
        let mut p = play(msg_type::SHOT_MADE, 1, Some(HOME));
        p.home_description = Some("Curry 26' 3PT Jump Shot (12 PTS)".to_string());
        assert_eq!(
            classify(&p, HOME, AWAY),
            EventKind::Shot {
                points: 3,
                made: true
            }
        );

        p.home_description = Some("Curry Driving Layup (14 PTS)".to_string());
        assert_eq!(
            classify(&p, HOME, AWAY),
            EventKind::Shot {
                points: 2,
                made: true
            }
        );
    }

    #[test]
    fn missed_free_throws_detected() {
        let mut p = play(msg_type::FREE_THROW, 11, Some(AWAY));
        p.visitor_description = Some("MISS James Free Throw 1 of 2".to_string());
        assert_eq!(classify(&p, HOME, AWAY), EventKind::FreeThrow { made: false });

        p.visitor_description = Some("James Free Throw 2 of 2 (20 PTS)".to_string());
        assert_eq!(classify(&p, HOME, AWAY), EventKind::FreeThrow { made: true });
    }

    #[test]
    fn charge_counts_only_with_marker() {
        let mut p = play(msg_type::FOUL, action_type::CHARGE, Some(HOME));
        p.home_description = Some("Green Offensive Charge Foul (P2.T3)".to_string());
        assert_eq!(
            classify(&p, HOME, AWAY),
            EventKind::Foul {
                counts_toward_penalty: true,
                non_shooting: false
            }
        );

        p.home_description = Some("Green Offensive Charge Foul (P2)".to_string());
        assert_eq!(
            classify(&p, HOME, AWAY),
            EventKind::Foul {
                counts_toward_penalty: false,
                non_shooting: false
            }
        );
    }

    #[test]
    fn personal_fouls_are_team_fouls() {
        let p = play(msg_type::FOUL, 1, Some(AWAY));
        assert_eq!(
            classify(&p, HOME, AWAY),
            EventKind::Foul {
                counts_toward_penalty: true,
                non_shooting: true
            }
        );
    }

    #[test]
    fn technicals_do_not_count() {
        // Action type 11 (technical) is not on the team-foul list.
        let p = play(msg_type::FOUL, 11, Some(AWAY));
        assert_eq!(
            classify(&p, HOME, AWAY),
            EventKind::Foul {
                counts_toward_penalty: false,
                non_shooting: false
            }
        );
    }

    #[test]
    fn unparseable_clock_inherits_previous() {
        let rules = LeagueRules::for_league(crate::rules::League::Nba);
        let mut first = play(msg_type::SHOT_MADE, 1, Some(HOME));
        first.clock = Some("8:15".to_string());
        let mut second = play(msg_type::REBOUND, 0, Some(AWAY));
        second.clock = None;

        let events = normalize_game(&[first, second], HOME, AWAY, &rules);
        assert_eq!(events[0].clock_secs, 495);
        assert_eq!(events[1].clock_secs, 495);
    }

    #[test]
    fn unparseable_clock_before_any_reading_seeds_with_period_length() {
        let rules = LeagueRules::for_league(crate::rules::League::Nba);
        let mut first = play(msg_type::PERIOD_START, 0, None);
        first.clock = None;

        // Clock inheritance does not cross the period boundary either: the
        // overtime opener falls back to the overtime length, not Q4's clock.
        let mut q4 = play(msg_type::SHOT_MADE, 1, Some(HOME));
        q4.period = 4;
        q4.clock = Some("0:12".to_string());
        let mut ot_opener = play(msg_type::PERIOD_START, 0, None);
        ot_opener.period = 5;
        ot_opener.clock = None;

        let events = normalize_game(&[first, q4, ot_opener], HOME, AWAY, &rules);
        assert_eq!(events[0].clock_secs, 720);
        assert_eq!(events[1].clock_secs, 12);
        assert_eq!(events[2].clock_secs, 300);
    }
}
