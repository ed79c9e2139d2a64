use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::scan::GameTeamRecord;

/// CSV name for a date range, e.g. `team_fouls_2024-01-01_to_2024-01-31.csv`.
pub fn output_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("team_fouls_{start}_to_{end}.csv")
}

/// Write all accumulated rows to one CSV, header included.
pub fn write_records(path: &Path, records: &[GameTeamRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_embeds_the_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            output_filename(start, end),
            "team_fouls_2024-01-01_to_2024-01-31.csv"
        );
    }

    #[test]
    fn header_row_matches_the_column_order() {
        let record = GameTeamRecord {
            team_id: 1610612744,
            game_length: 2880,
            fouls_committed: 18,
            fouls_3q_committed: 12,
            opp_tib: 400,
            opp_3q_tib: 200,
            ft_allowed: 6,
            ft_3q_allowed: 2,
            fouls_against: 20,
            fouls_3q_against: 14,
            own_tib: 500,
            own_3q_tib: 250,
            ft_gained: 8,
            ft_3q_gained: 4,
            win: 1,
            opp_percent_tib: 400.0 / 2880.0,
            own_percent_tib: 500.0 / 2880.0,
            opp_percent_3q_tib: 200.0 / 2160.0,
            own_percent_3q_tib: 250.0 / 2160.0,
            game_id: "0022300001".into(),
            off_points_p: 20,
            off_poss_p: 15.4,
            off_tov_p: 2,
            def_points_p: 18,
            def_poss_p: 14.8,
            def_tov_p: 3,
            off_points_np: 80,
            off_poss_np: 70.2,
            off_tov_np: 10,
            def_points_np: 78,
            def_poss_np: 69.9,
            def_tov_np: 9,
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("team_id,game_length,fouls_committed"));
        assert!(header.ends_with("def_points_np,def_poss_np,def_tov_np"));
        assert_eq!(header.split(',').count(), 32);
    }
}
