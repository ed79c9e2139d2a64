//! Persisted application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::rules::League;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory the output CSV is written to.
    pub output_dir: PathBuf,
    pub league: League,
    /// Pause between games, in seconds.
    pub request_delay_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            league: League::default(),
            request_delay_secs: 4,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("team-fouls", "config").unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store("team-fouls", "config", self)
    }

    /// Fold command-line overrides in. Returns whether anything changed,
    /// so the caller knows to persist the new defaults.
    pub fn apply_overrides(
        &mut self,
        league: Option<League>,
        output_dir: Option<PathBuf>,
    ) -> bool {
        let mut changed = false;
        if let Some(league) = league
            && league != self.league
        {
            self.league = league;
            changed = true;
        }
        if let Some(output_dir) = output_dir
            && output_dir != self.output_dir
        {
            self.output_dir = output_dir;
            changed = true;
        }
        changed
    }
}
