pub mod config;
pub mod driver;
pub mod pbp;
pub mod rules;
pub mod scan;

// Re-exports for convenience
pub use pbp::{EventKind, PbpEvent, RawPlay, normalize_game};
pub use rules::{League, LeagueRules, RulesError};
pub use scan::{GameMeta, GameTeamRecord, PossessionOutcome, ScanError, scan_game};
