use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use team_fouls::config::AppConfig;
use team_fouls::driver::{SeasonDriver, output_filename, write_records};
use team_fouls::rules::League;

/// Pull play-by-play for a date range and write per-team foul, bonus, and
/// penalty-state splits to CSV.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// First date of games to pull (YYYY-MM-DD)
    #[arg(long)]
    start_date: NaiveDate,

    /// Last date of games to pull (YYYY-MM-DD)
    #[arg(long)]
    end_date: NaiveDate,

    /// League to pull: nba, wnba, or g-league
    #[arg(long)]
    league: Option<League>,

    /// Directory for the output CSV (defaults to the configured one)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(
        cli.start_date <= cli.end_date,
        "start date {} is after end date {}",
        cli.start_date,
        cli.end_date
    );

    let mut config = AppConfig::load();
    if config.apply_overrides(cli.league, cli.output) {
        config.save().context("saving configuration")?;
    }
    let league = config.league;
    let output_dir = config.output_dir.clone();
    let delay = Duration::from_secs(config.request_delay_secs);

    let driver = SeasonDriver::new(league, delay).context("building stats client")?;
    let records = driver.run(cli.start_date, cli.end_date).await?;

    let path = output_dir.join(output_filename(cli.start_date, cli.end_date));
    write_records(&path, &records)?;
    info!(rows = records.len(), path = %path.display(), "done");
    Ok(())
}
