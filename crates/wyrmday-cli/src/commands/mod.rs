pub mod challenge;
pub mod config;
pub mod day;
pub mod status;
pub mod streak;
pub mod xp;

use serde::Serialize;
use wyrmday_core::clock::{parse_iso_date, Clock, FixedClock, SystemClock};
use wyrmday_core::{Config, Database, Tracker};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store with the configured tracker, pinned to `date`
/// (or the local calendar day).
pub fn open_tracker(
    date: Option<&str>,
) -> Result<Tracker<Database, FixedClock>, Box<dyn std::error::Error>> {
    let today = match date {
        Some(raw) => parse_iso_date(raw)?,
        None => SystemClock.today(),
    };
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(Tracker::new(db, FixedClock(today), config)?)
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
