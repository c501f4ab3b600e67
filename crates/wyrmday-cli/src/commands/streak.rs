use clap::Subcommand;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the stored streak record
    Show,
    /// Recompute the streak for today
    Refresh,
}

pub fn run(action: StreakAction, date: Option<&str>) -> CmdResult {
    let mut tracker = open_tracker(date)?;
    match action {
        StreakAction::Show => print_json(&tracker.streak()?)?,
        StreakAction::Refresh => print_json(&tracker.refresh_streak()?)?,
    }
    Ok(())
}
