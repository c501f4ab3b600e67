use clap::Subcommand;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum DayAction {
    /// Mark today as active and update the streak
    End,
}

pub fn run(action: DayAction, date: Option<&str>) -> CmdResult {
    let mut tracker = open_tracker(date)?;
    match action {
        DayAction::End => {
            let state = tracker.end_day()?;
            print_json(&state)?;
        }
    }
    Ok(())
}
