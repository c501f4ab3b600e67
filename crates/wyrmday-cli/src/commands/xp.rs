use clap::Subcommand;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum XpAction {
    /// Total XP, level and dragon stage
    Show,
}

pub fn run(action: XpAction, date: Option<&str>) -> CmdResult {
    let tracker = open_tracker(date)?;
    match action {
        XpAction::Show => print_json(&tracker.xp()?)?,
    }
    Ok(())
}
