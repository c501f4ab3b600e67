use clap::Subcommand;
use wyrmday_core::ChallengeKind;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// List today's and this week's challenges
    List,
    /// Report progress for an event kind
    Progress {
        /// Event kind (task_category, xp_gained, monster_defeated, streak_length, any)
        kind: String,
        /// Amount to add
        #[arg(default_value_t = 1)]
        amount: u32,
    },
}

pub fn run(action: ChallengeAction, date: Option<&str>) -> CmdResult {
    let mut tracker = open_tracker(date)?;
    match action {
        ChallengeAction::List => print_json(&tracker.challenges()?)?,
        ChallengeAction::Progress { kind, amount } => {
            let kind: ChallengeKind = kind.parse()?;
            let report = tracker.record_event(kind, amount)?;
            print_json(&report)?;
        }
    }
    Ok(())
}
