use super::{open_tracker, print_json, CmdResult};

pub fn run(date: Option<&str>) -> CmdResult {
    let mut tracker = open_tracker(date)?;
    print_json(&tracker.snapshot()?)
}
