mod engine;
mod record;

pub use engine::{
    default_milestones, recompute, Milestone, StreakConfig, StreakEngine, StreakState,
    DEFAULT_LOOKBACK_DAYS,
};
pub use record::{StreakRecord, STREAK_STATE_KEY};
