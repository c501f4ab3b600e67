mod board;
mod definition;
mod templates;
mod tracker;

pub use board::{
    daily_period_key, period_seed, weekly_period_key, ChallengeBoard, ChallengeConfig, TemplatePools,
    CHALLENGE_STATE_KEY,
};
pub use definition::{ChallengeDefinition, ChallengeInstance, ChallengeKind};
pub use templates::{daily_templates, weekly_templates};
pub use tracker::{
    reset_if_new_period, update_progress, update_progress_exact, ChallengeSet, ProgressUpdate,
};
