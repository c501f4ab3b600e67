//! # wyrmday Core Library
//!
//! Core logic for wyrmday, a day-streak and quest tracker with a dragon that
//! grows as XP is earned. The CLI binary is a thin host over this crate.
//!
//! ## Architecture
//!
//! - **Streak**: pure day-streak computation with freeze tokens bridging
//!   single missed days, plus the persisted record that keeps same-day
//!   recomputation idempotent
//! - **Challenges**: daily/weekly counter goals with one-time rewards and
//!   period rerolls from template pools
//! - **Storage**: SQLite key-value and activity-day storage, TOML config
//! - **Service**: read-compute-write cycles driving the engines
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: streak and freeze calculator
//! - [`update_progress`] / [`reset_if_new_period`]: challenge state machine
//! - [`Tracker`]: host service over a [`KvStore`] + [`ActivityLog`]
//! - [`Config`]: application configuration management

pub mod challenge;
pub mod clock;
pub mod error;
pub mod service;
pub mod storage;
pub mod streak;
pub mod xp;

pub use challenge::{
    reset_if_new_period, update_progress, ChallengeBoard, ChallengeDefinition, ChallengeInstance,
    ChallengeKind, ChallengeSet, ProgressUpdate,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use service::{ProgressReport, Snapshot, Tracker};
pub use storage::{ActivityLog, Config, Database, KvStore, MemoryStore};
pub use streak::{StreakConfig, StreakEngine, StreakRecord, StreakState};
pub use xp::{DragonStage, XpLedger, XpSummary};
