//! Day-streak computation with freeze tokens.
//!
//! The streak counts consecutive active days ending today (or yesterday,
//! when today has no activity yet). A freeze token bridges exactly one
//! missed day, provided the day before the gap was active. Tokens are
//! granted at streak milestones.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of days the walk may look back from today.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 60;

/// Result of a streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub streak: u32,
    pub freezes_available: u32,
    pub freezes_used_today: u32,
}

/// Streak length at which a freeze balance is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub min_streak: u32,
    pub freezes: u32,
}

/// Streak engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_milestones")]
    pub milestones: Vec<Milestone>,
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

pub fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone { min_streak: 30, freezes: 3 },
        Milestone { min_streak: 14, freezes: 2 },
        Milestone { min_streak: 7, freezes: 1 },
    ]
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            milestones: default_milestones(),
        }
    }
}

/// Streak calculator bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct StreakEngine {
    config: StreakConfig,
}

impl StreakEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StreakConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreakConfig {
        &self.config
    }

    /// First day the walk is allowed to inspect.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(i64::from(self.config.lookback_days))
    }

    /// Freeze balance granted for a streak length (highest matching milestone).
    pub fn milestone_grant(&self, streak: u32) -> u32 {
        self.config
            .milestones
            .iter()
            .filter(|m| streak >= m.min_streak)
            .map(|m| m.freezes)
            .max()
            .unwrap_or(0)
    }

    /// Compute the streak as of `today`.
    ///
    /// Pure: the same inputs always produce the same state. Days outside the
    /// lookback window are ignored.
    pub fn recompute(
        &self,
        today: NaiveDate,
        activity: &BTreeSet<NaiveDate>,
        prior_freeze_balance: u32,
    ) -> StreakState {
        let floor = self.window_start(today);
        let is_active = |day: NaiveDate| day >= floor && activity.contains(&day);

        let mut streak = u32::from(activity.contains(&today));
        let mut freezes_used = 0u32;
        let mut cursor = today - Duration::days(1);

        while cursor >= floor {
            if is_active(cursor) {
                streak += 1;
                cursor -= Duration::days(1);
                continue;
            }

            let before_gap = cursor - Duration::days(1);
            if is_active(before_gap) && freezes_used < prior_freeze_balance {
                freezes_used += 1;
                streak += 1;
                debug!(bridged = %cursor, "freeze token bridges missed day");
                cursor -= Duration::days(2);
            } else {
                break;
            }
        }

        let grant = self.milestone_grant(streak);
        let freezes_available = prior_freeze_balance
            .max(grant)
            .saturating_sub(freezes_used);

        debug!(
            %today,
            streak,
            freezes_used,
            grant,
            freezes_available,
            "streak recomputed"
        );

        StreakState {
            streak,
            freezes_available,
            freezes_used_today: freezes_used,
        }
    }
}

/// [`StreakEngine::recompute`] with the default configuration.
pub fn recompute(
    today: NaiveDate,
    activity: &BTreeSet<NaiveDate>,
    prior_freeze_balance: u32,
) -> StreakState {
    StreakEngine::new().recompute(today, activity, prior_freeze_balance)
}
