//! Persisted streak record and same-day idempotent refresh.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::engine::{StreakEngine, StreakState};

/// KV key under which the record is stored.
pub const STREAK_STATE_KEY: &str = "streak_state";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub streak: u32,
    pub freezes_available: u32,
    pub freezes_used_today: u32,
    /// Day of the last computation; `None` before the first one.
    #[serde(default)]
    pub last_computed_date: Option<NaiveDate>,
    /// Freeze balance going into the first computation of
    /// `last_computed_date`.
    #[serde(default)]
    pub opening_balance: Option<u32>,
}

impl StreakRecord {
    pub fn state(&self) -> StreakState {
        StreakState {
            streak: self.streak,
            freezes_available: self.freezes_available,
            freezes_used_today: self.freezes_used_today,
        }
    }

    /// Freeze balance to feed into a computation for `today`.
    ///
    /// On the day already computed this is the balance that day started
    /// with, so neither spent tokens nor that day's milestone grant count
    /// twice.
    pub fn balance_for(&self, today: NaiveDate) -> u32 {
        if self.last_computed_date != Some(today) {
            return self.freezes_available;
        }
        // Records written before the opening balance was stored.
        self.opening_balance.unwrap_or_else(|| {
            self.freezes_available
                .saturating_add(self.freezes_used_today)
        })
    }

    /// Recompute for `today` and return the updated record.
    pub fn refresh(
        &self,
        today: NaiveDate,
        activity: &BTreeSet<NaiveDate>,
        engine: &StreakEngine,
    ) -> StreakRecord {
        let prior = self.balance_for(today);
        let state = engine.recompute(today, activity, prior);

        let already_logged = self.last_computed_date == Some(today)
            && self.freezes_used_today == state.freezes_used_today;
        if state.freezes_used_today > 0 && !already_logged {
            info!(
                %today,
                used = state.freezes_used_today,
                remaining = state.freezes_available,
                "freeze tokens consumed"
            );
        }

        StreakRecord {
            streak: state.streak,
            freezes_available: state.freezes_available,
            freezes_used_today: state.freezes_used_today,
            last_computed_date: Some(today),
            opening_balance: Some(prior),
        }
    }
}
