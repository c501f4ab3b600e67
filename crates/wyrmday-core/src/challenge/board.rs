//! Persisted daily and weekly challenge slots.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::definition::{ChallengeDefinition, ChallengeInstance, ChallengeKind};
use super::tracker::{
    reset_if_new_period, update_progress, update_progress_exact, ChallengeSet, ProgressUpdate,
};
use crate::clock::{format_iso_date, parse_weekday, week_start_on_or_before};
use crate::error::ValidationError;

/// KV key under which the board is stored.
pub const CHALLENGE_STATE_KEY: &str = "challenge_state";

/// Challenge selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    #[serde(default = "default_daily_count")]
    pub daily_count: usize,
    #[serde(default = "default_weekly_count")]
    pub weekly_count: usize,
    /// Weekday on which weekly challenges reroll.
    #[serde(default = "default_week_start")]
    pub week_start: String,
    /// Fixed RNG seed; random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_daily_count() -> usize {
    3
}
fn default_weekly_count() -> usize {
    3
}
fn default_week_start() -> String {
    "monday".into()
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            daily_count: default_daily_count(),
            weekly_count: default_weekly_count(),
            week_start: default_week_start(),
            seed: None,
        }
    }
}

impl ChallengeConfig {
    pub fn week_start_day(&self) -> Result<Weekday, ValidationError> {
        parse_weekday(&self.week_start)
    }
}

pub fn daily_period_key(today: NaiveDate) -> String {
    format_iso_date(today)
}

pub fn weekly_period_key(today: NaiveDate, week_start: Weekday) -> String {
    format_iso_date(week_start_on_or_before(today, week_start))
}

/// Mix a configured seed with a period key so each period draws its own set.
pub fn period_seed(seed: u64, period_key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    period_key.hash(&mut hasher);
    seed ^ hasher.finish()
}

/// Template pools used for rerolls.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePools<'a> {
    pub daily: &'a [ChallengeDefinition],
    pub weekly: &'a [ChallengeDefinition],
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeBoard {
    #[serde(default)]
    pub daily: Vec<ChallengeInstance>,
    #[serde(default)]
    pub weekly: Vec<ChallengeInstance>,
    #[serde(default)]
    pub last_daily_key: Option<String>,
    #[serde(default)]
    pub last_weekly_key: Option<String>,
}

impl ChallengeBoard {
    /// Reroll whichever slots belong to an earlier period.
    ///
    /// `rng_for` is asked for a random source per slot, given that slot's
    /// period key.
    pub fn roll_over<R, F>(
        self,
        today: NaiveDate,
        pools: TemplatePools<'_>,
        config: &ChallengeConfig,
        week_start: Weekday,
        mut rng_for: F,
    ) -> ChallengeBoard
    where
        R: Rng,
        F: FnMut(&str) -> R,
    {
        let daily_key = daily_period_key(today);
        let daily = reset_if_new_period(
            ChallengeSet {
                instances: self.daily,
                last_period_key: self.last_daily_key,
            },
            &daily_key,
            pools.daily,
            config.daily_count,
            &mut rng_for(&daily_key),
        );
        let weekly_key = weekly_period_key(today, week_start);
        let weekly = reset_if_new_period(
            ChallengeSet {
                instances: self.weekly,
                last_period_key: self.last_weekly_key,
            },
            &weekly_key,
            pools.weekly,
            config.weekly_count,
            &mut rng_for(&weekly_key),
        );

        ChallengeBoard {
            daily: daily.instances,
            weekly: weekly.instances,
            last_daily_key: daily.last_period_key,
            last_weekly_key: weekly.last_period_key,
        }
    }

    /// Apply an event to both slots; returns the rewards earned.
    pub fn apply(&mut self, event: ChallengeKind, amount: u32) -> Vec<u32> {
        self.apply_with(|slot| update_progress(slot, event, amount))
    }

    /// Apply a host-derived event, skipping `any` challenges.
    pub fn apply_exact(&mut self, event: ChallengeKind, amount: u32) -> Vec<u32> {
        self.apply_with(|slot| update_progress_exact(slot, event, amount))
    }

    fn apply_with<F>(&mut self, update: F) -> Vec<u32>
    where
        F: Fn(Vec<ChallengeInstance>) -> ProgressUpdate,
    {
        let daily = update(std::mem::take(&mut self.daily));
        let weekly = update(std::mem::take(&mut self.weekly));
        self.daily = daily.updated;
        self.weekly = weekly.updated;

        let mut rewards = daily.rewards_granted;
        rewards.extend(weekly.rewards_granted);
        rewards
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChallengeInstance> {
        self.daily.iter().chain(self.weekly.iter())
    }
}
