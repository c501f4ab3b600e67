//! Read-compute-write cycles over the store.
//!
//! [`Tracker`] is the host side of the engines: it reads persisted state,
//! calls the pure streak and challenge functions, and writes the results
//! back, once per key per cycle. It is not meant to be shared between
//! threads; callers serialize access to one store.

use chrono::{NaiveDate, Weekday};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::challenge::{
    daily_templates, period_seed, weekly_templates, ChallengeBoard, ChallengeDefinition,
    ChallengeKind, TemplatePools, CHALLENGE_STATE_KEY,
};
use crate::clock::Clock;
use crate::error::Result;
use crate::storage::{load_json, save_json, ActivityLog, Config, KvStore};
use crate::streak::{StreakEngine, StreakRecord, StreakState, STREAK_STATE_KEY};
use crate::xp::{XpLedger, XpSummary, XP_LEDGER_KEY};

/// What a progress event changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub event: ChallengeKind,
    pub amount: u32,
    pub rewards_granted: Vec<u32>,
    pub xp: XpSummary,
    pub challenges: ChallengeBoard,
}

/// Everything the host displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub today: NaiveDate,
    pub streak: StreakRecord,
    pub challenges: ChallengeBoard,
    pub xp: XpSummary,
}

pub struct Tracker<S, C> {
    store: S,
    clock: C,
    engine: StreakEngine,
    config: Config,
    week_start: Weekday,
    daily_pool: Vec<ChallengeDefinition>,
    weekly_pool: Vec<ChallengeDefinition>,
    seed: Option<u64>,
}

impl<S, C> Tracker<S, C>
where
    S: KvStore + ActivityLog,
    C: Clock,
{
    /// Build a tracker with the built-in challenge pools.
    ///
    /// # Errors
    /// Returns an error if the configured week start is not a weekday name.
    pub fn new(store: S, clock: C, config: Config) -> Result<Self> {
        let week_start = config.challenges.week_start_day()?;
        Ok(Self {
            store,
            clock,
            engine: StreakEngine::with_config(config.streak.clone()),
            seed: config.challenges.seed,
            config,
            week_start,
            daily_pool: daily_templates(),
            weekly_pool: weekly_templates(),
        })
    }

    /// Replace the challenge pools.
    pub fn with_pools(
        mut self,
        daily: Vec<ChallengeDefinition>,
        weekly: Vec<ChallengeDefinition>,
    ) -> Self {
        self.daily_pool = daily;
        self.weekly_pool = weekly;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Mark today active and refresh the streak.
    pub fn end_day(&mut self) -> Result<StreakState> {
        let today = self.today();
        self.store.record_activity(today)?;
        info!(%today, "day marked active");
        self.refresh_streak()
    }

    /// Recompute the streak for today from the activity log.
    ///
    /// Any growth of the streak is fed to `streak_length` challenges only;
    /// `any` challenges count user events, not derived ones.
    pub fn refresh_streak(&mut self) -> Result<StreakState> {
        let today = self.today();
        let previous: StreakRecord = load_json(&self.store, STREAK_STATE_KEY)?;
        let activity = self
            .store
            .activity_since(self.engine.window_start(today))?;

        let record = previous.refresh(today, &activity, &self.engine);
        save_json(&self.store, STREAK_STATE_KEY, &record)?;

        let growth = record.streak.saturating_sub(previous.streak);
        if growth > 0 {
            self.apply_event(ChallengeKind::StreakLength, growth, true)?;
        }

        Ok(record.state())
    }

    /// Feed an event into today's challenges and bank any rewards.
    pub fn record_event(&mut self, event: ChallengeKind, amount: u32) -> Result<ProgressReport> {
        self.apply_event(event, amount, false)
    }

    /// Current challenges, rerolled if a new period started.
    pub fn challenges(&mut self) -> Result<ChallengeBoard> {
        let board = self.load_board()?;
        save_json(&self.store, CHALLENGE_STATE_KEY, &board)?;
        Ok(board)
    }

    pub fn xp(&self) -> Result<XpSummary> {
        let ledger: XpLedger = load_json(&self.store, XP_LEDGER_KEY)?;
        Ok(ledger.summary())
    }

    pub fn streak(&self) -> Result<StreakRecord> {
        load_json(&self.store, STREAK_STATE_KEY)
    }

    pub fn snapshot(&mut self) -> Result<Snapshot> {
        Ok(Snapshot {
            today: self.today(),
            streak: self.streak()?,
            challenges: self.challenges()?,
            xp: self.xp()?,
        })
    }

    fn load_board(&self) -> Result<ChallengeBoard> {
        let today = self.today();
        let board: ChallengeBoard = load_json(&self.store, CHALLENGE_STATE_KEY)?;
        let seed = self.seed;
        let pools = TemplatePools {
            daily: &self.daily_pool,
            weekly: &self.weekly_pool,
        };
        Ok(board.roll_over(
            today,
            pools,
            &self.config.challenges,
            self.week_start,
            move |key: &str| match seed {
                Some(seed) => Pcg64::seed_from_u64(period_seed(seed, key)),
                None => Pcg64::from_entropy(),
            },
        ))
    }

    /// `derived` events come from the tracker itself and skip `any` challenges.
    fn apply_event(
        &mut self,
        event: ChallengeKind,
        amount: u32,
        derived: bool,
    ) -> Result<ProgressReport> {
        let mut board = self.load_board()?;
        let mut rewards = if derived {
            board.apply_exact(event, amount)
        } else {
            board.apply(event, amount)
        };

        // Banked XP counts towards xp_gained challenges, once per batch.
        let earned: u32 = rewards.iter().fold(0u32, |acc, r| acc.saturating_add(*r));
        if earned > 0 && event != ChallengeKind::XpGained {
            rewards.extend(board.apply_exact(ChallengeKind::XpGained, earned));
        }

        let mut ledger: XpLedger = load_json(&self.store, XP_LEDGER_KEY)?;
        let banked: u32 = rewards.iter().fold(0u32, |acc, r| acc.saturating_add(*r));
        let reported = if event == ChallengeKind::XpGained { amount } else { 0 };
        if banked > 0 || reported > 0 {
            ledger.credit(banked.saturating_add(reported));
            save_json(&self.store, XP_LEDGER_KEY, &ledger)?;
            info!(banked, reported, total = ledger.total_xp, "xp credited");
        }
        save_json(&self.store, CHALLENGE_STATE_KEY, &board)?;

        debug!(%event, amount, rewards = rewards.len(), "progress applied");

        Ok(ProgressReport {
            event,
            amount,
            rewards_granted: rewards,
            xp: ledger.summary(),
            challenges: board,
        })
    }
}
