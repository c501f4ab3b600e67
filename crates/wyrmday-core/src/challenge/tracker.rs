//! Challenge progress and period rerolls.
//!
//! Both operations are pure: they take the current instances by value and
//! hand back new ones. Persisting the result is the caller's job.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::definition::{ChallengeDefinition, ChallengeInstance, ChallengeKind};

/// Outcome of [`update_progress`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub updated: Vec<ChallengeInstance>,
    /// One entry per challenge that completed during this update.
    pub rewards_granted: Vec<u32>,
}

impl ProgressUpdate {
    pub fn total_reward(&self) -> u32 {
        self.rewards_granted
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(*r))
    }
}

/// Apply `amount` units of `event` to every matching, unfinished challenge.
///
/// Completed challenges never change. A challenge that reaches its target
/// is clamped to the target and pays its reward once.
pub fn update_progress(
    instances: Vec<ChallengeInstance>,
    event: ChallengeKind,
    amount: u32,
) -> ProgressUpdate {
    update_progress_where(instances, amount, |inst| inst.kind().accepts(event))
}

/// [`update_progress`] restricted to challenges of exactly `event`'s kind.
///
/// Used for events the host derives itself (streak growth, banked XP), which
/// are not user activity and so do not count towards `any` challenges.
pub fn update_progress_exact(
    instances: Vec<ChallengeInstance>,
    event: ChallengeKind,
    amount: u32,
) -> ProgressUpdate {
    update_progress_where(instances, amount, |inst| inst.kind() == event)
}

fn update_progress_where<P>(
    instances: Vec<ChallengeInstance>,
    amount: u32,
    matches: P,
) -> ProgressUpdate
where
    P: Fn(&ChallengeInstance) -> bool,
{
    let mut rewards_granted = Vec::new();

    let updated = instances
        .into_iter()
        .map(|mut inst| {
            if inst.completed || !matches(&inst) {
                return inst;
            }

            let next = inst.current.saturating_add(amount);
            if next >= inst.target() {
                inst.current = inst.target();
                inst.completed = true;
                rewards_granted.push(inst.reward());
                info!(
                    challenge = %inst.definition.id,
                    reward = inst.reward(),
                    "challenge completed"
                );
            } else {
                inst.current = next;
            }
            inst
        })
        .collect();

    ProgressUpdate {
        updated,
        rewards_granted,
    }
}

/// Instances for one reset cycle plus the key of that cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSet {
    pub instances: Vec<ChallengeInstance>,
    pub last_period_key: Option<String>,
}

/// Reroll `state` when `current_period_key` differs from the stored key.
///
/// Draws up to `sample_size` templates without replacement. Calling again
/// within the same period returns the state untouched.
pub fn reset_if_new_period<R: Rng + ?Sized>(
    state: ChallengeSet,
    current_period_key: &str,
    templates: &[ChallengeDefinition],
    sample_size: usize,
    rng: &mut R,
) -> ChallengeSet {
    if state.last_period_key.as_deref() == Some(current_period_key) {
        return state;
    }

    let instances: Vec<ChallengeInstance> = templates
        .choose_multiple(rng, sample_size)
        .map(ChallengeDefinition::instantiate)
        .collect();

    debug!(
        period = current_period_key,
        previous = ?state.last_period_key,
        drawn = instances.len(),
        "challenges rerolled"
    );

    ChallengeSet {
        instances,
        last_period_key: Some(current_period_key.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn challenge(id: &str, kind: ChallengeKind, target: u32, reward: u32) -> ChallengeInstance {
        ChallengeDefinition::new(id, id, target, reward, kind).instantiate()
    }

    fn pool(n: usize) -> Vec<ChallengeDefinition> {
        (0..n)
            .map(|i| ChallengeDefinition::new(format!("t{i}"), "x", 3, 10, ChallengeKind::Any))
            .collect()
    }

    #[test]
    fn completion_fires_once() {
        let instances = vec![challenge("c", ChallengeKind::MonsterDefeated, 3, 50)];

        let first = update_progress(instances, ChallengeKind::MonsterDefeated, 2);
        assert_eq!(first.updated[0].current, 2);
        assert!(!first.updated[0].completed);
        assert!(first.rewards_granted.is_empty());

        let second = update_progress(first.updated, ChallengeKind::MonsterDefeated, 2);
        assert_eq!(second.updated[0].current, 3);
        assert!(second.updated[0].completed);
        assert_eq!(second.rewards_granted, vec![50]);

        let third = update_progress(second.updated.clone(), ChallengeKind::MonsterDefeated, 2);
        assert_eq!(third.updated, second.updated);
        assert!(third.rewards_granted.is_empty());
    }

    #[test]
    fn non_matching_kinds_pass_through() {
        let instances = vec![
            challenge("xp", ChallengeKind::XpGained, 100, 10),
            challenge("any", ChallengeKind::Any, 5, 20),
        ];
        let result = update_progress(instances, ChallengeKind::TaskCategory, 1);
        assert_eq!(result.updated[0].current, 0);
        assert_eq!(result.updated[1].current, 1);
    }

    #[test]
    fn exact_update_skips_any_challenges() {
        let instances = vec![
            challenge("grow", ChallengeKind::StreakLength, 1, 15),
            challenge("any", ChallengeKind::Any, 1, 20),
        ];
        let result = update_progress_exact(instances, ChallengeKind::StreakLength, 1);
        assert!(result.updated[0].completed);
        assert_eq!(result.updated[1].current, 0);
        assert_eq!(result.rewards_granted, vec![15]);
    }

    #[test]
    fn several_completions_collect_all_rewards() {
        let instances = vec![
            challenge("a", ChallengeKind::TaskCategory, 1, 15),
            challenge("b", ChallengeKind::Any, 1, 25),
        ];
        let result = update_progress(instances, ChallengeKind::TaskCategory, 1);
        assert_eq!(result.rewards_granted, vec![15, 25]);
        assert_eq!(result.total_reward(), 40);
    }

    #[test]
    fn zero_amount_changes_nothing_below_target() {
        let instances = vec![challenge("a", ChallengeKind::Any, 2, 15)];
        let result = update_progress(instances.clone(), ChallengeKind::Any, 0);
        assert_eq!(result.updated, instances);
    }

    #[test]
    fn reset_draws_without_replacement() {
        let mut rng = Pcg64::seed_from_u64(7);
        let set = reset_if_new_period(ChallengeSet::default(), "2024-06-15", &pool(6), 3, &mut rng);
        assert_eq!(set.instances.len(), 3);
        assert_eq!(set.last_period_key.as_deref(), Some("2024-06-15"));

        let mut ids: Vec<_> = set.instances.iter().map(|i| i.definition.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(set.instances.iter().all(|i| i.current == 0 && !i.completed));
    }

    #[test]
    fn reset_is_idempotent_within_period() {
        let mut rng = Pcg64::seed_from_u64(1);
        let first = reset_if_new_period(ChallengeSet::default(), "k", &pool(10), 3, &mut rng);
        let second = reset_if_new_period(first.clone(), "k", &pool(10), 3, &mut rng);
        assert_eq!(first, second);
    }

    #[test]
    fn reset_keeps_progress_within_period() {
        let mut rng = Pcg64::seed_from_u64(1);
        let mut set = reset_if_new_period(ChallengeSet::default(), "k", &pool(4), 2, &mut rng);
        set.instances = update_progress(set.instances, ChallengeKind::Any, 1).updated;
        let again = reset_if_new_period(set.clone(), "k", &pool(4), 2, &mut rng);
        assert!(again.instances.iter().all(|i| i.current == 1));
    }

    #[test]
    fn small_or_empty_pools() {
        let mut rng = Pcg64::seed_from_u64(3);
        let set = reset_if_new_period(ChallengeSet::default(), "a", &pool(2), 5, &mut rng);
        assert_eq!(set.instances.len(), 2);

        let empty = reset_if_new_period(set, "b", &[], 3, &mut rng);
        assert!(empty.instances.is_empty());
        assert_eq!(empty.last_period_key.as_deref(), Some("b"));
    }

    #[test]
    fn same_seed_same_draw() {
        let a = reset_if_new_period(
            ChallengeSet::default(),
            "k",
            &pool(10),
            3,
            &mut Pcg64::seed_from_u64(99),
        );
        let b = reset_if_new_period(
            ChallengeSet::default(),
            "k",
            &pool(10),
            3,
            &mut Pcg64::seed_from_u64(99),
        );
        assert_eq!(a, b);
    }
}
