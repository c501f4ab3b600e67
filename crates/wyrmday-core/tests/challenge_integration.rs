//! Integration tests for challenge progress and period rerolls.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use wyrmday_core::challenge::{daily_templates, weekly_period_key};
use wyrmday_core::{
    reset_if_new_period, update_progress, ChallengeDefinition, ChallengeKind, ChallengeSet,
};

fn monster_hunt() -> ChallengeDefinition {
    ChallengeDefinition::new("hunt", "Defeat 3 monsters", 3, 40, ChallengeKind::MonsterDefeated)
}

#[test]
fn test_completion_fires_exactly_once() {
    let instances = vec![monster_hunt().instantiate()];

    let r1 = update_progress(instances, ChallengeKind::MonsterDefeated, 2);
    assert_eq!((r1.updated[0].current, r1.updated[0].completed), (2, false));
    assert!(r1.rewards_granted.is_empty());

    let r2 = update_progress(r1.updated, ChallengeKind::MonsterDefeated, 2);
    assert_eq!((r2.updated[0].current, r2.updated[0].completed), (3, true));
    assert_eq!(r2.rewards_granted, vec![40]);

    let r3 = update_progress(r2.updated.clone(), ChallengeKind::MonsterDefeated, 2);
    assert_eq!(r3.updated, r2.updated);
    assert!(r3.rewards_granted.is_empty());
}

#[test]
fn test_reset_is_idempotent_within_period() {
    let templates = daily_templates();
    let mut rng = Pcg64::from_entropy();
    let first = reset_if_new_period(ChallengeSet::default(), "2025-01-20", &templates, 3, &mut rng);
    for _ in 0..10 {
        let again = reset_if_new_period(first.clone(), "2025-01-20", &templates, 3, &mut rng);
        assert_eq!(again, first);
    }
}

#[test]
fn test_new_period_replaces_completed_challenges() {
    let templates = vec![monster_hunt()];
    let mut rng = Pcg64::seed_from_u64(11);
    let mut set = reset_if_new_period(ChallengeSet::default(), "2025-01-20", &templates, 1, &mut rng);
    set.instances = update_progress(set.instances, ChallengeKind::MonsterDefeated, 5).updated;
    assert!(set.instances[0].completed);

    let next = reset_if_new_period(set, "2025-01-21", &templates, 1, &mut rng);
    assert!(!next.instances[0].completed);
    assert_eq!(next.instances[0].current, 0);
}

#[test]
fn test_weekly_key_with_sunday_start() {
    let wed = chrono::NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
    assert_eq!(weekly_period_key(wed, chrono::Weekday::Sun), "2025-01-19");
}

fn kind_strategy() -> impl Strategy<Value = ChallengeKind> {
    prop::sample::select(ChallengeKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_progress_never_overshoots(
        targets in proptest::collection::vec((1u32..20, kind_strategy()), 1..6),
        events in proptest::collection::vec((kind_strategy(), 0u32..10), 0..30),
    ) {
        let mut instances: Vec<_> = targets
            .iter()
            .enumerate()
            .map(|(i, (t, k))| ChallengeDefinition::new(format!("c{i}"), "x", *t, 10, *k).instantiate())
            .collect();
        let mut total_rewards = 0usize;

        for (kind, amount) in events {
            let result = update_progress(instances, kind, amount);
            total_rewards += result.rewards_granted.len();
            instances = result.updated;
            for inst in &instances {
                prop_assert!(inst.current <= inst.target());
                prop_assert_eq!(inst.completed, inst.current == inst.target());
            }
        }

        let completed = instances.iter().filter(|i| i.completed).count();
        prop_assert_eq!(total_rewards, completed);
    }
}
