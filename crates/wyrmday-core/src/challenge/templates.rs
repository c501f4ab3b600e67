//! Built-in challenge pools.

use super::definition::{ChallengeDefinition, ChallengeKind};

pub fn daily_templates() -> Vec<ChallengeDefinition> {
    use ChallengeKind::*;
    vec![
        ChallengeDefinition::new("daily-tasks-3", "Complete 3 tasks", 3, 30, TaskCategory),
        ChallengeDefinition::new("daily-tasks-5", "Complete 5 tasks", 5, 50, TaskCategory),
        ChallengeDefinition::new("daily-xp-100", "Earn 100 XP", 100, 25, XpGained),
        ChallengeDefinition::new("daily-monster-1", "Defeat a monster", 1, 20, MonsterDefeated),
        ChallengeDefinition::new("daily-monster-3", "Defeat 3 monsters", 3, 45, MonsterDefeated),
        ChallengeDefinition::new("daily-any-4", "Log 4 activities of any kind", 4, 20, Any),
        ChallengeDefinition::new("daily-streak-1", "Extend your streak", 1, 15, StreakLength),
    ]
}

pub fn weekly_templates() -> Vec<ChallengeDefinition> {
    use ChallengeKind::*;
    vec![
        ChallengeDefinition::new("weekly-tasks-15", "Complete 15 tasks", 15, 150, TaskCategory),
        ChallengeDefinition::new("weekly-tasks-25", "Complete 25 tasks", 25, 250, TaskCategory),
        ChallengeDefinition::new("weekly-xp-500", "Earn 500 XP", 500, 120, XpGained),
        ChallengeDefinition::new("weekly-monster-10", "Defeat 10 monsters", 10, 200, MonsterDefeated),
        ChallengeDefinition::new("weekly-streak-5", "Grow your streak by 5 days", 5, 175, StreakLength),
        ChallengeDefinition::new("weekly-any-20", "Log 20 activities of any kind", 20, 100, Any),
    ]
}
