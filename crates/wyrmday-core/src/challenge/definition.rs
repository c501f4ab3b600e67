use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Kind of event a challenge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// A task of a tracked category was completed
    TaskCategory,
    /// XP was earned
    XpGained,
    /// A monster was defeated
    MonsterDefeated,
    /// The day streak grew
    StreakLength,
    /// Counts every event
    Any,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 5] = [
        ChallengeKind::TaskCategory,
        ChallengeKind::XpGained,
        ChallengeKind::MonsterDefeated,
        ChallengeKind::StreakLength,
        ChallengeKind::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::TaskCategory => "task_category",
            ChallengeKind::XpGained => "xp_gained",
            ChallengeKind::MonsterDefeated => "monster_defeated",
            ChallengeKind::StreakLength => "streak_length",
            ChallengeKind::Any => "any",
        }
    }

    /// Whether a challenge of this kind counts an event of `event`.
    pub fn accepts(&self, event: ChallengeKind) -> bool {
        *self == ChallengeKind::Any || *self == event
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeKind {
    type Err = ValidationError;

    /// Accepts snake_case, kebab-case and camelCase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "taskcategory" | "task" => Ok(ChallengeKind::TaskCategory),
            "xpgained" | "xp" => Ok(ChallengeKind::XpGained),
            "monsterdefeated" | "monster" => Ok(ChallengeKind::MonsterDefeated),
            "streaklength" | "streak" => Ok(ChallengeKind::StreakLength),
            "any" => Ok(ChallengeKind::Any),
            _ => Err(ValidationError::UnknownChallengeKind(s.to_string())),
        }
    }
}

/// Static challenge template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDefinition {
    pub id: String,
    pub text: String,
    /// Always greater than zero.
    pub target: u32,
    /// XP paid out on completion.
    pub reward: u32,
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
}

impl ChallengeDefinition {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        target: u32,
        reward: u32,
        kind: ChallengeKind,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            target: target.max(1),
            reward,
            kind,
        }
    }

    pub fn instantiate(&self) -> ChallengeInstance {
        ChallengeInstance {
            definition: self.clone(),
            current: 0,
            completed: false,
        }
    }
}

/// A definition bound to the current period, with its progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInstance {
    #[serde(flatten)]
    pub definition: ChallengeDefinition,
    pub current: u32,
    pub completed: bool,
}

impl ChallengeInstance {
    pub fn kind(&self) -> ChallengeKind {
        self.definition.kind
    }

    pub fn target(&self) -> u32 {
        self.definition.target
    }

    pub fn reward(&self) -> u32 {
        self.definition.reward
    }
}
