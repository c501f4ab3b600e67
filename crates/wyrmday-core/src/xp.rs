//! XP ledger, levels and dragon stages.

use serde::{Deserialize, Serialize};

/// KV key under which the ledger is stored.
pub const XP_LEDGER_KEY: &str = "xp_ledger";

pub const XP_PER_LEVEL: u64 = 500;

/// Growth stage of the user's dragon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragonStage {
    Egg,
    Hatchling,
    Wyrmling,
    Drake,
    Elder,
}

impl DragonStage {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=1 => DragonStage::Egg,
            2..=3 => DragonStage::Hatchling,
            4..=6 => DragonStage::Wyrmling,
            7..=9 => DragonStage::Drake,
            _ => DragonStage::Elder,
        }
    }
}

pub fn level_for(total_xp: u64) -> u32 {
    u32::try_from(total_xp / XP_PER_LEVEL)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpLedger {
    pub total_xp: u64,
}

impl XpLedger {
    pub fn credit(&mut self, amount: u32) {
        self.total_xp = self.total_xp.saturating_add(u64::from(amount));
    }

    pub fn summary(&self) -> XpSummary {
        let level = level_for(self.total_xp);
        XpSummary {
            total_xp: self.total_xp,
            level,
            xp_into_level: self.total_xp % XP_PER_LEVEL,
            xp_per_level: XP_PER_LEVEL,
            stage: DragonStage::for_level(level),
        }
    }
}

/// Display-ready view of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpSummary {
    pub total_xp: u64,
    pub level: u32,
    pub xp_into_level: u64,
    pub xp_per_level: u64,
    pub stage: DragonStage,
}
