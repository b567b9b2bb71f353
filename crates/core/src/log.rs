//! In-memory event log of a run, kept for debugging and tooling output.

use crate::difficulty::Difficulty;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunEvent {
    RunStarted { seed: u32, difficulty: Difficulty },
    MapGenerated { floor: u32, nodes: usize },
    HeroAdded { hero_id: String },
    HeroRemoved { hero_id: String },
    GoldChanged { delta: i64, total: u32 },
    BattleApplied { victory: bool, exp_earned: u32 },
    HeroLeveledUp { hero_id: String, level: u32 },
    ItemEquipped { hero_id: String, item_id: String },
    ItemUnequipped { hero_id: String, item_id: String },
    RelicAdded { relic_id: String },
    NodeEntered { index: usize },
    NodeCompleted { index: usize },
    Restored { seed: u32 },
}
