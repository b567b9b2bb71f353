//! Per-hero mutable state and the stat math derived from it.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::content::ContentPack;
use crate::types::{EquipmentSlot, Stats};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub accessory: Option<String>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&str> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_deref(),
            EquipmentSlot::Armor => self.armor.as_deref(),
            EquipmentSlot::Accessory => self.accessory.as_deref(),
        }
    }

    /// Replaces the slot's contents, returning what was there.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<String>) -> Option<String> {
        let entry = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        };
        mem::replace(entry, item)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        [&self.weapon, &self.armor, &self.accessory].into_iter().filter_map(|item| item.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroState {
    pub id: String,
    pub level: u32,
    pub exp: u32,
    pub current_hp: i32,
    #[serde(default)]
    pub equipment: Equipment,
}

impl HeroState {
    /// A fresh level-1 hero at full health.
    pub fn recruit(id: &str, max_hp: i32) -> Self {
        Self {
            id: id.to_string(),
            level: 1,
            exp: 0,
            current_hp: max_hp,
            equipment: Equipment::default(),
        }
    }
}

/// Base stats plus per-level growth plus equipped item bonuses.
/// `None` when the hero id has no static data; unknown items add nothing.
pub fn hero_stats(content: &ContentPack, hero: &HeroState) -> Option<Stats> {
    let data = content.hero(&hero.id)?;
    let levels_gained = i32::try_from(hero.level.saturating_sub(1)).unwrap_or(i32::MAX);
    let mut stats = data.base_stats.plus(&data.growth.times(levels_gained));
    for item in hero.equipment.items().filter_map(|id| content.item(id)) {
        stats = stats.plus(&item.bonus);
    }
    Some(stats)
}

pub fn hero_max_hp(content: &ContentPack, hero: &HeroState) -> i32 {
    hero_stats(content, hero).map_or(1, |stats| stats.hp.max(1))
}

pub fn exp_to_next_level(level: u32, config: &RunConfig) -> u32 {
    level.saturating_mul(config.exp_per_level)
}

/// Adds exp and resolves level-ups. Every level gained fully heals; exp is
/// pinned to zero at the level cap. Returns each level reached.
pub(crate) fn grant_exp(
    content: &ContentPack,
    config: &RunConfig,
    hero: &mut HeroState,
    amount: u32,
) -> Vec<u32> {
    let mut reached = Vec::new();
    hero.exp = hero.exp.saturating_add(amount);
    while hero.level < config.max_level && hero.exp >= exp_to_next_level(hero.level, config) {
        hero.exp -= exp_to_next_level(hero.level, config);
        hero.level += 1;
        reached.push(hero.level);
    }
    if hero.level >= config.max_level {
        hero.exp = 0;
    }
    if !reached.is_empty() {
        hero.current_hp = hero_max_hp(content, hero);
    }
    reached
}

/// Applies `percent` of max HP as a heal (clamped to max) or as damage
/// (floored at 1).
pub(crate) fn adjust_hp_by_percent(
    content: &ContentPack,
    hero: &mut HeroState,
    percent: u32,
    heal: bool,
) {
    let max_hp = i64::from(hero_max_hp(content, hero));
    let amount = max_hp * i64::from(percent) / 100;
    let current = i64::from(hero.current_hp);
    let next = if heal { (current + amount).min(max_hp) } else { (current - amount).max(1) };
    hero.current_hp = clamp_hp(next, max_hp);
}

/// Keeps current HP inside `1..=max` after max HP moved.
pub(crate) fn clamp_current_hp(content: &ContentPack, hero: &mut HeroState) {
    let max_hp = i64::from(hero_max_hp(content, hero));
    hero.current_hp = clamp_hp(i64::from(hero.current_hp), max_hp);
}

pub(crate) fn clamp_hp(value: i64, max_hp: i64) -> i32 {
    i32::try_from(value.clamp(1, max_hp.max(1))).unwrap_or(i32::MAX)
}
