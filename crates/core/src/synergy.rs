//! Team-composition bonuses derived from race, class, and element membership.
//!
//! Thresholds stack: a synergy with 2- and 4-member tiers applies both effect
//! lists once four members are present. Bonuses are accumulated in the declared
//! definition order so float sums are reproducible.

use std::collections::BTreeMap;

use crate::content::{HeroTable, SynergyDefinition, SynergyEffect, SynergyKey};
use crate::run::HeroState;
use crate::types::{DamageTarget, Element, StatBonus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveSynergy {
    pub synergy_id: &'static str,
    pub count: usize,
    /// Member count of the highest tier reached.
    pub active_threshold: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SynergyBonusCache {
    pub hero_bonuses: BTreeMap<String, StatBonus>,
    pub damage_bonuses: BTreeMap<DamageTarget, f64>,
    pub global_resistance: StatBonus,
    pub active: Vec<ActiveSynergy>,
    pub unlocked_skills: Vec<&'static str>,
}

impl SynergyBonusCache {
    pub fn is_empty(&self) -> bool {
        self.hero_bonuses.is_empty()
            && self.damage_bonuses.is_empty()
            && self.global_resistance.is_empty()
            && self.active.is_empty()
            && self.unlocked_skills.is_empty()
    }
}

/// Pure computation behind [`SynergySystem::calculate_active_synergies`].
/// Heroes without static data are ignored.
pub fn calculate_synergies(
    heroes: &[HeroState],
    hero_data: &HeroTable,
    definitions: &[SynergyDefinition],
) -> SynergyBonusCache {
    let mut cache = SynergyBonusCache::default();
    let mut groups: BTreeMap<SynergyKey, Vec<&str>> = BTreeMap::new();

    for hero in heroes {
        let Some(data) = hero_data.get(hero.id.as_str()) else {
            continue;
        };
        let keys = [
            SynergyKey::Race(data.race),
            SynergyKey::Class(data.class),
            SynergyKey::Element(data.element),
        ];
        for key in keys {
            groups.entry(key).or_default().push(hero.id.as_str());
        }
        cache.hero_bonuses.insert(hero.id.clone(), StatBonus::default());
    }

    for definition in definitions {
        let members = groups.get(&definition.key).map(Vec::as_slice).unwrap_or_default();
        let count = members.len();
        let mut active_threshold = None;

        for threshold in definition.thresholds.iter().filter(|threshold| count >= threshold.count) {
            active_threshold = active_threshold.max(Some(threshold.count));
            for effect in &threshold.effects {
                apply_effect(&mut cache, members, effect);
            }
        }

        if let Some(active_threshold) = active_threshold {
            cache.active.push(ActiveSynergy { synergy_id: definition.id, count, active_threshold });
        }
    }

    let global = cache.global_resistance;
    for bonus in cache.hero_bonuses.values_mut() {
        bonus.merge(&global);
    }
    cache
}

fn apply_effect(cache: &mut SynergyBonusCache, members: &[&str], effect: &SynergyEffect) {
    match *effect {
        SynergyEffect::StatBoost { stat, value } => {
            for member in members {
                if let Some(bonus) = cache.hero_bonuses.get_mut(*member) {
                    bonus.add(stat, value);
                }
            }
        }
        SynergyEffect::DamageBonus { target, value } => {
            *cache.damage_bonuses.entry(target).or_insert(0.0) += value;
        }
        SynergyEffect::Resistance { stat, value } => cache.global_resistance.add(stat, value),
        SynergyEffect::SkillUnlock { skill_id } => {
            if !cache.unlocked_skills.contains(&skill_id) {
                cache.unlocked_skills.push(skill_id);
            }
        }
    }
}

/// Holds the bonuses of the last roster it was asked about.
#[derive(Clone, Debug, Default)]
pub struct SynergySystem {
    cache: SynergyBonusCache,
}

impl SynergySystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calculate_active_synergies(
        &mut self,
        heroes: &[HeroState],
        hero_data: &HeroTable,
        definitions: &[SynergyDefinition],
    ) -> &SynergyBonusCache {
        self.cache = calculate_synergies(heroes, hero_data, definitions);
        &self.cache
    }

    pub fn last_result(&self) -> &SynergyBonusCache {
        &self.cache
    }

    pub fn hero_bonus(&self, hero_id: &str) -> StatBonus {
        self.cache.hero_bonuses.get(hero_id).copied().unwrap_or_default()
    }

    /// `1 + all-element bonus + bonus for this element`.
    pub fn damage_multiplier(&self, element: Element) -> f64 {
        let all = self.cache.damage_bonuses.get(&DamageTarget::All).copied().unwrap_or(0.0);
        let specific =
            self.cache.damage_bonuses.get(&DamageTarget::Element(element)).copied().unwrap_or(0.0);
        1.0 + all + specific
    }

    pub fn active_synergies(&self) -> &[ActiveSynergy] {
        &self.cache.active
    }

    pub fn unlocked_skills(&self) -> &[&'static str] {
        &self.cache.unlocked_skills
    }

    pub fn reset(&mut self) {
        self.cache = SynergyBonusCache::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentPack, SynergyThreshold, keys};
    use crate::types::{Race, StatKey};

    fn roster(ids: &[&str]) -> Vec<HeroState> {
        ids.iter().map(|id| HeroState::recruit(id, 100)).collect()
    }

    fn calculate(content: &ContentPack, ids: &[&str]) -> SynergySystem {
        let mut system = SynergySystem::new();
        system.calculate_active_synergies(&roster(ids), &content.heroes, &content.synergies);
        system
    }

    fn active_ids(system: &SynergySystem) -> Vec<&'static str> {
        system.active_synergies().iter().map(|active| active.synergy_id).collect()
    }

    #[test]
    fn two_humans_activate_the_lowest_race_tier() {
        let content = ContentPack::default();
        let system = calculate(&content, &[keys::HERO_KNIGHT, keys::HERO_CLERIC]);

        let human = system
            .active_synergies()
            .iter()
            .find(|active| active.synergy_id == "human_alliance")
            .expect("human alliance should be active");
        assert_eq!(human.count, 2);
        assert_eq!(human.active_threshold, 2);

        let knight = system.hero_bonus(keys::HERO_KNIGHT);
        assert_eq!(knight.hp, 50.0);
        assert_eq!(knight.attack, 0.0);
    }

    #[test]
    fn reaching_a_higher_tier_stacks_every_met_tier() {
        let content = ContentPack::default();
        let system = calculate(
            &content,
            &[keys::HERO_KNIGHT, keys::HERO_CLERIC, keys::HERO_PYROMANCER, keys::HERO_DUELIST],
        );

        let human = system
            .active_synergies()
            .iter()
            .find(|active| active.synergy_id == "human_alliance")
            .expect("human alliance should be active");
        assert_eq!(human.count, 4);
        assert_eq!(human.active_threshold, 4);

        let humans =
            [keys::HERO_KNIGHT, keys::HERO_CLERIC, keys::HERO_PYROMANCER, keys::HERO_DUELIST];
        for id in humans {
            let bonus = system.hero_bonus(id);
            assert_eq!(bonus.hp, 150.0, "{id} should receive both human tiers");
            assert_eq!(bonus.attack, 10.0);
        }
    }

    #[test]
    fn resistance_reaches_every_roster_member() {
        let content = ContentPack::default();
        let system =
            calculate(&content, &[keys::HERO_IRONGUARD, keys::HERO_STORMCALLER, keys::HERO_ARCHER]);

        assert_eq!(system.last_result().global_resistance.magic_resist, 10.0);
        let archer = system.hero_bonus(keys::HERO_ARCHER);
        assert_eq!(archer.magic_resist, 10.0, "non-dwarf still receives the global resistance");
        assert_eq!(archer.defense, 0.0, "stat boosts stay with the dwarven group");

        let ironguard = system.hero_bonus(keys::HERO_IRONGUARD);
        assert_eq!(ironguard.magic_resist, 10.0);
        assert_eq!(ironguard.defense, 6.0);
    }

    #[test]
    fn holy_resistance_merges_with_group_stat_boosts() {
        let content = ContentPack::default();
        let system = calculate(&content, &[keys::HERO_KNIGHT, keys::HERO_CLERIC]);
        let knight = system.hero_bonus(keys::HERO_KNIGHT);
        assert_eq!(knight.defense, 3.0);
        assert_eq!(knight.get(StatKey::Hp), 50.0);
    }

    #[test]
    fn damage_bonuses_apply_team_wide_by_element() {
        let content = ContentPack::default();
        let system = calculate(
            &content,
            &[keys::HERO_PYROMANCER, keys::HERO_FROST_WITCH, keys::HERO_STORMCALLER],
        );
        assert!(active_ids(&system).contains(&"arcane_circle"));
        assert!(active_ids(&system).contains(&"flame_pact"));
        assert!(!active_ids(&system).contains(&"frozen_heart"));

        assert!((system.damage_multiplier(Element::Fire) - 1.45).abs() < 1e-9);
        assert!((system.damage_multiplier(Element::Ice) - 1.25).abs() < 1e-9);
        assert!((system.damage_multiplier(Element::Physical) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn skill_unlocks_follow_declared_order() {
        let content = ContentPack::default();
        let system = calculate(&content, &[keys::HERO_GRAVE_PRIEST, keys::HERO_BONE_REAVER]);
        assert_eq!(
            system.unlocked_skills(),
            &[keys::SKILL_DEATHLESS_RALLY, keys::SKILL_UMBRAL_VEIL]
        );
        assert_eq!(system.hero_bonus(keys::HERO_BONE_REAVER).hp, 30.0);
    }

    #[test]
    fn lone_heroes_activate_nothing_but_single_member_tiers() {
        let content = ContentPack::default();
        let system = calculate(&content, &[keys::HERO_ARCHER]);
        assert!(system.active_synergies().is_empty());
        assert!(system.hero_bonus(keys::HERO_ARCHER).is_empty());
        assert_eq!(system.damage_multiplier(Element::Physical), 1.0);

        let system = calculate(&content, &[keys::HERO_PYROMANCER]);
        assert_eq!(active_ids(&system), vec!["flame_pact"]);
    }

    #[test]
    fn active_threshold_is_the_highest_tier_met_in_any_declared_order() {
        let content = ContentPack::default();
        let stat_tier = |count, value| SynergyThreshold {
            count,
            effects: vec![SynergyEffect::StatBoost { stat: StatKey::Attack, value }],
        };
        let definitions = vec![SynergyDefinition {
            id: "reversed_humans",
            name: "Reversed Humans",
            key: SynergyKey::Race(Race::Human),
            thresholds: vec![stat_tier(3, 5.0), stat_tier(2, 1.0), stat_tier(4, 100.0)],
        }];
        let heroes = roster(&[keys::HERO_KNIGHT, keys::HERO_CLERIC, keys::HERO_PYROMANCER]);

        let cache = calculate_synergies(&heroes, &content.heroes, &definitions);
        assert_eq!(cache.active.len(), 1);
        assert_eq!(cache.active[0].count, 3);
        assert_eq!(cache.active[0].active_threshold, 3);
        assert_eq!(cache.hero_bonuses[keys::HERO_KNIGHT].attack, 6.0);
    }

    #[test]
    fn unknown_heroes_are_skipped() {
        let content = ContentPack::default();
        let system = calculate(&content, &["not_a_hero", keys::HERO_KNIGHT]);
        assert!(system.last_result().hero_bonuses.contains_key(keys::HERO_KNIGHT));
        assert!(!system.last_result().hero_bonuses.contains_key("not_a_hero"));
    }

    #[test]
    fn repeated_calculation_is_bit_identical() {
        let content = ContentPack::default();
        let ids = [
            keys::HERO_PYROMANCER,
            keys::HERO_FROST_WITCH,
            keys::HERO_MOON_DANCER,
            keys::HERO_ARCHER,
            keys::HERO_CLERIC,
        ];
        let first = calculate_synergies(&roster(&ids), &content.heroes, &content.synergies);
        let second = calculate_synergies(&roster(&ids), &content.heroes, &content.synergies);
        assert_eq!(first, second);
        for (left, right) in first.damage_bonuses.values().zip(second.damage_bonuses.values()) {
            assert_eq!(left.to_bits(), right.to_bits());
        }
    }

    #[test]
    fn reset_clears_cached_bonuses() {
        let content = ContentPack::default();
        let mut system = calculate(&content, &[keys::HERO_KNIGHT, keys::HERO_CLERIC]);
        assert!(!system.last_result().is_empty());

        system.reset();
        assert!(system.last_result().is_empty());
        assert!(system.hero_bonus(keys::HERO_KNIGHT).is_empty());
        assert_eq!(system.damage_multiplier(Element::Holy), 1.0);
    }
}
