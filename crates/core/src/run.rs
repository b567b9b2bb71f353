//! Owner of a single run: roster, gold, map position, relics, and the one RNG
//! every random decision of the run draws from.
//!
//! Mutations only go through `&mut RunManager`; callers read heroes and state
//! through shared references.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::content::ContentPack;
use crate::difficulty::Difficulty;
use crate::error::RunError;
use crate::log::RunEvent;
use crate::mapgen::{MapGenerator, MapNode};
use crate::rng::SeededRng;
use crate::seed::generate_runtime_seed;
use crate::synergy::SynergySystem;
use crate::types::{EquipmentSlot, Stats};

mod hash;
mod hero;
mod navigation;
mod persistence;


pub use hero::{Equipment, HeroState, exp_to_next_level, hero_max_hp, hero_stats};
pub use persistence::SAVE_FORMAT_VERSION;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub seed: u32,
    pub heroes: Vec<HeroState>,
    pub gold: u32,
    pub map: Vec<MapNode>,
    /// `None` until the party enters the first node.
    pub current_node: Option<usize>,
    pub floor: u32,
    pub difficulty: Difficulty,
    pub relics: Vec<String>,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            seed: 0,
            heroes: Vec::new(),
            gold: 0,
            map: Vec::new(),
            current_node: None,
            floor: 1,
            difficulty: Difficulty::default(),
            relics: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewRunOptions {
    /// Drawn from the runtime entropy source when absent.
    pub seed: Option<u32>,
    pub difficulty: Option<Difficulty>,
    /// Replaces the configured default roster.
    pub starting_heroes: Option<Vec<String>>,
}

impl NewRunOptions {
    pub fn seeded(seed: u32) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorState {
    pub hero_id: String,
    pub current_hp: i32,
}

/// Outcome handed back by the combat layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub victory: bool,
    pub gold_earned: u32,
    pub exp_earned: u32,
    pub survivors: Vec<SurvivorState>,
}

pub struct RunManager {
    content: ContentPack,
    config: RunConfig,
    rng: SeededRng,
    state: RunState,
    synergies: SynergySystem,
    log: Vec<RunEvent>,
    active: bool,
}

impl RunManager {
    pub fn new(content: ContentPack, config: RunConfig) -> Self {
        Self {
            content,
            config,
            rng: SeededRng::new(0),
            state: RunState::default(),
            synergies: SynergySystem::new(),
            log: Vec::new(),
            active: false,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ContentPack::build_default(), RunConfig::default())
    }

    /// Resets every piece of run state. An invalid starting roster is rejected
    /// before anything is touched.
    pub fn new_run(&mut self, options: NewRunOptions) -> Result<(), RunError> {
        let roster = options.starting_heroes.unwrap_or_else(|| self.config.default_heroes.clone());
        let heroes = self.recruit_roster(&roster)?;
        let seed = options.seed.unwrap_or_else(generate_runtime_seed);
        let difficulty = options.difficulty.unwrap_or_default();

        self.rng = SeededRng::new(seed);
        self.state = RunState {
            seed,
            heroes,
            gold: self.config.starting_gold,
            map: Vec::new(),
            current_node: None,
            floor: 1,
            difficulty,
            relics: Vec::new(),
        };
        self.active = true;
        self.log.clear();
        self.refresh_synergies();

        info!(
            target: "autobattler::run",
            seed,
            difficulty = difficulty.id(),
            heroes = self.state.heroes.len(),
            "run.started"
        );
        self.log.push(RunEvent::RunStarted { seed, difficulty });
        Ok(())
    }

    fn recruit_roster(&self, roster: &[String]) -> Result<Vec<HeroState>, RunError> {
        let mut heroes: Vec<HeroState> = Vec::with_capacity(roster.len());
        for id in roster {
            if heroes.iter().any(|hero| &hero.id == id) {
                return Err(RunError::DuplicateHero(id.clone()));
            }
            if heroes.len() >= self.config.max_roster_size {
                return Err(RunError::RosterFull { max: self.config.max_roster_size });
            }
            heroes.push(self.recruit(id)?);
        }
        Ok(heroes)
    }

    fn recruit(&self, id: &str) -> Result<HeroState, RunError> {
        let data = self.content.hero(id).ok_or_else(|| RunError::UnknownHero(id.to_string()))?;
        Ok(HeroState::recruit(id, data.base_stats.hp.max(1)))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn seed(&self) -> u32 {
        self.state.seed
    }

    pub fn gold(&self) -> u32 {
        self.state.gold
    }

    pub fn floor(&self) -> u32 {
        self.state.floor
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn heroes(&self) -> &[HeroState] {
        &self.state.heroes
    }

    pub fn hero(&self, hero_id: &str) -> Option<&HeroState> {
        self.state.heroes.iter().find(|hero| hero.id == hero_id)
    }

    pub fn map(&self) -> &[MapNode] {
        &self.state.map
    }

    pub fn relics(&self) -> &[String] {
        &self.state.relics
    }

    pub fn synergies(&self) -> &SynergySystem {
        &self.synergies
    }

    pub fn log(&self) -> &[RunEvent] {
        &self.log
    }

    pub fn rng(&self) -> &SeededRng {
        &self.rng
    }

    /// The run's RNG, for collaborators that must draw from the same stream.
    pub fn rng_mut(&mut self) -> &mut SeededRng {
        &mut self.rng
    }

    /// Generates a map for the current floor on the run's RNG and resets the
    /// party position.
    pub fn generate_map(&mut self) -> &[MapNode] {
        let map = MapGenerator::new(&self.content).generate(&mut self.rng, self.state.floor);
        self.state.map = map;
        self.state.current_node = None;
        self.log
            .push(RunEvent::MapGenerated { floor: self.state.floor, nodes: self.state.map.len() });
        &self.state.map
    }

    /// Signed gold change; the balance never drops below zero.
    pub fn add_gold(&mut self, amount: i64) {
        let total = (i64::from(self.state.gold) + amount).clamp(0, i64::from(u32::MAX));
        let total = u32::try_from(total).unwrap_or(u32::MAX);
        let delta = i64::from(total) - i64::from(self.state.gold);
        self.state.gold = total;
        debug!(target: "autobattler::run", delta, total, "gold.changed");
        self.log.push(RunEvent::GoldChanged { delta, total });
    }

    /// Returns false and leaves gold untouched when the balance is short.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.state.gold < amount {
            return false;
        }
        self.add_gold(-i64::from(amount));
        true
    }

    pub fn add_hero(&mut self, hero_id: &str) -> Result<(), RunError> {
        let hero = self.recruit(hero_id)?;
        if self.hero(hero_id).is_some() {
            return Err(RunError::DuplicateHero(hero_id.to_string()));
        }
        if self.state.heroes.len() >= self.config.max_roster_size {
            return Err(RunError::RosterFull { max: self.config.max_roster_size });
        }
        self.state.heroes.push(hero);
        self.refresh_synergies();
        debug!(target: "autobattler::run", hero = hero_id, "hero.added");
        self.log.push(RunEvent::HeroAdded { hero_id: hero_id.to_string() });
        Ok(())
    }

    pub fn remove_hero(&mut self, hero_id: &str) -> Result<HeroState, RunError> {
        let position = self.hero_position(hero_id)?;
        let hero = self.state.heroes.remove(position);
        self.refresh_synergies();
        debug!(target: "autobattler::run", hero = hero_id, "hero.removed");
        self.log.push(RunEvent::HeroRemoved { hero_id: hero_id.to_string() });
        Ok(hero)
    }

    pub fn heal_all_heroes(&mut self, percent: u32) {
        for hero in &mut self.state.heroes {
            hero::adjust_hp_by_percent(&self.content, hero, percent, true);
        }
    }

    pub fn damage_all_heroes(&mut self, percent: u32) {
        for hero in &mut self.state.heroes {
            hero::adjust_hp_by_percent(&self.content, hero, percent, false);
        }
    }

    /// Survivors keep the HP the combat layer reports, everyone else is
    /// revived at 1 HP, then the whole roster gains the awarded exp.
    pub fn apply_battle_result(&mut self, result: &BattleResult) {
        self.add_gold(i64::from(result.gold_earned));

        let mut level_ups = Vec::new();
        for hero in &mut self.state.heroes {
            let survivor = result.survivors.iter().find(|survivor| survivor.hero_id == hero.id);
            let max_hp = i64::from(hero_max_hp(&self.content, hero));
            hero.current_hp = match survivor {
                Some(survivor) => hero::clamp_hp(i64::from(survivor.current_hp), max_hp),
                None => 1,
            };
            for level in hero::grant_exp(&self.content, &self.config, hero, result.exp_earned) {
                level_ups.push(RunEvent::HeroLeveledUp { hero_id: hero.id.clone(), level });
            }
        }

        debug!(
            target: "autobattler::run",
            victory = result.victory,
            gold = result.gold_earned,
            exp = result.exp_earned,
            level_ups = level_ups.len(),
            "battle.applied"
        );
        self.log.push(RunEvent::BattleApplied {
            victory: result.victory,
            exp_earned: result.exp_earned,
        });
        self.log.extend(level_ups);
    }

    pub fn hero_stats(&self, hero_id: &str) -> Option<Stats> {
        self.hero(hero_id).and_then(|hero| hero_stats(&self.content, hero))
    }

    pub fn hero_max_hp(&self, hero_id: &str) -> Option<i32> {
        self.hero(hero_id).map(|hero| hero_max_hp(&self.content, hero))
    }

    /// Slots the item by its static slot and returns the item it replaced.
    pub fn equip_item(&mut self, hero_id: &str, item_id: &str) -> Result<Option<String>, RunError> {
        let position = self.hero_position(hero_id)?;
        let slot = self
            .content
            .item(item_id)
            .ok_or_else(|| RunError::UnknownItem(item_id.to_string()))?
            .slot;

        let hero = &mut self.state.heroes[position];
        let replaced = hero.equipment.set(slot, Some(item_id.to_string()));
        hero::clamp_current_hp(&self.content, hero);
        debug!(target: "autobattler::run", hero = hero_id, item = item_id, "item.equipped");
        self.log.push(RunEvent::ItemEquipped {
            hero_id: hero_id.to_string(),
            item_id: item_id.to_string(),
        });
        Ok(replaced)
    }

    pub fn unequip_item(
        &mut self,
        hero_id: &str,
        slot: EquipmentSlot,
    ) -> Result<Option<String>, RunError> {
        let position = self.hero_position(hero_id)?;
        let hero = &mut self.state.heroes[position];
        let removed = hero.equipment.set(slot, None);
        hero::clamp_current_hp(&self.content, hero);
        if let Some(item_id) = &removed {
            self.log.push(RunEvent::ItemUnequipped {
                hero_id: hero_id.to_string(),
                item_id: item_id.clone(),
            });
        }
        Ok(removed)
    }

    pub fn add_relic(&mut self, relic_id: &str) -> Result<(), RunError> {
        if !self.content.relics.contains_key(relic_id) {
            return Err(RunError::UnknownRelic(relic_id.to_string()));
        }
        if self.has_relic(relic_id) {
            return Err(RunError::DuplicateRelic(relic_id.to_string()));
        }
        self.state.relics.push(relic_id.to_string());
        self.log.push(RunEvent::RelicAdded { relic_id: relic_id.to_string() });
        Ok(())
    }

    pub fn has_relic(&self, relic_id: &str) -> bool {
        self.state.relics.iter().any(|relic| relic == relic_id)
    }

    fn hero_position(&self, hero_id: &str) -> Result<usize, RunError> {
        self.state
            .heroes
            .iter()
            .position(|hero| hero.id == hero_id)
            .ok_or_else(|| RunError::HeroNotInRoster(hero_id.to_string()))
    }

    fn refresh_synergies(&mut self) {
        self.synergies.calculate_active_synergies(
            &self.state.heroes,
            &self.content.heroes,
            &self.content.synergies,
        );
    }
}

impl Default for RunManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
