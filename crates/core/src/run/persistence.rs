//! JSON snapshots of a run. Restores are all-or-nothing: a snapshot is parsed
//! and validated into fresh values before anything in the manager changes.

use std::collections::BTreeSet;

use tracing::{info, warn};

use super::*;
use crate::error::RestoreError;
use crate::mapgen::validate_map;

pub const SAVE_FORMAT_VERSION: u16 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    format_version: u16,
    state: &'a RunState,
    rng_state: u32,
}

#[derive(Deserialize)]
struct Snapshot {
    format_version: u16,
    state: RunState,
    rng_state: u32,
}

impl RunManager {
    /// Captures the full run state plus the RNG position.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SnapshotRef {
            format_version: SAVE_FORMAT_VERSION,
            state: &self.state,
            rng_state: self.rng.state(),
        })
    }

    pub fn deserialize(&mut self, json: &str) -> Result<(), RestoreError> {
        let snapshot = match self.parse_snapshot(json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(target: "autobattler::run", error = %err, "run.restore_rejected");
                return Err(err);
            }
        };

        let seed = snapshot.state.seed;
        self.state = snapshot.state;
        self.rng = SeededRng::from_state(snapshot.rng_state);
        self.active = true;
        self.refresh_synergies();

        info!(target: "autobattler::run", seed, heroes = self.state.heroes.len(), "run.restored");
        self.log.push(RunEvent::Restored { seed });
        Ok(())
    }

    fn parse_snapshot(&self, json: &str) -> Result<Snapshot, RestoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.format_version != SAVE_FORMAT_VERSION {
            return Err(RestoreError::UnsupportedVersion { found: snapshot.format_version });
        }
        self.validate_state(&snapshot.state)?;
        Ok(snapshot)
    }

    fn validate_state(&self, state: &RunState) -> Result<(), RestoreError> {
        validate_map(&state.map)?;
        if let Some(index) = state.current_node
            && index >= state.map.len()
        {
            return Err(RestoreError::CurrentNodeOutOfRange { index, len: state.map.len() });
        }
        if state.floor == 0 {
            return Err(RestoreError::InvalidFloor);
        }

        if state.heroes.len() > self.config.max_roster_size {
            return Err(RestoreError::RosterOverflow {
                count: state.heroes.len(),
                max: self.config.max_roster_size,
            });
        }
        let mut seen = BTreeSet::new();
        for hero in &state.heroes {
            if self.content.hero(&hero.id).is_none() {
                return Err(RestoreError::UnknownHero(hero.id.clone()));
            }
            if !seen.insert(hero.id.as_str()) {
                return Err(RestoreError::DuplicateHero(hero.id.clone()));
            }
            if let Some(item) =
                hero.equipment.items().find(|item| self.content.item(item).is_none())
            {
                return Err(RestoreError::UnknownItem(item.to_string()));
            }
            self.validate_progress(hero)?;
        }

        let mut owned = BTreeSet::new();
        for relic in &state.relics {
            if !self.content.relics.contains_key(relic.as_str()) {
                return Err(RestoreError::UnknownRelic(relic.clone()));
            }
            if !owned.insert(relic.as_str()) {
                return Err(RestoreError::DuplicateRelic(relic.clone()));
            }
        }
        Ok(())
    }

    /// Level, exp, and HP must be values the progression rules can reach.
    fn validate_progress(&self, hero: &HeroState) -> Result<(), RestoreError> {
        let max_level = self.config.max_level;
        if hero.level == 0 || hero.level > max_level {
            return Err(RestoreError::InvalidLevel {
                hero_id: hero.id.clone(),
                level: hero.level,
                max: max_level,
            });
        }
        let exp_ok = if hero.level == max_level {
            hero.exp == 0
        } else {
            hero.exp < exp_to_next_level(hero.level, &self.config)
        };
        if !exp_ok {
            return Err(RestoreError::InvalidExp {
                hero_id: hero.id.clone(),
                level: hero.level,
                exp: hero.exp,
            });
        }
        let max_hp = hero_max_hp(&self.content, hero);
        if !(1..=max_hp).contains(&hero.current_hp) {
            return Err(RestoreError::HpOutOfRange {
                hero_id: hero.id.clone(),
                hp: hero.current_hp,
                max: max_hp,
            });
        }
        Ok(())
    }
}
