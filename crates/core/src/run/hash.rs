//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::mapgen::map_fingerprint;

impl RunManager {
    /// Digest of everything that affects future play. The event log is not included.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.state.seed);
        hasher.write_u32(self.rng.state());
        hasher.write_u32(self.state.gold);
        hasher.write_u32(self.state.floor);
        hasher.write(self.state.difficulty.id().as_bytes());
        match self.state.current_node {
            None => hasher.write_u8(0),
            Some(index) => {
                hasher.write_u8(1);
                hasher.write_u64(index as u64);
            }
        }

        hasher.write_u64(self.state.heroes.len() as u64);
        for hero in &self.state.heroes {
            hasher.write(hero.id.as_bytes());
            hasher.write_u8(0xff);
            hasher.write_u32(hero.level);
            hasher.write_u32(hero.exp);
            hasher.write_i32(hero.current_hp);
            for slot in [EquipmentSlot::Weapon, EquipmentSlot::Armor, EquipmentSlot::Accessory] {
                hasher.write(hero.equipment.get(slot).unwrap_or("").as_bytes());
                hasher.write_u8(0xff);
            }
        }

        hasher.write_u64(map_fingerprint(&self.state.map));
        for node in &self.state.map {
            hasher.write_u8(u8::from(node.completed));
        }
        for relic in &self.state.relics {
            hasher.write(relic.as_bytes());
            hasher.write_u8(0xff);
        }
        hasher.finish()
    }
}
