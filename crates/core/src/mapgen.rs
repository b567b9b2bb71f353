//! Procedural adventure-map generation split into coherent submodules.

pub mod model;

mod generator;
mod validate;

pub use generator::MapGenerator;
pub use model::{BattleNodeData, EnemySpawn, EventNodeData, MapNode, NodeKind, map_fingerprint};
pub use validate::{MapError, boss_count, validate_map};

use crate::content::ContentPack;
use crate::rng::SeededRng;

pub fn generate_map(content: &ContentPack, rng: &mut SeededRng, floor: u32) -> Vec<MapNode> {
    MapGenerator::new(content).generate(rng, floor)
}
