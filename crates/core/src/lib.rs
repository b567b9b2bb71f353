pub mod config;
pub mod content;
pub mod difficulty;
pub mod error;
pub mod log;
pub mod mapgen;
pub mod rng;
pub mod run;
pub mod save_file;
pub mod seed;
pub mod synergy;
pub mod types;

pub use config::{ConfigError, RunConfig};
pub use content::ContentPack;
pub use difficulty::{Difficulty, DifficultyModifiers};
pub use error::{RestoreError, RunError};
pub use log::RunEvent;
pub use mapgen::{MapGenerator, MapNode, NodeKind, generate_map};
pub use rng::SeededRng;
pub use run::{BattleResult, HeroState, NewRunOptions, RunManager, RunState, SurvivorState};
pub use save_file::{SaveFile, SaveFileError};
pub use synergy::{SynergyBonusCache, SynergySystem};
pub use types::*;
