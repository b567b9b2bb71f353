//! Difficulty presets. The run core only stores the selected preset; combat and
//! reward layers read the modifiers and apply them on their side.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Hell,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyModifiers {
    pub enemy_hp: f64,
    pub enemy_attack: f64,
    pub gold: f64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Hard, Difficulty::Hell];

    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Hell => "hell",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|difficulty| difficulty.id() == id)
    }

    pub fn modifiers(self) -> DifficultyModifiers {
        match self {
            Difficulty::Normal => {
                DifficultyModifiers { enemy_hp: 1.0, enemy_attack: 1.0, gold: 1.0 }
            }
            Difficulty::Hard => DifficultyModifiers { enemy_hp: 1.4, enemy_attack: 1.2, gold: 1.2 },
            Difficulty::Hell => DifficultyModifiers { enemy_hp: 2.0, enemy_attack: 1.5, gold: 1.5 },
        }
    }
}
