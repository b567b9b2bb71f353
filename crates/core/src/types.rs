use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    Speed,
    MagicResist,
    CritChance,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::Speed,
        StatKey::MagicResist,
        StatKey::CritChance,
    ];
}

/// Integer stat block used for static hero, enemy, and equipment data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub magic_resist: i32,
    pub crit_chance: i32,
}

impl Stats {
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
            StatKey::MagicResist => self.magic_resist,
            StatKey::CritChance => self.crit_chance,
        }
    }

    pub fn plus(&self, other: &Stats) -> Stats {
        Stats {
            hp: self.hp.saturating_add(other.hp),
            attack: self.attack.saturating_add(other.attack),
            defense: self.defense.saturating_add(other.defense),
            speed: self.speed.saturating_add(other.speed),
            magic_resist: self.magic_resist.saturating_add(other.magic_resist),
            crit_chance: self.crit_chance.saturating_add(other.crit_chance),
        }
    }

    pub fn times(&self, factor: i32) -> Stats {
        Stats {
            hp: self.hp.saturating_mul(factor),
            attack: self.attack.saturating_mul(factor),
            defense: self.defense.saturating_mul(factor),
            speed: self.speed.saturating_mul(factor),
            magic_resist: self.magic_resist.saturating_mul(factor),
            crit_chance: self.crit_chance.saturating_mul(factor),
        }
    }
}

/// Additive stat bonus produced by synergies. Values are deltas, not totals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatBonus {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub magic_resist: f64,
    pub crit_chance: f64,
}

impl StatBonus {
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
            StatKey::MagicResist => self.magic_resist,
            StatKey::CritChance => self.crit_chance,
        }
    }

    pub fn add(&mut self, key: StatKey, value: f64) {
        match key {
            StatKey::Hp => self.hp += value,
            StatKey::Attack => self.attack += value,
            StatKey::Defense => self.defense += value,
            StatKey::Speed => self.speed += value,
            StatKey::MagicResist => self.magic_resist += value,
            StatKey::CritChance => self.crit_chance += value,
        }
    }

    pub fn merge(&mut self, other: &StatBonus) {
        for key in StatKey::ALL {
            self.add(key, other.get(key));
        }
    }

    pub fn is_empty(&self) -> bool {
        StatKey::ALL.iter().all(|&key| self.get(key) == 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Undead,
    Beastkin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroClass {
    Warrior,
    Ranger,
    Mage,
    Priest,
    Rogue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Lightning,
    Holy,
    Shadow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tank,
    Damage,
    Support,
}

/// Key of a global damage multiplier: either every element or one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageTarget {
    All,
    Element(Element),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Battle,
    Elite,
    Boss,
    Shop,
    Event,
    Rest,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Battle => "battle",
            NodeType::Elite => "elite",
            NodeType::Boss => "boss",
            NodeType::Shop => "shop",
            NodeType::Event => "event",
            NodeType::Rest => "rest",
        }
    }

    pub fn is_combat(self) -> bool {
        matches!(self, NodeType::Battle | NodeType::Elite | NodeType::Boss)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_bonus_merge_is_additive_per_key() {
        let mut left = StatBonus::default();
        left.add(StatKey::Attack, 5.0);
        left.add(StatKey::MagicResist, 2.5);
        let mut right = StatBonus::default();
        right.add(StatKey::Attack, 3.0);
        right.add(StatKey::Hp, 40.0);

        left.merge(&right);
        assert_eq!(left.attack, 8.0);
        assert_eq!(left.hp, 40.0);
        assert_eq!(left.magic_resist, 2.5);
        assert!(!left.is_empty());
        assert!(StatBonus::default().is_empty());
    }

    #[test]
    fn stats_growth_scales_every_field() {
        let growth =
            Stats { hp: 10, attack: 2, defense: 1, speed: 0, magic_resist: 1, crit_chance: 0 };
        let base = Stats { hp: 100, attack: 10, ..Stats::default() };
        let level_five = base.plus(&growth.times(4));
        assert_eq!(level_five.hp, 140);
        assert_eq!(level_five.attack, 18);
        assert_eq!(level_five.get(StatKey::Defense), 4);
    }
}
