//! Static content tables: heroes, enemies, equipment, acts, synergies, events, relics.
//! Every table is keyed by a stable string id and is never mutated by the run core.

use std::collections::BTreeMap;

use crate::types::{
    DamageTarget, Element, EquipmentSlot, HeroClass, NodeType, Race, Role, StatKey, Stats,
};

pub mod keys {
    pub const HERO_KNIGHT: &str = "knight";
    pub const HERO_ARCHER: &str = "archer";
    pub const HERO_CLERIC: &str = "cleric";
    pub const HERO_PYROMANCER: &str = "pyromancer";
    pub const HERO_DUELIST: &str = "duelist";
    pub const HERO_FROST_WITCH: &str = "frost_witch";
    pub const HERO_MOON_DANCER: &str = "moon_dancer";
    pub const HERO_STORMCALLER: &str = "stormcaller";
    pub const HERO_IRONGUARD: &str = "ironguard";
    pub const HERO_BONE_REAVER: &str = "bone_reaver";
    pub const HERO_GRAVE_PRIEST: &str = "grave_priest";
    pub const HERO_WOLF_STALKER: &str = "wolf_stalker";
    pub const HERO_BEAR_WARDEN: &str = "bear_warden";

    pub const EVENT_WANDERING_MERCHANT: &str = "wandering_merchant";

    pub const SKILL_DEATHLESS_RALLY: &str = "deathless_rally";
    pub const SKILL_MASS_HEAL: &str = "mass_heal";
    pub const SKILL_UMBRAL_VEIL: &str = "umbral_veil";
    pub const SKILL_SHIELD_BASH: &str = "shield_bash";
    pub const SKILL_PIERCING_VOLLEY: &str = "piercing_volley";
    pub const SKILL_HOLY_LIGHT: &str = "holy_light";
    pub const SKILL_FIREBALL: &str = "fireball";
    pub const SKILL_RIPOSTE: &str = "riposte";
    pub const SKILL_FROST_NOVA: &str = "frost_nova";
    pub const SKILL_MOONLIT_STEP: &str = "moonlit_step";
    pub const SKILL_CHAIN_LIGHTNING: &str = "chain_lightning";
    pub const SKILL_IRON_WALL: &str = "iron_wall";
    pub const SKILL_SOUL_REAP: &str = "soul_reap";
    pub const SKILL_GRAVE_WARD: &str = "grave_ward";
    pub const SKILL_PACK_HUNT: &str = "pack_hunt";
    pub const SKILL_MAUL: &str = "maul";

    pub const ITEM_RUSTY_SWORD: &str = "rusty_sword";
    pub const ITEM_IRON_LONGSWORD: &str = "iron_longsword";
    pub const ITEM_LEATHER_ARMOR: &str = "leather_armor";
    pub const ITEM_CHAIN_MAIL: &str = "chain_mail";
    pub const ITEM_LUCKY_CHARM: &str = "lucky_charm";
    pub const ITEM_RUBY_AMULET: &str = "ruby_amulet";

    pub const RELIC_WAR_DRUM: &str = "war_drum";
    pub const RELIC_HEALING_FLASK: &str = "healing_flask";
    pub const RELIC_GOLDEN_IDOL: &str = "golden_idol";
}

/// Event id used when an act declares no events of its own.
pub const FALLBACK_EVENT_ID: &str = keys::EVENT_WANDERING_MERCHANT;

pub struct HeroData {
    pub id: &'static str,
    pub name: &'static str,
    pub role: Role,
    pub race: Race,
    pub class: HeroClass,
    pub element: Element,
    pub base_stats: Stats,
    /// Added once per level above 1.
    pub growth: Stats,
    pub skills: Vec<&'static str>,
}

pub type HeroTable = BTreeMap<&'static str, HeroData>;

pub struct EnemyData {
    pub id: &'static str,
    pub name: &'static str,
    pub element: Element,
    pub stats: Stats,
}

pub struct EquipmentData {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub bonus: Stats,
}

pub struct ActConfig {
    pub id: &'static str,
    pub name: &'static str,
    /// Type of the leading node of each interior layer, in order.
    pub layer_template: Vec<NodeType>,
    pub enemy_pool: Vec<&'static str>,
    pub elite_pool: Vec<&'static str>,
    pub boss_pool: Vec<&'static str>,
    pub event_pool: Vec<&'static str>,
    pub difficulty_multiplier: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SynergyKey {
    Race(Race),
    Class(HeroClass),
    Element(Element),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SynergyEffect {
    /// Applies only to heroes counted by the synergy.
    StatBoost { stat: StatKey, value: f64 },
    /// Team-wide damage multiplier delta.
    DamageBonus { target: DamageTarget, value: f64 },
    /// Added to the global bonus every roster member receives.
    Resistance { stat: StatKey, value: f64 },
    SkillUnlock { skill_id: &'static str },
}

pub struct SynergyThreshold {
    pub count: usize,
    pub effects: Vec<SynergyEffect>,
}

pub struct SynergyDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub key: SynergyKey,
    /// Ascending by `count`.
    pub thresholds: Vec<SynergyThreshold>,
}

pub struct EventData {
    pub id: &'static str,
    pub name: &'static str,
}

pub struct RelicData {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub struct SkillData {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub struct ContentPack {
    pub heroes: HeroTable,
    pub enemies: BTreeMap<&'static str, EnemyData>,
    pub equipment: BTreeMap<&'static str, EquipmentData>,
    pub acts: Vec<ActConfig>,
    pub synergies: Vec<SynergyDefinition>,
    pub events: BTreeMap<&'static str, EventData>,
    pub relics: BTreeMap<&'static str, RelicData>,
    pub skills: BTreeMap<&'static str, SkillData>,
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self {
            heroes: default_heroes().into_iter().map(|hero| (hero.id, hero)).collect(),
            enemies: default_enemies().into_iter().map(|enemy| (enemy.id, enemy)).collect(),
            equipment: default_equipment().into_iter().map(|item| (item.id, item)).collect(),
            acts: default_acts(),
            synergies: default_synergies(),
            events: default_events().into_iter().map(|event| (event.id, event)).collect(),
            relics: default_relics().into_iter().map(|relic| (relic.id, relic)).collect(),
            skills: default_skills().into_iter().map(|skill| (skill.id, skill)).collect(),
        }
    }

    pub fn hero(&self, id: &str) -> Option<&HeroData> {
        self.heroes.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&EquipmentData> {
        self.equipment.get(id)
    }

    /// Every enemy id in table order; the fallback when an act pool is empty.
    pub fn all_enemy_ids(&self) -> Vec<&'static str> {
        self.enemies.keys().copied().collect()
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}

const fn stats(hp: i32, attack: i32, defense: i32, speed: i32) -> Stats {
    Stats { hp, attack, defense, speed, magic_resist: 0, crit_chance: 0 }
}

fn default_heroes() -> Vec<HeroData> {
    vec![
        HeroData {
            id: keys::HERO_KNIGHT,
            name: "Knight",
            role: Role::Tank,
            race: Race::Human,
            class: HeroClass::Warrior,
            element: Element::Physical,
            base_stats: stats(120, 12, 8, 8),
            growth: stats(14, 2, 2, 0),
            skills: vec![keys::SKILL_SHIELD_BASH],
        },
        HeroData {
            id: keys::HERO_ARCHER,
            name: "Archer",
            role: Role::Damage,
            race: Race::Elf,
            class: HeroClass::Ranger,
            element: Element::Physical,
            base_stats: stats(80, 16, 3, 12),
            growth: stats(8, 3, 1, 1),
            skills: vec![keys::SKILL_PIERCING_VOLLEY],
        },
        HeroData {
            id: keys::HERO_CLERIC,
            name: "Cleric",
            role: Role::Support,
            race: Race::Human,
            class: HeroClass::Priest,
            element: Element::Holy,
            base_stats: stats(90, 8, 4, 9),
            growth: stats(10, 1, 1, 0),
            skills: vec![keys::SKILL_HOLY_LIGHT, keys::SKILL_MASS_HEAL],
        },
        HeroData {
            id: keys::HERO_PYROMANCER,
            name: "Pyromancer",
            role: Role::Damage,
            race: Race::Human,
            class: HeroClass::Mage,
            element: Element::Fire,
            base_stats: stats(70, 18, 2, 10),
            growth: stats(7, 3, 0, 1),
            skills: vec![keys::SKILL_FIREBALL],
        },
        HeroData {
            id: keys::HERO_DUELIST,
            name: "Duelist",
            role: Role::Damage,
            race: Race::Human,
            class: HeroClass::Rogue,
            element: Element::Physical,
            base_stats: stats(85, 15, 4, 14),
            growth: stats(8, 3, 1, 1),
            skills: vec![keys::SKILL_RIPOSTE],
        },
        HeroData {
            id: keys::HERO_FROST_WITCH,
            name: "Frost Witch",
            role: Role::Damage,
            race: Race::Elf,
            class: HeroClass::Mage,
            element: Element::Ice,
            base_stats: stats(72, 17, 2, 10),
            growth: stats(7, 3, 0, 1),
            skills: vec![keys::SKILL_FROST_NOVA],
        },
        HeroData {
            id: keys::HERO_MOON_DANCER,
            name: "Moon Dancer",
            role: Role::Damage,
            race: Race::Elf,
            class: HeroClass::Rogue,
            element: Element::Shadow,
            base_stats: stats(78, 15, 3, 15),
            growth: stats(7, 3, 0, 1),
            skills: vec![keys::SKILL_MOONLIT_STEP],
        },
        HeroData {
            id: keys::HERO_STORMCALLER,
            name: "Stormcaller",
            role: Role::Damage,
            race: Race::Dwarf,
            class: HeroClass::Mage,
            element: Element::Lightning,
            base_stats: stats(88, 16, 4, 8),
            growth: stats(9, 3, 1, 0),
            skills: vec![keys::SKILL_CHAIN_LIGHTNING],
        },
        HeroData {
            id: keys::HERO_IRONGUARD,
            name: "Ironguard",
            role: Role::Tank,
            race: Race::Dwarf,
            class: HeroClass::Warrior,
            element: Element::Physical,
            base_stats: stats(140, 10, 10, 6),
            growth: stats(16, 1, 2, 0),
            skills: vec![keys::SKILL_IRON_WALL],
        },
        HeroData {
            id: keys::HERO_BONE_REAVER,
            name: "Bone Reaver",
            role: Role::Damage,
            race: Race::Undead,
            class: HeroClass::Warrior,
            element: Element::Shadow,
            base_stats: stats(100, 15, 5, 9),
            growth: stats(11, 2, 1, 0),
            skills: vec![keys::SKILL_SOUL_REAP],
        },
        HeroData {
            id: keys::HERO_GRAVE_PRIEST,
            name: "Grave Priest",
            role: Role::Support,
            race: Race::Undead,
            class: HeroClass::Priest,
            element: Element::Shadow,
            base_stats: stats(85, 9, 3, 9),
            growth: stats(9, 1, 1, 0),
            skills: vec![keys::SKILL_GRAVE_WARD],
        },
        HeroData {
            id: keys::HERO_WOLF_STALKER,
            name: "Wolf Stalker",
            role: Role::Damage,
            race: Race::Beastkin,
            class: HeroClass::Ranger,
            element: Element::Physical,
            base_stats: stats(82, 16, 3, 13),
            growth: stats(8, 3, 1, 1),
            skills: vec![keys::SKILL_PACK_HUNT],
        },
        HeroData {
            id: keys::HERO_BEAR_WARDEN,
            name: "Bear Warden",
            role: Role::Tank,
            race: Race::Beastkin,
            class: HeroClass::Warrior,
            element: Element::Physical,
            base_stats: stats(150, 11, 7, 5),
            growth: stats(16, 2, 1, 0),
            skills: vec![keys::SKILL_MAUL],
        },
    ]
}

fn default_enemies() -> Vec<EnemyData> {
    let enemy = |id, name, element, stats| EnemyData { id, name, element, stats };
    vec![
        enemy("goblin", "Goblin", Element::Physical, stats(40, 8, 2, 11)),
        enemy("dire_wolf", "Dire Wolf", Element::Physical, stats(35, 10, 1, 14)),
        enemy("bandit", "Bandit", Element::Physical, stats(50, 9, 3, 10)),
        enemy("orc_brute", "Orc Brute", Element::Physical, stats(110, 15, 6, 7)),
        enemy("bandit_captain", "Bandit Captain", Element::Physical, stats(95, 14, 5, 11)),
        enemy("forest_troll", "Forest Troll", Element::Physical, stats(320, 20, 8, 6)),
        enemy("skeleton", "Skeleton", Element::Shadow, stats(45, 10, 4, 9)),
        enemy("ghoul", "Ghoul", Element::Shadow, stats(60, 11, 2, 10)),
        enemy("cultist", "Cultist", Element::Shadow, stats(48, 13, 2, 10)),
        enemy("bone_knight", "Bone Knight", Element::Shadow, stats(130, 17, 9, 8)),
        enemy("lich", "Lich", Element::Ice, stats(380, 24, 7, 9)),
        enemy("imp", "Imp", Element::Fire, stats(42, 14, 2, 15)),
        enemy("hellhound", "Hellhound", Element::Fire, stats(70, 16, 3, 14)),
        enemy("ash_golem", "Ash Golem", Element::Fire, stats(120, 14, 10, 5)),
        enemy("infernal_guard", "Infernal Guard", Element::Fire, stats(150, 20, 10, 8)),
        enemy("demon_lord", "Demon Lord", Element::Fire, stats(480, 30, 10, 10)),
    ]
}

fn default_equipment() -> Vec<EquipmentData> {
    vec![
        EquipmentData {
            id: keys::ITEM_RUSTY_SWORD,
            name: "Rusty Sword",
            slot: EquipmentSlot::Weapon,
            bonus: stats(0, 3, 0, 0),
        },
        EquipmentData {
            id: keys::ITEM_IRON_LONGSWORD,
            name: "Iron Longsword",
            slot: EquipmentSlot::Weapon,
            bonus: stats(0, 7, 0, 0),
        },
        EquipmentData {
            id: keys::ITEM_LEATHER_ARMOR,
            name: "Leather Armor",
            slot: EquipmentSlot::Armor,
            bonus: stats(20, 0, 2, 0),
        },
        EquipmentData {
            id: keys::ITEM_CHAIN_MAIL,
            name: "Chain Mail",
            slot: EquipmentSlot::Armor,
            bonus: stats(40, 0, 5, -1),
        },
        EquipmentData {
            id: keys::ITEM_LUCKY_CHARM,
            name: "Lucky Charm",
            slot: EquipmentSlot::Accessory,
            bonus: Stats { crit_chance: 5, ..Stats::default() },
        },
        EquipmentData {
            id: keys::ITEM_RUBY_AMULET,
            name: "Ruby Amulet",
            slot: EquipmentSlot::Accessory,
            bonus: Stats { hp: 30, magic_resist: 5, ..Stats::default() },
        },
    ]
}

fn default_acts() -> Vec<ActConfig> {
    vec![
        ActConfig {
            id: "act_1",
            name: "Whispering Woods",
            layer_template: vec![
                NodeType::Battle,
                NodeType::Event,
                NodeType::Battle,
                NodeType::Shop,
                NodeType::Elite,
                NodeType::Rest,
            ],
            enemy_pool: vec!["goblin", "dire_wolf", "bandit"],
            elite_pool: vec!["orc_brute", "bandit_captain"],
            boss_pool: vec!["forest_troll"],
            event_pool: vec!["fairy_ring", "abandoned_camp", keys::EVENT_WANDERING_MERCHANT],
            difficulty_multiplier: 1.0,
        },
        ActConfig {
            id: "act_2",
            name: "Sunken Catacombs",
            layer_template: vec![
                NodeType::Battle,
                NodeType::Battle,
                NodeType::Event,
                NodeType::Elite,
                NodeType::Shop,
                NodeType::Battle,
                NodeType::Rest,
            ],
            enemy_pool: vec!["skeleton", "ghoul", "cultist"],
            elite_pool: vec!["bone_knight"],
            boss_pool: vec!["lich"],
            event_pool: vec!["cursed_altar", "drowned_library"],
            difficulty_multiplier: 1.5,
        },
        ActConfig {
            id: "act_3",
            name: "Ashen Citadel",
            layer_template: vec![
                NodeType::Battle,
                NodeType::Elite,
                NodeType::Event,
                NodeType::Battle,
                NodeType::Shop,
                NodeType::Elite,
                NodeType::Rest,
            ],
            enemy_pool: vec!["imp", "hellhound", "ash_golem"],
            elite_pool: vec!["infernal_guard"],
            boss_pool: vec!["demon_lord"],
            event_pool: vec!["ember_shrine", "fallen_hero"],
            difficulty_multiplier: 2.0,
        },
    ]
}

fn default_synergies() -> Vec<SynergyDefinition> {
    use SynergyEffect::{DamageBonus, Resistance, SkillUnlock, StatBoost};

    let tier = |count, effects| SynergyThreshold { count, effects };
    vec![
        SynergyDefinition {
            id: "human_alliance",
            name: "Human Alliance",
            key: SynergyKey::Race(Race::Human),
            thresholds: vec![
                tier(2, vec![StatBoost { stat: StatKey::Hp, value: 50.0 }]),
                tier(
                    4,
                    vec![
                        StatBoost { stat: StatKey::Hp, value: 100.0 },
                        StatBoost { stat: StatKey::Attack, value: 10.0 },
                    ],
                ),
            ],
        },
        SynergyDefinition {
            id: "elven_grace",
            name: "Elven Grace",
            key: SynergyKey::Race(Race::Elf),
            thresholds: vec![
                tier(2, vec![StatBoost { stat: StatKey::Speed, value: 10.0 }]),
                tier(3, vec![StatBoost { stat: StatKey::CritChance, value: 10.0 }]),
            ],
        },
        SynergyDefinition {
            id: "dwarven_bulwark",
            name: "Dwarven Bulwark",
            key: SynergyKey::Race(Race::Dwarf),
            thresholds: vec![tier(
                2,
                vec![
                    Resistance { stat: StatKey::MagicResist, value: 10.0 },
                    StatBoost { stat: StatKey::Defense, value: 6.0 },
                ],
            )],
        },
        SynergyDefinition {
            id: "undying_legion",
            name: "Undying Legion",
            key: SynergyKey::Race(Race::Undead),
            thresholds: vec![tier(
                2,
                vec![
                    StatBoost { stat: StatKey::Hp, value: 30.0 },
                    SkillUnlock { skill_id: keys::SKILL_DEATHLESS_RALLY },
                ],
            )],
        },
        SynergyDefinition {
            id: "pack_instinct",
            name: "Pack Instinct",
            key: SynergyKey::Race(Race::Beastkin),
            thresholds: vec![tier(2, vec![StatBoost { stat: StatKey::Attack, value: 8.0 }])],
        },
        SynergyDefinition {
            id: "warrior_discipline",
            name: "Warrior Discipline",
            key: SynergyKey::Class(HeroClass::Warrior),
            thresholds: vec![
                tier(2, vec![StatBoost { stat: StatKey::Defense, value: 8.0 }]),
                tier(4, vec![StatBoost { stat: StatKey::Defense, value: 15.0 }]),
            ],
        },
        SynergyDefinition {
            id: "ranger_focus",
            name: "Ranger Focus",
            key: SynergyKey::Class(HeroClass::Ranger),
            thresholds: vec![tier(2, vec![StatBoost { stat: StatKey::CritChance, value: 15.0 }])],
        },
        SynergyDefinition {
            id: "arcane_circle",
            name: "Arcane Circle",
            key: SynergyKey::Class(HeroClass::Mage),
            thresholds: vec![
                tier(2, vec![DamageBonus { target: DamageTarget::All, value: 0.1 }]),
                tier(3, vec![DamageBonus { target: DamageTarget::All, value: 0.15 }]),
            ],
        },
        SynergyDefinition {
            id: "sacred_choir",
            name: "Sacred Choir",
            key: SynergyKey::Class(HeroClass::Priest),
            thresholds: vec![tier(
                2,
                vec![
                    Resistance { stat: StatKey::MagicResist, value: 15.0 },
                    SkillUnlock { skill_id: keys::SKILL_MASS_HEAL },
                ],
            )],
        },
        SynergyDefinition {
            id: "shadow_blades",
            name: "Shadow Blades",
            key: SynergyKey::Class(HeroClass::Rogue),
            thresholds: vec![tier(2, vec![StatBoost { stat: StatKey::Attack, value: 12.0 }])],
        },
        SynergyDefinition {
            id: "flame_pact",
            name: "Flame Pact",
            key: SynergyKey::Element(Element::Fire),
            thresholds: vec![tier(
                1,
                vec![DamageBonus { target: DamageTarget::Element(Element::Fire), value: 0.2 }],
            )],
        },
        SynergyDefinition {
            id: "frozen_heart",
            name: "Frozen Heart",
            key: SynergyKey::Element(Element::Ice),
            thresholds: vec![tier(
                2,
                vec![DamageBonus { target: DamageTarget::Element(Element::Ice), value: 0.25 }],
            )],
        },
        SynergyDefinition {
            id: "umbral_covenant",
            name: "Umbral Covenant",
            key: SynergyKey::Element(Element::Shadow),
            thresholds: vec![tier(
                2,
                vec![
                    DamageBonus { target: DamageTarget::Element(Element::Shadow), value: 0.2 },
                    SkillUnlock { skill_id: keys::SKILL_UMBRAL_VEIL },
                ],
            )],
        },
        SynergyDefinition {
            id: "holy_ward",
            name: "Holy Ward",
            key: SynergyKey::Element(Element::Holy),
            thresholds: vec![tier(1, vec![Resistance { stat: StatKey::Defense, value: 3.0 }])],
        },
    ]
}

fn default_events() -> Vec<EventData> {
    vec![
        EventData { id: keys::EVENT_WANDERING_MERCHANT, name: "Wandering Merchant" },
        EventData { id: "fairy_ring", name: "Fairy Ring" },
        EventData { id: "abandoned_camp", name: "Abandoned Camp" },
        EventData { id: "cursed_altar", name: "Cursed Altar" },
        EventData { id: "drowned_library", name: "Drowned Library" },
        EventData { id: "ember_shrine", name: "Ember Shrine" },
        EventData { id: "fallen_hero", name: "Fallen Hero" },
    ]
}

fn default_relics() -> Vec<RelicData> {
    vec![
        RelicData {
            id: keys::RELIC_WAR_DRUM,
            name: "War Drum",
            description: "Heroes start each battle with +10% attack speed.",
        },
        RelicData {
            id: keys::RELIC_HEALING_FLASK,
            name: "Healing Flask",
            description: "Restore 10% HP to all heroes after each battle.",
        },
        RelicData {
            id: keys::RELIC_GOLDEN_IDOL,
            name: "Golden Idol",
            description: "Battles award 25% more gold.",
        },
    ]
}

fn default_skills() -> Vec<SkillData> {
    vec![
        SkillData {
            id: keys::SKILL_DEATHLESS_RALLY,
            name: "Deathless Rally",
            description: "The first ally to fall each battle returns at 30% HP.",
        },
        SkillData {
            id: keys::SKILL_MASS_HEAL,
            name: "Mass Heal",
            description: "Periodically heals every ally for a portion of max HP.",
        },
        SkillData {
            id: keys::SKILL_UMBRAL_VEIL,
            name: "Umbral Veil",
            description: "Shadow heroes gain a brief untargetable window at battle start.",
        },
        SkillData {
            id: keys::SKILL_SHIELD_BASH,
            name: "Shield Bash",
            description: "Strikes the front enemy and stuns it briefly.",
        },
        SkillData {
            id: keys::SKILL_PIERCING_VOLLEY,
            name: "Piercing Volley",
            description: "Fires an arrow that passes through the enemy line.",
        },
        SkillData {
            id: keys::SKILL_HOLY_LIGHT,
            name: "Holy Light",
            description: "Heals the most wounded ally.",
        },
        SkillData {
            id: keys::SKILL_FIREBALL,
            name: "Fireball",
            description: "Hurls a fireball that splashes onto nearby enemies.",
        },
        SkillData {
            id: keys::SKILL_RIPOSTE,
            name: "Riposte",
            description: "Counters the next melee hit taken.",
        },
        SkillData {
            id: keys::SKILL_FROST_NOVA,
            name: "Frost Nova",
            description: "Slows every enemy for a short time.",
        },
        SkillData {
            id: keys::SKILL_MOONLIT_STEP,
            name: "Moonlit Step",
            description: "Blinks behind the weakest enemy.",
        },
        SkillData {
            id: keys::SKILL_CHAIN_LIGHTNING,
            name: "Chain Lightning",
            description: "Lightning jumps between up to three enemies.",
        },
        SkillData {
            id: keys::SKILL_IRON_WALL,
            name: "Iron Wall",
            description: "Raises defense of the whole front line.",
        },
        SkillData {
            id: keys::SKILL_SOUL_REAP,
            name: "Soul Reap",
            description: "Heals on every kill.",
        },
        SkillData {
            id: keys::SKILL_GRAVE_WARD,
            name: "Grave Ward",
            description: "Shields an ally with necrotic energy.",
        },
        SkillData {
            id: keys::SKILL_PACK_HUNT,
            name: "Pack Hunt",
            description: "Marks a target that every ally deals bonus damage to.",
        },
        SkillData {
            id: keys::SKILL_MAUL,
            name: "Maul",
            description: "Heavy blow that taunts the target.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_reference_known_ids() {
        let content = ContentPack::default();
        for act in &content.acts {
            for id in act.enemy_pool.iter().chain(&act.elite_pool).chain(&act.boss_pool) {
                assert!(
                    content.enemies.contains_key(id),
                    "act {} references unknown enemy {id}",
                    act.id
                );
            }
            for id in &act.event_pool {
                assert!(
                    content.events.contains_key(id),
                    "act {} references unknown event {id}",
                    act.id
                );
            }
        }
        assert!(content.events.contains_key(FALLBACK_EVENT_ID));

        for hero in content.heroes.values() {
            assert!(!hero.skills.is_empty(), "hero {} has no skills", hero.id);
            for id in &hero.skills {
                assert!(
                    content.skills.contains_key(id),
                    "hero {} references unknown skill {id}",
                    hero.id
                );
            }
        }

        for synergy in &content.synergies {
            for threshold in &synergy.thresholds {
                for effect in &threshold.effects {
                    if let SynergyEffect::SkillUnlock { skill_id } = effect {
                        assert!(content.skills.contains_key(skill_id));
                    }
                }
            }
        }
    }

    #[test]
    fn synergy_thresholds_are_declared_ascending() {
        let content = ContentPack::default();
        for synergy in &content.synergies {
            let counts: Vec<usize> = synergy.thresholds.iter().map(|tier| tier.count).collect();
            let mut sorted = counts.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(
                counts, sorted,
                "synergy {} thresholds must be strictly ascending",
                synergy.id
            );
        }
    }

    #[test]
    fn default_content_has_three_acts_with_boss_pools() {
        let content = ContentPack::default();
        assert_eq!(content.acts.len(), 3);
        assert!(content.acts.iter().all(|act| !act.boss_pool.is_empty()));
        assert_eq!(content.all_enemy_ids().len(), content.enemies.len());
    }
}
