use thiserror::Error;

use crate::mapgen::MapError;

/// Rejected run mutations. The run state is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("unknown hero '{0}'")]
    UnknownHero(String),
    #[error("hero '{0}' is not in the roster")]
    HeroNotInRoster(String),
    #[error("hero '{0}' is already in the roster")]
    DuplicateHero(String),
    #[error("roster is full ({max} heroes)")]
    RosterFull { max: usize },
    #[error("unknown item '{0}'")]
    UnknownItem(String),
    #[error("unknown relic '{0}'")]
    UnknownRelic(String),
    #[error("relic '{0}' is already owned")]
    DuplicateRelic(String),
    #[error("map has no node {0}")]
    UnknownNode(usize),
    #[error("node {0} is not reachable from the current position")]
    NodeNotReachable(usize),
}

/// Why a serialized run could not be restored. Prior state is kept in every case.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("run snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported run snapshot version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("run snapshot map is invalid: {0}")]
    InvalidMap(#[from] MapError),
    #[error("run snapshot references unknown hero '{0}'")]
    UnknownHero(String),
    #[error("run snapshot lists hero '{0}' more than once")]
    DuplicateHero(String),
    #[error("run snapshot references unknown item '{0}'")]
    UnknownItem(String),
    #[error("hero '{hero_id}' has level {level}, outside 1..={max}")]
    InvalidLevel { hero_id: String, level: u32, max: u32 },
    #[error("hero '{hero_id}' holds {exp} exp, which level {level} cannot carry")]
    InvalidExp { hero_id: String, level: u32, exp: u32 },
    #[error("hero '{hero_id}' has {hp} hp, outside 1..={max}")]
    HpOutOfRange { hero_id: String, hp: i32, max: i32 },
    #[error("run snapshot references unknown relic '{0}'")]
    UnknownRelic(String),
    #[error("run snapshot lists relic '{0}' more than once")]
    DuplicateRelic(String),
    #[error("run snapshot is on floor 0")]
    InvalidFloor,
    #[error("run snapshot holds {count} heroes but the roster limit is {max}")]
    RosterOverflow { count: usize, max: usize },
    #[error("current node {index} is outside a map of {len} nodes")]
    CurrentNodeOutOfRange { index: usize, len: usize },
}
