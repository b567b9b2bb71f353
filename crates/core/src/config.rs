//! Tunable run constants, loadable from TOML.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::keys;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub starting_gold: u32,
    pub max_roster_size: usize,
    pub max_level: u32,
    /// Exp needed to leave level `n` is `n * exp_per_level`.
    pub exp_per_level: u32,
    pub default_heroes: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            starting_gold: 100,
            max_roster_size: 6,
            max_level: 20,
            exp_per_level: 100,
            default_heroes: vec![keys::HERO_KNIGHT.to_string(), keys::HERO_ARCHER.to_string()],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read run config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse run config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid run config: {0}")]
    Invalid(String),
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_roster_size == 0 {
            return Err(ConfigError::Invalid("max_roster_size must be at least 1".to_string()));
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid("max_level must be at least 1".to_string()));
        }
        if self.exp_per_level == 0 {
            return Err(ConfigError::Invalid("exp_per_level must be at least 1".to_string()));
        }
        if self.default_heroes.len() > self.max_roster_size {
            return Err(ConfigError::Invalid(format!(
                "{} default heroes exceed max_roster_size {}",
                self.default_heroes.len(),
                self.max_roster_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = RunConfig::from_toml_str("starting_gold = 250\n").expect("valid config");
        assert_eq!(config.starting_gold, 250);
        assert_eq!(config.max_roster_size, 6);
        assert_eq!(config.default_heroes, RunConfig::default().default_heroes);
    }

    #[test]
    fn rejects_default_roster_larger_than_limit() {
        let text = "max_roster_size = 1\ndefault_heroes = [\"knight\", \"archer\"]\n";
        let err = RunConfig::from_toml_str(text).expect_err("oversized roster should be rejected");
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err}");
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = RunConfig::from_toml_str("starting_gold = \"lots\"").expect_err("type mismatch");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("run.toml");
        fs::write(&path, "max_level = 10\nexp_per_level = 50\n").expect("write config");

        let config = RunConfig::load(&path).expect("load config");
        assert_eq!(config.max_level, 10);
        assert_eq!(config.exp_per_level, 50);
        assert!(matches!(
            RunConfig::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
