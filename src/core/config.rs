//! Game configuration loaded from TOML
//!
//! Every section falls back to the stock new-game values, so an empty file
//! (or no file at all) starts the usual run: 100 hp, 500 credits and an
//! empty tank on a speed-1 freighter.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SmugglerError};
use crate::entity::items::ItemKind;

/// Starting pilot stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Display name, only used by presenters
    pub name: String,
    /// Starting hit points (must not exceed `max_hp`)
    pub hp: i32,
    /// Hit point ceiling for healing
    pub max_hp: i32,
    /// Unarmed damage. A weapon's damage is added on top.
    pub base_damage: i32,
    pub credits: i64,
    /// Combat items in the starting kit
    pub starting_items: Vec<ItemKind>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Captain".to_string(),
            hp: 100,
            max_hp: 100,
            base_damage: 10,
            credits: 500,
            starting_items: Vec::new(),
        }
    }
}

/// Starting ship stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub fuel: u32,
    pub max_fuel: u32,
    /// Sectors per day, and the main input to every escape roll
    pub speed: u32,
    /// Crate capacity. Contracts never exceed it.
    pub max_cargo: u32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            fuel: 0,
            max_fuel: 10,
            speed: 1,
            max_cargo: 3,
        }
    }
}

/// Complete new-game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed RNG seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ship: ShipConfig,
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game rules cannot run with
    pub fn validate(&self) -> Result<()> {
        let p = &self.player;
        if p.max_hp <= 0 {
            return Err(SmugglerError::Config(format!(
                "max_hp must be positive, got {}",
                p.max_hp
            )));
        }
        if p.hp <= 0 || p.hp > p.max_hp {
            return Err(SmugglerError::Config(format!(
                "hp must be in 1..={}, got {}",
                p.max_hp, p.hp
            )));
        }
        if p.credits < 0 {
            return Err(SmugglerError::Config("credits cannot be negative".into()));
        }
        let s = &self.ship;
        if s.speed == 0 {
            return Err(SmugglerError::Config("ship speed must be at least 1".into()));
        }
        if s.max_cargo == 0 {
            return Err(SmugglerError::Config("ship needs at least one cargo slot".into()));
        }
        if s.fuel > s.max_fuel {
            return Err(SmugglerError::Config(format!(
                "fuel {} exceeds tank size {}",
                s.fuel, s.max_fuel
            )));
        }
        Ok(())
    }
}

/// Load and validate a game config file
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let contents = fs::read_to_string(path)?;
    GameConfig::from_toml_str(&contents)
}
