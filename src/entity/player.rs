//! Pilot and ship state
//!
//! Heat and cartel threat are plain fields here, but only the `risk` module
//! changes them during play.

use serde::{Deserialize, Serialize};

use crate::contract::Contract;
use crate::core::config::{PlayerConfig, ShipConfig};
use crate::entity::items::{CombatItem, ItemKind};
use crate::loot::catalog::{Armor, Equipment, Weapon};

/// The six stones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Space,
    Mind,
    Reality,
    Power,
    Soul,
    Time,
}

impl Stone {
    pub const ALL: [Stone; 6] = [
        Stone::Space,
        Stone::Mind,
        Stone::Reality,
        Stone::Power,
        Stone::Soul,
        Stone::Time,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Space => "Space Stone",
            Self::Mind => "Mind Stone",
            Self::Reality => "Reality Stone",
            Self::Power => "Power Stone",
            Self::Soul => "Soul Stone",
            Self::Time => "Time Stone",
        }
    }
}

/// Where a cargo-hold entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySource {
    /// Taken from an undelivered contract
    StolenCargo,
    /// Picked up aboard a boarding ship
    Salvage,
}

/// A loose item in the cargo hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub name: String,
    pub value: i64,
    pub is_contraband: bool,
    pub source: EntrySource,
}

impl InventoryEntry {
    pub fn salvage(name: impl Into<String>, value: i64, is_contraband: bool) -> Self {
        Self {
            name: name.into(),
            value,
            is_contraband,
            source: EntrySource::Salvage,
        }
    }

    pub fn stolen(name: impl Into<String>, value: i64, is_contraband: bool) -> Self {
        Self {
            name: name.into(),
            value,
            is_contraband,
            source: EntrySource::StolenCargo,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub base_damage: i32,
    pub credits: i64,
    pub heat: u32,
    pub weapon: Option<Weapon>,
    pub armor_item: Option<Armor>,
    pub items: Vec<CombatItem>,
    pub inventory: Vec<InventoryEntry>,
    /// Stones currently held
    pub stones: Vec<Stone>,
    /// Every stone the player has ever laid eyes on
    pub stones_discovered: Vec<Stone>,
    pub current_contract: Option<Contract>,
    pub cartel_threat_level: u32,
    pub illegal_activity_today: bool,
    pub rejected_kingpin: bool,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            name: config.name.clone(),
            hp: config.hp.min(config.max_hp),
            max_hp: config.max_hp,
            base_damage: config.base_damage,
            credits: config.credits,
            heat: 0,
            weapon: None,
            armor_item: None,
            items: config.starting_items.iter().map(|&k| CombatItem::new(k)).collect(),
            inventory: Vec::new(),
            stones: Vec::new(),
            stones_discovered: Vec::new(),
            current_contract: None,
            cartel_threat_level: 0,
            illegal_activity_today: false,
            rejected_kingpin: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Base damage plus equipped weapon
    pub fn total_damage(&self) -> i32 {
        self.base_damage + self.weapon.map_or(0, |w| w.damage)
    }

    pub fn armor_defense(&self) -> i32 {
        self.armor_item.map_or(0, |a| a.defense)
    }

    /// Heal up to max hp, returning the hp actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Lose hp, never below 0
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    /// Pay up to `amount`, returning what was actually paid
    pub fn pay(&mut self, amount: i64) -> i64 {
        let paid = amount.clamp(0, self.credits.max(0));
        self.credits -= paid;
        paid
    }

    /// Reset the daily flag and apply overnight healing: 3 hp above half
    /// health, 1 hp otherwise. Returns hp restored.
    pub fn start_new_day(&mut self) -> i32 {
        self.illegal_activity_today = false;
        let amount = if self.hp > self.max_hp / 2 { 3 } else { 1 };
        self.heal(amount)
    }

    /// Currently equipped gear in the slot `item` would occupy
    pub fn equipped_in_slot(&self, item: &Equipment) -> Option<Equipment> {
        match item {
            Equipment::Weapon(_) => self.weapon.map(Equipment::Weapon),
            Equipment::Armor(_) => self.armor_item.map(Equipment::Armor),
        }
    }

    /// Equip gear, returning whatever it replaced
    pub fn equip(&mut self, item: Equipment) -> Option<Equipment> {
        match item {
            Equipment::Weapon(w) => self.weapon.replace(w).map(Equipment::Weapon),
            Equipment::Armor(a) => self.armor_item.replace(a).map(Equipment::Armor),
        }
    }

    pub fn has_item(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|i| i.kind == kind)
    }

    /// Index of the first item of a kind
    pub fn find_item(&self, kind: ItemKind) -> Option<usize> {
        self.items.iter().position(|i| i.kind == kind)
    }

    pub fn holds_stone(&self, stone: Stone) -> bool {
        self.stones.contains(&stone)
    }

    pub fn has_discovered(&self, stone: Stone) -> bool {
        self.stones_discovered.contains(&stone)
    }

    /// Record a sighting. Returns false if the stone was already known.
    pub fn discover_stone(&mut self, stone: Stone) -> bool {
        if self.has_discovered(stone) {
            return false;
        }
        self.stones_discovered.push(stone);
        true
    }

    /// Take a stone into the hold, marking it discovered
    pub fn collect_stone(&mut self, stone: Stone) {
        self.discover_stone(stone);
        if !self.holds_stone(stone) {
            self.stones.push(stone);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub fuel: u32,
    pub max_fuel: u32,
    pub speed: u32,
    pub max_cargo: u32,
}

impl Ship {
    pub fn new(config: &ShipConfig) -> Self {
        Self {
            fuel: config.fuel.min(config.max_fuel),
            max_fuel: config.max_fuel,
            speed: config.speed.max(1),
            max_cargo: config.max_cargo.max(1),
        }
    }

    pub fn tank_space(&self) -> u32 {
        self.max_fuel.saturating_sub(self.fuel)
    }
}
