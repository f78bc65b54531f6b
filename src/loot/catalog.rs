//! Weapon and armor catalogs
//!
//! Both tables are fixed for the lifetime of the program. Illegal gear hits
//! harder but shows up in every search.

use serde::Serialize;

use crate::loot::rarity::Rarity;

/// Shared view over catalog entries used by rarity-gated draws
pub trait Gear {
    fn name(&self) -> &'static str;
    fn rarity(&self) -> Rarity;
    fn is_illegal(&self) -> bool;
    /// Damage for weapons, defense for armor
    fn rating(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: i32,
    pub price: i64,
    pub is_illegal: bool,
    pub rarity: Rarity,
}

impl Weapon {
    const fn new(name: &'static str, damage: i32, price: i64, is_illegal: bool, rarity: Rarity) -> Self {
        Self {
            name,
            damage,
            price,
            is_illegal,
            rarity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Armor {
    pub name: &'static str,
    pub defense: i32,
    pub price: i64,
    pub is_illegal: bool,
    pub rarity: Rarity,
}

impl Armor {
    const fn new(name: &'static str, defense: i32, price: i64, is_illegal: bool, rarity: Rarity) -> Self {
        Self {
            name,
            defense,
            price,
            is_illegal,
            rarity,
        }
    }
}

impl Gear for Weapon {
    fn name(&self) -> &'static str {
        self.name
    }
    fn rarity(&self) -> Rarity {
        self.rarity
    }
    fn is_illegal(&self) -> bool {
        self.is_illegal
    }
    fn rating(&self) -> i32 {
        self.damage
    }
}

impl Gear for Armor {
    fn name(&self) -> &'static str {
        self.name
    }
    fn rarity(&self) -> Rarity {
        self.rarity
    }
    fn is_illegal(&self) -> bool {
        self.is_illegal
    }
    fn rating(&self) -> i32 {
        self.defense
    }
}

pub const WEAPONS: &[Weapon] = &[
    Weapon::new("Mining Drill", 5, 250, false, Rarity::Common),
    Weapon::new("Basic Pistol", 8, 750, false, Rarity::Uncommon),
    Weapon::new("Light Repeater", 10, 2_000, false, Rarity::Uncommon),
    Weapon::new("Merchant's Rifle", 15, 6_000, false, Rarity::Rare),
    Weapon::new("Federation Combat Blaster", 20, 12_000, false, Rarity::Epic),
    Weapon::new("Suppressed Scattergun", 20, 8_000, true, Rarity::Rare),
    Weapon::new("Railgun", 30, 20_000, true, Rarity::Rare),
    Weapon::new("Plasma Reaper", 40, 30_000, true, Rarity::Rare),
    Weapon::new("Wraith Cannon", 60, 60_000, true, Rarity::Epic),
    Weapon::new("Void Ripper", 85, 100_000, true, Rarity::Legendary),
];

pub const ARMORS: &[Armor] = &[
    Armor::new("Mining Vest", 3, 550, false, Rarity::Common),
    Armor::new("Security Vest", 6, 1_200, false, Rarity::Uncommon),
    Armor::new("Kevlar Jacket", 8, 3_000, false, Rarity::Rare),
    Armor::new("Federation Armor", 10, 10_000, false, Rarity::Epic),
    Armor::new("Tactical Guard", 15, 15_000, false, Rarity::Epic),
    Armor::new("Reinforced Jacket", 5, 2_400, true, Rarity::Rare),
    Armor::new("Phase Armor", 10, 8_000, true, Rarity::Rare),
    Armor::new("Phase Armor Mk. II", 15, 26_000, true, Rarity::Epic),
    Armor::new("Exoskeleton", 25, 800_000, true, Rarity::Epic),
    Armor::new("Void Walker Suit", 50, 1_600_000, true, Rarity::Legendary),
];

/// A piece of gear that can be offered, equipped or confiscated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Equipment {
    Weapon(Weapon),
    Armor(Armor),
}

impl Equipment {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weapon(w) => w.name,
            Self::Armor(a) => a.name,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            Self::Weapon(w) => w.rarity,
            Self::Armor(a) => a.rarity,
        }
    }

    pub fn is_illegal(&self) -> bool {
        match self {
            Self::Weapon(w) => w.is_illegal,
            Self::Armor(a) => a.is_illegal,
        }
    }

    pub fn rating(&self) -> i32 {
        match self {
            Self::Weapon(w) => w.damage,
            Self::Armor(a) => a.defense,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, Self::Weapon(_))
    }
}

pub fn weapon_by_name(name: &str) -> Option<&'static Weapon> {
    WEAPONS.iter().find(|w| w.name == name)
}

pub fn armor_by_name(name: &str) -> Option<&'static Armor> {
    ARMORS.iter().find(|a| a.name == name)
}
