//! Single-use combat items
//!
//! Items only describe themselves here. Their effects run against a live
//! fight in `combat::session`.

use serde::{Deserialize, Serialize};

/// What an item does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Restores 30 hp, capped at max
    Medkit,
    /// Absorbs the whole of the next enemy attack
    Shield,
    /// Deals 15-35 damage to the enemy
    Grenade,
    /// Makes the enemy skip its next turn
    StunCharge,
}

impl ItemKind {
    pub const MEDKIT_HEAL: i32 = 30;
    pub const GRENADE_MIN: i32 = 15;
    pub const GRENADE_MAX: i32 = 35;

    pub fn name(&self) -> &'static str {
        match self {
            Self::Medkit => "Medkit",
            Self::Shield => "Energy Shield",
            Self::Grenade => "Explosive Grenade",
            Self::StunCharge => "Stun Charge",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Medkit => "Restores 30 HP",
            Self::Shield => "Blocks the next attack",
            Self::Grenade => "Deals 15-35 damage",
            Self::StunCharge => "Enemy loses its next turn",
        }
    }

    /// Usable outside of a fight
    pub fn usable_out_of_combat(&self) -> bool {
        matches!(self, Self::Medkit)
    }
}

/// An item in the player's combat kit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatItem {
    pub kind: ItemKind,
    pub name: String,
    pub description: String,
    /// Listed by police and boarding searches
    pub is_illegal: bool,
}

impl CombatItem {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            is_illegal: false,
        }
    }

    pub fn illegal(mut self) -> Self {
        self.is_illegal = true;
        self
    }

    pub fn medkit() -> Self {
        Self::new(ItemKind::Medkit)
    }

    pub fn shield() -> Self {
        Self::new(ItemKind::Shield)
    }

    pub fn grenade() -> Self {
        Self::new(ItemKind::Grenade)
    }

    pub fn stun_charge() -> Self {
        Self::new(ItemKind::StunCharge)
    }
}

impl From<ItemKind> for CombatItem {
    fn from(kind: ItemKind) -> Self {
        Self::new(kind)
    }
}
