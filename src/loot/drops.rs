//! Rarity-weighted draws and enemy drops

use crate::core::dice::RandomSource;
use crate::entity::enemy::{Enemy, EnemyKind, Tier};
use crate::loot::catalog::{Armor, Equipment, Gear, Weapon, ARMORS, WEAPONS};
use crate::loot::rarity::Rarity;

/// Draw one entry from a catalog.
///
/// Entries are filtered by legality and minimum rarity, then picked with
/// probability proportional to their own rarity weight. `None` when the
/// filter leaves nothing.
pub fn draw<'a, T: Gear>(
    catalog: &'a [T],
    include_illegal: bool,
    min_rarity: Option<Rarity>,
    rng: &mut dyn RandomSource,
) -> Option<&'a T> {
    let pool: Vec<&T> = catalog
        .iter()
        .filter(|g| include_illegal || !g.is_illegal())
        .filter(|g| min_rarity.map_or(true, |min| g.rarity() >= min))
        .collect();
    if pool.is_empty() {
        return None;
    }
    let weights: Vec<f64> = pool.iter().map(|g| g.rarity().weight()).collect();
    Some(pool[rng.weighted_index(&weights)])
}

pub fn random_weapon(
    include_illegal: bool,
    min_rarity: Option<Rarity>,
    rng: &mut dyn RandomSource,
) -> Option<Weapon> {
    draw(WEAPONS, include_illegal, min_rarity, rng).copied()
}

pub fn random_armor(
    include_illegal: bool,
    min_rarity: Option<Rarity>,
    rng: &mut dyn RandomSource,
) -> Option<Armor> {
    draw(ARMORS, include_illegal, min_rarity, rng).copied()
}

/// Weapon with `weapon_chance`, armor otherwise
pub fn random_equipment(
    weapon_chance: f64,
    include_illegal: bool,
    min_rarity: Option<Rarity>,
    rng: &mut dyn RandomSource,
) -> Option<Equipment> {
    if rng.chance(weapon_chance) {
        random_weapon(include_illegal, min_rarity, rng).map(Equipment::Weapon)
    } else {
        random_armor(include_illegal, min_rarity, rng).map(Equipment::Armor)
    }
}

/// Loot quality class of a defeated enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropProfile {
    BountyHunter,
    GalacticEnforcer,
    FederationRanger,
    SectorBadge,
    Standard,
}

impl DropProfile {
    pub fn for_enemy(enemy: &Enemy) -> Self {
        match enemy.kind {
            EnemyKind::Hunter(_) => Self::BountyHunter,
            EnemyKind::Law(Tier::GalacticEnforcer) => Self::GalacticEnforcer,
            EnemyKind::Law(Tier::FederationRanger) => Self::FederationRanger,
            EnemyKind::Law(Tier::SectorBadge) => Self::SectorBadge,
            _ => Self::Standard,
        }
    }

    pub fn no_drop_chance(&self) -> f64 {
        match self {
            Self::BountyHunter => 0.2,
            _ => 0.5,
        }
    }

    /// Weighted table for the drop's minimum rarity
    pub fn min_rarity_table(&self) -> &'static [(Rarity, f64)] {
        match self {
            Self::BountyHunter => &[
                (Rarity::Uncommon, 30.0),
                (Rarity::Rare, 45.0),
                (Rarity::Epic, 20.0),
                (Rarity::Legendary, 5.0),
            ],
            Self::GalacticEnforcer => &[
                (Rarity::Common, 20.0),
                (Rarity::Uncommon, 40.0),
                (Rarity::Rare, 35.0),
                (Rarity::Epic, 5.0),
            ],
            Self::FederationRanger => &[
                (Rarity::Common, 40.0),
                (Rarity::Uncommon, 50.0),
                (Rarity::Rare, 10.0),
            ],
            Self::SectorBadge => &[(Rarity::Common, 70.0), (Rarity::Uncommon, 30.0)],
            Self::Standard => &[(Rarity::Common, 1.0)],
        }
    }

    pub fn roll_min_rarity(&self, rng: &mut dyn RandomSource) -> Rarity {
        let table = self.min_rarity_table();
        let weights: Vec<f64> = table.iter().map(|(_, w)| *w).collect();
        table[rng.weighted_index(&weights)].0
    }
}

/// Roll the equipment drop for a defeated enemy
pub fn enemy_drop(enemy: &Enemy, rng: &mut dyn RandomSource) -> Option<Equipment> {
    let profile = DropProfile::for_enemy(enemy);
    if rng.chance(profile.no_drop_chance()) {
        return None;
    }
    let min_rarity = profile.roll_min_rarity(rng);
    let drop = random_equipment(0.7, true, Some(min_rarity), rng);
    tracing::debug!(enemy = %enemy.name, ?min_rarity, drop = ?drop.map(|d| d.name()), "drop roll");
    drop
}
