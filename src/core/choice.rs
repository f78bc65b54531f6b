//! Player decisions
//!
//! The core asks a [`Chooser`] whenever the player has to pick something.
//! A [`Menu`] carries a snapshot of whatever the presenter needs to show,
//! and the answer is a zero-based option index.

use std::collections::VecDeque;

use serde::Serialize;

use crate::entity::enemy::{BeamSource, Tier};
use crate::entity::player::Stone;
use crate::loot::catalog::{Armor, Equipment, Weapon};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Menu {
    /// Attack / use item / escape
    CombatAction {
        enemy: String,
        enemy_hp: i32,
        player_hp: i32,
        max_hp: i32,
        shield_active: bool,
        items: usize,
    },
    /// One option per item, then cancel
    CombatItem { items: Vec<String> },
    /// Take / leave
    TakeEquipment {
        offered: Equipment,
        current: Option<Equipment>,
    },
    /// Run / comply
    PolicePatrol { tier: Tier, enemy: String },
    /// Pay / refuse
    Bribe { amount: i64, credits: i64 },
    /// Hand it over / fight
    ContrabandFound { manifest: Vec<String> },
    /// Fight / run / bluff / surrender
    CartelStandoff { threat: u32, crew: Vec<String> },
    /// Go around / go through
    AsteroidField,
    /// Land / pass
    Planet,
    /// Break away / hide / let them pull you in
    TractorBeam { source: BeamSource },
    /// Hide / come out peacefully / fight. Cartel crews offer hide / fight.
    Boarded { source: BeamSource },
    /// Come out peacefully / fight
    HoldFull,
    /// Surrender / fight
    CaughtHiding,
    /// Explore the ship / slip back to your own
    HangarOpportunity,
    /// Leave / fight / ask what they were after
    ReleasedClean,
    /// Vents / overpower the guard / wait on the other prisoner
    PrisonCell,
    /// Investigate / head for the ship
    Corridor { explored: u32, total: u32 },
    /// Take / leave
    TakeStone { stone: Stone },
    /// Hack / force / leave
    ArmoryLock,
    /// Weapon / armor / neither
    ArmoryCache { weapon: Weapon, armor: Armor },
    /// Sabotage / leave
    Reactor,
    /// Deliver / steal
    ContractArrival { reward: i64, stones: Vec<Stone> },
    /// Retire / keep flying
    KingpinOffer { credits: i64 },
    /// Ascend / destroy the stones
    StonesDestiny,
}

impl Menu {
    pub fn option_count(&self) -> usize {
        match self {
            Self::CombatAction { .. } => 3,
            Self::CombatItem { items } => items.len() + 1,
            Self::CartelStandoff { .. } => 4,
            Self::TractorBeam { .. } => 3,
            Self::Boarded { source } => {
                if *source == BeamSource::Cartel {
                    2
                } else {
                    3
                }
            }
            Self::ReleasedClean | Self::PrisonCell | Self::ArmoryLock | Self::ArmoryCache { .. } => 3,
            Self::TakeEquipment { .. }
            | Self::PolicePatrol { .. }
            | Self::Bribe { .. }
            | Self::ContrabandFound { .. }
            | Self::AsteroidField
            | Self::Planet
            | Self::HoldFull
            | Self::CaughtHiding
            | Self::HangarOpportunity
            | Self::Corridor { .. }
            | Self::TakeStone { .. }
            | Self::Reactor
            | Self::ContractArrival { .. }
            | Self::KingpinOffer { .. }
            | Self::StonesDestiny => 2,
        }
    }

    /// Labels for each option, in index order
    pub fn labels(&self) -> Vec<String> {
        let fixed: &[&str] = match self {
            Self::CombatAction { .. } => &["Attack", "Use item", "Attempt escape"],
            Self::CombatItem { items } => {
                let mut labels = items.clone();
                labels.push("Cancel".to_string());
                return labels;
            }
            Self::TakeEquipment { .. } => &["Take it", "Leave it"],
            Self::PolicePatrol { .. } => &["Run", "Comply"],
            Self::Bribe { .. } => &["Pay", "Refuse"],
            Self::ContrabandFound { .. } => &["Hand it over", "Fight"],
            Self::CartelStandoff { .. } => &["Fight", "Run", "Bluff", "Surrender"],
            Self::AsteroidField => &["Go around", "Go through"],
            Self::Planet => &["Land", "Pass by"],
            Self::TractorBeam { .. } => &["Break away", "Hide", "Let them pull you in"],
            Self::Boarded { source } => {
                if *source == BeamSource::Cartel {
                    &["Hide", "Fight"]
                } else {
                    &["Hide", "Come out peacefully", "Fight"]
                }
            }
            Self::HoldFull => &["Come out peacefully", "Fight"],
            Self::CaughtHiding => &["Surrender", "Fight"],
            Self::HangarOpportunity => &["Explore their ship", "Slip back to your ship"],
            Self::ReleasedClean => &["Leave", "Fight", "Ask what they were after"],
            Self::PrisonCell => &["Crawl through the vents", "Overpower the guard", "Wait on the other prisoner"],
            Self::Corridor { .. } => &["Investigate", "Head for your ship"],
            Self::TakeStone { .. } => &["Take it", "Leave it"],
            Self::ArmoryLock => &["Hack the lock", "Force it open", "Leave"],
            Self::ArmoryCache { .. } => &["Weapon", "Armor", "Neither"],
            Self::Reactor => &["Sabotage", "Leave"],
            Self::ContractArrival { .. } => &["Deliver", "Steal the cargo"],
            Self::KingpinOffer { .. } => &["Retire", "Keep flying"],
            Self::StonesDestiny => &["Ascend", "Destroy the stones"],
        };
        fixed.iter().map(|s| s.to_string()).collect()
    }
}

/// Anything that can answer a menu: console input, a script, a policy
pub trait Chooser {
    /// Zero-based option index
    fn choose(&mut self, menu: &Menu) -> usize;
}

/// Ask the chooser and clamp its answer into range
pub fn choose(chooser: &mut dyn Chooser, menu: &Menu) -> usize {
    let count = menu.option_count();
    let pick = chooser.choose(menu);
    if pick >= count {
        tracing::warn!(pick, count, "menu choice out of range, using last option");
        return count - 1;
    }
    pick
}

/// Plays back a fixed list of picks, then repeats `fallback`.
/// Every menu it sees is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    picks: VecDeque<usize>,
    pub fallback: usize,
    pub seen: Vec<Menu>,
}

impl ScriptedChooser {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            fallback: 0,
            seen: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: usize) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, menu: &Menu) -> usize {
        self.seen.push(menu.clone());
        self.picks.pop_front().unwrap_or(self.fallback)
    }
}

/// Simple headless policy: fights when healthy, patches up when hurt,
/// complies with the law and takes any upgrade.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPilot;

impl Chooser for AutoPilot {
    fn choose(&mut self, menu: &Menu) -> usize {
        match menu {
            Menu::CombatAction {
                player_hp,
                max_hp,
                items,
                ..
            } => {
                if *items > 0 && *player_hp * 3 < *max_hp {
                    1
                } else {
                    0
                }
            }
            Menu::CombatItem { items } => items
                .iter()
                .position(|i| i == "Medkit")
                .unwrap_or(0),
            Menu::TakeEquipment { offered, current } => {
                let better = current.map_or(true, |c| offered.rating() > c.rating());
                if better {
                    0
                } else {
                    1
                }
            }
            Menu::PolicePatrol { .. } => 1,
            Menu::Bribe { .. } => 0,
            Menu::ContrabandFound { .. } => 0,
            Menu::CartelStandoff { threat, .. } => {
                if *threat >= 4 {
                    3
                } else {
                    0
                }
            }
            Menu::AsteroidField => 0,
            Menu::Planet => 0,
            Menu::TractorBeam { .. } => 0,
            Menu::Boarded { .. } => 0,
            Menu::HoldFull => 0,
            Menu::CaughtHiding => 0,
            Menu::HangarOpportunity => 0,
            Menu::ReleasedClean => 0,
            Menu::PrisonCell => 0,
            Menu::Corridor { explored, .. } => {
                if *explored < 3 {
                    0
                } else {
                    1
                }
            }
            Menu::TakeStone { .. } => 0,
            Menu::ArmoryLock => 0,
            Menu::ArmoryCache { weapon, armor } => {
                if weapon.damage >= armor.defense {
                    0
                } else {
                    1
                }
            }
            Menu::Reactor => 0,
            Menu::ContractArrival { .. } => 0,
            Menu::KingpinOffer { .. } => 0,
            Menu::StonesDestiny => 0,
        }
    }
}
