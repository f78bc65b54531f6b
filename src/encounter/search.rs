//! Searching the player's ship
//!
//! Police patrols and boarding crews both go through the hold, the cargo
//! inventory, equipped gear and the combat kit. They differ only in how
//! thorough they are.

use crate::contract::CrateTier;
use crate::core::dice::RandomSource;
use crate::core::events::{EventLog, GameEvent};
use crate::entity::enemy::Tier;
use crate::entity::player::Player;
use crate::risk::odds;

/// Per-check detection chances for one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOdds {
    /// Each contract crate gets looked at
    pub crate_chance: f64,
    /// A sealed crate that was looked at reads as contraband
    pub sealed_chance: f64,
    pub inventory_chance: f64,
    /// Equipped illegal weapon or armor
    pub gear_chance: f64,
    pub item_chance: f64,
}

impl SearchOdds {
    /// A patrol stop misses nothing but crates
    pub fn police(heat: u32, tier: Tier) -> Self {
        Self {
            crate_chance: odds::police_crate_detection(heat, tier),
            sealed_chance: 0.5,
            inventory_chance: 1.0,
            gear_chance: 1.0,
            item_chance: 1.0,
        }
    }

    pub fn boarding(heat: u32) -> Self {
        Self {
            crate_chance: odds::boarding_crate_detection(heat),
            sealed_chance: 0.6,
            inventory_chance: 0.8,
            gear_chance: 0.95,
            item_chance: 0.6,
        }
    }
}

/// Everything a search turned up, by index into the player's collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub crates: Vec<usize>,
    pub inventory: Vec<usize>,
    pub weapon: bool,
    pub armor: bool,
    pub items: Vec<usize>,
}

impl Findings {
    pub fn is_empty(&self) -> bool {
        self.crates.is_empty()
            && self.inventory.is_empty()
            && !self.weapon
            && !self.armor
            && self.items.is_empty()
    }

    pub fn found_crate(&self) -> bool {
        !self.crates.is_empty()
    }

    /// Names of the found goods, for menus and events
    pub fn manifest(&self, player: &Player) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(contract) = &player.current_contract {
            for &i in &self.crates {
                if let Some(c) = contract.crates.get(i) {
                    names.push(c.contents_label());
                }
            }
        }
        for &i in &self.inventory {
            if let Some(entry) = player.inventory.get(i) {
                names.push(entry.name.clone());
            }
        }
        if self.weapon {
            if let Some(w) = player.weapon {
                names.push(w.name.to_string());
            }
        }
        if self.armor {
            if let Some(a) = player.armor_item {
                names.push(a.name.to_string());
            }
        }
        for &i in &self.items {
            if let Some(item) = player.items.get(i) {
                names.push(item.name.clone());
            }
        }
        names
    }
}

/// Go through the ship. Legit crates are always cleared.
pub fn search_ship(player: &Player, search: &SearchOdds, rng: &mut dyn RandomSource) -> Findings {
    let mut findings = Findings::default();

    if let Some(contract) = &player.current_contract {
        for (i, c) in contract.crates.iter().enumerate() {
            if !rng.chance(search.crate_chance) {
                continue;
            }
            let flagged = match c.tier {
                CrateTier::Legit => false,
                CrateTier::Illicit => true,
                CrateTier::Sealed => rng.chance(search.sealed_chance),
            };
            if flagged {
                findings.crates.push(i);
            }
        }
    }

    for (i, entry) in player.inventory.iter().enumerate() {
        if entry.is_contraband && rng.chance(search.inventory_chance) {
            findings.inventory.push(i);
        }
    }

    findings.weapon = player.weapon.is_some_and(|w| w.is_illegal) && rng.chance(search.gear_chance);
    findings.armor =
        player.armor_item.is_some_and(|a| a.is_illegal) && rng.chance(search.gear_chance);

    for (i, item) in player.items.iter().enumerate() {
        if item.is_illegal && rng.chance(search.item_chance) {
            findings.items.push(i);
        }
    }

    tracing::debug!(?findings, "ship searched");
    findings
}

/// Take everything that was found. A found crate voids the whole contract.
/// Returns true if the contract was lost.
pub fn confiscate(player: &mut Player, findings: &Findings, events: &mut EventLog) -> bool {
    let items = findings.manifest(player);

    let mut inventory = findings.inventory.clone();
    inventory.sort_unstable();
    for &i in inventory.iter().rev() {
        if i < player.inventory.len() {
            player.inventory.remove(i);
        }
    }
    let mut kit = findings.items.clone();
    kit.sort_unstable();
    for &i in kit.iter().rev() {
        if i < player.items.len() {
            player.items.remove(i);
        }
    }
    if findings.weapon {
        player.weapon = None;
    }
    if findings.armor {
        player.armor_item = None;
    }
    events.push(GameEvent::Confiscated { items });

    let voided = findings.found_crate() && player.current_contract.take().is_some();
    if voided {
        tracing::info!("contract confiscated");
        events.push(GameEvent::ContractVoided);
    }
    voided
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Contract, Crate};
    use crate::core::config::PlayerConfig;
    use crate::core::dice::ScriptedRolls;
    use crate::entity::items::CombatItem;
    use crate::entity::player::InventoryEntry;
    use crate::loot::catalog::{weapon_by_name, Equipment};

    fn contract(tiers: &[CrateTier]) -> Contract {
        let mut rolls = ScriptedRolls::new([], []);
        let crates = tiers.iter().map(|&t| Crate::new(t, &mut rolls)).collect();
        Contract {
            crates,
            distance: 4,
            deadline: 6,
            sectors_traveled: 0,
            deadline_multiplier: 1.0,
            reward: 0,
        }
    }

    fn player() -> Player {
        Player::new(&PlayerConfig::default())
    }

    #[test]
    fn test_police_always_find_inventory_contraband() {
        let mut p = player();
        p.inventory.push(InventoryEntry::salvage("Spice", 300, true));
        p.inventory.push(InventoryEntry::salvage("Scrap", 50, false));
        p.items.push(CombatItem::grenade().illegal());
        let mut rolls = ScriptedRolls::new([], []).with_fallback(0.99);
        let findings = search_ship(&p, &SearchOdds::police(0, Tier::LocalDeputy), &mut rolls);
        assert_eq!(findings.inventory, vec![0]);
        assert_eq!(findings.items, vec![0]);
        assert!(!findings.found_crate());
    }

    #[test]
    fn test_legit_crates_are_cleared() {
        let mut p = player();
        p.current_contract = Some(contract(&[CrateTier::Legit, CrateTier::Illicit]));
        let mut rolls = ScriptedRolls::new([], []).with_fallback(0.0);
        let findings = search_ship(&p, &SearchOdds::police(0, Tier::LocalDeputy), &mut rolls);
        assert_eq!(findings.crates, vec![1]);
    }

    #[test]
    fn test_sealed_crate_needs_second_roll() {
        let mut p = player();
        p.current_contract = Some(contract(&[CrateTier::Sealed]));
        // Crate is looked at, but the sealed check misses
        let mut rolls = ScriptedRolls::new([0.1, 0.7], []);
        let findings = search_ship(&p, &SearchOdds::police(0, Tier::LocalDeputy), &mut rolls);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_confiscation_voids_contract_and_strips_gear() {
        let mut p = player();
        p.current_contract = Some(contract(&[CrateTier::Illicit]));
        let rifle = *weapon_by_name("Railgun").unwrap();
        assert!(rifle.is_illegal);
        p.equip(Equipment::Weapon(rifle));
        let mut log = EventLog::new();
        let findings = Findings {
            crates: vec![0],
            weapon: true,
            ..Findings::default()
        };
        assert!(confiscate(&mut p, &findings, &mut log));
        assert!(p.current_contract.is_none());
        assert!(p.weapon.is_none());
        assert!(log.any(|e| matches!(e, GameEvent::ContractVoided)));
    }
}
