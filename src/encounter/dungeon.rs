//! Exploring a boarding ship
//!
//! After a capture or a won fight the player is loose aboard the enemy ship
//! for `d6 + 2` rooms. Each room can pay out and each can raise the alarm.
//! The way back to the ship goes through the impound bay unless the reactor
//! was sabotaged.

use serde::Serialize;
use tracing::{debug, info};

use crate::combat::{offer_equipment, run_combat, CombatOutcome};
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::events::GameEvent;
use crate::encounter::EncounterOutcome;
use crate::entity::enemy::{BeamSource, Enemy};
use crate::entity::items::{CombatItem, ItemKind};
use crate::entity::player::{InventoryEntry, Stone};
use crate::game::GameSession;
use crate::loot::catalog::Equipment;
use crate::loot::drops::{random_armor, random_equipment, random_weapon};
use crate::loot::rarity::Rarity;
use crate::risk::heat::{apply_heat, HeatEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoomKind {
    DetentionBlock,
    CargoBay,
    Armory,
    CommandRoom,
    Laboratory,
    ReactorRoom,
}

impl RoomKind {
    pub const ALL: [RoomKind; 6] = [
        RoomKind::DetentionBlock,
        RoomKind::CargoBay,
        RoomKind::Armory,
        RoomKind::CommandRoom,
        RoomKind::Laboratory,
        RoomKind::ReactorRoom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DetentionBlock => "Detention Block",
            Self::CargoBay => "Cargo Bay",
            Self::Armory => "Armory",
            Self::CommandRoom => "Command Room",
            Self::Laboratory => "Laboratory",
            Self::ReactorRoom => "Reactor Room",
        }
    }
}

/// Salvage tables: (name, value, contraband)
const CARGO_BAY_GOODS: &[(&str, i64, bool)] = &[
    ("Rare Minerals", 5_000, true),
    ("Alien Artifacts", 8_000, true),
    ("Classified Data Chips", 3_000, true),
    ("Experimental Tech", 12_000, true),
];

const COMMAND_DATA: &[(&str, i64, bool)] = &[
    ("Security Codes", 4_000, false),
    ("Navigation Charts", 2_500, false),
    ("Classified Intel", 8_000, true),
];

const REACTOR_TECH: &[(&str, i64, bool)] = &[
    ("Quantum Processors", 8_000, false),
    ("Exotic Matter", 12_000, true),
    ("Energy Crystals", 5_000, false),
];

enum LabLoot {
    Item(ItemKind),
    Cargo(&'static str, i64, bool),
}

const LAB_LOOT: &[LabLoot] = &[
    LabLoot::Item(ItemKind::Medkit),
    LabLoot::Item(ItemKind::Grenade),
    LabLoot::Item(ItemKind::StunCharge),
    LabLoot::Cargo("Experimental Samples", 6_000, true),
    LabLoot::Cargo("Research Data", 4_000, false),
];

/// State of one trip through a boarding ship
struct Dungeon {
    source: BeamSource,
    sabotaged: bool,
}

/// Explore until the rooms run out, the player heads back, or an alarm
/// forces a run for the ship
pub fn explore(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    source: BeamSource,
) -> EncounterOutcome {
    let total = game.rng.d6() + 2;
    let mut dungeon = Dungeon {
        source,
        sabotaged: false,
    };
    info!(rooms = total, source = source.label(), "exploring boarding ship");

    let mut explored = 0;
    while explored < total {
        if choose(chooser, &Menu::Corridor { explored, total }) != 0 {
            break;
        }
        let room = RoomKind::ALL[game.rng.pick_index(RoomKind::ALL.len())];
        game.events.push(GameEvent::RoomEntered { room });
        if dungeon.enter(game, chooser, room) {
            game.events.push(GameEvent::Detected);
            let enemy = Enemy::boarding_crew(source, game.player.heat, game.rng.as_mut());
            match run_combat(game, chooser, enemy) {
                CombatOutcome::Defeat => return EncounterOutcome::GameOver,
                CombatOutcome::Escaped => break,
                CombatOutcome::Victory => {}
            }
        }
        explored += 1;
    }
    dungeon.escape(game, chooser)
}

impl Dungeon {
    /// Resolve a room. Returns true if the crew spotted the player.
    fn enter(&mut self, game: &mut GameSession, chooser: &mut dyn Chooser, room: RoomKind) -> bool {
        debug!(room = room.label(), "room entered");
        match room {
            RoomKind::DetentionBlock => self.detention_block(game, chooser),
            RoomKind::CargoBay => self.cargo_bay(game, chooser),
            RoomKind::Armory => self.armory(game, chooser),
            RoomKind::CommandRoom => self.command_room(game),
            RoomKind::Laboratory => self.laboratory(game, chooser),
            RoomKind::ReactorRoom => self.reactor_room(game, chooser),
        }
    }

    fn detention_block(&mut self, game: &mut GameSession, chooser: &mut dyn Chooser) -> bool {
        if game.rng.chance(0.15) {
            offer_stone(game, chooser);
        }
        if game.rng.chance(0.4) {
            match game.rng.pick_index(3) {
                0 => {
                    let amount = game.rng.d6() as i64 * 200;
                    find_credits(game, amount);
                }
                1 => find_item(game, ItemKind::Medkit),
                _ => find_item(game, ItemKind::Shield),
            }
        }
        game.rng.chance(0.4)
    }

    fn cargo_bay(&mut self, game: &mut GameSession, chooser: &mut dyn Chooser) -> bool {
        if game.rng.chance(0.8) {
            let amount = (game.rng.d6() + game.rng.d6()) as i64 * 500;
            find_credits(game, amount);
        }
        if game.rng.chance(0.5) {
            let gear = random_equipment(0.6, true, Some(Rarity::Uncommon), game.rng.as_mut());
            if let Some(item) = gear {
                offer_equipment(&mut game.player, item, &mut game.events, chooser);
            }
        }
        if game.rng.chance(0.6) {
            let kinds = [ItemKind::Medkit, ItemKind::Shield, ItemKind::Grenade];
            let kind = kinds[game.rng.pick_index(kinds.len())];
            find_item(game, kind);
        }
        if game.rng.chance(0.3) {
            find_cargo(game, CARGO_BAY_GOODS);
        }
        game.rng.chance(0.3)
    }

    fn armory(&mut self, game: &mut GameSession, chooser: &mut dyn Chooser) -> bool {
        match choose(chooser, &Menu::ArmoryLock) {
            0 => {
                if !game.rng.chance(0.7) {
                    return true;
                }
                let weapon = random_weapon(true, Some(Rarity::Rare), game.rng.as_mut());
                let armor = random_armor(true, Some(Rarity::Rare), game.rng.as_mut());
                if let (Some(weapon), Some(armor)) = (weapon, armor) {
                    let menu = Menu::ArmoryCache { weapon, armor };
                    let pick = match choose(chooser, &menu) {
                        0 => Some(Equipment::Weapon(weapon)),
                        1 => Some(Equipment::Armor(armor)),
                        _ => None,
                    };
                    if let Some(item) = pick {
                        let replaced = game.player.equip(item);
                        game.events.push(GameEvent::EquipmentEquipped { item, replaced });
                    }
                }
                game.rng.chance(0.8)
            }
            1 => {
                if !game.rng.chance(0.4) {
                    return game.rng.chance(0.2);
                }
                let gear = random_equipment(0.7, true, Some(Rarity::Uncommon), game.rng.as_mut());
                if let Some(item) = gear {
                    offer_equipment(&mut game.player, item, &mut game.events, chooser);
                }
                game.rng.chance(0.4)
            }
            _ => false,
        }
    }

    fn command_room(&mut self, game: &mut GameSession) -> bool {
        if game.rng.chance(0.5) {
            let amount = game.rng.d6() as i64 * 300;
            find_credits(game, amount);
        }
        if game.rng.chance(0.4) {
            find_cargo(game, COMMAND_DATA);
        }
        game.rng.chance(0.6)
    }

    fn laboratory(&mut self, game: &mut GameSession, chooser: &mut dyn Chooser) -> bool {
        if game.rng.chance(0.3) {
            offer_stone(game, chooser);
        }
        if game.rng.chance(0.5) {
            match &LAB_LOOT[game.rng.pick_index(LAB_LOOT.len())] {
                LabLoot::Item(kind) => find_item(game, *kind),
                LabLoot::Cargo(name, value, contraband) => {
                    add_cargo(game, name, *value, *contraband)
                }
            }
        }
        game.rng.chance(0.7)
    }

    fn reactor_room(&mut self, game: &mut GameSession, chooser: &mut dyn Chooser) -> bool {
        if choose(chooser, &Menu::Reactor) == 0 {
            self.sabotaged = true;
            game.events.push(GameEvent::ReactorSabotaged);
            let amount = game.rng.d6() as i64 * 400;
            find_credits(game, amount);
            if game.rng.chance(0.6) {
                find_cargo(game, REACTOR_TECH);
            }
        }
        game.rng.chance(0.5)
    }

    /// Make for the player's own ship. A sabotaged reactor clears the way.
    fn escape(&self, game: &mut GameSession, chooser: &mut dyn Chooser) -> EncounterOutcome {
        if !self.sabotaged && !game.rng.chance(0.6) {
            game.events.push(GameEvent::Detected);
            let enemy = Enemy::boarding_crew(self.source, game.player.heat, game.rng.as_mut());
            if run_combat(game, chooser, enemy) == CombatOutcome::Defeat {
                return EncounterOutcome::GameOver;
            }
        }
        game.events.push(GameEvent::ExitReached);
        apply_heat(&mut game.player, HeatEvent::BoardingSurvived, &mut game.events);
        EncounterOutcome::TractorBeamDungeon
    }
}

/// Stones the player has never seen and does not hold
fn unknown_stones(game: &GameSession) -> Vec<Stone> {
    Stone::ALL
        .iter()
        .copied()
        .filter(|s| !game.player.has_discovered(*s) && !game.player.holds_stone(*s))
        .collect()
}

fn offer_stone(game: &mut GameSession, chooser: &mut dyn Chooser) {
    let available = unknown_stones(game);
    if available.is_empty() {
        return;
    }
    let stone = available[game.rng.pick_index(available.len())];
    game.events.push(GameEvent::StoneSighted { stone });
    if choose(chooser, &Menu::TakeStone { stone }) == 0 {
        info!(stone = stone.name(), "stone taken");
        game.player.collect_stone(stone);
        game.events.push(GameEvent::StoneTaken { stone });
        apply_heat(&mut game.player, HeatEvent::StoneExposed, &mut game.events);
    }
}

fn find_credits(game: &mut GameSession, amount: i64) {
    game.player.credits += amount;
    game.events.push(GameEvent::CreditsFound { amount });
}

fn find_item(game: &mut GameSession, kind: ItemKind) {
    game.player.items.push(CombatItem::new(kind));
    game.events.push(GameEvent::ItemFound {
        item: kind.name().to_string(),
    });
}

fn find_cargo(game: &mut GameSession, table: &[(&'static str, i64, bool)]) {
    let (name, value, contraband) = table[game.rng.pick_index(table.len())];
    add_cargo(game, name, value, contraband);
}

fn add_cargo(game: &mut GameSession, name: &str, value: i64, contraband: bool) {
    game.player
        .inventory
        .push(InventoryEntry::salvage(name, value, contraband));
    game.events.push(GameEvent::CargoFound {
        name: name.to_string(),
        value,
        contraband,
    });
}
