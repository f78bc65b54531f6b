//! Turn loop: player turn, enemy turn, repeat until someone is done
//!
//! Victory pays the enemy's reward and rolls a drop. Defeat is fatal and
//! ends the whole game. Escape returns with nothing, and callers apply their
//! own penalties for fleeing.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::combat::session::CombatSession;
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::dice::RandomSource;
use crate::core::events::{EventLog, GameEvent};
use crate::entity::enemy::Enemy;
use crate::entity::player::Player;
use crate::game::endings::Ending;
use crate::game::GameSession;
use crate::loot::catalog::Equipment;
use crate::loot::drops::enemy_drop;

/// Re-prompts allowed before the engine attacks on the player's behalf
const MAX_IDLE_PROMPTS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Escaped,
}

enum PlayerMove {
    Acted,
    Escaped,
}

/// Fight an enemy inside a game session. Defeat ends the game.
pub fn run_combat(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    enemy: Enemy,
) -> CombatOutcome {
    let speed = game.ship.speed;
    let outcome = fight(
        &mut game.player,
        enemy,
        speed,
        game.rng.as_mut(),
        &mut game.events,
        chooser,
    );
    if outcome == CombatOutcome::Defeat {
        game.end(Ending::Killed);
    }
    outcome
}

/// Run a fight to its terminal outcome
pub fn fight(
    player: &mut Player,
    enemy: Enemy,
    speed: u32,
    rng: &mut dyn RandomSource,
    events: &mut EventLog,
    chooser: &mut dyn Chooser,
) -> CombatOutcome {
    info!(enemy = %enemy.name, hp = enemy.hp, "combat started");
    events.push(GameEvent::CombatStarted {
        enemy: enemy.name.clone(),
        hp: enemy.hp,
    });

    let mut combat = CombatSession::new(player, enemy);
    loop {
        if let PlayerMove::Escaped = player_turn(&mut combat, speed, rng, events, chooser) {
            info!(enemy = %combat.enemy.name, "escaped combat");
            return CombatOutcome::Escaped;
        }
        if !combat.enemy.is_alive() {
            break;
        }

        combat.enemy_turn(rng, events);
        if !combat.player.is_alive() {
            info!(enemy = %combat.enemy.name, "player defeated");
            events.push(GameEvent::PlayerDefeated {
                enemy: combat.enemy.name.clone(),
            });
            return CombatOutcome::Defeat;
        }
    }

    let CombatSession { player, enemy, .. } = combat;
    claim_victory(player, &enemy, rng, events, chooser);
    CombatOutcome::Victory
}

fn player_turn(
    combat: &mut CombatSession<'_>,
    speed: u32,
    rng: &mut dyn RandomSource,
    events: &mut EventLog,
    chooser: &mut dyn Chooser,
) -> PlayerMove {
    for _ in 0..MAX_IDLE_PROMPTS {
        let menu = Menu::CombatAction {
            enemy: combat.enemy.name.clone(),
            enemy_hp: combat.enemy.hp,
            player_hp: combat.player.hp,
            max_hp: combat.player.max_hp,
            shield_active: combat.shield_active,
            items: combat.player.items.len(),
        };
        match choose(chooser, &menu) {
            0 => {
                combat.player_attack(events);
                return PlayerMove::Acted;
            }
            1 => {
                if combat.player.items.is_empty() {
                    events.push(GameEvent::NoItemsAvailable);
                    continue;
                }
                let menu = Menu::CombatItem {
                    items: combat.player.items.iter().map(|i| i.name.clone()).collect(),
                };
                let pick = choose(chooser, &menu);
                if combat.use_item(pick, rng, events).is_some() {
                    return PlayerMove::Acted;
                }
                // Cancelled, ask again
            }
            _ => {
                if combat.attempt_escape(speed, rng, events) {
                    return PlayerMove::Escaped;
                }
                return PlayerMove::Acted;
            }
        }
    }
    warn!("no combat action chosen, attacking");
    combat.player_attack(events);
    PlayerMove::Acted
}

fn claim_victory(
    player: &mut Player,
    enemy: &Enemy,
    rng: &mut dyn RandomSource,
    events: &mut EventLog,
    chooser: &mut dyn Chooser,
) {
    player.credits += enemy.credits_reward;
    info!(enemy = %enemy.name, reward = enemy.credits_reward, "enemy defeated");
    events.push(GameEvent::EnemyDefeated {
        enemy: enemy.name.clone(),
        credits: enemy.credits_reward,
    });
    if let Some(item) = enemy_drop(enemy, rng) {
        offer_equipment(player, item, events, chooser);
    }
}

/// Show a piece of gear next to what is equipped in its slot and let the
/// player take or leave it. Returns true if it was equipped.
pub fn offer_equipment(
    player: &mut Player,
    item: Equipment,
    events: &mut EventLog,
    chooser: &mut dyn Chooser,
) -> bool {
    events.push(GameEvent::EquipmentOffered { item });
    let menu = Menu::TakeEquipment {
        offered: item,
        current: player.equipped_in_slot(&item),
    };
    if choose(chooser, &menu) == 0 {
        let replaced = player.equip(item);
        debug!(item = item.name(), "equipped");
        events.push(GameEvent::EquipmentEquipped { item, replaced });
        true
    } else {
        events.push(GameEvent::EquipmentLeft { item });
        false
    }
}
