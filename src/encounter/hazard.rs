//! Asteroid fields
//!
//! Going around costs fuel and days but is safe. Going through is free
//! unless a rock hits, and a hit can kill.

use tracing::{debug, warn};

use crate::combat::mitigate;
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::events::GameEvent;
use crate::encounter::EncounterOutcome;
use crate::game::endings::Ending;
use crate::game::GameSession;

const HIT_CHANCE: f64 = 0.7;

/// Times the player may pick a detour they cannot afford before the ship
/// goes straight through
const MAX_DETOUR_PROMPTS: u32 = 8;

pub fn run_hazard(game: &mut GameSession, chooser: &mut dyn Chooser) -> EncounterOutcome {
    for _ in 0..MAX_DETOUR_PROMPTS {
        if choose(chooser, &Menu::AsteroidField) != 0 {
            return go_through(game);
        }
        let fuel = game.rng.d6() / 2 + 1;
        let days = game.rng.d6() / 2;
        if game.ship.fuel < fuel {
            game.events.push(GameEvent::DetourUnaffordable { fuel_needed: fuel });
            continue;
        }
        game.ship.fuel -= fuel;
        game.day += days;
        debug!(fuel, days, "detour around asteroid field");
        game.events.push(GameEvent::DetourTaken { fuel, days });
        return EncounterOutcome::HazardAvoided;
    }
    warn!("no affordable detour chosen, flying through");
    go_through(game)
}

fn go_through(game: &mut GameSession) -> EncounterOutcome {
    if !game.rng.chance(HIT_CHANCE) {
        game.events.push(GameEvent::HazardMissed);
        return EncounterOutcome::Uneventful;
    }
    let raw = (game.rng.d20() + game.rng.d20() + 10) as i32;
    let dealt = mitigate(raw, game.player.armor_defense());
    game.player.take_damage(dealt);
    game.events.push(GameEvent::HazardImpact {
        raw,
        dealt,
        player_hp: game.player.hp,
    });
    if !game.player.is_alive() {
        game.end(Ending::Killed);
        return EncounterOutcome::GameOver;
    }
    EncounterOutcome::Uneventful
}
