//! Planetary landing
//!
//! Most planets have a trade hub. The rest run a black market, and being
//! seen there counts as illegal activity for the day.

use crate::core::choice::{choose, Chooser, Menu};
use crate::core::events::GameEvent;
use crate::encounter::EncounterOutcome;
use crate::game::GameSession;

const TRADE_HUB_CHANCE: f64 = 0.7;

pub fn run_planet(game: &mut GameSession, chooser: &mut dyn Chooser) -> EncounterOutcome {
    if choose(chooser, &Menu::Planet) != 0 {
        return EncounterOutcome::Uneventful;
    }

    if game.rng.chance(TRADE_HUB_CHANCE) {
        game.events.push(GameEvent::LandedAtHub);
        game.visit_hub(chooser);
    } else {
        tracing::debug!("landed at a black market");
        game.events.push(GameEvent::LandedAtBlackMarket);
        game.player.illegal_activity_today = true;
    }

    if game.is_over() {
        return EncounterOutcome::GameOver;
    }
    EncounterOutcome::PlanetLanding
}
