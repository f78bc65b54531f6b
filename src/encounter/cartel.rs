//! Cartel ambush
//!
//! The crew's size and the odds of every non-violent option are fixed by
//! the threat level at the moment the ambush starts.

use tracing::info;

use crate::combat::{run_combat, CombatOutcome};
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::events::GameEvent;
use crate::encounter::EncounterOutcome;
use crate::entity::enemy::Enemy;
use crate::game::GameSession;
use crate::risk::heat::{apply_heat, HeatEvent};
use crate::risk::odds;
use crate::risk::threat::{raise_threat, ThreatEvent};

pub fn run_cartel(game: &mut GameSession, chooser: &mut dyn Chooser) -> EncounterOutcome {
    let threat = game.player.cartel_threat_level;
    let squad = Enemy::cartel_squad(threat);
    info!(threat, crew = squad.len(), "cartel ambush");

    let menu = Menu::CartelStandoff {
        threat,
        crew: squad.iter().map(|e| e.name.clone()).collect(),
    };
    match choose(chooser, &menu) {
        0 => fight(game, chooser, squad),
        1 => run(game, chooser, threat, squad),
        2 => bluff(game, chooser, threat, squad),
        _ => surrender(game, chooser, threat, squad),
    }
}

fn fight(game: &mut GameSession, chooser: &mut dyn Chooser, squad: Vec<Enemy>) -> EncounterOutcome {
    game.player.illegal_activity_today = true;
    for enemy in squad {
        match run_combat(game, chooser, enemy) {
            CombatOutcome::Victory => {}
            CombatOutcome::Defeat => return EncounterOutcome::GameOver,
            CombatOutcome::Escaped => {
                apply_heat(&mut game.player, HeatEvent::CartelFled, &mut game.events);
                raise_threat(&mut game.player, ThreatEvent::CartelFled, &mut game.events);
                return EncounterOutcome::Uneventful;
            }
        }
    }
    info!("cartel crew wiped out");
    apply_heat(&mut game.player, HeatEvent::CartelDefeated, &mut game.events);
    raise_threat(&mut game.player, ThreatEvent::CartelDefeated, &mut game.events);
    EncounterOutcome::Uneventful
}

fn run(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    threat: u32,
    squad: Vec<Enemy>,
) -> EncounterOutcome {
    let chance = odds::cartel_run_chance(game.ship.speed, threat);
    if !game.rng.chance(chance) {
        return fight(game, chooser, squad);
    }
    game.events.push(GameEvent::Evaded);
    apply_heat(&mut game.player, HeatEvent::CartelEvaded, &mut game.events);
    raise_threat(&mut game.player, ThreatEvent::CartelEvaded, &mut game.events);
    EncounterOutcome::Uneventful
}

fn bluff(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    threat: u32,
    squad: Vec<Enemy>,
) -> EncounterOutcome {
    if game.rng.chance(odds::bluff_chance(threat)) {
        game.events.push(GameEvent::BluffSucceeded);
        apply_heat(&mut game.player, HeatEvent::BluffSucceeded, &mut game.events);
        return EncounterOutcome::Uneventful;
    }
    game.events.push(GameEvent::BluffFailed);
    raise_threat(&mut game.player, ThreatEvent::BluffFailed, &mut game.events);
    fight(game, chooser, squad)
}

fn surrender(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    threat: u32,
    squad: Vec<Enemy>,
) -> EncounterOutcome {
    if !game.rng.chance(odds::surrender_chance(threat)) {
        game.events.push(GameEvent::SurrenderRejected);
        raise_threat(
            &mut game.player,
            ThreatEvent::SurrenderRejected,
            &mut game.events,
        );
        return fight(game, chooser, squad);
    }

    if game.player.current_contract.take().is_some() {
        game.events.push(GameEvent::ContractVoided);
    }
    let penalty = odds::surrender_penalty(game.player.credits, threat);
    let lost = game.player.pay(penalty);
    game.events.push(GameEvent::SurrenderAccepted { credits_lost: lost });
    apply_heat(&mut game.player, HeatEvent::Surrendered, &mut game.events);
    EncounterOutcome::Uneventful
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choice::ScriptedChooser;
    use crate::core::config::GameConfig;
    use crate::core::dice::ScriptedRolls;

    fn session(rolls: ScriptedRolls) -> GameSession {
        GameSession::with_rng(&GameConfig::default(), Box::new(rolls))
    }

    #[test]
    fn test_successful_run_raises_heat_and_threat() {
        // 0.1 under the 0.3 run chance at threat 0
        let mut game = session(ScriptedRolls::new([0.1], []));
        let mut chooser = ScriptedChooser::new([1]);
        assert_eq!(run_cartel(&mut game, &mut chooser), EncounterOutcome::Uneventful);
        assert_eq!(game.player.heat, 15);
        assert_eq!(game.player.cartel_threat_level, 1);
    }

    #[test]
    fn test_accepted_surrender_takes_credits_and_contract() {
        let mut game = session(ScriptedRolls::new([0.1], []));
        game.player.credits = 5_000;
        game.player.cartel_threat_level = 1;
        let mut chooser = ScriptedChooser::new([3]);
        assert_eq!(run_cartel(&mut game, &mut chooser), EncounterOutcome::Uneventful);
        // min(5000, 2000 * 2)
        assert_eq!(game.player.credits, 1_000);
        assert_eq!(game.player.heat, 15);
        assert_eq!(game.player.cartel_threat_level, 1);
    }

    #[test]
    fn test_successful_bluff_is_cheap() {
        let mut game = session(ScriptedRolls::new([0.2], []));
        let mut chooser = ScriptedChooser::new([2]);
        assert_eq!(run_cartel(&mut game, &mut chooser), EncounterOutcome::Uneventful);
        assert_eq!(game.player.heat, 5);
        assert_eq!(game.player.cartel_threat_level, 0);
    }

    #[test]
    fn test_failed_bluff_forces_fight() {
        // Bluff fails, then the player flees the thug on the first turn
        let mut game = session(ScriptedRolls::new([0.9, 0.05], []));
        let mut chooser = ScriptedChooser::new([2, 2]);
        assert_eq!(run_cartel(&mut game, &mut chooser), EncounterOutcome::Uneventful);
        // Bluff failure and the flight each add one
        assert_eq!(game.player.cartel_threat_level, 2);
        assert_eq!(game.player.heat, 15);
        assert!(game.player.illegal_activity_today);
    }

    #[test]
    fn test_losing_the_fight_ends_the_game() {
        let mut game = session(ScriptedRolls::new([], []));
        game.player.hp = 5;
        // Keep attacking; the thug hits for at least 10
        let mut chooser = ScriptedChooser::new([0]).with_fallback(0);
        assert_eq!(run_cartel(&mut game, &mut chooser), EncounterOutcome::GameOver);
        assert!(game.is_over());
    }
}
