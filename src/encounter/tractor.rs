//! Tractor-beam boarding
//!
//! Runs as an explicit state machine. Every branch ends in escape, release,
//! a trip through the boarding ship, or death.

use tracing::{debug, info};

use crate::combat::{run_combat, CombatOutcome};
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::events::GameEvent;
use crate::encounter::search::{confiscate, search_ship, SearchOdds};
use crate::encounter::{dungeon, EncounterOutcome};
use crate::entity::enemy::{BeamSource, Enemy};
use crate::game::GameSession;
use crate::risk::heat::{apply_heat, HeatEvent};
use crate::risk::odds;
use crate::risk::threat::{raise_threat, ThreatEvent};

/// Clean searches still end in a cell above this heat
const SUSPICION_HEAT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardingStep {
    Locked,
    BreakAway,
    Boarded,
    Hide { early_warning: bool },
    Search,
    Fight,
    Capture,
    Prison,
    GuardFight,
    Dungeon,
    Done(EncounterOutcome),
}

pub fn run_tractor_beam(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    source: BeamSource,
) -> EncounterOutcome {
    info!(source = source.label(), "tractor beam lock");
    game.events.push(GameEvent::TractorBeamLocked { source });

    let mut step = BoardingStep::Locked;
    loop {
        if game.is_over() {
            return EncounterOutcome::GameOver;
        }
        debug!(?step, "boarding step");
        step = match step {
            BoardingStep::Locked => locked(chooser, source),
            BoardingStep::BreakAway => break_away(game, source),
            BoardingStep::Boarded => boarded(chooser, source),
            BoardingStep::Hide { early_warning } => hide(game, chooser, early_warning),
            BoardingStep::Search => search(game, chooser),
            BoardingStep::Fight => fight(game, chooser, source),
            BoardingStep::Capture => {
                game.events.push(GameEvent::Captured);
                BoardingStep::Prison
            }
            BoardingStep::Prison => prison(game, chooser),
            BoardingStep::GuardFight => match run_combat(game, chooser, Enemy::prison_guard()) {
                CombatOutcome::Defeat => BoardingStep::Done(EncounterOutcome::GameOver),
                _ => BoardingStep::Dungeon,
            },
            BoardingStep::Dungeon => BoardingStep::Done(dungeon::explore(game, chooser, source)),
            BoardingStep::Done(outcome) => return outcome,
        };
    }
}

fn locked(chooser: &mut dyn Chooser, source: BeamSource) -> BoardingStep {
    match choose(chooser, &Menu::TractorBeam { source }) {
        0 => BoardingStep::BreakAway,
        1 => BoardingStep::Hide {
            early_warning: true,
        },
        _ => BoardingStep::Boarded,
    }
}

fn break_away(game: &mut GameSession, source: BeamSource) -> BoardingStep {
    let chance = odds::tractor_escape_chance(game.ship.speed, source);
    if game.rng.chance(chance) {
        game.events.push(GameEvent::Evaded);
        return BoardingStep::Done(EncounterOutcome::Uneventful);
    }
    BoardingStep::Boarded
}

fn boarded(chooser: &mut dyn Chooser, source: BeamSource) -> BoardingStep {
    let pick = choose(chooser, &Menu::Boarded { source });
    match (source, pick) {
        (_, 0) => BoardingStep::Hide {
            early_warning: false,
        },
        (BeamSource::Cartel, _) => BoardingStep::Fight,
        (_, 1) => BoardingStep::Search,
        _ => BoardingStep::Fight,
    }
}

fn hide(game: &mut GameSession, chooser: &mut dyn Chooser, early_warning: bool) -> BoardingStep {
    let crates = game
        .player
        .current_contract
        .as_ref()
        .map_or(0, |c| c.crates.len());
    if crates >= game.ship.max_cargo as usize {
        game.events.push(GameEvent::HoldTooFullToHide);
        return match choose(chooser, &Menu::HoldFull) {
            0 => BoardingStep::Search,
            _ => BoardingStep::Fight,
        };
    }

    let heat = game.player.heat;
    if !early_warning && game.rng.chance(odds::hide_catch_chance(heat)) {
        game.events.push(GameEvent::HidingFailed);
        return match choose(chooser, &Menu::CaughtHiding) {
            0 => BoardingStep::Search,
            _ => BoardingStep::Fight,
        };
    }

    if !game.rng.chance(odds::hide_success_chance(heat)) {
        game.events.push(GameEvent::HidingFailed);
        return BoardingStep::Capture;
    }
    game.events.push(GameEvent::HidingSucceeded);
    match choose(chooser, &Menu::HangarOpportunity) {
        0 => BoardingStep::Dungeon,
        _ => BoardingStep::Done(EncounterOutcome::Uneventful),
    }
}

/// Coming out peacefully. Boarders are thorough and hard to satisfy.
fn search(game: &mut GameSession, chooser: &mut dyn Chooser) -> BoardingStep {
    let odds = SearchOdds::boarding(game.player.heat);
    let findings = search_ship(&game.player, &odds, game.rng.as_mut());

    if !game.player.stones.is_empty() {
        debug!("boarders sensed the stones");
        return BoardingStep::Capture;
    }

    if !findings.is_empty() {
        game.events.push(GameEvent::SearchFoundContraband {
            manifest: findings.manifest(&game.player),
        });
        confiscate(&mut game.player, &findings, &mut game.events);
        return BoardingStep::Capture;
    }

    if game.player.heat > SUSPICION_HEAT || !game.player.stones_discovered.is_empty() {
        return BoardingStep::Capture;
    }

    game.events.push(GameEvent::SearchClean);
    match choose(chooser, &Menu::ReleasedClean) {
        1 => BoardingStep::Fight,
        _ => BoardingStep::Done(EncounterOutcome::Uneventful),
    }
}

fn fight(game: &mut GameSession, chooser: &mut dyn Chooser, source: BeamSource) -> BoardingStep {
    let cartel = source == BeamSource::Cartel;
    let enemy = Enemy::boarding_crew(source, game.player.heat, game.rng.as_mut());
    game.player.illegal_activity_today = true;
    match run_combat(game, chooser, enemy) {
        CombatOutcome::Defeat => BoardingStep::Done(EncounterOutcome::GameOver),
        CombatOutcome::Escaped => {
            apply_heat(
                &mut game.player,
                HeatEvent::FledBoarders { cartel },
                &mut game.events,
            );
            if cartel {
                raise_threat(&mut game.player, ThreatEvent::FledBoarders, &mut game.events);
            }
            BoardingStep::Done(EncounterOutcome::Uneventful)
        }
        CombatOutcome::Victory => {
            if cartel {
                raise_threat(
                    &mut game.player,
                    ThreatEvent::BoardersDefeated,
                    &mut game.events,
                );
            }
            BoardingStep::Dungeon
        }
    }
}

fn prison(game: &mut GameSession, chooser: &mut dyn Chooser) -> BoardingStep {
    match choose(chooser, &Menu::PrisonCell) {
        0 => {
            if game.rng.chance(0.5) {
                game.events.push(GameEvent::PrisonEscape);
                BoardingStep::Dungeon
            } else {
                BoardingStep::GuardFight
            }
        }
        1 => BoardingStep::GuardFight,
        _ => {
            game.events.push(GameEvent::PrisonEscape);
            BoardingStep::Dungeon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choice::ScriptedChooser;
    use crate::core::config::GameConfig;
    use crate::core::dice::ScriptedRolls;
    use crate::entity::player::Stone;

    fn session(rolls: ScriptedRolls) -> GameSession {
        GameSession::with_rng(&GameConfig::default(), Box::new(rolls))
    }

    #[test]
    fn test_breaking_the_lock() {
        // Stones beam: 0.2 escape chance at speed 1
        let mut game = session(ScriptedRolls::new([0.15], []));
        let mut chooser = ScriptedChooser::new([0]);
        let outcome = run_tractor_beam(&mut game, &mut chooser, BeamSource::Stones);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert_eq!(game.player.heat, 0);
    }

    #[test]
    fn test_cartel_boarding_offers_two_options() {
        // Escape fails, then pick the second boarding option
        let mut game = session(ScriptedRolls::new([0.9, 0.01], []));
        let mut chooser = ScriptedChooser::new([0, 1, 2]);
        let outcome = run_tractor_beam(&mut game, &mut chooser, BeamSource::Cartel);
        // Fled the boarders on the first combat turn
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert!(matches!(
            chooser.seen[1],
            Menu::Boarded {
                source: BeamSource::Cartel
            }
        ));
        assert!(matches!(chooser.seen[2], Menu::CombatAction { .. }));
        assert_eq!(game.player.heat, 30);
        assert_eq!(game.player.cartel_threat_level, 1);
    }

    #[test]
    fn test_clean_release_at_low_heat() {
        let mut game = session(ScriptedRolls::new([], []));
        // Pulled in, come out peacefully, then leave
        let mut chooser = ScriptedChooser::new([2, 1, 0]);
        let outcome = run_tractor_beam(&mut game, &mut chooser, BeamSource::Federation);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert!(matches!(chooser.seen[2], Menu::ReleasedClean));
    }

    #[test]
    fn test_known_stones_mean_a_cell() {
        let mut game = session(ScriptedRolls::new([], []));
        game.player.stones_discovered.push(Stone::Soul);
        let mut chooser = ScriptedChooser::new([2, 1]).with_fallback(1);
        let outcome = run_tractor_beam(&mut game, &mut chooser, BeamSource::Federation);
        assert!(game.events.any(|e| matches!(e, GameEvent::Captured)));
        assert!(chooser.seen.iter().any(|m| matches!(m, Menu::PrisonCell)));
        assert!(matches!(
            outcome,
            EncounterOutcome::TractorBeamDungeon | EncounterOutcome::GameOver
        ));
    }

    #[test]
    fn test_early_warning_hide_skips_catch_roll() {
        // Only the 0.6 success roll is taken; 0.5 passes
        let mut game = session(ScriptedRolls::new([0.5], []));
        let mut chooser = ScriptedChooser::new([1, 1]);
        let outcome = run_tractor_beam(&mut game, &mut chooser, BeamSource::Stones);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert!(game.events.any(|e| matches!(e, GameEvent::HidingSucceeded)));
    }
}
