//! Police patrols
//!
//! The patrol's tier is drawn from a heat band. The player can run, which
//! costs chase damage and may end in a stop anyway, or comply. A stop offers
//! a bribe, then a search. Bounty hunters skip the search and open fire.

use tracing::info;

use crate::combat::{run_combat, CombatOutcome};
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::dice::RandomSource;
use crate::core::events::GameEvent;
use crate::encounter::search::{confiscate, search_ship, SearchOdds};
use crate::encounter::{cartel, EncounterOutcome};
use crate::entity::bounty::BountyRoster;
use crate::entity::enemy::{Enemy, EnemyKind, Tier};
use crate::game::endings::Ending;
use crate::game::GameSession;
use crate::risk::heat::{apply_heat, HeatEvent};
use crate::risk::odds;
use crate::risk::threat::{raise_threat, ThreatEvent};

/// Heat band 1-5 used to pick the patrol tier
pub fn heat_band(heat: u32) -> u8 {
    match heat {
        86.. => 5,
        66..=85 => 4,
        41..=65 => 3,
        21..=40 => 2,
        _ => 1,
    }
}

/// Tier weights (percent) for a heat band
pub fn band_distribution(band: u8) -> &'static [(Tier, f64)] {
    match band {
        0 | 1 => &[(Tier::LocalDeputy, 90.0), (Tier::SectorBadge, 10.0)],
        2 => &[
            (Tier::LocalDeputy, 20.0),
            (Tier::SectorBadge, 70.0),
            (Tier::FederationRanger, 10.0),
        ],
        3 => &[
            (Tier::SectorBadge, 20.0),
            (Tier::FederationRanger, 70.0),
            (Tier::GalacticEnforcer, 10.0),
        ],
        4 => &[
            (Tier::FederationRanger, 25.0),
            (Tier::GalacticEnforcer, 65.0),
            (Tier::BountyHunter, 10.0),
        ],
        _ => &[
            (Tier::FederationRanger, 5.0),
            (Tier::GalacticEnforcer, 35.0),
            (Tier::BountyHunter, 60.0),
        ],
    }
}

pub fn select_patrol_tier(heat: u32, rng: &mut dyn RandomSource) -> Tier {
    let table = band_distribution(heat_band(heat));
    let weights: Vec<f64> = table.iter().map(|(_, w)| *w).collect();
    table[rng.weighted_index(&weights)].0
}

/// The enemy that shows up for a tier. Bounty hunters come off the roster.
pub fn spawn_patrol(tier: Tier, roster: &BountyRoster, rng: &mut dyn RandomSource) -> Enemy {
    match tier {
        Tier::BountyHunter => roster.draw(rng),
        _ => Enemy::for_tier(tier),
    }
}

/// Tier an enemy is treated as for chase, bribe and search rules
fn patrol_tier(enemy: &Enemy) -> Tier {
    enemy.tier().unwrap_or(Tier::GalacticEnforcer)
}

pub fn run_police(game: &mut GameSession, chooser: &mut dyn Chooser) -> EncounterOutcome {
    let tier = select_patrol_tier(game.player.heat, game.rng.as_mut());
    let enemy = spawn_patrol(tier, &game.roster, game.rng.as_mut());
    let tier = patrol_tier(&enemy);
    info!(tier = tier.label(), enemy = %enemy.name, "patrol spotted");
    game.events.push(GameEvent::PatrolSpotted {
        tier,
        enemy: enemy.name.clone(),
    });

    let menu = Menu::PolicePatrol {
        tier,
        enemy: enemy.name.clone(),
    };
    match choose(chooser, &menu) {
        0 => run_for_it(game, chooser, enemy),
        _ => pull_over(game, chooser, enemy),
    }
}

fn run_for_it(game: &mut GameSession, chooser: &mut dyn Chooser, enemy: Enemy) -> EncounterOutcome {
    let tier = patrol_tier(&enemy);
    let (flat, sides) = odds::chase_damage(tier);
    let damage = flat + game.rng.die(sides) as i32;
    game.player.take_damage(damage);
    game.events.push(GameEvent::ChaseDamage {
        damage,
        player_hp: game.player.hp,
    });
    if !game.player.is_alive() {
        game.end(Ending::Killed);
        return EncounterOutcome::GameOver;
    }

    if game.rng.chance(odds::police_escape_chance(game.ship.speed, tier)) {
        game.events.push(GameEvent::Evaded);
        apply_heat(&mut game.player, HeatEvent::PoliceEvaded, &mut game.events);
        return EncounterOutcome::Uneventful;
    }
    pull_over(game, chooser, enemy)
}

fn pull_over(game: &mut GameSession, chooser: &mut dyn Chooser, enemy: Enemy) -> EncounterOutcome {
    if offer_bribe(game, chooser, &enemy) {
        return EncounterOutcome::Uneventful;
    }
    search(game, chooser, enemy)
}

/// Returns true if a bribe was paid and accepted
fn offer_bribe(game: &mut GameSession, chooser: &mut dyn Chooser, enemy: &Enemy) -> bool {
    let tier = patrol_tier(enemy);
    let terms = odds::bribe_terms(tier, game.player.heat);
    if terms.amount > game.player.credits {
        game.events.push(GameEvent::BribeUnaffordable {
            amount: terms.amount,
        });
        return false;
    }

    let menu = Menu::Bribe {
        amount: terms.amount,
        credits: game.player.credits,
    };
    if choose(chooser, &menu) != 0 {
        return false;
    }

    // The money is gone either way
    let paid = game.player.pay(terms.amount);
    game.events.push(GameEvent::CreditsLost {
        amount: paid,
        total: game.player.credits,
    });
    if game.rng.chance(terms.chance) {
        game.events.push(GameEvent::BribeAccepted { amount: paid });
        let hunter = tier == Tier::BountyHunter;
        apply_heat(&mut game.player, HeatEvent::BribePaid { hunter }, &mut game.events);
        true
    } else {
        game.events.push(GameEvent::BribeRejected { amount: paid });
        apply_heat(&mut game.player, HeatEvent::BribeFailed, &mut game.events);
        false
    }
}

fn search(game: &mut GameSession, chooser: &mut dyn Chooser, enemy: Enemy) -> EncounterOutcome {
    if matches!(enemy.kind, EnemyKind::Hunter(_)) {
        return fight_patrol(game, chooser, enemy);
    }

    let tier = patrol_tier(&enemy);
    let odds = SearchOdds::police(game.player.heat, tier);
    let findings = search_ship(&game.player, &odds, game.rng.as_mut());
    if findings.is_empty() {
        game.events.push(GameEvent::SearchClean);
        apply_heat(&mut game.player, HeatEvent::CleanSearch, &mut game.events);
        return EncounterOutcome::Uneventful;
    }

    let manifest = findings.manifest(&game.player);
    game.events.push(GameEvent::SearchFoundContraband {
        manifest: manifest.clone(),
    });
    if choose(chooser, &Menu::ContrabandFound { manifest }) != 0 {
        return fight_patrol(game, chooser, enemy);
    }

    if confiscate(&mut game.player, &findings, &mut game.events) {
        raise_threat(
            &mut game.player,
            ThreatEvent::ContractConfiscated,
            &mut game.events,
        );
        if game.rng.chance(0.5) {
            info!("cartel comes to collect on the lost cargo");
            return cartel::run_cartel(game, chooser);
        }
    }
    EncounterOutcome::Uneventful
}

fn fight_patrol(game: &mut GameSession, chooser: &mut dyn Chooser, enemy: Enemy) -> EncounterOutcome {
    let tier = patrol_tier(&enemy);
    let hunter = match enemy.kind {
        EnemyKind::Hunter(h) => Some(h),
        _ => None,
    };
    match run_combat(game, chooser, enemy) {
        CombatOutcome::Defeat => return EncounterOutcome::GameOver,
        CombatOutcome::Escaped => {
            apply_heat(&mut game.player, HeatEvent::FledPoliceFight, &mut game.events);
        }
        CombatOutcome::Victory => {
            if let Some(h) = hunter {
                game.roster.mark_eliminated(h);
            }
            apply_heat(&mut game.player, HeatEvent::LawKilled(tier), &mut game.events);
        }
    }
    game.player.illegal_activity_today = true;
    EncounterOutcome::Uneventful
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choice::ScriptedChooser;
    use crate::core::config::GameConfig;
    use crate::core::dice::{Dice, ScriptedRolls};
    use crate::entity::enemy::Hunter;
    use crate::entity::player::InventoryEntry;

    fn session(rolls: ScriptedRolls) -> GameSession {
        GameSession::with_rng(&GameConfig::default(), Box::new(rolls))
    }

    #[test]
    fn test_heat_bands() {
        assert_eq!(heat_band(0), 1);
        assert_eq!(heat_band(20), 1);
        assert_eq!(heat_band(21), 2);
        assert_eq!(heat_band(40), 2);
        assert_eq!(heat_band(41), 3);
        assert_eq!(heat_band(65), 3);
        assert_eq!(heat_band(66), 4);
        assert_eq!(heat_band(85), 4);
        assert_eq!(heat_band(86), 5);
    }

    #[test]
    fn test_band_weights_sum_to_hundred() {
        for band in 1..=5 {
            let total: f64 = band_distribution(band).iter().map(|(_, w)| w).sum();
            assert!((total - 100.0).abs() < 1e-9, "band {band}");
        }
    }

    #[test]
    fn test_low_heat_is_mostly_deputies() {
        let mut dice = Dice::seeded(21);
        let deputies = (0..5_000)
            .filter(|_| select_patrol_tier(5, &mut dice) == Tier::LocalDeputy)
            .count();
        assert!((4_300..4_700).contains(&deputies), "deputies {deputies}");
    }

    #[test]
    fn test_hunter_patrol_comes_from_roster() {
        let mut roster = BountyRoster::new();
        for h in Hunter::ALL {
            roster.mark_eliminated(h);
        }
        let mut dice = Dice::seeded(1);
        let enemy = spawn_patrol(Tier::BountyHunter, &roster, &mut dice);
        assert_eq!(enemy.name, "Galactic Enforcer");
    }

    #[test]
    fn test_clean_search_cools_heat() {
        // Heat 10: band 1, roll 0.1 picks a deputy
        let mut game = session(ScriptedRolls::new([0.1], []));
        game.player.heat = 10;
        // Comply, refuse the bribe
        let mut chooser = ScriptedChooser::new([1, 1]);
        let outcome = run_police(&mut game, &mut chooser);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert_eq!(game.player.heat, 9);
        assert!(game.events.any(|e| matches!(e, GameEvent::SearchClean)));
    }

    #[test]
    fn test_accepted_bribe_ends_stop() {
        // Deputy, then bribe roll 0.1 under the 0.8 chance
        let mut game = session(ScriptedRolls::new([0.1, 0.1], []));
        game.player.heat = 4;
        let mut chooser = ScriptedChooser::new([1, 0]);
        let outcome = run_police(&mut game, &mut chooser);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        // 100 + 4 * 5
        assert_eq!(game.player.credits, 500 - 120);
        assert_eq!(game.player.heat, 3);
    }

    #[test]
    fn test_unaffordable_bribe_goes_to_search() {
        let mut game = session(ScriptedRolls::new([0.1], []));
        game.player.credits = 50;
        game.player
            .inventory
            .push(InventoryEntry::salvage("Spice Crate", 400, true));
        // Comply, then hand the spice over
        let mut chooser = ScriptedChooser::new([1, 0]);
        let outcome = run_police(&mut game, &mut chooser);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert!(game.player.inventory.is_empty());
        assert!(game
            .events
            .any(|e| matches!(e, GameEvent::BribeUnaffordable { amount: 100 })));
        // No bribe menu was shown
        assert!(!chooser.seen.iter().any(|m| matches!(m, Menu::Bribe { .. })));
    }

    #[test]
    fn test_fatal_chase_ends_game() {
        let mut game = session(ScriptedRolls::new([0.1], [6]));
        game.player.hp = 12;
        let mut chooser = ScriptedChooser::new([0]);
        let outcome = run_police(&mut game, &mut chooser);
        assert_eq!(outcome, EncounterOutcome::GameOver);
        assert!(game.is_over());
        assert_eq!(game.player.hp, 0);
    }

    #[test]
    fn test_successful_run_adds_heat() {
        // Deputy, chase die, escape roll 0.1 under 0.2
        let mut game = session(ScriptedRolls::new([0.1, 0.1], [3]));
        let mut chooser = ScriptedChooser::new([0]);
        let outcome = run_police(&mut game, &mut chooser);
        assert_eq!(outcome, EncounterOutcome::Uneventful);
        assert_eq!(game.player.hp, 87);
        assert_eq!(game.player.heat, 10);
    }
}
