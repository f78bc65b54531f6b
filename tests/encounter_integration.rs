//! Encounter selection and resolution integration tests
//!
//! Statistical checks run on seeded dice with large samples and generous
//! tolerances.

use star_smuggler::core::choice::{AutoPilot, ScriptedChooser};
use star_smuggler::core::config::{GameConfig, PlayerConfig};
use star_smuggler::core::dice::{Dice, RandomSource, ScriptedRolls};
use star_smuggler::core::events::GameEvent;
use star_smuggler::encounter::police::{band_distribution, heat_band, select_patrol_tier};
use star_smuggler::encounter::{
    check_tractor_beam, roll_encounter, run_encounter, EncounterKind, EncounterOutcome,
};
use star_smuggler::entity::enemy::{BeamSource, Tier};
use star_smuggler::entity::player::{Player, Stone};
use star_smuggler::game::GameSession;

fn player() -> Player {
    Player::new(&PlayerConfig::default())
}

fn frequency(hits: u32, trials: u32) -> f64 {
    hits as f64 / trials as f64
}

#[test]
fn test_federation_beam_fires_about_seven_percent_at_heat_90() {
    let mut p = player();
    p.heat = 90;
    let mut dice = Dice::seeded(90);
    let trials = 100_000;
    let hits = (0..trials)
        .filter(|_| check_tractor_beam(&p, &mut dice) == Some(BeamSource::Federation))
        .count() as u32;
    let freq = frequency(hits, trials);
    assert!((freq - 0.07).abs() < 0.005, "federation beam frequency {freq}");
}

#[test]
fn test_cartel_beam_takes_priority() {
    let mut p = player();
    p.cartel_threat_level = 10;
    p.heat = 100;
    p.collect_stone(Stone::Mind);
    // A zero roll fires whichever trigger is checked first
    let mut rolls = ScriptedRolls::new([], []).with_fallback(0.0);
    assert_eq!(check_tractor_beam(&p, &mut rolls), Some(BeamSource::Cartel));

    p.cartel_threat_level = 0;
    assert_eq!(check_tractor_beam(&p, &mut rolls), Some(BeamSource::Stones));
}

#[test]
fn test_calm_player_never_sees_a_beam() {
    let p = player();
    let mut dice = Dice::seeded(3);
    for _ in 0..10_000 {
        let kind = roll_encounter(&p, &mut dice);
        assert!(!matches!(kind, EncounterKind::TractorBeam(_)));
    }
}

#[test]
fn test_standard_roll_weights_at_zero_heat() {
    // Police 10, hazard 30, planet 25
    let p = player();
    let mut dice = Dice::seeded(11);
    let trials = 65_000;
    let mut police = 0;
    let mut hazard = 0;
    for _ in 0..trials {
        match roll_encounter(&p, &mut dice) {
            EncounterKind::Police => police += 1,
            EncounterKind::Hazard => hazard += 1,
            _ => {}
        }
    }
    assert!((frequency(police, trials) - 10.0 / 65.0).abs() < 0.01);
    assert!((frequency(hazard, trials) - 30.0 / 65.0).abs() < 0.01);
}

#[test]
fn test_patrol_tiers_follow_heat_bands() {
    assert_eq!(heat_band(0), 1);
    assert_eq!(heat_band(40), 2);
    assert_eq!(heat_band(65), 3);
    assert_eq!(heat_band(85), 4);
    assert_eq!(heat_band(200), 5);

    let mut dice = Dice::seeded(17);
    let trials = 50_000;
    let hunters = (0..trials)
        .filter(|_| select_patrol_tier(95, &mut dice) == Tier::BountyHunter)
        .count() as u32;
    assert!((frequency(hunters, trials) - 0.60).abs() < 0.01);

    for band in 1..=5 {
        let total: f64 = band_distribution(band).iter().map(|(_, w)| w).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_weighted_selection_converges() {
    let weights = [1.0, 3.0, 6.0];
    let mut dice = Dice::seeded(5);
    let trials = 100_000;
    let mut counts = [0u32; 3];
    for _ in 0..trials {
        counts[dice.weighted_index(&weights)] += 1;
    }
    for (count, w) in counts.iter().zip(weights) {
        assert!((frequency(*count, trials) - w / 10.0).abs() < 0.01);
    }
    assert_eq!(dice.weighted_index(&[0.0, 0.0, 0.0]), 2);
}

#[test]
fn test_every_encounter_kind_resolves_under_autopilot() {
    let kinds = [
        EncounterKind::Police,
        EncounterKind::Hazard,
        EncounterKind::Planet,
        EncounterKind::Cartel,
        EncounterKind::TractorBeam(BeamSource::Cartel),
        EncounterKind::TractorBeam(BeamSource::Stones),
        EncounterKind::TractorBeam(BeamSource::Federation),
    ];
    for seed in 0..40 {
        for kind in kinds {
            let mut game = GameSession::with_rng(&GameConfig::default(), Box::new(Dice::seeded(seed)));
            game.ship.fuel = 10;
            game.player.heat = 45;
            let outcome = run_encounter(&mut game, &mut AutoPilot, kind);
            assert_eq!(outcome == EncounterOutcome::GameOver, game.is_over(), "{kind:?} seed {seed}");
            assert!(game.player.hp >= 0 && game.player.hp <= game.player.max_hp);
            assert!(game
                .events
                .any(|e| matches!(e, GameEvent::EncounterStarted { kind: k } if *k == kind)));
        }
    }
}

#[test]
fn test_bounty_hunters_stay_dead_within_a_session() {
    let mut game = GameSession::with_rng(&GameConfig::default(), Box::new(Dice::seeded(1)));
    let first = game.roster.draw(game.rng.as_mut());
    let hunter = match first.kind {
        star_smuggler::entity::enemy::EnemyKind::Hunter(h) => h,
        other => panic!("roster drew {other:?}"),
    };
    game.roster.mark_eliminated(hunter);
    for _ in 0..200 {
        let drawn = game.roster.draw(game.rng.as_mut());
        assert_ne!(drawn.name, first.name);
    }

    // A fresh session has its own roster
    let other = GameSession::with_rng(&GameConfig::default(), Box::new(Dice::seeded(1)));
    assert!(!other.roster.is_eliminated(hunter));
}

#[test]
fn test_planet_pass_is_uneventful() {
    let mut game = GameSession::with_rng(&GameConfig::default(), Box::new(Dice::seeded(4)));
    let mut chooser = ScriptedChooser::new([1]);
    let outcome = run_encounter(&mut game, &mut chooser, EncounterKind::Planet);
    assert_eq!(outcome, EncounterOutcome::Uneventful);
    assert!(outcome.makes_progress());
}
