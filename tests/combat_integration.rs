//! Combat integration tests
//!
//! Full fights through the public API, plus property tests for armor
//! mitigation, hp clamping and escape odds.

use proptest::prelude::*;

use star_smuggler::combat::{fight, mitigate, run_combat, CombatOutcome, CombatSession, EnemyTurn};
use star_smuggler::core::choice::{AutoPilot, ScriptedChooser};
use star_smuggler::core::config::{GameConfig, PlayerConfig};
use star_smuggler::core::dice::{Dice, ScriptedRolls};
use star_smuggler::core::events::{EventLog, GameEvent, ItemEffect};
use star_smuggler::entity::enemy::{Enemy, EnemyKind, Tier};
use star_smuggler::entity::items::CombatItem;
use star_smuggler::entity::player::Player;
use star_smuggler::game::{Ending, GameSession};
use star_smuggler::loot::{Armor, Rarity};
use star_smuggler::risk::odds;

fn player() -> Player {
    Player::new(&PlayerConfig::default())
}

fn plating(defense: i32) -> Armor {
    Armor {
        name: "Test Plating",
        defense,
        price: 0,
        is_illegal: false,
        rarity: Rarity::Common,
    }
}

/// 10 damage, 5 armor, a 20 hp enemy hitting for exactly 10
#[test]
fn test_two_round_victory_pays_out() {
    let mut p = player();
    p.armor_item = Some(plating(5));
    let enemy = Enemy::new("Cartel Thug", 20, 10, 10, 150, EnemyKind::Cartel);

    // 0.1 lands inside the 50% no-drop roll
    let mut rolls = ScriptedRolls::new([0.1], []);
    let mut chooser = ScriptedChooser::new([0, 0]);
    let mut log = EventLog::new();
    let outcome = fight(&mut p, enemy, 1, &mut rolls, &mut log, &mut chooser);

    assert_eq!(outcome, CombatOutcome::Victory);
    assert_eq!(p.hp, 95);
    assert_eq!(p.credits, 650);
    let hits: Vec<i32> = log
        .iter()
        .filter_map(|e| match e {
            GameEvent::PlayerAttacked { enemy_hp, .. } => Some(*enemy_hp),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![10, 0]);
}

#[test]
fn test_shield_blocks_exactly_one_attack() {
    let mut p = player();
    p.items.push(CombatItem::shield());
    let mut combat = CombatSession::new(&mut p, Enemy::new("Brute", 80, 40, 40, 0, EnemyKind::Cartel));
    let mut dice = Dice::seeded(2);
    let mut log = EventLog::new();

    assert_eq!(
        combat.use_item(0, &mut dice, &mut log),
        Some(ItemEffect::ShieldRaised)
    );
    assert_eq!(combat.enemy_turn(&mut dice, &mut log), EnemyTurn::Absorbed { raw: 40 });
    assert!(!combat.shield_active);
    assert_eq!(combat.player.hp, 100);

    assert_eq!(
        combat.enemy_turn(&mut dice, &mut log),
        EnemyTurn::Hit { raw: 40, dealt: 40 }
    );
    assert_eq!(combat.player.hp, 60);
}

#[test]
fn test_defeat_ends_the_session() {
    let mut game = GameSession::with_rng(&GameConfig::default(), Box::new(Dice::seeded(9)));
    let enemy = Enemy::new("Executioner", 1_000, 200, 200, 0, EnemyKind::Cartel);
    let mut chooser = ScriptedChooser::new([]);
    let outcome = run_combat(&mut game, &mut chooser, enemy);

    assert_eq!(outcome, CombatOutcome::Defeat);
    assert_eq!(game.ending(), Some(Ending::Killed));
    assert_eq!(game.player.hp, 0);
    assert!(game.lay_low().is_err());
}

#[test]
fn test_autopilot_fights_finish() {
    for seed in 0..50 {
        let mut p = player();
        p.items.push(CombatItem::medkit());
        let mut dice = Dice::seeded(seed);
        let mut log = EventLog::new();
        let outcome = fight(
            &mut p,
            Enemy::for_tier(Tier::SectorBadge),
            1,
            &mut dice,
            &mut log,
            &mut AutoPilot,
        );
        match outcome {
            CombatOutcome::Defeat => assert_eq!(p.hp, 0),
            _ => assert!(p.hp > 0),
        }
        assert!(p.hp <= p.max_hp);
    }
}

proptest! {
    #[test]
    fn prop_mitigation_is_floored_difference(raw in -50i32..500, defense in 0i32..200) {
        prop_assert_eq!(mitigate(raw, defense), (raw - defense).max(0));
    }

    #[test]
    fn prop_shield_absorbs_any_hit(raw in 1i32..1_000, defense in 0i32..50) {
        let mut p = player();
        p.armor_item = Some(plating(defense));
        let mut combat = CombatSession::new(&mut p, Enemy::new("X", 10, 1, 1, 0, EnemyKind::Cartel));
        combat.shield_active = true;
        prop_assert_eq!(combat.receive_hit(raw), 0);
        prop_assert!(!combat.shield_active);
        prop_assert_eq!(combat.player.hp, 100);
    }

    #[test]
    fn prop_hp_stays_in_bounds(changes in proptest::collection::vec(-80i32..80, 1..40)) {
        let mut p = player();
        let mut enemy = Enemy::new("X", 200, 1, 1, 0, EnemyKind::Cartel);
        for delta in changes {
            let before = enemy.hp;
            if delta >= 0 {
                p.heal(delta);
                enemy.take_damage(delta);
            } else {
                p.take_damage(-delta);
                enemy.take_damage(-delta);
            }
            prop_assert!(p.hp >= 0 && p.hp <= p.max_hp);
            prop_assert!(enemy.hp <= before);
            prop_assert!(enemy.hp >= 0);
        }
    }

    #[test]
    fn prop_escape_improves_with_speed(speed in 1u32..20) {
        prop_assert!(odds::combat_escape_chance(speed + 1) >= odds::combat_escape_chance(speed));
        for tier in Tier::ALL {
            prop_assert!(
                odds::police_escape_chance(speed + 1, tier) >= odds::police_escape_chance(speed, tier)
            );
        }
    }

    #[test]
    fn prop_police_escape_harder_against_stronger_tiers(speed in 1u32..20) {
        for pair in Tier::ALL.windows(2) {
            prop_assert!(
                odds::police_escape_chance(speed, pair[1]) <= odds::police_escape_chance(speed, pair[0])
            );
        }
    }
}
