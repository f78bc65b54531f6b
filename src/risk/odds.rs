//! Probability formulas
//!
//! Pure functions of heat, threat level, ship speed and tier. Callers roll
//! against them with `RandomSource::chance`.

use serde::Serialize;

use crate::entity::enemy::{BeamSource, Tier};

fn speed_steps(speed: u32) -> f64 {
    speed.saturating_sub(1) as f64
}

/// Escape from a running fight
pub fn combat_escape_chance(speed: u32) -> f64 {
    0.10 + speed_steps(speed) * 0.05
}

/// How much a tier's pursuit craft cut into a police chase
pub fn police_evasion_penalty(tier: Tier) -> f64 {
    match tier {
        Tier::LocalDeputy => 0.10,
        Tier::SectorBadge => 0.20,
        Tier::FederationRanger => 0.30,
        Tier::GalacticEnforcer => 0.35,
        Tier::BountyHunter => 0.40,
    }
}

/// Outrunning a patrol before it stops you
pub fn police_escape_chance(speed: u32, tier: Tier) -> f64 {
    (0.3 + speed_steps(speed) * 0.10 - police_evasion_penalty(tier)).max(0.1)
}

/// Chase damage taken on a failed run: (flat, die sides)
pub fn chase_damage(tier: Tier) -> (i32, u32) {
    match tier {
        Tier::LocalDeputy => (10, 6),
        Tier::SectorBadge => (15, 8),
        Tier::FederationRanger => (20, 10),
        Tier::GalacticEnforcer => (25, 12),
        Tier::BountyHunter => (30, 20),
    }
}

/// Bribe price and acceptance chance offered by a patrol
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BribeTerms {
    pub amount: i64,
    pub chance: f64,
}

pub fn bribe_terms(tier: Tier, heat: u32) -> BribeTerms {
    let (base, multiplier, base_chance) = match tier {
        Tier::LocalDeputy => (100, 5, 0.8),
        Tier::SectorBadge => (500, 10, 0.7),
        Tier::FederationRanger => (1_000, 15, 0.5),
        Tier::GalacticEnforcer => (5_000, 20, 0.3),
        Tier::BountyHunter => (10_000, 1_000, 0.6),
    };
    let mut chance = base_chance - heat as f64 / 200.0;
    if tier == Tier::BountyHunter {
        chance = (chance + 0.2).min(0.95);
    }
    BribeTerms {
        amount: base + heat as i64 * multiplier,
        chance,
    }
}

/// Added to the per-crate detection chance of a police search
pub fn search_modifier(tier: Tier) -> f64 {
    match tier {
        Tier::LocalDeputy => 0.0,
        Tier::SectorBadge => 0.05,
        Tier::FederationRanger => 0.10,
        Tier::GalacticEnforcer => 0.15,
        Tier::BountyHunter => 0.20,
    }
}

pub fn police_crate_detection(heat: u32, tier: Tier) -> f64 {
    0.3 + heat as f64 / 100.0 + search_modifier(tier)
}

fn cartel_speed_chance(speed: u32, threat: u32) -> f64 {
    0.3 + speed_steps(speed) * 0.10 - (0.05 * threat as f64).min(0.35)
}

/// Outrunning a cartel crew
pub fn cartel_run_chance(speed: u32, threat: u32) -> f64 {
    cartel_speed_chance(speed, threat).max(0.1)
}

pub fn bluff_chance(threat: u32) -> f64 {
    (0.5 - (0.08 * threat as f64).min(0.45)).max(0.05)
}

pub fn surrender_chance(threat: u32) -> f64 {
    (0.7 - 0.1 * threat as f64).max(0.1)
}

/// Credits taken when a surrender is accepted
pub fn surrender_penalty(credits: i64, threat: u32) -> i64 {
    credits.max(0).min(2_000 * (1 + threat as i64))
}

/// Breaking a tractor beam's lock
pub fn tractor_escape_chance(speed: u32, source: BeamSource) -> f64 {
    let base = match source {
        BeamSource::Cartel => 0.10,
        BeamSource::Federation => 0.15,
        BeamSource::Stones => 0.20,
    };
    base + speed_steps(speed) * 0.05
}

/// Per-travel trigger chance of each tractor-beam source. `None` when the
/// source is not in play at all.
pub fn cartel_beam_chance(threat: u32) -> Option<f64> {
    (threat >= 4).then(|| 0.01 + (threat - 4) as f64 * 0.02)
}

pub fn stones_beam_chance(stones_held: usize) -> Option<f64> {
    (stones_held >= 1).then(|| 0.01 + stones_held as f64 * 0.02)
}

pub fn federation_beam_chance(heat: u32) -> Option<f64> {
    (heat >= 80).then(|| 0.05 + (heat - 80) as f64 * 0.002)
}

/// Weight of the police option in the normal encounter roll
pub fn police_weight(heat: u32) -> f64 {
    (10 + 10 * (heat / 10)) as f64
}

pub const HAZARD_WEIGHT: f64 = 30.0;
pub const PLANET_WEIGHT: f64 = 25.0;

/// Chance that a travel day turns up any encounter
pub fn encounter_chance(sectors: u32, speed: u32) -> f64 {
    0.5 + 0.5 * sectors as f64 / speed.max(1) as f64
}

/// Crews checking your hold after you come out peacefully
pub fn boarding_crate_detection(heat: u32) -> f64 {
    0.4 + heat as f64 / 100.0
}

/// Chance the boarders find you while hiding
pub fn hide_catch_chance(heat: u32) -> f64 {
    0.15 + heat as f64 * 0.003
}

/// Chance you slip out of hiding unseen
pub fn hide_success_chance(heat: u32) -> f64 {
    (0.6 - heat as f64 * 0.005).max(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_local_deputy_bribe_at_zero_heat() {
        let terms = bribe_terms(Tier::LocalDeputy, 0);
        assert_eq!(terms.amount, 100);
        assert!(close(terms.chance, 0.8));
    }

    #[test]
    fn test_hunter_bribe_bonus_capped() {
        let terms = bribe_terms(Tier::BountyHunter, 0);
        assert!(close(terms.chance, 0.8));
        assert_eq!(terms.amount, 10_000);
        let hot = bribe_terms(Tier::BountyHunter, 60);
        assert!(close(hot.chance, 0.5));
        assert_eq!(hot.amount, 70_000);
    }

    #[test]
    fn test_federation_beam_at_heat_90() {
        assert!(close(federation_beam_chance(90).unwrap(), 0.07));
        assert!(federation_beam_chance(79).is_none());
    }

    #[test]
    fn test_beam_gates() {
        assert!(cartel_beam_chance(3).is_none());
        assert!(close(cartel_beam_chance(4).unwrap(), 0.01));
        assert!(close(cartel_beam_chance(6).unwrap(), 0.05));
        assert!(stones_beam_chance(0).is_none());
        assert!(close(stones_beam_chance(2).unwrap(), 0.05));
    }

    #[test]
    fn test_police_escape_floor() {
        assert!(close(police_escape_chance(1, Tier::BountyHunter), 0.1));
        assert!(close(police_escape_chance(1, Tier::LocalDeputy), 0.2));
        assert!(close(police_escape_chance(3, Tier::SectorBadge), 0.3));
    }

    #[test]
    fn test_combat_escape_formula() {
        assert!(close(combat_escape_chance(1), 0.10));
        assert!(close(combat_escape_chance(5), 0.30));
    }

    #[test]
    fn test_cartel_formulas() {
        assert!(close(cartel_run_chance(1, 0), 0.3));
        assert!(close(cartel_run_chance(1, 10), 0.1));
        assert!(close(bluff_chance(0), 0.5));
        assert!(close(bluff_chance(10), 0.05));
        assert!(close(surrender_chance(2), 0.5));
        assert!(close(surrender_chance(9), 0.1));
        assert_eq!(surrender_penalty(10_000, 1), 4_000);
        assert_eq!(surrender_penalty(1_500, 1), 1_500);
    }

    #[test]
    fn test_police_weight_steps_by_ten() {
        assert_eq!(police_weight(0), 10.0);
        assert_eq!(police_weight(19), 20.0);
        assert_eq!(police_weight(90), 100.0);
    }

    #[test]
    fn test_hide_odds() {
        assert!(close(hide_catch_chance(100), 0.45));
        assert!(close(hide_success_chance(0), 0.6));
        assert!(close(hide_success_chance(200), 0.1));
    }
}
