//! Encounter selection
//!
//! Tractor beams are checked first, in priority order cartel, stones,
//! federation. The first trigger that fires wins. Otherwise one of police,
//! hazard or planet is drawn by weight, with police weight growing with heat.

use crate::core::dice::RandomSource;
use crate::encounter::EncounterKind;
use crate::entity::enemy::BeamSource;
use crate::entity::player::Player;
use crate::risk::odds;

/// Roll each tractor-beam trigger in priority order
pub fn check_tractor_beam(player: &Player, rng: &mut dyn RandomSource) -> Option<BeamSource> {
    let triggers = [
        (BeamSource::Cartel, odds::cartel_beam_chance(player.cartel_threat_level)),
        (BeamSource::Stones, odds::stones_beam_chance(player.stones.len())),
        (BeamSource::Federation, odds::federation_beam_chance(player.heat)),
    ];
    for (source, chance) in triggers {
        if let Some(p) = chance {
            if rng.chance(p) {
                tracing::debug!(?source, p, "tractor beam triggered");
                return Some(source);
            }
        }
    }
    None
}

/// Normal weighted roll between police, hazard and planet
pub fn roll_standard(heat: u32, rng: &mut dyn RandomSource) -> EncounterKind {
    let options = [
        (EncounterKind::Police, odds::police_weight(heat)),
        (EncounterKind::Hazard, odds::HAZARD_WEIGHT),
        (EncounterKind::Planet, odds::PLANET_WEIGHT),
    ];
    let weights: Vec<f64> = options.iter().map(|(_, w)| *w).collect();
    options[rng.weighted_index(&weights)].0
}

/// Pick the encounter for one travel day
pub fn roll_encounter(player: &Player, rng: &mut dyn RandomSource) -> EncounterKind {
    match check_tractor_beam(player, rng) {
        Some(source) => EncounterKind::TractorBeam(source),
        None => roll_standard(player.heat, rng),
    }
}
