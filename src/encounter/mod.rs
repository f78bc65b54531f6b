//! Travel encounters
//!
//! The selector picks one encounter per travel day. Each encounter runs to
//! an [`EncounterOutcome`], which tells the day loop whether the ship kept
//! moving toward its destination.

pub mod cartel;
pub mod dungeon;
pub mod hazard;
pub mod planet;
pub mod police;
pub mod search;
pub mod selector;
pub mod tractor;

use serde::Serialize;

use crate::core::choice::Chooser;
use crate::core::events::GameEvent;
use crate::entity::enemy::BeamSource;
use crate::game::GameSession;

pub use selector::{check_tractor_beam, roll_encounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncounterKind {
    Police,
    Hazard,
    Planet,
    Cartel,
    TractorBeam(BeamSource),
}

impl EncounterKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Police => "police",
            Self::Hazard => "hazard",
            Self::Planet => "planet",
            Self::Cartel => "cartel",
            Self::TractorBeam(BeamSource::Cartel) => "tractor_beam_cartel",
            Self::TractorBeam(BeamSource::Stones) => "tractor_beam_stones",
            Self::TractorBeam(BeamSource::Federation) => "tractor_beam_federation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncounterOutcome {
    Uneventful,
    /// Landed somewhere, so no progress this day
    PlanetLanding,
    /// Took the long way around a hazard
    HazardAvoided,
    /// Survived a boarding and found your way back
    TractorBeamDungeon,
    GameOver,
}

impl EncounterOutcome {
    /// Whether the day still counts toward the contract distance
    pub fn makes_progress(&self) -> bool {
        matches!(self, Self::Uneventful)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Uneventful => "uneventful",
            Self::PlanetLanding => "planet_landing",
            Self::HazardAvoided => "hazard_avoided",
            Self::TractorBeamDungeon => "tractor_beam_dungeon",
            Self::GameOver => "game_over",
        }
    }
}

/// Run one specific encounter
pub fn run_encounter(
    game: &mut GameSession,
    chooser: &mut dyn Chooser,
    kind: EncounterKind,
) -> EncounterOutcome {
    tracing::info!(kind = kind.label(), heat = game.player.heat, "encounter");
    game.events.push(GameEvent::EncounterStarted { kind });
    let outcome = match kind {
        EncounterKind::Police => police::run_police(game, chooser),
        EncounterKind::Hazard => hazard::run_hazard(game, chooser),
        EncounterKind::Planet => planet::run_planet(game, chooser),
        EncounterKind::Cartel => cartel::run_cartel(game, chooser),
        EncounterKind::TractorBeam(source) => tractor::run_tractor_beam(game, chooser, source),
    };
    if game.is_over() {
        return EncounterOutcome::GameOver;
    }
    outcome
}

/// Pick and run the encounter for a travel day
pub fn run_random_encounter(game: &mut GameSession, chooser: &mut dyn Chooser) -> EncounterOutcome {
    let kind = roll_encounter(&game.player, game.rng.as_mut());
    run_encounter(game, chooser, kind)
}
