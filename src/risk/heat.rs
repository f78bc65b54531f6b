//! Heat: how hard the law is looking for you
//!
//! Heat only moves through [`apply_heat`] and the two decay rules below.
//! It never drops below 0 and has no upper bound.

use serde::Serialize;

use crate::core::dice::RandomSource;
use crate::core::events::{EventLog, GameEvent};
use crate::entity::enemy::Tier;
use crate::entity::player::Player;

/// Everything that moves the heat meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeatEvent {
    ContractAccepted { illicit: u32, sealed: u32 },
    StoneExposed,
    PoliceEvaded,
    FledPoliceFight,
    LawKilled(Tier),
    BribePaid { hunter: bool },
    BribeFailed,
    CleanSearch,
    CargoStolen,
    CartelEvaded,
    CartelFled,
    CartelDefeated,
    BluffSucceeded,
    Surrendered,
    FledBoarders { cartel: bool },
    BoardingSurvived,
    LayLow(u32),
    DailyDecay(u32),
}

impl HeatEvent {
    /// Signed change this event applies
    pub fn delta(&self) -> i64 {
        match *self {
            Self::ContractAccepted { illicit, sealed } => 5 * illicit as i64 + 10 * sealed as i64,
            Self::StoneExposed => 5,
            Self::PoliceEvaded | Self::FledPoliceFight => 10,
            Self::LawKilled(tier) => kill_heat(tier) as i64,
            Self::BribePaid { hunter: true } => -3,
            Self::BribePaid { hunter: false } => -1,
            Self::BribeFailed => 5,
            Self::CleanSearch => -1,
            Self::CargoStolen => 30,
            Self::CartelEvaded | Self::CartelFled | Self::Surrendered => 15,
            Self::CartelDefeated => 20,
            Self::BluffSucceeded => 5,
            Self::FledBoarders { cartel: true } => 30,
            Self::FledBoarders { cartel: false } => 20,
            Self::BoardingSurvived => 15,
            Self::LayLow(n) | Self::DailyDecay(n) => -(n as i64),
        }
    }
}

/// Heat added for killing a law officer of a tier
pub fn kill_heat(tier: Tier) -> u32 {
    match tier {
        Tier::LocalDeputy => 12,
        Tier::SectorBadge => 18,
        Tier::FederationRanger => 20,
        Tier::GalacticEnforcer => 25,
        Tier::BountyHunter => 30,
    }
}

/// Apply a heat event, clamping at 0. Returns the new heat.
pub fn apply_heat(player: &mut Player, event: HeatEvent, events: &mut EventLog) -> u32 {
    let from = player.heat;
    let to = (from as i64 + event.delta()).clamp(0, u32::MAX as i64) as u32;
    player.heat = to;
    if from != to {
        tracing::debug!(from, to, ?event, "heat changed");
        events.push(GameEvent::HeatChanged {
            from,
            to,
            cause: event,
        });
    }
    to
}

/// Lying low sheds `max(1, floor(heat * U(0.05, 0.15)))` heat. Nothing
/// happens at heat 0. Returns the amount shed.
pub fn lay_low(player: &mut Player, rng: &mut dyn RandomSource, events: &mut EventLog) -> u32 {
    if player.heat == 0 {
        return 0;
    }
    let fraction = rng.uniform(0.05, 0.15);
    let amount = ((player.heat as f64 * fraction) as u32).max(1);
    let before = player.heat;
    apply_heat(player, HeatEvent::LayLow(amount), events);
    before - player.heat
}

/// End-of-day decay: a clean day sheds d6 heat
pub fn daily_decay(player: &mut Player, rng: &mut dyn RandomSource, events: &mut EventLog) -> u32 {
    if player.illegal_activity_today || player.heat == 0 {
        return 0;
    }
    let roll = rng.d6();
    let before = player.heat;
    apply_heat(player, HeatEvent::DailyDecay(roll), events);
    before - player.heat
}
