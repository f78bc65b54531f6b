//! Cartel threat level
//!
//! Each cartel grievance raises the level by exactly one. Nothing in the
//! game lowers it.

use serde::Serialize;

use crate::core::events::{EventLog, GameEvent};
use crate::entity::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThreatEvent {
    CargoStolen,
    ContractConfiscated,
    CartelEvaded,
    CartelFled,
    CartelDefeated,
    BluffFailed,
    SurrenderRejected,
    FledBoarders,
    BoardersDefeated,
}

/// Raise the cartel threat level by one. Returns the new level.
pub fn raise_threat(player: &mut Player, cause: ThreatEvent, events: &mut EventLog) -> u32 {
    player.cartel_threat_level = player.cartel_threat_level.saturating_add(1);
    let level = player.cartel_threat_level;
    tracing::debug!(level, ?cause, "cartel threat raised");
    events.push(GameEvent::ThreatRaised { level, cause });
    level
}
