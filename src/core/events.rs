//! Game event log
//!
//! The core never formats text. Everything a presenter might want to show
//! is pushed here as a typed event and drained after each call.

use serde::Serialize;

use crate::contract::CrateTier;
use crate::encounter::dungeon::RoomKind;
use crate::encounter::EncounterKind;
use crate::entity::enemy::{BeamSource, Tier};
use crate::entity::player::Stone;
use crate::game::endings::Ending;
use crate::game::hub::HubKind;
use crate::loot::catalog::Equipment;
use crate::risk::heat::HeatEvent;
use crate::risk::threat::ThreatEvent;

/// What a combat item did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemEffect {
    Healed(i32),
    ShieldRaised,
    Exploded(i32),
    Stunned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    // Combat
    CombatStarted { enemy: String, hp: i32 },
    PlayerAttacked { enemy: String, damage: i32, enemy_hp: i32 },
    ItemUsed { item: String, effect: ItemEffect },
    NoItemsAvailable,
    EscapeAttempted { chance: f64, success: bool },
    EnemyStunned { enemy: String },
    ShieldAbsorbed { enemy: String, raw: i32 },
    EnemyAttacked { enemy: String, raw: i32, dealt: i32, player_hp: i32 },
    EnemyDefeated { enemy: String, credits: i64 },
    EquipmentOffered { item: Equipment },
    EquipmentEquipped { item: Equipment, replaced: Option<Equipment> },
    EquipmentLeft { item: Equipment },
    PlayerDefeated { enemy: String },

    // Risk
    HeatChanged { from: u32, to: u32, cause: HeatEvent },
    ThreatRaised { level: u32, cause: ThreatEvent },
    CreditsGained { amount: i64, total: i64 },
    CreditsLost { amount: i64, total: i64 },

    // Encounters
    EncounterStarted { kind: EncounterKind },
    TractorBeamLocked { source: BeamSource },
    PatrolSpotted { tier: Tier, enemy: String },
    ChaseDamage { damage: i32, player_hp: i32 },
    Evaded,
    BribeUnaffordable { amount: i64 },
    BribeAccepted { amount: i64 },
    BribeRejected { amount: i64 },
    SearchFoundContraband { manifest: Vec<String> },
    SearchClean,
    Confiscated { items: Vec<String> },
    ContractVoided,
    BluffSucceeded,
    BluffFailed,
    SurrenderAccepted { credits_lost: i64 },
    SurrenderRejected,
    DetourTaken { fuel: u32, days: u32 },
    DetourUnaffordable { fuel_needed: u32 },
    HazardImpact { raw: i32, dealt: i32, player_hp: i32 },
    HazardMissed,
    LandedAtHub,
    LandedAtBlackMarket,
    HidingFailed,
    HidingSucceeded,
    HoldTooFullToHide,
    Captured,
    PrisonEscape,
    RoomEntered { room: RoomKind },
    StoneSighted { stone: Stone },
    StoneTaken { stone: Stone },
    CreditsFound { amount: i64 },
    ItemFound { item: String },
    CargoFound { name: String, value: i64, contraband: bool },
    Detected,
    ReactorSabotaged,
    ExitReached,

    // Session
    DayStarted { day: u32, healed: i32 },
    DayEnded { day: u32 },
    TravelStarted { sectors: u32, fuel_cost: u32 },
    Progress { sectors: u32, remaining: u32 },
    HubOpened { kind: HubKind, fuel_price: i64 },
    FuelPurchased { units: u32, cost: i64 },
    ContractAccepted { reward: i64, crates: usize, heat: u32 },
    CrateOpened { tier: CrateTier, contents: String, stone: Option<Stone> },
    ContractDelivered { reward: i64, bonus: i64 },
    ContractStolen { stones: usize, entries: usize },
    DeadlineMissed,
    Ending(Ending),
}

/// Ordered buffer of events since the last drain
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        tracing::trace!(?event, "event");
        self.events.push(event);
    }

    /// Take every pending event
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn any(&self, pred: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
