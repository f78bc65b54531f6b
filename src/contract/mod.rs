//! Cargo contracts
//!
//! A contract is a handful of crates, a distance to fly and a deadline.
//! Crates stay sealed until arrival. Illicit and sealed crates draw heat the
//! moment the contract is signed, and sealed crates usually hold a stone.

use serde::Serialize;

use crate::core::dice::RandomSource;
use crate::core::events::{EventLog, GameEvent};
use crate::entity::player::{InventoryEntry, Player, Stone};
use crate::risk::heat::{apply_heat, HeatEvent};
use crate::risk::threat::{raise_threat, ThreatEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CrateTier {
    Legit,
    Illicit,
    Sealed,
}

impl CrateTier {
    /// d100: 1-50 legit, 51-75 illicit, 76-100 sealed
    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        match rng.d100() {
            0..=50 => Self::Legit,
            51..=75 => Self::Illicit,
            _ => Self::Sealed,
        }
    }

    /// Credits per pip of the d6 value roll
    pub fn value_step(&self) -> i64 {
        match self {
            Self::Legit => 100,
            Self::Illicit => 500,
            Self::Sealed => 1_000,
        }
    }

    pub fn stone_chance(&self) -> f64 {
        match self {
            Self::Legit => 0.05,
            Self::Illicit => 0.10,
            Self::Sealed => 0.85,
        }
    }

    pub fn is_contraband(&self) -> bool {
        !matches!(self, Self::Legit)
    }

    fn manifest(&self) -> &'static [&'static str] {
        match self {
            Self::Legit => &[
                "Medical Supplies",
                "Food Rations",
                "Spare Parts",
                "Construction Materials",
                "Scientific Equipment",
            ],
            Self::Illicit => &[
                "Smuggled Weapons",
                "Illegal Cybernetics",
                "Restricted Biotech",
                "Black Market AI",
                "Forbidden Artifacts",
            ],
            Self::Sealed => &[
                "Experimental Quantum Core",
                "Ancient Alien Relic",
                "Prototype Warp Drive",
                "Crystalline Power Matrix",
                "Temporal Stabilizer",
                "Strange Device",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Legit => "Legit",
            Self::Illicit => "Illicit",
            Self::Sealed => "Sealed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crate {
    pub tier: CrateTier,
    pub value: i64,
    pub opened: bool,
    pub contents: Option<String>,
    pub stone: Option<Stone>,
}

impl Crate {
    pub fn new(tier: CrateTier, rng: &mut dyn RandomSource) -> Self {
        Self {
            tier,
            value: rng.d6() as i64 * tier.value_step(),
            opened: false,
            contents: None,
            stone: None,
        }
    }

    /// Open the crate. A stone can only be one not in `unavailable`; with
    /// nothing left the crate holds ordinary cargo. Returns the stone found.
    pub fn open(&mut self, unavailable: &[Stone], rng: &mut dyn RandomSource) -> Option<Stone> {
        if self.opened {
            return None;
        }
        self.opened = true;

        if rng.chance(self.tier.stone_chance()) {
            let available: Vec<Stone> = Stone::ALL
                .iter()
                .copied()
                .filter(|s| !unavailable.contains(s))
                .collect();
            if !available.is_empty() {
                let stone = available[rng.pick_index(available.len())];
                self.stone = Some(stone);
                self.contents = Some(stone.name().to_string());
                self.value = rng.range_inclusive(5, 10) * 10_000;
                return Some(stone);
            }
        }

        let manifest = self.tier.manifest();
        self.contents = Some(manifest[rng.pick_index(manifest.len())].to_string());
        None
    }

    pub fn contents_label(&self) -> String {
        self.contents
            .clone()
            .unwrap_or_else(|| format!("{} Crate", self.tier.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contract {
    pub crates: Vec<Crate>,
    pub distance: u32,
    /// Days left. Counts down once per day spent away from the destination.
    pub deadline: u32,
    pub sectors_traveled: u32,
    /// Multiplier fixed at signing from how tight the deadline is
    pub deadline_multiplier: f64,
    pub reward: i64,
}

impl Contract {
    /// A new contract of 1 to `max_crates` crates
    pub fn generate(max_crates: u32, rng: &mut dyn RandomSource) -> Self {
        let distance = rng.d6() + 2;
        let deadline = distance.max(rng.d6() + 4);
        let count = rng.range_inclusive(1, max_crates.max(1) as i64) as usize;
        let crates: Vec<Crate> = (0..count)
            .map(|_| {
                let tier = CrateTier::roll(rng);
                Crate::new(tier, rng)
            })
            .collect();
        let deadline_multiplier = Self::multiplier_for(deadline - distance);
        let mut contract = Self {
            crates,
            distance,
            deadline,
            sectors_traveled: 0,
            deadline_multiplier,
            reward: 0,
        };
        contract.recalculate_reward();
        contract
    }

    /// `max(1, 1.5 - 0.25 * spare_days)`
    pub fn multiplier_for(spare_days: u32) -> f64 {
        (1.5 - spare_days as f64 * 0.25).max(1.0)
    }

    pub fn crate_value(&self) -> i64 {
        self.crates.iter().map(|c| c.value).sum()
    }

    pub fn recalculate_reward(&mut self) {
        self.reward = (self.crate_value() as f64 * self.deadline_multiplier) as i64;
    }

    pub fn is_illegal(&self) -> bool {
        self.crates.iter().any(|c| c.tier.is_contraband())
    }

    /// Sealed cargo hides the payout until delivery
    pub fn reward_hidden(&self) -> bool {
        self.crates.iter().any(|c| c.tier == CrateTier::Sealed)
    }

    pub fn count(&self, tier: CrateTier) -> u32 {
        self.crates.iter().filter(|c| c.tier == tier).count() as u32
    }

    pub fn heat_event(&self) -> HeatEvent {
        HeatEvent::ContractAccepted {
            illicit: self.count(CrateTier::Illicit),
            sealed: self.count(CrateTier::Sealed),
        }
    }

    /// Heat added by signing
    pub fn heat_risk(&self) -> u32 {
        self.heat_event().delta().max(0) as u32
    }

    pub fn remaining(&self) -> u32 {
        self.distance.saturating_sub(self.sectors_traveled)
    }

    pub fn is_at_destination(&self) -> bool {
        self.sectors_traveled >= self.distance
    }

    /// Move up to `sectors` closer. Returns sectors actually covered.
    pub fn advance(&mut self, sectors: u32) -> u32 {
        let step = sectors.min(self.remaining());
        self.sectors_traveled += step;
        step
    }

    /// Burn a day off the deadline. `false` once the deadline had already
    /// run out.
    pub fn tick_deadline(&mut self) -> bool {
        if self.deadline == 0 {
            return false;
        }
        self.deadline -= 1;
        true
    }

    /// 5% of the reward for every day to spare
    pub fn early_bonus(&self) -> i64 {
        (self.reward as f64 * 0.05 * self.deadline as f64) as i64
    }

    /// Open every crate, skipping stones already discovered or already
    /// found elsewhere in this contract. Returns the stones revealed.
    pub fn open_crates(&mut self, discovered: &[Stone], rng: &mut dyn RandomSource) -> Vec<Stone> {
        let mut seen: Vec<Stone> = discovered.to_vec();
        let mut found = Vec::new();
        for c in &mut self.crates {
            if let Some(stone) = c.open(&seen, rng) {
                seen.push(stone);
                found.push(stone);
            }
        }
        found
    }

    pub fn stones(&self) -> Vec<Stone> {
        self.crates.iter().filter_map(|c| c.stone).collect()
    }

    /// Bonus already folded into `reward` by `reveal_cargo`
    fn early_bonus_paid(&self) -> i64 {
        let base = (self.crate_value() as f64 * self.deadline_multiplier) as i64;
        (self.reward - base).max(0)
    }
}

/// Sign a contract: apply its heat and make it current
pub fn accept(player: &mut Player, contract: Contract, events: &mut EventLog) -> u32 {
    let heat = contract.heat_risk();
    events.push(GameEvent::ContractAccepted {
        reward: contract.reward,
        crates: contract.crates.len(),
        heat,
    });
    apply_heat(player, contract.heat_event(), events);
    player.current_contract = Some(contract);
    heat
}

/// Open the crates at the destination, record any stones and settle the
/// final payout including the early bonus. Returns the payout.
pub fn reveal_cargo(player: &mut Player, rng: &mut dyn RandomSource, events: &mut EventLog) -> i64 {
    let Some(mut contract) = player.current_contract.take() else {
        return 0;
    };
    let stones = contract.open_crates(&player.stones_discovered, rng);
    for c in &contract.crates {
        events.push(GameEvent::CrateOpened {
            tier: c.tier,
            contents: c.contents_label(),
            stone: c.stone,
        });
    }
    for stone in stones {
        player.discover_stone(stone);
        apply_heat(player, HeatEvent::StoneExposed, events);
    }
    contract.recalculate_reward();
    contract.reward += contract.early_bonus();
    let payout = contract.reward;
    player.current_contract = Some(contract);
    payout
}

/// Hand the cargo over and get paid
pub fn deliver(player: &mut Player, events: &mut EventLog) -> i64 {
    let Some(contract) = player.current_contract.take() else {
        return 0;
    };
    let bonus = contract.early_bonus_paid();
    player.credits += contract.reward;
    tracing::info!(reward = contract.reward, "contract delivered");
    events.push(GameEvent::ContractDelivered {
        reward: contract.reward,
        bonus,
    });
    contract.reward
}

/// Keep the cargo: stones into the hold, everything else into inventory.
/// Raises heat and cartel threat.
pub fn steal(player: &mut Player, events: &mut EventLog) {
    let Some(contract) = player.current_contract.take() else {
        return;
    };
    apply_heat(player, HeatEvent::CargoStolen, events);
    player.illegal_activity_today = true;

    let mut stones = 0;
    let mut entries = 0;
    for c in contract.crates {
        if let Some(stone) = c.stone {
            player.collect_stone(stone);
            stones += 1;
        } else {
            let name = c.contents.unwrap_or_else(|| format!("{} Crate", c.tier.label()));
            player
                .inventory
                .push(InventoryEntry::stolen(name, c.value, c.tier.is_contraband()));
            entries += 1;
        }
    }
    tracing::info!(stones, entries, "contract cargo stolen");
    events.push(GameEvent::ContractStolen { stones, entries });
    raise_threat(player, ThreatEvent::CargoStolen, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PlayerConfig;
    use crate::core::dice::{Dice, ScriptedRolls};

    fn player() -> Player {
        Player::new(&PlayerConfig::default())
    }

    fn crate_of(tier: CrateTier, value: i64) -> Crate {
        Crate {
            tier,
            value,
            opened: false,
            contents: None,
            stone: None,
        }
    }

    fn contract(crates: Vec<Crate>, distance: u32, deadline: u32) -> Contract {
        let mut c = Contract {
            crates,
            distance,
            deadline,
            sectors_traveled: 0,
            deadline_multiplier: Contract::multiplier_for(deadline - distance),
            reward: 0,
        };
        c.recalculate_reward();
        c
    }

    #[test]
    fn test_generated_contracts_are_feasible() {
        let mut dice = Dice::seeded(31);
        for _ in 0..500 {
            let c = Contract::generate(3, &mut dice);
            assert!((3..=8).contains(&c.distance));
            assert!(c.deadline >= c.distance);
            assert!((1..=3).contains(&c.crates.len()));
            assert!(c.reward >= c.crate_value());
        }
    }

    #[test]
    fn test_multiplier_rewards_tight_deadlines() {
        assert_eq!(Contract::multiplier_for(0), 1.5);
        assert_eq!(Contract::multiplier_for(1), 1.25);
        assert_eq!(Contract::multiplier_for(5), 1.0);
    }

    #[test]
    fn test_heat_risk_counts_tiers() {
        let c = contract(
            vec![
                crate_of(CrateTier::Legit, 100),
                crate_of(CrateTier::Illicit, 500),
                crate_of(CrateTier::Sealed, 1_000),
            ],
            4,
            6,
        );
        assert_eq!(c.heat_risk(), 15);
        assert!(c.is_illegal());
        assert!(c.reward_hidden());
    }

    #[test]
    fn test_accept_applies_heat() {
        let mut p = player();
        let mut log = EventLog::new();
        let c = contract(vec![crate_of(CrateTier::Sealed, 3_000)], 4, 4);
        assert_eq!(accept(&mut p, c, &mut log), 10);
        assert_eq!(p.heat, 10);
        assert!(p.current_contract.is_some());
    }

    #[test]
    fn test_advance_clamps_to_destination() {
        let mut c = contract(vec![crate_of(CrateTier::Legit, 100)], 3, 5);
        assert_eq!(c.advance(2), 2);
        assert_eq!(c.advance(5), 1);
        assert!(c.is_at_destination());
    }

    #[test]
    fn test_deadline_ticks_down_then_expires() {
        let mut c = contract(vec![crate_of(CrateTier::Legit, 100)], 3, 3);
        c.deadline = 1;
        assert!(c.tick_deadline());
        assert_eq!(c.deadline, 0);
        assert!(!c.tick_deadline());
    }

    #[test]
    fn test_stone_never_repeats_discovered() {
        let mut dice = Dice::seeded(32);
        let discovered = [Stone::Space, Stone::Mind, Stone::Reality, Stone::Power, Stone::Soul];
        for _ in 0..200 {
            let mut c = crate_of(CrateTier::Sealed, 1_000);
            if let Some(stone) = c.open(&discovered, &mut dice) {
                assert_eq!(stone, Stone::Time);
                assert!(c.value >= 50_000 && c.value <= 100_000);
            }
        }
    }

    #[test]
    fn test_all_stones_known_gives_plain_cargo() {
        let mut c = crate_of(CrateTier::Sealed, 2_000);
        // Stone roll succeeds but nothing is left to find
        let mut rolls = ScriptedRolls::new([0.0], []);
        assert_eq!(c.open(&Stone::ALL, &mut rolls), None);
        assert!(c.stone.is_none());
        assert_eq!(c.value, 2_000);
        assert!(c.contents.is_some());
    }

    #[test]
    fn test_reveal_adds_stone_heat_and_early_bonus() {
        let mut p = player();
        let mut log = EventLog::new();
        let mut c = contract(vec![crate_of(CrateTier::Sealed, 1_000)], 4, 6);
        c.deadline = 2;
        p.current_contract = Some(c);
        // Stone roll hits, first available stone, value 5 * 10_000
        let mut rolls = ScriptedRolls::new([0.0], [0, 5]);
        let payout = reveal_cargo(&mut p, &mut rolls, &mut log);
        assert_eq!(p.stones_discovered, vec![Stone::Space]);
        assert_eq!(p.heat, 5);
        // 50_000 * 1.0 multiplier, plus 5% per spare day for 2 days
        assert_eq!(payout, 55_000);
        assert_eq!(deliver(&mut p, &mut log), 55_000);
        assert_eq!(p.credits, 55_500);
        assert!(log.any(|e| matches!(e, GameEvent::ContractDelivered { bonus: 5_000, .. })));
    }

    #[test]
    fn test_steal_moves_cargo_and_raises_threat() {
        let mut p = player();
        let mut log = EventLog::new();
        let mut legit = crate_of(CrateTier::Legit, 300);
        legit.contents = Some("Spare Parts".into());
        let mut sealed = crate_of(CrateTier::Sealed, 70_000);
        sealed.stone = Some(Stone::Soul);
        p.current_contract = Some(contract(vec![legit, sealed], 3, 3));
        steal(&mut p, &mut log);
        assert!(p.current_contract.is_none());
        assert_eq!(p.heat, 30);
        assert_eq!(p.cartel_threat_level, 1);
        assert!(p.illegal_activity_today);
        assert_eq!(p.stones, vec![Stone::Soul]);
        assert_eq!(p.inventory.len(), 1);
        assert!(!p.inventory[0].is_contraband);
    }
}
