//! Enemies: law enforcement tiers, bounty hunters, cartel crews and the
//! shadow crews met aboard a boarding ship

use serde::{Deserialize, Serialize};

use crate::core::dice::RandomSource;

/// Law-enforcement strength, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    LocalDeputy,
    SectorBadge,
    FederationRanger,
    GalacticEnforcer,
    BountyHunter,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::LocalDeputy,
        Tier::SectorBadge,
        Tier::FederationRanger,
        Tier::GalacticEnforcer,
        Tier::BountyHunter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::LocalDeputy => "Local Deputy",
            Self::SectorBadge => "Sector Badge",
            Self::FederationRanger => "Federation Ranger",
            Self::GalacticEnforcer => "Galactic Enforcer",
            Self::BountyHunter => "Bounty Hunter",
        }
    }
}

/// Who switched the tractor beam on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeamSource {
    Cartel,
    /// Collectors drawn by the stones in the hold
    Stones,
    Federation,
}

impl BeamSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cartel => "cartel dreadnought",
            Self::Stones => "stone seekers",
            Self::Federation => "federation black site",
        }
    }
}

/// The five bounty hunters. Each can be eliminated once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hunter {
    AgentAndrews,
    KillerKlakring,
    TMontTheTyrant,
    GarthVader,
    DMacTheDestroyer,
}

impl Hunter {
    pub const ALL: [Hunter; 5] = [
        Hunter::AgentAndrews,
        Hunter::KillerKlakring,
        Hunter::TMontTheTyrant,
        Hunter::GarthVader,
        Hunter::DMacTheDestroyer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AgentAndrews => "Agent Andrews",
            Self::KillerKlakring => "Killer Klakring",
            Self::TMontTheTyrant => "T-Mont the Tyrant",
            Self::GarthVader => "Garth Vader",
            Self::DMacTheDestroyer => "D-Mac the Destroyer",
        }
    }

    /// (hp, min damage, max damage, credit reward)
    fn stats(&self) -> (i32, i32, i32, i64) {
        match self {
            Self::AgentAndrews => (300, 25, 40, 2_000),
            Self::KillerKlakring => (350, 30, 50, 5_000),
            Self::TMontTheTyrant => (400, 35, 55, 10_000),
            Self::GarthVader => (430, 40, 60, 20_000),
            Self::DMacTheDestroyer => (480, 45, 75, 50_000),
        }
    }
}

/// Where an enemy comes from. Drives loot tables and aftermath rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Law(Tier),
    Hunter(Hunter),
    Cartel,
    Boarding(BeamSource),
    PrisonGuard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub credits_reward: i64,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(
        name: impl Into<String>,
        hp: i32,
        min_damage: i32,
        max_damage: i32,
        credits_reward: i64,
        kind: EnemyKind,
    ) -> Self {
        Self {
            name: name.into(),
            hp,
            min_damage,
            max_damage: max_damage.max(min_damage),
            credits_reward,
            kind,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Reduce hp, never below 0
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    /// Roll raw attack damage, uniform in `[min_damage, max_damage]`
    pub fn attack(&self, rng: &mut dyn RandomSource) -> i32 {
        rng.range_inclusive(self.min_damage as i64, self.max_damage as i64) as i32
    }

    /// Law tier this enemy counts as, if any
    pub fn tier(&self) -> Option<Tier> {
        match self.kind {
            EnemyKind::Law(tier) => Some(tier),
            EnemyKind::Hunter(_) => Some(Tier::BountyHunter),
            _ => None,
        }
    }

    pub fn local_deputy() -> Self {
        Self::new("Local Deputy", 60, 5, 15, 75, EnemyKind::Law(Tier::LocalDeputy))
    }

    pub fn sector_badge() -> Self {
        Self::new("Sector Badge", 90, 10, 20, 100, EnemyKind::Law(Tier::SectorBadge))
    }

    pub fn federation_ranger() -> Self {
        Self::new(
            "Federation Ranger",
            120,
            15,
            25,
            1_500,
            EnemyKind::Law(Tier::FederationRanger),
        )
    }

    pub fn galactic_enforcer() -> Self {
        Self::new(
            "Galactic Enforcer",
            165,
            20,
            35,
            2_000,
            EnemyKind::Law(Tier::GalacticEnforcer),
        )
    }

    pub fn bounty_hunter(hunter: Hunter) -> Self {
        let (hp, min, max, reward) = hunter.stats();
        Self::new(hunter.name(), hp, min, max, reward, EnemyKind::Hunter(hunter))
    }

    /// Standard patrol enemy for a law tier. Bounty hunters come from the
    /// roster instead, so that tier maps to a Galactic Enforcer here.
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::LocalDeputy => Self::local_deputy(),
            Tier::SectorBadge => Self::sector_badge(),
            Tier::FederationRanger => Self::federation_ranger(),
            Tier::GalacticEnforcer | Tier::BountyHunter => Self::galactic_enforcer(),
        }
    }

    /// The cartel crew sent at a given threat level
    pub fn cartel_squad(threat: u32) -> Vec<Enemy> {
        let t = threat as i32;
        let reward = |base: i64, step: i64| base + step * threat as i64;
        match threat {
            0..=1 => vec![Self::new(
                "Cartel Thug",
                60 + 5 * t,
                10 + t,
                20 + 2 * t,
                reward(150, 50),
                EnemyKind::Cartel,
            )],
            2..=3 => vec![Self::new(
                "Cartel Enforcer",
                75 + 5 * t,
                13 + t,
                25 + 2 * t,
                reward(250, 50),
                EnemyKind::Cartel,
            )],
            4..=5 => (1..=2)
                .map(|n| {
                    Self::new(
                        format!("Cartel Enforcer {n}"),
                        80 + 5 * t,
                        15 + t,
                        28 + 2 * t,
                        reward(300, 50),
                        EnemyKind::Cartel,
                    )
                })
                .collect(),
            _ => vec![
                Self::new(
                    "Cartel Lieutenant",
                    120 + 8 * t,
                    18 + 2 * t,
                    35 + 3 * t,
                    reward(300, 75),
                    EnemyKind::Cartel,
                ),
                Self::new(
                    "Cartel Enforcer",
                    85 + 5 * t,
                    15 + t,
                    30 + 2 * t,
                    reward(300, 50),
                    EnemyKind::Cartel,
                ),
            ],
        }
    }

    /// A crew member aboard a boarding ship, scaled by heat
    pub fn boarding_crew(source: BeamSource, heat: u32, rng: &mut dyn RandomSource) -> Self {
        let f = (heat / 20) as i32;
        let (hp, min, max, credits) = (35 + 10 * f, 8 + f, 16 + 2 * f, 200 + 50 * f as i64);
        let (bonus_hp, bonus_min, bonus_max, bonus_credits, names): (i32, i32, i32, i64, [&str; 5]) =
            match source {
                BeamSource::Cartel => (
                    15,
                    3,
                    5,
                    100,
                    [
                        "Cartel Enforcer",
                        "Syndicate Assassin",
                        "Blood Guard",
                        "Cartel Lieutenant",
                        "Dreadnought Marine",
                    ],
                ),
                BeamSource::Federation => (
                    10,
                    2,
                    4,
                    75,
                    [
                        "Black Ops Agent",
                        "Federation Specter",
                        "Shadow Operative",
                        "Classified Enforcer",
                        "Dark Protocol Guard",
                    ],
                ),
                BeamSource::Stones => (
                    5,
                    1,
                    3,
                    50,
                    [
                        "Void Cultist",
                        "Stone Seeker",
                        "Cosmic Enforcer",
                        "Reality Warden",
                        "Dimensional Agent",
                    ],
                ),
            };
        let name = names[rng.pick_index(names.len())];
        Self::new(
            name,
            hp + bonus_hp,
            min + bonus_min,
            max + bonus_max,
            credits + bonus_credits,
            EnemyKind::Boarding(source),
        )
    }

    pub fn prison_guard() -> Self {
        Self::new("Shadow Guard", 40, 8, 15, 100, EnemyKind::PrisonGuard)
    }
}
