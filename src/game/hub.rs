//! Trade hubs: fuel and the contract board

use serde::Serialize;

use crate::contract::Contract;
use crate::core::dice::RandomSource;
use crate::entity::player::{Player, Ship};

/// Fuel price bands, cheapest first
pub const PRICE_BANDS: [(i64, i64); 5] = [(30, 45), (46, 60), (61, 75), (76, 85), (86, 100)];

pub const CONTRACTS_OFFERED: usize = 3;

/// Floor the viability cap never goes below
const MIN_FUEL_PRICE: i64 = 30;

/// Units a nearly broke, nearly empty pilot must be able to afford
const VIABLE_UNITS: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HubKind {
    Slum,
    Corporate,
    Cartel,
    Ghost,
    Blacksite,
}

impl HubKind {
    pub const ALL: [HubKind; 5] = [
        HubKind::Slum,
        HubKind::Corporate,
        HubKind::Cartel,
        HubKind::Ghost,
        HubKind::Blacksite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Slum => "slum",
            Self::Corporate => "corporate",
            Self::Cartel => "cartel",
            Self::Ghost => "ghost",
            Self::Blacksite => "blacksite",
        }
    }

    /// Weight of each price band at this kind of hub
    pub fn price_weights(&self) -> [f64; 5] {
        match self {
            Self::Slum => [20.0, 15.0, 8.0, 5.0, 2.0],
            Self::Corporate => [5.0, 10.0, 15.0, 10.0, 8.0],
            Self::Cartel => [8.0, 10.0, 12.0, 10.0, 10.0],
            Self::Ghost => [12.0, 10.0, 10.0, 8.0, 5.0],
            Self::Blacksite => [2.0, 5.0, 8.0, 12.0, 18.0],
        }
    }

    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.pick_index(Self::ALL.len())]
    }

    pub fn roll_fuel_price(&self, rng: &mut dyn RandomSource) -> i64 {
        let (lo, hi) = PRICE_BANDS[rng.weighted_index(&self.price_weights())];
        rng.range_inclusive(lo, hi)
    }
}

/// Keep a new pilot from being priced out of their first tank. Only applies
/// with at most 2 fuel aboard and at most 600 credits.
pub fn viable_fuel_price(price: i64, fuel: u32, credits: i64) -> i64 {
    if fuel > 2 || credits > 600 {
        return price;
    }
    if credits / price.max(1) >= VIABLE_UNITS {
        return price;
    }
    let safe = credits / VIABLE_UNITS;
    if safe < MIN_FUEL_PRICE {
        return MIN_FUEL_PRICE;
    }
    price.min(safe)
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeHub {
    pub kind: HubKind,
    pub fuel_price: i64,
    pub contracts: Vec<Contract>,
}

impl TradeHub {
    /// Open a hub: roll its kind, fuel price and contract board
    pub fn open(player: &Player, ship: &Ship, rng: &mut dyn RandomSource) -> Self {
        let kind = HubKind::roll(rng);
        let rolled = kind.roll_fuel_price(rng);
        let fuel_price = viable_fuel_price(rolled, ship.fuel, player.credits);
        if fuel_price != rolled {
            tracing::debug!(rolled, fuel_price, "fuel price capped for a new pilot");
        }
        let contracts = (0..CONTRACTS_OFFERED)
            .map(|_| Contract::generate(ship.max_cargo, rng))
            .collect();
        Self {
            kind,
            fuel_price,
            contracts,
        }
    }

    /// Most fuel the player can buy right now
    pub fn max_fuel_purchase(&self, player: &Player, ship: &Ship) -> u32 {
        let affordable = (player.credits.max(0) / self.fuel_price.max(1)).min(u32::MAX as i64);
        ship.tank_space().min(affordable as u32)
    }
}
