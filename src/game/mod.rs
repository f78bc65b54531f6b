//! Game session and day loop
//!
//! A [`GameSession`] owns everything that persists for a run: the player,
//! the ship, the bounty roster, the event log and the dice. Presenters call
//! [`GameSession::begin_day`] and then one day action. Every call pushes
//! events that the presenter drains afterwards.

pub mod endings;
pub mod hub;

use tracing::{debug, info};

use crate::contract::{self, reveal_cargo};
use crate::core::choice::{choose, Chooser, Menu};
use crate::core::config::GameConfig;
use crate::core::dice::{Dice, RandomSource};
use crate::core::error::{Result, SmugglerError};
use crate::core::events::{EventLog, GameEvent, ItemEffect};
use crate::encounter::{run_encounter, run_random_encounter, EncounterKind, EncounterOutcome};
use crate::entity::bounty::BountyRoster;
use crate::entity::items::ItemKind;
use crate::entity::player::{Player, Ship};
use crate::risk::{heat, odds};

pub use endings::{check_endings, Ending};
pub use hub::{HubKind, TradeHub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Over(Ending),
}

/// What happened at the start of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStart {
    /// Waiting for the day's action
    Ready,
    /// Reached the contract destination. The day is already spent.
    Arrived,
    GameOver(Ending),
}

/// Fuel burned to cover `sectors` in one day: half the distance rounded
/// half to even, at least 1
pub fn fuel_cost(sectors: u32) -> u32 {
    let half = sectors / 2;
    let rounded = if sectors % 2 == 1 && half % 2 == 1 {
        half + 1
    } else {
        half
    };
    rounded.max(1)
}

pub struct GameSession {
    pub player: Player,
    pub ship: Ship,
    /// Days flown so far, starting at 1
    pub day: u32,
    pub roster: BountyRoster,
    /// Hub the ship is docked at, if any
    pub hub: Option<TradeHub>,
    pub events: EventLog,
    pub rng: Box<dyn RandomSource>,
    state: GameState,
}

impl GameSession {
    /// New session with dice from the config seed, or from entropy
    pub fn new(config: &GameConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => Dice::seeded(seed),
            None => Dice::from_entropy(),
        };
        Self::with_rng(config, Box::new(dice))
    }

    pub fn with_rng(config: &GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            player: Player::new(&config.player),
            ship: Ship::new(&config.ship),
            day: 1,
            roster: BountyRoster::new(),
            hub: None,
            events: EventLog::new(),
            rng,
            state: GameState::Running,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Over(_))
    }

    pub fn ending(&self) -> Option<Ending> {
        match self.state {
            GameState::Over(ending) => Some(ending),
            GameState::Running => None,
        }
    }

    /// End the run. The first ending sticks.
    pub(crate) fn end(&mut self, ending: Ending) {
        if self.is_over() {
            return;
        }
        info!(ending = ending.label(), day = self.day, "game over");
        self.state = GameState::Over(ending);
        self.events.push(GameEvent::Ending(ending));
    }

    pub fn ensure_running(&self) -> Result<()> {
        match self.state {
            GameState::Over(ending) => Err(SmugglerError::GameOver(ending)),
            GameState::Running => Ok(()),
        }
    }

    /// Start a new day: endings, overnight healing, then the contract.
    /// Arriving at the destination settles the contract, docks at a hub and
    /// uses up the day.
    pub fn begin_day(&mut self, chooser: &mut dyn Chooser) -> Result<DayStart> {
        self.ensure_running()?;
        if let Some(ending) = check_endings(&mut self.player, chooser) {
            self.end(ending);
            return Ok(DayStart::GameOver(ending));
        }

        let healed = self.player.start_new_day();
        self.events.push(GameEvent::DayStarted {
            day: self.day,
            healed,
        });

        let arrived = self
            .player
            .current_contract
            .as_ref()
            .is_some_and(|c| c.is_at_destination());
        if arrived {
            return Ok(self.arrive(chooser));
        }

        let missed = self
            .player
            .current_contract
            .as_mut()
            .is_some_and(|c| !c.tick_deadline());
        if missed {
            info!(day = self.day, "contract deadline missed");
            self.events.push(GameEvent::DeadlineMissed);
            run_encounter(self, chooser, EncounterKind::Cartel);
            if self.player.current_contract.take().is_some() {
                self.events.push(GameEvent::ContractVoided);
            }
        }

        Ok(match self.ending() {
            Some(ending) => DayStart::GameOver(ending),
            None => DayStart::Ready,
        })
    }

    fn arrive(&mut self, chooser: &mut dyn Chooser) -> DayStart {
        let reward = reveal_cargo(&mut self.player, self.rng.as_mut(), &mut self.events);
        let stones = self
            .player
            .current_contract
            .as_ref()
            .map(|c| c.stones())
            .unwrap_or_default();

        match choose(chooser, &Menu::ContractArrival { reward, stones }) {
            0 => {
                contract::deliver(&mut self.player, &mut self.events);
            }
            _ => {
                contract::steal(&mut self.player, &mut self.events);
                if self.rng.chance(0.5) {
                    run_encounter(self, chooser, EncounterKind::Cartel);
                }
            }
        }
        if let Some(ending) = self.ending() {
            return DayStart::GameOver(ending);
        }

        if let Some(ending) = check_endings(&mut self.player, chooser) {
            self.end(ending);
            return DayStart::GameOver(ending);
        }

        self.visit_hub(chooser);
        if let Some(ending) = self.ending() {
            return DayStart::GameOver(ending);
        }
        self.finish_day();
        DayStart::Arrived
    }

    /// Fly up to `speed` sectors. Out-of-range or unaffordable requests
    /// fall back to a single sector.
    pub fn travel(&mut self, sectors: u32, chooser: &mut dyn Chooser) -> Result<EncounterOutcome> {
        self.ensure_running()?;
        if self.ship.fuel == 0 {
            self.end(Ending::Stranded);
            return Err(SmugglerError::NoFuel {
                needed: 1,
                available: 0,
            });
        }

        let mut sectors = sectors;
        if sectors == 0 || sectors > self.ship.speed || fuel_cost(sectors) > self.ship.fuel {
            debug!(requested = sectors, "travel clamped to one sector");
            sectors = 1;
        }
        let cost = fuel_cost(sectors);
        self.ship.fuel -= cost;
        self.hub = None;
        self.events.push(GameEvent::TravelStarted {
            sectors,
            fuel_cost: cost,
        });

        let chance = odds::encounter_chance(sectors, self.ship.speed);
        let outcome = if self.rng.chance(chance) {
            run_random_encounter(self, chooser)
        } else {
            EncounterOutcome::Uneventful
        };
        if self.is_over() {
            return Ok(EncounterOutcome::GameOver);
        }

        if outcome.makes_progress() {
            if let Some(contract) = self.player.current_contract.as_mut() {
                let covered = contract.advance(sectors);
                let remaining = contract.remaining();
                self.events.push(GameEvent::Progress {
                    sectors: covered,
                    remaining,
                });
            }
        }

        self.finish_day();
        if self.check_survival() {
            return Ok(EncounterOutcome::GameOver);
        }
        Ok(outcome)
    }

    /// Spend the day out of sight. Returns heat shed.
    pub fn lay_low(&mut self) -> Result<u32> {
        self.ensure_running()?;
        let shed = heat::lay_low(&mut self.player, self.rng.as_mut(), &mut self.events);
        self.finish_day();
        self.check_survival();
        Ok(shed)
    }

    /// Use a combat item outside combat. Only medkits qualify. Does not end
    /// the day. Returns hp restored.
    pub fn use_item(&mut self, index: usize) -> Result<i32> {
        self.ensure_running()?;
        let kind = self
            .player
            .items
            .get(index)
            .map(|i| i.kind)
            .ok_or_else(|| SmugglerError::InvalidAction(format!("no item in slot {index}")))?;
        if !kind.usable_out_of_combat() {
            return Err(SmugglerError::InvalidAction(format!(
                "{} only works in combat",
                kind.name()
            )));
        }
        let item = self.player.items.remove(index);
        let healed = self.player.heal(ItemKind::MEDKIT_HEAL);
        self.events.push(GameEvent::ItemUsed {
            item: item.name,
            effect: ItemEffect::Healed(healed),
        });
        Ok(healed)
    }

    /// Dock at a trade hub from open space
    pub fn enter_trade_hub(&mut self, chooser: &mut dyn Chooser) -> Result<()> {
        self.ensure_running()?;
        self.visit_hub(chooser);
        Ok(())
    }

    /// Police first if the player is wanted, then open the hub
    pub(crate) fn visit_hub(&mut self, chooser: &mut dyn Chooser) {
        if self.player.heat > 0 {
            run_encounter(self, chooser, EncounterKind::Police);
            if self.is_over() {
                return;
            }
        }
        let hub = TradeHub::open(&self.player, &self.ship, self.rng.as_mut());
        info!(kind = hub.kind.label(), fuel_price = hub.fuel_price, "docked at trade hub");
        self.events.push(GameEvent::HubOpened {
            kind: hub.kind,
            fuel_price: hub.fuel_price,
        });
        self.hub = Some(hub);
    }

    /// Sign one of the hub's contracts. Returns the heat it added.
    pub fn accept_contract(&mut self, index: usize) -> Result<u32> {
        self.ensure_running()?;
        if self.player.current_contract.is_some() {
            return Err(SmugglerError::InvalidAction(
                "already carrying a contract".into(),
            ));
        }
        let hub = self
            .hub
            .as_mut()
            .ok_or_else(|| SmugglerError::InvalidAction("not docked at a hub".into()))?;
        if index >= hub.contracts.len() {
            return Err(SmugglerError::InvalidAction(format!(
                "no contract {index} on the board"
            )));
        }
        let signed = hub.contracts.remove(index);
        Ok(contract::accept(&mut self.player, signed, &mut self.events))
    }

    /// Buy fuel at the docked hub. Returns the credits spent.
    pub fn buy_fuel(&mut self, units: u32) -> Result<i64> {
        self.ensure_running()?;
        let price = self
            .hub
            .as_ref()
            .map(|h| h.fuel_price)
            .ok_or_else(|| SmugglerError::InvalidAction("not docked at a hub".into()))?;
        if units > self.ship.tank_space() {
            return Err(SmugglerError::InvalidAction(format!(
                "tank only has room for {} units",
                self.ship.tank_space()
            )));
        }
        let cost = units as i64 * price;
        if cost > self.player.credits {
            return Err(SmugglerError::InsufficientCredits {
                needed: cost,
                available: self.player.credits,
            });
        }
        self.player.credits -= cost;
        self.ship.fuel += units;
        self.events.push(GameEvent::FuelPurchased { units, cost });
        Ok(cost)
    }

    fn finish_day(&mut self) {
        self.day += 1;
        heat::daily_decay(&mut self.player, self.rng.as_mut(), &mut self.events);
        self.events.push(GameEvent::DayEnded { day: self.day });
    }

    /// End the run if the player died or the tank ran dry. Returns true if
    /// the game is over.
    fn check_survival(&mut self) -> bool {
        if !self.player.is_alive() {
            self.end(Ending::Killed);
        } else if self.ship.fuel == 0 && self.hub.is_none() {
            self.end(Ending::Stranded);
        }
        self.is_over()
    }
}
