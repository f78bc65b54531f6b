//! How a run can end
//!
//! Death and an empty tank are forced. The wealth and stone endings are
//! checked at the start of each day and after a delivery.

use serde::Serialize;

use crate::core::choice::{choose, Chooser, Menu};
use crate::entity::player::{Player, Stone};

/// Credits at which the kingpin offer is made
pub const KINGPIN_CREDITS: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Ending {
    Killed,
    Stranded,
    /// Retired rich
    Kingpin,
    /// Used all six stones
    Ascended,
    /// Held all six and destroyed them
    StonesDestroyed,
    /// Saw all six, kept none
    Harbinger,
    /// Saw all six, kept some
    Scattered,
}

impl Ending {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Killed => "killed",
            Self::Stranded => "stranded",
            Self::Kingpin => "kingpin",
            Self::Ascended => "ascended",
            Self::StonesDestroyed => "stones_destroyed",
            Self::Harbinger => "harbinger",
            Self::Scattered => "scattered",
        }
    }

    /// Whether the run ended on the player's own terms
    pub fn is_victory(&self) -> bool {
        !matches!(self, Self::Killed | Self::Stranded)
    }
}

/// Check the voluntary endings in order: wealth, then stones.
/// Declining the kingpin offer is remembered and never asked again.
pub fn check_endings(player: &mut Player, chooser: &mut dyn Chooser) -> Option<Ending> {
    if player.credits >= KINGPIN_CREDITS && !player.rejected_kingpin {
        let menu = Menu::KingpinOffer {
            credits: player.credits,
        };
        if choose(chooser, &menu) == 0 {
            return Some(Ending::Kingpin);
        }
        player.rejected_kingpin = true;
    }

    let all = Stone::ALL.len();
    if player.stones.len() >= all {
        return Some(match choose(chooser, &Menu::StonesDestiny) {
            0 => Ending::Ascended,
            _ => Ending::StonesDestroyed,
        });
    }
    if player.stones_discovered.len() >= all {
        if player.stones.is_empty() {
            return Some(Ending::Harbinger);
        }
        return Some(Ending::Scattered);
    }
    None
}
