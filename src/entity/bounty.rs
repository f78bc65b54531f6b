//! Bounty hunter roster
//!
//! Hunters that lose a fight to the player are gone for the rest of the
//! game. The roster belongs to one game session.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::dice::RandomSource;
use crate::entity::enemy::{Enemy, Hunter};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BountyRoster {
    eliminated: AHashSet<Hunter>,
}

impl BountyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hunters still in play, in roster order
    pub fn remaining(&self) -> Vec<Hunter> {
        Hunter::ALL
            .iter()
            .copied()
            .filter(|h| !self.eliminated.contains(h))
            .collect()
    }

    pub fn is_eliminated(&self, hunter: Hunter) -> bool {
        self.eliminated.contains(&hunter)
    }

    pub fn eliminated_count(&self) -> usize {
        self.eliminated.len()
    }

    /// A uniformly chosen remaining hunter, or a Galactic Enforcer once
    /// every hunter is eliminated
    pub fn draw(&self, rng: &mut dyn RandomSource) -> Enemy {
        let remaining = self.remaining();
        if remaining.is_empty() {
            tracing::debug!("bounty roster empty, sending enforcer");
            return Enemy::galactic_enforcer();
        }
        Enemy::bounty_hunter(remaining[rng.pick_index(remaining.len())])
    }

    pub fn mark_eliminated(&mut self, hunter: Hunter) {
        if self.eliminated.insert(hunter) {
            tracing::info!(hunter = hunter.name(), "bounty hunter eliminated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::Dice;
    use crate::entity::enemy::EnemyKind;

    #[test]
    fn test_eliminated_hunter_never_drawn() {
        let mut roster = BountyRoster::new();
        roster.mark_eliminated(Hunter::AgentAndrews);
        roster.mark_eliminated(Hunter::GarthVader);
        let mut dice = Dice::seeded(5);
        for _ in 0..300 {
            let enemy = roster.draw(&mut dice);
            match enemy.kind {
                EnemyKind::Hunter(h) => {
                    assert_ne!(h, Hunter::AgentAndrews);
                    assert_ne!(h, Hunter::GarthVader);
                }
                other => panic!("expected hunter, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_roster_sends_enforcer() {
        let mut roster = BountyRoster::new();
        for hunter in Hunter::ALL {
            roster.mark_eliminated(hunter);
        }
        let mut dice = Dice::seeded(5);
        let enemy = roster.draw(&mut dice);
        assert_eq!(enemy.name, "Galactic Enforcer");
        assert!(roster.remaining().is_empty());
    }

    #[test]
    fn test_marking_twice_is_idempotent() {
        let mut roster = BountyRoster::new();
        roster.mark_eliminated(Hunter::DMacTheDestroyer);
        roster.mark_eliminated(Hunter::DMacTheDestroyer);
        assert_eq!(roster.eliminated_count(), 1);
        assert!(roster.is_eliminated(Hunter::DMacTheDestroyer));
    }
}
