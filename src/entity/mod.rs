pub mod bounty;
pub mod enemy;
pub mod items;
pub mod player;

pub use bounty::BountyRoster;
pub use enemy::{BeamSource, Enemy, EnemyKind, Hunter, Tier};
pub use items::{CombatItem, ItemKind};
pub use player::{InventoryEntry, Player, Ship, Stone};
