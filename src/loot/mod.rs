//! Equipment catalogs, rarity and drops

pub mod catalog;
pub mod drops;
pub mod rarity;

pub use catalog::{Armor, Equipment, Gear, Weapon, ARMORS, WEAPONS};
pub use drops::{draw, enemy_drop, DropProfile};
pub use rarity::Rarity;
