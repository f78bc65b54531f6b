//! Star Smuggler - encounter, combat and risk core for a space smuggling game

pub mod combat;
pub mod contract;
pub mod core;
pub mod encounter;
pub mod entity;
pub mod game;
pub mod loot;
pub mod risk;
