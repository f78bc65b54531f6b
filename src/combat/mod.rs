//! Turn-based combat against a single enemy

pub mod engine;
pub mod session;

pub use engine::{fight, offer_equipment, run_combat, CombatOutcome};
pub use session::{mitigate, CombatSession, EnemyTurn};
