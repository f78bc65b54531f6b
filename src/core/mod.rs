pub mod choice;
pub mod config;
pub mod dice;
pub mod error;
pub mod events;

pub use choice::{AutoPilot, Chooser, Menu, ScriptedChooser};
pub use config::{load_config, GameConfig};
pub use dice::{Dice, RandomSource, ScriptedRolls};
pub use error::{Result, SmugglerError};
pub use events::{EventLog, GameEvent};
