//! Risk escalation: heat, cartel threat and the odds they feed

pub mod heat;
pub mod odds;
pub mod threat;

pub use heat::{apply_heat, HeatEvent};
pub use threat::{raise_threat, ThreatEvent};
