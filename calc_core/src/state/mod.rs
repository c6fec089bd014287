//! Caller-owned state: the build being evaluated and the simulated battle

mod battle;
mod build;

pub use battle::BattleState;
pub use build::{BuildState, GearSelection, SubOperatorSelection, WeaponSelection, GEAR_SLOTS};
