//! Prelude module for convenient imports
//!
//! ```rust
//! use calc_core::prelude::*;
//! ```

// Engine
pub use crate::engine::{compute_damage, ComputeOptions, DamageEngine};

// Inputs
pub use crate::catalog::Catalog;
pub use crate::config::EngineConstants;
pub use crate::state::{BattleState, BuildState, GearSelection, SubOperatorSelection, WeaponSelection};

// Output
pub use crate::damage::{DamageResult, EffectRecord, EffectStatus, SkillBreakdown};
pub use crate::diagnostics::Diagnostic;

// Vocabulary
pub use crate::types::{Abnormal, Element, PhysicalDebuff, SkillCategory};
