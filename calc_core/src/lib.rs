//! calc_core - Effect aggregation and damage computation for operator builds
//!
//! This library provides:
//! - Catalog: operator, weapon, gear and set tables with a tolerant reader
//! - Collector: every effect of a build, deduplicated and resolved
//! - Stat pipeline: flat, percentage and forge layers
//! - Damage composition: bucketed factors per skill with a contribution log
//! - DamageEngine: the pure entry point and weapon comparison

pub mod catalog;
pub mod collector;
pub mod config;
pub mod damage;
pub mod diagnostics;
pub mod effect;
pub mod engine;
pub mod prelude;
pub mod stat_block;
pub mod state;
pub mod trigger;
pub mod types;

// Re-export core types for convenience
pub use catalog::{Catalog, CatalogFile, GearDef, OperatorDef, SetDef, SkillDef, WeaponDef};
pub use config::{ConfigError, EngineConstants};
pub use damage::{DamageResult, EffectRecord, EffectStatus, SkillBreakdown};
pub use diagnostics::Diagnostic;
pub use effect::{Effect, EffectSource, EffectType, EffectUid, Magnitude};
pub use engine::{compute_damage, ComputeOptions, DamageEngine, WeaponComparison, WeaponOverride};
pub use stat_block::{ResolvedStats, StatSummary, StatValue};
pub use state::{BattleState, BuildState, GearSelection, SubOperatorSelection, WeaponSelection};
pub use trigger::{StackPolicy, TriggerSpec};
pub use types::{Abnormal, DamageTag, Element, PhysicalDebuff, Scope, SkillCategory, StatKind};
