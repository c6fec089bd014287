//! Damage composition - buckets, per-skill damage and the result log

mod buckets;
mod calculation;
mod result;

pub use buckets::DamageBuckets;
pub use calculation::{compute_final_damage, resistance_factor, PreparedSkill, TriggerBonus};
pub use result::{DamageFactors, DamageResult, EffectRecord, EffectStatus, SkillBreakdown};
