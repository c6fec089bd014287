//! DamageResult - the output handed back to the caller

use super::DamageBuckets;
use crate::diagnostics::Diagnostic;
use crate::effect::{Amount, Effect};
use crate::stat_block::StatSummary;
use crate::types::{Element, SkillCategory};
use serde::{Deserialize, Serialize};

/// Display status of a logged effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectStatus {
    Active,
    /// Trigger not met, or no skill it applies to
    Inactive,
    /// Trigger names nothing the engine knows
    UnknownTrigger,
    /// Counted, but a value failed to parse and was read as 0
    Invalid,
    /// Listed only; the caller switched it off
    Disabled,
}

/// One effect as logged in the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub effect: Effect,
    pub status: EffectStatus,
    /// Active for at least one computed skill
    pub active: bool,
    pub stacks: u32,
    /// Resolved magnitude where the effect was active
    pub magnitude: Amount,
    /// `total` minus the total without this effect
    pub contribution: f64,
}

impl EffectRecord {
    pub fn uid(&self) -> &str {
        self.effect.uid.as_str()
    }
}

/// Factors applied to one skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageFactors {
    pub attack: f64,
    /// Skill multiplier after points and factors
    pub multiplier: f64,
    pub damage_increase: f64,
    pub element_increase: f64,
    pub arts_increase: f64,
    pub skill_increase: f64,
    pub amplification: f64,
    pub vulnerability: f64,
    pub crit: f64,
    pub resistance: f64,
}

impl DamageFactors {
    /// Product of every factor
    pub fn product(&self) -> f64 {
        self.attack
            * self.multiplier
            * self.damage_increase
            * self.element_increase
            * self.arts_increase
            * self.skill_increase
            * self.amplification
            * self.vulnerability
            * self.crit
            * self.resistance
    }
}

/// Damage of one skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub skill: String,
    pub name: String,
    pub category: SkillCategory,
    pub element: Element,
    pub level: String,
    /// Base multiplier from the level table
    pub base_multiplier: f64,
    /// Extra base multiplier from active skill bonus blocks
    pub trigger_bonus: f64,
    /// Bonus block trigger names nothing recognized
    #[serde(default)]
    pub unknown_triggers: Vec<String>,
    pub buckets: DamageBuckets,
    pub factors: DamageFactors,
    pub damage: f64,
}

/// Output of one damage computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub total: f64,
    /// Every collected effect in evaluation order, debuff-bound ones last
    pub active_effects: Vec<EffectRecord>,
    pub skills: Vec<SkillBreakdown>,
    /// Stats outside any skill context
    pub stats: StatSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl DamageResult {
    /// Zero damage, nothing logged
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn effect(&self, uid: &str) -> Option<&EffectRecord> {
        self.active_effects.iter().find(|r| r.uid() == uid)
    }

    pub fn skill(&self, category: SkillCategory) -> Option<&SkillBreakdown> {
        self.skills.iter().find(|s| s.category == category)
    }

    /// Records counted towards the total
    pub fn counted(&self) -> impl Iterator<Item = &EffectRecord> {
        self.active_effects
            .iter()
            .filter(|r| r.active && r.status != EffectStatus::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectSource, EffectType, EffectUid, Magnitude};
    use crate::types::Scope;

    #[test]
    fn test_empty() {
        let result = DamageResult::empty();
        assert_eq!(result.total, 0.0);
        assert!(result.active_effects.is_empty());
        assert!(result.skills.is_empty());
    }

    fn record(uid: &str, status: EffectStatus, active: bool) -> EffectRecord {
        EffectRecord {
            effect: Effect {
                uid: EffectUid::from(uid),
                kind: EffectType::DamageIncrease,
                label: String::new(),
                value: Some(Magnitude::ZERO),
                scope: Scope::SelfOnly,
                source: EffectSource::WeaponTrait {
                    weapon: "w".to_string(),
                    wielder: "op".to_string(),
                },
                non_stack_key: None,
                trigger: None,
                bonuses: vec![],
                skill_filter: vec![],
                forged: false,
                invalid: vec![],
            },
            status,
            active,
            stacks: u32::from(active),
            magnitude: Amount::ZERO,
            contribution: 0.0,
        }
    }

    #[test]
    fn test_counted_follows_activity() {
        let result = DamageResult {
            active_effects: vec![
                record("on", EffectStatus::Active, true),
                record("bad_on", EffectStatus::Invalid, true),
                record("bad_off", EffectStatus::Invalid, false),
                record("off", EffectStatus::Inactive, false),
                record("debuff", EffectStatus::Disabled, true),
            ],
            ..DamageResult::default()
        };
        let uids: Vec<&str> = result.counted().map(|r| r.uid()).collect();
        assert_eq!(uids, vec!["on", "bad_on"]);
    }

    #[test]
    fn test_factor_product() {
        let factors = DamageFactors {
            attack: 400.0,
            multiplier: 2.0,
            damage_increase: 1.5,
            element_increase: 1.0,
            arts_increase: 1.0,
            skill_increase: 1.0,
            amplification: 1.2,
            vulnerability: 1.0,
            crit: 1.0,
            resistance: 0.5,
        };
        assert!((factors.product() - 720.0).abs() < 1e-9);
    }
}
