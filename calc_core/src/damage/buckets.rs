//! Combination buckets for damage-affecting effects

use crate::collector::ResolvedEffect;
use crate::effect::{EffectType, MultiplierForm};
use crate::types::{DamageTag, Element, SkillCategory};
use serde::{Deserialize, Serialize};

/// Sums and products of every damage-affecting effect for one skill.
///
/// Each additive bucket becomes its own `(1 + Σ)` factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageBuckets {
    /// "주는 피해"
    pub damage_increase: f64,
    /// Increase for the skill's exact element
    pub element_increase: f64,
    /// "아츠 피해", counted for arts elements only
    pub arts_increase: f64,
    /// Increase for the skill's category
    pub skill_increase: f64,
    pub amplification: f64,
    pub vulnerability: f64,
    pub resistance_reduction: f64,
    /// Percentage points added to the base multiplier
    pub multiplier_points: f64,
    /// Product of `(1 + factor)` over multiplicative skill multiplier effects
    pub multiplier_factor: f64,
}

impl Default for DamageBuckets {
    fn default() -> Self {
        DamageBuckets {
            damage_increase: 0.0,
            element_increase: 0.0,
            arts_increase: 0.0,
            skill_increase: 0.0,
            amplification: 0.0,
            vulnerability: 0.0,
            resistance_reduction: 0.0,
            multiplier_points: 0.0,
            multiplier_factor: 1.0,
        }
    }
}

fn tag_matches(tag: Option<DamageTag>, element: Element) -> bool {
    tag.map_or(true, |t| t.matches(element))
}

impl DamageBuckets {
    /// Sort counted effects into buckets for a skill of `element` and `category`
    pub fn collect(
        effects: &[&ResolvedEffect<'_>],
        element: Element,
        category: SkillCategory,
    ) -> Self {
        let mut buckets = DamageBuckets::default();
        for resolved in effects.iter().filter(|r| r.counts()) {
            let value = resolved.amount.fraction;
            match resolved.effect.kind {
                EffectType::DamageIncrease => buckets.damage_increase += value,
                EffectType::ElementDamage(DamageTag::Arts) => {
                    if element.is_arts() {
                        buckets.arts_increase += value;
                    }
                }
                EffectType::ElementDamage(DamageTag::Element(e)) => {
                    if e == element {
                        buckets.element_increase += value;
                    }
                }
                EffectType::SkillDamage(c) => {
                    if c == category {
                        buckets.skill_increase += value;
                    }
                }
                EffectType::Amplification(tag) if tag_matches(tag, element) => {
                    buckets.amplification += value
                }
                EffectType::Vulnerability(tag) if tag_matches(tag, element) => {
                    buckets.vulnerability += value
                }
                EffectType::ResistanceReduction(tag) if tag_matches(tag, element) => {
                    buckets.resistance_reduction += value
                }
                EffectType::SkillMultiplier(MultiplierForm::Points) => {
                    buckets.multiplier_points += value
                }
                EffectType::SkillMultiplier(MultiplierForm::Factor) => {
                    buckets.multiplier_factor *= 1.0 + value
                }
                _ => {}
            }
        }
        buckets
    }
}
