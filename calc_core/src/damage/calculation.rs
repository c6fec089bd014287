//! Damage calculation - a skill plus resolved stats into a number

use super::{DamageBuckets, DamageFactors, SkillBreakdown};
use crate::catalog::reader::{read_bonus, read_value};
use crate::catalog::SkillDef;
use crate::collector::ResolvedEffect;
use crate::config::EngineConstants;
use crate::diagnostics::Diagnostic;
use crate::stat_block::ResolvedStats;
use crate::trigger::{BonusSpec, TriggerContext};
use crate::types::Element;

/// A skill with its level value and bonus blocks already parsed
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSkill<'a> {
    pub def: &'a SkillDef,
    pub element: Element,
    pub level: String,
    /// Base multiplier as a fraction (`"800%"` = 8.0)
    pub base_multiplier: f64,
    pub bonuses: Vec<BonusSpec>,
}

impl<'a> PreparedSkill<'a> {
    /// Look up the level and parse the skill's numbers.
    ///
    /// Returns `None` with a `MissingSkillLevel` diagnostic when the level
    /// has no entry.
    pub fn prepare(
        def: &'a SkillDef,
        level: &str,
        element: Element,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Self> {
        let Some(raw) = def.dmg.get(level) else {
            tracing::warn!(skill = %def.id, level, "skill has no value for level, skipped");
            diagnostics.push(Diagnostic::MissingSkillLevel {
                skill: def.id.clone(),
                level: level.to_string(),
            });
            return None;
        };
        let mut invalid = Vec::new();
        let base_multiplier = read_value(raw, &def.id, &mut invalid, diagnostics).as_fraction();
        let bonuses = def
            .bonus
            .iter()
            .filter_map(|b| read_bonus(b, &def.id, &mut invalid, diagnostics))
            .collect();
        Some(PreparedSkill {
            def,
            element,
            level: level.to_string(),
            base_multiplier,
            bonuses,
        })
    }

    /// Sum of active bonus blocks, added to the base multiplier
    pub fn trigger_bonus(&self, triggers: &TriggerContext<'_>) -> TriggerBonus {
        let resolved: Vec<_> = self
            .bonuses
            .iter()
            .map(|b| triggers.resolve_bonus(b, None, false))
            .collect();
        let mut unknown: Vec<String> = Vec::new();
        for name in resolved.iter().flat_map(|r| &r.unknown) {
            if !unknown.contains(name) {
                unknown.push(name.clone());
            }
        }
        TriggerBonus {
            amount: resolved.iter().map(|r| r.amount.fraction).sum(),
            unknown,
        }
    }
}

/// Resolved skill bonus blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerBonus {
    pub amount: f64,
    /// Trigger names no family recognized
    pub unknown: Vec<String>,
}

/// `1 − max(resistance − Σ reduction, floor)`
pub fn resistance_factor(resistance: f64, reduction: f64, floor: f64) -> f64 {
    1.0 - (resistance - reduction).max(floor)
}

/// Compose the damage of one skill.
///
/// `attack × multiplier × (1 + Σ damage) × (1 + Σ element) × (1 + Σ arts)
/// × (1 + Σ skill) × (1 + Σ amplification) × (1 + Σ vulnerability)
/// × crit × resistance`, where the multiplier is
/// `(dmg + Σ trigger bonus + Σ points) × Π(1 + factor)`.
pub fn compute_final_damage(
    stats: &ResolvedStats,
    skill: &PreparedSkill<'_>,
    effects: &[&ResolvedEffect<'_>],
    triggers: &TriggerContext<'_>,
    constants: &EngineConstants,
) -> SkillBreakdown {
    let category = skill.def.category;
    let buckets = DamageBuckets::collect(effects, skill.element, category);
    let TriggerBonus {
        amount: trigger_bonus,
        unknown: unknown_triggers,
    } = skill.trigger_bonus(triggers);
    let multiplier =
        (skill.base_multiplier + trigger_bonus + buckets.multiplier_points) * buckets.multiplier_factor;

    let factors = DamageFactors {
        attack: stats.attack_power(),
        multiplier,
        damage_increase: 1.0 + buckets.damage_increase,
        element_increase: 1.0 + buckets.element_increase,
        arts_increase: 1.0 + buckets.arts_increase,
        skill_increase: 1.0 + buckets.skill_increase,
        amplification: 1.0 + buckets.amplification,
        vulnerability: 1.0 + buckets.vulnerability,
        crit: stats.crit_expectation(),
        resistance: resistance_factor(
            constants.enemy_resistance(skill.element),
            buckets.resistance_reduction,
            constants.resistance.min,
        ),
    };
    let damage = factors.product().max(0.0);

    tracing::trace!(
        skill = %skill.def.id,
        multiplier,
        attack = factors.attack,
        damage,
        "skill damage composed"
    );

    SkillBreakdown {
        skill: skill.def.id.clone(),
        name: skill.def.name.clone(),
        category,
        element: skill.element,
        level: skill.level.clone(),
        base_multiplier: skill.base_multiplier,
        trigger_bonus,
        unknown_triggers,
        buckets,
        factors,
        damage,
    }
}
