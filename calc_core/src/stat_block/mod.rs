//! Stat application - resolved effects onto base stats
//!
//! Two ordered passes: flat additions first, then percentages against the
//! post-flat value. Forge bonuses from forged gear compound on top of the
//! additive percentage bucket instead of joining it.

mod stat_value;

pub use stat_value::StatValue;

use crate::catalog::{BaseAttributes, OperatorDef, WeaponDef};
use crate::collector::ResolvedEffect;
use crate::config::EngineConstants;
use crate::effect::EffectType;
use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// Stats before any effect applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBaseline {
    pub attack: f64,
    pub attributes: BaseAttributes,
}

impl StatBaseline {
    /// Operator base attack plus the weapon's
    pub fn new(operator: &OperatorDef, weapon: Option<&WeaponDef>) -> Self {
        StatBaseline {
            attack: operator.base_attack + weapon.map_or(0.0, |w| w.base_attack),
            attributes: operator.attributes,
        }
    }
}

/// Stats after every counted effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStats {
    pub attack: StatValue,
    pub strength: StatValue,
    pub agility: StatValue,
    pub intellect: StatValue,
    pub will: StatValue,
    /// Flat part is the rate as a fraction
    pub crit_rate: StatValue,
    /// Flat part is the crit multiplier (1.5 = +50%)
    pub crit_damage: StatValue,
}

impl ResolvedStats {
    pub fn from_baseline(baseline: &StatBaseline, constants: &EngineConstants) -> Self {
        let attrs = &baseline.attributes;
        ResolvedStats {
            attack: StatValue::with_base(baseline.attack),
            strength: StatValue::with_base(attrs.strength),
            agility: StatValue::with_base(attrs.agility),
            intellect: StatValue::with_base(attrs.intellect),
            will: StatValue::with_base(attrs.will),
            crit_rate: StatValue::with_base(constants.crit.base_rate),
            crit_damage: StatValue::with_base(constants.crit.base_damage),
        }
    }

    pub fn attack_power(&self) -> f64 {
        self.attack.compute()
    }

    pub fn stat(&self, kind: StatKind) -> &StatValue {
        match kind {
            StatKind::Attack => &self.attack,
            StatKind::Strength => &self.strength,
            StatKind::Agility => &self.agility,
            StatKind::Intellect => &self.intellect,
            StatKind::Will => &self.will,
        }
    }

    fn stat_mut(&mut self, kind: StatKind) -> &mut StatValue {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Strength => &mut self.strength,
            StatKind::Agility => &mut self.agility,
            StatKind::Intellect => &mut self.intellect,
            StatKind::Will => &mut self.will,
        }
    }

    /// Crit rate clamped to `0..=1`
    pub fn crit_chance(&self) -> f64 {
        self.crit_rate.compute().clamp(0.0, 1.0)
    }

    /// Expected-value multiplier: `1 + rate × (critDamage − 1)`
    pub fn crit_expectation(&self) -> f64 {
        1.0 + self.crit_chance() * (self.crit_damage.compute() - 1.0)
    }

    /// Compact view for result reporting
    pub fn summary(&self) -> StatSummary {
        StatSummary {
            attack: self.attack_power(),
            strength: self.strength.compute(),
            agility: self.agility.compute(),
            intellect: self.intellect.compute(),
            will: self.will.compute(),
            crit_rate: self.crit_chance(),
            crit_damage: self.crit_damage.compute(),
        }
    }
}

/// Final stat numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub attack: f64,
    pub strength: f64,
    pub agility: f64,
    pub intellect: f64,
    pub will: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
}

fn stat_kind(kind: EffectType) -> Option<StatKind> {
    match kind {
        EffectType::AttackIncrease => Some(StatKind::Attack),
        EffectType::Stat(stat) => Some(stat),
        _ => None,
    }
}

/// Apply counted effects to the baseline.
///
/// Effects that do not count (inactive or non-damage) are ignored, so the
/// caller can pass a whole resolution.
pub fn apply_stats(
    effects: &[&ResolvedEffect<'_>],
    baseline: &StatBaseline,
    constants: &EngineConstants,
) -> ResolvedStats {
    let mut stats = ResolvedStats::from_baseline(baseline, constants);

    // Pass 1: flat additions
    for resolved in effects.iter().filter(|r| r.counts()) {
        if let Some(kind) = stat_kind(resolved.effect.kind) {
            if resolved.amount.flat != 0.0 {
                stats.stat_mut(kind).add_flat(resolved.amount.flat);
            }
        }
    }

    // Pass 2: percentages, forge bonuses in their own multiplicative bucket
    for resolved in effects.iter().filter(|r| r.counts()) {
        let fraction = resolved.amount.fraction;
        match resolved.effect.kind {
            EffectType::CritRate => stats.crit_rate.add_flat(fraction),
            EffectType::CritDamage => stats.crit_damage.add_flat(fraction),
            kind => {
                let Some(stat) = stat_kind(kind) else {
                    continue;
                };
                if fraction == 0.0 {
                    continue;
                }
                if resolved.effect.forged {
                    stats.stat_mut(stat).add_forge(fraction);
                } else {
                    stats.stat_mut(stat).add_percent(fraction);
                }
            }
        }
    }

    tracing::trace!(
        attack = stats.attack_power(),
        crit_rate = stats.crit_chance(),
        "stats applied"
    );
    stats
}
