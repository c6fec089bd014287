//! Effect - the normalized unit of computation

mod magnitude;
mod source;

pub use magnitude::{Amount, Magnitude};
pub use source::{EffectSource, SubOrigin};

use crate::trigger::{BonusSpec, TriggerSpec};
use crate::types::{DamageTag, Scope, SkillCategory, StatKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an effect, used for toggling and display
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectUid(pub String);

impl EffectUid {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Variant that disables the effect for one skill category only
    pub fn scoped(&self, category: SkillCategory) -> String {
        format!("{}#{}", self.0, category.label())
    }
}

impl fmt::Display for EffectUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EffectUid {
    fn from(s: &str) -> Self {
        EffectUid(s.to_string())
    }
}

/// How a skill-multiplier effect combines with the skill's base multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierForm {
    /// Percentage points added to the multiplier (`dmg`)
    Points,
    /// Multiplies the multiplier by `1 + val`
    Factor,
}

/// Closed vocabulary of modifier kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    AttackIncrease,
    Stat(StatKind),
    /// "주는 피해": general given-damage increase
    DamageIncrease,
    ElementDamage(DamageTag),
    SkillDamage(SkillCategory),
    Amplification(Option<DamageTag>),
    /// "받는 피해" / "취약": enemy-side received damage increase
    Vulnerability(Option<DamageTag>),
    CritRate,
    CritDamage,
    SkillMultiplier(MultiplierForm),
    ResistanceReduction(Option<DamageTag>),
    UltimateCharge,
    SpRecovery,
    Heal,
    Shield,
    Immunity,
}

impl EffectType {
    /// Parse a catalog type name.
    ///
    /// `stat` is the entry's `stat` field, required by the generic `스탯` type.
    pub fn parse(name: &str, stat: Option<&str>) -> Option<EffectType> {
        let name = name.trim();
        let direct = match name {
            "공격력 증가" | "공격력" => Some(EffectType::AttackIncrease),
            "스탯" => {
                return stat
                    .and_then(|s| s.trim().parse::<StatKind>().ok())
                    .map(|kind| match kind {
                        StatKind::Attack => EffectType::AttackIncrease,
                        other => EffectType::Stat(other),
                    })
            }
            "주는 피해" => Some(EffectType::DamageIncrease),
            "증폭" => Some(EffectType::Amplification(None)),
            "받는 피해" | "취약" => Some(EffectType::Vulnerability(None)),
            "치명타 확률" => Some(EffectType::CritRate),
            "치명타 피해" => Some(EffectType::CritDamage),
            "스킬 배율 증가" => Some(EffectType::SkillMultiplier(MultiplierForm::Factor)),
            "저항 감소" => Some(EffectType::ResistanceReduction(None)),
            "궁극기 충전" => Some(EffectType::UltimateCharge),
            "SP 회복" => Some(EffectType::SpRecovery),
            "치유" => Some(EffectType::Heal),
            "보호막" => Some(EffectType::Shield),
            "면역" => Some(EffectType::Immunity),
            _ => None,
        };
        if direct.is_some() {
            return direct;
        }

        if let Ok(kind) = name.parse::<StatKind>() {
            return Some(match kind {
                StatKind::Attack => EffectType::AttackIncrease,
                other => EffectType::Stat(other),
            });
        }
        if let Some(prefix) = name.strip_suffix(" 저항 감소") {
            return prefix
                .parse::<DamageTag>()
                .ok()
                .map(|tag| EffectType::ResistanceReduction(Some(tag)));
        }
        if let Some(prefix) = name.strip_suffix(" 피해") {
            if let Ok(tag) = prefix.parse::<DamageTag>() {
                return Some(EffectType::ElementDamage(tag));
            }
            return prefix.parse::<SkillCategory>().ok().map(EffectType::SkillDamage);
        }
        if let Some(prefix) = name.strip_suffix(" 증폭") {
            return prefix
                .parse::<DamageTag>()
                .ok()
                .map(|tag| EffectType::Amplification(Some(tag)));
        }
        if let Some(prefix) = name.strip_suffix(" 취약") {
            return prefix
                .parse::<DamageTag>()
                .ok()
                .map(|tag| EffectType::Vulnerability(Some(tag)));
        }
        None
    }

    /// Whether absolute values are flat additions rather than percentage points
    pub fn is_stat(self) -> bool {
        matches!(self, EffectType::AttackIncrease | EffectType::Stat(_))
    }

    /// Whether the type can change the damage number at all
    pub fn affects_damage(self) -> bool {
        !matches!(
            self,
            EffectType::UltimateCharge
                | EffectType::SpRecovery
                | EffectType::Heal
                | EffectType::Shield
                | EffectType::Immunity
        )
    }
}

/// A normalized, immutable modifier
///
/// Toggling never mutates an effect; callers exclude it by UID instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub uid: EffectUid,
    pub kind: EffectType,
    /// Display name of the type as authored
    pub label: String,
    /// `None` for flag-like effects that carry no magnitude
    pub value: Option<Magnitude>,
    pub scope: Scope,
    pub source: EffectSource,
    pub non_stack_key: Option<String>,
    pub trigger: Option<TriggerSpec>,
    pub bonuses: Vec<BonusSpec>,
    /// Empty means every skill category
    pub skill_filter: Vec<SkillCategory>,
    /// Percentage stat effects from a forge bonus compound multiplicatively
    pub forged: bool,
    /// Raw texts that failed to parse and were substituted with 0
    pub invalid: Vec<String>,
}

impl Effect {
    /// Whether this effect applies to a skill of the given category
    pub fn applies_to(&self, category: SkillCategory) -> bool {
        self.skill_filter.is_empty() || self.skill_filter.contains(&category)
    }

    /// Whether the effect carries any magnitude at all
    pub fn has_magnitude(&self) -> bool {
        self.value.is_some() || !self.bonuses.is_empty()
    }

    pub fn is_debuff(&self) -> bool {
        matches!(self.source, EffectSource::Debuff { .. })
    }
}
