//! EffectSource - where an effect was harvested from

use crate::types::SourceKind;
use serde::{Deserialize, Serialize};

/// Origin of an effect inside a sub-operator's kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubOrigin {
    Talent,
    Potential,
    WeaponTrait,
}

/// Catalog source of an effect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSource {
    Skill { operator: String, skill: String },
    Talent { operator: String },
    Potential { operator: String },
    WeaponTrait { weapon: String, wielder: String },
    GearTrait { gear: String, slot: usize, wearer: String, forge: bool },
    SetBonus { set: String, pieces: u8, wearer: String },
    SubOperator { operator: String, slot: usize, origin: SubOrigin, weapon: Option<String> },
    Debuff { name: String },
}

impl EffectSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            EffectSource::Skill { .. } => SourceKind::Skill,
            EffectSource::Talent { .. } => SourceKind::Talent,
            EffectSource::Potential { .. } => SourceKind::Potential,
            EffectSource::WeaponTrait { .. } => SourceKind::WeaponTrait,
            EffectSource::GearTrait { .. } => SourceKind::GearTrait,
            EffectSource::SetBonus { .. } => SourceKind::SetBonus,
            EffectSource::SubOperator { .. } => SourceKind::SubOperator,
            EffectSource::Debuff { .. } => SourceKind::Debuff,
        }
    }

    /// Catalog id used as the UID prefix and the default non-stack owner
    pub fn source_id(&self) -> &str {
        match self {
            EffectSource::Skill { operator, .. }
            | EffectSource::Talent { operator }
            | EffectSource::Potential { operator } => operator.as_str(),
            EffectSource::WeaponTrait { weapon, .. } => weapon.as_str(),
            EffectSource::GearTrait { gear, .. } => gear.as_str(),
            EffectSource::SetBonus { set, .. } => set.as_str(),
            EffectSource::SubOperator {
                operator,
                origin,
                weapon,
                ..
            } => match (origin, weapon) {
                (SubOrigin::WeaponTrait, Some(w)) => w.as_str(),
                _ => operator.as_str(),
            },
            EffectSource::Debuff { name } => name.as_str(),
        }
    }

    /// Middle segment of the UID, identifying the list the entry came from
    pub fn origin_label(&self) -> String {
        match self {
            EffectSource::Skill { .. } => "skill".to_string(),
            EffectSource::Talent { .. } => "talent".to_string(),
            EffectSource::Potential { .. } => "potential".to_string(),
            EffectSource::WeaponTrait { .. } => "trait".to_string(),
            EffectSource::GearTrait { slot, forge, .. } => {
                if *forge {
                    format!("slot{slot}forge")
                } else {
                    format!("slot{slot}trait")
                }
            }
            EffectSource::SetBonus { pieces, .. } => format!("set{pieces}pc"),
            EffectSource::SubOperator { slot, origin, .. } => match origin {
                SubOrigin::Talent => format!("sub{slot}talent"),
                SubOrigin::Potential => format!("sub{slot}potential"),
                SubOrigin::WeaponTrait => format!("sub{slot}trait"),
            },
            EffectSource::Debuff { .. } => "debuff".to_string(),
        }
    }

    /// Operator whose special stacks this effect's triggers read
    pub fn owner(&self) -> Option<&str> {
        match self {
            EffectSource::Skill { operator, .. }
            | EffectSource::Talent { operator }
            | EffectSource::Potential { operator }
            | EffectSource::SubOperator { operator, .. } => Some(operator.as_str()),
            EffectSource::WeaponTrait { wielder, .. } => Some(wielder.as_str()),
            EffectSource::GearTrait { wearer, .. } | EffectSource::SetBonus { wearer, .. } => {
                Some(wearer.as_str())
            }
            EffectSource::Debuff { .. } => None,
        }
    }

    /// Whether the effect belongs to a sub-operator rather than the main operator
    pub fn is_sub_operator(&self) -> bool {
        matches!(self, EffectSource::SubOperator { .. })
    }

    /// Whether forge values apply to entries from this source
    pub fn forge_sensitive(&self) -> bool {
        matches!(
            self,
            EffectSource::WeaponTrait { .. }
                | EffectSource::GearTrait { .. }
                | EffectSource::SubOperator {
                    origin: SubOrigin::WeaponTrait,
                    ..
                }
        )
    }
}
