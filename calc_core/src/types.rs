//! Closed vocabularies shared by the catalog, the battle state and the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Damage element of a skill or effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "물리", alias = "physical")]
    Physical,
    #[serde(rename = "열기", alias = "heat")]
    Heat,
    #[serde(rename = "전기", alias = "electric")]
    Electric,
    #[serde(rename = "냉기", alias = "cryo")]
    Cryo,
    #[serde(rename = "자연", alias = "nature")]
    Nature,
}

impl Element {
    /// Get all elements
    pub fn all() -> &'static [Element] {
        &[
            Element::Physical,
            Element::Heat,
            Element::Electric,
            Element::Cryo,
            Element::Nature,
        ]
    }

    /// Arts elements (everything except physical)
    pub fn arts() -> &'static [Element] {
        &[Element::Heat, Element::Electric, Element::Cryo, Element::Nature]
    }

    pub fn is_arts(self) -> bool {
        self != Element::Physical
    }

    pub fn label(self) -> &'static str {
        match self {
            Element::Physical => "물리",
            Element::Heat => "열기",
            Element::Electric => "전기",
            Element::Cryo => "냉기",
            Element::Nature => "자연",
        }
    }
}

impl FromStr for Element {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::all()
            .iter()
            .copied()
            .find(|e| e.label() == s)
            .ok_or(())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Element filter carried by element-specific effects
///
/// `Arts` matches every non-physical element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTag {
    Element(Element),
    Arts,
}

impl DamageTag {
    /// Whether a skill of the given element is affected
    pub fn matches(self, element: Element) -> bool {
        match self {
            DamageTag::Element(e) => e == element,
            DamageTag::Arts => element.is_arts(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DamageTag::Element(e) => e.label(),
            DamageTag::Arts => "아츠",
        }
    }
}

impl FromStr for DamageTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "아츠" {
            return Ok(DamageTag::Arts);
        }
        s.parse().map(DamageTag::Element)
    }
}

/// Skill categories of an operator kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "일반 공격", alias = "basic")]
    Basic,
    #[serde(rename = "배틀 스킬", alias = "battle")]
    Battle,
    #[serde(rename = "연계 스킬", alias = "combo")]
    Combo,
    #[serde(rename = "궁극기", alias = "ultimate")]
    Ultimate,
}

impl SkillCategory {
    pub fn all() -> &'static [SkillCategory] {
        &[
            SkillCategory::Basic,
            SkillCategory::Battle,
            SkillCategory::Combo,
            SkillCategory::Ultimate,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Basic => "일반 공격",
            SkillCategory::Battle => "배틀 스킬",
            SkillCategory::Combo => "연계 스킬",
            SkillCategory::Ultimate => "궁극기",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::all()
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or(())
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Character stats touched by the stat pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "공격력")]
    Attack,
    #[serde(rename = "힘")]
    Strength,
    #[serde(rename = "민첩")]
    Agility,
    #[serde(rename = "지능")]
    Intellect,
    #[serde(rename = "의지")]
    Will,
}

impl StatKind {
    /// The four base attributes (attack excluded)
    pub fn attributes() -> &'static [StatKind] {
        &[
            StatKind::Strength,
            StatKind::Agility,
            StatKind::Intellect,
            StatKind::Will,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Attack => "공격력",
            StatKind::Strength => "힘",
            StatKind::Agility => "민첩",
            StatKind::Intellect => "지능",
            StatKind::Will => "의지",
        }
    }
}

impl FromStr for StatKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "공격력" => Ok(StatKind::Attack),
            "힘" => Ok(StatKind::Strength),
            "민첩" => Ok(StatKind::Agility),
            "지능" => Ok(StatKind::Intellect),
            "의지" => Ok(StatKind::Will),
            _ => Err(()),
        }
    }
}

/// Who an effect applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The owner only
    SelfOnly,
    /// The whole team, owner included
    Team,
    /// Every team member except the owner
    TeamOthers,
    /// Applied to the enemy (vulnerability, resistance shred)
    Enemy,
}

impl Scope {
    /// Whether a sub-operator's effect with this scope reaches the main operator
    pub fn is_shared(self) -> bool {
        matches!(self, Scope::Team | Scope::TeamOthers | Scope::Enemy)
    }

    /// Whether the owner's own computation sees this effect
    pub fn reaches_owner(self) -> bool {
        !matches!(self, Scope::TeamOthers)
    }
}

impl FromStr for Scope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "자신" | "self" => Ok(Scope::SelfOnly),
            "팀" | "team" => Ok(Scope::Team),
            "팀 (자신 제외)" | "팀(자신 제외)" | "team_others" => Ok(Scope::TeamOthers),
            "적" | "enemy" => Ok(Scope::Enemy),
            _ => Err(()),
        }
    }
}

/// Catalog source an effect was harvested from
///
/// Declaration order is the dedup priority: earlier kinds win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Skill,
    Talent,
    Potential,
    WeaponTrait,
    GearTrait,
    SetBonus,
    SubOperator,
    Debuff,
}

impl SourceKind {
    /// Dedup priority tier (character > weapon > gear > set > sub-operator)
    pub fn priority(self) -> u8 {
        match self {
            SourceKind::Skill | SourceKind::Talent | SourceKind::Potential => 0,
            SourceKind::WeaponTrait => 1,
            SourceKind::GearTrait => 2,
            SourceKind::SetBonus => 3,
            SourceKind::SubOperator => 4,
            SourceKind::Debuff => 5,
        }
    }
}

/// Physical debuffs tracked on the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhysicalDebuff {
    #[serde(rename = "방어 불능")]
    Defenseless,
    #[serde(rename = "갑옷 파괴")]
    ArmorBreak,
    #[serde(rename = "연타")]
    RepeatedHit,
}

impl PhysicalDebuff {
    pub fn all() -> &'static [PhysicalDebuff] {
        &[
            PhysicalDebuff::Defenseless,
            PhysicalDebuff::ArmorBreak,
            PhysicalDebuff::RepeatedHit,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            PhysicalDebuff::Defenseless => "방어 불능",
            PhysicalDebuff::ArmorBreak => "갑옷 파괴",
            PhysicalDebuff::RepeatedHit => "연타",
        }
    }
}

/// Elemental abnormal statuses on the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Abnormal {
    #[serde(rename = "연소")]
    Burn,
    #[serde(rename = "감전")]
    Shock,
    #[serde(rename = "동결")]
    Freeze,
    #[serde(rename = "부식")]
    Corrosion,
}

impl Abnormal {
    pub fn all() -> &'static [Abnormal] {
        &[Abnormal::Burn, Abnormal::Shock, Abnormal::Freeze, Abnormal::Corrosion]
    }

    pub fn label(self) -> &'static str {
        match self {
            Abnormal::Burn => "연소",
            Abnormal::Shock => "감전",
            Abnormal::Freeze => "동결",
            Abnormal::Corrosion => "부식",
        }
    }
}
