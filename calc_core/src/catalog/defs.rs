//! Static catalog definitions: operators, weapons, gear and sets

use super::raw::{RawBonus, RawEffect, RawValue};
use crate::types::{Element, SkillCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base attributes of an operator at max level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseAttributes {
    #[serde(default, alias = "힘")]
    pub strength: f64,
    #[serde(default, alias = "민첩")]
    pub agility: f64,
    #[serde(default, alias = "지능")]
    pub intellect: f64,
    #[serde(default, alias = "의지")]
    pub will: f64,
}

/// A character-specific counter tracked in `BattleState::special_stacks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialStackDef {
    pub name: String,
    /// Observed stacks never exceed this
    #[serde(default)]
    pub max: Option<u32>,
}

/// One skill of an operator kit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    /// Falls back to the operator's element
    #[serde(default)]
    pub element: Option<Element>,
    /// Base multiplier per skill level (`"M3" => "800%"`)
    #[serde(default)]
    pub dmg: BTreeMap<String, RawValue>,
    /// Extra base multiplier unlocked by triggers
    #[serde(default)]
    pub bonus: Vec<RawBonus>,
    /// Modifiers granted by using the skill
    #[serde(default)]
    pub effects: Vec<RawEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDef {
    pub id: String,
    pub name: String,
    pub element: Element,
    pub base_attack: f64,
    #[serde(default)]
    pub attributes: BaseAttributes,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
    #[serde(default)]
    pub talents: Vec<RawEffect>,
    /// Entries carry the potential level that unlocks them
    #[serde(default)]
    pub potentials: Vec<RawEffect>,
    #[serde(default)]
    pub special_stacks: Vec<SpecialStackDef>,
}

impl OperatorDef {
    pub fn special_stack(&self, name: &str) -> Option<&SpecialStackDef> {
        self.special_stacks.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub base_attack: f64,
    /// Entries carry the weapon potential level that unlocks them
    #[serde(default)]
    pub traits: Vec<RawEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub traits: Vec<RawEffect>,
    /// Extra entries that exist only on a forged piece
    #[serde(default)]
    pub forge_bonus: Vec<RawEffect>,
}

/// Bonus granted once `pieces` items of the set are equipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBonusDef {
    pub pieces: u8,
    #[serde(default)]
    pub effects: Vec<RawEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bonuses: Vec<SetBonusDef>,
}
