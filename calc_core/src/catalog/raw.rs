//! Raw catalog declarations, as authored
//!
//! These shapes are deliberately loose: most fields may be a scalar or an
//! array, and most may be absent. `catalog::reader` turns them into
//! canonical `Effect`s and nothing downstream sees this ambiguity.

use crate::types::SkillCategory;
use serde::{Deserialize, Serialize};

/// A numeric field: either a bare number or a string such as `"24.6%"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// A field that may hold one value or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// View as a slice regardless of shape
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(vs) => vs,
        }
    }

    /// Value paired with the `index`-th sibling.
    ///
    /// A scalar is shared by every sibling; a list is positional.
    pub fn pick(&self, index: usize) -> Option<&T> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(vs) => vs.get(index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(v: T) -> Self {
        OneOrMany::One(v)
    }
}

/// Non-stacking marker: `true` keys on the source, a string names a shared key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NonStack {
    Flag(bool),
    Key(String),
}

/// One modifier declaration from any catalog source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffect {
    /// Effect type name(s); entries without one are descriptive only
    #[serde(default, rename = "type")]
    pub kind: Option<OneOrMany<String>>,
    #[serde(default)]
    pub val: Option<OneOrMany<RawValue>>,
    /// Additive skill-multiplier points
    #[serde(default)]
    pub dmg: Option<OneOrMany<RawValue>>,
    /// Replaces `val` when the owning weapon or gear is forged
    #[serde(default)]
    pub forge_val: Option<OneOrMany<RawValue>>,
    #[serde(default)]
    pub target: Option<String>,
    /// Stat name for the generic `스탯` type
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default)]
    pub non_stack: Option<NonStack>,
    #[serde(default)]
    pub trigger: Option<OneOrMany<String>>,
    #[serde(default)]
    pub bonus: Option<OneOrMany<RawBonus>>,
    #[serde(default)]
    pub skill_type: Option<OneOrMany<SkillCategory>>,
    /// Minimum potential level that unlocks this entry
    #[serde(default)]
    pub potential: Option<u8>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl RawEffect {
    /// Shorthand used by tests and programmatic catalogs
    pub fn new(kind: &str, val: impl Into<RawValue>) -> Self {
        RawEffect {
            kind: Some(OneOrMany::One(kind.to_string())),
            val: Some(OneOrMany::One(val.into())),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_trigger(mut self, trigger: &str) -> Self {
        self.trigger = Some(OneOrMany::One(trigger.to_string()));
        self
    }

    pub fn with_bonus(mut self, bonus: RawBonus) -> Self {
        self.bonus = Some(OneOrMany::One(bonus));
        self
    }

    pub fn with_non_stack(mut self, non_stack: NonStack) -> Self {
        self.non_stack = Some(non_stack);
        self
    }

    pub fn with_potential(mut self, level: u8) -> Self {
        self.potential = Some(level);
        self
    }
}

/// Conditional extra magnitude attached to an effect or a skill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBonus {
    #[serde(default)]
    pub trigger: Option<OneOrMany<String>>,
    #[serde(default)]
    pub val: Option<RawValue>,
    #[serde(default)]
    pub base: Option<RawValue>,
    #[serde(default)]
    pub per_stack: Option<RawValue>,
    #[serde(default)]
    pub max_stack: Option<u32>,
}

impl RawBonus {
    pub fn flat(trigger: &str, val: impl Into<RawValue>) -> Self {
        RawBonus {
            trigger: Some(OneOrMany::One(trigger.to_string())),
            val: Some(val.into()),
            ..Default::default()
        }
    }

    pub fn stacked(
        trigger: Option<&str>,
        base: impl Into<RawValue>,
        per_stack: impl Into<RawValue>,
        max_stack: Option<u32>,
    ) -> Self {
        RawBonus {
            trigger: trigger.map(|t| OneOrMany::One(t.to_string())),
            base: Some(base.into()),
            per_stack: Some(per_stack.into()),
            max_stack,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_and_array_fields() {
        let json = r#"[
            {"type": "공격력 증가", "val": "30%"},
            {"type": ["치명타 확률", "치명타 피해"], "val": ["5%", 20], "nonStack": true},
            {"desc": "flavor text only"}
        ]"#;
        let entries: Vec<RawEffect> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].val.as_ref().and_then(|v| v.pick(3)),
            Some(&RawValue::Text("30%".to_string()))
        );
        let types = entries[1].kind.as_ref().unwrap().as_slice();
        assert_eq!(types.len(), 2);
        assert_eq!(
            entries[1].val.as_ref().and_then(|v| v.pick(1)),
            Some(&RawValue::Number(20.0))
        );
        assert_eq!(entries[1].non_stack, Some(NonStack::Flag(true)));
        assert!(entries[2].kind.is_none());
    }

    #[test]
    fn test_bonus_forms() {
        let json = r#"{"type": "물리 피해", "bonus": [
            {"trigger": "방어 불능", "base": "150%", "perStack": "150%", "maxStack": 4},
            {"trigger": ["연소", "감전"], "val": "10%"}
        ]}"#;
        let entry: RawEffect = serde_json::from_str(json).unwrap();
        let bonuses = entry.bonus.as_ref().unwrap().as_slice();

        assert_eq!(bonuses[0].max_stack, Some(4));
        assert_eq!(bonuses[0].per_stack, Some(RawValue::Text("150%".to_string())));
        assert_eq!(bonuses[1].trigger.as_ref().unwrap().as_slice().len(), 2);
    }
}
