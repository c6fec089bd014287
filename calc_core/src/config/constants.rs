//! Engine constants configuration

use super::ConfigError;
use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tunable engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConstants {
    #[serde(default)]
    pub crit: CritConstants,
    #[serde(default)]
    pub resistance: ResistanceConstants,
    /// Skill level used when the build does not name one
    #[serde(default = "default_skill_level")]
    pub default_skill_level: String,
    /// Debuff-bound effects, one row per battle counter
    #[serde(default = "default_debuffs")]
    pub debuffs: Vec<DebuffRule>,
}

impl Default for EngineConstants {
    fn default() -> Self {
        EngineConstants {
            crit: CritConstants::default(),
            resistance: ResistanceConstants::default(),
            default_skill_level: default_skill_level(),
            debuffs: default_debuffs(),
        }
    }
}

impl EngineConstants {
    /// Reject values the damage formula cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.crit.base_rate) {
            return Err(ConfigError::Invalid(format!(
                "crit.base_rate {} outside 0..=1",
                self.crit.base_rate
            )));
        }
        if self.crit.base_damage < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "crit.base_damage {} below 1",
                self.crit.base_damage
            )));
        }
        if self.default_skill_level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_skill_level is empty".to_string(),
            ));
        }
        for rule in &self.debuffs {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "debuff rule without a name".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Enemy resistance against an element
    pub fn enemy_resistance(&self, element: Element) -> f64 {
        self.resistance.enemy.get(&element).copied().unwrap_or(0.0)
    }
}

fn default_skill_level() -> String {
    "M3".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConstants {
    /// Crit chance every operator starts with (0.05 = 5%)
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    /// Damage multiplier of a critical hit before bonuses
    #[serde(default = "default_base_damage")]
    pub base_damage: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants {
            base_rate: default_base_rate(),
            base_damage: default_base_damage(),
        }
    }
}

fn default_base_rate() -> f64 {
    0.05
}
fn default_base_damage() -> f64 {
    1.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceConstants {
    /// Enemy resistance per element as a fraction; missing elements are 0
    #[serde(default)]
    pub enemy: BTreeMap<Element, f64>,
    /// Floor after reductions (can go negative)
    #[serde(default = "default_min_resistance")]
    pub min: f64,
}

impl Default for ResistanceConstants {
    fn default() -> Self {
        ResistanceConstants {
            enemy: BTreeMap::new(),
            min: default_min_resistance(),
        }
    }
}

fn default_min_resistance() -> f64 {
    -1.0
}

/// A battle counter that turns into an effect on the enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebuffRule {
    /// Battle counter name (`방어 불능`, `감전`, ...)
    pub name: String,
    /// Effect type name, as in catalogs
    #[serde(rename = "type")]
    pub kind: String,
    /// Magnitude per stack as a fraction
    pub per_stack: f64,
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
}

fn default_max_stacks() -> u32 {
    1
}

fn default_debuffs() -> Vec<DebuffRule> {
    let rule = |name: &str, kind: &str, per_stack: f64, max_stacks: u32| DebuffRule {
        name: name.to_string(),
        kind: kind.to_string(),
        per_stack,
        max_stacks,
    };
    vec![
        rule("방어 불능", "물리 취약", 0.04, 4),
        rule("갑옷 파괴", "물리 취약", 0.10, 1),
        rule("감전", "아츠 취약", 0.10, 4),
        rule("부식", "저항 감소", 0.04, 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_defaults() {
        let constants = EngineConstants::default();
        assert!((constants.crit.base_rate - 0.05).abs() < f64::EPSILON);
        assert!((constants.crit.base_damage - 1.5).abs() < f64::EPSILON);
        assert_eq!(constants.default_skill_level, "M3");
        assert_eq!(constants.debuffs.len(), 4);
        assert!(constants.enemy_resistance(Element::Heat).abs() < f64::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let constants: EngineConstants = parse_toml(
            r#"
            default_skill_level = "9"

            [crit]
            base_rate = 0.0

            [resistance.enemy]
            "열기" = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(constants.default_skill_level, "9");
        assert!(constants.crit.base_rate.abs() < f64::EPSILON);
        assert!((constants.crit.base_damage - 1.5).abs() < f64::EPSILON);
        assert!((constants.enemy_resistance(Element::Heat) - 0.2).abs() < f64::EPSILON);
        assert!((constants.resistance.min + 1.0).abs() < f64::EPSILON);
        assert_eq!(constants.debuffs.len(), 4);
    }

    #[test]
    fn test_debuff_table_override() {
        let constants: EngineConstants = parse_toml(
            r#"
            [[debuffs]]
            name = "연소"
            type = "열기 취약"
            per_stack = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(constants.debuffs.len(), 1);
        assert_eq!(constants.debuffs[0].max_stacks, 1);
    }

    #[test]
    fn test_validation() {
        let mut constants = EngineConstants::default();
        constants.crit.base_rate = 1.5;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }
}
