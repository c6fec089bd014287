//! BuildState - the operator, weapon, gear and sub-operator selection

use serde::{Deserialize, Serialize};

/// Number of gear slots on an operator
pub const GEAR_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSelection {
    pub id: String,
    #[serde(default)]
    pub potential: u8,
    #[serde(default)]
    pub forged: bool,
}

impl WeaponSelection {
    pub fn new(id: &str) -> Self {
        WeaponSelection {
            id: id.to_string(),
            potential: 0,
            forged: false,
        }
    }

    pub fn with_potential(mut self, potential: u8) -> Self {
        self.potential = potential;
        self
    }

    pub fn forged(mut self) -> Self {
        self.forged = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSelection {
    pub id: String,
    #[serde(default)]
    pub forged: bool,
}

impl GearSelection {
    pub fn new(id: &str) -> Self {
        GearSelection {
            id: id.to_string(),
            forged: false,
        }
    }

    pub fn forged(mut self) -> Self {
        self.forged = true;
        self
    }
}

/// A party member contributing shared modifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubOperatorSelection {
    pub operator: String,
    #[serde(default)]
    pub potential: u8,
    #[serde(default)]
    pub weapon: Option<WeaponSelection>,
}

impl SubOperatorSelection {
    pub fn new(operator: &str) -> Self {
        SubOperatorSelection {
            operator: operator.to_string(),
            potential: 0,
            weapon: None,
        }
    }

    pub fn with_potential(mut self, potential: u8) -> Self {
        self.potential = potential;
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponSelection) -> Self {
        self.weapon = Some(weapon);
        self
    }
}

/// The build under evaluation. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub potential: u8,
    /// Skill level key (`"M3"`); the engine default applies when absent
    #[serde(default)]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub weapon: Option<WeaponSelection>,
    #[serde(default)]
    pub gear: [Option<GearSelection>; GEAR_SLOTS],
    #[serde(default)]
    pub subs: Vec<SubOperatorSelection>,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_operator(id: &str) -> Self {
        BuildState {
            operator: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_potential(mut self, potential: u8) -> Self {
        self.potential = potential;
        self
    }

    pub fn with_skill_level(mut self, level: &str) -> Self {
        self.skill_level = Some(level.to_string());
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponSelection) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Equip gear into a slot; out-of-range slots are ignored
    pub fn with_gear(mut self, slot: usize, gear: GearSelection) -> Self {
        if let Some(entry) = self.gear.get_mut(slot) {
            *entry = Some(gear);
        }
        self
    }

    pub fn with_sub(mut self, sub: SubOperatorSelection) -> Self {
        self.subs.push(sub);
        self
    }

    /// Equipped gear with its slot index
    pub fn equipped_gear(&self) -> impl Iterator<Item = (usize, &GearSelection)> {
        self.gear
            .iter()
            .enumerate()
            .filter_map(|(slot, g)| g.as_ref().map(|g| (slot, g)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let build = BuildState::for_operator("op")
            .with_potential(2)
            .with_weapon(WeaponSelection::new("sword").with_potential(3).forged())
            .with_gear(1, GearSelection::new("kit"))
            .with_gear(9, GearSelection::new("ignored"))
            .with_sub(SubOperatorSelection::new("ally"));

        assert_eq!(build.operator.as_deref(), Some("op"));
        assert!(build.weapon.as_ref().is_some_and(|w| w.forged && w.potential == 3));
        let gear: Vec<_> = build.equipped_gear().map(|(slot, g)| (slot, g.id.as_str())).collect();
        assert_eq!(gear, vec![(1, "kit")]);
        assert_eq!(build.subs.len(), 1);
    }

    #[test]
    fn test_empty_build_deserializes() {
        let build: BuildState = serde_json::from_str("{}").unwrap();
        assert_eq!(build, BuildState::default());
    }
}
