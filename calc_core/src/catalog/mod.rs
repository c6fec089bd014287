//! Catalog - read-only tables of operators, weapons, gear and sets
//!
//! The engine accepts catalogs as already-loaded tables. `config` can load
//! them from JSON or TOML files; tests usually build them in code.

mod defs;
mod raw;
pub mod reader;

pub use defs::{
    BaseAttributes, GearDef, OperatorDef, SetBonusDef, SetDef, SkillDef, SpecialStackDef, WeaponDef,
};
pub use raw::{NonStack, OneOrMany, RawBonus, RawEffect, RawValue};

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialized catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub operators: Vec<OperatorDef>,
    #[serde(default)]
    pub weapons: Vec<WeaponDef>,
    #[serde(default)]
    pub gear: Vec<GearDef>,
    #[serde(default)]
    pub sets: Vec<SetDef>,
}

/// Indexed catalog tables
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    operators: HashMap<String, OperatorDef>,
    weapons: HashMap<String, WeaponDef>,
    gear: HashMap<String, GearDef>,
    sets: HashMap<String, SetDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a catalog file, rejecting duplicate ids
    pub fn from_file(file: CatalogFile) -> Result<Self, ConfigError> {
        let mut catalog = Catalog::new();
        for op in file.operators {
            insert_unique(&mut catalog.operators, op.id.clone(), op, "operator")?;
        }
        for weapon in file.weapons {
            insert_unique(&mut catalog.weapons, weapon.id.clone(), weapon, "weapon")?;
        }
        for gear in file.gear {
            insert_unique(&mut catalog.gear, gear.id.clone(), gear, "gear")?;
        }
        for set in file.sets {
            insert_unique(&mut catalog.sets, set.id.clone(), set, "set")?;
        }
        Ok(catalog)
    }

    /// Parse a JSON catalog
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    /// Parse a TOML catalog
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = crate::config::parse_toml(content)?;
        Self::from_file(file)
    }

    pub fn with_operator(mut self, op: OperatorDef) -> Self {
        self.operators.insert(op.id.clone(), op);
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponDef) -> Self {
        self.weapons.insert(weapon.id.clone(), weapon);
        self
    }

    pub fn with_gear(mut self, gear: GearDef) -> Self {
        self.gear.insert(gear.id.clone(), gear);
        self
    }

    pub fn with_set(mut self, set: SetDef) -> Self {
        self.sets.insert(set.id.clone(), set);
        self
    }

    pub fn operator(&self, id: &str) -> Option<&OperatorDef> {
        self.operators.get(id)
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponDef> {
        self.weapons.get(id)
    }

    pub fn gear(&self, id: &str) -> Option<&GearDef> {
        self.gear.get(id)
    }

    pub fn set(&self, id: &str) -> Option<&SetDef> {
        self.sets.get(id)
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }
}

fn insert_unique<T>(
    map: &mut HashMap<String, T>,
    id: String,
    value: T,
    what: &str,
) -> Result<(), ConfigError> {
    if map.contains_key(&id) {
        return Err(ConfigError::Invalid(format!(
            "duplicate {what} id '{id}'"
        )));
    }
    map.insert(id, value);
    Ok(())
}
