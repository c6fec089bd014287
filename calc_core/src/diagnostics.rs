//! Diagnostic markers for locally recovered problems
//!
//! Nothing inside the engine is fatal. Bad data degrades to a zero or
//! skipped contribution and leaves one of these behind in the result so
//! the caller can surface it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recovered problem found while computing a build
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("invalid number '{raw}' in {origin}")]
    InvalidNumber { origin: String, raw: String },

    #[error("unknown trigger '{name}' in {origin}")]
    UnknownTrigger { origin: String, name: String },

    #[error("unknown effect type '{raw}' in {origin}")]
    UnknownEffectType { origin: String, raw: String },

    #[error("unknown target '{raw}' in {origin}")]
    UnknownTarget { origin: String, raw: String },

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown weapon '{0}'")]
    UnknownWeapon(String),

    #[error("unknown gear '{0}'")]
    UnknownGear(String),

    #[error("unknown gear set '{0}'")]
    UnknownSet(String),

    #[error("skill '{skill}' has no level '{level}'")]
    MissingSkillLevel { skill: String, level: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let d = Diagnostic::UnknownTrigger {
            origin: "op_talent0".to_string(),
            name: "신규 트리거".to_string(),
        };
        assert_eq!(d.to_string(), "unknown trigger '신규 트리거' in op_talent0");
        assert_eq!(
            Diagnostic::UnknownWeapon("w".to_string()).to_string(),
            "unknown weapon 'w'"
        );
    }
}
