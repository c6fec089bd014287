//! BattleState - transient combat status read by triggers

use crate::types::{Abnormal, Element, PhysicalDebuff};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Simulated combat status, independent of the static build.
///
/// The engine only reads it; the caller creates and resets it per scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    #[serde(default)]
    pub physical_debuffs: BTreeMap<PhysicalDebuff, u32>,
    #[serde(default)]
    pub attachments: BTreeMap<Element, u32>,
    #[serde(default)]
    pub abnormals: BTreeMap<Abnormal, u32>,
    /// operator id -> counter name -> stacks
    #[serde(default)]
    pub special_stacks: BTreeMap<String, BTreeMap<String, u32>>,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn physical(&self, debuff: PhysicalDebuff) -> u32 {
        self.physical_debuffs.get(&debuff).copied().unwrap_or(0)
    }

    pub fn attachment(&self, element: Element) -> u32 {
        self.attachments.get(&element).copied().unwrap_or(0)
    }

    pub fn abnormal(&self, status: Abnormal) -> u32 {
        self.abnormals.get(&status).copied().unwrap_or(0)
    }

    pub fn special_stack(&self, operator: &str, name: &str) -> u32 {
        self.special_stacks
            .get(operator)
            .and_then(|m| m.get(name))
            .copied()
            .unwrap_or(0)
    }

    /// Counter by display name (physical debuff, abnormal status or `<element> 부착`)
    pub fn counter(&self, name: &str) -> Option<u32> {
        if let Some(d) = PhysicalDebuff::all().iter().find(|d| d.label() == name) {
            return Some(self.physical(*d));
        }
        if let Some(a) = Abnormal::all().iter().find(|a| a.label() == name) {
            return Some(self.abnormal(*a));
        }
        name.strip_suffix(" 부착")
            .and_then(|prefix| prefix.parse::<Element>().ok())
            .map(|e| self.attachment(e))
    }

    pub fn set_physical(&mut self, debuff: PhysicalDebuff, stacks: u32) {
        set_counter(&mut self.physical_debuffs, debuff, stacks);
    }

    pub fn set_attachment(&mut self, element: Element, stacks: u32) {
        set_counter(&mut self.attachments, element, stacks);
    }

    pub fn set_abnormal(&mut self, status: Abnormal, stacks: u32) {
        set_counter(&mut self.abnormals, status, stacks);
    }

    pub fn set_special_stack(&mut self, operator: &str, name: &str, stacks: u32) {
        let counters = self.special_stacks.entry(operator.to_string()).or_default();
        if stacks == 0 {
            counters.remove(name);
        } else {
            counters.insert(name.to_string(), stacks);
        }
        if counters.is_empty() {
            self.special_stacks.remove(operator);
        }
    }

    pub fn with_physical(mut self, debuff: PhysicalDebuff, stacks: u32) -> Self {
        self.set_physical(debuff, stacks);
        self
    }

    pub fn with_attachment(mut self, element: Element, stacks: u32) -> Self {
        self.set_attachment(element, stacks);
        self
    }

    pub fn with_abnormal(mut self, status: Abnormal, stacks: u32) -> Self {
        self.set_abnormal(status, stacks);
        self
    }

    pub fn with_special_stack(mut self, operator: &str, name: &str, stacks: u32) -> Self {
        self.set_special_stack(operator, name, stacks);
        self
    }

    /// Clear every counter
    pub fn reset(&mut self) {
        *self = BattleState::default();
    }
}

fn set_counter<K: Ord>(map: &mut BTreeMap<K, u32>, key: K, stacks: u32) {
    if stacks == 0 {
        map.remove(&key);
    } else {
        map.insert(key, stacks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_default_to_zero() {
        let battle = BattleState::new();
        assert_eq!(battle.physical(PhysicalDebuff::ArmorBreak), 0);
        assert_eq!(battle.attachment(Element::Heat), 0);
        assert_eq!(battle.special_stack("op", "x"), 0);
    }

    #[test]
    fn test_counter_by_name() {
        let battle = BattleState::new()
            .with_physical(PhysicalDebuff::Defenseless, 3)
            .with_abnormal(Abnormal::Corrosion, 2)
            .with_attachment(Element::Nature, 1);
        assert_eq!(battle.counter("방어 불능"), Some(3));
        assert_eq!(battle.counter("부식"), Some(2));
        assert_eq!(battle.counter("자연 부착"), Some(1));
        assert_eq!(battle.counter("없는 상태"), None);
    }

    #[test]
    fn test_zero_removes_and_reset_clears() {
        let mut battle = BattleState::new().with_special_stack("op", "봉인", 2);
        battle.set_special_stack("op", "봉인", 0);
        assert!(battle.special_stacks.is_empty());

        battle.set_abnormal(Abnormal::Burn, 1);
        battle.reset();
        assert_eq!(battle, BattleState::default());
    }

    #[test]
    fn test_json_roundtrip_keys() {
        let battle = BattleState::new()
            .with_physical(PhysicalDebuff::ArmorBreak, 1)
            .with_special_stack("op", "봉인", 2);
        let json = serde_json::to_string(&battle).unwrap();
        assert!(json.contains("갑옷 파괴"));
        let back: BattleState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, battle);
    }
}
