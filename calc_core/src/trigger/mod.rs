//! Trigger evaluation - deciding whether conditional effects are live
//!
//! A trigger is a name resolved against the battle state. Names that match
//! no known family fail closed but are reported as unknown, so missing
//! content shows up in diagnostics instead of looking like "not met".

use crate::catalog::OperatorDef;
use crate::effect::{Amount, Magnitude};
use crate::state::BattleState;
use crate::types::{Abnormal, Element, PhysicalDebuff, SkillCategory};
use serde::{Deserialize, Serialize};

/// Trigger reference attached to an effect or bonus.
///
/// Several names form an any-of condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub names: Vec<String>,
}

impl TriggerSpec {
    pub fn new(names: Vec<String>) -> Option<Self> {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(TriggerSpec { names })
        }
    }

    pub fn single(name: &str) -> Self {
        TriggerSpec {
            names: vec![name.to_string()],
        }
    }
}

/// Magnitude of a bonus block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusAmount {
    Flat(Magnitude),
    Stacked { base: Magnitude, per_stack: Magnitude },
}

/// Conditional extra magnitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSpec {
    /// Falls back to the owning effect's trigger when absent
    pub trigger: Option<TriggerSpec>,
    pub amount: BonusAmount,
    pub max_stack: Option<u32>,
}

impl BonusSpec {
    /// `base + perStack × min(stacks, maxStack ?? stacks)`, or the flat value
    pub fn amount_at(&self, stacks: u32, stat_like: bool) -> Amount {
        match self.amount {
            BonusAmount::Flat(m) => m.amount(stat_like),
            BonusAmount::Stacked { base, per_stack } => {
                let counted = self.max_stack.map_or(stacks, |max| stacks.min(max));
                base.amount(stat_like) + per_stack.amount(stat_like) * f64::from(counted)
            }
        }
    }

    pub fn is_stacked(&self) -> bool {
        matches!(self.amount, BonusAmount::Stacked { .. })
    }
}

/// How untriggered stacking bonuses count their stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPolicy {
    /// One stack; the battle state has no counter for them
    #[default]
    Natural,
    /// Comparison mode: assume the declared maximum
    ForceMax,
}

/// Trigger families
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    Physical(PhysicalDebuff),
    AnyPhysical,
    Attachment(Element),
    AnyAttachment,
    Abnormal(Abnormal),
    AnyAbnormal,
    SkillExecuting(SkillCategory),
    /// Counter registered on the owning operator
    SpecialStack(String),
}

impl TriggerKind {
    /// Resolve a trigger name. Special stacks must be registered on `owner`.
    pub fn parse(name: &str, owner: Option<&OperatorDef>) -> Option<TriggerKind> {
        if let Some(d) = PhysicalDebuff::all().iter().find(|d| d.label() == name) {
            return Some(TriggerKind::Physical(*d));
        }
        if let Some(a) = Abnormal::all().iter().find(|a| a.label() == name) {
            return Some(TriggerKind::Abnormal(*a));
        }
        if let Ok(category) = name.parse::<SkillCategory>() {
            return Some(TriggerKind::SkillExecuting(category));
        }
        match name {
            "물리 이상" => return Some(TriggerKind::AnyPhysical),
            "아츠 부착" => return Some(TriggerKind::AnyAttachment),
            "아츠 이상" => return Some(TriggerKind::AnyAbnormal),
            _ => {}
        }
        if let Some(prefix) = name.strip_suffix(" 부착") {
            if let Ok(element) = prefix.parse::<Element>() {
                if element.is_arts() {
                    return Some(TriggerKind::Attachment(element));
                }
            }
        }
        owner
            .and_then(|op| op.special_stack(name))
            .map(|s| TriggerKind::SpecialStack(s.name.clone()))
    }

    /// Current stack count for this trigger; zero means inactive.
    ///
    /// Special stacks are capped at the owner's registered `max`.
    pub fn observe(
        &self,
        battle: &BattleState,
        owner: Option<&OperatorDef>,
        skill: Option<SkillCategory>,
    ) -> u32 {
        match self {
            TriggerKind::Physical(d) => battle.physical(*d),
            TriggerKind::AnyPhysical => PhysicalDebuff::all()
                .iter()
                .map(|d| battle.physical(*d))
                .sum(),
            TriggerKind::Attachment(e) => battle.attachment(*e),
            TriggerKind::AnyAttachment => Element::arts()
                .iter()
                .map(|e| battle.attachment(*e))
                .sum(),
            TriggerKind::Abnormal(a) => battle.abnormal(*a),
            TriggerKind::AnyAbnormal => Abnormal::all().iter().map(|a| battle.abnormal(*a)).sum(),
            TriggerKind::SkillExecuting(category) => u32::from(skill == Some(*category)),
            TriggerKind::SpecialStack(name) => owner
                .and_then(|op| {
                    let def = op.special_stack(name)?;
                    let stacks = battle.special_stack(&op.id, name);
                    Some(def.max.map_or(stacks, |max| stacks.min(max)))
                })
                .unwrap_or(0),
        }
    }
}

/// Result of evaluating a trigger list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerOutcome {
    pub active: bool,
    pub stacks: u32,
    /// Names that matched no trigger family
    pub unknown: Vec<String>,
}

/// Evaluate a trigger against the battle state.
///
/// Any active member activates the list; stacks are the largest among
/// active members.
pub fn evaluate(
    spec: &TriggerSpec,
    battle: &BattleState,
    operator: Option<&OperatorDef>,
    skill: Option<SkillCategory>,
) -> TriggerOutcome {
    let mut outcome = TriggerOutcome::default();
    for name in &spec.names {
        match TriggerKind::parse(name, operator) {
            Some(kind) => {
                let stacks = kind.observe(battle, operator, skill);
                if stacks > 0 {
                    outcome.active = true;
                    outcome.stacks = outcome.stacks.max(stacks);
                }
            }
            None => {
                tracing::trace!(trigger = %name, "unregistered trigger name");
                outcome.unknown.push(name.clone());
            }
        }
    }
    outcome
}

/// Everything a trigger needs to look at for one skill computation
#[derive(Debug, Clone, Copy)]
pub struct TriggerContext<'a> {
    pub battle: &'a BattleState,
    pub owner: Option<&'a OperatorDef>,
    pub skill: Option<SkillCategory>,
    pub policy: StackPolicy,
}

impl<'a> TriggerContext<'a> {
    pub fn evaluate(&self, spec: &TriggerSpec) -> TriggerOutcome {
        evaluate(spec, self.battle, self.owner, self.skill)
    }

    /// Resolve a bonus block, using `fallback` when it declares no trigger
    pub fn resolve_bonus(
        &self,
        bonus: &BonusSpec,
        fallback: Option<&TriggerSpec>,
        stat_like: bool,
    ) -> BonusResolution {
        match bonus.trigger.as_ref().or(fallback) {
            Some(spec) => {
                let outcome = self.evaluate(spec);
                let amount = if outcome.active {
                    bonus.amount_at(outcome.stacks, stat_like)
                } else {
                    Amount::ZERO
                };
                BonusResolution {
                    active: outcome.active,
                    stacks: outcome.stacks,
                    amount,
                    unknown: outcome.unknown,
                }
            }
            None => {
                let stacks = match self.policy {
                    StackPolicy::ForceMax if bonus.is_stacked() => bonus.max_stack.unwrap_or(1),
                    _ => 1,
                };
                BonusResolution {
                    active: true,
                    stacks,
                    amount: bonus.amount_at(stacks, stat_like),
                    unknown: Vec::new(),
                }
            }
        }
    }
}

/// Resolved bonus block
#[derive(Debug, Clone, PartialEq)]
pub struct BonusResolution {
    pub active: bool,
    pub stacks: u32,
    pub amount: Amount,
    pub unknown: Vec<String>,
}
