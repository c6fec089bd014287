//! Debuff-bound effects - magnitudes read from BattleState counters

use crate::config::{DebuffRule, EngineConstants};
use crate::diagnostics::Diagnostic;
use crate::effect::{Effect, EffectSource, EffectType, EffectUid, Magnitude};
use crate::state::BattleState;
use crate::types::Scope;

/// Fixed UID of a debuff-bound effect
pub fn debuff_uid(name: &str) -> EffectUid {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    EffectUid(format!("debuff_{compact}"))
}

/// Build one effect per debuff rule whose counter is non-zero
pub fn debuff_effects(
    battle: &BattleState,
    constants: &EngineConstants,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Effect> {
    constants
        .debuffs
        .iter()
        .filter_map(|rule| debuff_effect(rule, battle, diagnostics))
        .collect()
}

fn debuff_effect(
    rule: &DebuffRule,
    battle: &BattleState,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Effect> {
    let uid = debuff_uid(&rule.name);
    let Some(stacks) = battle.counter(&rule.name) else {
        tracing::warn!(%uid, counter = %rule.name, "debuff rule names no battle counter");
        diagnostics.push(Diagnostic::UnknownTrigger {
            origin: uid.0,
            name: rule.name.clone(),
        });
        return None;
    };
    if stacks == 0 {
        return None;
    }
    let Some(kind) = EffectType::parse(&rule.kind, None) else {
        tracing::warn!(%uid, kind = %rule.kind, "debuff rule has unknown effect type");
        diagnostics.push(Diagnostic::UnknownEffectType {
            origin: uid.0,
            raw: rule.kind.clone(),
        });
        return None;
    };

    let counted = stacks.min(rule.max_stacks);
    Some(Effect {
        uid,
        kind,
        label: rule.kind.clone(),
        value: Some(Magnitude::percent(rule.per_stack * f64::from(counted))),
        scope: Scope::Enemy,
        source: EffectSource::Debuff {
            name: rule.name.clone(),
        },
        non_stack_key: None,
        trigger: None,
        bonuses: Vec::new(),
        skill_filter: Vec::new(),
        forged: false,
        invalid: Vec::new(),
    })
}
