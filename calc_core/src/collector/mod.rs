//! Effect collector - harvest, dedup, exclude and resolve
//!
//! Sources are harvested in dedup priority order (character, weapon, gear,
//! set, sub-operators) so the first effect seen for a non-stack key is
//! also the one that survives.

mod debuff;
mod dedup;

pub use debuff::{debuff_effects, debuff_uid};
pub use dedup::{dedup_non_stacking, ensure_unique_uids};

use crate::catalog::reader::{read_entry, ReadContext};
use crate::catalog::{Catalog, OperatorDef, RawEffect, WeaponDef};
use crate::diagnostics::Diagnostic;
use crate::effect::{Amount, Effect, EffectSource, SubOrigin};
use crate::state::{BattleState, BuildState, WeaponSelection};
use crate::trigger::{StackPolicy, TriggerContext};
use crate::types::SkillCategory;
use std::collections::{BTreeMap, HashSet};

/// Effects harvested for one build
#[derive(Debug, Clone)]
pub struct CollectedBuild<'a> {
    pub operator: &'a OperatorDef,
    pub weapon: Option<&'a WeaponDef>,
    /// Deduplicated effects, disabled UIDs already removed
    pub effects: Vec<Effect>,
    /// Non-stack duplicates that lost to a higher priority copy
    pub discarded: Vec<Effect>,
}

/// Whether `disabled` switches the effect off for a skill category
pub fn is_disabled(effect: &Effect, category: Option<SkillCategory>, disabled: &HashSet<String>) -> bool {
    disabled.contains(effect.uid.as_str())
        || category.is_some_and(|c| disabled.contains(&effect.uid.scoped(c)))
}

/// Harvest every effect of the build.
///
/// An unknown main operator, weapon or gear id makes the whole build
/// inconsistent and is returned as the error. Unknown sets and
/// sub-operators are reported and skipped.
pub fn collect<'a>(
    catalog: &'a Catalog,
    build: &BuildState,
    disabled: &HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<CollectedBuild<'a>, Diagnostic> {
    let operator_id = build.operator.as_deref().unwrap_or_default();
    let operator = catalog
        .operator(operator_id)
        .ok_or_else(|| Diagnostic::UnknownOperator(operator_id.to_string()))?;

    let mut harvest = Harvest {
        effects: Vec::new(),
        diagnostics,
    };
    harvest.operator_kit(operator, build.potential);

    let weapon = match &build.weapon {
        Some(selection) => {
            let def = catalog
                .weapon(&selection.id)
                .ok_or_else(|| Diagnostic::UnknownWeapon(selection.id.clone()))?;
            let source = EffectSource::WeaponTrait {
                weapon: def.id.clone(),
                wielder: operator.id.clone(),
            };
            harvest.weapon_traits(def, selection, &source, |_| true);
            Some(def)
        }
        None => None,
    };

    let mut set_pieces: BTreeMap<&str, u8> = BTreeMap::new();
    for (slot, selection) in build.equipped_gear() {
        let def = catalog
            .gear(&selection.id)
            .ok_or_else(|| Diagnostic::UnknownGear(selection.id.clone()))?;
        let plain = EffectSource::GearTrait {
            gear: def.id.clone(),
            slot,
            wearer: operator.id.clone(),
            forge: false,
        };
        harvest.entries(&def.traits, &plain, selection.forged, |_| true);
        if selection.forged {
            let forge = EffectSource::GearTrait {
                gear: def.id.clone(),
                slot,
                wearer: operator.id.clone(),
                forge: true,
            };
            harvest.entries(&def.forge_bonus, &forge, true, |_| true);
        }
        if let Some(set) = def.set.as_deref() {
            *set_pieces.entry(set).or_insert(0) += 1;
        }
    }

    for (set_id, count) in set_pieces {
        let Some(set) = catalog.set(set_id) else {
            tracing::warn!(set = set_id, "unknown set skipped");
            harvest.diagnostics.push(Diagnostic::UnknownSet(set_id.to_string()));
            continue;
        };
        for bonus in set.bonuses.iter().filter(|b| b.pieces <= count) {
            let source = EffectSource::SetBonus {
                set: set.id.clone(),
                pieces: bonus.pieces,
                wearer: operator.id.clone(),
            };
            harvest.entries(&bonus.effects, &source, false, |_| true);
        }
    }

    for (slot, sub) in build.subs.iter().enumerate() {
        let Some(def) = catalog.operator(&sub.operator) else {
            tracing::warn!(operator = %sub.operator, slot, "unknown sub-operator skipped");
            harvest
                .diagnostics
                .push(Diagnostic::UnknownOperator(sub.operator.clone()));
            continue;
        };
        let source = |origin, weapon: Option<String>| EffectSource::SubOperator {
            operator: def.id.clone(),
            slot,
            origin,
            weapon,
        };
        harvest.entries(&def.talents, &source(SubOrigin::Talent, None), false, shared);
        harvest.potentials(&def.potentials, &source(SubOrigin::Potential, None), sub.potential, shared);

        if let Some(selection) = &sub.weapon {
            match catalog.weapon(&selection.id) {
                Some(weapon) => {
                    let src = source(SubOrigin::WeaponTrait, Some(weapon.id.clone()));
                    harvest.weapon_traits(weapon, selection, &src, shared);
                }
                None => {
                    tracing::warn!(weapon = %selection.id, slot, "unknown sub-operator weapon skipped");
                    harvest
                        .diagnostics
                        .push(Diagnostic::UnknownWeapon(selection.id.clone()));
                }
            }
        }
    }

    let mut effects = harvest.effects;
    ensure_unique_uids(&mut effects);
    let harvested = effects.len();
    let (mut effects, discarded) = dedup_non_stacking(effects);
    effects.retain(|e| !disabled.contains(e.uid.as_str()));

    tracing::debug!(
        operator = %operator.id,
        harvested,
        discarded = discarded.len(),
        kept = effects.len(),
        "effects collected"
    );

    Ok(CollectedBuild {
        operator,
        weapon,
        effects,
        discarded,
    })
}

fn shared(effect: &Effect) -> bool {
    effect.scope.is_shared()
}

struct Harvest<'d> {
    effects: Vec<Effect>,
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl Harvest<'_> {
    fn operator_kit(&mut self, operator: &OperatorDef, potential: u8) {
        let own = |e: &Effect| e.scope.reaches_owner();
        let mut index = 0;
        for skill in &operator.skills {
            let source = EffectSource::Skill {
                operator: operator.id.clone(),
                skill: skill.id.clone(),
            };
            for entry in &skill.effects {
                self.entry(entry, &source, index, false, own);
                index += 1;
            }
        }
        let talents = EffectSource::Talent {
            operator: operator.id.clone(),
        };
        self.entries(&operator.talents, &talents, false, own);
        let potentials = EffectSource::Potential {
            operator: operator.id.clone(),
        };
        self.potentials(&operator.potentials, &potentials, potential, own);
    }

    /// Potential entries unlock at their declared level, or in list order
    fn potentials(
        &mut self,
        entries: &[RawEffect],
        source: &EffectSource,
        level: u8,
        keep: impl Fn(&Effect) -> bool,
    ) {
        for (index, entry) in entries.iter().enumerate() {
            let required = entry
                .potential
                .unwrap_or_else(|| u8::try_from(index + 1).unwrap_or(u8::MAX));
            if required <= level {
                self.entry(entry, source, index, false, &keep);
            }
        }
    }

    fn weapon_traits(
        &mut self,
        weapon: &WeaponDef,
        selection: &WeaponSelection,
        source: &EffectSource,
        keep: impl Fn(&Effect) -> bool,
    ) {
        for (index, entry) in weapon.traits.iter().enumerate() {
            if entry.potential.unwrap_or(0) <= selection.potential {
                self.entry(entry, source, index, selection.forged, &keep);
            }
        }
    }

    fn entries(
        &mut self,
        entries: &[RawEffect],
        source: &EffectSource,
        forged: bool,
        keep: impl Fn(&Effect) -> bool,
    ) {
        for (index, entry) in entries.iter().enumerate() {
            self.entry(entry, source, index, forged, &keep);
        }
    }

    fn entry(
        &mut self,
        entry: &RawEffect,
        source: &EffectSource,
        origin_index: usize,
        forged: bool,
        keep: impl Fn(&Effect) -> bool,
    ) {
        let ctx = ReadContext {
            source,
            origin_index,
            forged,
        };
        for effect in read_entry(entry, &ctx, self.diagnostics) {
            if keep(&effect) {
                self.effects.push(effect);
            } else {
                tracing::trace!(uid = %effect.uid, scope = ?effect.scope, "out of scope for this operator");
            }
        }
    }
}

/// An effect resolved for one skill context
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEffect<'a> {
    pub effect: &'a Effect,
    pub active: bool,
    pub stacks: u32,
    /// Base value plus every active bonus
    pub amount: Amount,
    /// Trigger names that matched no family
    pub unknown_triggers: Vec<String>,
}

impl ResolvedEffect<'_> {
    /// Whether the effect takes part in damage arithmetic
    pub fn counts(&self) -> bool {
        self.active && self.effect.kind.affects_damage()
    }
}

/// Inputs shared by every resolution of one computation
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub catalog: &'a Catalog,
    pub battle: &'a BattleState,
    pub skill: Option<SkillCategory>,
    pub policy: StackPolicy,
}

impl<'a> ResolveContext<'a> {
    fn triggers_for(&self, effect: &Effect) -> TriggerContext<'a> {
        TriggerContext {
            battle: self.battle,
            owner: effect.source.owner().and_then(|id| self.catalog.operator(id)),
            skill: self.skill,
            policy: self.policy,
        }
    }
}

/// Resolve triggers and bonuses of one effect.
///
/// The effect trigger gates the base value; each bonus follows its own
/// trigger, falling back to the effect trigger.
pub fn resolve_effect<'e>(effect: &'e Effect, ctx: &ResolveContext<'_>) -> ResolvedEffect<'e> {
    let mut resolved = ResolvedEffect {
        effect,
        active: false,
        stacks: 0,
        amount: Amount::ZERO,
        unknown_triggers: Vec::new(),
    };
    if let Some(category) = ctx.skill {
        if !effect.applies_to(category) {
            return resolved;
        }
    }

    let triggers = ctx.triggers_for(effect);
    if let Some(spec) = &effect.trigger {
        let gate = triggers.evaluate(spec);
        resolved.unknown_triggers = gate.unknown;
        resolved.stacks = gate.stacks;
        if !gate.active {
            return resolved;
        }
    }

    let stat_like = effect.kind.is_stat();
    let mut any_bonus = false;
    if let Some(value) = effect.value {
        resolved.amount = value.amount(stat_like);
    }
    for bonus in &effect.bonuses {
        let res = triggers.resolve_bonus(bonus, effect.trigger.as_ref(), stat_like);
        for name in res.unknown {
            if !resolved.unknown_triggers.contains(&name) {
                resolved.unknown_triggers.push(name);
            }
        }
        if res.active {
            any_bonus = true;
            resolved.stacks = resolved.stacks.max(res.stacks);
            resolved.amount = resolved.amount + res.amount;
        }
    }
    // Flag-like effects with no magnitude are present once collected
    resolved.active = effect.value.is_some() || any_bonus || !effect.has_magnitude();
    resolved
}
