//! Catalog reader - raw declarations to canonical effects
//!
//! Every shape ambiguity of the raw catalog (scalar or array fields,
//! missing values, compound type lists) ends here.

use super::raw::{NonStack, RawBonus, RawEffect, RawValue};
use crate::diagnostics::Diagnostic;
use crate::effect::{Effect, EffectSource, EffectType, EffectUid, Magnitude, MultiplierForm};
use crate::trigger::{BonusAmount, BonusSpec, TriggerSpec};
use crate::types::Scope;

/// Where an entry sits in the catalog
#[derive(Debug, Clone, Copy)]
pub struct ReadContext<'a> {
    pub source: &'a EffectSource,
    /// Position of the entry within its source list
    pub origin_index: usize,
    /// Whether the owning weapon or gear piece is forged
    pub forged: bool,
}

impl ReadContext<'_> {
    fn uid_prefix(&self) -> String {
        format!(
            "{}_{}{}",
            self.source.source_id(),
            self.source.origin_label(),
            self.origin_index
        )
    }
}

/// Normalize one raw entry into zero or more effects.
///
/// Compound entries (a list of types) produce siblings sharing the UID
/// prefix; values pair up by position, a scalar value is shared.
pub fn read_entry(
    entry: &RawEffect,
    ctx: &ReadContext<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Effect> {
    let types = match entry.kind.as_ref() {
        Some(types) if !types.is_empty() => types,
        _ => {
            tracing::trace!(
                source = ctx.source.source_id(),
                index = ctx.origin_index,
                "descriptive entry skipped"
            );
            return Vec::new();
        }
    };
    let prefix = ctx.uid_prefix();

    let scope = match entry.target.as_deref() {
        None => Scope::SelfOnly,
        Some(raw) => match raw.parse::<Scope>() {
            Ok(scope) => scope,
            Err(()) => {
                tracing::warn!(origin = %prefix, raw_target = raw, "unknown target, entry skipped");
                diagnostics.push(Diagnostic::UnknownTarget {
                    origin: prefix,
                    raw: raw.to_string(),
                });
                return Vec::new();
            }
        },
    };

    let values = if ctx.forged && ctx.source.forge_sensitive() {
        entry.forge_val.as_ref().or(entry.val.as_ref())
    } else {
        entry.val.as_ref()
    };
    let trigger = entry
        .trigger
        .as_ref()
        .and_then(|t| TriggerSpec::new(t.as_slice().to_vec()));
    let skill_filter = entry
        .skill_type
        .as_ref()
        .map(|s| s.as_slice().to_vec())
        .unwrap_or_default();
    let forged = matches!(ctx.source, EffectSource::GearTrait { forge: true, .. });

    let mut effects = Vec::with_capacity(types.as_slice().len());
    for (position, name) in types.as_slice().iter().enumerate() {
        let name = name.trim();
        let uid = EffectUid(format!("{prefix}_{name}_v{position}"));

        let Some(mut kind) = EffectType::parse(name, entry.stat.as_deref()) else {
            tracing::warn!(%uid, kind = name, "unknown effect type, skipped");
            diagnostics.push(Diagnostic::UnknownEffectType {
                origin: uid.0,
                raw: name.to_string(),
            });
            continue;
        };

        let points = entry.dmg.as_ref().and_then(|d| d.pick(position));
        let raw_value = match kind {
            EffectType::SkillMultiplier(_) if points.is_some() => {
                kind = EffectType::SkillMultiplier(MultiplierForm::Points);
                points
            }
            _ => values.and_then(|v| v.pick(position)),
        };

        let mut invalid = Vec::new();
        let value = raw_value.map(|raw| read_value(raw, uid.as_str(), &mut invalid, diagnostics));
        let bonuses: Vec<BonusSpec> = entry
            .bonus
            .iter()
            .flat_map(|b| b.as_slice())
            .filter_map(|b| read_bonus(b, uid.as_str(), &mut invalid, diagnostics))
            .collect();

        let non_stack_key = match &entry.non_stack {
            Some(NonStack::Flag(true)) => Some(format!("{}_{name}", ctx.source.source_id())),
            Some(NonStack::Key(key)) => Some(format!("{key}_{name}")),
            _ => None,
        };

        effects.push(Effect {
            uid,
            kind,
            label: name.to_string(),
            value,
            scope,
            source: ctx.source.clone(),
            non_stack_key,
            trigger: trigger.clone(),
            bonuses,
            skill_filter: skill_filter.clone(),
            forged,
            invalid,
        });
    }
    effects
}

/// Read a bonus block. Blocks carrying no magnitude at all are dropped.
pub fn read_bonus(
    raw: &RawBonus,
    origin: &str,
    invalid: &mut Vec<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<BonusSpec> {
    let amount = if raw.base.is_some() || raw.per_stack.is_some() {
        let mut read = |v: &Option<RawValue>| {
            v.as_ref()
                .map_or(Magnitude::ZERO, |v| read_value(v, origin, invalid, diagnostics))
        };
        BonusAmount::Stacked {
            base: read(&raw.base),
            per_stack: read(&raw.per_stack),
        }
    } else {
        BonusAmount::Flat(read_value(raw.val.as_ref()?, origin, invalid, diagnostics))
    };

    Some(BonusSpec {
        trigger: raw
            .trigger
            .as_ref()
            .and_then(|t| TriggerSpec::new(t.as_slice().to_vec())),
        amount,
        max_stack: raw.max_stack,
    })
}

/// Parse a value, substituting 0 and recording a diagnostic on failure
pub fn read_value(
    raw: &RawValue,
    origin: &str,
    invalid: &mut Vec<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Magnitude {
    match Magnitude::from_raw(raw) {
        Ok(m) => m,
        Err(text) => {
            tracing::warn!(origin, raw = %text, "malformed number treated as 0");
            diagnostics.push(Diagnostic::InvalidNumber {
                origin: origin.to_string(),
                raw: text.clone(),
            });
            invalid.push(text);
            Magnitude::ZERO
        }
    }
}
