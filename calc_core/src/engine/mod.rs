//! Damage engine - the entry point tying collection, stats and damage together
//!
//! A computation is a pure function of the catalog, the build, the battle
//! state and the options. Nothing is cached between calls.

mod compare;

pub use compare::{WeaponComparison, WeaponOverride};

use crate::catalog::{Catalog, OperatorDef};
use crate::collector::{self, is_disabled, resolve_effect, ResolveContext, ResolvedEffect};
use crate::config::EngineConstants;
use crate::damage::{
    compute_final_damage, DamageResult, EffectRecord, EffectStatus, PreparedSkill, SkillBreakdown,
};
use crate::diagnostics::Diagnostic;
use crate::effect::{Amount, Effect};
use crate::stat_block::{apply_stats, StatBaseline};
use crate::state::{BattleState, BuildState, WeaponSelection};
use crate::trigger::{StackPolicy, TriggerContext};
use crate::types::{Element, SkillCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Caller options for one computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeOptions {
    /// Effect UIDs, or `uid#<skill category>` for one skill only
    #[serde(default)]
    pub disabled_effects: HashSet<String>,
    /// Comparison mode: untriggered stacking bonuses count their maximum
    #[serde(default)]
    pub force_max_stack: bool,
    #[serde(default)]
    pub override_skill_element: Option<Element>,
    /// Skill categories to sum; all when absent
    #[serde(default)]
    pub skills: Option<Vec<SkillCategory>>,
}

impl ComputeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable(mut self, uid: impl Into<String>) -> Self {
        self.disabled_effects.insert(uid.into());
        self
    }

    pub fn with_force_max_stack(mut self, force: bool) -> Self {
        self.force_max_stack = force;
        self
    }

    pub fn with_skill_element(mut self, element: Element) -> Self {
        self.override_skill_element = Some(element);
        self
    }

    pub fn only_skills(mut self, skills: Vec<SkillCategory>) -> Self {
        self.skills = Some(skills);
        self
    }

    fn policy(&self) -> StackPolicy {
        if self.force_max_stack {
            StackPolicy::ForceMax
        } else {
            StackPolicy::Natural
        }
    }
}

/// Computes damage for builds against one catalog
#[derive(Debug, Clone)]
pub struct DamageEngine<'a> {
    catalog: &'a Catalog,
    constants: EngineConstants,
}

/// Inputs fixed for the duration of one computation
struct Scene<'s> {
    battle: &'s BattleState,
    operator: &'s OperatorDef,
    baseline: StatBaseline,
    policy: StackPolicy,
    disabled: &'s HashSet<String>,
}

/// One skill's resolution of every effect
struct SkillRun<'r> {
    skill: &'r PreparedSkill<'r>,
    resolved: Vec<ResolvedEffect<'r>>,
    /// Whether each effect takes part in this skill's arithmetic
    included: Vec<bool>,
}

impl<'a> DamageEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_constants(catalog, EngineConstants::default())
    }

    pub fn with_constants(catalog: &'a Catalog, constants: EngineConstants) -> Self {
        DamageEngine { catalog, constants }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    /// Compute the damage of a build.
    ///
    /// Never fails: an empty build gives an empty result, an inconsistent
    /// one an empty result carrying the diagnostic.
    pub fn compute(
        &self,
        build: &BuildState,
        battle: &BattleState,
        options: &ComputeOptions,
    ) -> DamageResult {
        if build.operator.is_none() {
            tracing::debug!("no operator selected");
            return DamageResult::empty();
        }

        let mut diagnostics = Vec::new();
        let collected = match collector::collect(
            self.catalog,
            build,
            &options.disabled_effects,
            &mut diagnostics,
        ) {
            Ok(collected) => collected,
            Err(fatal) => {
                tracing::warn!(error = %fatal, "inconsistent build");
                diagnostics.push(fatal);
                return DamageResult::empty().with_diagnostics(diagnostics);
            }
        };
        let debuffs = collector::debuff_effects(battle, &self.constants, &mut diagnostics);
        let effects: Vec<&Effect> = collected.effects.iter().chain(debuffs.iter()).collect();
        let disabled = &options.disabled_effects;

        let level = build
            .skill_level
            .as_deref()
            .unwrap_or(&self.constants.default_skill_level);
        let skills = self.prepare_skills(collected.operator, level, options, &mut diagnostics);
        let scene = Scene {
            battle,
            operator: collected.operator,
            baseline: StatBaseline::new(collected.operator, collected.weapon),
            policy: options.policy(),
            disabled,
        };

        let runs: Vec<SkillRun> = skills
            .iter()
            .map(|skill| {
                let category = skill.def.category;
                let ctx = self.resolve_context(&scene, Some(category));
                let resolved: Vec<ResolvedEffect> =
                    effects.iter().map(|e| resolve_effect(e, &ctx)).collect();
                let included = resolved
                    .iter()
                    .map(|r| r.counts() && !is_disabled(r.effect, Some(category), disabled))
                    .collect();
                SkillRun {
                    skill,
                    resolved,
                    included,
                }
            })
            .collect();

        // Outside any skill: stats view, and the log when no skill ran
        let general_ctx = self.resolve_context(&scene, None);
        let general: Vec<ResolvedEffect> = effects
            .iter()
            .map(|e| resolve_effect(e, &general_ctx))
            .collect();
        let general_counted: Vec<&ResolvedEffect> = general
            .iter()
            .filter(|r| r.counts() && !is_disabled(r.effect, None, disabled))
            .collect();
        let stats = apply_stats(&general_counted, &scene.baseline, &self.constants).summary();

        let breakdown: Vec<SkillBreakdown> = runs
            .iter()
            .map(|run| self.skill_damage(run, None, &scene))
            .collect();
        let total: f64 = breakdown.iter().map(|b| b.damage).sum();
        for skill in &breakdown {
            for name in &skill.unknown_triggers {
                tracing::warn!(skill = %skill.skill, trigger = %name, "unknown skill bonus trigger");
                diagnostics.push(Diagnostic::UnknownTrigger {
                    origin: skill.skill.clone(),
                    name: name.clone(),
                });
            }
        }

        let mut records = Vec::with_capacity(effects.len());
        for (index, effect) in effects.iter().enumerate() {
            for name in unknown_triggers(index, &runs, &general) {
                tracing::warn!(uid = %effect.uid, trigger = %name, "unknown trigger");
                diagnostics.push(Diagnostic::UnknownTrigger {
                    origin: effect.uid.0.clone(),
                    name,
                });
            }
            records.push(self.record(index, effect, &runs, &general, total, &scene));
        }

        tracing::debug!(
            operator = %scene.operator.id,
            total,
            skills = breakdown.len(),
            effects = records.len(),
            diagnostics = diagnostics.len(),
            "damage computed"
        );

        DamageResult {
            total,
            active_effects: records,
            skills: breakdown,
            stats,
            diagnostics,
        }
    }

    fn resolve_context<'s>(
        &'s self,
        scene: &Scene<'s>,
        skill: Option<SkillCategory>,
    ) -> ResolveContext<'s> {
        ResolveContext {
            catalog: self.catalog,
            battle: scene.battle,
            skill,
            policy: scene.policy,
        }
    }

    fn prepare_skills<'c>(
        &self,
        operator: &'c OperatorDef,
        level: &str,
        options: &ComputeOptions,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<PreparedSkill<'c>> {
        operator
            .skills
            .iter()
            .filter(|s| {
                options
                    .skills
                    .as_ref()
                    .map_or(true, |only| only.contains(&s.category))
            })
            .filter_map(|s| {
                let element = options
                    .override_skill_element
                    .or(s.element)
                    .unwrap_or(operator.element);
                PreparedSkill::prepare(s, level, element, diagnostics)
            })
            .collect()
    }

    /// Damage of one skill, optionally leaving one effect out
    fn skill_damage(
        &self,
        run: &SkillRun<'_>,
        skip: Option<usize>,
        scene: &Scene<'_>,
    ) -> SkillBreakdown {
        let counted: Vec<&ResolvedEffect> = run
            .resolved
            .iter()
            .zip(&run.included)
            .enumerate()
            .filter(|(index, (_, included))| **included && Some(*index) != skip)
            .map(|(_, (resolved, _))| resolved)
            .collect();
        let stats = apply_stats(&counted, &scene.baseline, &self.constants);
        let triggers = TriggerContext {
            battle: scene.battle,
            owner: Some(scene.operator),
            skill: Some(run.skill.def.category),
            policy: scene.policy,
        };
        compute_final_damage(&stats, run.skill, &counted, &triggers, &self.constants)
    }

    /// Total with one effect left out, summed the same way as the real total
    fn total_without(&self, runs: &[SkillRun<'_>], index: usize, scene: &Scene<'_>) -> f64 {
        runs.iter()
            .map(|run| self.skill_damage(run, Some(index), scene).damage)
            .sum()
    }

    fn record(
        &self,
        index: usize,
        effect: &Effect,
        runs: &[SkillRun<'_>],
        general: &[ResolvedEffect<'_>],
        total: f64,
        scene: &Scene<'_>,
    ) -> EffectRecord {
        let mut active = false;
        let mut stacks = 0;
        let mut magnitude = Amount::ZERO;
        let mut counted = false;

        let mut observe = |resolved: &ResolvedEffect<'_>| {
            if resolved.active {
                if !active {
                    magnitude = resolved.amount;
                }
                active = true;
                stacks = stacks.max(resolved.stacks);
            }
        };
        if runs.is_empty() {
            observe(&general[index]);
        } else {
            for run in runs {
                observe(&run.resolved[index]);
                counted |= run.included[index];
            }
        }

        let contribution = if counted {
            total - self.total_without(runs, index, scene)
        } else {
            0.0
        };
        let has_unknown = !unknown_triggers(index, runs, general).is_empty();
        let status = if effect.is_debuff() && scene.disabled.contains(effect.uid.as_str()) {
            EffectStatus::Disabled
        } else if !active && has_unknown {
            EffectStatus::UnknownTrigger
        } else if !effect.invalid.is_empty() {
            EffectStatus::Invalid
        } else if active {
            EffectStatus::Active
        } else {
            EffectStatus::Inactive
        };

        tracing::trace!(uid = %effect.uid, ?status, contribution, "effect logged");
        EffectRecord {
            effect: effect.clone(),
            status,
            active,
            stacks,
            magnitude,
            contribution,
        }
    }

    /// Compare the build's current weapon against a candidate.
    ///
    /// Both sides run in comparison mode. The build is borrowed mutably
    /// while the candidate is equipped and is back to its original weapon
    /// when this returns.
    pub fn compare_weapon(
        &self,
        build: &mut BuildState,
        battle: &BattleState,
        candidate: &WeaponSelection,
        options: &ComputeOptions,
    ) -> WeaponComparison {
        let options = options.clone().with_force_max_stack(true);
        let baseline = self.compute(build, battle, &options);
        let swapped = {
            let swapped = WeaponOverride::new(build, Some(candidate.clone()));
            self.compute(&swapped, battle, &options)
        };
        tracing::debug!(
            weapon = %candidate.id,
            baseline = baseline.total,
            candidate = swapped.total,
            "weapon compared"
        );
        WeaponComparison {
            weapon: candidate.clone(),
            baseline,
            candidate: swapped,
        }
    }

    /// Compare several candidates, best first
    pub fn rank_weapons(
        &self,
        build: &mut BuildState,
        battle: &BattleState,
        candidates: &[WeaponSelection],
        options: &ComputeOptions,
    ) -> Vec<WeaponComparison> {
        let mut ranked: Vec<WeaponComparison> = candidates
            .iter()
            .map(|c| self.compare_weapon(build, battle, c, options))
            .collect();
        ranked.sort_by(|a, b| b.candidate.total.total_cmp(&a.candidate.total));
        ranked
    }
}

/// Unknown trigger names of one effect across every resolution
fn unknown_triggers(
    index: usize,
    runs: &[SkillRun<'_>],
    general: &[ResolvedEffect<'_>],
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let sources = runs
        .iter()
        .map(|run| &run.resolved[index])
        .chain(std::iter::once(&general[index]));
    for resolved in sources {
        for name in &resolved.unknown_triggers {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Compute damage with default constants
pub fn compute_damage(
    catalog: &Catalog,
    build: &BuildState,
    battle: &BattleState,
    options: &ComputeOptions,
) -> DamageResult {
    DamageEngine::new(catalog).compute(build, battle, options)
}
