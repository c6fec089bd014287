//! Integration test: Load catalog -> Build -> Battle state -> Damage
//!
//! Drives the public API against the JSON fixture catalog.

use calc_core::config::load_catalog;
use calc_core::prelude::*;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const ENDMIN: &str = "endministrator";
const SEAL: &str = "오리지늄 봉인";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn catalog() -> Catalog {
    init_tracing();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json");
    load_catalog(&path).expect("fixture catalog should load")
}

fn no_crit() -> EngineConstants {
    let mut constants = EngineConstants::default();
    constants.crit.base_rate = 0.0;
    constants
}

fn full_build() -> BuildState {
    BuildState::for_operator(ENDMIN)
        .with_potential(3)
        .with_weapon(WeaponSelection::new("greatsword").with_potential(3))
        .with_gear(0, GearSelection::new("plate_a").forged())
        .with_gear(1, GearSelection::new("plate_b"))
        .with_gear(2, GearSelection::new("ring"))
        .with_sub(SubOperatorSelection::new("supporter").with_potential(2))
}

fn ultimate_only() -> ComputeOptions {
    ComputeOptions::new().only_skills(vec![SkillCategory::Ultimate])
}

#[test]
fn test_zero_build_baseline() {
    let catalog = catalog();
    let result = compute_damage(
        &catalog,
        &BuildState::new(),
        &BattleState::new(),
        &ComputeOptions::new(),
    );
    assert_eq!(result.total, 0.0);
    assert!(result.active_effects.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_endministrator_ultimate() {
    let catalog = catalog();
    let engine = DamageEngine::with_constants(&catalog, no_crit());
    let build = BuildState::for_operator(ENDMIN);

    let off = engine.compute(&build, &BattleState::new(), &ultimate_only());
    assert!((off.stats.attack - 405.6).abs() < 1e-9);
    assert!((off.total - 8.0 * 405.6).abs() < 1e-6);
    let ult = off.skill(SkillCategory::Ultimate).unwrap();
    assert_eq!(ult.level, "M3");
    assert_eq!(ult.trigger_bonus, 0.0);

    let sealed = BattleState::new().with_special_stack(ENDMIN, SEAL, 1);
    let on = engine.compute(&build, &sealed, &ultimate_only());
    assert_eq!(on.total, (8.0 + 10.0) * on.stats.attack);
    assert!((on.total / off.total - 2.25).abs() < 1e-12);
}

#[test]
fn test_default_crit_expectation() {
    let catalog = catalog();
    let result = compute_damage(
        &catalog,
        &BuildState::for_operator(ENDMIN),
        &BattleState::new(),
        &ultimate_only(),
    );
    // 5% base rate at x1.5
    assert!((result.total - 8.0 * 405.6 * 1.025).abs() < 1e-6);
}

#[test]
fn test_idempotent() {
    let catalog = catalog();
    let battle = BattleState::new()
        .with_physical(PhysicalDebuff::Defenseless, 2)
        .with_special_stack(ENDMIN, SEAL, 1);
    let a = compute_damage(&catalog, &full_build(), &battle, &ComputeOptions::new());
    let b = compute_damage(&catalog, &full_build(), &battle, &ComputeOptions::new());
    assert_eq!(a.total.to_bits(), b.total.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_non_stack_dedup_any_order() {
    let catalog = catalog();
    let orders = [("plate_a", "plate_b"), ("plate_b", "plate_a")];
    let mut totals = Vec::new();
    for (first, second) in orders {
        let build = BuildState::for_operator(ENDMIN)
            .with_gear(0, GearSelection::new(first))
            .with_gear(1, GearSelection::new(second));
        let result = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());
        let steady = result
            .active_effects
            .iter()
            .filter(|r| r.effect.non_stack_key.as_deref() == Some("steady_치명타 확률"))
            .count();
        assert_eq!(steady, 1);
        assert!(result
            .effect("swordsman_set2pc0_공격력 증가_v0")
            .is_some_and(|r| r.active));
        totals.push(result.total);
    }
    assert!((totals[0] - totals[1]).abs() < 1e-9);
}

#[test]
fn test_toggle_difference_is_contribution() {
    let catalog = catalog();
    let battle = BattleState::new().with_physical(PhysicalDebuff::Defenseless, 1);
    let base = compute_damage(&catalog, &full_build(), &battle, &ComputeOptions::new());
    assert!(base.total > 0.0);

    let positive: Vec<&EffectRecord> = base
        .active_effects
        .iter()
        .filter(|r| r.contribution > 0.0)
        .collect();
    assert!(positive.len() >= 5);

    for record in positive {
        let options = ComputeOptions::new().disable(record.uid());
        let toggled = compute_damage(&catalog, &full_build(), &battle, &options);
        assert!(toggled.total < base.total, "{} did not lower the total", record.uid());
        assert_eq!(base.total - toggled.total, record.contribution, "{}", record.uid());
    }
}

#[test]
fn test_disabled_effect_dropped_from_log() {
    let catalog = catalog();
    let uid = "endministrator_talent0_공격력 증가_v0";
    let options = ComputeOptions::new().disable(uid);
    let result = compute_damage(
        &catalog,
        &BuildState::for_operator(ENDMIN),
        &BattleState::new(),
        &options,
    );
    assert!(result.effect(uid).is_none());
    assert!((result.stats.attack - 312.0).abs() < f64::EPSILON);
}

#[test]
fn test_debuff_always_listed() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN);
    let battle = BattleState::new().with_physical(PhysicalDebuff::Defenseless, 2);
    let uid = "debuff_방어불능";

    let on = compute_damage(&catalog, &build, &battle, &ComputeOptions::new());
    let record = on.effect(uid).unwrap();
    assert_eq!(record.status, EffectStatus::Active);
    assert!((record.magnitude.fraction - 0.08).abs() < 1e-12);
    assert!(record.contribution > 0.0);

    let off = compute_damage(&catalog, &build, &battle, &ComputeOptions::new().disable(uid));
    let disabled = off.effect(uid).unwrap();
    assert_eq!(disabled.status, EffectStatus::Disabled);
    assert_eq!(disabled.contribution, 0.0);
    assert_eq!(on.total - off.total, record.contribution);
}

#[test]
fn test_scoped_disable_hits_one_skill() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN);
    let uid = "endministrator_talent0_공격력 증가_v0";
    let base = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());
    let options = ComputeOptions::new().disable(format!("{uid}#궁극기"));
    let scoped = compute_damage(&catalog, &build, &BattleState::new(), &options);

    let ult = |r: &DamageResult| r.skill(SkillCategory::Ultimate).unwrap().damage;
    let basic = |r: &DamageResult| r.skill(SkillCategory::Basic).unwrap().damage;
    assert!(ult(&scoped) < ult(&base));
    assert_eq!(basic(&scoped), basic(&base));
    assert!(scoped.effect(uid).is_some());
}

#[test]
fn test_unknown_trigger_flagged() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN).with_gear(0, GearSelection::new("odd_charm"));
    let result = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());

    let uid = "odd_charm_slot0trait0_주는 피해_v0";
    assert_eq!(result.effect(uid).unwrap().status, EffectStatus::UnknownTrigger);
    assert!(result.diagnostics.contains(&Diagnostic::UnknownTrigger {
        origin: uid.to_string(),
        name: "신규 상태".to_string(),
    }));

    // A known trigger that is merely not met stays quiet
    let battle_effect = result
        .effect("endministrator_skill0_물리 취약_v0")
        .unwrap();
    assert_eq!(battle_effect.status, EffectStatus::Inactive);
}

#[test]
fn test_invalid_number_flagged() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN).with_weapon(WeaponSelection::new("cracked"));
    let result = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());

    let record = result.effect("cracked_trait0_주는 피해_v0").unwrap();
    assert_eq!(record.status, EffectStatus::Invalid);
    assert_eq!(record.contribution, 0.0);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::InvalidNumber { raw, .. } if raw == "열두%")));
    assert!(result.total > 0.0);
}

#[test]
fn test_inconsistent_build_is_empty() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN).with_weapon(WeaponSelection::new("nope"));
    let result = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());
    assert_eq!(result.total, 0.0);
    assert!(result.active_effects.is_empty());
    assert_eq!(result.diagnostics, vec![Diagnostic::UnknownWeapon("nope".to_string())]);
}

#[test]
fn test_unknown_sub_operator_is_not_fatal() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN).with_sub(SubOperatorSelection::new("ghost"));
    let result = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());
    assert!(result.total > 0.0);
    assert!(result
        .diagnostics
        .contains(&Diagnostic::UnknownOperator("ghost".to_string())));
}

#[test]
fn test_sub_operator_shares_team_effects() {
    let catalog = catalog();
    let result = compute_damage(&catalog, &full_build(), &BattleState::new(), &ComputeOptions::new());
    assert!(result.effect("supporter_sub0talent0_주는 피해_v0").is_some());
    assert!(result.effect("supporter_sub0potential0_물리 취약_v0").is_some());
    assert!(result.effect("supporter_sub0talent1_공격력 증가_v0").is_none());
}

#[test]
fn test_forge_values() {
    let catalog = catalog();
    let result = compute_damage(&catalog, &full_build(), &BattleState::new(), &ComputeOptions::new());
    let forge = result.effect("plate_a_slot0forge0_공격력 증가_v0").unwrap();
    assert!(forge.effect.forged);
    let ring = result.effect("ring_slot2trait0_물리 피해_v0").unwrap();
    assert!((ring.magnitude.fraction - 0.08).abs() < 1e-12);

    let forged_ring = BuildState::for_operator(ENDMIN).with_gear(2, GearSelection::new("ring").forged());
    let result = compute_damage(&catalog, &forged_ring, &BattleState::new(), &ComputeOptions::new());
    let ring = result.effect("ring_slot2trait0_물리 피해_v0").unwrap();
    assert!((ring.magnitude.fraction - 0.12).abs() < 1e-12);
}

#[test]
fn test_missing_skill_level() {
    let catalog = catalog();
    let build = BuildState::for_operator(ENDMIN).with_skill_level("M1");
    let result = compute_damage(&catalog, &build, &BattleState::new(), &ComputeOptions::new());
    assert_eq!(result.total, 0.0);
    assert!(result.skills.is_empty());
    let missing = result
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::MissingSkillLevel { .. }))
        .count();
    assert_eq!(missing, 3);
    assert!(!result.active_effects.is_empty());
}

#[test]
fn test_skill_element_override() {
    let catalog = catalog();
    let options = ComputeOptions::new().with_skill_element(Element::Heat);
    let result = compute_damage(
        &catalog,
        &BuildState::for_operator(ENDMIN),
        &BattleState::new(),
        &options,
    );
    assert!(result.skills.iter().all(|s| s.element == Element::Heat));
}

#[test]
fn test_weapon_comparison_restores_build() {
    let catalog = catalog();
    let engine = DamageEngine::new(&catalog);
    let mut build = full_build();
    let before = build.clone();
    let battle = BattleState::new();

    let comparison = engine.compare_weapon(
        &mut build,
        &battle,
        &WeaponSelection::new("blade"),
        &ComputeOptions::new(),
    );
    assert_eq!(build, before);
    assert!(comparison.baseline.total > 0.0);
    assert!(comparison.candidate.effect("blade_trait0_치명타 확률_v0").is_some());
    assert!(comparison.baseline.effect("blade_trait0_치명타 확률_v0").is_none());
}

#[test]
fn test_comparison_mode_stacks() {
    let catalog = catalog();
    let engine = DamageEngine::new(&catalog);
    let uid = "blade_trait1_주는 피해_v0";
    let mut build = BuildState::for_operator(ENDMIN);
    let battle = BattleState::new();

    // Normal mode counts an untriggered stacking bonus once
    let normal = engine.compute(
        &BuildState::for_operator(ENDMIN).with_weapon(WeaponSelection::new("blade")),
        &battle,
        &ComputeOptions::new(),
    );
    let record = normal.effect(uid).unwrap();
    assert_eq!(record.stacks, 1);
    assert!((record.magnitude.fraction - 0.05).abs() < 1e-12);

    let comparison = engine.compare_weapon(
        &mut build,
        &battle,
        &WeaponSelection::new("blade"),
        &ComputeOptions::new(),
    );
    let record = comparison.candidate.effect(uid).unwrap();
    assert_eq!(record.stacks, 3);
    assert!((record.magnitude.fraction - 0.15).abs() < 1e-12);

    // Character stacks still follow the battle state
    let ult = comparison.candidate.skill(SkillCategory::Ultimate).unwrap();
    assert_eq!(ult.trigger_bonus, 0.0);
}

#[test]
fn test_comparison_mode_uses_real_character_stacks() {
    let catalog = catalog();
    let engine = DamageEngine::new(&catalog);
    let mut build = BuildState::for_operator("vanguard");
    let battle = BattleState::new().with_special_stack("vanguard", "결의", 2);

    let comparison = engine.compare_weapon(
        &mut build,
        &battle,
        &WeaponSelection::new("greatsword"),
        &ComputeOptions::new(),
    );
    for result in [&comparison.baseline, &comparison.candidate] {
        let ult = result.skill(SkillCategory::Ultimate).unwrap();
        assert_eq!(ult.trigger_bonus, 2.0);

        let talent = result.effect("vanguard_talent0_주는 피해_v0").unwrap();
        assert_eq!(talent.stacks, 2);
        assert!((talent.magnitude.fraction - 0.08).abs() < 1e-12);
    }

    // Counters past the registered maximum are capped below the bonus maxStack
    let over = BattleState::new().with_special_stack("vanguard", "결의", 9);
    let result = engine.compute(&build, &over, &ComputeOptions::new().with_force_max_stack(true));
    assert_eq!(result.skill(SkillCategory::Ultimate).unwrap().trigger_bonus, 3.0);
}

#[test]
fn test_unknown_skill_bonus_trigger_flagged() {
    let json = r#"{
        "operators": [{
            "id": "misprint",
            "name": "오타",
            "element": "물리",
            "baseAttack": 300,
            "skills": [{
                "id": "misprint_ult",
                "name": "오타 궁극기",
                "category": "궁극기",
                "dmg": {"M3": "500%"},
                "bonus": [{"trigger": "오타난 트리거", "val": "1000%"}]
            }]
        }]
    }"#;
    let catalog = Catalog::from_json_str(json).unwrap();
    let result = compute_damage(
        &catalog,
        &BuildState::for_operator("misprint"),
        &BattleState::new(),
        &ComputeOptions::new(),
    );

    let ult = result.skill(SkillCategory::Ultimate).unwrap();
    assert_eq!(ult.trigger_bonus, 0.0);
    assert_eq!(ult.unknown_triggers, vec!["오타난 트리거".to_string()]);
    assert!(result.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::UnknownTrigger { origin, name } if origin == "misprint_ult" && name == "오타난 트리거"
    )));
}

#[test]
fn test_rank_weapons() {
    let catalog = catalog();
    let engine = DamageEngine::new(&catalog);
    let mut build = BuildState::for_operator(ENDMIN);
    let candidates = [
        WeaponSelection::new("cracked"),
        WeaponSelection::new("greatsword").forged(),
        WeaponSelection::new("blade"),
    ];
    let ranked = engine.rank_weapons(&mut build, &BattleState::new(), &candidates, &ComputeOptions::new());
    assert_eq!(ranked.len(), 3);
    assert!(ranked
        .windows(2)
        .all(|w| w[0].candidate.total >= w[1].candidate.total));
    assert!(build.weapon.is_none());
}
