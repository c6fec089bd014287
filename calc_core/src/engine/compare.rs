//! Weapon comparison with a scoped weapon swap

use crate::damage::DamageResult;
use crate::state::{BuildState, WeaponSelection};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Equips a different weapon for as long as the guard lives.
///
/// The original selection is put back on drop, so every exit path
/// (early return or unwinding panic) restores the build.
#[derive(Debug)]
pub struct WeaponOverride<'b> {
    build: &'b mut BuildState,
    original: Option<WeaponSelection>,
}

impl<'b> WeaponOverride<'b> {
    pub fn new(build: &'b mut BuildState, weapon: Option<WeaponSelection>) -> Self {
        let original = std::mem::replace(&mut build.weapon, weapon);
        tracing::trace!(
            original = ?original.as_ref().map(|w| w.id.as_str()),
            "weapon overridden"
        );
        WeaponOverride { build, original }
    }
}

impl Deref for WeaponOverride<'_> {
    type Target = BuildState;

    fn deref(&self) -> &BuildState {
        self.build
    }
}

impl Drop for WeaponOverride<'_> {
    fn drop(&mut self) {
        self.build.weapon = self.original.take();
    }
}

/// Current weapon against a candidate, both in comparison mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponComparison {
    pub weapon: WeaponSelection,
    pub baseline: DamageResult,
    pub candidate: DamageResult,
}

impl WeaponComparison {
    pub fn delta(&self) -> f64 {
        self.candidate.total - self.baseline.total
    }

    /// Candidate total relative to the baseline, if the baseline is non-zero
    pub fn ratio(&self) -> Option<f64> {
        (self.baseline.total > 0.0).then(|| self.candidate.total / self.baseline.total)
    }
}
