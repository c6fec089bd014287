//! StatValue - one operator stat as base, flat, percent and forge layers

use serde::{Deserialize, Serialize};

/// Attack, an attribute or a crit stat while effects are being applied.
///
/// `base` is the starting value: operator plus weapon attack, the operator's
/// own attribute, or the configured crit base. Absolute stat effects land in
/// `flat`, and every `공격력 증가`-style percentage in `percent`, where they
/// sum. Percentages from forged gear bonuses each get their own entry in
/// `forge` and compound on top: `(base + flat) × (1 + percent) × Π(1 + forge)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub flat: f64,
    pub percent: f64,
    pub forge: Vec<f64>,
}

impl StatValue {
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Default::default()
        }
    }

    /// `(base + flat) × (1 + percent) × Π(1 + forge)`
    pub fn compute(&self) -> f64 {
        self.total_flat() * self.percent_multiplier() * self.forge_multiplier()
    }

    pub fn add_flat(&mut self, value: f64) {
        self.flat += value;
    }

    pub fn add_percent(&mut self, fraction: f64) {
        self.percent += fraction;
    }

    pub fn add_forge(&mut self, fraction: f64) {
        self.forge.push(fraction);
    }

    pub fn total_flat(&self) -> f64 {
        self.base + self.flat
    }

    pub fn percent_multiplier(&self) -> f64 {
        1.0 + self.percent
    }

    pub fn forge_multiplier(&self) -> f64 {
        self.forge.iter().map(|f| 1.0 + f).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_only() {
        let stat = StatValue::with_base(312.0);
        assert!((stat.compute() - 312.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_applies_after_flat() {
        let mut stat = StatValue::with_base(300.0);
        stat.add_flat(12.0);
        stat.add_percent(0.30);
        assert!((stat.compute() - 405.6).abs() < 1e-9);
    }

    #[test]
    fn test_percents_sum_additively() {
        let mut stat = StatValue::with_base(100.0);
        stat.add_percent(0.20);
        stat.add_percent(0.30);
        // 100 * 1.5, not 100 * 1.2 * 1.3
        assert!((stat.compute() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_forge_compounds_on_percent_bucket() {
        let mut stat = StatValue::with_base(100.0);
        stat.add_percent(0.20);
        stat.add_forge(0.10);
        stat.add_forge(0.10);
        // 100 * 1.2 * 1.1 * 1.1
        assert!((stat.compute() - 145.2).abs() < 1e-9);

        let mut joined = StatValue::with_base(100.0);
        joined.add_percent(0.40);
        assert!(stat.compute() > joined.compute());
    }
}
