//! Magnitude - parsed numeric value of an effect

use crate::catalog::RawValue;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A parsed effect value
///
/// `"24.6%"` parses to a percentage with `value = 0.246`; bare numbers are
/// absolute. Whether an absolute value is a flat add or percentage points
/// depends on the effect type, see [`Magnitude::amount`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    pub value: f64,
    pub percent: bool,
}

impl Magnitude {
    pub const ZERO: Magnitude = Magnitude {
        value: 0.0,
        percent: true,
    };

    pub fn percent(fraction: f64) -> Self {
        Magnitude {
            value: fraction,
            percent: true,
        }
    }

    pub fn absolute(value: f64) -> Self {
        Magnitude {
            value,
            percent: false,
        }
    }

    /// Parse a raw catalog value. On failure the offending text is returned.
    pub fn from_raw(raw: &RawValue) -> Result<Magnitude, String> {
        match raw {
            RawValue::Number(n) if n.is_finite() => Ok(Magnitude::absolute(*n)),
            RawValue::Number(n) => Err(n.to_string()),
            RawValue::Text(text) => parse_text(text).ok_or_else(|| text.clone()),
        }
    }

    /// Value as a fraction; absolute numbers count as percentage points
    pub fn as_fraction(self) -> f64 {
        if self.percent {
            self.value
        } else {
            self.value / 100.0
        }
    }

    /// Split into fraction and flat parts.
    ///
    /// Stat effects keep absolute values as flat additions; every other
    /// effect type reads them as percentage points.
    pub fn amount(self, stat_like: bool) -> Amount {
        if stat_like && !self.percent {
            Amount {
                fraction: 0.0,
                flat: self.value,
            }
        } else {
            Amount {
                fraction: self.as_fraction(),
                flat: 0.0,
            }
        }
    }
}

fn parse_text(text: &str) -> Option<Magnitude> {
    let trimmed = text.trim();
    let (number, percent) = match trimmed.strip_suffix('%') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed, false),
    };
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if percent {
        Magnitude::percent(value / 100.0)
    } else {
        Magnitude::absolute(value)
    })
}

/// Resolved magnitude split by how the stat pipeline consumes it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// Percentage part as a fraction (0.30 = 30%)
    pub fraction: f64,
    /// Flat part (stat effects only)
    pub flat: f64,
}

impl Amount {
    pub const ZERO: Amount = Amount {
        fraction: 0.0,
        flat: 0.0,
    };

    pub fn is_zero(self) -> bool {
        self.fraction == 0.0 && self.flat == 0.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount {
            fraction: self.fraction + rhs.fraction,
            flat: self.flat + rhs.flat,
        }
    }
}

impl Mul<f64> for Amount {
    type Output = Amount;

    fn mul(self, rhs: f64) -> Amount {
        Amount {
            fraction: self.fraction * rhs,
            flat: self.flat * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Magnitude, String> {
        Magnitude::from_raw(&RawValue::Text(s.to_string()))
    }

    #[test]
    fn test_percent_string() {
        let m = parse("24.6%").unwrap();
        assert!(m.percent);
        assert!((m.value - 0.246).abs() < 1e-12);
    }

    #[test]
    fn test_signed_and_spaced() {
        assert!((parse(" +30 % ").unwrap().value - 0.30).abs() < 1e-12);
        assert!((parse("-12%").unwrap().value + 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_plain_number_is_absolute() {
        let m = Magnitude::from_raw(&RawValue::Number(20.0)).unwrap();
        assert!(!m.percent);
        assert!((m.as_fraction() - 0.20).abs() < 1e-12);

        let text = parse("15").unwrap();
        assert!(!text.percent);
        assert!((text.value - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_returns_raw_text() {
        assert_eq!(parse("abc%"), Err("abc%".to_string()));
        assert_eq!(parse(""), Err("".to_string()));
        assert_eq!(parse("NaN"), Err("NaN".to_string()));
    }

    #[test]
    fn test_amount_split() {
        let flat = Magnitude::absolute(50.0).amount(true);
        assert!((flat.flat - 50.0).abs() < f64::EPSILON);
        assert_eq!(flat.fraction, 0.0);

        let points = Magnitude::absolute(50.0).amount(false);
        assert!((points.fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(points.flat, 0.0);

        let pct = Magnitude::percent(0.3).amount(true);
        assert!((pct.fraction - 0.3).abs() < f64::EPSILON);
    }
}
