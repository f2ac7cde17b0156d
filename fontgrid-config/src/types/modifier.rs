//! Metric modifiers: bounded percentage or absolute adjustments applied to
//! one cell metric.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when modifier text is neither `N%` nor a signed integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModifierParseError {
    #[error("invalid metric modifier '{0}': expected a percentage like '20%' or an integer like '-2'")]
    InvalidFormat(String),
}

/// Adjustment to a single metric field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "ModifierRepr", into = "String")]
pub enum MetricModifier {
    /// Multiplier stored as `1 + pct/100`, never negative.
    Percent(f64),
    /// Signed pixel delta.
    Absolute(i32),
}

/// Integer types a modifier can be applied to.
///
/// Results outside the type's range saturate rather than wrap.
pub trait ModifierTarget: Copy {
    const LOWER: i64;
    const UPPER: i64;

    fn to_i64(self) -> i64;
    fn from_i64_saturating(value: i64) -> Self;
}

impl ModifierTarget for u32 {
    const LOWER: i64 = 0;
    const UPPER: i64 = u32::MAX as i64;

    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    fn from_i64_saturating(value: i64) -> Self {
        value.clamp(Self::LOWER, Self::UPPER) as u32
    }
}

impl ModifierTarget for i32 {
    const LOWER: i64 = i32::MIN as i64;
    const UPPER: i64 = i32::MAX as i64;

    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    fn from_i64_saturating(value: i64) -> Self {
        value.clamp(Self::LOWER, Self::UPPER) as i32
    }
}

impl MetricModifier {
    /// Parse `"20%"`, `"-20%"` or `"-2"`.
    pub fn parse(text: &str) -> Result<Self, ModifierParseError> {
        text.parse()
    }

    /// Apply the modifier to `value`.
    pub fn apply<T: ModifierTarget>(self, value: T) -> T {
        match self {
            MetricModifier::Percent(multiplier) => {
                // `as` saturates on overflow and maps NaN to 0.
                let scaled = (value.to_i64() as f64 * multiplier.max(0.0)).round() as i64;
                T::from_i64_saturating(scaled)
            }
            MetricModifier::Absolute(delta) => {
                T::from_i64_saturating(value.to_i64().saturating_add(i64::from(delta)))
            }
        }
    }
}

impl FromStr for MetricModifier {
    type Err = ModifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ModifierParseError::InvalidFormat(s.to_string());
        let text = s.trim();
        if let Some(pct) = text.strip_suffix('%') {
            let pct: f64 = pct.trim().parse().map_err(|_| err())?;
            if !pct.is_finite() {
                return Err(err());
            }
            return Ok(MetricModifier::Percent(percent_multiplier(pct)));
        }
        text.parse::<i32>()
            .map(MetricModifier::Absolute)
            .map_err(|_| err())
    }
}

impl fmt::Display for MetricModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricModifier::Percent(multiplier) => write!(f, "{}%", percent_text(*multiplier)),
            MetricModifier::Absolute(delta) => write!(f, "{delta}"),
        }
    }
}

fn percent_multiplier(pct: f64) -> f64 {
    (1.0 + pct / 100.0).max(0.0)
}

/// The shortest percentage that parses back to exactly `multiplier`.
///
/// Keys compare multipliers by bit pattern, so a saved config must reload
/// to the same bits.
fn percent_text(multiplier: f64) -> f64 {
    let exact = (multiplier - 1.0) * 100.0;
    let same = |pct: f64| percent_multiplier(pct).to_bits() == multiplier.to_bits();

    for digits in 0..=15 {
        let scale = 10f64.powi(digits);
        let pct = (exact * scale).round() / scale;
        if same(pct) {
            return pct;
        }
    }

    let mut pct = exact;
    for _ in 0..64 {
        if same(pct) {
            break;
        }
        pct = if percent_multiplier(pct) < multiplier {
            pct.next_up()
        } else {
            pct.next_down()
        };
    }
    pct
}

impl PartialEq for MetricModifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetricModifier::Percent(a), MetricModifier::Percent(b)) => a.to_bits() == b.to_bits(),
            (MetricModifier::Absolute(a), MetricModifier::Absolute(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MetricModifier {}

impl Hash for MetricModifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            MetricModifier::Percent(multiplier) => {
                0u8.hash(state);
                multiplier.to_bits().hash(state);
            }
            MetricModifier::Absolute(delta) => {
                1u8.hash(state);
                delta.hash(state);
            }
        }
    }
}

/// YAML may hand us `-2` as an integer or `"20%"` as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModifierRepr {
    Int(i64),
    Text(String),
}

impl TryFrom<ModifierRepr> for MetricModifier {
    type Error = ModifierParseError;

    fn try_from(repr: ModifierRepr) -> Result<Self, Self::Error> {
        match repr {
            ModifierRepr::Int(v) => i32::try_from(v)
                .map(MetricModifier::Absolute)
                .map_err(|_| ModifierParseError::InvalidFormat(v.to_string())),
            ModifierRepr::Text(s) => s.parse(),
        }
    }
}

impl From<MetricModifier> for String {
    fn from(m: MetricModifier) -> Self {
        m.to_string()
    }
}
