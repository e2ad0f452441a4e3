use serde::Serialize;
use std::fmt;

/// Scalar cost of an edge or a path.
///
/// `NON_VIABLE` is positive infinity: it sorts after every finite weight and the
/// search treats edges carrying it as absent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub const NON_VIABLE: Weight = Weight(f64::INFINITY);

    /// Seed weight of a search that has traversed no edge yet.
    pub const INITIAL: Weight = Weight(0.0);

    /// Negative, NaN and infinite values all collapse to `NON_VIABLE`.
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 { Weight(value) } else { Weight::NON_VIABLE }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_viable(&self) -> bool {
        self.0.is_finite()
    }

    pub fn merge(self, other: Weight) -> Weight {
        if !self.is_viable() || !other.is_viable() {
            return Weight::NON_VIABLE;
        }
        Weight(self.0 + other.0)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_viable() { write!(f, "{}", self.0) } else { write!(f, "non-viable") }
    }
}
