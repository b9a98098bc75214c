use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative duration in hundredths of a second.
///
/// All move times and frame delays are expressed in this unit, serialized
/// as a bare integer.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Centis(pub u32);

impl Centis {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Clamp to at most `other`.
    #[must_use]
    pub fn at_most(self, other: Centis) -> Centis {
        Centis(self.0.min(other.0))
    }

    /// Clamp to at least `other`.
    #[must_use]
    pub fn at_least(self, other: Centis) -> Centis {
        Centis(self.0.max(other.0))
    }

    /// Multiply by a non-negative factor, truncating toward zero.
    #[must_use]
    pub fn scale(self, factor: f64) -> Centis {
        Centis((self.0 as f64 * factor).max(0.0) as u32)
    }
}

impl fmt::Display for Centis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}cs", self.0)
    }
}
