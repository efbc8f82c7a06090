//! The die scale: d4 → d6 → d8 → d10 → d12 → d16 → d20.
//!
//! Promotion and demotion walk the scale and saturate at either end.
//! A rank can never be produced outside this set.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// One level of the ordered die scale. Declaration order is scale order.
///
/// Serialized as `"d10"`. Deserialization goes through [`FromStr`], so a
/// bad rank in a scenario or rules file reports as [`RulesError::InvalidRank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DieRank {
    D4,
    D6,
    D8,
    D10,
    D12,
    D16,
    D20,
}

impl DieRank {
    /// Every rank, lowest first.
    pub const SCALE: [DieRank; 7] = [
        DieRank::D4,
        DieRank::D6,
        DieRank::D8,
        DieRank::D10,
        DieRank::D12,
        DieRank::D16,
        DieRank::D20,
    ];

    pub const LOWEST: DieRank = DieRank::D4;
    pub const HIGHEST: DieRank = DieRank::D20;

    /// Number of faces on this die.
    pub const fn sides(self) -> u32 {
        match self {
            DieRank::D4 => 4,
            DieRank::D6 => 6,
            DieRank::D8 => 8,
            DieRank::D10 => 10,
            DieRank::D12 => 12,
            DieRank::D16 => 16,
            DieRank::D20 => 20,
        }
    }

    /// Position on the scale (d4 = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    fn at_index(index: usize) -> Self {
        Self::SCALE[index.min(Self::SCALE.len() - 1)]
    }

    /// Look up a rank by its side count.
    pub fn from_sides(sides: u32) -> Result<Self, RulesError> {
        Self::SCALE
            .iter()
            .copied()
            .find(|rank| rank.sides() == sides)
            .ok_or_else(|| RulesError::InvalidRank(format!("d{sides}")))
    }

    /// Move up `steps` levels, stopping at d20.
    pub fn promote(self, steps: u32) -> Self {
        Self::at_index(self.index().saturating_add(steps as usize))
    }

    /// Move down `steps` levels, stopping at d4.
    pub fn demote(self, steps: u32) -> Self {
        Self::at_index(self.index().saturating_sub(steps as usize))
    }

    /// Apply a net modifier: positive promotes, negative demotes.
    pub fn shift(self, net: i32) -> Self {
        match net.cmp(&0) {
            Ordering::Greater => self.promote(net.unsigned_abs()),
            Ordering::Less => self.demote(net.unsigned_abs()),
            Ordering::Equal => self,
        }
    }

    /// Clamp to at most `ceiling`. Promotion past the ceiling is discarded.
    pub fn cap_at(self, ceiling: DieRank) -> Self {
        self.min(ceiling)
    }

    /// Scale comparison of two ranks.
    pub fn compare(self, other: DieRank) -> Ordering {
        self.cmp(&other)
    }
}

impl fmt::Display for DieRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl FromStr for DieRank {
    type Err = RulesError;

    /// Accepts `"d12"`, `"D12"` or a bare side count `"12"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('d')
            .or_else(|| trimmed.strip_prefix('D'))
            .unwrap_or(trimmed);
        let sides: u32 = digits
            .parse()
            .map_err(|_| RulesError::InvalidRank(s.to_string()))?;
        Self::from_sides(sides).map_err(|_| RulesError::InvalidRank(s.to_string()))
    }
}

impl TryFrom<String> for DieRank {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DieRank> for String {
    fn from(rank: DieRank) -> Self {
        rank.to_string()
    }
}
