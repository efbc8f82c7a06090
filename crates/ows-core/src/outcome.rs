//! Meet-or-beat success test and critical-hit tiering.

use serde::{Deserialize, Serialize};

/// Result of testing one roll against one defense number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub roll: u32,
    pub success: bool,
    /// 0 = failure, 1 = hit, 2..=4 = critical multiples of the defense.
    pub critical_hits: u8,
}

impl AttackOutcome {
    /// Hits inflicted (zero on failure).
    pub fn hits(&self) -> u32 {
        u32::from(self.critical_hits)
    }
}

/// Test `roll` against `defense`.
///
/// `roll < defense` fails. Otherwise the tier is the integer multiple of
/// the defense reached by the roll, capped at 4. A defense of 0 is met by
/// every roll at the top tier.
pub fn meet_or_beat(roll: u32, defense: u32) -> AttackOutcome {
    if roll < defense {
        return AttackOutcome {
            roll,
            success: false,
            critical_hits: 0,
        };
    }

    let (r, d) = (u64::from(roll), u64::from(defense));
    let critical_hits = if r >= 4 * d {
        4
    } else if r >= 3 * d {
        3
    } else if r >= 2 * d {
        2
    } else {
        1
    };

    AttackOutcome {
        roll,
        success: true,
        critical_hits,
    }
}
