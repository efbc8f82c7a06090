//! Fundamental geometry types.

use serde::{Deserialize, Serialize};

/// Integer hex coordinate on the operational map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Hex distance `(|dx| + |dy| + |dx + dy|) / 2`. The sum is always even.
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        let d = (dx.abs() + dy.abs() + (dx + dy).abs()) / 2;
        u32::try_from(d).unwrap_or(u32::MAX)
    }

    /// Straight-line walk from `self` to `goal`, both endpoints included.
    /// Each step moves x and y one unit toward the goal at the same time.
    pub fn line_to(&self, goal: &HexCoord) -> Vec<HexCoord> {
        let mut path = vec![*self];
        let mut current = *self;
        while current != *goal {
            current.x += (goal.x - current.x).signum();
            current.y += (goal.y - current.y).signum();
            path.push(current);
        }
        path
    }

    /// The 3×3 block around this hex, itself included.
    pub fn zone_of_control(&self) -> Vec<HexCoord> {
        let mut zone = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dy in -1..=1 {
                zone.push(HexCoord::new(self.x + dx, self.y + dy));
            }
        }
        zone
    }
}
