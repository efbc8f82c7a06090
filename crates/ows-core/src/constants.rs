//! Rule constants and table parameters.

use crate::dice::DieRank;

// --- Dice ---

/// Die rolled for GCAT casualty determination.
pub const CASUALTY_DIE: DieRank = DieRank::D10;

/// Die each side rolls for best-die initiative.
pub const INITIATIVE_DIE: DieRank = DieRank::D10;

/// Rank past which detection of stealth and low-signature targets is discarded.
pub const STEALTH_DETECTION_CAP: DieRank = DieRank::D12;

// --- Detection ---

/// Signature of a target with no explicit value.
pub const DEFAULT_SIGNATURE: u32 = 7;

/// Signature of a stealth target against local sensors when none is given.
pub const DEFAULT_STEALTH_SIGNATURE: u32 = 8;

// --- Air combat ---

pub const DEFAULT_A2A_DIE: DieRank = DieRank::D10;
pub const DEFAULT_A2A_DEFENSE: u32 = 5;

/// A side holds local air superiority above this multiple of the other side.
pub const AIR_SUPERIORITY_MARGIN: f64 = 1.5;

// --- Air tasking ---

/// Combat radius in hexes when the airframe gives none.
pub const DEFAULT_COMBAT_RADIUS: u32 = 3;

pub const BOMBER_SALVO_CAPACITY: usize = 6;
pub const FIGHTER_SALVO_CAPACITY: usize = 2;

/// Air missions a fully intact carrier can generate per turn.
pub const CARRIER_GENERATION_CAPACITY: u32 = 3;

// --- Strike / SEAD ---

pub const DEFAULT_STRIKE_DIE: DieRank = DieRank::D8;
pub const DEFAULT_SEAD_DIE: DieRank = DieRank::D10;

/// Munition range in hexes when the counter gives none.
pub const DEFAULT_MUNITION_RANGE: u32 = 2;

/// Reach of standoff munitions such as JASSM-ER.
pub const STANDOFF_MUNITION_RANGE: u32 = 5;

pub const DEFAULT_SEAD_RANGE: u32 = 2;
pub const DEFAULT_SAM_ENVELOPE: u32 = 1;

/// Critical hits at or above this destroy a SAM outright.
pub const SAM_DESTROY_CRITICALS: u8 = 2;

/// Strikes longer than this many hexes are demoted under disrupted PNT.
pub const PNT_LONG_RANGE_HEXES: u32 = 1;

// --- Ground ---

pub const MAIN_EFFORT_MOVEMENT_FACTOR: f64 = 1.25;
pub const RESERVE_MOVEMENT_FACTOR: f64 = 0.75;

/// Fraction of movement lost when out of supply.
pub const OUT_OF_SUPPLY_MOVEMENT_PENALTY: f64 = 0.5;

// --- Supply ---

pub const NORMAL_SUPPLY_RANGE: u32 = 4;
pub const EXTENDED_SUPPLY_FACTOR: f64 = 1.5;

// --- Space / IO ---

pub const DEFAULT_C2_VALUE: u32 = 3;
pub const DEFAULT_C2_MAX: u32 = 5;
pub const DEFAULT_ISR_DIE: DieRank = DieRank::D10;
pub const DEFAULT_ISR_PAWNS: u32 = 3;

/// Attack die of a Disrupt C2 token.
pub const DISRUPT_C2_DIE: DieRank = DieRank::D8;

/// Defense used for a target or Assure C2 token with no listed value.
pub const DEFAULT_IO_DEFENSE: u32 = 6;
