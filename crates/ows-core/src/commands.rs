//! Adjudication requests submitted to a session.
//!
//! A scenario file for the replay tool is a JSON array of these.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::dice::DieRank;
use crate::enums::*;
use crate::error::Result;

/// One event for the engine to adjudicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdjudicationRequest {
    // --- Shielded combat ---
    /// One die against a shield pair.
    Attack { die: DieRank, shields: ShieldPair },
    /// Several dice against the same shield pair.
    Salvo {
        dice: Vec<DieRank>,
        shields: ShieldPair,
    },
    /// Several dice spending `grey_layers` grey layers in array order.
    LayeredSalvo {
        dice: Vec<DieRank>,
        grey_layers: u32,
        shields: ShieldPair,
    },

    // --- Detection ---
    Detect {
        mode: DetectionMode,
        target: Contact,
        /// Net IO promotion (+) or demotion (-) against the target.
        #[serde(default)]
        io_shift: i32,
    },

    // --- Air ---
    AirBattle {
        defenders: Vec<Fighter>,
        escorts: Vec<Fighter>,
        strike: Vec<Fighter>,
    },
    Initiative,

    // --- Ground ---
    GroundCombat {
        attackers: Vec<Unit>,
        defenders: Vec<Unit>,
        environment: GroundEnvironment,
    },
    FireEffects { unit: Unit, hits: u32 },
    TraceSupply {
        unit: Unit,
        source: Unit,
        #[serde(default)]
        opposing: Vec<Unit>,
    },

    // --- Space / IO ---
    /// Disrupt C2 token played against a dashboard track.
    DisruptDashboard {
        track: SpaceTrack,
        #[serde(default)]
        isr_target: IsrDisruptionTarget,
        #[serde(default)]
        target_defense: Option<u32>,
    },
    Assure { track: SpaceTrack },
    /// Place a face-down IO token against a unit or function.
    PlaceIoToken {
        kind: IoTokenKind,
        side: Side,
        target_id: String,
    },
    /// Roll every placed Disrupt C2 token. Targets missing from `defenses`
    /// use the configured default.
    AdjudicateIo {
        #[serde(default)]
        defenses: HashMap<String, u32>,
    },

    // --- Strike ---
    Strike {
        aircraft: Aircraft,
        shields: ShieldPair,
        /// Target id, for IO tokens placed against it.
        #[serde(default)]
        target_id: Option<String>,
        #[serde(default)]
        distance: u32,
        #[serde(default)]
        sead_support: bool,
        #[serde(default)]
        ew_support: bool,
    },
    Sead {
        aircraft: Aircraft,
        sam_defense: u32,
        #[serde(default)]
        ew_support: bool,
    },

    /// Turn boundary.
    EndTurn,
}

/// Parse a scenario: a JSON array of requests.
pub fn parse_requests(json: &str) -> Result<Vec<AdjudicationRequest>> {
    Ok(serde_json::from_str(json)?)
}
