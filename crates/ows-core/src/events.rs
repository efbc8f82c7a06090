//! Journal records emitted by a session for each adjudicated event.

use serde::{Deserialize, Serialize};

use crate::dice::DieRank;
use crate::enums::*;

/// One Disrupt C2 token's roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoDisruption {
    pub token_id: u32,
    pub side: Side,
    pub target_id: String,
    pub roll: u32,
    pub success: bool,
    pub blocked_by_assure: bool,
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicationRecord {
    /// Position in the journal, starting at 1.
    pub seq: u32,
    pub turn: u32,
    pub event: AdjudicationEvent,
}

/// Summary of a resolved event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdjudicationEvent {
    Attack {
        die: DieRank,
        roll: u32,
        hits: u32,
        grey_defeated: bool,
    },
    Salvo {
        rolls: Vec<u32>,
        total_hits: u32,
        grey_layers_spent: u32,
    },
    Detection {
        target_id: String,
        /// `None` when detection was automatic.
        die: Option<DieRank>,
        roll: Option<u32>,
        signature: u32,
        detected: bool,
    },
    AirBattle {
        escort_matches: u32,
        hvu_matches: u32,
        /// Hits scored by the attacking side.
        attacker_hits: u32,
        /// Hits scored by the defending side.
        defender_hits: u32,
        unengaged_attackers: Vec<String>,
        unengaged_defenders: Vec<String>,
    },
    Initiative {
        blue_roll: u32,
        red_roll: u32,
        initiative: Initiative,
    },
    GroundCombat {
        force_ratio: ForceRatio,
        total_shift: i32,
        casualty_roll: u32,
        tier: CasualtyTier,
        attacker_losses: u32,
        defender_losses: u32,
    },
    FireEffects {
        unit_id: String,
        effect: FireEffect,
        step_losses: u32,
        suppression: u32,
        destroyed: bool,
    },
    Supply {
        unit_id: String,
        level: SupplyLevel,
        column_modifier: i32,
        movement_penalty: f64,
        distance: u32,
    },
    SpaceDisruption {
        track: SpaceTrack,
        roll: u32,
        success: bool,
        blocked_by_assure: bool,
        strike_actions: u32,
    },
    Assured {
        track: SpaceTrack,
    },
    IoTokenPlaced {
        token_id: u32,
        kind: IoTokenKind,
        side: Side,
        target_id: String,
    },
    /// Every face-down Disrupt C2 token rolled, red's first.
    IoAdjudicated {
        disruptions: Vec<IoDisruption>,
    },
    Strike {
        aircraft_id: String,
        die: DieRank,
        roll: u32,
        hits: u32,
        /// A countermeasure token absorbed the first hit.
        absorbed: bool,
        long_range: bool,
        strike_actions_left: u32,
    },
    Sead {
        aircraft_id: String,
        die: DieRank,
        roll: u32,
        hits: u32,
        suppressed: bool,
        destroyed: bool,
    },
    TurnEnded {
        turn: u32,
        policy: DisruptionPolicy,
    },
}
