//! Strike packages: munition loading, package validation, strike and SEAD
//! resolution, C2 gating of long-range allocations.

use serde::{Deserialize, Serialize};

use ows_core::components::{Aircraft, Munition, ShieldPair};
use ows_core::constants::{
    DEFAULT_SAM_ENVELOPE, DEFAULT_STRIKE_DIE, SAM_DESTROY_CRITICALS, STANDOFF_MUNITION_RANGE,
};
use ows_core::enums::MunitionClass;
use ows_core::outcome::meet_or_beat;
use ows_core::state::SpaceDashboard;
use ows_core::types::HexCoord;
use ows_core::{DieRank, Result, RulesError};

use crate::combat::{resolve_attack, ShieldedAttack};
use crate::rng::DiceRoller;

// --- Loading and validation ---

/// Load `munitions` as the aircraft's salvos, replacing any previous load.
pub fn load_munitions(aircraft: &Aircraft, munitions: Vec<Munition>) -> Result<Aircraft> {
    let capacity = aircraft.salvo_capacity();
    if munitions.len() > capacity {
        return Err(RulesError::Validation(format!(
            "cannot load {} salvos on {}: capacity {}",
            munitions.len(),
            aircraft.id,
            capacity
        )));
    }
    Ok(Aircraft {
        munitions,
        ..aircraft.clone()
    })
}

/// A validated strike package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikePackage {
    pub strike: Vec<Aircraft>,
    pub escorts: Vec<Aircraft>,
    pub sead: Vec<Aircraft>,
}

/// A package needs at least one strike aircraft, and every strike aircraft
/// must carry munitions or an organic strike die.
pub fn validate_package(
    strike: &[Aircraft],
    escorts: &[Aircraft],
    sead: &[Aircraft],
) -> Result<StrikePackage> {
    if strike.is_empty() {
        return Err(RulesError::Validation(
            "strike package has no strike aircraft".into(),
        ));
    }
    let offenders: Vec<String> = strike
        .iter()
        .filter(|a| !a.is_armed())
        .map(|a| a.id.clone())
        .collect();
    if !offenders.is_empty() {
        return Err(RulesError::UnarmedAircraft { offenders });
    }
    Ok(StrikePackage {
        strike: strike.to_vec(),
        escorts: escorts.to_vec(),
        sead: sead.to_vec(),
    })
}

// --- Reach and die ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reach {
    pub can_reach: bool,
    pub distance: u32,
    pub max_range: u32,
}

/// Reach is the larger of combat radius and the lead munition's range.
/// Any JASSM-ER aboard sets it to the standoff range.
pub fn can_reach_target(aircraft: &Aircraft, distance: u32) -> Reach {
    let mut max_range = aircraft.combat_radius;
    if let Some(lead) = aircraft.munitions.first() {
        max_range = max_range.max(lead.range);
    }
    if aircraft
        .munitions
        .iter()
        .any(|m| m.class == MunitionClass::JassmEr)
    {
        max_range = STANDOFF_MUNITION_RANGE;
    }
    Reach {
        can_reach: distance <= max_range,
        distance,
        max_range,
    }
}

/// Lead munition's die, else the organic strike die, else d8.
pub fn strike_die(aircraft: &Aircraft) -> DieRank {
    aircraft
        .munitions
        .first()
        .map(|m| m.strike_die)
        .or(aircraft.organic_strike)
        .unwrap_or(DEFAULT_STRIKE_DIE)
}

// --- Resolution ---

/// Die after support: one promotion each for SEAD and EW.
pub fn supported_die(die: DieRank, sead_support: bool, ew_support: bool) -> DieRank {
    let steps = u32::from(sead_support) + u32::from(ew_support);
    die.promote(steps)
}

pub fn resolve_strike<R: DiceRoller>(
    roller: &mut R,
    die: DieRank,
    shields: &ShieldPair,
    sead_support: bool,
    ew_support: bool,
) -> ShieldedAttack {
    let die = supported_die(die, sead_support, ew_support);
    let attack = resolve_attack(roller, die, shields);
    tracing::debug!(die = %die, roll = attack.roll, hits = attack.hits, "strike resolved");
    attack
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeadResult {
    pub die: DieRank,
    pub roll: u32,
    pub hits: u32,
    pub suppressed: bool,
    pub destroyed: bool,
}

/// SEAD against a SAM: suppressed on any success, destroyed on two or more
/// critical hits.
pub fn resolve_sead<R: DiceRoller>(
    roller: &mut R,
    aircraft: &Aircraft,
    sam_defense: u32,
    ew_support: bool,
) -> SeadResult {
    let die = supported_die(aircraft.sead_die, false, ew_support);
    let roll = roller.roll(die);
    let outcome = meet_or_beat(roll, sam_defense);
    tracing::debug!(
        aircraft = %aircraft.id,
        die = %die,
        roll,
        success = outcome.success,
        "SEAD resolved"
    );
    SeadResult {
        die,
        roll,
        hits: outcome.hits(),
        suppressed: outcome.success,
        destroyed: outcome.success && outcome.critical_hits >= SAM_DESTROY_CRITICALS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeadRange {
    pub in_range: bool,
    /// Outside the SAM's own envelope.
    pub standoff: bool,
    pub distance: u32,
}

pub fn sead_in_range(aircraft: &Aircraft, sam: HexCoord, sam_envelope: Option<u32>) -> Result<SeadRange> {
    let location = aircraft.location.ok_or_else(|| {
        RulesError::Validation(format!("SEAD aircraft {} has no location", aircraft.id))
    })?;
    let distance = location.distance_to(&sam);
    Ok(SeadRange {
        in_range: distance <= aircraft.sead_range,
        standoff: distance > sam_envelope.unwrap_or(DEFAULT_SAM_ENVELOPE),
        distance,
    })
}

// --- Escorts and interception ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscortCount {
    pub escorts_engaged: u32,
    /// Escorts left over once every attacking fighter is matched.
    pub excess: u32,
    pub all_escorts_engaged: bool,
}

/// Escorts pair one-to-one with attacking fighters before anything else.
pub fn escort_priority(escorts: u32, attacking_fighters: u32) -> EscortCount {
    EscortCount {
        escorts_engaged: escorts.min(attacking_fighters),
        excess: escorts.saturating_sub(attacking_fighters),
        all_escorts_engaged: escorts <= attacking_fighters,
    }
}

pub fn is_interceptable(munition: &Munition) -> bool {
    munition.class.is_interceptable()
}

/// Munitions the escort/CAP logic may engage.
pub fn interceptable_munitions(munitions: &[Munition]) -> Vec<Munition> {
    munitions
        .iter()
        .filter(|m| is_interceptable(m))
        .cloned()
        .collect()
}

// --- C2 gating ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRangeAllocation {
    pub available: u32,
    pub used: u32,
    pub remaining: u32,
}

/// Spend one long-range strike action. Fails when C2 has none left.
pub fn allocate_long_range(dashboard: &SpaceDashboard, used: u32) -> Result<LongRangeAllocation> {
    let available = dashboard.available_strike_actions();
    if used >= available {
        return Err(RulesError::Validation(format!(
            "no long-range strike actions left ({used} of {available} used)"
        )));
    }
    Ok(LongRangeAllocation {
        available,
        used: used + 1,
        remaining: available - used - 1,
    })
}
