//! Air tasking: operating ranges, fuel sources, basing and launch clearance.

use serde::{Deserialize, Serialize};

use ows_core::components::{Aircraft, FuelSource};
use ows_core::constants::CARRIER_GENERATION_CAPACITY;
use ows_core::enums::{FuelSourceKind, MissionRole, TankerType};
use ows_core::types::HexCoord;
use ows_core::{Result, RulesError};

/// Furthest an aircraft may operate from its fuel source on `role`,
/// without tanker support.
pub fn max_operating_range(aircraft: &Aircraft, role: MissionRole) -> u32 {
    let multiplier = match role {
        MissionRole::Strike | MissionRole::Interdiction => 3,
        MissionRole::Cap | MissionRole::Oca | MissionRole::Dca | MissionRole::Cas => 2,
        MissionRole::Sead
        | MissionRole::Aew
        | MissionRole::Tanker
        | MissionRole::Asw
        | MissionRole::Transport
        | MissionRole::Escort
        | MissionRole::Sucap => 1,
    };
    aircraft.combat_radius * multiplier
}

pub fn is_within_combat_radius(location: HexCoord, source: HexCoord, radius: u32) -> bool {
    location.distance_to(&source) <= radius
}

/// Fuel sources inside the aircraft's combat radius. Carriers count only for
/// carrier-capable aircraft.
pub fn valid_fuel_sources(aircraft: &Aircraft, sources: &[FuelSource]) -> Result<Vec<FuelSource>> {
    let location = aircraft.location.ok_or_else(|| {
        RulesError::Validation(format!("aircraft {} has no location", aircraft.id))
    })?;
    Ok(sources
        .iter()
        .filter(|s| s.kind != FuelSourceKind::Carrier || aircraft.carrier_capable)
        .filter(|s| is_within_combat_radius(location, s.location, aircraft.combat_radius))
        .cloned()
        .collect())
}

/// Sorties a carrier can still generate.
pub fn carrier_generation_capacity(carrier: &FuelSource) -> u32 {
    CARRIER_GENERATION_CAPACITY.saturating_sub(carrier.steps_lost)
}

/// Aircraft one tanker can refuel. `None` is unlimited.
pub fn tanker_support_capacity(tanker: TankerType) -> Option<u32> {
    match tanker {
        TankerType::Kc135 => Some(2),
        TankerType::Kc46 => None,
        TankerType::Kc130j | TankerType::Mq25 => Some(1),
    }
}

/// Each supporting tanker adds one hex.
pub fn extended_range_with_tankers(combat_radius: u32, tankers: u32) -> u32 {
    combat_radius.saturating_add(tankers)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasingRefusal {
    CarrierOnly,
    BaseFull { based: u32, max: u32 },
}

pub fn can_base_at(aircraft: &Aircraft, base: &FuelSource) -> std::result::Result<(), BasingRefusal> {
    if aircraft.carrier_only && base.kind != FuelSourceKind::Carrier {
        return Err(BasingRefusal::CarrierOnly);
    }
    match base.max_aircraft {
        Some(max) if base.based_aircraft >= max => Err(BasingRefusal::BaseFull {
            based: base.based_aircraft,
            max,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchIssue {
    NoMission,
    NotAtBase,
    Destroyed,
    Unarmed,
}

/// Everything stopping the aircraft from launching. Empty means cleared.
pub fn cleared_for_launch(aircraft: &Aircraft) -> Vec<LaunchIssue> {
    let mut issues = Vec::new();
    if aircraft.role.is_none() {
        issues.push(LaunchIssue::NoMission);
    }
    if aircraft.base_location.is_none() {
        issues.push(LaunchIssue::NotAtBase);
    }
    if aircraft.is_destroyed() {
        issues.push(LaunchIssue::Destroyed);
    }
    if matches!(aircraft.role, Some(MissionRole::Strike | MissionRole::Sead)) && !aircraft.is_armed() {
        issues.push(LaunchIssue::Unarmed);
    }
    issues
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCheck {
    pub can_load: bool,
    pub capacity: usize,
    pub requested: usize,
}

pub fn can_load_munitions(aircraft: &Aircraft, salvos: usize) -> LoadCheck {
    let capacity = aircraft.salvo_capacity();
    LoadCheck {
        can_load: salvos <= capacity,
        capacity,
        requested: salvos,
    }
}
