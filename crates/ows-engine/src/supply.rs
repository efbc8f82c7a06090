//! Supply tracing: straight-line path, ZOC interruption and range bands.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use ows_core::components::Unit;
use ows_core::config::RulesConfig;
use ows_core::constants::OUT_OF_SUPPLY_MOVEMENT_PENALTY;
use ows_core::enums::{Side, SupplyLevel};
use ows_core::types::HexCoord;
use ows_core::{Result, RulesError};

use crate::ground::supply_modifier;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyStatus {
    pub level: SupplyLevel,
    pub column_modifier: i32,
    /// Fraction of movement lost.
    pub movement_penalty: f64,
}

impl SupplyStatus {
    pub fn of(level: SupplyLevel) -> Self {
        let movement_penalty = match level {
            SupplyLevel::Normal | SupplyLevel::Extended => 0.0,
            SupplyLevel::OutOfSupply => OUT_OF_SUPPLY_MOVEMENT_PENALTY,
        };
        Self {
            level,
            column_modifier: supply_modifier(level),
            movement_penalty,
        }
    }
}

/// Why a unit ended up where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyReason {
    InRange,
    Interdicted,
    TooFar,
    NoSource,
    SourceNotFound,
    NotOnMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyTrace {
    pub unit_id: String,
    pub status: SupplyStatus,
    pub reason: SupplyReason,
    /// Hex distance to the source, when both are on the map.
    pub distance: Option<u32>,
}

/// Every hex in the zone of control of a non-destroyed unit of `side`.
pub fn zones_of_control<'a>(
    side: Side,
    units: impl IntoIterator<Item = &'a Unit>,
) -> HashSet<HexCoord> {
    units
        .into_iter()
        .filter(|u| u.side == side && !u.is_destroyed())
        .filter_map(|u| u.position)
        .flat_map(|p| p.zone_of_control())
        .collect()
}

/// Classify by distance alone, for a line already known to be clear.
pub fn classify_distance(distance: u32, config: &RulesConfig) -> SupplyLevel {
    if distance <= config.normal_supply_range {
        SupplyLevel::Normal
    } else if distance <= config.extended_supply_range() {
        SupplyLevel::Extended
    } else {
        SupplyLevel::OutOfSupply
    }
}

/// Trace supply from `unit` to `source` past the given opposing units.
pub fn trace_supply(
    unit: &Unit,
    source: &Unit,
    opposing: &[Unit],
    config: &RulesConfig,
) -> Result<SupplyTrace> {
    let (from, to) = match (unit.position, source.position) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            return Err(RulesError::Validation(format!(
                "supply trace between {} and {} needs both positions",
                unit.id, source.id
            )))
        }
    };

    let zoc = zones_of_control(unit.side.opponent(), opposing);
    let interdicted = from.line_to(&to).iter().any(|hex| zoc.contains(hex));
    let distance = from.distance_to(&to);

    let (level, reason) = if interdicted {
        (SupplyLevel::OutOfSupply, SupplyReason::Interdicted)
    } else {
        match classify_distance(distance, config) {
            SupplyLevel::OutOfSupply => (SupplyLevel::OutOfSupply, SupplyReason::TooFar),
            level => (level, SupplyReason::InRange),
        }
    };

    tracing::debug!(unit = %unit.id, distance, ?level, ?reason, "supply traced");
    Ok(SupplyTrace {
        unit_id: unit.id.clone(),
        status: SupplyStatus::of(level),
        reason,
        distance: Some(distance),
    })
}

fn cut_off(unit: &Unit, reason: SupplyReason) -> SupplyTrace {
    SupplyTrace {
        unit_id: unit.id.clone(),
        status: SupplyStatus::of(SupplyLevel::OutOfSupply),
        reason,
        distance: None,
    }
}

/// Trace every unit to its designated source among `friendly`. Missing or
/// unknown sources and units off the map are out of supply.
pub fn check_supply_for_all(
    friendly: &[Unit],
    opposing: &[Unit],
    config: &RulesConfig,
) -> Vec<SupplyTrace> {
    friendly
        .iter()
        .map(|unit| {
            let Some(source_id) = unit.supply_source.as_deref() else {
                return cut_off(unit, SupplyReason::NoSource);
            };
            let Some(source) = friendly.iter().find(|u| u.id == source_id) else {
                return cut_off(unit, SupplyReason::SourceNotFound);
            };
            trace_supply(unit, source, opposing, config)
                .unwrap_or_else(|_| cut_off(unit, SupplyReason::NotOnMap))
        })
        .collect()
}

/// Movement left after the supply penalty, floored.
pub fn supply_limited_movement(status: &SupplyStatus, base_movement: u32) -> u32 {
    (f64::from(base_movement) * (1.0 - status.movement_penalty)).floor() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyReport {
    pub side: Side,
    pub normal: u32,
    pub extended: u32,
    pub out_of_supply: u32,
    /// Share of units in normal supply, 0..=100. Zero for an empty side.
    pub health_percent: f64,
}

pub fn supply_report(side: Side, traces: &[SupplyTrace]) -> SupplyReport {
    let count = |level: SupplyLevel| traces.iter().filter(|t| t.status.level == level).count() as u32;
    let normal = count(SupplyLevel::Normal);
    let extended = count(SupplyLevel::Extended);
    let out_of_supply = count(SupplyLevel::OutOfSupply);
    let total = normal + extended + out_of_supply;
    let health_percent = if total == 0 {
        0.0
    } else {
        f64::from(normal) * 100.0 / f64::from(total)
    };
    SupplyReport {
        side,
        normal,
        extended,
        out_of_supply,
        health_percent,
    }
}
