//! Detection: theater ISR, point sensors, AEW and cooperative fusion.
//!
//! Every mode computes an effective rank, rolls it once and detects when the
//! roll meets the target's signature. Fixed installations are never rolled.

use serde::{Deserialize, Serialize};

use ows_core::components::{Contact, DetectionMode};
use ows_core::enums::{Platform, SensorKind};
use ows_core::state::SpaceDashboard;
use ows_core::{DieRank, Result, RulesError};

use crate::rng::DiceRoller;

/// Outcome of a detection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub detected: bool,
    /// Rank actually rolled. `None` for automatic detection.
    pub die: Option<DieRank>,
    pub roll: Option<u32>,
    pub signature: u32,
    pub automatic: bool,
}

impl DetectionResult {
    fn automatic(signature: u32) -> Self {
        Self {
            detected: true,
            die: None,
            roll: None,
            signature,
            automatic: true,
        }
    }
}

/// Airfields, SAM sites and radars are always detected.
pub fn is_automatically_detected(platform: Platform) -> bool {
    matches!(platform, Platform::Airfield | Platform::Sam | Platform::Radar)
}

/// Air units see each other in a shared hex, as do naval units.
pub fn same_hex_auto_detected(a: Platform, b: Platform) -> bool {
    (a.is_air() && b.is_air()) || (a.is_naval() && b.is_naval())
}

/// Signature a sensor kind must beat. Stealth targets present their stealth
/// signature to everything but theater ISR.
pub fn target_signature(target: &Contact, sensor: SensorKind) -> u32 {
    match sensor {
        SensorKind::TheaterIsr => target.signature,
        SensorKind::Aew
        | SensorKind::FighterRadar
        | SensorKind::SamRadar
        | SensorKind::ShipRadar
        | SensorKind::Asw
        | SensorKind::Visual
        | SensorKind::Sof => {
            if target.is_stealth {
                target
                    .stealth_signature
                    .unwrap_or(ows_core::constants::DEFAULT_STEALTH_SIGNATURE)
            } else {
                target.signature
            }
        }
    }
}

fn roll_against<R: DiceRoller>(roller: &mut R, die: DieRank, signature: u32) -> DetectionResult {
    let roll = roller.roll(die);
    DetectionResult {
        detected: roll >= signature,
        die: Some(die),
        roll: Some(roll),
        signature,
        automatic: false,
    }
}

fn apply_cap(rank: DieRank, capped: bool, cap: DieRank) -> DieRank {
    if capped {
        rank.cap_at(cap)
    } else {
        rank
    }
}

/// Theater ISR rolls the dashboard's current ISR die, uncapped.
pub fn resolve_theater_isr<R: DiceRoller>(
    roller: &mut R,
    dashboard: &SpaceDashboard,
    signature: u32,
    io_shift: i32,
) -> DetectionResult {
    let die = dashboard.isr_detection_die().shift(io_shift);
    roll_against(roller, die, signature)
}

/// Effective rank of a point sensor against a target.
pub fn local_rank(sensor: DieRank, stealth: bool, cap: DieRank, io_shift: i32) -> DieRank {
    apply_cap(sensor.shift(io_shift), stealth, cap)
}

pub fn resolve_local<R: DiceRoller>(
    roller: &mut R,
    sensor: DieRank,
    signature: u32,
    stealth: bool,
    cap: DieRank,
    io_shift: i32,
) -> DetectionResult {
    roll_against(roller, local_rank(sensor, stealth, cap, io_shift), signature)
}

/// AEW rank: one demotion per hex of range, then the stealth cap.
pub fn aew_rank(
    sensor: DieRank,
    range_hexes: u32,
    stealth: bool,
    cap: DieRank,
    io_shift: i32,
) -> DieRank {
    apply_cap(sensor.demote(range_hexes).shift(io_shift), stealth, cap)
}

pub fn resolve_aew<R: DiceRoller>(
    roller: &mut R,
    sensor: DieRank,
    range_hexes: u32,
    signature: u32,
    stealth: bool,
    cap: DieRank,
    io_shift: i32,
) -> DetectionResult {
    let die = aew_rank(sensor, range_hexes, stealth, cap, io_shift);
    roll_against(roller, die, signature)
}

/// Fused rank: best sensor promoted once per extra sensor, then capped for
/// low-signature targets.
pub fn cooperative_rank(
    sensors: &[DieRank],
    low_signature: bool,
    cap: DieRank,
    io_shift: i32,
) -> Result<DieRank> {
    let best = sensors.iter().copied().max().ok_or(RulesError::NoSensors)?;
    let extra = u32::try_from(sensors.len() - 1).unwrap_or(u32::MAX);
    Ok(apply_cap(
        best.promote(extra).shift(io_shift),
        low_signature,
        cap,
    ))
}

pub fn resolve_cooperative<R: DiceRoller>(
    roller: &mut R,
    sensors: &[DieRank],
    signature: u32,
    low_signature: bool,
    cap: DieRank,
    io_shift: i32,
) -> Result<DetectionResult> {
    let die = cooperative_rank(sensors, low_signature, cap, io_shift)?;
    Ok(roll_against(roller, die, signature))
}

/// Dispatch on the detection mode. Fixed installations short-circuit.
pub fn resolve_detection<R: DiceRoller>(
    roller: &mut R,
    mode: &DetectionMode,
    target: &Contact,
    dashboard: &SpaceDashboard,
    cap: DieRank,
    io_shift: i32,
) -> Result<DetectionResult> {
    let signature = target_signature(target, mode.sensor_kind());
    if target.platform.is_some_and(is_automatically_detected) {
        return Ok(DetectionResult::automatic(signature));
    }

    let result = match mode {
        DetectionMode::TheaterIsr => resolve_theater_isr(roller, dashboard, signature, io_shift),
        DetectionMode::Local { sensor, .. } => resolve_local(
            roller,
            *sensor,
            signature,
            target.is_capped(),
            cap,
            io_shift,
        ),
        DetectionMode::Aew {
            sensor,
            range_hexes,
        } => resolve_aew(
            roller,
            *sensor,
            *range_hexes,
            signature,
            target.is_capped(),
            cap,
            io_shift,
        ),
        DetectionMode::Cooperative { sensors } => resolve_cooperative(
            roller,
            sensors,
            signature,
            target.is_capped(),
            cap,
            io_shift,
        )?,
    };

    tracing::debug!(
        target = %target.id,
        die = ?result.die,
        roll = ?result.roll,
        detected = result.detected,
        "detection resolved"
    );
    Ok(result)
}
