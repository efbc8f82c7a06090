//! Ground combat adjudication table (GCAT), fire effects and suppression.

use serde::{Deserialize, Serialize};

use ows_core::components::{GroundEnvironment, Unit};
use ows_core::constants::*;
use ows_core::enums::*;
use ows_core::{DieRank, Result, RulesError};

use crate::combat::apply_step_losses;
use crate::rng::DiceRoller;

// --- Force ratio ---

/// Band for the given remaining steps. Edges are compared as exact
/// fractions, so an exact 1:3 (or 2:6) is the 1:3 band rather than 1:2 as a
/// 0.33 decimal cutoff would have it. No defending steps is the top band.
pub fn force_ratio(attacker_steps: u32, defender_steps: u32) -> ForceRatio {
    if defender_steps == 0 {
        return ForceRatio::FiveToOne;
    }
    let (a, d) = (u64::from(attacker_steps), u64::from(defender_steps));
    if 3 * a <= d {
        ForceRatio::OneToThree
    } else if 2 * a <= d {
        ForceRatio::OneToTwo
    } else if 4 * a <= 3 * d {
        ForceRatio::OneToOne
    } else if 2 * a <= 3 * d {
        ForceRatio::TwoToOne
    } else if a <= 3 * d {
        ForceRatio::ThreeToOne
    } else if a <= 4 * d {
        ForceRatio::FourToOne
    } else {
        ForceRatio::FiveToOne
    }
}

/// Base GCAT column shift of a band.
pub fn base_shift(ratio: ForceRatio) -> i32 {
    match ratio {
        ForceRatio::OneToThree => -3,
        ForceRatio::OneToTwo => -2,
        ForceRatio::OneToOne => -1,
        ForceRatio::TwoToOne => 0,
        ForceRatio::ThreeToOne => 1,
        ForceRatio::FourToOne => 2,
        ForceRatio::FiveToOne => 3,
    }
}

// --- Modifiers ---

pub fn terrain_modifier(terrain: TerrainType, kind: UnitKind) -> i32 {
    use TerrainType as T;
    use UnitKind as K;
    match (terrain, kind) {
        (T::Open, K::Infantry | K::LightInfantry) => 0,
        (T::Open, K::Mechanized | K::Armor) => 1,
        (T::Open, K::Artillery | K::AirDefense) => 0,

        (T::Rough, K::Infantry | K::LightInfantry) => 0,
        (T::Rough, K::Mechanized | K::Armor) => -1,
        (T::Rough, K::Artillery | K::AirDefense) => -1,

        (T::Forest, K::Infantry | K::LightInfantry) => 1,
        (T::Forest, K::Mechanized | K::Armor) => -2,
        (T::Forest, K::Artillery | K::AirDefense) => -1,

        (T::Urban, K::Infantry | K::LightInfantry) => 2,
        (T::Urban, K::Mechanized) => 0,
        (T::Urban, K::Armor) => -1,
        (T::Urban, K::Artillery | K::AirDefense) => 0,

        (T::Mountain, K::Infantry | K::LightInfantry) => 2,
        (T::Mountain, K::Mechanized) => -2,
        (T::Mountain, K::Armor) => -3,
        (T::Mountain, K::Artillery | K::AirDefense) => -2,

        (T::Water, K::Helicopter) => 0,
        (T::Water, _) => -3,

        (_, K::Helicopter) => 0,
    }
}

pub fn supply_modifier(level: SupplyLevel) -> i32 {
    match level {
        SupplyLevel::Normal => 0,
        SupplyLevel::Extended => -1,
        SupplyLevel::OutOfSupply => -2,
    }
}

/// Itemized column shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnShift {
    pub base: i32,
    pub terrain: i32,
    pub supply: i32,
    pub main_effort: i32,
    pub fortified: i32,
    pub weather: i32,
}

impl ColumnShift {
    pub fn total(&self) -> i32 {
        self.base + self.terrain + self.supply + self.main_effort + self.fortified + self.weather
    }
}

pub fn column_shift(
    ratio: ForceRatio,
    lead_kind: UnitKind,
    main_effort: bool,
    environment: &GroundEnvironment,
) -> ColumnShift {
    ColumnShift {
        base: base_shift(ratio),
        terrain: terrain_modifier(environment.terrain, lead_kind),
        supply: supply_modifier(environment.supply),
        main_effort: if main_effort { 1 } else { 0 },
        fortified: if environment.fortified { -2 } else { 0 },
        weather: if environment.weather.is_adverse() { -1 } else { 0 },
    }
}

// --- Casualties ---

/// Casualty tier of a d10 roll.
pub fn casualty_tier(roll: u32) -> CasualtyTier {
    match roll {
        0..=4 => CasualtyTier::Low,
        5..=7 => CasualtyTier::Medium,
        _ => CasualtyTier::High,
    }
}

/// (attacker, defender) losses of a tier.
pub fn casualties(tier: CasualtyTier) -> (u32, u32) {
    match tier {
        CasualtyTier::Low => (1, 3),
        CasualtyTier::Medium => (2, 2),
        CasualtyTier::High => (3, 1),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundCombatResult {
    pub attacker_steps: u32,
    pub defender_steps: u32,
    pub force_ratio: ForceRatio,
    pub shift: ColumnShift,
    pub roll: u32,
    pub tier: CasualtyTier,
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

fn total_steps(units: &[Unit]) -> u32 {
    units.iter().map(Unit::remaining_steps).sum()
}

/// Resolve one ground assault. The terrain modifier is keyed on the
/// attacking unit with the most remaining steps (first wins a tie).
pub fn resolve_ground_combat<R: DiceRoller>(
    roller: &mut R,
    attackers: &[Unit],
    defenders: &[Unit],
    environment: &GroundEnvironment,
) -> Result<GroundCombatResult> {
    for unit in attackers.iter().chain(defenders) {
        unit.validate()?;
    }
    let lead = attackers
        .iter()
        .reduce(|best, u| {
            if u.remaining_steps() > best.remaining_steps() {
                u
            } else {
                best
            }
        })
        .ok_or_else(|| RulesError::Validation("ground combat needs an attacker".into()))?;

    let attacker_steps = total_steps(attackers);
    let defender_steps = total_steps(defenders);
    let ratio = force_ratio(attacker_steps, defender_steps);
    let main_effort = attackers
        .iter()
        .any(|u| u.organization == Organization::MainEffort);
    let shift = column_shift(ratio, lead.kind, main_effort, environment);

    let roll = roller.roll(CASUALTY_DIE);
    let tier = casualty_tier(roll);
    let (attacker_losses, defender_losses) = casualties(tier);

    tracing::debug!(
        ?ratio,
        total_shift = shift.total(),
        roll,
        ?tier,
        "ground combat resolved"
    );

    Ok(GroundCombatResult {
        attacker_steps,
        defender_steps,
        force_ratio: ratio,
        shift,
        roll,
        tier,
        attacker_losses,
        defender_losses,
    })
}

// --- Fire effects ---

/// Hits needed for one step loss.
pub fn fire_threshold(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::LightInfantry => 1,
        UnitKind::Infantry
        | UnitKind::Artillery
        | UnitKind::AirDefense
        | UnitKind::Helicopter => 2,
        UnitKind::Mechanized | UnitKind::Armor => 3,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireEffectResult {
    pub effect: FireEffect,
    pub step_losses: u32,
    /// Suppression markers added.
    pub suppression: u32,
    pub unit: Unit,
}

/// Convert strike hits on a ground unit into step losses and suppression.
pub fn resolve_fire_effects(unit: &Unit, hits: u32) -> Result<FireEffectResult> {
    unit.validate()?;
    if hits == 0 {
        return Ok(FireEffectResult {
            effect: FireEffect::NoEffect,
            step_losses: 0,
            suppression: 0,
            unit: unit.clone(),
        });
    }

    let threshold = fire_threshold(unit.kind);
    let losses = hits / threshold;
    let markers = hits % threshold;

    let applied = apply_step_losses(unit, losses);
    let next = apply_suppression(&applied.unit, markers);
    let effect = if applied.destroyed {
        FireEffect::Destruction
    } else if losses > 0 {
        FireEffect::StepLoss
    } else {
        FireEffect::Suppression
    };

    Ok(FireEffectResult {
        effect,
        step_losses: applied.applied,
        suppression: markers,
        unit: next,
    })
}

// --- Suppression & movement ---

pub fn apply_suppression(unit: &Unit, markers: u32) -> Unit {
    let mut next = unit.clone();
    next.suppression_level = unit.suppression_level.saturating_add(markers);
    next
}

pub fn remove_suppression(unit: &Unit) -> Unit {
    let mut next = unit.clone();
    next.suppression_level = 0;
    next
}

/// End of turn: every unit loses its suppression.
pub fn clear_suppression(units: &[Unit]) -> Vec<Unit> {
    units.iter().map(remove_suppression).collect()
}

/// Combat die after suppression demotion.
pub fn suppressed_combat_die(unit: &Unit, base: DieRank) -> DieRank {
    base.demote(unit.suppression_level)
}

/// Movement points this turn. Suppressed units cannot move.
pub fn allowed_movement(unit: &Unit, base_movement: u32) -> u32 {
    if unit.is_suppressed() {
        return 0;
    }
    let factor = match unit.organization {
        Organization::MainEffort => MAIN_EFFORT_MOVEMENT_FACTOR,
        Organization::Reserve => RESERVE_MOVEMENT_FACTOR,
        Organization::Normal => 1.0,
    };
    (f64::from(base_movement) * factor).floor() as u32
}
