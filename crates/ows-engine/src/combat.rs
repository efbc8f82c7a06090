//! Shielded combat: attacks against grey then red shields, salvos, step
//! losses and the simultaneous air-to-air exchange.

use serde::{Deserialize, Serialize};

use ows_core::components::{ShieldPair, Unit};
use ows_core::outcome::meet_or_beat;
use ows_core::DieRank;

use crate::rng::DiceRoller;

/// Result of one die against a shield pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldedAttack {
    pub die: DieRank,
    pub roll: u32,
    pub hits: u32,
    /// True only when a grey layer was present and met.
    pub grey_defeated: bool,
}

/// Result of a salvo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalvoResult {
    pub missiles: Vec<ShieldedAttack>,
    pub total_hits: u32,
    /// Grey layers spent. Always 0 for the plain salvo.
    pub grey_layers_spent: u32,
}

impl SalvoResult {
    pub fn rolls(&self) -> Vec<u32> {
        self.missiles.iter().map(|m| m.roll).collect()
    }
}

/// Test an already-rolled value against a shield pair.
pub fn shielded_outcome(die: DieRank, roll: u32, shields: &ShieldPair) -> ShieldedAttack {
    if shields.has_grey() && roll < shields.grey {
        return ShieldedAttack {
            die,
            roll,
            hits: 0,
            grey_defeated: false,
        };
    }
    ShieldedAttack {
        die,
        roll,
        hits: meet_or_beat(roll, shields.red).hits(),
        grey_defeated: shields.has_grey(),
    }
}

/// Roll once and resolve against grey, then red.
pub fn resolve_attack<R: DiceRoller>(
    roller: &mut R,
    die: DieRank,
    shields: &ShieldPair,
) -> ShieldedAttack {
    let roll = roller.roll(die);
    shielded_outcome(die, roll, shields)
}

/// Every missile faces the same shield pair. Grey is not consumed.
pub fn resolve_salvo<R: DiceRoller>(
    roller: &mut R,
    dice: &[DieRank],
    shields: &ShieldPair,
) -> SalvoResult {
    let missiles: Vec<ShieldedAttack> = dice
        .iter()
        .map(|&die| resolve_attack(roller, die, shields))
        .collect();
    let total_hits = missiles.iter().map(|m| m.hits).sum();
    SalvoResult {
        missiles,
        total_hits,
        grey_layers_spent: 0,
    }
}

/// Layered defense: `grey_layers` layers of value `shields.grey` are spent
/// one per missile, in array order, whether or not that missile gets through.
/// Missiles after the last layer face red directly.
pub fn resolve_layered_salvo<R: DiceRoller>(
    roller: &mut R,
    dice: &[DieRank],
    grey_layers: u32,
    shields: &ShieldPair,
) -> SalvoResult {
    let red_only = ShieldPair::red_only(shields.red);
    let mut spent = 0u32;
    let mut missiles = Vec::with_capacity(dice.len());

    for &die in dice {
        let facing = if spent < grey_layers && shields.has_grey() {
            spent += 1;
            shields
        } else {
            &red_only
        };
        missiles.push(resolve_attack(roller, die, facing));
    }

    let total_hits = missiles.iter().map(|m| m.hits).sum();
    SalvoResult {
        missiles,
        total_hits,
        grey_layers_spent: spent,
    }
}

/// Successor unit after taking `hits` step losses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLossResult {
    pub unit: Unit,
    pub applied: u32,
    pub destroyed: bool,
}

/// Apply step losses, capped at the unit's maximum.
pub fn apply_step_losses(unit: &Unit, hits: u32) -> StepLossResult {
    let mut next = unit.clone();
    let applied = hits.min(unit.remaining_steps());
    next.steps_lost = unit.steps_lost.saturating_add(applied).min(unit.steps_max);
    let destroyed = next.is_destroyed();
    StepLossResult {
        unit: next,
        applied,
        destroyed,
    }
}

/// Missile magazine of a shooter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magazine {
    pub total: u32,
    #[serde(default)]
    pub consumed: u32,
}

impl Magazine {
    pub fn new(total: u32) -> Self {
        Self { total, consumed: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.consumed)
    }
}

/// Mark `salvos` as expended. Remaining never goes below zero.
pub fn consume_missiles(magazine: &Magazine, salvos: u32) -> Magazine {
    Magazine {
        total: magazine.total,
        consumed: magazine.consumed.saturating_add(salvos),
    }
}

/// One side of an air-to-air exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub die: DieRank,
    pub defense: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSide {
    pub die: DieRank,
    pub roll: u32,
    /// Hits scored on the opponent.
    pub hits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirToAirExchange {
    pub attacker: ExchangeSide,
    pub defender: ExchangeSide,
}

/// Simultaneous exchange: attacker rolls, then defender rolls, each tested
/// against the other's defense.
pub fn resolve_air_to_air<R: DiceRoller>(
    roller: &mut R,
    attacker: Combatant,
    defender: Combatant,
) -> AirToAirExchange {
    let attack_roll = roller.roll(attacker.die);
    let defense_roll = roller.roll(defender.die);
    AirToAirExchange {
        attacker: ExchangeSide {
            die: attacker.die,
            roll: attack_roll,
            hits: meet_or_beat(attack_roll, defender.defense).hits(),
        },
        defender: ExchangeSide {
            die: defender.die,
            roll: defense_roll,
            hits: meet_or_beat(defense_roll, attacker.defense).hits(),
        },
    }
}

/// Totals of an in-hex battle where every blue aircraft fights every red one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InHexBattle {
    pub blue_hits: u32,
    pub red_hits: u32,
    pub exchanges: Vec<AirToAirExchange>,
}

/// Blue-major order: each blue combatant against each red one.
pub fn resolve_in_hex_battle<R: DiceRoller>(
    roller: &mut R,
    blue: &[Combatant],
    red: &[Combatant],
) -> InHexBattle {
    let mut battle = InHexBattle {
        blue_hits: 0,
        red_hits: 0,
        exchanges: Vec::with_capacity(blue.len() * red.len()),
    };
    for &b in blue {
        for &r in red {
            let exchange = resolve_air_to_air(roller, b, r);
            battle.blue_hits += exchange.attacker.hits;
            battle.red_hits += exchange.defender.hits;
            battle.exchanges.push(exchange);
        }
    }
    battle
}
