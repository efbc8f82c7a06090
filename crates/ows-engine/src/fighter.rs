//! Fighter engagement sequencing: escort-first matching, combat dice,
//! initiative and the in-hex battle.

use serde::{Deserialize, Serialize};

use ows_core::components::Fighter;
use ows_core::constants::AIR_SUPERIORITY_MARGIN;
use ows_core::enums::{AirSuperiority, Initiative, Platform};
use ows_core::DieRank;

use crate::combat::{resolve_air_to_air, AirToAirExchange, Combatant};
use crate::rng::DiceRoller;

/// A defender paired with an attacker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub defender: Fighter,
    pub attacker: Fighter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EscortPriority {
    pub escort_matches: Vec<Pairing>,
    pub hvu_matches: Vec<Pairing>,
    pub unengaged_defenders: Vec<Fighter>,
    /// Unmatched escorts first, then unmatched strike aircraft.
    pub unengaged_attackers: Vec<Fighter>,
}

/// Pair defenders with escorts first, then leftover defenders with the
/// strike/HVU aircraft. Matching follows input order.
pub fn resolve_escort_priority(
    defenders: &[Fighter],
    escorts: &[Fighter],
    hvus: &[Fighter],
) -> EscortPriority {
    let escort_count = defenders.len().min(escorts.len());
    let leftover = &defenders[escort_count..];
    let hvu_count = leftover.len().min(hvus.len());

    let pair = |d: &Fighter, a: &Fighter| Pairing {
        defender: d.clone(),
        attacker: a.clone(),
    };

    EscortPriority {
        escort_matches: defenders
            .iter()
            .zip(escorts)
            .take(escort_count)
            .map(|(d, a)| pair(d, a))
            .collect(),
        hvu_matches: leftover
            .iter()
            .zip(hvus)
            .take(hvu_count)
            .map(|(d, a)| pair(d, a))
            .collect(),
        unengaged_defenders: leftover[hvu_count..].to_vec(),
        unengaged_attackers: escorts[escort_count..]
            .iter()
            .chain(&hvus[hvu_count..])
            .cloned()
            .collect(),
    }
}

/// Die a fighter fights with and whether it may start the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatDie {
    pub die: DieRank,
    pub base: DieRank,
    pub demoted: bool,
    pub can_initiate: bool,
}

/// Attack-role fighters fight defensively on a die demoted one step.
pub fn combat_die(fighter: &Fighter) -> CombatDie {
    let can_initiate = fighter.can_initiate();
    let die = if can_initiate {
        fighter.a2a_die
    } else {
        fighter.a2a_die.demote(1)
    };
    CombatDie {
        die,
        base: fighter.a2a_die,
        demoted: !can_initiate,
        can_initiate,
    }
}

fn combatant(fighter: &Fighter) -> Combatant {
    Combatant {
        die: combat_die(fighter).die,
        defense: fighter.a2a_defense,
    }
}

/// One paired engagement, attacker rolls first.
pub fn resolve_engagement<R: DiceRoller>(
    roller: &mut R,
    attacker: &Fighter,
    defender: &Fighter,
) -> AirToAirExchange {
    resolve_air_to_air(roller, combatant(attacker), combatant(defender))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeRoll {
    pub blue_roll: u32,
    pub red_roll: u32,
    pub initiative: Initiative,
}

impl InitiativeRoll {
    pub fn blue_acts_first(&self) -> bool {
        self.initiative == Initiative::Blue
    }
}

/// Best-die rule: each side rolls, blue first. Ties are returned to the
/// caller, who decides whether to re-roll.
pub fn best_die_sequence<R: DiceRoller>(roller: &mut R, die: DieRank) -> InitiativeRoll {
    let blue_roll = roller.roll(die);
    let red_roll = roller.roll(die);
    let initiative = match blue_roll.cmp(&red_roll) {
        std::cmp::Ordering::Greater => Initiative::Blue,
        std::cmp::Ordering::Less => Initiative::Red,
        std::cmp::Ordering::Equal => Initiative::Tied,
    };
    InitiativeRoll {
        blue_roll,
        red_roll,
        initiative,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub sequence: u32,
    pub initiative: Fighter,
    pub other: Fighter,
}

/// I-go-you-go pairing: the initiative side's fighters face the other side's
/// in order, numbered from 1.
pub fn igo_ugo_sequence(initiative_side: &[Fighter], other_side: &[Fighter]) -> Vec<Matchup> {
    initiative_side
        .iter()
        .zip(other_side)
        .zip(1u32..)
        .map(|((a, b), sequence)| Matchup {
            sequence,
            initiative: a.clone(),
            other: b.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterBattle {
    pub escort_exchanges: Vec<AirToAirExchange>,
    pub hvu_exchanges: Vec<AirToAirExchange>,
    pub unengaged_defenders: Vec<String>,
    pub unengaged_attackers: Vec<String>,
    /// Hits scored by the attacking side.
    pub attacker_hits: u32,
    /// Hits scored by the defending side.
    pub defender_hits: u32,
}

/// Full in-hex battle. Escort matches are rolled before HVU matches.
pub fn resolve_in_hex_fighter_battle<R: DiceRoller>(
    roller: &mut R,
    defenders: &[Fighter],
    escorts: &[Fighter],
    hvus: &[Fighter],
) -> FighterBattle {
    let priority = resolve_escort_priority(defenders, escorts, hvus);
    let mut battle = FighterBattle {
        unengaged_defenders: priority
            .unengaged_defenders
            .iter()
            .map(|f| f.id.clone())
            .collect(),
        unengaged_attackers: priority
            .unengaged_attackers
            .iter()
            .map(|f| f.id.clone())
            .collect(),
        ..Default::default()
    };

    for pairing in &priority.escort_matches {
        let x = resolve_engagement(roller, &pairing.attacker, &pairing.defender);
        battle.attacker_hits += x.attacker.hits;
        battle.defender_hits += x.defender.hits;
        battle.escort_exchanges.push(x);
    }
    for pairing in &priority.hvu_matches {
        let x = resolve_engagement(roller, &pairing.attacker, &pairing.defender);
        battle.attacker_hits += x.attacker.hits;
        battle.defender_hits += x.defender.hits;
        battle.hvu_exchanges.push(x);
    }

    tracing::debug!(
        escort = battle.escort_exchanges.len(),
        hvu = battle.hvu_exchanges.len(),
        attacker_hits = battle.attacker_hits,
        defender_hits = battle.defender_hits,
        "fighter battle resolved"
    );
    battle
}

/// Bombers, AEW, tankers and transports.
pub fn is_hvu(platform: Platform) -> bool {
    matches!(
        platform,
        Platform::Bomber | Platform::Aew | Platform::Tanker | Platform::Transport
    )
}

pub fn identify_hvus(aircraft: &[Fighter]) -> Vec<Fighter> {
    aircraft
        .iter()
        .filter(|f| is_hvu(f.platform))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperiorityResult {
    pub superiority: AirSuperiority,
    /// Survivor difference. Zero when contested.
    pub margin: u32,
}

/// A side has air superiority with more than 1.5× the other's survivors.
pub fn determine_air_superiority(blue: u32, red: u32) -> SuperiorityResult {
    let (b, r) = (f64::from(blue), f64::from(red));
    if b > r * AIR_SUPERIORITY_MARGIN {
        SuperiorityResult {
            superiority: AirSuperiority::Blue,
            margin: blue - red,
        }
    } else if r > b * AIR_SUPERIORITY_MARGIN {
        SuperiorityResult {
            superiority: AirSuperiority::Red,
            margin: red - blue,
        }
    } else {
        SuperiorityResult {
            superiority: AirSuperiority::Contested,
            margin: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::rng::ScriptedRoller;
    use ows_core::enums::MissionRole;

    fn fighters(prefix: &str, n: usize) -> Vec<Fighter> {
        (0..n).map(|i| Fighter::new(format!("{prefix}{i}"))).collect()
    }

    #[test]
    fn test_escort_priority_three_vs_five_plus_two() {
        let p = resolve_escort_priority(
            &fighters("d", 3),
            &fighters("e", 5),
            &fighters("s", 2),
        );
        assert_eq!(p.escort_matches.len(), 3);
        assert_eq!(p.hvu_matches.len(), 0);
        assert_eq!(p.unengaged_attackers.len(), 4);
        assert!(p.unengaged_defenders.is_empty());
        let ids: Vec<&str> = p.unengaged_attackers.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e4", "s0", "s1"]);
    }

    #[test]
    fn test_excess_defenders_take_hvus() {
        let p = resolve_escort_priority(
            &fighters("d", 5),
            &fighters("e", 2),
            &fighters("s", 2),
        );
        assert_eq!(p.escort_matches.len(), 2);
        assert_eq!(p.hvu_matches.len(), 2);
        assert_eq!(p.hvu_matches[0].defender.id, "d2");
        assert_eq!(p.hvu_matches[0].attacker.id, "s0");
        assert_eq!(p.unengaged_defenders.len(), 1);
        assert!(p.unengaged_attackers.is_empty());
    }

    #[test]
    fn test_attack_roles_demoted_one_step() {
        for role in [
            MissionRole::Strike,
            MissionRole::Interdiction,
            MissionRole::Cas,
            MissionRole::Sucap,
        ] {
            let f = Fighter::new("x").with_die(DieRank::D12).on_mission(role);
            let cd = combat_die(&f);
            assert_eq!(cd.die, DieRank::D10, "{role:?}");
            assert!(!cd.can_initiate);
        }
        let cap = Fighter::new("y").with_die(DieRank::D12).on_mission(MissionRole::Cap);
        assert_eq!(combat_die(&cap).die, DieRank::D12);
        assert!(combat_die(&Fighter::new("z")).can_initiate);
    }

    #[test]
    fn test_best_die_tie_reported() {
        let mut roller = ScriptedRoller::new(vec![6, 6, 9, 2]);
        assert_eq!(
            best_die_sequence(&mut roller, DieRank::D10).initiative,
            Initiative::Tied
        );
        let second = best_die_sequence(&mut roller, DieRank::D10);
        assert_eq!(second.initiative, Initiative::Blue);
        assert!(second.blue_acts_first());
    }

    #[test]
    fn test_igo_ugo_numbering() {
        let m = igo_ugo_sequence(&fighters("b", 3), &fighters("r", 2));
        assert_eq!(m.len(), 2);
        assert_eq!(m[1].sequence, 2);
        assert_eq!(m[1].other.id, "r1");
    }

    #[test]
    fn test_battle_rolls_escorts_before_hvus() {
        // Escort match: attacker 10 (2 hits), defender 1 (miss).
        // HVU match: attacker 1 (miss), defender 5 (1 hit).
        let mut roller = ScriptedRoller::new(vec![10, 1, 1, 5]);
        let battle = resolve_in_hex_fighter_battle(
            &mut roller,
            &fighters("d", 2),
            &fighters("e", 1),
            &[Fighter::new("bomber").as_platform(Platform::Bomber)],
        );
        assert_eq!(battle.escort_exchanges[0].attacker.hits, 2);
        assert_eq!(battle.hvu_exchanges[0].defender.hits, 1);
        assert_eq!(battle.attacker_hits, 2);
        assert_eq!(battle.defender_hits, 1);
    }

    #[test]
    fn test_identify_hvus() {
        let mix = vec![
            Fighter::new("f"),
            Fighter::new("b").as_platform(Platform::Bomber),
            Fighter::new("k").as_platform(Platform::Tanker),
        ];
        let hvus = identify_hvus(&mix);
        assert_eq!(hvus.len(), 2);
    }

    #[test]
    fn test_air_superiority_margin() {
        assert_eq!(
            determine_air_superiority(4, 2).superiority,
            AirSuperiority::Blue
        );
        assert_eq!(
            determine_air_superiority(3, 2).superiority,
            AirSuperiority::Contested
        );
        let red = determine_air_superiority(1, 2);
        assert_eq!(red.superiority, AirSuperiority::Red);
        assert_eq!(red.margin, 1);
    }

    proptest! {
        #[test]
        fn prop_no_hvu_match_while_an_escort_is_free(
            defenders in 0usize..8,
            escorts in 0usize..8,
            hvus in 0usize..8,
        ) {
            let p = resolve_escort_priority(
                &fighters("d", defenders),
                &fighters("e", escorts),
                &fighters("s", hvus),
            );
            if !p.hvu_matches.is_empty() {
                prop_assert_eq!(p.escort_matches.len(), escorts);
            }
            prop_assert_eq!(
                p.escort_matches.len() + p.hvu_matches.len() + p.unengaged_defenders.len(),
                defenders
            );
            prop_assert_eq!(p.escort_matches.len(), defenders.min(escorts));
        }
    }
}
