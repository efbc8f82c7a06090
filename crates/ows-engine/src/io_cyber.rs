//! Information operations: IO token lifecycle, Disrupt C2 adjudication,
//! SIGINT/EMSO and countermeasures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ows_core::components::IoToken;
use ows_core::config::RulesConfig;
use ows_core::enums::*;
use ows_core::outcome::meet_or_beat;
use ows_core::state::SpaceDashboard;
use ows_core::DieRank;

use crate::rng::DiceRoller;
use crate::space;

// --- Token lifecycle ---

/// New face-down token.
pub fn place_token(id: u32, kind: IoTokenKind, side: Side, target_id: impl Into<String>) -> IoToken {
    IoToken {
        id,
        kind,
        side,
        target_id: target_id.into(),
        revealed: false,
        defense: None,
    }
}

pub fn reveal_token(token: &IoToken) -> IoToken {
    IoToken {
        revealed: true,
        ..token.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReset {
    pub remaining: Vec<IoToken>,
    pub removed: Vec<IoToken>,
}

/// Turn boundary: defensive tokens stay, offensive ones are discarded.
pub fn reset_io_tokens(tokens: &[IoToken]) -> TokenReset {
    let (remaining, removed) = tokens.iter().cloned().partition(|t| t.kind.is_defensive());
    TokenReset { remaining, removed }
}

// --- Disrupt C2 ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisruptC2Result {
    pub roll: u32,
    pub success: bool,
    /// An Assure C2 token stopped the roll.
    pub blocked_by_assure: bool,
    /// An Assure C2 token was present and beaten.
    pub penetrated_assure: bool,
}

/// Roll the disrupt die. An Assure C2 defense acts like a grey shield that
/// must be met before the target's own defense is tested.
pub fn resolve_disrupt_c2<R: DiceRoller>(
    roller: &mut R,
    die: DieRank,
    target_defense: u32,
    assure_defense: Option<u32>,
) -> DisruptC2Result {
    let roll = roller.roll(die);
    if let Some(assure) = assure_defense {
        if roll < assure {
            return DisruptC2Result {
                roll,
                success: false,
                blocked_by_assure: true,
                penetrated_assure: false,
            };
        }
    }
    DisruptC2Result {
        roll,
        success: meet_or_beat(roll, target_defense).success,
        blocked_by_assure: false,
        penetrated_assure: assure_defense.is_some(),
    }
}

/// What a successful disruption does to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisruptEffect {
    pub disrupted: bool,
    pub can_fire: bool,
    pub can_generate_io: bool,
    pub can_designate_main_effort: bool,
    pub attack_die_demotion: u32,
    pub space_function_demoted: bool,
}

impl DisruptEffect {
    fn intact() -> Self {
        Self {
            disrupted: false,
            can_fire: true,
            can_generate_io: true,
            can_designate_main_effort: true,
            attack_die_demotion: 0,
            space_function_demoted: false,
        }
    }
}

pub fn disrupt_effect(target: IoTargetKind, success: bool) -> DisruptEffect {
    let intact = DisruptEffect::intact();
    if !success {
        return intact;
    }
    let disrupted = DisruptEffect {
        disrupted: true,
        ..intact
    };
    match target {
        IoTargetKind::Hq => DisruptEffect {
            can_generate_io: false,
            can_designate_main_effort: false,
            ..disrupted
        },
        IoTargetKind::Ship | IoTargetKind::Artillery | IoTargetKind::Sam => DisruptEffect {
            can_fire: false,
            ..disrupted
        },
        IoTargetKind::AirMission => DisruptEffect {
            attack_die_demotion: 1,
            ..disrupted
        },
        IoTargetKind::SpaceC2 | IoTargetKind::SpaceIsr | IoTargetKind::SpacePnt => DisruptEffect {
            space_function_demoted: true,
            ..disrupted
        },
    }
}

/// Disrupt C2 against a dashboard track. On success the matching transition
/// is applied to produce the successor dashboard.
pub fn disrupt_dashboard<R: DiceRoller>(
    roller: &mut R,
    dashboard: &SpaceDashboard,
    track: SpaceTrack,
    isr_target: IsrDisruptionTarget,
    target_defense: u32,
    config: &RulesConfig,
) -> (DisruptC2Result, SpaceDashboard) {
    let assure = dashboard
        .is_assured(track)
        .then_some(config.default_assure_defense);
    let result = resolve_disrupt_c2(roller, config.disrupt_c2_die, target_defense, assure);
    if !result.success {
        return (result, dashboard.clone());
    }
    let next = match track {
        SpaceTrack::C2 => space::apply_disrupt_c2(dashboard, 1),
        SpaceTrack::Pnt => space::apply_disrupt_pnt(dashboard),
        SpaceTrack::Isr => space::apply_disrupt_isr(dashboard, isr_target),
    };
    (result, next)
}

// --- SIGINT / countermeasures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigintEffect {
    pub neutralized: bool,
    pub detection_promotion: u32,
    pub strike_promotion: u32,
}

/// SIGINT/EMSO promotes detection and attacks against its target by one,
/// unless the target holds a countermeasure token.
pub fn resolve_sigint_emso(target_has_countermeasures: bool) -> SigintEffect {
    if target_has_countermeasures {
        SigintEffect {
            neutralized: true,
            detection_promotion: 0,
            strike_promotion: 0,
        }
    } else {
        SigintEffect {
            neutralized: false,
            detection_promotion: 1,
            strike_promotion: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountermeasureEffect {
    pub active: bool,
    /// The first strike hit is absorbed and the token spent.
    pub absorbs_first_hit: bool,
    pub demotion: u32,
}

pub fn resolve_countermeasures(holder_has_cm: bool, attack: AttackKind) -> CountermeasureEffect {
    if !holder_has_cm {
        return CountermeasureEffect {
            active: false,
            absorbs_first_hit: false,
            demotion: 0,
        };
    }
    match attack {
        AttackKind::Strike => CountermeasureEffect {
            active: true,
            absorbs_first_hit: true,
            demotion: 0,
        },
        AttackKind::Detection | AttackKind::Combat => CountermeasureEffect {
            active: true,
            absorbs_first_hit: false,
            demotion: 1,
        },
    }
}

fn has_token(tokens: &[IoToken], target_id: &str, pred: impl Fn(IoTokenKind) -> bool) -> bool {
    tokens
        .iter()
        .any(|t| t.target_id == target_id && pred(t.kind))
}

/// Net rank shift for detections and attacks against `target_id`.
/// SIGINT gives +1; a countermeasure cancels SIGINT, or gives -1 on its own.
pub fn io_shift(target_id: &str, tokens: &[IoToken]) -> i32 {
    let sigint = has_token(tokens, target_id, |k| k == IoTokenKind::SigintEmso);
    let cm = has_token(tokens, target_id, IoTokenKind::is_countermeasure);
    match (sigint, cm) {
        (true, false) => 1,
        (true, true) => 0,
        (false, true) => -1,
        (false, false) => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsorbedStrike {
    pub hits: u32,
    pub absorbed: bool,
    /// Token list with the spent countermeasure removed.
    pub tokens: Vec<IoToken>,
}

/// Spend the target's first countermeasure token on one strike hit.
pub fn absorb_strike_hit(target_id: &str, hits: u32, tokens: &[IoToken]) -> AbsorbedStrike {
    let spent = if hits > 0 {
        tokens
            .iter()
            .position(|t| t.target_id == target_id && t.kind.is_countermeasure())
    } else {
        None
    };
    match spent {
        Some(index) => {
            let mut remaining = tokens.to_vec();
            remaining.remove(index);
            AbsorbedStrike {
                hits: hits - 1,
                absorbed: true,
                tokens: remaining,
            }
        }
        None => AbsorbedStrike {
            hits,
            absorbed: false,
            tokens: tokens.to_vec(),
        },
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitIoStatus {
    pub disrupted: bool,
    pub sigint_emso: bool,
    pub countermeasures: bool,
    pub token_ids: Vec<u32>,
}

pub fn unit_io_status(unit_id: &str, tokens: &[IoToken]) -> UnitIoStatus {
    let mut status = UnitIoStatus::default();
    for token in tokens.iter().filter(|t| t.target_id == unit_id) {
        status.token_ids.push(token.id);
        match token.kind {
            IoTokenKind::DisruptC2 => status.disrupted = true,
            IoTokenKind::SigintEmso => status.sigint_emso = true,
            IoTokenKind::ActiveCountermeasures | IoTokenKind::PassiveCountermeasures => {
                status.countermeasures = true
            }
            IoTokenKind::AssureC2 => {}
        }
    }
    status
}

// --- Two-sided adjudication ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDisruption {
    pub token_id: u32,
    pub side: Side,
    pub target_id: String,
    pub result: DisruptC2Result,
}

/// Resolve every face-down Disrupt C2 token both sides placed. Red's tokens
/// are rolled first, then blue's, each in placement order. A target's defense comes from
/// `defenses`, falling back to the configured default; an opposing Assure C2
/// token on the same target supplies the grey gate.
pub fn adjudicate_io_tokens<R: DiceRoller>(
    roller: &mut R,
    blue: &[IoToken],
    red: &[IoToken],
    defenses: &HashMap<String, u32>,
    config: &RulesConfig,
) -> Vec<TokenDisruption> {
    let mut out = Vec::new();
    for (attackers, defenders) in [(red, blue), (blue, red)] {
        let placed = attackers
            .iter()
            .filter(|t| t.kind == IoTokenKind::DisruptC2 && t.is_face_down());
        for token in placed {
            let assure = defenders
                .iter()
                .find(|t| t.kind == IoTokenKind::AssureC2 && t.target_id == token.target_id)
                .map(|t| t.defense.unwrap_or(config.default_assure_defense));
            let defense = defenses
                .get(&token.target_id)
                .copied()
                .unwrap_or(config.default_target_defense);
            let result = resolve_disrupt_c2(roller, config.disrupt_c2_die, defense, assure);
            tracing::debug!(
                token = token.id,
                target = %token.target_id,
                roll = result.roll,
                success = result.success,
                "disrupt C2 adjudicated"
            );
            out.push(TokenDisruption {
                token_id: token.id,
                side: token.side,
                target_id: token.target_id.clone(),
                result,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRoller;

    #[test]
    fn test_assure_gates_before_target_defense() {
        let mut roller = ScriptedRoller::new(vec![5]);
        let r = resolve_disrupt_c2(&mut roller, DieRank::D8, 4, Some(6));
        assert!(r.blocked_by_assure);
        assert!(!r.success);

        let mut roller = ScriptedRoller::new(vec![7]);
        let r = resolve_disrupt_c2(&mut roller, DieRank::D8, 8, Some(6));
        assert!(r.penetrated_assure);
        assert!(!r.success, "assure beaten but target resisted");

        let mut roller = ScriptedRoller::new(vec![6]);
        assert!(resolve_disrupt_c2(&mut roller, DieRank::D8, 6, None).success);
    }

    #[test]
    fn test_sigint_neutralized_by_cm() {
        assert_eq!(resolve_sigint_emso(false).strike_promotion, 1);
        assert!(resolve_sigint_emso(true).neutralized);
        assert_eq!(resolve_sigint_emso(true).detection_promotion, 0);
    }

    #[test]
    fn test_countermeasure_modes() {
        assert!(resolve_countermeasures(true, AttackKind::Strike).absorbs_first_hit);
        assert_eq!(resolve_countermeasures(true, AttackKind::Detection).demotion, 1);
        assert!(!resolve_countermeasures(false, AttackKind::Combat).active);
    }

    #[test]
    fn test_io_shift_net() {
        let sig = place_token(1, IoTokenKind::SigintEmso, Side::Blue, "ship");
        let cm = place_token(2, IoTokenKind::PassiveCountermeasures, Side::Red, "ship");
        assert_eq!(io_shift("ship", &[sig.clone()]), 1);
        assert_eq!(io_shift("ship", &[sig, cm.clone()]), 0);
        assert_eq!(io_shift("ship", &[cm]), -1);
        assert_eq!(io_shift("other", &[]), 0);
    }

    #[test]
    fn test_cm_absorbs_first_hit_once() {
        let tokens = vec![place_token(1, IoTokenKind::ActiveCountermeasures, Side::Red, "sam")];
        let first = absorb_strike_hit("sam", 2, &tokens);
        assert_eq!(first.hits, 1);
        assert!(first.absorbed);
        assert!(first.tokens.is_empty());
        let second = absorb_strike_hit("sam", 2, &first.tokens);
        assert_eq!(second.hits, 2);
        assert!(!second.absorbed);
    }

    #[test]
    fn test_zero_hits_keep_cm() {
        let tokens = vec![place_token(1, IoTokenKind::ActiveCountermeasures, Side::Red, "sam")];
        let r = absorb_strike_hit("sam", 0, &tokens);
        assert_eq!(r.tokens.len(), 1);
    }

    #[test]
    fn test_reset_keeps_defensive_tokens() {
        let tokens = vec![
            place_token(1, IoTokenKind::DisruptC2, Side::Blue, "hq"),
            place_token(2, IoTokenKind::AssureC2, Side::Red, "hq"),
            place_token(3, IoTokenKind::SigintEmso, Side::Blue, "ship"),
            place_token(4, IoTokenKind::ActiveCountermeasures, Side::Red, "ship"),
        ];
        let reset = reset_io_tokens(&tokens);
        let kept: Vec<u32> = reset.remaining.iter().map(|t| t.id).collect();
        let gone: Vec<u32> = reset.removed.iter().map(|t| t.id).collect();
        assert_eq!(kept, vec![2, 4]);
        assert_eq!(gone, vec![1, 3]);
    }

    #[test]
    fn test_disrupt_effects_by_target() {
        assert!(!disrupt_effect(IoTargetKind::Hq, true).can_generate_io);
        assert!(!disrupt_effect(IoTargetKind::Sam, true).can_fire);
        assert_eq!(disrupt_effect(IoTargetKind::AirMission, true).attack_die_demotion, 1);
        assert!(disrupt_effect(IoTargetKind::SpaceIsr, true).space_function_demoted);
        assert!(!disrupt_effect(IoTargetKind::Ship, false).disrupted);
    }

    #[test]
    fn test_unit_io_status() {
        let tokens = vec![
            place_token(1, IoTokenKind::DisruptC2, Side::Red, "hq"),
            place_token(2, IoTokenKind::PassiveCountermeasures, Side::Blue, "hq"),
            place_token(3, IoTokenKind::SigintEmso, Side::Red, "arty"),
        ];
        let s = unit_io_status("hq", &tokens);
        assert!(s.disrupted && s.countermeasures && !s.sigint_emso);
        assert_eq!(s.token_ids, vec![1, 2]);
    }

    #[test]
    fn test_adjudicate_red_first_with_assure() {
        let config = RulesConfig::default();
        let blue = vec![
            place_token(1, IoTokenKind::DisruptC2, Side::Blue, "red-hq"),
            IoToken {
                defense: Some(7),
                ..place_token(2, IoTokenKind::AssureC2, Side::Blue, "blue-hq")
            },
        ];
        let red = vec![place_token(3, IoTokenKind::DisruptC2, Side::Red, "blue-hq")];
        let mut roller = ScriptedRoller::new(vec![6, 8]);
        let out = adjudicate_io_tokens(&mut roller, &blue, &red, &HashMap::new(), &config);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].token_id, 3);
        assert!(out[0].result.blocked_by_assure, "6 < assure 7");
        assert_eq!(out[1].token_id, 1);
        assert!(out[1].result.success);
    }

    #[test]
    fn test_disrupt_dashboard_applies_transition() {
        let config = RulesConfig::default();
        let d = SpaceDashboard::default();
        let mut roller = ScriptedRoller::new(vec![8]);
        let (r, next) = disrupt_dashboard(
            &mut roller,
            &d,
            SpaceTrack::C2,
            IsrDisruptionTarget::None,
            6,
            &config,
        );
        assert!(r.success);
        assert_eq!(next.available_strike_actions(), 2);

        let assured = space::apply_assure(&d, SpaceTrack::Isr);
        let mut roller = ScriptedRoller::new(vec![5]);
        let (r, next) = disrupt_dashboard(
            &mut roller,
            &assured,
            SpaceTrack::Isr,
            IsrDisruptionTarget::Pawns,
            4,
            &config,
        );
        assert!(r.blocked_by_assure);
        assert_eq!(next, assured);
    }
}
