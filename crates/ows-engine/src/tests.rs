//! Session-level tests: determinism, journaling, and the interplay of the
//! dashboard, IO tokens and strikes across turns.

use ows_core::commands::AdjudicationRequest;
use ows_core::components::*;
use ows_core::config::RulesConfig;
use ows_core::enums::*;
use ows_core::events::AdjudicationEvent;
use ows_core::{DieRank, RulesError};

use crate::rng::ScriptedRoller;
use crate::session::{AdjudicationSession, SessionConfig};

fn scripted(script: Vec<u32>) -> AdjudicationSession<ScriptedRoller> {
    AdjudicationSession::with_roller(ScriptedRoller::new(script), RulesConfig::default())
}

fn striker(id: &str) -> Aircraft {
    Aircraft::new(id, Platform::Bomber)
        .with_role(MissionRole::Strike)
        .with_organic_strike(DieRank::D8)
}

fn strike(aircraft: Aircraft, target: Option<&str>, distance: u32) -> AdjudicationRequest {
    AdjudicationRequest::Strike {
        aircraft,
        shields: ShieldPair::red_only(4),
        target_id: target.map(str::to_string),
        distance,
        sead_support: false,
        ew_support: false,
    }
}

fn disrupt(track: SpaceTrack) -> AdjudicationRequest {
    AdjudicationRequest::DisruptDashboard {
        track,
        isr_target: IsrDisruptionTarget::None,
        target_defense: None,
    }
}

fn place(kind: IoTokenKind, side: Side, target: &str) -> AdjudicationRequest {
    AdjudicationRequest::PlaceIoToken {
        kind,
        side,
        target_id: target.to_string(),
    }
}

fn mixed_scenario() -> Vec<AdjudicationRequest> {
    let mut requests = vec![
        AdjudicationRequest::Initiative,
        AdjudicationRequest::Salvo {
            dice: vec![DieRank::D10; 6],
            shields: ShieldPair::new(5, 4),
        },
        AdjudicationRequest::Detect {
            mode: DetectionMode::Cooperative {
                sensors: vec![DieRank::D8, DieRank::D10, DieRank::D6],
            },
            target: Contact::new("bandit", 9),
            io_shift: 0,
        },
        disrupt(SpaceTrack::C2),
        AdjudicationRequest::GroundCombat {
            attackers: vec![Unit::new("a1", Side::Blue, UnitKind::Armor, 4)],
            defenders: vec![Unit::new("d1", Side::Red, UnitKind::Infantry, 3)],
            environment: GroundEnvironment::new(TerrainType::Rough),
        },
    ];
    requests.extend((0..20).map(|_| AdjudicationRequest::Attack {
        die: DieRank::D20,
        shields: ShieldPair::red_only(7),
    }));
    requests
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut a = AdjudicationSession::new(SessionConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut b = AdjudicationSession::new(SessionConfig {
        seed: 12345,
        ..Default::default()
    });
    a.process_all(mixed_scenario()).unwrap();
    b.process_all(mixed_scenario()).unwrap();
    assert_eq!(
        a.journal_json().unwrap(),
        b.journal_json().unwrap(),
        "Journals diverged with same seed"
    );
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = AdjudicationSession::new(SessionConfig {
        seed: 111,
        ..Default::default()
    });
    let mut b = AdjudicationSession::new(SessionConfig {
        seed: 222,
        ..Default::default()
    });
    a.process_all(mixed_scenario()).unwrap();
    b.process_all(mixed_scenario()).unwrap();
    assert_ne!(
        a.journal_json().unwrap(),
        b.journal_json().unwrap(),
        "Different seeds should produce divergent journals"
    );
}

// ---- Journal ----

#[test]
fn test_journal_sequence_and_turn_stamps() {
    let mut session = scripted(vec![4]);
    session
        .process(AdjudicationRequest::Attack {
            die: DieRank::D6,
            shields: ShieldPair::red_only(4),
        })
        .unwrap();
    let ended = session.process(AdjudicationRequest::EndTurn).unwrap();
    let next = session.process(AdjudicationRequest::Initiative).unwrap();

    assert_eq!(ended.seq, 2);
    assert_eq!(ended.turn, 1, "turn end is stamped with the turn that ended");
    assert_eq!(next.turn, 2);
    assert_eq!(session.journal().len(), 3);
    assert_eq!(session.turn(), 2);
}

#[test]
fn test_errors_are_not_journaled() {
    let mut session = scripted(vec![5]);
    let bare = Aircraft::new("f9", Platform::Fighter).with_role(MissionRole::Strike);
    match session.process(strike(bare, None, 0)) {
        Err(RulesError::UnarmedAircraft { offenders }) => assert_eq!(offenders, vec!["f9"]),
        other => panic!("expected UnarmedAircraft, got {other:?}"),
    }
    assert!(session.journal().is_empty());
}

#[test]
fn test_scenario_json_round_trip() {
    let json = r#"[
        {"type": "Attack", "die": "d10", "shields": {"grey": 5, "red": 4}},
        {"type": "DisruptDashboard", "track": "c2"},
        {"type": "PlaceIoToken", "kind": "sigint_emso", "side": "blue", "target_id": "ship"},
        {"type": "EndTurn"}
    ]"#;
    let requests = ows_core::commands::parse_requests(json).unwrap();
    assert_eq!(requests.len(), 4);

    let mut session = scripted(vec![9]);
    session.process_all(requests).unwrap();
    let first = &session.journal()[0].event;
    assert_eq!(
        *first,
        AdjudicationEvent::Attack {
            die: DieRank::D10,
            roll: 9,
            hits: 2,
            grey_defeated: true,
        }
    );
}

// ---- Shielded combat ----

#[test]
fn test_grey_blocks_low_roll() {
    let mut session = scripted(vec![4]);
    let record = session
        .process(AdjudicationRequest::Attack {
            die: DieRank::D10,
            shields: ShieldPair::new(5, 4),
        })
        .unwrap();
    match record.event {
        AdjudicationEvent::Attack {
            hits,
            grey_defeated,
            ..
        } => {
            assert_eq!(hits, 0);
            assert!(!grey_defeated);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

// ---- Space dashboard ----

#[test]
fn test_c2_disruption_gates_long_range_strikes() {
    let mut session = scripted(vec![8]);
    session.process(disrupt(SpaceTrack::C2)).unwrap();
    session.process(disrupt(SpaceTrack::C2)).unwrap();
    assert_eq!(session.strike_actions_left(), 1);

    let record = session.process(strike(striker("b1"), None, 2)).unwrap();
    match record.event {
        AdjudicationEvent::Strike {
            long_range,
            strike_actions_left,
            ..
        } => {
            assert!(long_range);
            assert_eq!(strike_actions_left, 0);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        session.process(strike(striker("b2"), None, 2)),
        Err(RulesError::Validation(_))
    ));

    // Adjacent strikes need no C2 action.
    assert!(session.process(strike(striker("b3"), None, 1)).is_ok());
}

#[test]
fn test_pnt_disruption_demotes_long_range_die() {
    let mut session = scripted(vec![8]);
    session.process(disrupt(SpaceTrack::Pnt)).unwrap();

    let near = session.process(strike(striker("b1"), None, 1)).unwrap();
    let far = session.process(strike(striker("b2"), None, 3)).unwrap();
    let die_of = |event: &AdjudicationEvent| match event {
        AdjudicationEvent::Strike { die, .. } => *die,
        other => panic!("unexpected event {other:?}"),
    };
    assert_eq!(die_of(&near.event), DieRank::D8);
    assert_eq!(die_of(&far.event), DieRank::D6);
}

#[test]
fn test_assured_track_blocks_low_disruption() {
    let mut session = scripted(vec![5]);
    session
        .process(AdjudicationRequest::Assure {
            track: SpaceTrack::C2,
        })
        .unwrap();
    let record = session.process(disrupt(SpaceTrack::C2)).unwrap();
    match record.event {
        AdjudicationEvent::SpaceDisruption {
            success,
            blocked_by_assure,
            strike_actions,
            ..
        } => {
            assert!(!success);
            assert!(blocked_by_assure);
            assert_eq!(strike_actions, 3);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_end_turn_policies() {
    let mut persist = scripted(vec![8]);
    persist.process(disrupt(SpaceTrack::C2)).unwrap();
    persist.process(strike(striker("b1"), None, 2)).unwrap();
    assert_eq!(persist.strike_actions_left(), 1);
    persist.process(AdjudicationRequest::EndTurn).unwrap();
    assert_eq!(persist.strike_actions_left(), 2, "disruption persists, actions refresh");

    let rules = RulesConfig {
        disruption_policy: DisruptionPolicy::ClearAtEndOfTurn,
        ..Default::default()
    };
    let mut clearing = AdjudicationSession::with_roller(ScriptedRoller::new(vec![8]), rules);
    clearing.process(disrupt(SpaceTrack::C2)).unwrap();
    clearing.process(disrupt(SpaceTrack::Pnt)).unwrap();
    clearing.process(AdjudicationRequest::EndTurn).unwrap();
    assert_eq!(clearing.strike_actions_left(), 3);
    assert!(!clearing.dashboard().pnt_disrupted());
}

#[test]
fn test_end_turn_clears_suppression() {
    let mut session = scripted(vec![1]);
    let mut unit = Unit::new("u1", Side::Blue, UnitKind::Infantry, 2);
    unit.suppression_level = 2;
    let units = session.end_turn(&[unit]);
    assert_eq!(units[0].suppression_level, 0);
    assert_eq!(session.turn(), 2);
}

// ---- IO / cyber ----

#[test]
fn test_sigint_promotes_detection_against_target() {
    let mut session = scripted(vec![9]);
    session
        .process(place(IoTokenKind::SigintEmso, Side::Blue, "ship"))
        .unwrap();
    let record = session
        .process(AdjudicationRequest::Detect {
            mode: DetectionMode::Local {
                sensor: DieRank::D8,
                kind: SensorKind::ShipRadar,
            },
            target: Contact::new("ship", 9),
            io_shift: 0,
        })
        .unwrap();
    match record.event {
        AdjudicationEvent::Detection { die, detected, .. } => {
            assert_eq!(die, Some(DieRank::D10));
            assert!(detected);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_detect_unit_uses_unit_signature() {
    let mut session = scripted(vec![7, 9]);
    let mut brigade = Unit::new("bde", Side::Red, UnitKind::Armor, 4);
    brigade.signature = 8;
    let mode = DetectionMode::Local {
        sensor: DieRank::D10,
        kind: SensorKind::ShipRadar,
    };

    let miss = session.detect_unit(mode.clone(), &brigade).unwrap();
    let hit = session.detect_unit(mode, &brigade).unwrap();
    for (record, expected) in [(miss, false), (hit, true)] {
        match record.event {
            AdjudicationEvent::Detection { target_id, signature, detected, .. } => {
                assert_eq!(target_id, "bde");
                assert_eq!(signature, 8);
                assert_eq!(detected, expected);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[test]
fn test_countermeasure_absorbs_first_strike_hit_once() {
    let mut session = scripted(vec![8]);
    session
        .process(place(IoTokenKind::ActiveCountermeasures, Side::Red, "sam"))
        .unwrap();

    let hits_of = |event: &AdjudicationEvent| match event {
        AdjudicationEvent::Strike { hits, absorbed, .. } => (*hits, *absorbed),
        other => panic!("unexpected event {other:?}"),
    };
    let first = session.process(strike(striker("b1"), Some("sam"), 0)).unwrap();
    assert_eq!(hits_of(&first.event), (1, true));
    assert!(session.tokens().is_empty(), "token spent");

    let second = session.process(strike(striker("b2"), Some("sam"), 0)).unwrap();
    assert_eq!(hits_of(&second.event), (2, false));
}

#[test]
fn test_countermeasure_neutralizing_sigint_does_not_absorb() {
    let mut session = scripted(vec![8]);
    session
        .process(place(IoTokenKind::SigintEmso, Side::Blue, "sam"))
        .unwrap();
    session
        .process(place(IoTokenKind::ActiveCountermeasures, Side::Red, "sam"))
        .unwrap();

    let record = session.process(strike(striker("b1"), Some("sam"), 0)).unwrap();
    let AdjudicationEvent::Strike { die, hits, absorbed, .. } = record.event else {
        panic!("expected Strike");
    };
    assert_eq!(die, DieRank::D8, "promotion neutralized");
    assert_eq!(hits, 2);
    assert!(!absorbed);
    assert_eq!(session.tokens().len(), 2, "countermeasure not spent");
}

#[test]
fn test_io_adjudication_and_token_reset() {
    // Red's token is rolled first (5, blocked by assure 6), then blue's (8).
    let mut session = scripted(vec![5, 8]);
    session
        .process(place(IoTokenKind::DisruptC2, Side::Blue, "red-hq"))
        .unwrap();
    session
        .process(place(IoTokenKind::AssureC2, Side::Blue, "blue-hq"))
        .unwrap();
    session
        .process(place(IoTokenKind::DisruptC2, Side::Red, "blue-hq"))
        .unwrap();

    let record = session
        .process(AdjudicationRequest::AdjudicateIo {
            defenses: Default::default(),
        })
        .unwrap();
    let AdjudicationEvent::IoAdjudicated { disruptions } = record.event else {
        panic!("expected IoAdjudicated");
    };
    assert_eq!(disruptions.len(), 2);
    assert_eq!(disruptions[0].side, Side::Red);
    assert!(disruptions[0].blocked_by_assure);
    assert!(disruptions[1].success);

    // The failed token is gone, the successful one is revealed.
    let ids: Vec<u32> = session.tokens().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(session.tokens()[0].revealed);

    // Revealed tokens are not rolled again.
    let again = session
        .process(AdjudicationRequest::AdjudicateIo {
            defenses: Default::default(),
        })
        .unwrap();
    assert_eq!(
        again.event,
        AdjudicationEvent::IoAdjudicated {
            disruptions: vec![]
        }
    );

    session.process(AdjudicationRequest::EndTurn).unwrap();
    let kinds: Vec<IoTokenKind> = session.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![IoTokenKind::AssureC2]);
}

#[test]
fn test_disrupted_air_mission_strikes_with_demoted_die() {
    let mut session = scripted(vec![8]);
    session
        .process(place(IoTokenKind::DisruptC2, Side::Red, "b1"))
        .unwrap();
    session
        .process(AdjudicationRequest::AdjudicateIo {
            defenses: Default::default(),
        })
        .unwrap();
    let record = session.process(strike(striker("b1"), None, 0)).unwrap();
    match record.event {
        AdjudicationEvent::Strike { die, .. } => assert_eq!(die, DieRank::D6),
        other => panic!("unexpected event {other:?}"),
    }
}

// ---- Air ----

#[test]
fn test_air_battle_escort_priority() {
    let mut session = AdjudicationSession::new(SessionConfig::default());
    let defenders: Vec<Fighter> = (0..3).map(|i| Fighter::new(format!("d{i}"))).collect();
    let escorts: Vec<Fighter> = (0..5).map(|i| Fighter::new(format!("e{i}"))).collect();
    let strikers: Vec<Fighter> = (0..2)
        .map(|i| Fighter::new(format!("s{i}")).as_platform(Platform::Bomber))
        .collect();
    let record = session
        .process(AdjudicationRequest::AirBattle {
            defenders,
            escorts,
            strike: strikers,
        })
        .unwrap();
    match record.event {
        AdjudicationEvent::AirBattle {
            escort_matches,
            hvu_matches,
            unengaged_attackers,
            unengaged_defenders,
            ..
        } => {
            assert_eq!(escort_matches, 3);
            assert_eq!(hvu_matches, 0);
            assert_eq!(unengaged_attackers, vec!["e3", "e4", "s0", "s1"]);
            assert!(unengaged_defenders.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

// ---- Ground ----

#[test]
fn test_ground_combat_column_shift_journaled() {
    let mut session = scripted(vec![5]);
    let mut env = GroundEnvironment::new(TerrainType::Open);
    env.fortified = true;
    let record = session
        .process(AdjudicationRequest::GroundCombat {
            attackers: vec![Unit::new("a1", Side::Blue, UnitKind::Infantry, 6)
                .with_organization(Organization::MainEffort)],
            defenders: vec![Unit::new("d1", Side::Red, UnitKind::Infantry, 2)],
            environment: env,
        })
        .unwrap();
    match record.event {
        AdjudicationEvent::GroundCombat {
            force_ratio,
            total_shift,
            casualty_roll,
            ..
        } => {
            assert_eq!(force_ratio, ForceRatio::ThreeToOne);
            assert_eq!(total_shift, 0);
            assert_eq!(casualty_roll, 5);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_supply_trace_journaled() {
    let mut session = scripted(vec![1]);
    let record = session
        .process(AdjudicationRequest::TraceSupply {
            unit: Unit::new("u", Side::Blue, UnitKind::Infantry, 2)
                .at(ows_core::types::HexCoord::new(5, 0)),
            source: Unit::new("css", Side::Blue, UnitKind::Infantry, 1)
                .at(ows_core::types::HexCoord::new(0, 0)),
            opposing: vec![],
        })
        .unwrap();
    match record.event {
        AdjudicationEvent::Supply {
            level, distance, ..
        } => {
            assert_eq!(level, SupplyLevel::Extended);
            assert_eq!(distance, 5);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

// ---- Bundled scenario ----

#[test]
fn test_bundled_scenario_replays() {
    let json = include_str!("../../../scenarios/opening_turn.json");
    let requests = ows_core::commands::parse_requests(json).unwrap();
    let count = requests.len();

    let mut session = AdjudicationSession::new(SessionConfig::default());
    session.process_all(requests).unwrap();
    assert_eq!(session.journal().len(), count);
    assert_eq!(session.turn(), 2);
}
