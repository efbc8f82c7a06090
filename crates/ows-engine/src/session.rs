//! Adjudication session: the one stateful object in the engine.
//!
//! `AdjudicationSession` owns the dice roller, the rules, the current space
//! dashboard, the placed IO tokens and a journal. Every request is resolved
//! through the stateless resolvers; state is replaced by successor values
//! and each result is appended to the journal. Same seed and same requests
//! produce the same journal.

use std::collections::HashMap;

use ows_core::commands::AdjudicationRequest;
use ows_core::components::{Aircraft, DetectionMode, IoToken, ShieldPair, Unit};
use ows_core::config::RulesConfig;
use ows_core::constants::PNT_LONG_RANGE_HEXES;
use ows_core::enums::{AttackKind, IoTargetKind, IoTokenKind, Side};
use ows_core::events::{AdjudicationEvent, AdjudicationRecord, IoDisruption};
use ows_core::state::SpaceDashboard;
use ows_core::{Result, RulesError};

use crate::combat::{resolve_attack, resolve_layered_salvo, resolve_salvo};
use crate::detection::resolve_detection;
use crate::fighter::{best_die_sequence, resolve_in_hex_fighter_battle};
use crate::ground::{clear_suppression, resolve_fire_effects, resolve_ground_combat};
use crate::io_cyber;
use crate::rng::{DiceRoller, SeededRoller};
use crate::space;
use crate::strike;
use crate::supply::trace_supply;

/// Configuration for starting a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed. Same seed = same journal.
    pub seed: u64,
    pub rules: RulesConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: RulesConfig::default(),
        }
    }
}

pub struct AdjudicationSession<R: DiceRoller = SeededRoller> {
    roller: R,
    rules: RulesConfig,
    dashboard: SpaceDashboard,
    tokens: Vec<IoToken>,
    next_token_id: u32,
    turn: u32,
    strike_actions_used: u32,
    journal: Vec<AdjudicationRecord>,
}

impl AdjudicationSession<SeededRoller> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_roller(SeededRoller::new(config.seed), config.rules)
    }
}

impl<R: DiceRoller> AdjudicationSession<R> {
    /// Session over any roller, e.g. a `ScriptedRoller` in tests.
    pub fn with_roller(roller: R, rules: RulesConfig) -> Self {
        let dashboard = SpaceDashboard::from_scenario(&rules.space);
        Self {
            roller,
            rules,
            dashboard,
            tokens: Vec::new(),
            next_token_id: 1,
            turn: 1,
            strike_actions_used: 0,
            journal: Vec::new(),
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn dashboard(&self) -> &SpaceDashboard {
        &self.dashboard
    }

    pub fn tokens(&self) -> &[IoToken] {
        &self.tokens
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Long-range strike actions still available this turn.
    pub fn strike_actions_left(&self) -> u32 {
        self.dashboard
            .available_strike_actions()
            .saturating_sub(self.strike_actions_used)
    }

    pub fn journal(&self) -> &[AdjudicationRecord] {
        &self.journal
    }

    pub fn journal_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.journal)?)
    }

    /// Resolve a batch of requests in order, stopping at the first error.
    pub fn process_all(
        &mut self,
        requests: impl IntoIterator<Item = AdjudicationRequest>,
    ) -> Result<()> {
        for request in requests {
            self.process(request)?;
        }
        Ok(())
    }

    /// Detection attempt against a scenario unit, using its signature record.
    pub fn detect_unit(&mut self, mode: DetectionMode, unit: &Unit) -> Result<AdjudicationRecord> {
        self.process(AdjudicationRequest::Detect {
            mode,
            target: unit.as_contact(),
            io_shift: 0,
        })
    }

    /// Resolve one request and journal it.
    pub fn process(&mut self, request: AdjudicationRequest) -> Result<AdjudicationRecord> {
        let event = match request {
            AdjudicationRequest::Attack { die, shields } => {
                let a = resolve_attack(&mut self.roller, die, &shields);
                AdjudicationEvent::Attack {
                    die: a.die,
                    roll: a.roll,
                    hits: a.hits,
                    grey_defeated: a.grey_defeated,
                }
            }
            AdjudicationRequest::Salvo { dice, shields } => {
                let s = resolve_salvo(&mut self.roller, &dice, &shields);
                AdjudicationEvent::Salvo {
                    rolls: s.rolls(),
                    total_hits: s.total_hits,
                    grey_layers_spent: s.grey_layers_spent,
                }
            }
            AdjudicationRequest::LayeredSalvo {
                dice,
                grey_layers,
                shields,
            } => {
                let s = resolve_layered_salvo(&mut self.roller, &dice, grey_layers, &shields);
                AdjudicationEvent::Salvo {
                    rolls: s.rolls(),
                    total_hits: s.total_hits,
                    grey_layers_spent: s.grey_layers_spent,
                }
            }
            AdjudicationRequest::Detect {
                mode,
                target,
                io_shift,
            } => {
                let shift = io_shift + io_cyber::io_shift(&target.id, &self.tokens);
                let r = resolve_detection(
                    &mut self.roller,
                    &mode,
                    &target,
                    &self.dashboard,
                    self.rules.stealth_detection_cap,
                    shift,
                )?;
                AdjudicationEvent::Detection {
                    target_id: target.id,
                    die: r.die,
                    roll: r.roll,
                    signature: r.signature,
                    detected: r.detected,
                }
            }
            AdjudicationRequest::AirBattle {
                defenders,
                escorts,
                strike,
            } => {
                let b = resolve_in_hex_fighter_battle(&mut self.roller, &defenders, &escorts, &strike);
                AdjudicationEvent::AirBattle {
                    escort_matches: b.escort_exchanges.len() as u32,
                    hvu_matches: b.hvu_exchanges.len() as u32,
                    attacker_hits: b.attacker_hits,
                    defender_hits: b.defender_hits,
                    unengaged_attackers: b.unengaged_attackers,
                    unengaged_defenders: b.unengaged_defenders,
                }
            }
            AdjudicationRequest::Initiative => {
                let i = best_die_sequence(&mut self.roller, self.rules.initiative_die);
                AdjudicationEvent::Initiative {
                    blue_roll: i.blue_roll,
                    red_roll: i.red_roll,
                    initiative: i.initiative,
                }
            }
            AdjudicationRequest::GroundCombat {
                attackers,
                defenders,
                environment,
            } => {
                let g = resolve_ground_combat(&mut self.roller, &attackers, &defenders, &environment)?;
                AdjudicationEvent::GroundCombat {
                    force_ratio: g.force_ratio,
                    total_shift: g.shift.total(),
                    casualty_roll: g.roll,
                    tier: g.tier,
                    attacker_losses: g.attacker_losses,
                    defender_losses: g.defender_losses,
                }
            }
            AdjudicationRequest::FireEffects { unit, hits } => {
                let f = resolve_fire_effects(&unit, hits)?;
                AdjudicationEvent::FireEffects {
                    unit_id: unit.id,
                    effect: f.effect,
                    step_losses: f.step_losses,
                    suppression: f.suppression,
                    destroyed: f.unit.is_destroyed(),
                }
            }
            AdjudicationRequest::TraceSupply {
                unit,
                source,
                opposing,
            } => {
                let t = trace_supply(&unit, &source, &opposing, &self.rules)?;
                AdjudicationEvent::Supply {
                    unit_id: t.unit_id,
                    level: t.status.level,
                    column_modifier: t.status.column_modifier,
                    movement_penalty: t.status.movement_penalty,
                    distance: t.distance.unwrap_or_default(),
                }
            }
            AdjudicationRequest::DisruptDashboard {
                track,
                isr_target,
                target_defense,
            } => {
                let defense = target_defense.unwrap_or(self.rules.default_target_defense);
                let (r, next) = io_cyber::disrupt_dashboard(
                    &mut self.roller,
                    &self.dashboard,
                    track,
                    isr_target,
                    defense,
                    &self.rules,
                );
                self.dashboard = next;
                AdjudicationEvent::SpaceDisruption {
                    track,
                    roll: r.roll,
                    success: r.success,
                    blocked_by_assure: r.blocked_by_assure,
                    strike_actions: self.strike_actions_left(),
                }
            }
            AdjudicationRequest::Assure { track } => {
                self.dashboard = space::apply_assure(&self.dashboard, track);
                AdjudicationEvent::Assured { track }
            }
            AdjudicationRequest::PlaceIoToken {
                kind,
                side,
                target_id,
            } => {
                let token = self.place_token(kind, side, target_id);
                AdjudicationEvent::IoTokenPlaced {
                    token_id: token.id,
                    kind: token.kind,
                    side: token.side,
                    target_id: token.target_id,
                }
            }
            AdjudicationRequest::AdjudicateIo { defenses } => {
                let disruptions = self.adjudicate_io(&defenses);
                AdjudicationEvent::IoAdjudicated { disruptions }
            }
            AdjudicationRequest::Strike {
                aircraft,
                shields,
                target_id,
                distance,
                sead_support,
                ew_support,
            } => self.strike(
                &aircraft,
                &shields,
                target_id.as_deref(),
                distance,
                sead_support,
                ew_support,
            )?,
            AdjudicationRequest::Sead {
                aircraft,
                sam_defense,
                ew_support,
            } => {
                let s = strike::resolve_sead(&mut self.roller, &aircraft, sam_defense, ew_support);
                AdjudicationEvent::Sead {
                    aircraft_id: aircraft.id,
                    die: s.die,
                    roll: s.roll,
                    hits: s.hits,
                    suppressed: s.suppressed,
                    destroyed: s.destroyed,
                }
            }
            AdjudicationRequest::EndTurn => return Ok(self.finish_turn()),
        };
        Ok(self.record(event))
    }

    /// Turn boundary with units on the map: clears their suppression and
    /// returns the successors. Journals a `TurnEnded` record.
    pub fn end_turn(&mut self, units: &[Unit]) -> Vec<Unit> {
        self.finish_turn();
        clear_suppression(units)
    }

    /// Journal the ending turn, then reset the dashboard and IO tokens and
    /// advance.
    fn finish_turn(&mut self) -> AdjudicationRecord {
        let record = self.record(AdjudicationEvent::TurnEnded {
            turn: self.turn,
            policy: self.rules.disruption_policy,
        });
        self.dashboard = space::reset_for_new_turn(&self.dashboard, self.rules.disruption_policy);
        let reset = io_cyber::reset_io_tokens(&self.tokens);
        self.tokens = reset.remaining;
        self.strike_actions_used = 0;
        self.turn += 1;
        tracing::debug!(
            turn = self.turn,
            discarded_tokens = reset.removed.len(),
            "turn advanced"
        );
        record
    }

    fn place_token(&mut self, kind: IoTokenKind, side: Side, target_id: String) -> IoToken {
        let token = io_cyber::place_token(self.next_token_id, kind, side, target_id);
        self.next_token_id += 1;
        self.tokens.push(token.clone());
        token
    }

    /// Roll face-down Disrupt C2 tokens. Successful ones are revealed and
    /// stay on their target until the turn ends; failed ones are removed.
    fn adjudicate_io(&mut self, defenses: &HashMap<String, u32>) -> Vec<IoDisruption> {
        let (blue, red): (Vec<IoToken>, Vec<IoToken>) =
            self.tokens.iter().cloned().partition(|t| t.side == Side::Blue);
        let results =
            io_cyber::adjudicate_io_tokens(&mut self.roller, &blue, &red, defenses, &self.rules);

        let mut next = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            match results.iter().find(|r| r.token_id == token.id) {
                Some(r) if r.result.success => next.push(io_cyber::reveal_token(token)),
                Some(_) => {}
                None => next.push(token.clone()),
            }
        }
        self.tokens = next;

        results
            .into_iter()
            .map(|r| IoDisruption {
                token_id: r.token_id,
                side: r.side,
                target_id: r.target_id,
                roll: r.result.roll,
                success: r.result.success,
                blocked_by_assure: r.result.blocked_by_assure,
            })
            .collect()
    }

    /// Strike with C2 gating and PNT degradation beyond one hex, SIGINT
    /// against the target, disruption of the striking mission and
    /// countermeasure absorption of the first hit.
    fn strike(
        &mut self,
        aircraft: &Aircraft,
        shields: &ShieldPair,
        target_id: Option<&str>,
        distance: u32,
        sead_support: bool,
        ew_support: bool,
    ) -> Result<AdjudicationEvent> {
        strike::validate_package(std::slice::from_ref(aircraft), &[], &[])?;
        let reach = strike::can_reach_target(aircraft, distance);
        if !reach.can_reach {
            return Err(RulesError::Validation(format!(
                "{} cannot reach {} hexes (max {})",
                aircraft.id, distance, reach.max_range
            )));
        }

        let long_range = distance > PNT_LONG_RANGE_HEXES;
        let mut die = strike::strike_die(aircraft);
        if long_range {
            let allocation = strike::allocate_long_range(&self.dashboard, self.strike_actions_used)?;
            self.strike_actions_used = allocation.used;
            die = space::pnt_adjusted_die(&self.dashboard, die, distance);
        }

        let mission = io_cyber::unit_io_status(&aircraft.id, &self.tokens);
        let effect = io_cyber::disrupt_effect(IoTargetKind::AirMission, mission.disrupted);
        die = die.demote(effect.attack_die_demotion);

        let target = target_id.map(|id| (id, io_cyber::unit_io_status(id, &self.tokens)));
        if let Some((_, status)) = &target {
            if status.sigint_emso {
                die = die.promote(io_cyber::resolve_sigint_emso(status.countermeasures).strike_promotion);
            }
        }

        let attack = strike::resolve_strike(&mut self.roller, die, shields, sead_support, ew_support);
        let mut hits = attack.hits;
        let mut absorbed = false;
        if let Some((id, status)) = target {
            // A countermeasure busy neutralizing SIGINT is not spent on the hit.
            let free_cm = status.countermeasures && !status.sigint_emso;
            let cm = io_cyber::resolve_countermeasures(free_cm, AttackKind::Strike);
            if cm.absorbs_first_hit {
                let spent = io_cyber::absorb_strike_hit(id, hits, &self.tokens);
                hits = spent.hits;
                absorbed = spent.absorbed;
                self.tokens = spent.tokens;
            }
        }

        Ok(AdjudicationEvent::Strike {
            aircraft_id: aircraft.id.clone(),
            die: attack.die,
            roll: attack.roll,
            hits,
            absorbed,
            long_range,
            strike_actions_left: self.strike_actions_left(),
        })
    }

    fn record(&mut self, event: AdjudicationEvent) -> AdjudicationRecord {
        let record = AdjudicationRecord {
            seq: self.journal.len() as u32 + 1,
            turn: self.turn,
            event,
        };
        tracing::debug!(seq = record.seq, turn = record.turn, event = ?record.event, "adjudicated");
        self.journal.push(record.clone());
        record
    }
}
