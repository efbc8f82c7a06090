//! Dashboard transitions. Each takes the current dashboard and returns its
//! successor; the input is never touched.

use ows_core::constants::PNT_LONG_RANGE_HEXES;
use ows_core::enums::{DisruptionPolicy, IsrDisruptionTarget, SpaceTrack};
use ows_core::state::SpaceDashboard;
use ows_core::DieRank;

/// Add `tokens` Disrupt C2 tokens to the C2 track.
pub fn apply_disrupt_c2(dashboard: &SpaceDashboard, tokens: u32) -> SpaceDashboard {
    let mut next = dashboard.clone();
    next.c2.disruption_tokens = next.c2.disruption_tokens.saturating_add(tokens);
    tracing::debug!(
        tokens = next.c2.disruption_tokens,
        available = next.available_strike_actions(),
        "C2 disrupted"
    );
    next
}

pub fn apply_disrupt_pnt(dashboard: &SpaceDashboard) -> SpaceDashboard {
    let mut next = dashboard.clone();
    next.pnt.disruption_tokens = next.pnt.disruption_tokens.saturating_add(1);
    tracing::debug!(tokens = next.pnt.disruption_tokens, "PNT disrupted");
    next
}

/// Disrupt the ISR track. Aiming at the die demotes it one step; aiming at
/// the pawns adds a disruption token. `None` aims at the die.
pub fn apply_disrupt_isr(dashboard: &SpaceDashboard, target: IsrDisruptionTarget) -> SpaceDashboard {
    let mut next = dashboard.clone();
    match target {
        IsrDisruptionTarget::Die | IsrDisruptionTarget::None => {
            next.isr.die_demotions = next.isr.die_demotions.saturating_add(1);
            next.isr.disruption_target = IsrDisruptionTarget::Die;
        }
        IsrDisruptionTarget::Pawns => {
            next.isr.disruption_tokens = next.isr.disruption_tokens.saturating_add(1);
            next.isr.disruption_target = IsrDisruptionTarget::Pawns;
        }
    }
    tracing::debug!(
        die = %next.isr_detection_die(),
        pawns = next.available_isr_pawns(),
        "ISR disrupted"
    );
    next
}

pub fn apply_assure(dashboard: &SpaceDashboard, track: SpaceTrack) -> SpaceDashboard {
    let mut next = dashboard.clone();
    match track {
        SpaceTrack::C2 => next.c2.assured = true,
        SpaceTrack::Pnt => next.pnt.assured = true,
        SpaceTrack::Isr => next.isr.assured = true,
    }
    next
}

/// Turn boundary. Assurances always persist. Offensive disruption persists
/// or is wiped according to `policy`.
pub fn reset_for_new_turn(dashboard: &SpaceDashboard, policy: DisruptionPolicy) -> SpaceDashboard {
    let mut next = dashboard.clone();
    match policy {
        DisruptionPolicy::Persist => {}
        DisruptionPolicy::ClearAtEndOfTurn => {
            next.c2.disruption_tokens = 0;
            next.pnt.disruption_tokens = 0;
            next.isr.disruption_tokens = 0;
            next.isr.die_demotions = 0;
            next.isr.disruption_target = IsrDisruptionTarget::None;
        }
    }
    next
}

/// Strike die after PNT degradation: demoted one step beyond one hex.
pub fn pnt_adjusted_die(dashboard: &SpaceDashboard, die: DieRank, distance: u32) -> DieRank {
    if dashboard.pnt_disrupted() && distance > PNT_LONG_RANGE_HEXES {
        die.demote(1)
    } else {
        die
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ows_core::enums::TrackState;

    #[test]
    fn test_disrupt_c2_twice_leaves_one_action() {
        let d = SpaceDashboard::default();
        let d = apply_disrupt_c2(&apply_disrupt_c2(&d, 1), 1);
        assert_eq!(d.available_strike_actions(), 1);
        assert_eq!(d.track_state(SpaceTrack::C2), TrackState::Disrupted);
    }

    #[test]
    fn test_transitions_do_not_touch_input() {
        let d = SpaceDashboard::default();
        let _ = apply_disrupt_c2(&d, 3);
        let _ = apply_disrupt_isr(&d, IsrDisruptionTarget::Pawns);
        assert_eq!(d, SpaceDashboard::default());
    }

    #[test]
    fn test_isr_die_vs_pawns() {
        let d = apply_disrupt_isr(&SpaceDashboard::default(), IsrDisruptionTarget::Die);
        assert_eq!(d.isr_detection_die(), DieRank::D8);
        assert_eq!(d.available_isr_pawns(), 3);

        let d = apply_disrupt_isr(&d, IsrDisruptionTarget::Pawns);
        let d = apply_disrupt_isr(&d, IsrDisruptionTarget::Pawns);
        assert_eq!(d.available_isr_pawns(), 1);
        let d = apply_disrupt_isr(&d, IsrDisruptionTarget::Pawns);
        assert_eq!(d.available_isr_pawns(), 1, "never below one pawn");
    }

    #[test]
    fn test_reset_policies() {
        let d = apply_assure(&SpaceDashboard::default(), SpaceTrack::C2);
        let d = apply_disrupt_c2(&d, 2);
        let d = apply_disrupt_pnt(&d);
        let d = apply_disrupt_isr(&d, IsrDisruptionTarget::Die);

        let kept = reset_for_new_turn(&d, DisruptionPolicy::Persist);
        assert_eq!(kept, d);

        let cleared = reset_for_new_turn(&d, DisruptionPolicy::ClearAtEndOfTurn);
        assert_eq!(cleared.available_strike_actions(), 3);
        assert!(!cleared.pnt_disrupted());
        assert_eq!(cleared.isr_detection_die(), DieRank::D10);
        assert!(cleared.c2.assured, "assurance survives the turn");
    }

    #[test]
    fn test_pnt_demotes_long_range_only() {
        let d = apply_disrupt_pnt(&SpaceDashboard::default());
        assert_eq!(pnt_adjusted_die(&d, DieRank::D10, 1), DieRank::D10);
        assert_eq!(pnt_adjusted_die(&d, DieRank::D10, 2), DieRank::D8);
        let clean = SpaceDashboard::default();
        assert_eq!(pnt_adjusted_die(&clean, DieRank::D10, 5), DieRank::D10);
    }
}
