//! Space capability dashboard: the C2, PNT and ISR tracks carried between
//! adjudications.
//!
//! The dashboard is a value type. Transitions that produce a successor live
//! in the engine; this module holds the data and its read-only queries.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dice::DieRank;
use crate::enums::*;

/// Long-range strike allocation track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct C2Track {
    pub value: u32,
    pub max_value: u32,
    #[serde(default)]
    pub disruption_tokens: u32,
    #[serde(default)]
    pub assured: bool,
}

impl Default for C2Track {
    fn default() -> Self {
        Self {
            value: DEFAULT_C2_VALUE,
            max_value: DEFAULT_C2_MAX,
            disruption_tokens: 0,
            assured: false,
        }
    }
}

/// Navigation integrity track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PntTrack {
    #[serde(default)]
    pub disruption_tokens: u32,
    #[serde(default)]
    pub assured: bool,
}

/// Theater ISR capacity track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrTrack {
    pub base_die: DieRank,
    /// Demotions applied to `base_die` by die-targeted disruption.
    #[serde(default)]
    pub die_demotions: u32,
    pub pawn_count: u32,
    #[serde(default)]
    pub disruption_tokens: u32,
    /// Target of the most recent disruption.
    #[serde(default)]
    pub disruption_target: IsrDisruptionTarget,
    #[serde(default)]
    pub assured: bool,
}

impl Default for IsrTrack {
    fn default() -> Self {
        Self {
            base_die: DEFAULT_ISR_DIE,
            die_demotions: 0,
            pawn_count: DEFAULT_ISR_PAWNS,
            disruption_tokens: 0,
            disruption_target: IsrDisruptionTarget::None,
            assured: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDashboard {
    #[serde(default)]
    pub c2: C2Track,
    #[serde(default)]
    pub pnt: PntTrack,
    #[serde(default)]
    pub isr: IsrTrack,
}

/// Scenario overrides for a freshly generated dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpaceRules {
    #[serde(default)]
    pub c2_strike_actions: Option<u32>,
    #[serde(default)]
    pub isr_detection_die: Option<DieRank>,
    #[serde(default)]
    pub isr_pawns: Option<u32>,
}

impl SpaceDashboard {
    /// Build a dashboard from scenario overrides on top of the defaults.
    pub fn from_scenario(rules: &ScenarioSpaceRules) -> Self {
        let mut dashboard = SpaceDashboard::default();
        if let Some(value) = rules.c2_strike_actions {
            dashboard.c2.value = value;
            dashboard.c2.max_value = dashboard.c2.max_value.max(value);
        }
        if let Some(die) = rules.isr_detection_die {
            dashboard.isr.base_die = die;
        }
        if let Some(pawns) = rules.isr_pawns {
            dashboard.isr.pawn_count = pawns;
        }
        dashboard
    }

    /// Long-range strike actions available this turn (floor 0).
    pub fn available_strike_actions(&self) -> u32 {
        self.c2.value.saturating_sub(self.c2.disruption_tokens)
    }

    pub fn pnt_disrupted(&self) -> bool {
        self.pnt.disruption_tokens > 0
    }

    /// Effective theater ISR detection die.
    pub fn isr_detection_die(&self) -> DieRank {
        self.isr.base_die.demote(self.isr.die_demotions)
    }

    /// ISR pawns available. Pawn disruption never drops below one.
    pub fn available_isr_pawns(&self) -> u32 {
        match self.isr.disruption_target {
            IsrDisruptionTarget::Pawns => self
                .isr
                .pawn_count
                .saturating_sub(self.isr.disruption_tokens)
                .max(1),
            IsrDisruptionTarget::Die | IsrDisruptionTarget::None => self.isr.pawn_count,
        }
    }

    pub fn track_state(&self, track: SpaceTrack) -> TrackState {
        let disrupted = match track {
            SpaceTrack::C2 => self.c2.disruption_tokens > 0,
            SpaceTrack::Pnt => self.pnt.disruption_tokens > 0,
            SpaceTrack::Isr => self.isr.disruption_tokens > 0 || self.isr.die_demotions > 0,
        };
        if disrupted {
            TrackState::Disrupted
        } else {
            TrackState::Nominal
        }
    }

    pub fn is_assured(&self, track: SpaceTrack) -> bool {
        match track {
            SpaceTrack::C2 => self.c2.assured,
            SpaceTrack::Pnt => self.pnt.assured,
            SpaceTrack::Isr => self.isr.assured,
        }
    }

    /// Summary of all three tracks.
    pub fn status(&self) -> DashboardStatus {
        DashboardStatus {
            strike_actions: self.available_strike_actions(),
            c2_state: self.track_state(SpaceTrack::C2),
            pnt_state: self.track_state(SpaceTrack::Pnt),
            pnt_demotes_long_range: self.pnt_disrupted(),
            isr_die: self.isr_detection_die(),
            isr_pawns: self.available_isr_pawns(),
            isr_state: self.track_state(SpaceTrack::Isr),
        }
    }
}

/// Read-only summary of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStatus {
    pub strike_actions: u32,
    pub c2_state: TrackState,
    pub pnt_state: TrackState,
    pub pnt_demotes_long_range: bool,
    pub isr_die: DieRank,
    pub isr_pawns: u32,
    pub isr_state: TrackState,
}
