//! Enumeration types used throughout the rules engine.
//!
//! Every lookup table in the engine is keyed by one of these closed enums and
//! matched exhaustively, so a new variant cannot fall through to a default.

use serde::{Deserialize, Serialize};

/// Opposing sides of a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Blue,
    Red,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }
}

/// Ground unit kind. Drives terrain modifiers and fire-effect thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Infantry,
    LightInfantry,
    Mechanized,
    Armor,
    Artillery,
    AirDefense,
    Helicopter,
}

/// Formation role of a ground unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organization {
    #[default]
    Normal,
    MainEffort,
    Reserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Open,
    Rough,
    Forest,
    Urban,
    Mountain,
    Water,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Overcast,
    Storm,
}

impl Weather {
    /// Weather that costs a column on the GCAT.
    pub fn is_adverse(self) -> bool {
        match self {
            Weather::Clear | Weather::Overcast => false,
            Weather::Storm => true,
        }
    }
}

/// Supply state of a ground unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyLevel {
    #[default]
    Normal,
    Extended,
    OutOfSupply,
}

/// Physical platform of a counter, used for detection and HVU rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Fighter,
    Bomber,
    Aew,
    Tanker,
    Transport,
    Submarine,
    Ship,
    Sam,
    Radar,
    Airfield,
    Sof,
}

impl Platform {
    pub fn is_air(self) -> bool {
        matches!(
            self,
            Platform::Fighter
                | Platform::Bomber
                | Platform::Aew
                | Platform::Tanker
                | Platform::Transport
        )
    }

    pub fn is_naval(self) -> bool {
        matches!(self, Platform::Ship | Platform::Submarine)
    }
}

/// Air mission assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionRole {
    Cap,
    Oca,
    Dca,
    Cas,
    Strike,
    Sead,
    Interdiction,
    Aew,
    Tanker,
    Asw,
    Transport,
    Escort,
    Sucap,
}

impl MissionRole {
    /// Attack-type roles fight air-to-air only defensively, on a demoted die.
    pub fn is_attack_role(self) -> bool {
        match self {
            MissionRole::Strike
            | MissionRole::Interdiction
            | MissionRole::Cas
            | MissionRole::Sucap => true,
            MissionRole::Cap
            | MissionRole::Oca
            | MissionRole::Dca
            | MissionRole::Sead
            | MissionRole::Aew
            | MissionRole::Tanker
            | MissionRole::Asw
            | MissionRole::Transport
            | MissionRole::Escort => false,
        }
    }
}

/// Sensor used for a detection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    TheaterIsr,
    Aew,
    FighterRadar,
    SamRadar,
    ShipRadar,
    Asw,
    Visual,
    Sof,
}

/// Whether a counter can be seen from theater ISR or only by local sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureType {
    #[default]
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MunitionClass {
    AirToAir,
    AirToGround,
    AntiShip,
    CruiseMissile,
    BallisticMissile,
    Hypersonic,
    Jassm,
    JassmEr,
    Harpoon,
}

impl MunitionClass {
    /// Ballistic and hypersonic weapons cannot be engaged by patrol fire.
    pub fn is_interceptable(self) -> bool {
        match self {
            MunitionClass::BallisticMissile | MunitionClass::Hypersonic => false,
            MunitionClass::AirToAir
            | MunitionClass::AirToGround
            | MunitionClass::AntiShip
            | MunitionClass::CruiseMissile
            | MunitionClass::Jassm
            | MunitionClass::JassmEr
            | MunitionClass::Harpoon => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoTokenKind {
    DisruptC2,
    AssureC2,
    SigintEmso,
    ActiveCountermeasures,
    PassiveCountermeasures,
}

impl IoTokenKind {
    /// Defensive tokens survive the turn boundary; offensive ones are discarded.
    pub fn is_defensive(self) -> bool {
        match self {
            IoTokenKind::AssureC2
            | IoTokenKind::ActiveCountermeasures
            | IoTokenKind::PassiveCountermeasures => true,
            IoTokenKind::DisruptC2 | IoTokenKind::SigintEmso => false,
        }
    }

    pub fn is_countermeasure(self) -> bool {
        matches!(
            self,
            IoTokenKind::ActiveCountermeasures | IoTokenKind::PassiveCountermeasures
        )
    }
}

/// What a Disrupt C2 token was placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoTargetKind {
    Hq,
    Ship,
    Artillery,
    Sam,
    AirMission,
    SpaceC2,
    SpaceIsr,
    SpacePnt,
}

/// Kind of action taken against a countermeasure holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Detection,
    Strike,
    Combat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceTrack {
    C2,
    Pnt,
    Isr,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackState {
    #[default]
    Nominal,
    Degraded,
    Disrupted,
}

/// Which ISR quantity the most recent disruption was aimed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsrDisruptionTarget {
    #[default]
    None,
    Die,
    Pawns,
}

/// End-of-turn handling of offensive dashboard disruption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisruptionPolicy {
    /// Disruption stays until countered.
    #[default]
    Persist,
    /// Disruption is wiped at every turn boundary.
    ClearAtEndOfTurn,
}

/// GCAT force-ratio band, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForceRatio {
    #[serde(rename = "1:3")]
    OneToThree,
    #[serde(rename = "1:2")]
    OneToTwo,
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "2:1")]
    TwoToOne,
    #[serde(rename = "3:1")]
    ThreeToOne,
    #[serde(rename = "4:1")]
    FourToOne,
    #[serde(rename = "5:1")]
    FiveToOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasualtyTier {
    Low,
    Medium,
    High,
}

/// Fire Effects Table result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireEffect {
    NoEffect,
    Suppression,
    StepLoss,
    Destruction,
}

/// Outcome of a best-die initiative roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiative {
    Blue,
    Red,
    /// Equal rolls. Re-rolling is a caller policy.
    Tied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirSuperiority {
    Blue,
    Red,
    Contested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelSourceKind {
    Airbase,
    Carrier,
    Tanker,
    Farp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankerType {
    #[serde(rename = "KC-135")]
    Kc135,
    #[serde(rename = "KC-46")]
    Kc46,
    #[serde(rename = "KC-130J")]
    Kc130j,
    #[serde(rename = "MQ-25")]
    Mq25,
}
