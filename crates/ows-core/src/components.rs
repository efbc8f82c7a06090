//! Plain data records supplied by the scenario: units, aircraft, munitions,
//! IO tokens and the environment they fight in.
//!
//! Records carry only derived queries. Anything that rolls dice or produces a
//! successor value lives in the engine.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dice::DieRank;
use crate::enums::*;
use crate::error::{Result, RulesError};
use crate::types::HexCoord;

fn default_signature() -> u32 {
    DEFAULT_SIGNATURE
}

fn default_one() -> u32 {
    1
}

fn default_a2a_die() -> DieRank {
    DEFAULT_A2A_DIE
}

fn default_a2a_defense() -> u32 {
    DEFAULT_A2A_DEFENSE
}

fn default_strike_die() -> DieRank {
    DEFAULT_STRIKE_DIE
}

fn default_sead_die() -> DieRank {
    DEFAULT_SEAD_DIE
}

fn default_munition_range() -> u32 {
    DEFAULT_MUNITION_RANGE
}

fn default_combat_radius() -> u32 {
    DEFAULT_COMBAT_RADIUS
}

fn default_sead_range() -> u32 {
    DEFAULT_SEAD_RANGE
}

/// Two-layer defense: grey must be met before red is tested for hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldPair {
    /// Consumable first layer. 0 means absent.
    #[serde(default)]
    pub grey: u32,
    pub red: u32,
}

impl ShieldPair {
    pub fn new(grey: u32, red: u32) -> Self {
        Self { grey, red }
    }

    pub fn red_only(red: u32) -> Self {
        Self { grey: 0, red }
    }

    pub fn has_grey(&self) -> bool {
        self.grey > 0
    }
}

/// A ground combat unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(default)]
    pub side: Side,
    pub kind: UnitKind,
    #[serde(default)]
    pub organization: Organization,
    #[serde(default = "default_one")]
    pub steps_max: u32,
    #[serde(default)]
    pub steps_lost: u32,
    #[serde(default)]
    pub suppression_level: u32,
    #[serde(default = "default_signature")]
    pub signature: u32,
    /// Signature against local sensors when stealthy.
    #[serde(default)]
    pub stealth_signature: Option<u32>,
    #[serde(default)]
    pub is_stealth: bool,
    #[serde(default)]
    pub is_emcon: bool,
    #[serde(default)]
    pub position: Option<HexCoord>,
    /// Id of the unit this one draws supply from.
    #[serde(default)]
    pub supply_source: Option<String>,
}

impl Unit {
    pub fn new(id: impl Into<String>, side: Side, kind: UnitKind, steps_max: u32) -> Self {
        Self {
            id: id.into(),
            side,
            kind,
            organization: Organization::Normal,
            steps_max,
            steps_lost: 0,
            suppression_level: 0,
            signature: DEFAULT_SIGNATURE,
            stealth_signature: None,
            is_stealth: false,
            is_emcon: false,
            position: None,
            supply_source: None,
        }
    }

    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organization = organization;
        self
    }

    pub fn at(mut self, position: HexCoord) -> Self {
        self.position = Some(position);
        self
    }

    pub fn supplied_by(mut self, source: impl Into<String>) -> Self {
        self.supply_source = Some(source.into());
        self
    }

    pub fn remaining_steps(&self) -> u32 {
        self.steps_max.saturating_sub(self.steps_lost)
    }

    pub fn is_destroyed(&self) -> bool {
        self.steps_lost >= self.steps_max
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression_level > 0
    }

    /// Reject records the resolvers cannot interpret.
    pub fn validate(&self) -> Result<()> {
        if self.steps_max == 0 {
            return Err(RulesError::Validation(format!(
                "unit {} has steps_max 0",
                self.id
            )));
        }
        if self.steps_lost > self.steps_max {
            return Err(RulesError::Validation(format!(
                "unit {} has lost {} of {} steps",
                self.id, self.steps_lost, self.steps_max
            )));
        }
        Ok(())
    }

    /// View of this unit as a detection target.
    pub fn as_contact(&self) -> Contact {
        Contact {
            id: self.id.clone(),
            platform: None,
            signature: self.signature,
            stealth_signature: self.stealth_signature,
            signature_type: SignatureType::High,
            is_stealth: self.is_stealth,
            is_emcon: self.is_emcon,
            is_low_signature: false,
        }
    }
}

/// Anything that can be the target of a detection attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default = "default_signature")]
    pub signature: u32,
    #[serde(default)]
    pub stealth_signature: Option<u32>,
    #[serde(default)]
    pub signature_type: SignatureType,
    #[serde(default)]
    pub is_stealth: bool,
    #[serde(default)]
    pub is_emcon: bool,
    /// Submarines and similar targets capped like stealth under fusion.
    #[serde(default)]
    pub is_low_signature: bool,
}

impl Contact {
    pub fn new(id: impl Into<String>, signature: u32) -> Self {
        Self {
            id: id.into(),
            platform: None,
            signature,
            stealth_signature: None,
            signature_type: SignatureType::High,
            is_stealth: false,
            is_emcon: false,
            is_low_signature: false,
        }
    }

    pub fn stealthy(mut self) -> Self {
        self.is_stealth = true;
        self
    }

    pub fn on(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Whether the stealth cap applies to fused or local sensors.
    pub fn is_capped(&self) -> bool {
        self.is_stealth || self.is_low_signature
    }
}

/// A fighter taking part in air-to-air combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: String,
    #[serde(default = "default_fighter_platform")]
    pub platform: Platform,
    #[serde(default = "default_a2a_die")]
    pub a2a_die: DieRank,
    #[serde(default = "default_a2a_defense")]
    pub a2a_defense: u32,
    #[serde(default)]
    pub mission: Option<MissionRole>,
}

fn default_fighter_platform() -> Platform {
    Platform::Fighter
}

impl Fighter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            platform: Platform::Fighter,
            a2a_die: DEFAULT_A2A_DIE,
            a2a_defense: DEFAULT_A2A_DEFENSE,
            mission: None,
        }
    }

    pub fn with_die(mut self, die: DieRank) -> Self {
        self.a2a_die = die;
        self
    }

    pub fn on_mission(mut self, role: MissionRole) -> Self {
        self.mission = Some(role);
        self
    }

    pub fn as_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Fighters on attack-type missions cannot start an air-to-air fight.
    pub fn can_initiate(&self) -> bool {
        self.mission.map_or(true, |role| !role.is_attack_role())
    }
}

/// One salvo counter of air-delivered munitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Munition {
    pub id: String,
    pub class: MunitionClass,
    #[serde(default = "default_munition_range")]
    pub range: u32,
    #[serde(default = "default_one")]
    pub quantity: u32,
    #[serde(default = "default_strike_die")]
    pub strike_die: DieRank,
    #[serde(default)]
    pub launched: bool,
}

impl Munition {
    pub fn new(id: impl Into<String>, class: MunitionClass) -> Self {
        Self {
            id: id.into(),
            class,
            range: DEFAULT_MUNITION_RANGE,
            quantity: 1,
            strike_die: DEFAULT_STRIKE_DIE,
            launched: false,
        }
    }

    pub fn with_die(mut self, die: DieRank) -> Self {
        self.strike_die = die;
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }
}

/// An air mission counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: String,
    #[serde(default)]
    pub side: Side,
    pub platform: Platform,
    #[serde(default)]
    pub role: Option<MissionRole>,
    /// Built-in strike die for aircraft that need no munitions.
    #[serde(default)]
    pub organic_strike: Option<DieRank>,
    #[serde(default = "default_sead_die")]
    pub sead_die: DieRank,
    #[serde(default)]
    pub munitions: Vec<Munition>,
    #[serde(default = "default_combat_radius")]
    pub combat_radius: u32,
    #[serde(default)]
    pub location: Option<HexCoord>,
    #[serde(default)]
    pub base_location: Option<HexCoord>,
    #[serde(default)]
    pub carrier_capable: bool,
    #[serde(default)]
    pub carrier_only: bool,
    #[serde(default = "default_one")]
    pub steps_max: u32,
    #[serde(default)]
    pub steps_lost: u32,
    #[serde(default = "default_sead_range")]
    pub sead_range: u32,
}

impl Aircraft {
    pub fn new(id: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: id.into(),
            side: Side::Blue,
            platform,
            role: None,
            organic_strike: None,
            sead_die: DEFAULT_SEAD_DIE,
            munitions: Vec::new(),
            combat_radius: DEFAULT_COMBAT_RADIUS,
            location: None,
            base_location: None,
            carrier_capable: false,
            carrier_only: false,
            steps_max: 1,
            steps_lost: 0,
            sead_range: DEFAULT_SEAD_RANGE,
        }
    }

    pub fn with_role(mut self, role: MissionRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_organic_strike(mut self, die: DieRank) -> Self {
        self.organic_strike = Some(die);
        self
    }

    pub fn with_munitions(mut self, munitions: Vec<Munition>) -> Self {
        self.munitions = munitions;
        self
    }

    pub fn at(mut self, location: HexCoord) -> Self {
        self.location = Some(location);
        self
    }

    pub fn based_at(mut self, base: HexCoord) -> Self {
        self.base_location = Some(base);
        self
    }

    /// Salvos this airframe can carry.
    pub fn salvo_capacity(&self) -> usize {
        match self.platform {
            Platform::Bomber => BOMBER_SALVO_CAPACITY,
            _ => FIGHTER_SALVO_CAPACITY,
        }
    }

    pub fn is_armed(&self) -> bool {
        !self.munitions.is_empty() || self.organic_strike.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.steps_lost >= self.steps_max
    }
}

/// An airbase, carrier, tanker or FARP an air mission can trace fuel to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSource {
    pub name: String,
    pub kind: FuelSourceKind,
    pub location: HexCoord,
    #[serde(default)]
    pub tanker: Option<TankerType>,
    #[serde(default)]
    pub max_aircraft: Option<u32>,
    #[serde(default)]
    pub based_aircraft: u32,
    /// Step losses suffered, for carriers.
    #[serde(default)]
    pub steps_lost: u32,
}

impl FuelSource {
    pub fn new(name: impl Into<String>, kind: FuelSourceKind, location: HexCoord) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
            tanker: None,
            max_aircraft: None,
            based_aircraft: 0,
            steps_lost: 0,
        }
    }
}

/// An information-operations token placed against a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoToken {
    pub id: u32,
    pub kind: IoTokenKind,
    #[serde(default)]
    pub side: Side,
    pub target_id: String,
    /// Tokens are placed face-down.
    #[serde(default)]
    pub revealed: bool,
    /// Defense of an Assure C2 token, when it differs from the default.
    #[serde(default)]
    pub defense: Option<u32>,
}

impl IoToken {
    pub fn is_face_down(&self) -> bool {
        !self.revealed
    }
}

/// How a detection attempt is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DetectionMode {
    /// Theater ISR using the dashboard's detection die.
    TheaterIsr,
    /// A single point sensor.
    Local { sensor: DieRank, kind: SensorKind },
    /// Airborne early warning, demoted by range.
    Aew { sensor: DieRank, range_hexes: u32 },
    /// Fusion of several sensors.
    Cooperative { sensors: Vec<DieRank> },
}

impl DetectionMode {
    pub fn sensor_kind(&self) -> SensorKind {
        match self {
            DetectionMode::TheaterIsr => SensorKind::TheaterIsr,
            DetectionMode::Local { kind, .. } => *kind,
            DetectionMode::Aew { .. } => SensorKind::Aew,
            DetectionMode::Cooperative { .. } => SensorKind::FighterRadar,
        }
    }
}

/// Conditions of a ground engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundEnvironment {
    pub terrain: TerrainType,
    #[serde(default)]
    pub fortified: bool,
    #[serde(default)]
    pub weather: Weather,
    /// Attacker's supply state.
    #[serde(default)]
    pub supply: SupplyLevel,
}

impl GroundEnvironment {
    pub fn new(terrain: TerrainType) -> Self {
        Self {
            terrain,
            fortified: false,
            weather: Weather::Clear,
            supply: SupplyLevel::Normal,
        }
    }
}
