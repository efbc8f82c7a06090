//! Tunable rule parameters, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::dice::DieRank;
use crate::enums::DisruptionPolicy;
use crate::error::{Result, RulesError};
use crate::state::ScenarioSpaceRules;

/// Rule parameters a scenario may override. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Supply range in hexes for normal supply.
    pub normal_supply_range: u32,
    /// Multiple of the normal range still counted as extended supply.
    pub extended_supply_factor: f64,
    pub stealth_detection_cap: DieRank,
    pub initiative_die: DieRank,
    pub disrupt_c2_die: DieRank,
    pub default_target_defense: u32,
    pub default_assure_defense: u32,
    pub disruption_policy: DisruptionPolicy,
    /// Starting dashboard values.
    pub space: ScenarioSpaceRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            normal_supply_range: NORMAL_SUPPLY_RANGE,
            extended_supply_factor: EXTENDED_SUPPLY_FACTOR,
            stealth_detection_cap: STEALTH_DETECTION_CAP,
            initiative_die: INITIATIVE_DIE,
            disrupt_c2_die: DISRUPT_C2_DIE,
            default_target_defense: DEFAULT_IO_DEFENSE,
            default_assure_defense: DEFAULT_IO_DEFENSE,
            disruption_policy: DisruptionPolicy::Persist,
            space: ScenarioSpaceRules::default(),
        }
    }
}

impl RulesConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Extended supply limit in whole hexes (floored).
    pub fn extended_supply_range(&self) -> u32 {
        (f64::from(self.normal_supply_range) * self.extended_supply_factor).floor() as u32
    }

    pub fn validate(&self) -> Result<()> {
        if self.normal_supply_range == 0 {
            return Err(RulesError::Validation(
                "normal_supply_range must be at least 1".into(),
            ));
        }
        if !self.extended_supply_factor.is_finite() || self.extended_supply_factor < 1.0 {
            return Err(RulesError::Validation(format!(
                "extended_supply_factor {} must be a finite value >= 1",
                self.extended_supply_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RulesConfig::default();
        assert_eq!(c.normal_supply_range, 4);
        assert_eq!(c.extended_supply_range(), 6);
        assert_eq!(c.stealth_detection_cap, DieRank::D12);
        assert_eq!(c.disruption_policy, DisruptionPolicy::Persist);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let c = RulesConfig::from_json_str(
            r#"{ "normal_supply_range": 6, "disruption_policy": "clear_at_end_of_turn" }"#,
        )
        .unwrap();
        assert_eq!(c.normal_supply_range, 6);
        assert_eq!(c.extended_supply_range(), 9);
        assert_eq!(c.disruption_policy, DisruptionPolicy::ClearAtEndOfTurn);
        assert_eq!(c.disrupt_c2_die, DieRank::D8);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = RulesConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, RulesError::Config(_)));
    }

    #[test]
    fn test_zero_range_rejected() {
        let err = RulesConfig::from_json_str(r#"{ "normal_supply_range": 0 }"#).unwrap_err();
        assert!(matches!(err, RulesError::Validation(_)));
    }

    #[test]
    fn test_round_trip() {
        let c = RulesConfig::default();
        let json = c.to_json_pretty().unwrap();
        assert_eq!(RulesConfig::from_json_str(&json).unwrap(), c);
    }
}
