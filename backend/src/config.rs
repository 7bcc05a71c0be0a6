//! Engine configuration
//!
//! Everything the engine reads is loaded once, validated, and treated as
//! read-only for the life of the process. `Default` gives the built-in
//! dashboard parameters; JSON may override any subset of fields.

use crate::error::EngineError;
use crate::metrics::{CsdConfig, LiquidityConfig, RtgsConfig};
use crate::phase::{default_phases, BusinessPhase, PhaseTable};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Default wall-clock interval between ticks
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 30;

/// Complete engine configuration
///
/// # Example
/// ```
/// use business_day_sim_core_rs::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{"rng_seed": 7, "weekend_activity": true}"#).unwrap();
/// assert_eq!(config.rng_seed, 7);
/// assert_eq!(config.tick_interval_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for every random draw the engine makes
    pub rng_seed: u64,

    /// Seconds between scheduled ticks
    pub tick_interval_secs: u64,

    /// Treat Saturday and Sunday as business days
    pub weekend_activity: bool,

    /// Per-slot jitter applied once to the chart series
    pub category_variance: f64,

    pub rtgs: RtgsConfig,
    pub csd: CsdConfig,
    pub liquidity: LiquidityConfig,
    pub phases: Vec<BusinessPhase>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: 12345,
            tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
            weekend_activity: false,
            category_variance: 0.1,
            rtgs: RtgsConfig::default(),
            csd: CsdConfig::default(),
            liquidity: LiquidityConfig::default(),
            phases: default_phases(),
        }
    }
}

impl EngineConfig {
    /// Parse JSON and validate in one step
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every configuration invariant
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tick_interval_secs == 0 {
            return Err(EngineError::InvalidParameter {
                name: "tick_interval_secs".to_string(),
                value: 0.0,
            });
        }
        if !(0.0..1.0).contains(&self.category_variance) {
            return Err(EngineError::InvalidParameter {
                name: "category_variance".to_string(),
                value: self.category_variance,
            });
        }

        self.rtgs.validate()?;
        self.csd.validate()?;
        self.liquidity.validate()?;
        PhaseTable::new(self.phases.clone())?;
        Ok(())
    }

    /// SHA-256 of the configuration's canonical JSON form, hex encoded.
    ///
    /// `serde_json::Value` keeps object keys sorted, so two configs with the
    /// same content always hash the same.
    pub fn fingerprint(&self) -> Result<String, EngineError> {
        let value = serde_json::to_value(self)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;
        let json = serde_json::to_string(&value)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = EngineConfig::default().fingerprint().unwrap();
        let b = EngineConfig::default().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_seed() {
        let a = EngineConfig::default();
        let b = EngineConfig {
            rng_seed: 1,
            ..EngineConfig::default()
        };
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = EngineConfig {
            tick_interval_secs: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
