//! CSD rail snapshot (securities settlement stream)
//!
//! Same derivation as the RTGS rail with its own window, settlement-rate
//! distribution and instrument-class breakdown, plus a settlement value at
//! a fixed average unit value.

use super::{breakdown, continuous_fields, rail_counts, sampled_share, Normal, RailProfile};
use crate::core::time::DayTime;
use crate::error::EngineError;
use crate::rng::RandomSource;
use crate::tables::{default_instrument_split, BusinessWindow, DEFAULT_CSD_CUMULATIVE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CSD rail parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsdConfig {
    #[serde(flatten)]
    pub profile: RailProfile,

    /// Share of total that failed to settle
    pub failed: Normal,

    /// Share of total pending matching or securities
    pub pending: Normal,

    /// Share of total settled free of payment
    pub free_of_payment: Normal,

    /// Fixed value per settled instruction for `settlement_value`
    pub settlement_unit_value: f64,
}

impl CsdConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.profile.validate("csd")?;
        self.failed.validate("csd.failed")?;
        self.pending.validate("csd.pending")?;
        self.free_of_payment.validate("csd.free_of_payment")?;
        if !self.settlement_unit_value.is_finite() || self.settlement_unit_value < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "csd.settlement_unit_value".to_string(),
                value: self.settlement_unit_value,
            });
        }
        Ok(())
    }
}

impl Default for CsdConfig {
    fn default() -> Self {
        Self {
            profile: RailProfile {
                window: BusinessWindow::new(9, 16),
                cumulative: DEFAULT_CSD_CUMULATIVE.to_vec(),
                category_split: default_instrument_split(),
                settlement_rate_base: 0.97,
                settlement_rate_spread: 0.015,
                processing_time: Normal::new(4.5, 1.0),
                average_value: Normal::new(48_000_000.0, 9_000_000.0),
                delay_share: Normal::new(0.02, 0.01),
            },
            failed: Normal::new(0.015, 0.008),
            pending: Normal::new(0.06, 0.02),
            free_of_payment: Normal::new(0.12, 0.03),
            settlement_unit_value: 50_000_000.0,
        }
    }
}

/// CSD metrics at one tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CsdSnapshot {
    pub cumulative_transactions: i64,
    pub hourly_transactions: i64,
    pub total_transactions: i64,
    pub settled_transactions: i64,
    pub failed_transactions: i64,
    pub pending_transactions: i64,
    pub free_of_payment_transactions: i64,
    pub processing_time: f64,
    pub average_trade_value: f64,
    pub delay_share: f64,
    pub total_volume: i64,
    /// Settled count times the fixed unit value
    pub settlement_value: i64,
    pub instrument_breakdown: BTreeMap<String, i64>,
}

impl CsdSnapshot {
    /// Build the CSD snapshot for `slot`
    pub fn build(slot: DayTime, config: &CsdConfig, rng: &mut dyn RandomSource) -> Self {
        let counts = rail_counts(slot, &config.profile, rng);
        let failed = sampled_share(counts.total, &config.failed, rng);
        let pending = sampled_share(counts.total, &config.pending, rng);
        let free_of_payment = sampled_share(counts.total, &config.free_of_payment, rng);
        let fields = continuous_fields(slot, &config.profile, rng);

        Self {
            cumulative_transactions: counts.cumulative,
            hourly_transactions: counts.hourly,
            total_transactions: counts.total,
            settled_transactions: counts.settled,
            failed_transactions: failed,
            pending_transactions: pending,
            free_of_payment_transactions: free_of_payment,
            processing_time: fields.processing_time,
            average_trade_value: fields.average_value,
            delay_share: fields.delay_share,
            total_volume: (counts.settled as f64 * fields.average_value).round() as i64,
            settlement_value: (counts.settled as f64 * config.settlement_unit_value).round() as i64,
            instrument_breakdown: breakdown(counts.total, &config.profile.category_split),
        }
    }

    /// All-zero snapshot listing every configured instrument class
    pub fn zeroed(config: &CsdConfig) -> Self {
        Self {
            instrument_breakdown: breakdown(0, &config.profile.category_split),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngManager;

    #[test]
    fn test_csd_window_differs_from_rtgs() {
        let config = CsdConfig::default();
        let mut rng = RngManager::new(4);
        // 08:30 is inside the RTGS window but before the CSD opens
        let snap = CsdSnapshot::build(DayTime::new(8, 30), &config, &mut rng);
        assert_eq!(snap, CsdSnapshot::zeroed(&config));
    }

    #[test]
    fn test_settlement_value_uses_unit_value() {
        let mut config = CsdConfig::default();
        config.profile.settlement_rate_spread = 0.0;
        config.profile.settlement_rate_base = 1.0;
        config.settlement_unit_value = 10.0;
        let mut rng = RngManager::new(4);

        let snap = CsdSnapshot::build(DayTime::new(9, 0), &config, &mut rng);
        assert_eq!(snap.total_transactions, 640);
        assert_eq!(snap.settled_transactions, 640);
        assert_eq!(snap.settlement_value, 6_400);
    }

    #[test]
    fn test_off_day_zeroes_rail() {
        let config = CsdConfig::default();
        let mut rng = RngManager::new(4);
        let snap = CsdSnapshot::build(DayTime::off_day(11, 0), &config, &mut rng);
        assert_eq!(snap.total_transactions, 0);
        assert_eq!(snap.processing_time, 0.0);
    }
}
