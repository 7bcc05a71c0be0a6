//! RTGS rail snapshot (primary real-time settlement stream)

use super::{breakdown, continuous_fields, rail_counts, sampled_share, Normal, RailProfile};
use crate::core::time::DayTime;
use crate::error::EngineError;
use crate::rng::RandomSource;
use crate::tables::{default_currency_split, BusinessWindow, DEFAULT_RTGS_CUMULATIVE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RTGS rail parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtgsConfig {
    #[serde(flatten)]
    pub profile: RailProfile,

    /// Share of total rejected
    pub rejected: Normal,

    /// Share of total waiting in the central queue
    pub queued: Normal,

    /// Share of total drawn on the intraday liquidity facility
    pub ilf: Normal,
}

impl RtgsConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.profile.validate("rtgs")?;
        self.rejected.validate("rtgs.rejected")?;
        self.queued.validate("rtgs.queued")?;
        self.ilf.validate("rtgs.ilf")
    }
}

impl Default for RtgsConfig {
    fn default() -> Self {
        Self {
            profile: RailProfile {
                window: BusinessWindow::new(8, 17),
                cumulative: DEFAULT_RTGS_CUMULATIVE.to_vec(),
                category_split: default_currency_split(),
                settlement_rate_base: 0.94,
                settlement_rate_spread: 0.02,
                processing_time: Normal::new(1.8, 0.4),
                average_value: Normal::new(12_500_000.0, 2_500_000.0),
                delay_share: Normal::new(0.04, 0.015),
            },
            rejected: Normal::new(0.02, 0.01),
            queued: Normal::new(0.08, 0.02),
            ilf: Normal::new(0.05, 0.015),
        }
    }
}

/// RTGS metrics at one tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RtgsSnapshot {
    /// Table value at the current hour's slot
    pub cumulative_transactions: i64,
    /// This hour's increment plus progress into the hour
    pub hourly_transactions: i64,
    /// Cumulative plus progress into the hour
    pub total_transactions: i64,
    pub settled_transactions: i64,
    pub rejected_transactions: i64,
    pub queued_transactions: i64,
    pub ilf_transactions: i64,
    /// Seconds
    pub processing_time: f64,
    pub average_transaction_value: f64,
    pub delay_share: f64,
    /// Settled count times average value
    pub total_volume: i64,
    pub currency_breakdown: BTreeMap<String, i64>,
}

impl RtgsSnapshot {
    /// Build the RTGS snapshot for `slot`
    pub fn build(slot: DayTime, config: &RtgsConfig, rng: &mut dyn RandomSource) -> Self {
        let counts = rail_counts(slot, &config.profile, rng);
        let rejected = sampled_share(counts.total, &config.rejected, rng);
        let queued = sampled_share(counts.total, &config.queued, rng);
        let ilf = sampled_share(counts.total, &config.ilf, rng);
        let fields = continuous_fields(slot, &config.profile, rng);

        Self {
            cumulative_transactions: counts.cumulative,
            hourly_transactions: counts.hourly,
            total_transactions: counts.total,
            settled_transactions: counts.settled,
            rejected_transactions: rejected,
            queued_transactions: queued,
            ilf_transactions: ilf,
            processing_time: fields.processing_time,
            average_transaction_value: fields.average_value,
            delay_share: fields.delay_share,
            total_volume: (counts.settled as f64 * fields.average_value).round() as i64,
            currency_breakdown: breakdown(counts.total, &config.profile.category_split),
        }
    }

    /// All-zero snapshot listing every configured currency
    pub fn zeroed(config: &RtgsConfig) -> Self {
        Self {
            currency_breakdown: breakdown(0, &config.profile.category_split),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngManager;

    fn scenario_config() -> RtgsConfig {
        let mut config = RtgsConfig::default();
        config.profile.cumulative = vec![100, 180, 260, 340, 420, 500, 580, 660, 740, 820];
        config
    }

    #[test]
    fn test_opening_minute() {
        let mut rng = RngManager::new(1);
        let snap = RtgsSnapshot::build(DayTime::new(8, 0), &scenario_config(), &mut rng);
        assert_eq!(snap.cumulative_transactions, 100);
        assert_eq!(snap.hourly_transactions, 100);
        assert_eq!(snap.total_transactions, 100);
    }

    #[test]
    fn test_half_past_opening() {
        let mut rng = RngManager::new(1);
        let snap = RtgsSnapshot::build(DayTime::new(8, 30), &scenario_config(), &mut rng);
        assert_eq!(snap.total_transactions, 150);
        assert_eq!(snap.hourly_transactions, 150);
    }

    #[test]
    fn test_before_window_all_zero() {
        let config = scenario_config();
        for minute in [0, 15, 59] {
            let mut rng = RngManager::new(3);
            let snap = RtgsSnapshot::build(DayTime::new(6, minute), &config, &mut rng);
            assert_eq!(snap, RtgsSnapshot::zeroed(&config));
        }
    }

    #[test]
    fn test_zero_spread_settles_base_rate() {
        let mut config = scenario_config();
        config.profile.settlement_rate_base = 0.5;
        config.profile.settlement_rate_spread = 0.0;
        let mut rng = RngManager::new(11);
        let snap = RtgsSnapshot::build(DayTime::new(9, 0), &config, &mut rng);
        assert_eq!(snap.total_transactions, 180);
        assert_eq!(snap.settled_transactions, 90);
    }

    #[test]
    fn test_breakdown_uses_fixed_shares() {
        let mut rng = RngManager::new(2);
        let config = scenario_config();
        let snap = RtgsSnapshot::build(DayTime::new(9, 0), &config, &mut rng);
        assert_eq!(snap.currency_breakdown["USD"], 81); // 180 * 0.45
        assert_eq!(snap.currency_breakdown["OTHER"], 9); // 180 * 0.05
    }
}
