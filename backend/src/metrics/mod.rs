//! Metrics snapshot builders
//!
//! Three builders (RTGS rail, CSD rail, liquidity) turn an `(hour, minute)`
//! slot plus fresh random draws into an immutable snapshot. A snapshot has
//! no memory of earlier ticks: the same slot and the same draws always give
//! the same snapshot.
//!
//! # Draw order
//!
//! Rail builders draw the settlement rate, then the three outcome shares,
//! then (inside the business window only) processing time, average value
//! and delay share. The liquidity builder draws once for total liquidity.

pub mod csd;
pub mod liquidity;
pub mod rtgs;

pub use csd::{CsdConfig, CsdSnapshot};
pub use liquidity::{LiquidityConfig, LiquiditySnapshot};
pub use rtgs::{RtgsConfig, RtgsSnapshot};

use crate::config::EngineConfig;
use crate::core::time::DayTime;
use crate::error::EngineError;
use crate::pattern::{cumulative_at, increment_for_hour, progress_within_hour};
use crate::rng::RandomSource;
use crate::tables::{validate_cumulative, validate_split, BusinessWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normal distribution parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    pub mean: f64,
    pub std_dev: f64,
}

impl Normal {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.normal(self.mean, self.std_dev)
    }

    pub fn validate(&self, name: &str) -> Result<(), EngineError> {
        if !self.mean.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: format!("{}.mean", name),
                value: self.mean,
            });
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: format!("{}.std_dev", name),
                value: self.std_dev,
            });
        }
        Ok(())
    }
}

/// Parameters shared by both transaction rails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailProfile {
    /// Hours during which the rail settles
    pub window: BusinessWindow,

    /// Cumulative count per business-hour slot
    pub cumulative: Vec<i64>,

    /// Category label → share of total (sums to 1.0)
    pub category_split: BTreeMap<String, f64>,

    /// Mean settled fraction of total
    pub settlement_rate_base: f64,

    /// Standard deviation of the settled fraction
    pub settlement_rate_spread: f64,

    /// Processing time in seconds
    pub processing_time: Normal,

    /// Average value per transaction (currency units)
    pub average_value: Normal,

    /// Fraction of transactions settled late
    pub delay_share: Normal,
}

impl RailProfile {
    pub fn validate(&self, name: &str) -> Result<(), EngineError> {
        self.window.validate()?;
        validate_cumulative(name, &self.cumulative, &self.window)?;
        validate_split(name, &self.category_split)?;

        if !(0.0..=1.0).contains(&self.settlement_rate_base) {
            return Err(EngineError::InvalidParameter {
                name: format!("{}.settlement_rate_base", name),
                value: self.settlement_rate_base,
            });
        }
        if !self.settlement_rate_spread.is_finite() || self.settlement_rate_spread < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: format!("{}.settlement_rate_spread", name),
                value: self.settlement_rate_spread,
            });
        }

        self.processing_time.validate(&format!("{}.processing_time", name))?;
        self.average_value.validate(&format!("{}.average_value", name))?;
        self.delay_share.validate(&format!("{}.delay_share", name))
    }

    /// True when the rail settles at `slot`
    pub fn is_active(&self, slot: DayTime) -> bool {
        slot.business_day && self.window.contains(slot.hour)
    }
}

/// Count fields common to both rails
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RailCounts {
    pub cumulative: i64,
    pub hourly: i64,
    pub total: i64,
    pub settled: i64,
}

pub(crate) fn rail_counts(
    slot: DayTime,
    profile: &RailProfile,
    rng: &mut dyn RandomSource,
) -> RailCounts {
    let table = &profile.cumulative;
    let window = &profile.window;

    let cumulative = cumulative_at(slot.hour, table, window, slot.business_day);
    let increment = increment_for_hour(slot.hour, table, window, slot.business_day);
    let progress = progress_within_hour(slot.hour, slot.minute, table, window, slot.business_day);
    let total = cumulative + progress;

    let rate = (profile.settlement_rate_base + rng.normal(0.0, profile.settlement_rate_spread))
        .clamp(0.0, 1.0);

    RailCounts {
        cumulative,
        hourly: increment + progress,
        total,
        settled: (total as f64 * rate).round() as i64,
    }
}

/// Continuous fields sampled only while the rail is active
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct ContinuousFields {
    pub processing_time: f64,
    pub average_value: f64,
    pub delay_share: f64,
}

pub(crate) fn continuous_fields(
    slot: DayTime,
    profile: &RailProfile,
    rng: &mut dyn RandomSource,
) -> ContinuousFields {
    if !profile.is_active(slot) {
        return ContinuousFields::default();
    }
    ContinuousFields {
        processing_time: profile.processing_time.sample(rng).max(0.0),
        average_value: profile.average_value.sample(rng).max(0.0),
        delay_share: profile.delay_share.sample(rng).max(0.0),
    }
}

/// `round(total * max(0, N(mean, sd)))`
pub(crate) fn sampled_share(total: i64, share: &Normal, rng: &mut dyn RandomSource) -> i64 {
    (total as f64 * share.sample(rng).max(0.0)).round() as i64
}

/// `{category: round(total * share)}`
pub(crate) fn breakdown(total: i64, split: &BTreeMap<String, f64>) -> BTreeMap<String, i64> {
    split
        .iter()
        .map(|(label, share)| (label.clone(), (total as f64 * share).round() as i64))
        .collect()
}

/// The three snapshots published together on each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSet {
    pub rtgs: RtgsSnapshot,
    pub csd: CsdSnapshot,
    pub liquidity: LiquiditySnapshot,
}

impl SnapshotSet {
    /// Build all three snapshots for `slot`, in RTGS, CSD, liquidity order
    pub fn build(slot: DayTime, config: &EngineConfig, rng: &mut dyn RandomSource) -> Self {
        Self {
            rtgs: RtgsSnapshot::build(slot, &config.rtgs, rng),
            csd: CsdSnapshot::build(slot, &config.csd, rng),
            liquidity: LiquiditySnapshot::build(slot, &config.liquidity, rng),
        }
    }

    /// Canonical all-zero set, with every configured category present
    pub fn zeroed(config: &EngineConfig) -> Self {
        Self {
            rtgs: RtgsSnapshot::zeroed(&config.rtgs),
            csd: CsdSnapshot::zeroed(&config.csd),
            liquidity: LiquiditySnapshot::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_rounds_each_category() {
        let split: BTreeMap<String, f64> =
            [("a".to_string(), 0.5), ("b".to_string(), 0.25), ("c".to_string(), 0.25)]
                .into_iter()
                .collect();
        let b = breakdown(10, &split);
        assert_eq!(b["a"], 5);
        assert_eq!(b["b"], 3); // 2.5 rounds away from zero
        assert_eq!(b["c"], 3);
    }

    #[test]
    fn test_normal_validation() {
        assert!(Normal::new(1.0, 0.0).validate("x").is_ok());
        assert!(Normal::new(1.0, -0.1).validate("x").is_err());
        assert!(Normal::new(f64::NAN, 0.1).validate("x").is_err());
    }
}
