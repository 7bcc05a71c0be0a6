//! Liquidity snapshot
//!
//! Utilization follows a half-sine hump over the business window, peaking
//! mid-window. Total liquidity is a fresh uniform draw each tick and is not
//! smoothed between ticks.

use crate::core::time::DayTime;
use crate::error::EngineError;
use crate::rng::RandomSource;
use crate::tables::BusinessWindow;
use serde::{Deserialize, Serialize};

/// Liquidity parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityConfig {
    /// Window over which the utilization hump is spread
    pub window: BusinessWindow,

    /// Utilization outside the window, percent
    pub utilization_baseline: f64,

    /// Height of the mid-window peak above baseline, percent
    pub utilization_amplitude: f64,

    /// Lower bound of total liquidity (currency units)
    pub total_floor: i64,

    /// Width of the uniform range above `total_floor`
    pub total_range: i64,

    /// Share of available liquidity held as central bank cash
    pub cash_share: f64,

    /// Share of available liquidity backed by pledged collateral
    pub pledged_share: f64,

    /// Share of available liquidity from intraday credit
    pub intraday_credit_share: f64,
}

impl LiquidityConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.window.validate()?;

        let percent_fields = [
            ("liquidity.utilization_baseline", self.utilization_baseline),
            ("liquidity.utilization_amplitude", self.utilization_amplitude),
        ];
        for (name, value) in percent_fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidParameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        let peak = self.utilization_baseline + self.utilization_amplitude;
        if peak > 100.0 {
            return Err(EngineError::InvalidParameter {
                name: "liquidity.utilization_peak".to_string(),
                value: peak,
            });
        }

        for (name, value) in [
            ("liquidity.total_floor", self.total_floor),
            ("liquidity.total_range", self.total_range),
        ] {
            if value < 0 {
                return Err(EngineError::InvalidParameter {
                    name: name.to_string(),
                    value: value as f64,
                });
            }
        }

        for (name, value) in [
            ("liquidity.cash_share", self.cash_share),
            ("liquidity.pledged_share", self.pledged_share),
            ("liquidity.intraday_credit_share", self.intraday_credit_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidParameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Utilization percent at `slot`, rounded to one decimal
    pub fn utilization_at(&self, slot: DayTime) -> f64 {
        let width = self.window.width_hours();
        let pct = if slot.business_day && self.window.contains(slot.hour) && width > 0.0 {
            let offset = slot.decimal_hour() - self.window.start_hour as f64;
            self.utilization_baseline
                + self.utilization_amplitude * (offset * std::f64::consts::PI / width).sin()
        } else {
            self.utilization_baseline
        };
        (pct * 10.0).round() / 10.0
    }
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            window: BusinessWindow::new(8, 17),
            utilization_baseline: 35.0,
            utilization_amplitude: 40.0,
            total_floor: 450_000_000_000,
            total_range: 150_000_000_000,
            cash_share: 0.6,
            pledged_share: 0.3,
            intraday_credit_share: 0.1,
        }
    }
}

/// Liquidity position at one tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiquiditySnapshot {
    pub total_liquidity: i64,
    pub available_liquidity: i64,
    /// Percent, one decimal
    pub utilization_rate: f64,
    pub cash_liquidity: i64,
    pub pledged_collateral: i64,
    pub intraday_credit: i64,
}

impl LiquiditySnapshot {
    /// Build the liquidity snapshot for `slot`
    pub fn build(slot: DayTime, config: &LiquidityConfig, rng: &mut dyn RandomSource) -> Self {
        let utilization_rate = config.utilization_at(slot);
        let total = config.total_floor as f64 + rng.next_f64() * config.total_range as f64;
        let available = (total * (1.0 - utilization_rate / 100.0)).max(0.0);

        Self {
            total_liquidity: total.round() as i64,
            available_liquidity: available.round() as i64,
            utilization_rate,
            cash_liquidity: (available * config.cash_share).round() as i64,
            pledged_collateral: (available * config.pledged_share).round() as i64,
            intraday_credit: (available * config.intraday_credit_share).round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngManager;

    #[test]
    fn test_baseline_outside_window() {
        let config = LiquidityConfig::default();
        assert_eq!(config.utilization_at(DayTime::new(5, 0)), 35.0);
        assert_eq!(config.utilization_at(DayTime::new(18, 0)), 35.0);
        assert_eq!(config.utilization_at(DayTime::off_day(12, 0)), 35.0);
    }

    #[test]
    fn test_peak_mid_window() {
        let config = LiquidityConfig::default();
        // 8..=17 is ten hours wide, so the hump peaks at 13:00
        assert_eq!(config.utilization_at(DayTime::new(13, 0)), 75.0);
        assert_eq!(config.utilization_at(DayTime::new(8, 0)), 35.0);
        assert!(config.utilization_at(DayTime::new(10, 0)) < 75.0);
    }

    #[test]
    fn test_total_within_range() {
        let config = LiquidityConfig::default();
        let mut rng = RngManager::new(77);
        for hour in 0..24 {
            let snap = LiquiditySnapshot::build(DayTime::new(hour, 30), &config, &mut rng);
            assert!(snap.total_liquidity >= config.total_floor);
            assert!(snap.total_liquidity <= config.total_floor + config.total_range);
            assert!(snap.available_liquidity <= snap.total_liquidity);
        }
    }

    #[test]
    fn test_peak_above_hundred_rejected() {
        let config = LiquidityConfig {
            utilization_amplitude: 70.0,
            ..LiquidityConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
