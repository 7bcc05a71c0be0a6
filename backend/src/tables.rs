//! Distribution tables
//!
//! Static per-rail configuration: a cumulative transaction-count table with
//! one entry per business-hour slot, and the category splits used to break
//! totals down (by currency on the RTGS rail, by instrument class on the CSD
//! rail).
//!
//! At construction each rail also gets a set of derived hourly series for
//! charting. Every series is the cumulative table scaled by a factor and
//! jittered once per slot, so each category keeps its own fixed shape for
//! the life of the process. Ticks never touch these series.

use crate::error::EngineError;
use crate::pattern::jitter_series;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of slots in the built-in tables
pub const TABLE_SLOTS: usize = 60;

/// Tolerance when checking that a category split sums to 1.0
pub const SPLIT_TOLERANCE: f64 = 1e-6;

/// Built-in cumulative RTGS transaction counts (slot 0 = 08:00)
pub const DEFAULT_RTGS_CUMULATIVE: [i64; TABLE_SLOTS] = [
    1_240, 3_100, 5_510, 8_140, 10_290, 12_580, 15_120, 17_330, 19_050, 19_980,
    19_992, 20_004, 20_022, 20_034, 20_046, 20_064, 20_076, 20_088, 20_106, 20_118,
    20_130, 20_148, 20_160, 20_172, 20_190, 20_202, 20_214, 20_232, 20_244, 20_256,
    20_274, 20_286, 20_298, 20_316, 20_328, 20_340, 20_358, 20_370, 20_382, 20_400,
    20_412, 20_424, 20_442, 20_454, 20_466, 20_484, 20_496, 20_508, 20_526, 20_538,
    20_550, 20_568, 20_580, 20_592, 20_610, 20_622, 20_634, 20_652, 20_664, 20_676,
];

/// Built-in cumulative CSD settlement counts (slot 0 = 09:00)
pub const DEFAULT_CSD_CUMULATIVE: [i64; TABLE_SLOTS] = [
    640, 1_550, 2_630, 3_490, 4_430, 5_550, 6_270, 6_700, 6_706, 6_710,
    6_716, 6_720, 6_726, 6_730, 6_736, 6_740, 6_746, 6_750, 6_756, 6_760,
    6_766, 6_770, 6_776, 6_780, 6_786, 6_790, 6_796, 6_800, 6_806, 6_810,
    6_816, 6_820, 6_826, 6_830, 6_836, 6_840, 6_846, 6_850, 6_856, 6_860,
    6_866, 6_870, 6_876, 6_880, 6_886, 6_890, 6_896, 6_900, 6_906, 6_910,
    6_916, 6_920, 6_926, 6_930, 6_936, 6_940, 6_946, 6_950, 6_956, 6_960,
];

/// Default RTGS split by settlement currency
pub fn default_currency_split() -> BTreeMap<String, f64> {
    [("USD", 0.45), ("EUR", 0.30), ("GBP", 0.12), ("JPY", 0.08), ("OTHER", 0.05)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Default CSD split by security class
pub fn default_instrument_split() -> BTreeMap<String, f64> {
    [
        ("government_bonds", 0.45),
        ("corporate_bonds", 0.25),
        ("equities", 0.20),
        ("repo", 0.10),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Inclusive range of hours during which a rail is active
///
/// `8..=17` means the window covers 08:00 through 17:59.
///
/// # Example
/// ```
/// use business_day_sim_core_rs::BusinessWindow;
///
/// let w = BusinessWindow::new(8, 17);
/// assert!(w.contains(17));
/// assert!(!w.contains(18));
/// assert_eq!(w.slot_index(20, 60), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl BusinessWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }

    /// Number of hour slots the window spans
    pub fn slots(&self) -> usize {
        (self.end_hour.saturating_sub(self.start_hour) + 1) as usize
    }

    /// Width in decimal hours (17:59 still lies inside an `8..=17` window)
    pub fn width_hours(&self) -> f64 {
        self.slots() as f64
    }

    /// Table index for `hour`, clamped to `[0, len - 1]`
    pub fn slot_index(&self, hour: u32, len: usize) -> usize {
        let offset = hour as i64 - self.start_hour as i64;
        offset.clamp(0, len.saturating_sub(1) as i64) as usize
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.start_hour > self.end_hour || self.end_hour > 23 {
            return Err(EngineError::InvalidWindow {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }
}

/// Check a cumulative table: non-negative, non-decreasing, long enough for
/// its window.
pub fn validate_cumulative(
    name: &str,
    cumulative: &[i64],
    window: &BusinessWindow,
) -> Result<(), EngineError> {
    if cumulative.len() < window.slots() {
        return Err(EngineError::TableTooShort {
            table: name.to_string(),
            len: cumulative.len(),
            required: window.slots(),
        });
    }

    for (index, &value) in cumulative.iter().enumerate() {
        if value < 0 {
            return Err(EngineError::NegativeCount {
                table: name.to_string(),
                index,
                value,
            });
        }
    }

    if let Some(index) = cumulative.windows(2).position(|w| w[1] < w[0]) {
        return Err(EngineError::NonMonotonicTable {
            table: name.to_string(),
            index: index + 1,
            previous: cumulative[index],
            current: cumulative[index + 1],
        });
    }

    Ok(())
}

/// Check that every share is non-negative and the shares sum to 1.0
pub fn validate_split(name: &str, split: &BTreeMap<String, f64>) -> Result<(), EngineError> {
    for (label, &share) in split {
        if !share.is_finite() || share < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: format!("{}.{}", name, label),
                value: share,
            });
        }
    }

    let sum: f64 = split.values().sum();
    if (sum - 1.0).abs() > SPLIT_TOLERANCE {
        return Err(EngineError::SplitSumMismatch {
            table: name.to_string(),
            sum,
        });
    }
    Ok(())
}

/// Cumulative table plus its derived chart series for one rail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailTables {
    /// Raw cumulative counts, as configured
    pub cumulative: Vec<i64>,
    /// Per-category share of the cumulative counts, jittered per slot
    pub categories: BTreeMap<String, Vec<i64>>,
    /// Cumulative counts times the average transaction value, jittered per slot
    pub value_series: Vec<i64>,
}

impl RailTables {
    /// Derive the chart series for one rail.
    ///
    /// Consumes one draw per slot per series from `rng`, in category-label
    /// order followed by the value series.
    pub fn build(
        cumulative: &[i64],
        split: &BTreeMap<String, f64>,
        average_value: f64,
        variance: f64,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let categories = split
            .iter()
            .map(|(label, &share)| (label.clone(), jitter_series(cumulative, share, variance, &mut *rng)))
            .collect();
        let value_series = jitter_series(cumulative, average_value, variance, rng);

        Self {
            cumulative: cumulative.to_vec(),
            categories,
            value_series,
        }
    }
}

/// Chart tables for both rails, read-only after construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionTables {
    pub rtgs: RailTables,
    pub csd: RailTables,
}
