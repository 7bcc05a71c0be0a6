//! Pattern generator
//!
//! Pure functions that turn a cumulative per-hour table into "activity this
//! hour" and interpolate that activity across the minutes of the hour.

use crate::rng::RandomSource;
use crate::tables::BusinessWindow;

/// New activity during `hour`, derived from a cumulative table.
///
/// Returns 0 on a non-business day or outside the window. Otherwise the
/// difference between the slot for `hour` and the slot before it (slot 0
/// is measured from zero). The slot index is clamped to the table bounds.
///
/// # Example
/// ```
/// use business_day_sim_core_rs::{pattern::increment_for_hour, BusinessWindow};
///
/// let window = BusinessWindow::new(8, 17);
/// let table = [100, 180, 300, 300, 310, 400, 420, 500, 560, 600];
/// assert_eq!(increment_for_hour(8, &table, &window, true), 100);
/// assert_eq!(increment_for_hour(9, &table, &window, true), 80);
/// assert_eq!(increment_for_hour(7, &table, &window, true), 0);
/// assert_eq!(increment_for_hour(9, &table, &window, false), 0);
/// ```
pub fn increment_for_hour(
    hour: u32,
    cumulative: &[i64],
    window: &BusinessWindow,
    business_day: bool,
) -> i64 {
    if !business_day || !window.contains(hour) || cumulative.is_empty() {
        return 0;
    }

    let index = window.slot_index(hour, cumulative.len());
    let previous = if index > 0 { cumulative[index - 1] } else { 0 };
    cumulative[index] - previous
}

/// Share of this hour's increment reached by `minute`, rounded.
///
/// Linear across the hour: 0 at minute 0, `increment * 59/60` at minute 59.
pub fn progress_within_hour(
    hour: u32,
    minute: u32,
    cumulative: &[i64],
    window: &BusinessWindow,
    business_day: bool,
) -> i64 {
    debug_assert!(minute < 60, "minute out of range: {}", minute);
    let increment = increment_for_hour(hour, cumulative, window, business_day);
    (increment as f64 * (minute as f64 / 60.0)).round() as i64
}

/// Cumulative count at the slot for `hour`, or 0 outside the window
pub fn cumulative_at(
    hour: u32,
    cumulative: &[i64],
    window: &BusinessWindow,
    business_day: bool,
) -> i64 {
    if !business_day || !window.contains(hour) || cumulative.is_empty() {
        return 0;
    }
    cumulative[window.slot_index(hour, cumulative.len())]
}

/// Scale `base` by `factor` and perturb each element by a uniform factor in
/// `[1 - variance, 1 + variance)`.
///
/// One draw per element. Zero variance yields an exact scaled copy.
pub fn jitter_series(
    base: &[i64],
    factor: f64,
    variance: f64,
    rng: &mut dyn RandomSource,
) -> Vec<i64> {
    base.iter()
        .map(|&v| {
            let scaled = v as f64 * factor * rng.jitter(variance);
            scaled.round().max(0.0) as i64
        })
        .collect()
}
