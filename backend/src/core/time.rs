//! Time-of-day handling for the emulated business day
//!
//! Builders never see timestamps. The controller reduces the clock reading
//! to a [`DayTime`] (hour, minute and whether the date is a business day)
//! and everything downstream is a function of that slot.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// A minute-resolution slot within a calendar day
///
/// # Example
/// ```
/// use business_day_sim_core_rs::DayTime;
///
/// let t = DayTime::new(8, 30);
/// assert_eq!(t.decimal_hour(), 8.5);
/// assert!(t.business_day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTime {
    /// Hour of day, 0..=23
    pub hour: u32,
    /// Minute of hour, 0..=59
    pub minute: u32,
    /// False on days with no settlement activity
    pub business_day: bool,
}

impl DayTime {
    /// Slot on a business day
    pub fn new(hour: u32, minute: u32) -> Self {
        debug_assert!(hour < 24, "hour out of range: {}", hour);
        debug_assert!(minute < 60, "minute out of range: {}", minute);
        Self {
            hour,
            minute,
            business_day: true,
        }
    }

    /// Slot on a non-business day (every rail count is zero)
    pub fn off_day(hour: u32, minute: u32) -> Self {
        Self {
            business_day: false,
            ..Self::new(hour, minute)
        }
    }

    /// Reduce a wall-clock reading to a slot.
    ///
    /// Saturday and Sunday are non-business days unless `weekend_activity`
    /// is set.
    pub fn from_datetime(t: &NaiveDateTime, weekend_activity: bool) -> Self {
        let weekend = matches!(t.weekday(), Weekday::Sat | Weekday::Sun);
        Self {
            hour: t.hour(),
            minute: t.minute(),
            business_day: weekend_activity || !weekend,
        }
    }

    /// `hour + minute / 60`
    pub fn decimal_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

/// Format a timestamp as 24-hour `"HH:MM"`
///
/// # Example
/// ```
/// use business_day_sim_core_rs::core::time::format_time;
/// use chrono::NaiveDate;
///
/// let t = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(7, 5, 59).unwrap();
/// assert_eq!(format_time(&t), "07:05");
/// ```
pub fn format_time(t: &NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}
