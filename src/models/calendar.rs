//! Shift windows and the working calendar.
//!
//! A [`Calendar`] is a set of time-of-day windows applied uniformly to every
//! date, plus the weekdays on which those windows are worked.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A working window within a calendar day.
///
/// If `end` is earlier than `start` the window spans midnight and ends on the
/// following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Time of day the window opens.
    pub start: NaiveTime,
    /// Time of day the window closes.
    pub end: NaiveTime,
}

impl ShiftWindow {
    /// Builds a window from hour and minute components.
    ///
    /// Returns `None` if any component is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use inventory_aging::models::ShiftWindow;
    ///
    /// let evening = ShiftWindow::from_hm(20, 30, 0, 30).unwrap();
    /// assert!(evening.is_overnight());
    /// assert_eq!(evening.as_tuple(), (20, 30, 0, 30));
    /// ```
    pub fn from_hm(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start_hour, start_minute, 0)?,
            end: NaiveTime::from_hms_opt(end_hour, end_minute, 0)?,
        })
    }

    /// Whether the window closes on the calendar day after it opens.
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// The window as `(start_hour, start_minute, end_hour, end_minute)`.
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (
            self.start.hour(),
            self.start.minute(),
            self.end.hour(),
            self.end.minute(),
        )
    }

    /// Places the window on a concrete date.
    ///
    /// Overnight windows close on the following date. Returns `None` only when
    /// the following date is not representable.
    pub fn on_date(&self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let opens = date.and_time(self.start);
        let mut closes = date.and_time(self.end);
        if closes < opens {
            closes = closes.checked_add_signed(Duration::days(1))?;
        }
        Some((opens, closes))
    }
}

/// Weekdays worked when Saturday is not included, Monday=0.
pub const DEFAULT_WORKDAYS: [u32; 5] = [0, 1, 2, 3, 4];

/// Index of Saturday in the Monday=0 numbering.
pub const SATURDAY: u32 = 5;

/// The working calendar evaluated by the elapsed-hours calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Windows applied to every workday.
    pub windows: Vec<ShiftWindow>,
    /// Worked weekdays, Monday=0 through Sunday=6.
    pub workdays: BTreeSet<u32>,
}

impl Calendar {
    /// Creates a calendar from windows and weekday indices.
    pub fn new(windows: Vec<ShiftWindow>, workdays: impl IntoIterator<Item = u32>) -> Self {
        Self {
            windows,
            workdays: workdays.into_iter().collect(),
        }
    }

    /// Whether the given date falls on a worked weekday.
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        self.workdays
            .contains(&date.weekday().num_days_from_monday())
    }
}

impl Default for Calendar {
    /// No windows, Monday through Friday.
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_WORKDAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_day_window_stays_on_date() {
        let window = ShiftWindow::from_hm(5, 0, 11, 0).unwrap();
        let (opens, closes) = window.on_date(make_date("2026-01-12")).unwrap();

        assert!(!window.is_overnight());
        assert_eq!(opens, make_datetime("2026-01-12", "05:00:00"));
        assert_eq!(closes, make_datetime("2026-01-12", "11:00:00"));
    }

    #[test]
    fn test_overnight_window_closes_next_day() {
        let window = ShiftWindow::from_hm(20, 30, 0, 30).unwrap();
        let (opens, closes) = window.on_date(make_date("2026-01-12")).unwrap();

        assert_eq!(opens, make_datetime("2026-01-12", "20:30:00"));
        assert_eq!(closes, make_datetime("2026-01-13", "00:30:00"));
    }

    #[test]
    fn test_from_hm_rejects_out_of_range() {
        assert!(ShiftWindow::from_hm(24, 0, 1, 0).is_none());
        assert!(ShiftWindow::from_hm(1, 60, 2, 0).is_none());
    }

    #[test]
    fn test_default_calendar_is_weekdays_without_windows() {
        let calendar = Calendar::default();

        assert!(calendar.windows.is_empty());
        // 2026-01-16 is a Friday, 2026-01-17 a Saturday
        assert!(calendar.is_workday(make_date("2026-01-16")));
        assert!(!calendar.is_workday(make_date("2026-01-17")));
        assert!(!calendar.is_workday(make_date("2026-01-18")));
    }

    #[test]
    fn test_calendar_serialization() {
        let calendar = Calendar::new(vec![ShiftWindow::from_hm(1, 0, 5, 0).unwrap()], [0, 5]);

        let json = serde_json::to_string(&calendar).unwrap();
        let deserialized: Calendar = serde_json::from_str(&json).unwrap();
        assert_eq!(calendar, deserialized);
    }
}
