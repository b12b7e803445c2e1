//! Working-hours elapsed time.
//!
//! Counts how much of an interval falls inside the shift windows of a
//! [`Calendar`], walking the interval one calendar day at a time.

use chrono::{Duration, NaiveDateTime};

use crate::models::Calendar;

/// Returns the hours between `start` and `end` that fall inside working time.
///
/// Each workday visited instantiates every shift window on that date; an
/// overnight window closes on the following date. The overlap of every
/// window with `[start, end]` is summed exactly and converted to fractional
/// hours once at the end. The walk begins on the day before `start` so that
/// an overnight window opened the previous evening is credited for the part
/// that runs past midnight.
///
/// Returns `Some(0.0)` when `start >= end`, and `None` when a window that
/// overlaps the interval closes past the last representable date.
///
/// # Example
///
/// ```
/// use inventory_aging::calculation::{elapsed_working_hours, round_hours};
/// use inventory_aging::models::{Calendar, ShiftWindow};
/// use chrono::NaiveDateTime;
///
/// let calendar = Calendar::new(vec![ShiftWindow::from_hm(20, 30, 0, 30).unwrap()], [0, 1]);
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // 2026-01-12 is a Monday
/// assert_eq!(elapsed_working_hours(at("2026-01-12 20:00:00"), at("2026-01-13 01:00:00"), &calendar), Some(4.0));
///
/// // Placed at 00:10 Tuesday: the last 20 minutes of Monday's window still count
/// let hours = elapsed_working_hours(at("2026-01-13 00:10:00"), at("2026-01-13 01:00:00"), &calendar).unwrap();
/// assert_eq!(round_hours(hours), 0.33);
/// ```
pub fn elapsed_working_hours(start: NaiveDateTime, end: NaiveDateTime, calendar: &Calendar) -> Option<f64> {
    if start >= end || calendar.windows.is_empty() {
        return Some(0.0);
    }

    let mut total = Duration::zero();
    let mut day = start.date().pred_opt().unwrap_or(start.date());
    let last_day = end.date();

    while day <= last_day {
        if calendar.is_workday(day) {
            for window in &calendar.windows {
                // Windows opening after the interval ends are never credited.
                if end <= day.and_time(window.start) {
                    continue;
                }
                let (opens, closes) = window.on_date(day)?;
                let overlap_start = start.max(opens);
                let overlap_end = end.min(closes);
                if overlap_start < overlap_end {
                    total += overlap_end - overlap_start;
                }
            }
        }

        // last_day is at most NaiveDate::MAX, so no day remains past it.
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Some(duration_hours(total))
}

/// Rounds hours to two decimal places for reporting, ties to even.
///
/// # Example
///
/// ```
/// use inventory_aging::calculation::round_hours;
///
/// assert_eq!(round_hours(1.0 / 3.0), 0.33);
/// assert_eq!(round_hours(4.999), 5.0);
/// assert_eq!(round_hours(0.125), 0.12);
/// ```
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round_ties_even() / 100.0
}

fn duration_hours(duration: Duration) -> f64 {
    let seconds = duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) / 1e9;
    seconds / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::derive_calendar;
    use crate::config::ShiftParameters;
    use crate::models::ShiftWindow;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    /// Both shifts at 8 hours, Monday to Friday.
    fn two_shift_calendar() -> Calendar {
        derive_calendar(&ShiftParameters::default())
    }

    fn second_shift_only() -> Calendar {
        derive_calendar(&ShiftParameters {
            first_shift: Some(false),
            ..Default::default()
        })
    }

    fn working_hours(start: NaiveDateTime, end: NaiveDateTime, calendar: &Calendar) -> f64 {
        elapsed_working_hours(start, end, calendar).unwrap()
    }

    fn assert_hours(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} hours, got {}",
            expected,
            actual
        );
    }

    // 2026-01-12 is a Monday.

    #[test]
    fn test_interval_exactly_one_window() {
        let hours = working_hours(
            make_datetime("2026-01-12", "05:00:00"),
            make_datetime("2026-01-12", "11:00:00"),
            &two_shift_calendar(),
        );
        assert_hours(hours, 6.0);
    }

    #[test]
    fn test_interval_across_lunch_gap_and_early_window() {
        // 04:00-05:00 of the night window, 05:00-11:00, 11:30-13:30
        let hours = working_hours(
            make_datetime("2026-01-12", "04:00:00"),
            make_datetime("2026-01-12", "14:00:00"),
            &two_shift_calendar(),
        );
        assert_hours(hours, 9.0);
    }

    #[test]
    fn test_interval_inside_lunch_gap_is_zero() {
        let hours = working_hours(
            make_datetime("2026-01-12", "11:05:00"),
            make_datetime("2026-01-12", "11:25:00"),
            &two_shift_calendar(),
        );
        assert_hours(hours, 0.0);
    }

    #[test]
    fn test_overnight_window_credited_across_midnight() {
        let calendar = Calendar::new(vec![ShiftWindow::from_hm(20, 30, 0, 30).unwrap()], [0, 1]);
        let hours = working_hours(
            make_datetime("2026-01-12", "20:00:00"),
            make_datetime("2026-01-13", "01:00:00"),
            &calendar,
        );
        // 20:30 Monday to 00:30 Tuesday; 00:30-01:00 is outside the window
        assert_hours(hours, 4.0);
    }

    #[test]
    fn test_full_second_shift_overnight() {
        let hours = working_hours(
            make_datetime("2026-01-12", "20:00:00"),
            make_datetime("2026-01-13", "06:00:00"),
            &second_shift_only(),
        );
        assert_hours(hours, 8.0);
    }

    #[test]
    fn test_start_after_midnight_inside_previous_evening_window() {
        // Monday's 20:30-00:30 window still runs at 00:10 Tuesday
        let hours = working_hours(
            make_datetime("2026-01-13", "00:10:00"),
            make_datetime("2026-01-13", "02:00:00"),
            &second_shift_only(),
        );
        assert_hours(hours, 20.0 / 60.0 + 1.0);
    }

    #[test]
    fn test_weekend_is_skipped() {
        // Friday 20:00 to Monday 06:00: Friday evening window plus Monday night window
        let hours = working_hours(
            make_datetime("2026-01-16", "20:00:00"),
            make_datetime("2026-01-19", "06:00:00"),
            &second_shift_only(),
        );
        assert_hours(hours, 8.0);
    }

    #[test]
    fn test_saturday_counts_only_when_included() {
        let start = make_datetime("2026-01-17", "05:00:00");
        let end = make_datetime("2026-01-17", "13:30:00");
        let first_only = ShiftParameters {
            second_shift: Some(false),
            ..Default::default()
        };
        let with_saturday = ShiftParameters {
            include_saturday: Some(true),
            ..first_only.clone()
        };

        assert_hours(working_hours(start, end, &derive_calendar(&first_only)), 0.0);
        assert_hours(
            working_hours(start, end, &derive_calendar(&with_saturday)),
            8.0,
        );
    }

    #[test]
    fn test_full_week_two_eight_hour_shifts() {
        let hours = working_hours(
            make_datetime("2026-01-12", "00:00:00"),
            make_datetime("2026-01-19", "00:00:00"),
            &two_shift_calendar(),
        );
        assert_hours(hours, 80.0);
    }

    #[test]
    fn test_full_week_two_ten_hour_shifts() {
        let calendar = derive_calendar(&ShiftParameters {
            first_hours: Some(10),
            second_hours: Some(10),
            ..Default::default()
        });
        let hours = working_hours(
            make_datetime("2026-01-12", "00:00:00"),
            make_datetime("2026-01-19", "00:00:00"),
            &calendar,
        );
        assert_hours(hours, 100.0);
    }

    #[test]
    fn test_sunday_only_interval_is_zero() {
        let hours = working_hours(
            make_datetime("2026-01-18", "00:00:00"),
            make_datetime("2026-01-18", "23:59:59"),
            &two_shift_calendar(),
        );
        assert_hours(hours, 0.0);
    }

    #[test]
    fn test_reversed_interval_is_zero() {
        let hours = working_hours(
            make_datetime("2026-01-13", "10:00:00"),
            make_datetime("2026-01-12", "10:00:00"),
            &two_shift_calendar(),
        );
        assert_eq!(hours, 0.0);
    }

    #[test]
    fn test_sub_second_precision_is_kept() {
        let start = make_datetime("2026-01-12", "06:00:00");
        let end = start + Duration::milliseconds(1_800_500);
        let hours = working_hours(start, end, &two_shift_calendar());
        assert_hours(hours, 1_800.5 / 3600.0);
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(0.0), 0.0);
        assert_eq!(round_hours(2.0 / 3.0), 0.67);
        assert_eq!(round_hours(69.996), 70.0);
    }

    #[test]
    fn test_round_hours_ties_to_even() {
        // 450 s and 1350 s sit exactly on a half hundredth
        assert_eq!(round_hours(450.0 / 3600.0), 0.12);
        assert_eq!(round_hours(1350.0 / 3600.0), 0.38);
        assert_eq!(round_hours(-0.125), -0.12);
    }

    fn every_day_second_shift() -> Calendar {
        Calendar::new(
            vec![
                ShiftWindow::from_hm(20, 30, 0, 30).unwrap(),
                ShiftWindow::from_hm(1, 0, 5, 0).unwrap(),
            ],
            0..7,
        )
    }

    #[test]
    fn test_overnight_window_past_last_date_is_none() {
        let day_before = NaiveDate::MAX.pred_opt().unwrap();
        let start = day_before.and_hms_opt(20, 0, 0).unwrap();
        let end = NaiveDate::MAX.and_hms_opt(23, 0, 0).unwrap();

        assert_eq!(elapsed_working_hours(start, end, &every_day_second_shift()), None);
    }

    #[test]
    fn test_interval_ending_before_last_overnight_window_is_counted() {
        // the window opening at 20:30 on the last date is never reached
        let day_before = NaiveDate::MAX.pred_opt().unwrap();
        let start = day_before.and_hms_opt(20, 0, 0).unwrap();
        let end = NaiveDate::MAX.and_hms_opt(6, 0, 0).unwrap();

        assert_hours(working_hours(start, end, &every_day_second_shift()), 8.0);
    }

    fn parameters_strategy() -> impl Strategy<Value = ShiftParameters> {
        (
            any::<bool>(),
            prop::sample::select(vec![8i64, 10, 9]),
            any::<bool>(),
            prop::sample::select(vec![8i64, 10, 12]),
            any::<bool>(),
        )
            .prop_map(
                |(first_shift, first_hours, second_shift, second_hours, include_saturday)| {
                    ShiftParameters {
                        first_shift: Some(first_shift),
                        second_shift: Some(second_shift),
                        include_saturday: Some(include_saturday),
                        first_hours: Some(first_hours),
                        second_hours: Some(second_hours),
                    }
                },
            )
    }

    fn base() -> NaiveDateTime {
        make_datetime("2026-01-05", "00:00:00")
    }

    proptest! {
        #[test]
        fn prop_elapsed_is_bounded_by_interval(
            offset in 0i64..60_000,
            length in 0i64..30_000,
            parameters in parameters_strategy(),
        ) {
            let calendar = derive_calendar(&parameters);
            let start = base() + Duration::minutes(offset);
            let end = start + Duration::minutes(length);
            let hours = working_hours(start, end, &calendar);

            prop_assert!(hours >= 0.0);
            prop_assert!(hours <= length as f64 / 60.0 + 1e-9);
        }

        #[test]
        fn prop_zero_length_interval_is_zero(
            offset in 0i64..60_000,
            parameters in parameters_strategy(),
        ) {
            let calendar = derive_calendar(&parameters);
            let instant = base() + Duration::minutes(offset);
            prop_assert_eq!(working_hours(instant, instant, &calendar), 0.0);
        }

        #[test]
        fn prop_elapsed_is_additive(
            offset in 0i64..60_000,
            first in 0i64..15_000,
            second in 0i64..15_000,
            parameters in parameters_strategy(),
        ) {
            let calendar = derive_calendar(&parameters);
            let start = base() + Duration::minutes(offset);
            let middle = start + Duration::minutes(first);
            let end = middle + Duration::minutes(second);

            let whole = working_hours(start, end, &calendar);
            let parts = working_hours(start, middle, &calendar)
                + working_hours(middle, end, &calendar);
            prop_assert!((whole - parts).abs() < 1e-9, "whole {} != parts {}", whole, parts);
        }

        #[test]
        fn prop_no_windows_is_zero(
            offset in 0i64..60_000,
            length in 0i64..30_000,
            include_saturday in any::<bool>(),
        ) {
            let calendar = derive_calendar(&ShiftParameters {
                first_shift: Some(false),
                second_shift: Some(false),
                include_saturday: Some(include_saturday),
                ..Default::default()
            });
            let start = base() + Duration::minutes(offset);
            let end = start + Duration::minutes(length);
            prop_assert_eq!(working_hours(start, end, &calendar), 0.0);
        }

        #[test]
        fn prop_repeated_computation_is_identical(
            offset in 0i64..60_000,
            length in 0i64..30_000,
            parameters in parameters_strategy(),
        ) {
            let calendar = derive_calendar(&parameters);
            let snapshot = calendar.clone();
            let start = base() + Duration::minutes(offset);
            let end = start + Duration::minutes(length);

            let first = working_hours(start, end, &calendar);
            let second = working_hours(start, end, &calendar);
            prop_assert_eq!(first, second);
            prop_assert_eq!(calendar, snapshot);
        }
    }
}
