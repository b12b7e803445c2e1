//! Working calendar derivation.
//!
//! Turns raw [`ShiftParameters`] into the windows and workdays evaluated by
//! the elapsed-hours calculator. Defaults are applied here: a missing shift
//! flag means the shift is worked, missing hours mean 8.

use std::collections::BTreeSet;

use crate::config::ShiftParameters;
use crate::models::{Calendar, DEFAULT_WORKDAYS, SATURDAY, ShiftWindow};

/// Hours assumed when a shift's length is not configured.
pub const DEFAULT_SHIFT_HOURS: i64 = 8;

type WindowSpec = (u32, u32, u32, u32);

const FIRST_SHIFT_8H: &[WindowSpec] = &[(5, 0, 11, 0), (11, 30, 13, 30)];
const FIRST_SHIFT_10H: &[WindowSpec] = &[(5, 0, 11, 0), (11, 30, 15, 30)];
const SECOND_SHIFT_8H: &[WindowSpec] = &[(20, 30, 0, 30), (1, 0, 5, 0)];
const SECOND_SHIFT_10H: &[WindowSpec] = &[(18, 30, 0, 30), (1, 0, 5, 0)];

fn windows(specs: &[WindowSpec]) -> impl Iterator<Item = ShiftWindow> + '_ {
    specs
        .iter()
        .filter_map(|&(sh, sm, eh, em)| ShiftWindow::from_hm(sh, sm, eh, em))
}

/// Returns the shift windows worked per day.
///
/// Shift lengths other than 8 or 10 hours contribute no windows.
///
/// # Example
///
/// ```
/// use inventory_aging::calculation::work_shifts;
/// use inventory_aging::config::ShiftParameters;
///
/// let parameters = ShiftParameters {
///     first_shift: Some(true),
///     first_hours: Some(8),
///     second_shift: Some(false),
///     ..Default::default()
/// };
/// let tuples: Vec<_> = work_shifts(&parameters).iter().map(|w| w.as_tuple()).collect();
/// assert_eq!(tuples, vec![(5, 0, 11, 0), (11, 30, 13, 30)]);
/// ```
pub fn work_shifts(parameters: &ShiftParameters) -> Vec<ShiftWindow> {
    let mut shifts = Vec::new();

    if parameters.first_shift.unwrap_or(true) {
        match parameters.first_hours.unwrap_or(DEFAULT_SHIFT_HOURS) {
            8 => shifts.extend(windows(FIRST_SHIFT_8H)),
            10 => shifts.extend(windows(FIRST_SHIFT_10H)),
            _ => {}
        }
    }

    if parameters.second_shift.unwrap_or(true) {
        match parameters.second_hours.unwrap_or(DEFAULT_SHIFT_HOURS) {
            8 => shifts.extend(windows(SECOND_SHIFT_8H)),
            10 => shifts.extend(windows(SECOND_SHIFT_10H)),
            _ => {}
        }
    }

    shifts
}

/// Returns the worked weekdays, Monday=0. Sunday is never worked.
pub fn work_days(parameters: &ShiftParameters) -> BTreeSet<u32> {
    let mut days: BTreeSet<u32> = DEFAULT_WORKDAYS.into_iter().collect();
    if parameters.include_saturday.unwrap_or(false) {
        days.insert(SATURDAY);
    }
    days
}

/// Derives the full working calendar from shift parameters.
pub fn derive_calendar(parameters: &ShiftParameters) -> Calendar {
    Calendar {
        windows: work_shifts(parameters),
        workdays: work_days(parameters),
    }
}
