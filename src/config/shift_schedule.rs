//! Shift schedule reader.
//!
//! The schedule is a plain `key=value` text file:
//!
//! ```text
//! # shifts worked this week
//! first_shift=true
//! first_hours=10
//! second_shift=false
//! include_saturday=1
//! ```
//!
//! Parsing never fails. Malformed lines are skipped and reported as
//! [`AgingError::ConfigLineParse`] warnings, and an unreadable file yields
//! empty parameters with a single [`AgingError::ConfigRead`] warning.

use std::fs;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::AgingError;

/// Raw shift parameters as written in the schedule.
///
/// Absent keys stay `None`; defaults are applied when the calendar is
/// derived, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftParameters {
    /// Whether the first shift is worked.
    pub first_shift: Option<bool>,
    /// Whether the second shift is worked.
    pub second_shift: Option<bool>,
    /// Whether Saturday is a workday.
    pub include_saturday: Option<bool>,
    /// Length of the first shift in hours.
    pub first_hours: Option<i64>,
    /// Length of the second shift in hours.
    pub second_hours: Option<i64>,
}

impl ShiftParameters {
    /// Whether no key was recognized.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A parsed shift schedule together with the problems found while reading it.
#[derive(Debug, Default)]
pub struct ShiftSchedule {
    /// The recognized parameters.
    pub parameters: ShiftParameters,
    /// Lines that were skipped, or the read failure that emptied the schedule.
    pub warnings: Vec<AgingError>,
}

impl ShiftSchedule {
    /// Reads and parses the schedule file at `path`.
    ///
    /// A missing or unreadable file is logged and degrades to empty
    /// parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use inventory_aging::config::ShiftSchedule;
    ///
    /// let schedule = ShiftSchedule::read("/nonexistent/shift_schedules.txt");
    /// assert!(schedule.parameters.is_empty());
    /// assert_eq!(schedule.warnings.len(), 1);
    /// ```
    pub fn read<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) => {
                let failure = AgingError::ConfigRead {
                    path: path.display().to_string(),
                    message: err.to_string(),
                };
                error!(error = %failure, "Shift schedule unavailable, using empty parameters");
                Self {
                    parameters: ShiftParameters::default(),
                    warnings: vec![failure],
                }
            }
        }
    }

    /// Parses schedule text.
    ///
    /// Blank lines and lines starting with `#` are ignored. Unknown keys are
    /// ignored. A line without exactly one `=`, or a non-integer hours value,
    /// is skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let mut schedule = Self::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(message) = schedule.apply_line(line) {
                let warning = AgingError::ConfigLineParse {
                    line_number: index + 1,
                    line: line.to_string(),
                    message,
                };
                warn!("{}", warning);
                schedule.warnings.push(warning);
            }
        }

        debug!(parameters = ?schedule.parameters, "Parsed shift schedule");
        schedule
    }

    fn apply_line(&mut self, line: &str) -> Result<(), String> {
        let mut parts = line.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key.trim(), value.trim()),
            _ => return Err("expected exactly one '=' separator".to_string()),
        };

        let parameters = &mut self.parameters;
        match key {
            "first_shift" => parameters.first_shift = Some(parse_flag(value)),
            "second_shift" => parameters.second_shift = Some(parse_flag(value)),
            "include_saturday" => parameters.include_saturday = Some(parse_flag(value)),
            "first_hours" => parameters.first_hours = Some(parse_hours(value)?),
            "second_hours" => parameters.second_hours = Some(parse_hours(value)?),
            _ => {}
        }
        Ok(())
    }
}

/// "true" and "1" (case-insensitive) are true, anything else is false.
fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1"
}

fn parse_hours(value: &str) -> Result<i64, String> {
    value
        .parse::<i64>()
        .map_err(|e| format!("expected an integer hours value: {}", e))
}
