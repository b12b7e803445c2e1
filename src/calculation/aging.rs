//! The aging pipeline.
//!
//! Computes working hours for every inventory record against one calendar and
//! one `now` instant, then derives the three aged-inventory outputs.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StorageFilter;
use crate::error::{AgingError, AgingResult};
use crate::models::{AgingReport, Calendar, InventoryRecord, ProductionLogRecord};

use super::elapsed_hours::{elapsed_working_hours, round_hours};
use super::filters::{aged_inventory, aged_load_inventory, aged_unload_inventory, aggregate_loaded};

/// Runs the aging computation for one snapshot of the inputs.
///
/// The calendar is read once when the pipeline is built and shared read-only
/// by every record's computation.
///
/// # Example
///
/// ```
/// use inventory_aging::calculation::{AgingPipeline, derive_calendar};
/// use inventory_aging::config::{ShiftParameters, StorageFilter};
/// use chrono::NaiveDateTime;
///
/// let pipeline = AgingPipeline::new(derive_calendar(&ShiftParameters::default()), StorageFilter::default());
/// let now = NaiveDateTime::parse_from_str("2026-01-16 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let report = pipeline.run(Vec::new(), &[], now).unwrap();
/// assert!(report.aged_load.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AgingPipeline {
    calendar: Calendar,
    aged_8qi: StorageFilter,
}

impl AgingPipeline {
    /// Creates a pipeline over a calendar and the 8QI location filter.
    pub fn new(calendar: Calendar, aged_8qi: StorageFilter) -> Self {
        Self { calendar, aged_8qi }
    }

    /// Returns the calendar used for every record.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Stores the rounded working hours since placement on every record.
    ///
    /// Records are computed in parallel; each reads only itself and the
    /// shared calendar, so results do not depend on scheduling.
    pub fn compute_hours(&self, records: &mut [InventoryRecord], now: NaiveDateTime) -> AgingResult<()> {
        records.par_iter_mut().try_for_each(|record| {
            let hours = self.hours_for(record, now)?;
            record.hours_elapsed = Some(hours);
            Ok(())
        })
    }

    fn hours_for(&self, record: &InventoryRecord, now: NaiveDateTime) -> AgingResult<f64> {
        let hours = elapsed_working_hours(record.last_stock_placement, now, &self.calendar).ok_or_else(|| {
            AgingError::Computation {
                material: record.material.clone(),
                message: format!(
                    "shift window between {} and {} runs past the last representable date",
                    record.last_stock_placement, now
                ),
            }
        })?;

        debug!(
            material = %record.material,
            storage_bin = %record.storage_bin,
            hours_elapsed = hours,
            "Computed elapsed hours"
        );
        Ok(round_hours(hours))
    }

    /// Runs the full pipeline for one snapshot.
    ///
    /// `now` is captured once by the caller and used for every record.
    pub fn run(
        &self,
        records: Vec<InventoryRecord>,
        production: &[ProductionLogRecord],
        now: NaiveDateTime,
    ) -> AgingResult<AgingReport> {
        self.run_with_id(Uuid::new_v4(), records, production, now)
    }

    /// Runs the pipeline, tagging its log lines with the caller's `run_id`.
    pub fn run_with_id(
        &self,
        run_id: Uuid,
        mut records: Vec<InventoryRecord>,
        production: &[ProductionLogRecord],
        now: NaiveDateTime,
    ) -> AgingResult<AgingReport> {
        info!(
            run_id = %run_id,
            records = records.len(),
            production_rows = production.len(),
            now = %now,
            "Starting inventory aging"
        );

        self.compute_hours(&mut records, now)?;

        let aggregated = aggregate_loaded(production);
        let report = AgingReport {
            aged_load: aged_load_inventory(&records, &aggregated),
            aged_unload: aged_unload_inventory(&records),
            aged_8qi: aged_inventory(&records, &self.aged_8qi),
        };

        info!(
            run_id = %run_id,
            part_numbers = aggregated.len(),
            aged_load = report.aged_load.len(),
            aged_unload = report.aged_unload.len(),
            aged_8qi = report.aged_8qi.len(),
            "Inventory aging complete"
        );
        Ok(report)
    }
}
