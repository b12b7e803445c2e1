//! Calculation logic for the inventory aging pipeline.
//!
//! This module contains the working calendar derivation from shift
//! parameters, the working-hours elapsed-time calculator, the production
//! aggregation and location filters, and the pipeline that ties them
//! together over a loaded inventory snapshot.

mod aging;
mod calendar;
mod elapsed_hours;
mod filters;

pub use aging::AgingPipeline;
pub use calendar::{DEFAULT_SHIFT_HOURS, derive_calendar, work_days, work_shifts};
pub use elapsed_hours::{elapsed_working_hours, round_hours};
pub use filters::{
    AGED_THRESHOLD_HOURS, LOAD_STORAGE_TYPES, UNLOAD_STORAGE_BINS, aged_inventory,
    aged_load_inventory, aged_unload_inventory, aggregate_loaded, load_filter, unload_filter,
};
