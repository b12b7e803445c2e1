//! Configuration for the inventory aging pipeline.
//!
//! Two sources are handled here: the YAML pipeline settings (input and output
//! locations, the 8QI filter) and the `key=value` shift schedule that drives
//! the working calendar.
//!
//! # Example
//!
//! ```no_run
//! use inventory_aging::config::{ConfigLoader, ShiftSchedule};
//!
//! let loader = ConfigLoader::load("./inventory_aging.yaml").unwrap();
//! let schedule = ShiftSchedule::read(&loader.settings().shift_schedule_path);
//! println!("First shift: {:?}", schedule.parameters.first_shift);
//! ```

mod loader;
mod shift_schedule;
mod types;

pub use loader::ConfigLoader;
pub use shift_schedule::{ShiftParameters, ShiftSchedule};
pub use types::{PipelineSettings, ReportNames, StorageFilter};
