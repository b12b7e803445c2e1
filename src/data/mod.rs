//! Input loaders.
//!
//! The inventory workbook and the production log are read from disk and
//! normalized into record types before any computation runs. Both inputs
//! are required; a missing or malformed file aborts the run.

mod cells;
mod inventory;
mod production_log;

pub use cells::{cell_date, cell_decimal, cell_text, cell_time, excel_serial_to_datetime, parse_decimal};
pub use inventory::{columns, inventory_from_range, load_inventory};
pub use production_log::{decode_utf16, load_production_log, parse_production_log};

use crate::config::PipelineSettings;
use crate::error::AgingResult;
use crate::models::{InventoryRecord, ProductionLogRecord};

/// Both normalized inputs of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputData {
    /// Inventory snapshot, rows without a placement date removed.
    pub inventory: Vec<InventoryRecord>,
    /// Production log rows.
    pub production: Vec<ProductionLogRecord>,
}

/// Loads both inputs named in the settings.
///
/// # Errors
///
/// Returns [`crate::error::AgingError::DataUnavailable`] for the first input
/// that cannot be loaded.
pub fn load_inputs(settings: &PipelineSettings) -> AgingResult<InputData> {
    let inventory = load_inventory(&settings.inventory_path)?;
    let production = load_production_log(&settings.production_log_path)?;
    Ok(InputData {
        inventory,
        production,
    })
}
