//! Inventory workbook loader.
//!
//! Reads the first worksheet of the warehouse inventory export, locates the
//! required columns by header name and normalizes every row into an
//! [`InventoryRecord`].

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::{debug, info};

use crate::error::{AgingError, AgingResult};
use crate::models::InventoryRecord;

use super::cells::{cell_date, cell_decimal, cell_text, cell_time, is_blank};

/// Inventory export header names.
pub mod columns {
    /// Material identifier.
    pub const MATERIAL: &str = "Material";
    /// Material description.
    pub const DESCRIPTION: &str = "Material Description";
    /// Storage type code.
    pub const STORAGE_TYPE: &str = "Storage Type";
    /// Storage bin.
    pub const STORAGE_BIN: &str = "Storage Bin";
    /// Total stock quantity.
    pub const TOTAL_STOCK: &str = "Total Stock";
    /// Storage unit.
    pub const STORAGE_UNIT: &str = "Storage Unit";
    /// Date of the last stock placement.
    pub const LAST_PLACEMENT: &str = "Last stock placement";
    /// Time of the last stock placement.
    pub const TIME: &str = "Time";
    /// Date of the last addition to stock.
    pub const LAST_ADDITION: &str = "Last addtn to stock";

    /// Every column the loader requires.
    pub const REQUIRED: [&str; 9] = [
        MATERIAL,
        DESCRIPTION,
        STORAGE_TYPE,
        STORAGE_BIN,
        TOTAL_STOCK,
        STORAGE_UNIT,
        LAST_PLACEMENT,
        TIME,
        LAST_ADDITION,
    ];
}

static EMPTY: Data = Data::Empty;

/// Loads and normalizes the inventory workbook at `path`.
///
/// # Errors
///
/// Returns [`AgingError::DataUnavailable`] if the file cannot be opened,
/// has no worksheet, lacks a required column, or contains a row whose
/// placement date, time or stock cannot be parsed.
pub fn load_inventory<P: AsRef<Path>>(path: P) -> AgingResult<Vec<InventoryRecord>> {
    let path = path.as_ref();
    let unavailable = |message: String| AgingError::DataUnavailable {
        path: path.display().to_string(),
        message,
    };

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| unavailable(e.to_string()))?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unavailable("workbook contains no worksheet".to_string()))?
        .map_err(|e| unavailable(e.to_string()))?;

    let records = inventory_from_range(&sheet).map_err(unavailable)?;
    info!(
        path = %path.display(),
        records = records.len(),
        "Loaded inventory export"
    );
    Ok(records)
}

/// Normalizes an inventory worksheet.
///
/// The first row holds the headers. Rows without a last stock placement
/// date are dropped; date and time are combined into one placement
/// timestamp.
pub fn inventory_from_range(sheet: &Range<Data>) -> Result<Vec<InventoryRecord>, String> {
    let mut rows = sheet.rows();
    let header_row = rows.next().ok_or_else(|| "worksheet is empty".to_string())?;
    let header_to_index: HashMap<String, usize> = header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| (cell_text(cell), index))
        .collect();

    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|name| !header_to_index.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing required columns: {}", missing.join(", ")));
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (offset, row) in rows.enumerate() {
        // Header is sheet row 1.
        let row_number = offset + 2;
        let cell = |name: &str| {
            header_to_index
                .get(name)
                .and_then(|index| row.get(*index))
                .unwrap_or(&EMPTY)
        };

        if is_blank(cell(columns::LAST_PLACEMENT)) {
            dropped += 1;
            continue;
        }

        let record = normalize_row(&cell)
            .map_err(|message| format!("row {}: {}", row_number, message))?;
        records.push(record);
    }

    if dropped > 0 {
        debug!(dropped, "Dropped inventory rows without a last stock placement");
    }
    Ok(records)
}

fn normalize_row<'a, F>(cell: &F) -> Result<InventoryRecord, String>
where
    F: Fn(&str) -> &'a Data,
{
    let placement_date = cell_date(cell(columns::LAST_PLACEMENT))
        .map_err(|e| format!("{}: {}", columns::LAST_PLACEMENT, e))?
        .ok_or_else(|| format!("{} is empty", columns::LAST_PLACEMENT))?;
    let placement_time = cell_time(cell(columns::TIME))
        .map_err(|e| format!("{}: {}", columns::TIME, e))?
        .ok_or_else(|| format!("{} is empty", columns::TIME))?;
    let total_stock = cell_decimal(cell(columns::TOTAL_STOCK))
        .map_err(|e| format!("{}: {}", columns::TOTAL_STOCK, e))?
        .ok_or_else(|| format!("{} is empty", columns::TOTAL_STOCK))?;
    let last_addition = cell_date(cell(columns::LAST_ADDITION))
        .map_err(|e| format!("{}: {}", columns::LAST_ADDITION, e))?;

    Ok(InventoryRecord {
        material: cell_text(cell(columns::MATERIAL)),
        description: cell_text(cell(columns::DESCRIPTION)),
        storage_type: cell_text(cell(columns::STORAGE_TYPE)),
        storage_bin: cell_text(cell(columns::STORAGE_BIN)),
        total_stock,
        storage_unit: cell_text(cell(columns::STORAGE_UNIT)),
        last_stock_placement: placement_date.and_time(placement_time),
        last_addition,
        hours_elapsed: None,
    })
}
