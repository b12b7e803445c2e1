//! Inventory and production log records.
//!
//! This module defines the normalized rows produced by the loaders and the
//! derived aged-load row produced by the pipeline.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of material located in a storage bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Material identifier.
    pub material: String,
    /// Material description.
    pub description: String,
    /// Storage type code (e.g. "801").
    pub storage_type: String,
    /// Storage bin identifier (e.g. "UNLOAD01").
    pub storage_bin: String,
    /// Total stock quantity in the bin.
    pub total_stock: Decimal,
    /// Storage unit descriptor.
    pub storage_unit: String,
    /// Date and time of the last stock placement.
    pub last_stock_placement: NaiveDateTime,
    /// Date of the last addition to stock, if recorded.
    pub last_addition: Option<NaiveDate>,
    /// Working hours elapsed since placement, rounded to two decimals.
    ///
    /// `None` until the pipeline has computed it.
    pub hours_elapsed: Option<f64>,
}

impl InventoryRecord {
    /// Whether the record has aged at least `threshold` working hours.
    pub fn is_aged(&self, threshold: f64) -> bool {
        self.hours_elapsed.is_some_and(|hours| hours >= threshold)
    }
}

/// One row of the production log.
///
/// Empty numeric cells are kept as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLogRecord {
    /// Part number, joined against [`InventoryRecord::material`].
    pub part_no: String,
    /// Quantity loaded.
    pub loaded: Option<Decimal>,
    /// Good counter.
    pub good: Option<Decimal>,
    /// Non-confirmed counter.
    pub non_confirmed: Option<Decimal>,
    /// Scrap counter.
    pub scrap: Option<Decimal>,
}

impl ProductionLogRecord {
    /// Whether the row takes part in the loaded-quantity aggregation.
    ///
    /// Only rows whose good, non-confirmed and scrap counters are all zero
    /// are still loaded on the line.
    pub fn is_open(&self) -> bool {
        [self.good, self.non_confirmed, self.scrap]
            .iter()
            .all(|flag| *flag == Some(Decimal::ZERO))
    }
}

/// Loaded quantity summed per part number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedProduction {
    loaded: BTreeMap<String, Decimal>,
}

impl AggregatedProduction {
    /// Adds a loaded quantity to a part number's total.
    ///
    /// A missing quantity still registers the part with a zero total.
    pub fn add(&mut self, part_no: &str, loaded: Option<Decimal>) {
        *self.loaded.entry(part_no.to_string()).or_default() += loaded.unwrap_or_default();
    }

    /// The summed loaded quantity for a part number, if the part was seen.
    pub fn loaded_for(&self, part_no: &str) -> Option<Decimal> {
        self.loaded.get(part_no).copied()
    }

    /// Number of distinct part numbers.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Whether no part numbers were aggregated.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

/// An aged inventory record joined with its loaded quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgedLoadRecord {
    /// The underlying inventory record.
    pub inventory: InventoryRecord,
    /// Summed loaded quantity for the material, `None` if the material has no
    /// open production rows.
    pub loaded: Option<Decimal>,
    /// Total stock minus loaded quantity.
    pub in_station: Decimal,
}

impl AgedLoadRecord {
    /// Joins an inventory record with its loaded quantity.
    ///
    /// # Example
    ///
    /// ```
    /// use inventory_aging::models::{AgedLoadRecord, InventoryRecord};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let record = InventoryRecord {
    ///     material: "4711".to_string(),
    ///     description: "Bracket".to_string(),
    ///     storage_type: "801".to_string(),
    ///     storage_bin: "PAINT-01".to_string(),
    ///     total_stock: Decimal::new(10, 0),
    ///     storage_unit: "SU-1".to_string(),
    ///     last_stock_placement: NaiveDateTime::parse_from_str("2026-01-12 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     last_addition: None,
    ///     hours_elapsed: Some(12.5),
    /// };
    ///
    /// let joined = AgedLoadRecord::join(record, Some(Decimal::new(4, 0)));
    /// assert_eq!(joined.in_station, Decimal::new(6, 0));
    /// ```
    pub fn join(inventory: InventoryRecord, loaded: Option<Decimal>) -> Self {
        let in_station = inventory.total_stock - loaded.unwrap_or_default();
        Self {
            inventory,
            loaded,
            in_station,
        }
    }
}
