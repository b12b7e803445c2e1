//! Aged inventory filters and the production join.
//!
//! Each output is an independent view over the same computed records; a
//! record may appear in more than one output.

use rust_decimal::Decimal;

use crate::config::StorageFilter;
use crate::models::{AgedLoadRecord, AggregatedProduction, InventoryRecord, ProductionLogRecord};

/// Working hours after which material counts as aged.
pub const AGED_THRESHOLD_HOURS: f64 = 4.0;

/// Storage types of the paint load stations.
pub const LOAD_STORAGE_TYPES: [&str; 3] = ["800", "801", "802"];

/// Storage bins of the unload area.
pub const UNLOAD_STORAGE_BINS: [&str; 6] = [
    "UNLOAD01", "UNLOAD02", "UNLOAD03", "UNLOAD04", "UNLOAD05", "LGUNLOAD",
];

/// The location filter of the aged load report.
pub fn load_filter() -> StorageFilter {
    StorageFilter::storage_types(LOAD_STORAGE_TYPES)
}

/// The location filter of the aged unload report.
pub fn unload_filter() -> StorageFilter {
    StorageFilter::storage_bins(UNLOAD_STORAGE_BINS)
}

/// Sums the loaded quantity per part number over open production rows.
///
/// Rows with any non-zero (or missing) good, non-confirmed or scrap counter
/// are ignored regardless of their loaded quantity.
pub fn aggregate_loaded(rows: &[ProductionLogRecord]) -> AggregatedProduction {
    let mut aggregated = AggregatedProduction::default();
    for row in rows.iter().filter(|row| row.is_open()) {
        aggregated.add(&row.part_no, row.loaded);
    }
    aggregated
}

/// Returns the records matching `filter` that have aged past the threshold.
///
/// Input order is preserved.
pub fn aged_inventory(records: &[InventoryRecord], filter: &StorageFilter) -> Vec<InventoryRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record) && record.is_aged(AGED_THRESHOLD_HOURS))
        .cloned()
        .collect()
}

/// Builds the aged load report.
///
/// Aged records at the load stations are left-joined with the loaded
/// quantity of their material; rows with nothing left in station are
/// dropped.
pub fn aged_load_inventory(
    records: &[InventoryRecord],
    production: &AggregatedProduction,
) -> Vec<AgedLoadRecord> {
    aged_inventory(records, &load_filter())
        .into_iter()
        .map(|record| {
            let loaded = production.loaded_for(&record.material);
            AgedLoadRecord::join(record, loaded)
        })
        .filter(|row| row.in_station != Decimal::ZERO)
        .collect()
}

/// Builds the aged unload report.
pub fn aged_unload_inventory(records: &[InventoryRecord]) -> Vec<InventoryRecord> {
    aged_inventory(records, &unload_filter())
}
