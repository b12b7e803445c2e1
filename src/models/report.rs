//! Report tables handed to output sinks.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::inventory::{AgedLoadRecord, InventoryRecord};

/// A single typed cell of a report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Free text.
    Text(String),
    /// An exact quantity.
    Decimal(Decimal),
    /// A floating point measure such as elapsed hours.
    Number(f64),
    /// A calendar date.
    Date(NaiveDate),
    /// A date and time.
    DateTime(NaiveDateTime),
    /// No value.
    Empty,
}

/// A row type that can be rendered into a [`ReportTable`].
pub trait TableRow {
    /// Column headers, in output order.
    const HEADERS: &'static [&'static str];

    /// The row's cells, one per header.
    fn cells(&self) -> Vec<Cell>;
}

const BASE_HEADERS: &[&str] = &[
    "Material",
    "Material Description",
    "Storage Type",
    "Storage Bin",
    "Total Stock",
    "Storage Unit",
    "last_stock_placement",
    "Last addtn to stock",
    "hours_elapsed",
];

const LOAD_HEADERS: &[&str] = &[
    "Material",
    "Material Description",
    "Storage Type",
    "Storage Bin",
    "Total Stock",
    "LOADED",
    "In Station",
    "Storage Unit",
    "last_stock_placement",
    "Last addtn to stock",
    "hours_elapsed",
];

fn optional_date(date: Option<NaiveDate>) -> Cell {
    date.map_or(Cell::Empty, Cell::Date)
}

fn optional_hours(hours: Option<f64>) -> Cell {
    hours.map_or(Cell::Empty, Cell::Number)
}

impl TableRow for InventoryRecord {
    const HEADERS: &'static [&'static str] = BASE_HEADERS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.material.clone()),
            Cell::Text(self.description.clone()),
            Cell::Text(self.storage_type.clone()),
            Cell::Text(self.storage_bin.clone()),
            Cell::Decimal(self.total_stock),
            Cell::Text(self.storage_unit.clone()),
            Cell::DateTime(self.last_stock_placement),
            optional_date(self.last_addition),
            optional_hours(self.hours_elapsed),
        ]
    }
}

impl TableRow for AgedLoadRecord {
    const HEADERS: &'static [&'static str] = LOAD_HEADERS;

    fn cells(&self) -> Vec<Cell> {
        let record = &self.inventory;
        vec![
            Cell::Text(record.material.clone()),
            Cell::Text(record.description.clone()),
            Cell::Text(record.storage_type.clone()),
            Cell::Text(record.storage_bin.clone()),
            Cell::Decimal(record.total_stock),
            self.loaded.map_or(Cell::Empty, Cell::Decimal),
            Cell::Decimal(self.in_station),
            Cell::Text(record.storage_unit.clone()),
            Cell::DateTime(record.last_stock_placement),
            optional_date(record.last_addition),
            optional_hours(record.hours_elapsed),
        ]
    }
}

/// A named table of typed cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    /// Table name, used as the output file stem.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Rows, each with one cell per header.
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Renders typed rows into a table.
    pub fn from_rows<R: TableRow>(name: impl Into<String>, rows: &[R]) -> Self {
        Self {
            name: name.into(),
            headers: R::HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three aged-inventory outputs of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgingReport {
    /// Aged material at the load stations, joined with loaded quantities.
    pub aged_load: Vec<AgedLoadRecord>,
    /// Aged material in the unload bins.
    pub aged_unload: Vec<InventoryRecord>,
    /// Aged material matching the configured 8QI filter.
    pub aged_8qi: Vec<InventoryRecord>,
}
