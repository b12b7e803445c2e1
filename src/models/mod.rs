//! Core data models for the inventory aging pipeline.
//!
//! This module contains the calendar, record and report types shared by the
//! loaders, the calculation pipeline and the output sinks.

mod calendar;
mod inventory;
mod report;

pub use calendar::{Calendar, DEFAULT_WORKDAYS, SATURDAY, ShiftWindow};
pub use inventory::{AgedLoadRecord, AggregatedProduction, InventoryRecord, ProductionLogRecord};
pub use report::{AgingReport, Cell, ReportTable, TableRow};
