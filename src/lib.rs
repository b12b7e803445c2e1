//! Warehouse inventory aging.
//!
//! This crate measures how long material has sat in storage bins, counted in
//! working hours only, and produces three aged-inventory reports: material
//! waiting at the paint load stations, material in the unload bins and
//! material in the configured 8QI locations.
//!
//! A run reads a `key=value` shift schedule, derives the working calendar,
//! loads the inventory workbook and the production log, computes the hours
//! elapsed for every record against one `now` instant and writes the reports
//! through a [`output::ReportSink`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod output;
pub mod runner;
