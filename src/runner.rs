//! One end-to-end aging run.
//!
//! Reads the shift schedule once, loads both inputs, computes the three
//! aged-inventory reports against a single `now`, writes them through a
//! [`ReportSink`] and optionally publishes the files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{AgingPipeline, derive_calendar};
use crate::config::{PipelineSettings, ReportNames, ShiftSchedule};
use crate::data::load_inputs;
use crate::error::{AgingError, AgingResult};
use crate::models::{AgingReport, ReportTable};
use crate::output::{ReportFormat, publish_reports};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Identifier tagged on every log line of the run.
    pub run_id: Uuid,
    /// The `now` instant used for every record.
    pub now: NaiveDateTime,
    /// The computed reports.
    pub report: AgingReport,
    /// Number of shift schedule problems that were skipped.
    pub schedule_warnings: usize,
    /// Report files written to the output directory.
    pub written: Vec<PathBuf>,
    /// Report files copied to the publish directory.
    pub published: Vec<PathBuf>,
}

/// Renders the three reports as named tables, in load, unload, 8QI order.
pub fn report_tables(report: &AgingReport, names: &ReportNames) -> [ReportTable; 3] {
    [
        ReportTable::from_rows(names.aged_load.as_str(), &report.aged_load),
        ReportTable::from_rows(names.aged_unload.as_str(), &report.aged_unload),
        ReportTable::from_rows(names.aged_8qi.as_str(), &report.aged_8qi),
    ]
}

/// Runs the pipeline once with the given settings.
///
/// # Errors
///
/// Fails on the first missing input, computation failure, write failure
/// or publish failure. Shift schedule problems never fail the run.
pub fn run(
    settings: &PipelineSettings,
    format: ReportFormat,
    now: NaiveDateTime,
) -> AgingResult<RunSummary> {
    let run_id = Uuid::new_v4();
    let start_time = Instant::now();

    match execute(run_id, settings, format, now) {
        Ok(summary) => {
            info!(
                run_id = %run_id,
                written = summary.written.len(),
                published = summary.published.len(),
                duration_ms = start_time.elapsed().as_millis(),
                "Run completed successfully"
            );
            Ok(summary)
        }
        Err(err) => {
            warn!(run_id = %run_id, error = %err, "Run failed");
            Err(err)
        }
    }
}

fn execute(
    run_id: Uuid,
    settings: &PipelineSettings,
    format: ReportFormat,
    now: NaiveDateTime,
) -> AgingResult<RunSummary> {
    let schedule = ShiftSchedule::read(&settings.shift_schedule_path);
    let calendar = derive_calendar(&schedule.parameters);
    info!(
        run_id = %run_id,
        windows = calendar.windows.len(),
        workdays = calendar.workdays.len(),
        warnings = schedule.warnings.len(),
        "Derived working calendar"
    );

    let inputs = load_inputs(settings)?;
    let pipeline = AgingPipeline::new(calendar, settings.aged_8qi.clone());
    let report = pipeline.run_with_id(run_id, inputs.inventory, &inputs.production, now)?;

    let output_dir = &settings.output_dir;
    fs::create_dir_all(output_dir).map_err(|e| AgingError::Output {
        path: output_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let sink = format.sink();
    let mut written = Vec::new();
    let mut file_names = Vec::new();
    for table in report_tables(&report, &settings.report_names) {
        let path = sink.path_for(output_dir, &table);
        sink.write_table(&table, &path)?;
        file_names.push(format!("{}.{}", table.name, sink.extension()));
        written.push(path);
    }

    let published = match &settings.publish_dir {
        Some(publish_dir) => publish_reports(output_dir, publish_dir, &file_names)?,
        None => Vec::new(),
    };

    Ok(RunSummary {
        run_id,
        now,
        report,
        schedule_warnings: schedule.warnings.len(),
        written,
        published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgedLoadRecord, InventoryRecord};
    use rust_decimal::Decimal;

    fn record(material: &str) -> InventoryRecord {
        InventoryRecord {
            material: material.to_string(),
            description: String::new(),
            storage_type: "801".to_string(),
            storage_bin: "UNLOAD01".to_string(),
            total_stock: Decimal::ONE,
            storage_unit: String::new(),
            last_stock_placement: NaiveDateTime::parse_from_str(
                "2026-01-12 06:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            last_addition: None,
            hours_elapsed: Some(10.0),
        }
    }

    #[test]
    fn test_report_tables_use_configured_names() {
        let report = AgingReport {
            aged_load: vec![AgedLoadRecord::join(record("A"), None)],
            aged_unload: vec![record("A"), record("B")],
            aged_8qi: Vec::new(),
        };
        let names = ReportNames {
            aged_load: "load".to_string(),
            aged_unload: "unload".to_string(),
            aged_8qi: "qi".to_string(),
        };

        let [load, unload, qi] = report_tables(&report, &names);
        assert_eq!((load.name.as_str(), load.len()), ("load", 1));
        assert_eq!((unload.name.as_str(), unload.len()), ("unload", 2));
        assert_eq!((qi.name.as_str(), qi.len()), ("qi", 0));
        assert_eq!(load.headers.len(), 11);
        assert_eq!(unload.headers.len(), 9);
    }

    #[test]
    fn test_run_with_missing_inventory_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PipelineSettings {
            inventory_path: dir.path().join("missing.xlsx"),
            production_log_path: dir.path().join("missing.csv"),
            shift_schedule_path: dir.path().join("missing.txt"),
            output_dir: dir.path().join("out"),
            ..PipelineSettings::default()
        };
        let now = NaiveDateTime::parse_from_str("2026-01-16 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();

        let result = run(&settings, ReportFormat::Xlsx, now);
        match result {
            Err(AgingError::DataUnavailable { path, .. }) => assert!(path.ends_with("missing.xlsx")),
            other => panic!("expected missing inventory, got {:?}", other),
        }
        // nothing is written when an input is missing
        assert!(!dir.path().join("out").exists());
    }
}
