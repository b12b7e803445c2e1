//! Report output.
//!
//! Sinks persist [`crate::models::ReportTable`]s to disk; the publish step
//! copies finished files to a shared directory.

mod publish;
mod sink;

pub use publish::publish_reports;
pub use sink::{JsonSink, ReportSink, SHEET_NAME, XlsxSink, excel_serial};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// File format of the written reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Formatted spreadsheets.
    #[default]
    Xlsx,
    /// JSON arrays of row objects.
    Json,
}

impl ReportFormat {
    /// The sink writing this format.
    pub fn sink(self) -> Box<dyn ReportSink> {
        match self {
            ReportFormat::Xlsx => Box::new(XlsxSink),
            ReportFormat::Json => Box::new(JsonSink),
        }
    }
}
