//! Pipeline settings types.
//!
//! These structures are deserialized from the YAML settings file. Every
//! field has a default, so an empty file describes the standard layout of a
//! `data/` working directory next to `shift_schedules.txt`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::InventoryRecord;

/// A storage-type / storage-bin membership predicate.
///
/// A record matches when its storage type is listed in `storage_types` or
/// its storage bin is listed in `storage_bins`. An empty filter matches
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageFilter {
    /// Storage type codes to include.
    pub storage_types: BTreeSet<String>,
    /// Storage bins to include.
    pub storage_bins: BTreeSet<String>,
}

impl StorageFilter {
    /// A filter on storage types only.
    pub fn storage_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            storage_types: types.into_iter().map(Into::into).collect(),
            storage_bins: BTreeSet::new(),
        }
    }

    /// A filter on storage bins only.
    pub fn storage_bins<I, S>(bins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            storage_types: BTreeSet::new(),
            storage_bins: bins.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the filter can match any record at all.
    pub fn is_empty(&self) -> bool {
        self.storage_types.is_empty() && self.storage_bins.is_empty()
    }

    /// Whether the record's location matches the filter.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        self.storage_types.contains(&record.storage_type)
            || self.storage_bins.contains(&record.storage_bin)
    }
}

/// File stems of the three reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportNames {
    /// Aged load inventory report.
    pub aged_load: String,
    /// Aged unload inventory report.
    pub aged_unload: String,
    /// Aged 8QI inventory report.
    pub aged_8qi: String,
}

impl Default for ReportNames {
    fn default() -> Self {
        Self {
            aged_load: "aged_load_inv".to_string(),
            aged_unload: "aged_unload_inv".to_string(),
            aged_8qi: "aged_8qi_inv".to_string(),
        }
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Inventory workbook exported from the warehouse system.
    pub inventory_path: PathBuf,
    /// UTF-16 tab-separated production log.
    pub production_log_path: PathBuf,
    /// `key=value` shift schedule.
    pub shift_schedule_path: PathBuf,
    /// Directory the reports are written to.
    pub output_dir: PathBuf,
    /// Shared directory finished reports are copied to, if any.
    pub publish_dir: Option<PathBuf>,
    /// Report file stems.
    pub report_names: ReportNames,
    /// Location filter for the aged 8QI report.
    pub aged_8qi: StorageFilter,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from("data/paint_inventory.xlsx"),
            production_log_path: PathBuf::from("data/paint_processed.csv"),
            shift_schedule_path: PathBuf::from("shift_schedules.txt"),
            output_dir: PathBuf::from("data"),
            publish_dir: None,
            report_names: ReportNames::default(),
            aged_8qi: StorageFilter::default(),
        }
    }
}
