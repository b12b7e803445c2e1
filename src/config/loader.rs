//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pipeline
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{AgingError, AgingResult};

use super::types::PipelineSettings;

/// Loads and provides access to pipeline settings.
///
/// # File Format
///
/// ```yaml
/// inventory_path: data/paint_inventory.xlsx
/// production_log_path: data/paint_processed.csv
/// shift_schedule_path: shift_schedules.txt
/// output_dir: data
/// publish_dir: /mnt/shared/aging
/// aged_8qi:
///   storage_types: ["8QI"]
/// ```
///
/// Omitted keys take their defaults.
///
/// # Example
///
/// ```no_run
/// use inventory_aging::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./inventory_aging.yaml")?;
/// println!("Reading inventory from {}", loader.settings().inventory_path.display());
/// # Ok::<(), inventory_aging::error::AgingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: PipelineSettings,
}

impl ConfigLoader {
    /// Loads settings from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown value types (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> AgingResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AgingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            AgingError::ConfigParseError { message, .. } => AgingError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses settings from YAML text.
    ///
    /// An empty document yields the default settings.
    pub fn from_yaml_str(content: &str) -> AgingResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings = serde_yaml::from_str::<PipelineSettings>(content).map_err(|e| {
            AgingError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { settings })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> PipelineSettings {
        self.settings
    }
}
