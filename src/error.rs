//! Error types for the inventory aging pipeline.
//!
//! Configuration problems with the shift schedule degrade gracefully and are
//! reported as warnings; missing input data, computation failures and output
//! failures abort the run.

use thiserror::Error;

/// The main error type for the inventory aging pipeline.
///
/// # Example
///
/// ```
/// use inventory_aging::error::AgingError;
///
/// let error = AgingError::DataUnavailable {
///     path: "data/paint_inventory.xlsx".to_string(),
///     message: "file not found".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Input data unavailable at 'data/paint_inventory.xlsx': file not found"
/// );
/// ```
#[derive(Debug, Error)]
pub enum AgingError {
    /// Pipeline settings file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Pipeline settings file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The shift schedule could not be read. Callers absorb this and fall
    /// back to an empty parameter set.
    #[error("Failed to read shift schedule '{path}': {message}")]
    ConfigRead {
        /// The shift schedule path.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// A single shift schedule line was malformed and skipped.
    #[error("Skipping invalid line {line_number} in shift schedule: '{line}' ({message})")]
    ConfigLineParse {
        /// One-based line number within the schedule file.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
        /// Why the line was rejected.
        message: String,
    },

    /// A required input file was missing or malformed.
    #[error("Input data unavailable at '{path}': {message}")]
    DataUnavailable {
        /// The input file path.
        path: String,
        /// A description of what was missing or malformed.
        message: String,
    },

    /// Computing the elapsed working hours for a record failed.
    #[error("Failed to compute elapsed hours for material '{material}': {message}")]
    Computation {
        /// The material of the record being computed.
        material: String,
        /// A description of the failure.
        message: String,
    },

    /// A report table could not be written.
    #[error("Failed to write report '{path}': {message}")]
    Output {
        /// The destination path.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Finished reports could not be published.
    #[error("Failed to publish '{path}': {message}")]
    Publish {
        /// The file or directory that failed.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return AgingError.
pub type AgingResult<T> = Result<T, AgingError>;
