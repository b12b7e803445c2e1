//! Production log loader.
//!
//! The production system exports its log as UTF-16 text with tab-separated
//! columns. Only the part number, the loaded quantity and the three status
//! counters are kept.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::error::{AgingError, AgingResult};
use crate::models::ProductionLogRecord;

use super::cells::parse_decimal;

#[derive(Debug, Deserialize)]
struct RawProductionRow {
    #[serde(rename = "PART_NO")]
    part_no: String,
    #[serde(rename = "LOADED")]
    loaded: String,
    #[serde(rename = "GOOD")]
    good: String,
    #[serde(rename = "NON-CONFIRMED")]
    non_confirmed: String,
    #[serde(rename = "SCRAP")]
    scrap: String,
}

/// Loads the production log at `path`.
///
/// # Errors
///
/// Returns [`AgingError::DataUnavailable`] if the file cannot be read, is
/// not valid UTF-16, lacks a required column, or holds a quantity that is
/// not a number.
pub fn load_production_log<P: AsRef<Path>>(path: P) -> AgingResult<Vec<ProductionLogRecord>> {
    let path = path.as_ref();
    let unavailable = |message: String| AgingError::DataUnavailable {
        path: path.display().to_string(),
        message,
    };

    let bytes = fs::read(path).map_err(|e| unavailable(e.to_string()))?;
    let content = decode_utf16(&bytes).map_err(unavailable)?;
    let records = parse_production_log(&content).map_err(unavailable)?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Loaded production log"
    );
    Ok(records)
}

/// Decodes UTF-16 text.
///
/// A byte order mark selects the endianness and is stripped; without one
/// the text is read as little-endian.
pub fn decode_utf16(bytes: &[u8]) -> Result<String, String> {
    let (body, little_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, true),
        [0xFE, 0xFF, rest @ ..] => (rest, false),
        _ => (bytes, true),
    };
    if body.len() % 2 != 0 {
        return Err(format!("odd number of bytes ({}) in UTF-16 text", body.len()));
    }

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if little_endian {
                u16::from_le_bytes(pair)
            } else {
                u16::from_be_bytes(pair)
            }
        })
        .collect();
    String::from_utf16(&units).map_err(|e| e.to_string())
}

/// Parses decoded tab-separated production log text.
pub fn parse_production_log(content: &str) -> Result<Vec<ProductionLogRecord>, String> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (offset, row) in reader.deserialize::<RawProductionRow>().enumerate() {
        let line = offset + 2;
        let row = row.map_err(|e| format!("line {}: {}", line, e))?;
        records.push(normalize_row(row).map_err(|e| format!("line {}: {}", line, e))?);
    }
    Ok(records)
}

fn normalize_row(row: RawProductionRow) -> Result<ProductionLogRecord, String> {
    Ok(ProductionLogRecord {
        part_no: row.part_no,
        loaded: quantity("LOADED", &row.loaded)?,
        good: quantity("GOOD", &row.good)?,
        non_confirmed: quantity("NON-CONFIRMED", &row.non_confirmed)?,
        scrap: quantity("SCRAP", &row.scrap)?,
    })
}

fn quantity(column: &str, value: &str) -> Result<Option<Decimal>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_decimal(value)
        .map(Some)
        .map_err(|e| format!("{}: {}", column, e))
}
