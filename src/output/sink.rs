//! Report sinks.
//!
//! A sink persists one [`ReportTable`] to one file. The xlsx sink produces
//! the formatted spreadsheets consumed on the shop floor; the JSON sink is
//! meant for downstream tooling.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, ColNum, Format, FormatBorder, RowNum, Workbook, Worksheet, XlsxError};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{AgingError, AgingResult};
use crate::models::{Cell, ReportTable};

/// Name of the single worksheet of every xlsx report.
pub const SHEET_NAME: &str = "Sheet1";

/// Day number of 1899-12-30, the Excel serial epoch, counted from 0001-01-01.
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Persists report tables.
pub trait ReportSink {
    /// File extension written by this sink, without the dot.
    fn extension(&self) -> &'static str;

    /// Writes `table` to `path`, replacing any existing file.
    fn write_table(&self, table: &ReportTable, path: &Path) -> AgingResult<()>;

    /// The file a table is written to inside `dir`.
    fn path_for(&self, dir: &Path, table: &ReportTable) -> PathBuf {
        dir.join(format!("{}.{}", table.name, self.extension()))
    }
}

fn output_error(path: &Path, message: impl ToString) -> AgingError {
    AgingError::Output {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Writes formatted xlsx workbooks with rust_xlsxwriter.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSink;

struct CellFormats {
    header: Format,
    body: Format,
    date: Format,
    datetime: Format,
}

/// Light grey fill behind the header row.
const HEADER_FILL: u32 = 0xD3D3D3;

impl CellFormats {
    fn new() -> Self {
        let body = Format::new().set_border(FormatBorder::Thin);
        Self {
            header: body.clone().set_bold().set_background_color(Color::RGB(HEADER_FILL)),
            date: body.clone().set_num_format("yyyy-mm-dd"),
            datetime: body.clone().set_num_format("yyyy-mm-dd hh:mm:ss"),
            body,
        }
    }
}

/// Excel serial day number (1900 date system) of a timestamp.
pub fn excel_serial(datetime: NaiveDateTime) -> f64 {
    let days = datetime.date().num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE;
    days as f64 + datetime.time().num_seconds_from_midnight() as f64 / SECONDS_PER_DAY
}

fn excel_date_serial(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE) as f64
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &Cell,
    formats: &CellFormats,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(text) => {
            worksheet.write_string_with_format(row, col, text, &formats.body)?;
        }
        Cell::Decimal(value) => match value.to_f64() {
            Some(number) => {
                worksheet.write_number_with_format(row, col, number, &formats.body)?;
            }
            None => {
                worksheet.write_string_with_format(row, col, value.to_string(), &formats.body)?;
            }
        },
        Cell::Number(number) => {
            worksheet.write_number_with_format(row, col, *number, &formats.body)?;
        }
        Cell::Date(date) => {
            worksheet.write_number_with_format(row, col, excel_date_serial(*date), &formats.date)?;
        }
        Cell::DateTime(datetime) => {
            worksheet.write_number_with_format(row, col, excel_serial(*datetime), &formats.datetime)?;
        }
        Cell::Empty => {
            worksheet.write_blank(row, col, &formats.body)?;
        }
    }
    Ok(())
}

impl XlsxSink {
    fn build_workbook(table: &ReportTable) -> Result<Workbook, XlsxError> {
        let formats = CellFormats::new();
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as ColNum, header, &formats.header)?;
        }
        for (index, cells) in table.rows.iter().enumerate() {
            let row = index as RowNum + 1;
            for (col, cell) in cells.iter().enumerate() {
                write_cell(worksheet, row, col as ColNum, cell, &formats)?;
            }
        }
        worksheet.autofit();
        Ok(workbook)
    }
}

impl ReportSink for XlsxSink {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write_table(&self, table: &ReportTable, path: &Path) -> AgingResult<()> {
        let mut workbook = Self::build_workbook(table).map_err(|e| output_error(path, e))?;
        workbook.save(path).map_err(|e| output_error(path, e))?;
        info!(report = %table.name, path = %path.display(), rows = table.len(), "Wrote xlsx report");
        Ok(())
    }
}

/// Writes tables as a JSON array of objects keyed by column header.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl JsonSink {
    fn to_objects(table: &ReportTable) -> Result<Vec<Value>, serde_json::Error> {
        let mut objects = Vec::with_capacity(table.len());
        for cells in &table.rows {
            let mut object = Map::new();
            for (header, cell) in table.headers.iter().zip(cells) {
                object.insert(header.clone(), serde_json::to_value(cell)?);
            }
            objects.push(Value::Object(object));
        }
        Ok(objects)
    }
}

impl ReportSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write_table(&self, table: &ReportTable, path: &Path) -> AgingResult<()> {
        let objects = Self::to_objects(table).map_err(|e| output_error(path, e))?;
        let file = File::create(path).map_err(|e| output_error(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &objects)
            .map_err(|e| output_error(path, e))?;
        info!(report = %table.name, path = %path.display(), rows = table.len(), "Wrote json report");
        Ok(())
    }
}
