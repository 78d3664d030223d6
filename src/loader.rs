//! Source loading: workbook or CSV into a string-typed [`RawTable`]
//!
//! Cells are converted to text exactly once, here. Large numeric identifiers
//! such as phone numbers keep every digit because nothing downstream ever
//! re-reads a cell as a number.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDateTime, Timelike};

use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, Result};
use crate::table::RawTable;

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// xlsx, xlsm, xlsb, xls, ods (anything calamine can open)
    Workbook,
    /// Comma-separated text
    Csv,
}

impl SourceFormat {
    /// Detect the format from the file extension
    pub fn detect(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::Csv
        } else {
            Self::Workbook
        }
    }
}

/// Load the source into a table whose header is `config.header_row`
pub fn load_table(path: &Path, config: &ClassifierConfig) -> Result<RawTable> {
    let grid = match SourceFormat::detect(path) {
        SourceFormat::Workbook => read_workbook_grid(path, config.sheet.as_deref())?,
        SourceFormat::Csv => read_csv_grid(path)?,
    };
    tracing::debug!("Read {} sheet rows from {}", grid.len(), path.display());
    Ok(table_from_grid(grid, config.header_row))
}

/// Read a worksheet into a grid addressed by absolute sheet position
fn read_workbook_grid(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;

    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or(ClassifyError::NoWorksheet)??,
    };

    // calamine ranges begin at the first used cell; pad back to A1.
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut grid = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_to_string));
        grid.push(cells);
    }
    Ok(grid)
}

fn read_csv_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Split a grid into cleaned header and data rows
pub fn table_from_grid(mut grid: Vec<Vec<String>>, header_row: usize) -> RawTable {
    if grid.len() <= header_row {
        return RawTable::default();
    }

    let mut data = grid.split_off(header_row + 1);
    let headers = build_headers(&grid[header_row]);

    while data
        .last()
        .is_some_and(|row| row.iter().all(|cell| cell.is_empty()))
    {
        data.pop();
    }

    RawTable::new(headers, data)
}

/// Clean header cells, naming blanks by position and suffixing duplicates
fn build_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    raw.iter()
        .enumerate()
        .map(|(col, name)| {
            let mut name = clean_header(name);
            if name.is_empty() {
                name = format!("Unnamed: {}", col);
            }

            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

/// Normalize a header cell: ideographic and non-breaking spaces become plain
/// spaces, line breaks and a leading BOM are removed, then the result is trimmed
pub fn clean_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}')
        .replace(['\u{3000}', '\u{a0}'], " ")
        .replace(['\r', '\n'], "")
        .trim()
        .to_string()
}

/// Render a cell as text
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) if dt.is_duration() => format_clock(dt.as_f64()),
        // Serials below one carry no date part: a time of day.
        Data::DateTime(dt) if (0.0..1.0).contains(&dt.as_f64()) => format_clock(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => format_datetime(&datetime),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn format_datetime(datetime: &NaiveDateTime) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// Render a day fraction as `HH:MM:SS`; hours are not wrapped at 24
fn format_clock(days: f64) -> String {
    let millis = (days * 86_400_000.0).round() as i64;
    let (secs, millis) = (millis / 1000, millis % 1000);
    let clock = format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
    if millis == 0 {
        clock
    } else {
        format!("{}.{:06}", clock, millis * 1000)
    }
}
