//! Export of paired calls as the original source rows
//!
//! Each pair contributes its first call's row followed by its second call's
//! row, taken verbatim from the [`RawTable`]. A row shared by two pairs is
//! written once per pair. Both workbooks are built in memory before either
//! file is written.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ColNum, DocProperties, ExcelDateTime, RowNum, Workbook, XlsxError};
use serde::Serialize;

use crate::error::Result;
use crate::pairing::CallPair;
use crate::table::RawTable;

/// Output file for same-group pairs
pub const SAME_GROUP_FILE: &str = "重复来电_没跨组.xlsx";

/// Output file for cross-group pairs
pub const CROSS_GROUP_FILE: &str = "重复来电_跨组.xlsx";

/// Locations of the two written workbooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub same_group: PathBuf,
    pub cross_group: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            same_group: output_dir.join(SAME_GROUP_FILE),
            cross_group: output_dir.join(CROSS_GROUP_FILE),
        }
    }
}

/// Original rows for `pairs`, two per pair, in pair order
pub fn project_rows<'a>(table: &'a RawTable, pairs: &[CallPair]) -> Vec<&'a [String]> {
    pairs
        .iter()
        .flat_map(|pair| [pair.first, pair.second])
        .filter_map(|id| table.row(id))
        .collect()
}

/// Render a single-sheet workbook with `headers` and string-only cells
pub fn render_workbook(headers: &[String], rows: &[&[String]]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // Fixed creation time keeps repeated runs byte-identical.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let worksheet = workbook.add_worksheet();
    write_row(worksheet, 0, headers)?;
    for (i, row) in rows.iter().enumerate() {
        let row_num = RowNum::try_from(i + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        write_row(worksheet, row_num, row)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_row(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row_num: RowNum,
    values: &[String],
) -> Result<()> {
    for (col, value) in values.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let col_num = ColNum::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string(row_num, col_num, value)?;
    }
    Ok(())
}

/// Write the same-group and cross-group workbooks into `output_dir`
///
/// Existing files with the same names are overwritten. Both outputs are
/// written even when they hold no pairs.
pub fn export_pairs(
    table: &RawTable,
    same_group: &[CallPair],
    cross_group: &[CallPair],
    output_dir: &Path,
) -> Result<OutputPaths> {
    let paths = OutputPaths::in_dir(output_dir);

    let same_bytes = render_workbook(table.headers(), &project_rows(table, same_group))?;
    let cross_bytes = render_workbook(table.headers(), &project_rows(table, cross_group))?;

    fs::write(&paths.same_group, same_bytes)?;
    fs::write(&paths.cross_group, cross_bytes)?;

    tracing::debug!(
        "Wrote {} and {}",
        paths.same_group.display(),
        paths.cross_group.display()
    );

    Ok(paths)
}
