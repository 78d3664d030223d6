// Integration Test Utilities
//
// Helpers for building call-center export workbooks and reading results back

#![allow(dead_code)]

use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use call_repeat::loader::cell_to_string;
use rust_xlsxwriter::Workbook;

/// Header row of a typical export, in the order the call-center system writes it
pub const HEADERS: [&str; 7] = [
    "序号",
    "开始时间",
    "主叫号码",
    "呼入技能组",
    "接听技能组",
    "坐席分机",
    "坐席姓名",
];

/// Title line exported above the header row
pub const TITLE: &str = "呼叫明细报表";

/// One data row in `HEADERS` order
pub fn call(
    seq: &str,
    start: &str,
    caller: &str,
    inbound: &str,
    answered: &str,
    extension: &str,
    agent: &str,
) -> Vec<String> {
    [seq, start, caller, inbound, answered, extension, agent]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Write an export: title on the first row, header on the second, then data
pub fn write_export(path: &Path, headers: &[&str], rows: &[Vec<String>]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, TITLE).unwrap();
    for (col, name) in headers.iter().enumerate() {
        sheet.write_string(1, col as u16, *name).unwrap();
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(i as u32 + 2, col as u16, value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Read the first sheet of a workbook as text, header row included
pub fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}

pub fn headers() -> Vec<String> {
    HEADERS.iter().map(|s| s.to_string()).collect()
}
