//! Normalized view of the source rows used for filtering and pairing
//!
//! Normalized values are never exported; the exporter goes back to the
//! [`RawTable`] through each record's [`RowId`].

use std::sync::OnceLock;

use regex::Regex;

use crate::schema::ColumnIndex;
use crate::table::{RawTable, RowId};

/// Leading prefix on caller numbers such as `TEL:` or `tel：`
fn caller_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z：: ]+").expect("caller prefix pattern is valid"))
}

fn whitespace() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// One source row after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub row_id: RowId,
    /// Raw start-time text, parsed later by the pairing stage
    pub start_time: String,
    pub caller_number: String,
    pub answered_group: String,
    pub inbound_group: String,
    pub agent_extension: String,
    pub agent_name: String,
}

impl NormalizedRecord {
    /// The four categorical fields, in filter order
    pub fn categorical_fields(&self) -> [&str; 4] {
        [
            &self.inbound_group,
            &self.answered_group,
            &self.agent_extension,
            &self.agent_name,
        ]
    }
}

/// Strip a leading run of letters, colons and spaces, then trim
pub fn normalize_caller_number(value: &str) -> String {
    caller_prefix().replace(value, "").trim().to_string()
}

/// Remove all whitespace; a stringified missing value becomes empty
pub fn normalize_categorical(value: &str) -> String {
    let compact = whitespace().replace_all(value, "");
    if compact.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        compact.into_owned()
    }
}

/// Normalize every row of the table, preserving source order
pub fn normalize_table(table: &RawTable, columns: &ColumnIndex) -> Vec<NormalizedRecord> {
    table
        .rows()
        .map(|(row_id, row)| NormalizedRecord {
            row_id,
            start_time: row[columns.start_time].clone(),
            caller_number: normalize_caller_number(&row[columns.caller_number]),
            answered_group: normalize_categorical(&row[columns.answered_group]),
            inbound_group: normalize_categorical(&row[columns.inbound_group]),
            agent_extension: normalize_categorical(&row[columns.agent_extension]),
            agent_name: normalize_categorical(&row[columns.agent_name]),
        })
        .collect()
}
