//! Error types for the call classification pipeline
//!
//! Every variant is fatal for the run: no output file is written once one of
//! these has been raised.

use std::path::PathBuf;
use thiserror::Error;

use crate::table::RowId;

/// Errors that can occur while classifying a call export
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Missing required columns: {missing:?}\nRequired columns: {required:?}")]
    Schema {
        missing: Vec<String>,
        required: Vec<String>,
    },

    #[error(
        "Unparseable start time {value:?} at row id {row_id} ({failures} row(s) failed to parse)"
    )]
    TimeParse {
        row_id: RowId,
        value: String,
        failures: usize,
    },

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Failed to write output workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output directory not found: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Coarse failure class, stable across variant changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    TimeParse,
    Io,
    Config,
}

impl ClassifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema { .. } => ErrorKind::Schema,
            Self::TimeParse { .. } => ErrorKind::TimeParse,
            Self::Workbook(_)
            | Self::Csv(_)
            | Self::NoWorksheet
            | Self::Write(_)
            | Self::Io(_)
            | Self::InputNotFound(_)
            | Self::OutputDirNotFound(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type for classification operations
pub type Result<T> = std::result::Result<T, ClassifyError>;
