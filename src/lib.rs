//! Call Repeat - repeated inbound call classification for call-center exports
//!
//! This library reads a call-center export, pairs each caller's temporally
//! adjacent calls that fall within a 24-hour window, and splits those pairs
//! into same-group and cross-group workbooks made of the untouched source rows.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod pairing;
pub mod pipeline;
pub mod schema;
pub mod summary;
pub mod table;
pub mod timestamp;

pub use config::ClassifierConfig;
pub use error::{ClassifyError, ErrorKind};
pub use pairing::{CallPair, PairClass};
pub use pipeline::{process_workbook, process_workbook_with_config};
pub use summary::ClassificationSummary;
