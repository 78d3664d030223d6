//! End-to-end run: load, normalize, filter, pair, export
//!
//! Every fallible stage runs before the exporter, so a schema or start-time
//! problem never leaves a partial output behind.

use std::path::Path;

use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, Result};
use crate::export::export_pairs;
use crate::filter::RecordFilter;
use crate::loader::load_table;
use crate::normalize::normalize_table;
use crate::pairing::{pair_calls, partition_pairs};
use crate::schema::ColumnIndex;
use crate::summary::ClassificationSummary;

/// Classify `input` with the default configuration
pub fn process_workbook(input: &Path, output_dir: &Path) -> Result<ClassificationSummary> {
    process_workbook_with_config(input, output_dir, &ClassifierConfig::default())
}

/// Classify `input` and write both result workbooks into `output_dir`
///
/// # Errors
/// - [`ClassifyError::InputNotFound`] / [`ClassifyError::OutputDirNotFound`]
///   when a path is missing
/// - [`ClassifyError::Schema`] when a required column is absent
/// - [`ClassifyError::TimeParse`] when a kept record has an unparseable start time
/// - read and write failures from the workbook layer
pub fn process_workbook_with_config(
    input: &Path,
    output_dir: &Path,
    config: &ClassifierConfig,
) -> Result<ClassificationSummary> {
    config.validate()?;
    if !input.is_file() {
        return Err(ClassifyError::InputNotFound(input.to_path_buf()));
    }
    if !output_dir.is_dir() {
        return Err(ClassifyError::OutputDirNotFound(output_dir.to_path_buf()));
    }

    tracing::info!("Classifying repeat calls in {}", input.display());

    let table = load_table(input, config)?;
    let columns = ColumnIndex::resolve(&table)?;
    tracing::debug!(
        "Loaded {} rows with {} columns",
        table.len(),
        table.headers().len()
    );

    let records = normalize_table(&table, &columns);
    let (records, filter_stats) = RecordFilter::new(&config.exclude_group).apply(records);
    tracing::debug!(
        "Filter kept {} rows, dropped {} (missing field) and {} (excluded group)",
        filter_stats.kept,
        filter_stats.missing_field,
        filter_stats.excluded_group
    );
    if records.is_empty() {
        tracing::warn!("No rows left after filtering; writing empty outputs");
    }

    let pairs = pair_calls(&records, config.window())?;
    let (same_group, cross_group) = partition_pairs(&pairs);

    let outputs = export_pairs(&table, &same_group, &cross_group, output_dir)?;

    let summary = ClassificationSummary::new(
        same_group.len(),
        cross_group.len(),
        table.len(),
        filter_stats,
        outputs,
    );
    tracing::info!(
        "Found {} same-group and {} cross-group pairs",
        summary.same_group,
        summary.cross_group
    );
    Ok(summary)
}
