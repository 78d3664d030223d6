//! Run summary returned to callers and printed by the CLI

use std::fmt::Write as _;

use serde::Serialize;

use crate::export::OutputPaths;
use crate::filter::FilterStats;

/// Result of one classification run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    /// Number of same-group pairs
    pub same_group: usize,
    /// Number of cross-group pairs
    pub cross_group: usize,
    /// Data rows read from the source
    pub rows_read: usize,
    /// Rows that survived filtering
    pub rows_kept: usize,
    /// Rows dropped for an empty categorical field
    pub dropped_missing_field: usize,
    /// Rows dropped for the excluded inbound group
    pub dropped_excluded_group: usize,
    pub outputs: OutputPaths,
}

impl ClassificationSummary {
    pub fn new(
        same_group: usize,
        cross_group: usize,
        rows_read: usize,
        filter: FilterStats,
        outputs: OutputPaths,
    ) -> Self {
        Self {
            same_group,
            cross_group,
            rows_read,
            rows_kept: filter.kept,
            dropped_missing_field: filter.missing_field,
            dropped_excluded_group: filter.excluded_group,
            outputs,
        }
    }

    pub fn total(&self) -> usize {
        self.same_group + self.cross_group
    }

    /// Share of same-group pairs, 0.0 when there are no pairs
    pub fn same_group_ratio(&self) -> f64 {
        ratio(self.same_group, self.total())
    }

    /// Share of cross-group pairs, 0.0 when there are no pairs
    pub fn cross_group_ratio(&self) -> f64 {
        ratio(self.cross_group, self.total())
    }

    /// Human-readable report
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Processing complete");
        let _ = writeln!(
            out,
            "Same-group pairs:  {} ({:.1}%)",
            self.same_group,
            self.same_group_ratio() * 100.0
        );
        let _ = writeln!(
            out,
            "Cross-group pairs: {} ({:.1}%)",
            self.cross_group,
            self.cross_group_ratio() * 100.0
        );
        let _ = writeln!(
            out,
            "Rows: {} read, {} kept, {} dropped (missing field), {} dropped (excluded group)",
            self.rows_read, self.rows_kept, self.dropped_missing_field, self.dropped_excluded_group
        );
        let _ = writeln!(out, "Written:");
        let _ = writeln!(out, "  {}", self.outputs.same_group.display());
        let _ = writeln!(out, "  {}", self.outputs.cross_group.display());
        out
    }

    /// JSON report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
