//! Record filtering ahead of pairing
//!
//! A record is dropped when any categorical field is empty after
//! normalization, or when it was routed to the excluded skill-group.

use crate::normalize::NormalizedRecord;

/// Why a record was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// A categorical field was empty
    MissingField,
    /// Inbound group equals the excluded group
    ExcludedGroup,
}

/// Counts of kept and dropped records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub missing_field: usize,
    pub excluded_group: usize,
}

impl FilterStats {
    pub fn dropped(&self) -> usize {
        self.missing_field + self.excluded_group
    }
}

/// Filter that determines which records take part in pairing
#[derive(Debug, Clone)]
pub struct RecordFilter {
    exclude_group: String,
}

impl RecordFilter {
    pub fn new(exclude_group: impl Into<String>) -> Self {
        Self {
            exclude_group: exclude_group.into(),
        }
    }

    /// Reason a record would be dropped, or `None` if it is kept
    pub fn check(&self, record: &NormalizedRecord) -> Option<DropReason> {
        if record.categorical_fields().iter().any(|v| v.is_empty()) {
            Some(DropReason::MissingField)
        } else if record.inbound_group == self.exclude_group {
            Some(DropReason::ExcludedGroup)
        } else {
            None
        }
    }

    /// Check if a record should be paired
    pub fn should_keep(&self, record: &NormalizedRecord) -> bool {
        self.check(record).is_none()
    }

    /// Keep surviving records in their original relative order
    pub fn apply(&self, records: Vec<NormalizedRecord>) -> (Vec<NormalizedRecord>, FilterStats) {
        let mut stats = FilterStats::default();
        let kept: Vec<NormalizedRecord> = records
            .into_iter()
            .filter(|record| match self.check(record) {
                None => {
                    stats.kept += 1;
                    true
                }
                Some(DropReason::MissingField) => {
                    stats.missing_field += 1;
                    false
                }
                Some(DropReason::ExcludedGroup) => {
                    stats.excluded_group += 1;
                    false
                }
            })
            .collect();
        (kept, stats)
    }
}
