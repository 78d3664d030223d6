//! Adjacency pairing of repeated calls
//!
//! Records are partitioned by caller number, each partition is sorted by start
//! time (stable, so equal timestamps keep source order), and every record is
//! paired with its immediate successor when the gap is within the window. A
//! caller with calls 1, 2, 3 yields at most the pairs (1, 2) and (2, 3); call 1
//! is never paired with call 3.
//!
//! # Example
//!
//! ```
//! use call_repeat::normalize::NormalizedRecord;
//! use call_repeat::pairing::{pair_calls, PairClass};
//! use call_repeat::table::RowId;
//! use chrono::TimeDelta;
//!
//! let call = |id: usize, time: &str, answered: &str, inbound: &str| NormalizedRecord {
//!     row_id: RowId::new(id),
//!     start_time: time.to_string(),
//!     caller_number: "13800000000".to_string(),
//!     answered_group: answered.to_string(),
//!     inbound_group: inbound.to_string(),
//!     agent_extension: "8001".to_string(),
//!     agent_name: "张三".to_string(),
//! };
//!
//! let records = vec![
//!     call(0, "2024-01-01 10:00:00", "A", "A"),
//!     call(1, "2024-01-01 11:00:00", "A", "B"),
//! ];
//! let pairs = pair_calls(&records, TimeDelta::hours(24)).unwrap();
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].class, PairClass::CrossGroup);
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};
use crate::normalize::NormalizedRecord;
use crate::table::RowId;
use crate::timestamp::parse_start_time;

/// Outcome of a repeated-call pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairClass {
    /// The repeat call was routed to the group that answered the first call
    SameGroup,
    /// The repeat call was routed to a different group
    CrossGroup,
}

impl PairClass {
    /// Classify by comparing the first call's answering group with the
    /// second call's inbound group
    pub fn classify(first: &NormalizedRecord, second: &NormalizedRecord) -> Self {
        if first.answered_group == second.inbound_group {
            Self::SameGroup
        } else {
            Self::CrossGroup
        }
    }
}

/// Two temporally adjacent calls from the same caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPair {
    pub first: RowId,
    pub second: RowId,
    pub class: PairClass,
    /// Time between the two calls, never negative and never above the window
    pub gap: TimeDelta,
}

/// A record with its parsed start time
#[derive(Debug)]
struct TimedCall<'a> {
    record: &'a NormalizedRecord,
    at: NaiveDateTime,
}

/// Parse every start time, failing the whole batch on the first bad value
fn parse_all(records: &[NormalizedRecord]) -> Result<Vec<TimedCall<'_>>> {
    let mut timed = Vec::with_capacity(records.len());
    let mut first_failure: Option<&NormalizedRecord> = None;
    let mut failures = 0;

    for record in records {
        match parse_start_time(&record.start_time) {
            Some(at) => timed.push(TimedCall { record, at }),
            None => {
                failures += 1;
                first_failure.get_or_insert(record);
            }
        }
    }

    match first_failure {
        Some(record) => Err(ClassifyError::TimeParse {
            row_id: record.row_id,
            value: record.start_time.clone(),
            failures,
        }),
        None => Ok(timed),
    }
}

/// Pair adjacent calls per caller within `window` (inclusive)
///
/// Pairs are ordered by caller number, then chronologically within a caller.
///
/// # Errors
/// Returns [`ClassifyError::TimeParse`] if any start time cannot be parsed; no
/// pairs are produced in that case.
pub fn pair_calls(records: &[NormalizedRecord], window: TimeDelta) -> Result<Vec<CallPair>> {
    let timed = parse_all(records)?;

    let mut by_caller: BTreeMap<&str, Vec<TimedCall<'_>>> = BTreeMap::new();
    for call in timed {
        let record = call.record;
        by_caller
            .entry(record.caller_number.as_str())
            .or_default()
            .push(call);
    }

    let mut pairs = Vec::new();
    let mut outside_window = 0usize;

    for calls in by_caller.values_mut() {
        // Stable: calls sharing a timestamp stay in source order.
        calls.sort_by_key(|call| call.at);

        for adjacent in calls.windows(2) {
            let (first, second) = (&adjacent[0], &adjacent[1]);
            let gap = second.at - first.at;
            if gap > window {
                outside_window += 1;
                continue;
            }
            pairs.push(CallPair {
                first: first.record.row_id,
                second: second.record.row_id,
                class: PairClass::classify(first.record, second.record),
                gap,
            });
        }
    }

    tracing::debug!(
        "Paired {} records from {} callers: {} pairs, {} adjacent calls outside window",
        records.len(),
        by_caller.len(),
        pairs.len(),
        outside_window
    );

    Ok(pairs)
}

/// Split pairs by class, keeping their relative order
pub fn partition_pairs(pairs: &[CallPair]) -> (Vec<CallPair>, Vec<CallPair>) {
    pairs
        .iter()
        .partition(|pair| pair.class == PairClass::SameGroup)
}
