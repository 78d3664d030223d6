//! Required source columns and their resolution against a loaded header

use crate::error::{ClassifyError, Result};
use crate::table::RawTable;

/// Call start time
pub const START_TIME: &str = "开始时间";
/// Caller number
pub const CALLER_NUMBER: &str = "主叫号码";
/// Skill-group that answered the call
pub const ANSWERED_GROUP: &str = "接听技能组";
/// Skill-group the call was routed to
pub const INBOUND_GROUP: &str = "呼入技能组";
/// Agent extension
pub const AGENT_EXTENSION: &str = "坐席分机";
/// Agent name
pub const AGENT_NAME: &str = "坐席姓名";

/// Columns every export must carry, in the order they are reported
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    CALLER_NUMBER,
    ANSWERED_GROUP,
    INBOUND_GROUP,
    AGENT_EXTENSION,
    AGENT_NAME,
];

/// Positions of the required columns inside a [`RawTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub start_time: usize,
    pub caller_number: usize,
    pub answered_group: usize,
    pub inbound_group: usize,
    pub agent_extension: usize,
    pub agent_name: usize,
}

impl ColumnIndex {
    /// Resolve every required column, failing with the full missing set
    pub fn resolve(table: &RawTable) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| table.column(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ClassifyError::Schema {
                missing,
                required: REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            });
        }

        let find = |name: &str| table.column(name).unwrap_or_default();
        Ok(Self {
            start_time: find(START_TIME),
            caller_number: find(CALLER_NUMBER),
            answered_group: find(ANSWERED_GROUP),
            inbound_group: find(INBOUND_GROUP),
            agent_extension: find(AGENT_EXTENSION),
            agent_name: find(AGENT_NAME),
        })
    }
}
