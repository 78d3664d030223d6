//! Classifier configuration
//!
//! The defaults are the fixed values the tool ships with. A TOML file may
//! override any subset of them; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};

/// Skill-group whose inbound calls are never paired
pub const EXCLUDE_GROUP: &str = "线上运营组";

/// Maximum gap between two adjacent calls of a pair, inclusive
pub const TIME_WINDOW_HOURS: u32 = 24;

/// Absolute sheet row holding the column names (0-based, so the second row)
pub const HEADER_ROW: usize = 1;

/// Configuration for the filter and pairing stages
///
/// # Example
/// ```
/// use call_repeat::config::ClassifierConfig;
///
/// let config = ClassifierConfig::default();
/// assert_eq!(config.window_hours, 24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Inbound group whose records are dropped before pairing
    pub exclude_group: String,

    /// Pairing window in hours (closed upper bound)
    pub window_hours: u32,

    /// Sheet row used as the header; earlier rows are ignored
    pub header_row: usize,

    /// Worksheet to read; the first sheet when unset
    pub sheet: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            exclude_group: EXCLUDE_GROUP.to_string(),
            window_hours: TIME_WINDOW_HOURS,
            header_row: HEADER_ROW,
            sheet: None,
        }
    }
}

impl ClassifierConfig {
    /// Load a configuration file, falling back to defaults for absent keys
    ///
    /// # Example TOML
    /// ```toml
    /// exclude_group = "线上运营组"
    /// window_hours = 24
    /// header_row = 1
    /// sheet = "Sheet1"
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            ClassifyError::Config(format!("{}: {}", path.display(), e.message()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Pairing window as a duration
    pub fn window(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.window_hours))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_hours == 0 {
            return Err(ClassifyError::Config(
                "window_hours must be greater than 0".to_string(),
            ));
        }

        // Compared against whitespace-stripped values, so it could never match.
        if self.exclude_group.chars().any(char::is_whitespace) {
            return Err(ClassifyError::Config(format!(
                "exclude_group must not contain whitespace, got {:?}",
                self.exclude_group
            )));
        }

        if matches!(&self.sheet, Some(name) if name.trim().is_empty()) {
            return Err(ClassifyError::Config(
                "sheet must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}
