//! User settings for the expense tracker
//!
//! Selects the record shape of the expense document and the policies the
//! store applies, plus display preferences.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::RecordShape;
use crate::services::{IdStrategy, StoreOptions, UpdatePlacement};
use crate::storage::{read_json, write_json_atomic};

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of this settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Which fields expense records carry
    #[serde(default)]
    pub record_shape: RecordShape,

    /// How new expense ids are chosen
    #[serde(default)]
    pub id_strategy: IdStrategy,

    /// Where an updated expense is placed
    #[serde(default)]
    pub update_placement: UpdatePlacement,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            record_shape: RecordShape::default(),
            id_strategy: IdStrategy::default(),
            update_placement: UpdatePlacement::default(),
            audit_enabled: default_true(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Store policies derived from these settings
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::new(self.record_shape)
            .id_strategy(self.id_strategy)
            .update_placement(self.update_placement)
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Nothing is written; the caller decides when to persist.
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        read_json(paths.settings_file()).map_err(|e| {
            ExpenseError::Config(format!("Failed to load settings: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
            .map_err(|e| ExpenseError::Config(format!("Failed to save settings: {}", e)))
    }
}
