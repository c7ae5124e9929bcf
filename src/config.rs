//! Runtime configuration.
//!
//! Everything has a default, so the config file is optional. When present it
//! is a JSON object with any subset of the fields below.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AssistantError, Result};

pub const CONFIG_FILE: &str = "assistant.json";

/// How a new record's id is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// One past the highest id in the collection.
    #[default]
    NextFree,
    /// Collection length plus one. Can reuse a live id after a deletion.
    Length,
}

/// How the finance report compares dates against its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    /// Parse `DD-MM-YYYY` and compare calendar dates.
    #[default]
    Calendar,
    /// Compare the raw strings.
    Lexicographic,
}

/// File names of the four collections, relative to the data directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionFiles {
    pub notes: String,
    pub tasks: String,
    pub contacts: String,
    pub finance: String,
}

impl Default for CollectionFiles {
    fn default() -> Self {
        Self {
            notes: "notes.json".to_string(),
            tasks: "tasks.json".to_string(),
            contacts: "contacts.json".to_string(),
            finance: "finance.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub id_policy: IdPolicy,
    pub date_filter: DateFilter,
    pub files: CollectionFiles,
}

impl Config {
    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| AssistantError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
