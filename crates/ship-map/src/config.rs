//! Mapping configuration export and import.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ship_model::{ColumnMapping, StandardField};
use tracing::warn;

use crate::error::Result;

const CONFIG_VERSION: u32 = 1;

/// Serializable snapshot of a column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub version: u32,
    pub mappings: BTreeMap<StandardField, String>,
}

impl MappingConfig {
    pub fn from_mapping(mapping: &ColumnMapping) -> Self {
        Self {
            version: CONFIG_VERSION,
            mappings: mapping
                .iter()
                .map(|(field, column)| (field, column.to_string()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Rebuilds a mapping for a manifest with `columns`.
    ///
    /// Entries whose column no longer exists, or whose column was already
    /// taken by an earlier field, are dropped with a warning.
    pub fn apply(&self, columns: &[String]) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        for (field, column) in &self.mappings {
            if let Err(error) = mapping.assign(*field, column, columns) {
                warn!(field = %field, column = %column, %error, "Skipping saved mapping");
            }
        }
        mapping
    }
}
