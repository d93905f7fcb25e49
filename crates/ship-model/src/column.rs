//! Explicit manifest column types.

use std::fmt;

use polars::prelude::DataType;
use serde::{Deserialize, Serialize};

use crate::field::FieldKind;

/// Type carried by a manifest column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    /// Booleans, datetimes and nested types.
    Other,
}

impl ColumnType {
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::String => Self::Text,
            DataType::Date => Self::Date,
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => Self::Number,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Other => "other",
        }
    }
}

impl From<FieldKind> for ColumnType {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text,
            FieldKind::Number => Self::Number,
            FieldKind::Date => Self::Date,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dtype() {
        assert_eq!(ColumnType::from_dtype(&DataType::String), ColumnType::Text);
        assert_eq!(ColumnType::from_dtype(&DataType::Float64), ColumnType::Number);
        assert_eq!(ColumnType::from_dtype(&DataType::Int64), ColumnType::Number);
        assert_eq!(ColumnType::from_dtype(&DataType::Date), ColumnType::Date);
        assert_eq!(ColumnType::from_dtype(&DataType::Boolean), ColumnType::Other);
    }
}
