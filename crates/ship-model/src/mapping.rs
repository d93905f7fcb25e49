//! Standard field to column association.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::field::StandardField;

/// Association of standard fields to actual manifest columns.
///
/// Each field maps to at most one column and no column is mapped by two
/// fields. [`ColumnMapping::assign`] is the only way to add an entry and
/// rejects assignments that would break either rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    fields: BTreeMap<StandardField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column mapped to `field`, if any.
    pub fn get(&self, field: StandardField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_mapped(&self, field: StandardField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Field that currently claims `column`, if any.
    pub fn field_for_column(&self, column: &str) -> Option<StandardField> {
        self.fields
            .iter()
            .find(|(_, mapped)| mapped.as_str() == column)
            .map(|(field, _)| *field)
    }

    /// Maps `field` to `column`, replacing any previous column for the field.
    ///
    /// # Errors
    ///
    /// - [`MappingError::ColumnNotFound`] if `column` is not in `available`
    /// - [`MappingError::ColumnAlreadyUsed`] if another field claims `column`
    pub fn assign(
        &mut self,
        field: StandardField,
        column: &str,
        available: &[String],
    ) -> Result<(), MappingError> {
        if !available.iter().any(|name| name == column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        if let Some(owner) = self.field_for_column(column)
            && owner != field
        {
            return Err(MappingError::ColumnAlreadyUsed {
                column: column.to_string(),
                field: owner,
            });
        }
        self.fields.insert(field, column.to_string());
        Ok(())
    }

    /// Removes the mapping for `field`, returning the column it pointed at.
    pub fn clear(&mut self, field: StandardField) -> Option<String> {
        self.fields.remove(&field)
    }

    /// Mapped fields in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (StandardField, &str)> {
        self.fields
            .iter()
            .map(|(field, column)| (*field, column.as_str()))
    }

    /// Fields without a column, in resolution order.
    pub fn unmapped_fields(&self) -> Vec<StandardField> {
        StandardField::ALL
            .into_iter()
            .filter(|field| !self.is_mapped(*field))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
