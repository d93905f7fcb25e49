//! Automatic column resolution.

use std::collections::BTreeSet;

use ship_model::{ColumnMapping, DEFAULT_REQUIRED_FIELDS, StandardField};
use tracing::debug;

use crate::patterns::candidates;

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Separator-insensitive key: `Carrier Name`, `carrier_name` and
/// `CarrierName` all become `carriername`.
pub fn match_key(raw: &str) -> String {
    normalize_text(raw).replace(' ', "")
}

/// Maps manifest columns to standard fields.
///
/// Fields are resolved in [`StandardField::ALL`] order. For each field the
/// candidates are tried in priority order and the first candidate whose
/// [`match_key`] equals an unclaimed column's key wins. A claimed column is
/// never offered to a later field.
pub fn resolve(columns: &[String]) -> ColumnMapping {
    let keys: Vec<String> = columns.iter().map(|column| match_key(column)).collect();
    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    let mut mapping = ColumnMapping::new();

    for field in StandardField::ALL {
        let found = candidates(field).iter().find_map(|candidate| {
            let wanted = match_key(candidate);
            keys.iter()
                .enumerate()
                .find(|(idx, key)| !claimed.contains(idx) && **key == wanted)
                .map(|(idx, _)| idx)
        });
        let Some(idx) = found else {
            continue;
        };
        // Indices come from `columns`, so the assignment cannot fail.
        if mapping.assign(field, &columns[idx], columns).is_ok() {
            claimed.insert(idx);
            debug!(field = %field, column = %columns[idx], "Resolved column");
        }
    }

    mapping
}

/// Checks that every field in `required` is mapped.
///
/// Returns `(is_valid, missing)` with missing fields in resolution order.
pub fn validate_required(
    mapping: &ColumnMapping,
    required: &[StandardField],
) -> (bool, Vec<StandardField>) {
    let missing: Vec<StandardField> = StandardField::ALL
        .into_iter()
        .filter(|field| required.contains(field) && !mapping.is_mapped(*field))
        .collect();
    (missing.is_empty(), missing)
}

/// [`validate_required`] with carrier, origin and destination.
pub fn validate_default_required(mapping: &ColumnMapping) -> (bool, Vec<StandardField>) {
    validate_required(mapping, &DEFAULT_REQUIRED_FIELDS)
}
