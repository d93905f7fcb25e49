//! Ranked suggestions for fields the resolver could not map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ship_model::{ColumnMapping, StandardField};

use crate::patterns::candidates;
use crate::resolver::{match_key, normalize_text};

/// Maximum suggestions returned per field.
pub const MAX_SUGGESTIONS: usize = 3;

/// How a column matched a candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchStrength {
    /// The column name is contained in a candidate.
    ContainedInCandidate,
    /// The column and a candidate share a word.
    WordOverlap,
    /// A candidate is contained in the column name.
    ContainsCandidate,
    /// Separator-insensitive equality.
    Exact,
}

impl MatchStrength {
    pub fn confidence(self) -> f32 {
        match self {
            Self::Exact => 1.0,
            Self::ContainsCandidate => 0.8,
            Self::WordOverlap => 0.6,
            Self::ContainedInCandidate => 0.4,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::ContainsCandidate => "column contains a known name",
            Self::WordOverlap => "shares a word with a known name",
            Self::ContainedInCandidate => "part of a known name",
        }
    }
}

/// A suggested mapping from a manifest column to a standard field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// Column name from the manifest.
    pub source_column: String,
    pub field: StandardField,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f32,
    pub strength: MatchStrength,
}

/// Scores one column against one candidate.
pub fn score_candidate(column: &str, candidate: &str) -> Option<MatchStrength> {
    let column_text = normalize_text(column);
    let candidate_text = normalize_text(candidate);
    if column_text.is_empty() || candidate_text.is_empty() {
        return None;
    }
    if match_key(column) == match_key(candidate) {
        return Some(MatchStrength::Exact);
    }
    if column_text.contains(&candidate_text) {
        return Some(MatchStrength::ContainsCandidate);
    }
    let column_words: Vec<&str> = column_text.split(' ').collect();
    if candidate_text
        .split(' ')
        .any(|word| column_words.contains(&word))
    {
        return Some(MatchStrength::WordOverlap);
    }
    if candidate_text.contains(&column_text) {
        return Some(MatchStrength::ContainedInCandidate);
    }
    None
}

/// Best match of `column` over all candidates of `field`.
pub fn score_column(column: &str, field: StandardField) -> Option<MatchStrength> {
    candidates(field)
        .iter()
        .filter_map(|candidate| score_candidate(column, candidate))
        .max()
}

/// Suggests up to three columns for every field `mapping` leaves unmapped.
///
/// Columns already claimed by the mapping are skipped. Suggestions are
/// ordered by confidence, ties keeping column order. Fields with no
/// plausible column are omitted.
pub fn suggest(
    columns: &[String],
    mapping: &ColumnMapping,
) -> BTreeMap<StandardField, Vec<MappingSuggestion>> {
    let mut result = BTreeMap::new();
    for field in mapping.unmapped_fields() {
        let mut ranked: Vec<MappingSuggestion> = columns
            .iter()
            .filter(|column| mapping.field_for_column(column).is_none())
            .filter_map(|column| {
                score_column(column, field).map(|strength| MappingSuggestion {
                    source_column: column.clone(),
                    field,
                    confidence: strength.confidence(),
                    strength,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.strength.cmp(&a.strength));
        ranked.truncate(MAX_SUGGESTIONS);
        if !ranked.is_empty() {
            result.insert(field, ranked);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_score_levels() {
        assert_eq!(
            score_candidate("Carrier", "carrier"),
            Some(MatchStrength::Exact)
        );
        assert_eq!(
            score_candidate("primary_carrier_code", "carrier"),
            Some(MatchStrength::ContainsCandidate)
        );
        assert_eq!(
            score_candidate("final weight", "total_weight"),
            Some(MatchStrength::WordOverlap)
        );
        assert_eq!(
            score_candidate("ship", "shipping_cost"),
            Some(MatchStrength::ContainedInCandidate)
        );
        assert_eq!(score_candidate("volume", "weight"), None);
    }

    #[test]
    fn test_suggest_ranks_and_limits() {
        let columns = cols(&[
            "cost_center",
            "freight cost usd",
            "cost_code",
            "unit cost",
            "pric",
        ]);
        let mapping = resolve(&columns);
        assert!(!mapping.is_mapped(StandardField::Cost));
        let suggestions = suggest(&columns, &mapping);
        let cost = &suggestions[&StandardField::Cost];
        assert_eq!(cost.len(), MAX_SUGGESTIONS);
        assert!(cost.windows(2).all(|pair| pair[0].confidence >= pair[1].confidence));
        assert_eq!(cost[0].source_column, "cost_center");
        assert_eq!(cost[0].confidence, 0.8);
    }

    #[test]
    fn test_suggest_skips_claimed_columns() {
        let columns = cols(&["carrier", "carrier_code"]);
        let mapping = resolve(&columns);
        assert_eq!(mapping.get(StandardField::Carrier), Some("carrier"));
        let suggestions = suggest(&columns, &mapping);
        assert!(!suggestions.contains_key(&StandardField::Carrier));
        for list in suggestions.values() {
            assert!(list.iter().all(|s| s.source_column != "carrier"));
        }
    }
}
