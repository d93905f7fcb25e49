//! Column resolver for shipment manifests.
//!
//! Maps arbitrary manifest column names to the fixed set of
//! [`StandardField`](ship_model::StandardField)s:
//!
//! - [`resolve`]: separator-insensitive exact matching against the pattern
//!   table, claiming columns first-come across fields
//! - [`suggest`]: up to three ranked guesses for each unmapped field
//! - [`validate_required`]: checks that required fields are mapped
//! - [`MappingConfig`]: JSON export and import of a mapping
//!
//! All functions are pure and deterministic.

mod config;
mod error;
mod patterns;
mod resolver;
mod suggest;

pub use config::MappingConfig;
pub use error::{MapError, Result};
pub use patterns::candidates;
pub use resolver::{
    match_key, normalize_text, resolve, validate_default_required, validate_required,
};
pub use suggest::{
    MAX_SUGGESTIONS, MappingSuggestion, MatchStrength, score_candidate, score_column, suggest,
};
