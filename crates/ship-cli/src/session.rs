//! Session state: the loaded manifest, its mapping and the chat history.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local};
use polars::prelude::DataFrame;
use ship_geo::{CoordinateResolver, GeocodeSummary, NominatimClient, add_coordinates};
use ship_ingest::{LoadOptions, load_manifest};
use ship_map::{MappingConfig, resolve};
use ship_model::{ColumnMapping, StandardField};
use ship_normalization::clean;
use ship_query::{
    Answer, AnswerSource, LanguageModel, OpenAiClient, QueryEngine, QueryError, ask, summarize,
};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::logging::redact_value;

/// A manifest loaded into the session.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    /// The table as read, with normalized headers.
    pub raw: DataFrame,
    /// The table after cleaning with `mapping`.
    pub data: DataFrame,
    pub mapping: ColumnMapping,
}

impl LoadedManifest {
    pub fn columns(&self) -> Vec<String> {
        self.raw
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub timestamp: DateTime<Local>,
    pub question: String,
    pub answer: String,
    pub source: AnswerSource,
}

/// Interactive analysis state.
///
/// The mapping is computed when a file is loaded, may be overridden, and is
/// discarded on reload or reset. The chat history survives reloads.
pub struct Session {
    settings: Settings,
    engine: QueryEngine,
    model: Option<Box<dyn LanguageModel>>,
    manifest: Option<LoadedManifest>,
    resolver: Option<CoordinateResolver<NominatimClient>>,
    history: Vec<ChatEntry>,
}

impl Session {
    /// Creates an empty session without a language model.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            engine: QueryEngine::new(),
            model: None,
            manifest: None,
            resolver: None,
            history: Vec::new(),
        }
    }

    /// Creates a session, connecting the language model when an API key is
    /// configured.
    pub fn from_settings(settings: Settings) -> Self {
        let model = match settings.api_key.as_deref() {
            Some(key) => match OpenAiClient::new(key, settings.llm.clone()) {
                Ok(client) => Some(Box::new(client) as Box<dyn LanguageModel>),
                Err(e) => {
                    warn!(error = %e, "Language model unavailable");
                    None
                }
            },
            None => {
                debug!("No API key configured, direct answers only");
                None
            }
        };
        let mut session = Self::new(settings);
        session.model = model;
        session
    }

    #[must_use]
    pub fn with_model(mut self, model: Box<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: QueryEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn manifest(&self) -> Option<&LoadedManifest> {
        self.manifest.as_ref()
    }

    fn loaded(&self) -> Result<&LoadedManifest> {
        self.manifest
            .as_ref()
            .ok_or_else(|| anyhow!("no manifest loaded"))
    }

    /// Loads `path`, resolves its columns and cleans it.
    ///
    /// On failure the session is reset to empty.
    pub fn load_file(&mut self, path: &Path) -> Result<&LoadedManifest> {
        self.reset();
        let options = LoadOptions::default().with_max_file_size_mb(self.settings.max_file_size_mb);
        let raw = load_manifest(path, &options)
            .with_context(|| format!("load manifest {}", path.display()))?;
        let columns: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mapping = resolve(&columns);
        info!(
            path = %path.display(),
            mapped = mapping.len(),
            unmapped = mapping.unmapped_fields().len(),
            "Resolved manifest columns"
        );
        let data = clean(&raw, &mapping).context("clean manifest")?;
        Ok(self.manifest.insert(LoadedManifest {
            path: path.to_path_buf(),
            raw,
            data,
            mapping,
        }))
    }

    /// Drops the manifest, its mapping and any coordinates.
    pub fn reset(&mut self) {
        if let Some(manifest) = self.manifest.take() {
            debug!(path = %manifest.path.display(), "Session reset");
        }
    }

    fn remap(
        &mut self,
        update: impl FnOnce(&mut ColumnMapping, &[String]) -> Result<()>,
    ) -> Result<()> {
        let manifest = self
            .manifest
            .as_mut()
            .ok_or_else(|| anyhow!("no manifest loaded"))?;
        let columns = manifest.columns();
        let mut mapping = manifest.mapping.clone();
        update(&mut mapping, &columns)?;
        manifest.data = clean(&manifest.raw, &mapping).context("clean manifest")?;
        manifest.mapping = mapping;
        Ok(())
    }

    /// Maps `field` to `column`, then re-cleans the manifest from the raw
    /// table. Coordinate columns added earlier are dropped.
    pub fn override_mapping(&mut self, field: StandardField, column: &str) -> Result<()> {
        self.remap(|mapping, columns| {
            mapping.assign(field, column, columns)?;
            Ok(())
        })?;
        info!(field = %field, column, "Mapping overridden");
        Ok(())
    }

    /// Unmaps `field` and re-cleans the manifest.
    pub fn clear_mapping(&mut self, field: StandardField) -> Result<()> {
        self.remap(|mapping, _| {
            mapping.clear(field);
            Ok(())
        })
    }

    /// Replaces the mapping with a saved configuration.
    pub fn apply_mapping_config(&mut self, config: &MappingConfig) -> Result<()> {
        self.remap(|mapping, columns| {
            *mapping = config.apply(columns);
            Ok(())
        })
    }

    /// Answers a question and records it in the history.
    pub fn ask(&mut self, question: &str) -> Result<Answer> {
        let manifest = self.loaded()?;
        debug!(question = redact_value(question), "Answering question");
        let answer = ask(
            &self.engine,
            self.model.as_deref(),
            &manifest.data,
            &manifest.mapping,
            question,
        )
        .map_err(|e| match e {
            QueryError::ModelUnavailable { .. } => anyhow!(e.user_message().to_string()),
            other => anyhow::Error::new(other).context("ask language model"),
        })?;
        info!(source = answer.source.as_str(), "Question answered");
        self.history.push(ChatEntry {
            timestamp: Local::now(),
            question: question.to_string(),
            answer: answer.text.clone(),
            source: answer.source,
        });
        Ok(answer)
    }

    /// Asks the language model for a summary of the manifest.
    pub fn summarize(&self) -> Result<String> {
        let manifest = self.loaded()?;
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| anyhow!(QueryError::MissingApiKey.user_message().to_string()))?;
        summarize(model, &manifest.data, &manifest.mapping).context("summarize manifest")
    }

    /// Adds origin and destination coordinates to the cleaned manifest.
    ///
    /// Remote lookups are cached for the rest of the session. With
    /// `offline`, only the built-in city table is consulted.
    pub fn geocode(&mut self, offline: bool) -> Result<GeocodeSummary> {
        let manifest = self
            .manifest
            .as_mut()
            .ok_or_else(|| anyhow!("no manifest loaded"))?;
        let (data, summary) = if offline {
            let mut resolver = CoordinateResolver::<NominatimClient>::offline();
            add_coordinates(&manifest.data, &manifest.mapping, &mut resolver)?
        } else {
            if self.resolver.is_none() {
                let client = NominatimClient::new(&self.settings.geocoding)?;
                let interval = Duration::from_millis(self.settings.geocoding.min_interval_ms);
                self.resolver = Some(CoordinateResolver::new(client, interval));
            }
            let resolver = self
                .resolver
                .as_mut()
                .ok_or_else(|| anyhow!("geocoder unavailable"))?;
            add_coordinates(&manifest.data, &manifest.mapping, resolver)?
        };
        manifest.data = data;
        info!(
            origins = summary.origins_resolved,
            destinations = summary.destinations_resolved,
            "Geocoded manifest"
        );
        Ok(summary)
    }

    pub fn chat_history(&self) -> &[ChatEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Writes the history as CSV with a header row.
    pub fn write_history_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["timestamp", "question", "answer", "source"])?;
        for entry in &self.history {
            csv.write_record([
                entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                entry.question.clone(),
                entry.answer.clone(),
                entry.source.as_str().to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Exports the history to a CSV file at `path`.
    pub fn export_history(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        self.write_history_csv(file)?;
        info!(path = %path.display(), entries = self.history.len(), "Exported chat history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_need_a_manifest() {
        let mut session = Session::new(Settings::default());
        assert!(session.manifest().is_none());
        assert!(session.ask("How many shipments?").is_err());
        assert!(session.override_mapping(StandardField::Carrier, "x").is_err());
        assert!(session.geocode(true).is_err());
        assert!(session.chat_history().is_empty());
    }

    #[test]
    fn test_empty_history_csv_has_header() {
        let session = Session::new(Settings::default());
        let mut out = Vec::new();
        session.write_history_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "timestamp,question,answer,source\n");
    }
}
