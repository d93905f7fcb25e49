//! Approved carrier list persisted as a JSON array.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{ComplianceError, Result};

/// Carriers approved when no list has been saved yet.
pub const DEFAULT_CARRIERS: &[&str] = &["DHL", "FedEx", "UPS", "USPS"];

/// A sorted, duplicate-free list of approved carrier names.
///
/// Membership is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovedCarriers {
    carriers: Vec<String>,
}

impl ApprovedCarriers {
    /// Builds a list from names, trimming, dropping blanks and duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for name in names {
            list.add(name.as_ref());
        }
        list
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_CARRIERS)
    }

    /// Loads the list from `path`.
    ///
    /// A missing file yields an empty list. An unreadable or malformed file
    /// is logged and also yields an empty list.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read approved carriers");
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<String>>(&text) {
            Ok(names) => Self::new(names),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Approved carriers file contains invalid JSON, using empty list"
                );
                Self::default()
            }
        }
    }

    /// Writes the list to `path` as pretty JSON.
    ///
    /// The write goes to a temp file that is synced and then renamed over
    /// `path`, so a crash never leaves a partial file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.carriers)?;
        let temp_path = path.with_extension("json.tmp");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ComplianceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let written = write_synced(&temp_path, json.as_bytes()).and_then(|()| {
            fs::rename(&temp_path, path).map_err(|e| ComplianceError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: path.to_path_buf(),
                source: e,
            })
        });
        if let Err(error) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(error);
        }

        info!(path = %path.display(), carriers = self.carriers.len(), "Saved approved carriers");
        Ok(())
    }

    /// Adds a carrier; returns false if it is blank or already approved.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        let at = self
            .carriers
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .unwrap_or_else(|insert_at| insert_at);
        self.carriers.insert(at, name.to_string());
        true
    }

    /// Removes a carrier; returns false if it was not approved.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = normalize(name);
        let before = self.carriers.len();
        self.carriers.retain(|carrier| normalize(carrier) != key);
        self.carriers.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize(name);
        self.carriers.iter().any(|carrier| normalize(carrier) == key)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.carriers
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Writes `bytes` to a new file at `path` and syncs it to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |operation: &'static str| {
        move |source: std::io::Error| ComplianceError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    };
    let mut file = File::create(path).map_err(io_error("create"))?;
    file.write_all(bytes).map_err(io_error("write"))?;
    file.sync_all().map_err(io_error("sync"))
}
