//! Loading exhibitor records from hall data files
//!
//! A data source is either a directory of `hall<N>.json` files, each shaped
//! `{"publishers": [...]}`, or a single JSON file holding such an object or a
//! bare array of records. Any unreadable or malformed file fails the whole
//! load.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::record::{DEFAULT_CATEGORY, ExhibitorRecord, Position};
use crate::search::DirectoryIndex;

const HALL_FILE_PREFIX: &str = "hall";
const HALL_FILE_EXTENSION: &str = ".json";

/// Record shape as it appears in the data files
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    code: Option<String>,
    #[serde(default, alias = "namePrimary")]
    name_ar: Option<String>,
    #[serde(default, alias = "nameSecondary")]
    name_en: Option<String>,
    #[serde(default)]
    hall: Option<u32>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default, alias = "events")]
    offers: Vec<String>,
    #[serde(default)]
    position: Option<Position>,
}

impl RawRecord {
    fn into_record(self, default_hall: Option<u32>) -> ExhibitorRecord {
        let non_empty = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let category = non_empty(self.category)
            .or_else(|| self.categories.first().cloned())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        ExhibitorRecord {
            code: self.code.map(|c| c.trim().to_string()).unwrap_or_default(),
            name_primary: non_empty(self.name_ar).unwrap_or_default(),
            name_secondary: non_empty(self.name_en).unwrap_or_default(),
            hall: self.hall.or(default_hall).unwrap_or(0),
            section: non_empty(self.section),
            category,
            categories: self.categories,
            events: self.offers,
            position: self.position,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HallFile {
    publishers: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataFile {
    Hall(HallFile),
    Records(Vec<RawRecord>),
}

/// Extract `N` from a `hall<N>.json` file name
pub fn hall_number_from_file_name(name: &str) -> Option<u32> {
    name.strip_prefix(HALL_FILE_PREFIX)?
        .strip_suffix(HALL_FILE_EXTENSION)?
        .parse()
        .ok()
}

/// Where the directory is loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve a user-supplied path, expanding `~`
    pub fn from_user_path(path: &str) -> Self {
        Self::new(shellexpand::tilde(path).into_owned())
    }

    /// Default location: `~/.exhibitor-directory/halls`
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(Self::new(home.join(".exhibitor-directory").join("halls")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record, in ascending hall-file order
    pub fn load_records(&self) -> Result<Vec<ExhibitorRecord>> {
        let metadata = fs::metadata(&self.path)
            .with_context(|| format!("Data source not found: {}", self.path.display()))?;

        let records = if metadata.is_dir() {
            self.load_hall_directory()?
        } else {
            let default_hall = self
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(hall_number_from_file_name);
            load_data_file(&self.path, default_hall)?
        };

        tracing::info!(
            "Loaded {} exhibitor records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Load and index in one step
    pub fn load_index(&self) -> Result<DirectoryIndex> {
        let records = self.load_records()?;
        DirectoryIndex::build(records)
            .with_context(|| format!("Invalid exhibitor data in {}", self.path.display()))
    }

    fn load_hall_directory(&self) -> Result<Vec<ExhibitorRecord>> {
        let mut hall_files = Vec::new();
        for entry in fs::read_dir(&self.path)
            .with_context(|| format!("Failed to read data directory: {}", self.path.display()))?
        {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            match hall_number_from_file_name(name) {
                Some(hall) => hall_files.push((hall, entry.path())),
                None => tracing::debug!("Skipping non-hall file {}", name),
            }
        }

        if hall_files.is_empty() {
            tracing::warn!("No hall files found in {}", self.path.display());
        }

        hall_files.sort_by_key(|(hall, _)| *hall);

        let mut records = Vec::new();
        for (hall, path) in hall_files {
            let hall_records = load_data_file(&path, Some(hall))?;
            tracing::info!(
                "Loaded {} exhibitors from {}",
                hall_records.len(),
                path.display()
            );
            records.extend(hall_records);
        }
        Ok(records)
    }
}

fn load_data_file(path: &Path, default_hall: Option<u32>) -> Result<Vec<ExhibitorRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    parse_records(&content, default_hall)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))
}

/// Parse the contents of one data file
pub fn parse_records(content: &str, default_hall: Option<u32>) -> Result<Vec<ExhibitorRecord>> {
    if content.trim().is_empty() {
        bail!("Data file is empty");
    }
    let raw = match serde_json::from_str::<DataFile>(content)? {
        DataFile::Hall(file) => file.publishers,
        DataFile::Records(records) => records,
    };
    Ok(raw
        .into_iter()
        .map(|record| record.into_record(default_hall))
        .collect())
}
