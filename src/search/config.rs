//! # Search Configuration Module
//!
//! Cutoffs and limits used by query resolution. The constants are the
//! defaults; a TOML file can override any subset of them.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Minimum similarity for an approximate name match
pub const DEFAULT_MATCH_CUTOFF: f64 = 0.5;

/// Minimum similarity for a "did you mean" suggestion
///
/// Equal to the match cutoff, so by default a query with no match above the
/// cutoff resolves to empty. Lower it to offer near misses.
pub const DEFAULT_SUGGESTION_CUTOFF: f64 = DEFAULT_MATCH_CUTOFF;

/// Maximum number of approximate candidates considered per query
pub const DEFAULT_MAX_FUZZY_CANDIDATES: usize = 5;

/// Maximum number of records in a match list
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// Maximum number of records returned for a hall-filter query
pub const DEFAULT_HALL_DISPLAY_LIMIT: usize = 15;

/// Maximum number of suggestions returned
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Queries are truncated to this many characters
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 200;

/// Default number of position-based nearby exhibitors
pub const DEFAULT_NEARBY_LIMIT: usize = 3;

/// Maximum number of position-based nearby exhibitors
pub const MAX_NEARBY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub match_cutoff: f64,
    pub suggestion_cutoff: f64,
    pub max_fuzzy_candidates: usize,
    pub display_limit: usize,
    pub hall_display_limit: usize,
    pub max_suggestions: usize,
    pub max_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_cutoff: DEFAULT_MATCH_CUTOFF,
            suggestion_cutoff: DEFAULT_SUGGESTION_CUTOFF,
            max_fuzzy_candidates: DEFAULT_MAX_FUZZY_CANDIDATES,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            hall_display_limit: DEFAULT_HALL_DISPLAY_LIMIT,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse search config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid search config: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("match_cutoff", self.match_cutoff),
            ("suggestion_cutoff", self.suggestion_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{name} must be between 0 and 1, got {value}");
            }
        }

        for (name, value) in [
            ("max_fuzzy_candidates", self.max_fuzzy_candidates),
            ("display_limit", self.display_limit),
            ("hall_display_limit", self.hall_display_limit),
            ("max_suggestions", self.max_suggestions),
            ("max_query_length", self.max_query_length),
        ] {
            if value == 0 {
                bail!("{name} must be at least 1");
            }
        }

        Ok(())
    }
}
