//! Query resolution
//!
//! A query runs through these stages and stops at the first that produces a
//! result:
//!
//! 1. hall filter (`hall 3`, `قاعة 3`, `القاعة ٣`)
//! 2. exact booth code
//! 3. substring of a normalized name, merged with approximate name matches
//! 4. "did you mean" suggestions
//!
//! Resolution never fails: every query ends in one of the [`QueryResult`]
//! shapes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::directory::ExhibitorRecord;
use crate::search::config::SearchConfig;
use crate::search::fuzzy::FuzzyMatcher;
use crate::search::indexer::{DirectoryIndex, NameKey, normalize_key};

static HALL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:hall|القاعة|قاعة)\s*([0-9٠-٩]+)$")
        .expect("hall reference pattern is valid")
});

/// How a list of records was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactCode,
    HallFilter,
    MatchList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<'a> {
    /// Matching records, best first. Only a hall filter may be empty
    Records {
        kind: MatchKind,
        /// The hall number, for a hall filter
        hall: Option<u32>,
        records: Vec<&'a ExhibitorRecord>,
    },
    /// Display names of near misses
    Suggestions { suggestions: Vec<String> },
    /// Nothing matched and nothing was close
    Empty,
}

impl<'a> QueryResult<'a> {
    pub fn kind(&self) -> Option<MatchKind> {
        match self {
            Self::Records { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn records(&self) -> &[&'a ExhibitorRecord] {
        match self {
            Self::Records { records, .. } => records,
            _ => &[],
        }
    }
}

/// Hall number named by a query such as `hall 3` or `قاعة ٣`
pub fn parse_hall_reference(query: &str) -> Option<u32> {
    let captures = HALL_REFERENCE.captures(query.trim())?;
    let digits: String = captures[1]
        .chars()
        .map(|c| match c {
            '٠'..='٩' => char::from_digit(c as u32 - '٠' as u32, 10).unwrap_or(c),
            _ => c,
        })
        .collect();
    digits.parse().ok()
}

/// Resolves free-text queries against one index snapshot
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'a> {
    index: &'a DirectoryIndex,
    config: &'a SearchConfig,
}

impl<'a> QueryResolver<'a> {
    pub fn new(index: &'a DirectoryIndex, config: &'a SearchConfig) -> Self {
        Self { index, config }
    }

    pub fn resolve(&self, query: &str) -> QueryResult<'a> {
        let query = truncate_chars(query, self.config.max_query_length);

        if let Some(hall) = parse_hall_reference(query) {
            let records: Vec<&ExhibitorRecord> = self
                .index
                .records()
                .iter()
                .filter(|record| record.hall == hall)
                .take(self.config.hall_display_limit)
                .collect();
            tracing::debug!("Query '{}' is a hall filter: {} records", query, records.len());
            return QueryResult::Records {
                kind: MatchKind::HallFilter,
                hall: Some(hall),
                records,
            };
        }

        let needle = normalize_key(query);
        if needle.is_empty() {
            return QueryResult::Empty;
        }

        if let Some(record) = self.index.by_code(&needle) {
            tracing::debug!("Query '{}' matched booth code {}", query, record.code);
            return QueryResult::Records {
                kind: MatchKind::ExactCode,
                hall: None,
                records: vec![record],
            };
        }

        let keys: Vec<NameKey<'a>> = self.index.name_keys().collect();

        let substring = keys
            .iter()
            .filter(|key| key.key.contains(needle.as_str()))
            .map(|key| key.record);

        let fuzzy = FuzzyMatcher::new(self.config.match_cutoff, self.config.max_fuzzy_candidates)
            .rank(&needle, keys.iter().map(|key| (key.key, key.record)))
            .into_iter()
            .map(|scored| scored.item);

        let mut seen = HashSet::new();
        let records: Vec<&ExhibitorRecord> = substring
            .chain(fuzzy)
            .filter(|&record| seen.insert(record.code.as_str()))
            .take(self.config.display_limit)
            .collect();

        if !records.is_empty() {
            tracing::debug!("Query '{}' matched {} records by name", query, records.len());
            return QueryResult::Records {
                kind: MatchKind::MatchList,
                hall: None,
                records,
            };
        }

        let suggestions = self.suggestions(&needle, &keys);
        if suggestions.is_empty() {
            tracing::debug!("Query '{}' matched nothing", query);
            QueryResult::Empty
        } else {
            tracing::debug!("Query '{}' has {} suggestions", query, suggestions.len());
            QueryResult::Suggestions { suggestions }
        }
    }

    fn suggestions(&self, needle: &str, keys: &[NameKey<'a>]) -> Vec<String> {
        let mut seen = HashSet::new();
        FuzzyMatcher::new(self.config.suggestion_cutoff, usize::MAX)
            .rank(needle, keys.iter().map(|key| (key.key, key.record)))
            .into_iter()
            .map(|scored| scored.item.display_name())
            .filter(|name| seen.insert(*name))
            .take(self.config.max_suggestions)
            .map(str::to_string)
            .collect()
    }
}

fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}
