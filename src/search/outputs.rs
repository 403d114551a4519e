//! Output types for directory tools
//!
//! These types are used as the return values from directory tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::ExhibitorRecord;
use crate::search::resolver::{MatchKind, QueryResult};

/// Caveat attached to sequential-booth neighbors
pub const NEIGHBOR_APPROXIMATION_NOTE: &str = "Neighbors are booths with the next and previous \
    number in the same row; they are not guaranteed to be physically adjacent";

fn owned(records: &[&ExhibitorRecord]) -> Vec<ExhibitorRecord> {
    records.iter().map(|record| (*record).clone()).collect()
}

/// Output from resolve_query
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(tag = "status")]
pub enum ResolveQueryOutput {
    /// One or more records matched (a hall filter may match none)
    #[serde(rename = "records")]
    Records {
        query: String,
        kind: MatchKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hall: Option<u32>,
        total: usize,
        records: Vec<ExhibitorRecord>,
    },
    /// Nothing matched; these names were close
    #[serde(rename = "suggestions")]
    Suggestions {
        query: String,
        suggestions: Vec<String>,
    },
    /// Nothing matched and nothing was close
    #[serde(rename = "empty")]
    Empty { query: String },
}

impl ResolveQueryOutput {
    pub fn from_result(query: &str, result: &QueryResult<'_>) -> Self {
        let query = query.to_string();
        match result {
            QueryResult::Records {
                kind,
                hall,
                records,
            } => Self::Records {
                query,
                kind: *kind,
                hall: *hall,
                total: records.len(),
                records: owned(records),
            },
            QueryResult::Suggestions { suggestions } => Self::Suggestions {
                query,
                suggestions: suggestions.clone(),
            },
            QueryResult::Empty => Self::Empty { query },
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }

    pub fn kind(&self) -> Option<MatchKind> {
        match self {
            Self::Records { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn codes(&self) -> Vec<&str> {
        match self {
            Self::Records { records, .. } => {
                records.iter().map(|r| r.code.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Output from neighbors_of
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NeighborsOutput {
    pub code: String,
    pub neighbors: Vec<ExhibitorRecord>,
    pub note: String,
}

impl NeighborsOutput {
    pub fn new(code: &str, neighbors: &[&ExhibitorRecord]) -> Self {
        Self {
            code: code.to_string(),
            neighbors: owned(neighbors),
            note: NEIGHBOR_APPROXIMATION_NOTE.to_string(),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from nearby_exhibitors
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NearbyOutput {
    pub code: String,
    pub nearby: Vec<ExhibitorRecord>,
}

impl NearbyOutput {
    pub fn new(code: &str, nearby: &[&ExhibitorRecord]) -> Self {
        Self {
            code: code.to_string(),
            nearby: owned(nearby),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from get_exhibitor
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct GetExhibitorOutput {
    pub exhibitor: ExhibitorRecord,
}

impl GetExhibitorOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from list_hall and list_section
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ListExhibitorsOutput {
    pub hall: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Section labels present in the hall (list_hall only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
    pub total: usize,
    pub exhibitors: Vec<ExhibitorRecord>,
}

impl ListExhibitorsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Output from list_categories
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ListCategoriesOutput {
    pub categories: Vec<CategoryCount>,
}

impl ListCategoriesOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct EventEntry {
    pub event: String,
    pub code: String,
    pub name: String,
    pub hall: u32,
}

/// Output from list_events
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ListEventsOutput {
    pub total: usize,
    pub events: Vec<EventEntry>,
}

impl ListEventsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct HallCount {
    pub hall: u32,
    pub exhibitors: usize,
}

/// Output from directory_stats
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct DirectoryStatsOutput {
    pub total_exhibitors: usize,
    pub halls: Vec<HallCount>,
    pub primary_name_keys: usize,
    pub secondary_name_keys: usize,
    pub built_at: DateTime<Utc>,
}

impl DirectoryStatsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from reload_directory
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ReloadDirectoryOutput {
    pub previous_total: usize,
    pub total: usize,
    pub built_at: DateTime<Utc>,
}

impl ReloadDirectoryOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Error output for directory tools
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectoryErrorOutput {
    pub error: String,
}

impl DirectoryErrorOutput {
    /// Create a new error output
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
    }
}
