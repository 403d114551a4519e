//! # Search Module
//!
//! The directory resolution engine: indexing exhibitor records, resolving
//! free-text visitor queries and deriving neighboring booths.
//!
//! ## Key Components
//!
//! - [`indexer`] - Code and bilingual name indices built once at startup
//! - [`resolver`] - Hall filter, exact code, substring and approximate stages
//! - [`fuzzy`] - Similarity scoring and candidate ranking
//! - [`neighbors`] - Sequential-booth and position-based neighbors
//! - [`browse`] - Hall, section, category and event listings
//! - [`config`] - Cutoffs and limits
//! - [`tools`] - MCP tool implementations over the shared directory
//! - [`outputs`] - Output types for the tools

pub mod browse;
pub mod config;
pub mod fuzzy;
pub mod indexer;
pub mod neighbors;
pub mod outputs;
pub mod resolver;
pub mod tools;

pub use browse::EventListing;
pub use config::SearchConfig;
pub use fuzzy::{FuzzyMatcher, similarity};
pub use indexer::{DirectoryIndex, NameLanguage, normalize_key};
pub use neighbors::{nearby_of, neighbors_of};
pub use resolver::{MatchKind, QueryResolver, QueryResult, parse_hall_reference};
pub use tools::DirectoryTools;
