use std::sync::Arc;

use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::directory::{DirectorySource, SharedDirectory};
use crate::search::config::{DEFAULT_NEARBY_LIMIT, MAX_NEARBY_LIMIT, SearchConfig};
use crate::search::outputs::{
    CategoryCount, DirectoryErrorOutput, DirectoryStatsOutput, EventEntry, GetExhibitorOutput,
    HallCount, ListCategoriesOutput, ListEventsOutput, ListExhibitorsOutput, NearbyOutput,
    NeighborsOutput, ReloadDirectoryOutput, ResolveQueryOutput,
};
use crate::search::{QueryResolver, nearby_of, neighbors_of};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveQueryParams {
    #[schemars(
        description = "Free-text visitor query: a booth code (e.g. 'B29'), an exhibitor name in either language, or a hall reference (e.g. 'hall 3' or 'قاعة 3')"
    )]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NeighborsOfParams {
    #[schemars(description = "Booth code of the form <letters><digits>, e.g. 'B29'")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NearbyExhibitorsParams {
    #[schemars(description = "Booth code of the exhibitor to search around")]
    pub code: String,
    #[schemars(
        description = "Maximum number of nearby exhibitors to return (default: 3, max: 20)"
    )]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetExhibitorParams {
    #[schemars(description = "Booth code, case and whitespace insensitive")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListHallParams {
    #[schemars(description = "Hall number (positive integer)")]
    pub hall: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListSectionParams {
    #[schemars(description = "Hall number (positive integer)")]
    pub hall: u32,
    #[schemars(description = "Section label within the hall, e.g. 'A'")]
    pub section: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListEventsParams {
    #[schemars(description = "Only list events of exhibitors in this hall")]
    pub hall: Option<u32>,
}

/// Tool implementations over the directory currently being served
#[derive(Debug, Clone)]
pub struct DirectoryTools {
    directory: Arc<SharedDirectory>,
    source: Option<DirectorySource>,
    config: Arc<SearchConfig>,
}

impl DirectoryTools {
    pub fn new(
        directory: Arc<SharedDirectory>,
        source: Option<DirectorySource>,
        config: Arc<SearchConfig>,
    ) -> Self {
        Self {
            directory,
            source,
            config,
        }
    }

    pub fn directory(&self) -> &Arc<SharedDirectory> {
        &self.directory
    }

    /// Resolve a free-text query
    pub async fn resolve_query(&self, params: ResolveQueryParams) -> String {
        let index = self.directory.snapshot();
        let result = QueryResolver::new(&index, &self.config).resolve(&params.query);
        ResolveQueryOutput::from_result(&params.query, &result).to_json()
    }

    /// Sequential-number neighbors of a booth
    pub async fn neighbors_of(&self, params: NeighborsOfParams) -> String {
        let index = self.directory.snapshot();
        let neighbors = neighbors_of(&index, &params.code);
        NeighborsOutput::new(&params.code, &neighbors).to_json()
    }

    /// Closest booths by floor-plan position
    pub async fn nearby_exhibitors(&self, params: NearbyExhibitorsParams) -> String {
        let limit = params.limit.unwrap_or(DEFAULT_NEARBY_LIMIT);
        if limit == 0 || limit > MAX_NEARBY_LIMIT {
            return DirectoryErrorOutput::new(format!(
                "Limit must be between 1 and {MAX_NEARBY_LIMIT}"
            ))
            .to_json();
        }

        let index = self.directory.snapshot();
        if index.by_code(&params.code).is_none() {
            return DirectoryErrorOutput::new(format!("Unknown booth code: {}", params.code))
                .to_json();
        }
        let nearby = nearby_of(&index, &params.code, limit);
        NearbyOutput::new(&params.code, &nearby).to_json()
    }

    /// Look up a single exhibitor by booth code
    pub async fn get_exhibitor(&self, params: GetExhibitorParams) -> String {
        let index = self.directory.snapshot();
        match index.by_code(&params.code) {
            Some(record) => GetExhibitorOutput {
                exhibitor: record.clone(),
            }
            .to_json(),
            None => DirectoryErrorOutput::new(format!("Unknown booth code: {}", params.code))
                .to_json(),
        }
    }

    /// Every exhibitor in a hall
    pub async fn list_hall(&self, params: ListHallParams) -> String {
        if params.hall == 0 {
            return DirectoryErrorOutput::new("Hall number must be positive").to_json();
        }

        let index = self.directory.snapshot();
        let exhibitors: Vec<_> = index.hall(params.hall).cloned().collect();
        ListExhibitorsOutput {
            hall: params.hall,
            section: None,
            sections: index
                .sections(params.hall)
                .into_iter()
                .map(str::to_string)
                .collect(),
            total: exhibitors.len(),
            exhibitors,
        }
        .to_json()
    }

    /// Exhibitors in one section of a hall
    pub async fn list_section(&self, params: ListSectionParams) -> String {
        if params.hall == 0 {
            return DirectoryErrorOutput::new("Hall number must be positive").to_json();
        }
        if params.section.trim().is_empty() {
            return DirectoryErrorOutput::new("Section must not be empty").to_json();
        }

        let index = self.directory.snapshot();
        let exhibitors: Vec<_> = index
            .section(params.hall, &params.section)
            .cloned()
            .collect();
        ListExhibitorsOutput {
            hall: params.hall,
            section: Some(params.section.trim().to_string()),
            sections: Vec::new(),
            total: exhibitors.len(),
            exhibitors,
        }
        .to_json()
    }

    /// Exhibitor counts per category
    pub async fn list_categories(&self) -> String {
        let index = self.directory.snapshot();
        let categories = index
            .category_counts()
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();
        ListCategoriesOutput { categories }.to_json()
    }

    /// Events and offers across the directory
    pub async fn list_events(&self, params: ListEventsParams) -> String {
        let index = self.directory.snapshot();
        let events: Vec<EventEntry> = index
            .events()
            .into_iter()
            .filter(|listing| params.hall.is_none_or(|hall| listing.record.hall == hall))
            .map(|listing| EventEntry {
                event: listing.event.to_string(),
                code: listing.record.code.clone(),
                name: listing.record.display_name().to_string(),
                hall: listing.record.hall,
            })
            .collect();
        ListEventsOutput {
            total: events.len(),
            events,
        }
        .to_json()
    }

    /// Size and shape of the served directory
    pub async fn directory_stats(&self) -> String {
        let index = self.directory.snapshot();
        let (primary_name_keys, secondary_name_keys) = index.name_key_counts();
        DirectoryStatsOutput {
            total_exhibitors: index.len(),
            halls: index
                .hall_counts()
                .into_iter()
                .map(|(hall, exhibitors)| HallCount { hall, exhibitors })
                .collect(),
            primary_name_keys,
            secondary_name_keys,
            built_at: index.built_at(),
        }
        .to_json()
    }

    /// Rebuild the index from the data source and swap it in
    ///
    /// On any load or validation error the served directory is left as is.
    pub async fn reload_directory(&self) -> String {
        let result = async {
            let source = self
                .source
                .clone()
                .ok_or_else(|| anyhow::anyhow!("No data source configured for reload"))?;

            let index = tokio::task::spawn_blocking(move || source.load_index()).await??;
            let total = index.len();
            let built_at = index.built_at();
            let previous = self.directory.replace(index);

            Ok::<ReloadDirectoryOutput, anyhow::Error>(ReloadDirectoryOutput {
                previous_total: previous.len(),
                total,
                built_at,
            })
        }
        .await;

        match result {
            Ok(output) => {
                tracing::info!(
                    "Directory reloaded: {} -> {} exhibitors",
                    output.previous_total,
                    output.total
                );
                output.to_json()
            }
            Err(e) => {
                tracing::warn!("Directory reload failed: {:#}", e);
                DirectoryErrorOutput::new(format!("Reload failed: {e:#}")).to_json()
            }
        }
    }
}
