use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::directory::{DirectorySource, SharedDirectory};
use crate::search::tools::{
    GetExhibitorParams, ListEventsParams, ListHallParams, ListSectionParams,
    NearbyExhibitorsParams, NeighborsOfParams, ResolveQueryParams,
};
use crate::search::{DirectoryIndex, DirectoryTools, SearchConfig};

#[derive(Debug, Clone)]
pub struct ExhibitorDirectoryService {
    directory_tools: DirectoryTools,
    tool_router: ToolRouter<Self>,
}

impl ExhibitorDirectoryService {
    /// Serve an already built index; reloads read from `source` when given
    pub fn new(
        index: DirectoryIndex,
        source: Option<DirectorySource>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        let directory = Arc::new(SharedDirectory::new(index));

        Ok(Self {
            directory_tools: DirectoryTools::new(directory, source, Arc::new(config)),
            tool_router: Self::tool_router(),
        })
    }

    /// Load and index the data source, then serve it
    pub fn load(source: DirectorySource, config: SearchConfig) -> Result<Self> {
        let index = source.load_index()?;
        Self::new(index, Some(source), config)
    }

    pub fn directory(&self) -> &Arc<SharedDirectory> {
        self.directory_tools.directory()
    }
}

#[tool_router]
impl ExhibitorDirectoryService {
    #[tool(
        description = "Resolve a visitor query against the exhibitor directory. Accepts a booth code (e.g. 'B29'), an exhibitor name or part of one in Arabic or English, or a hall reference ('hall 3', 'قاعة 3'). Returns status 'records' with kind exact_code, hall_filter or match_list; status 'suggestions' with close display names when nothing matched; or status 'empty'."
    )]
    pub async fn resolve_query(&self, params: Parameters<ResolveQueryParams>) -> String {
        self.directory_tools.resolve_query(params.0).await
    }

    #[tool(
        description = "List the booths numbered directly before and after a booth code in the same row (e.g. B28 and B30 for B29). This is a numbering approximation and does not guarantee physical adjacency."
    )]
    pub async fn neighbors_of(&self, params: Parameters<NeighborsOfParams>) -> String {
        self.directory_tools.neighbors_of(params.0).await
    }

    #[tool(
        description = "List the exhibitors closest to a booth on the floor plan, within the same hall and section. Only exhibitors with known positions are considered."
    )]
    pub async fn nearby_exhibitors(&self, params: Parameters<NearbyExhibitorsParams>) -> String {
        self.directory_tools.nearby_exhibitors(params.0).await
    }

    #[tool(
        description = "Get the full record of one exhibitor by booth code, including hall, section, categories and offers."
    )]
    pub async fn get_exhibitor(&self, params: Parameters<GetExhibitorParams>) -> String {
        self.directory_tools.get_exhibitor(params.0).await
    }

    #[tool(
        description = "List every exhibitor in a hall together with the section labels used in that hall. Unlike a hall query through resolve_query, the list is not truncated."
    )]
    pub async fn list_hall(&self, params: Parameters<ListHallParams>) -> String {
        self.directory_tools.list_hall(params.0).await
    }

    #[tool(description = "List the exhibitors in one section of a hall.")]
    pub async fn list_section(&self, params: Parameters<ListSectionParams>) -> String {
        self.directory_tools.list_section(params.0).await
    }

    #[tool(
        description = "List exhibitor categories with the number of exhibitors in each, most common first."
    )]
    pub async fn list_categories(&self) -> String {
        self.directory_tools.list_categories().await
    }

    #[tool(
        description = "List events and offers announced by exhibitors, optionally restricted to one hall."
    )]
    pub async fn list_events(&self, params: Parameters<ListEventsParams>) -> String {
        self.directory_tools.list_events(params.0).await
    }

    #[tool(
        description = "Show directory statistics: total exhibitors, exhibitors per hall, name index sizes and when the index was built."
    )]
    pub async fn directory_stats(&self) -> String {
        self.directory_tools.directory_stats().await
    }

    #[tool(
        description = "Reload the exhibitor data files and swap in a freshly built index. If the data is invalid the current directory stays in service and an error is returned."
    )]
    pub async fn reload_directory(&self) -> String {
        self.directory_tools.reload_directory().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ExhibitorDirectoryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation::from_build_env(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "MCP server for finding exhibitors at an exhibition. Use resolve_query for anything a visitor types: booth codes, exhibitor names in Arabic or English (partial or misspelled), or hall references. When it returns suggestions, offer them to the visitor as 'did you mean'. Use get_exhibitor for details of a known booth, neighbors_of and nearby_exhibitors to describe what is around a booth, and list_hall, list_section, list_categories and list_events to browse.".to_string(),
            ),
            ..Default::default()
        }
    }
}
