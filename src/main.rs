use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exhibitor_directory_mcp::ExhibitorDirectoryService;
use exhibitor_directory_mcp::directory::DirectorySource;
use exhibitor_directory_mcp::doctor;
use exhibitor_directory_mcp::search::outputs::{NeighborsOutput, ResolveQueryOutput};
use exhibitor_directory_mcp::search::{QueryResolver, SearchConfig, neighbors_of};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

/// MCP server resolving visitor queries against an exhibition directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of hall<N>.json files or a single data file
    /// (defaults to ~/.exhibitor-directory/halls)
    #[arg(long, env = "EXHIBITOR_DIRECTORY_DATA_DIR")]
    data_dir: Option<String>,

    /// TOML file overriding search cutoffs and limits
    #[arg(long, env = "EXHIBITOR_DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one query and print the result as JSON
    Query {
        /// Query text; several words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the sequential neighbors of a booth code as JSON
    Neighbors { code: String },
    /// Check the data directory and search config
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing to stderr to avoid conflicts with stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let source = match args.data_dir.as_deref() {
        Some(path) => DirectorySource::from_user_path(path),
        None => DirectorySource::default_location()?,
    };

    if let Some(command) = args.command {
        return handle_command(command, source, args.config.as_deref());
    }

    tracing::info!("Starting exhibitor directory MCP server on stdio...");
    tracing::info!("Using data source: {}", source.path().display());

    let config = load_config(args.config.as_deref())?;
    let directory_service = ExhibitorDirectoryService::load(source, config)?;

    // Serve using stdio transport
    let service = directory_service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(path) => {
            tracing::info!("Using search config: {}", path.display());
            SearchConfig::load(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

fn handle_command(
    command: Commands,
    source: DirectorySource,
    config: Option<&Path>,
) -> Result<()> {
    match command {
        Commands::Query { text } => {
            let query = text.join(" ");
            let config = load_config(config)?;
            let index = source.load_index()?;
            let result = QueryResolver::new(&index, &config).resolve(&query);
            let output = ResolveQueryOutput::from_result(&query, &result);
            println!("{}", output.to_json());
            Ok(())
        }
        Commands::Neighbors { code } => {
            let index = source.load_index()?;
            let neighbors = neighbors_of(&index, &code);
            println!("{}", NeighborsOutput::new(&code, &neighbors).to_json());
            Ok(())
        }
        Commands::Doctor => {
            let results = doctor::run_diagnostics(&source, config);
            doctor::print_results(&results);
            let code = doctor::exit_code(&results);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
    }
}
