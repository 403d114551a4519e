use std::path::Path;

use crate::directory::{BoothCode, DirectorySource, ExhibitorRecord};
use crate::search::{DirectoryIndex, SearchConfig};

/// How many offending codes a check lists before summarizing
const MAX_LISTED_CODES: usize = 5;

#[derive(Debug, Clone)]
pub struct DiagnosticResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub critical: bool,
}

impl DiagnosticResult {
    pub fn new(name: &str, success: bool, message: String, critical: bool) -> Self {
        Self {
            name: name.to_string(),
            success,
            message,
            critical,
        }
    }
}

/// Check the data source and search config without starting the server
pub fn run_diagnostics(
    source: &DirectorySource,
    config_path: Option<&Path>,
) -> Vec<DiagnosticResult> {
    let mut results = vec![check_data_source(source), check_search_config(config_path)];

    let records = match source.load_records() {
        Ok(records) => {
            results.push(DiagnosticResult::new(
                "Data files",
                true,
                format!("{} exhibitor records", records.len()),
                true,
            ));
            records
        }
        Err(e) => {
            results.push(DiagnosticResult::new(
                "Data files",
                false,
                format!("{e:#}"),
                true,
            ));
            return results;
        }
    };

    results.push(check_booth_codes(&records));
    results.push(check_positions(&records));

    match DirectoryIndex::build(records) {
        Ok(index) => {
            let (primary, secondary) = index.name_key_counts();
            results.push(DiagnosticResult::new(
                "Index",
                true,
                format!(
                    "{} codes, {} primary and {} secondary name keys",
                    index.len(),
                    primary,
                    secondary
                ),
                true,
            ));
        }
        Err(e) => results.push(DiagnosticResult::new("Index", false, e.to_string(), true)),
    }

    results
}

fn check_data_source(source: &DirectorySource) -> DiagnosticResult {
    let path = source.path();
    if path.is_dir() {
        DiagnosticResult::new(
            "Data source",
            true,
            format!("{} (directory)", path.display()),
            true,
        )
    } else if path.is_file() {
        DiagnosticResult::new(
            "Data source",
            true,
            format!("{} (file)", path.display()),
            true,
        )
    } else {
        DiagnosticResult::new(
            "Data source",
            false,
            format!("{} does not exist", path.display()),
            true,
        )
    }
}

fn check_search_config(config_path: Option<&Path>) -> DiagnosticResult {
    let Some(path) = config_path else {
        return DiagnosticResult::new("Search config", true, "built-in defaults".to_string(), true);
    };

    match SearchConfig::load(path) {
        Ok(_) => DiagnosticResult::new(
            "Search config",
            true,
            path.display().to_string(),
            true,
        ),
        Err(e) => DiagnosticResult::new("Search config", false, format!("{e:#}"), true),
    }
}

fn check_booth_codes(records: &[ExhibitorRecord]) -> DiagnosticResult {
    let irregular: Vec<&str> = records
        .iter()
        .filter(|record| !record.code.trim().is_empty() && BoothCode::parse(&record.code).is_none())
        .map(|record| record.code.as_str())
        .collect();

    if irregular.is_empty() {
        return DiagnosticResult::new(
            "Booth codes",
            true,
            "all codes have the <letters><digits> form".to_string(),
            false,
        );
    }

    let mut listed = irregular
        .iter()
        .take(MAX_LISTED_CODES)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if irregular.len() > MAX_LISTED_CODES {
        listed.push_str(", ...");
    }
    DiagnosticResult::new(
        "Booth codes",
        false,
        format!(
            "{} codes have no neighbors because they are not <letters><digits>: {}",
            irregular.len(),
            listed
        ),
        false,
    )
}

fn check_positions(records: &[ExhibitorRecord]) -> DiagnosticResult {
    let positioned = records.iter().filter(|r| r.position.is_some()).count();
    DiagnosticResult::new(
        "Floor positions",
        records.is_empty() || positioned > 0,
        format!(
            "{} of {} records have floor-plan positions",
            positioned,
            records.len()
        ),
        false,
    )
}

pub fn print_results(results: &[DiagnosticResult]) {
    println!("exhibitor-directory-mcp doctor\n");

    let mut failed_count = 0;

    for result in results {
        let icon = if result.success { "[ok]" } else { "[!!]" };
        println!("{} {}: {}", icon, result.name, result.message);
        if !result.success {
            failed_count += 1;
        }
    }

    if failed_count == 0 {
        println!("\nAll checks passed. The directory is ready to serve.");
        return;
    }

    println!(
        "\n[ERROR] Doctor found {} issue{}.",
        failed_count,
        if failed_count == 1 { "" } else { "s" }
    );

    for result in results.iter().filter(|r| !r.success) {
        match result.name.as_str() {
            "Data source" => {
                println!("\nPoint --data-dir (or EXHIBITOR_DIRECTORY_DATA_DIR) at a directory of hall<N>.json files.");
            }
            "Data files" => {
                println!("\nFix the data file named above; the server refuses to start with a partial directory.");
            }
            "Index" => {
                println!("\nEvery record needs a unique non-empty code, a hall number and at least one name.");
            }
            "Search config" => {
                println!("\nCutoffs must lie between 0 and 1 and every limit must be at least 1.");
            }
            "Floor positions" => {
                println!("\nWithout positions nearby_exhibitors always returns an empty list.");
            }
            _ => {}
        }
    }
}

pub fn exit_code(results: &[DiagnosticResult]) -> i32 {
    let mut has_failures = false;
    let mut has_critical_failures = false;

    for result in results {
        if !result.success {
            has_failures = true;
            if result.critical {
                has_critical_failures = true;
            }
        }
    }

    if has_critical_failures {
        2
    } else if has_failures {
        1
    } else {
        0
    }
}
