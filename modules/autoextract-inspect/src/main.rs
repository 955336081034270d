//! Developer tool for saved AutoExtract responses: see which fields the item
//! model recognizes, check that items round-trip, and dump item schemas.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use autoextract_items::PageType;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod report;

use config::Config;

#[derive(Parser)]
#[command(name = "autoextract-inspect")]
#[command(about = "Inspect saved AutoExtract responses against the typed item model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hydrate every result and list known and unknown fields
    Inspect {
        /// Saved API response (JSON array of results)
        file: PathBuf,

        /// Page type of the results (article, product, productList)
        #[arg(short, long)]
        page_type: Option<PageType>,
    },

    /// Check that every item serializes back to its payload
    Roundtrip {
        file: PathBuf,

        #[arg(short, long)]
        page_type: Option<PageType>,
    },

    /// Print the declared fields of a registered item type
    Fields {
        /// Item type name, e.g. Product or Offer
        item: String,
    },

    /// Print the JSON Schema of a page type's item
    Schema {
        page_type: Option<PageType>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_tracing(&config) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }
    config.log_summary();

    match run(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(config: &Config) -> Result<()> {
    let mut filter = EnvFilter::from_default_env().add_directive("autoextract=info".parse()?);
    if let Some(directive) = &config.log_directive {
        filter = filter.add_directive(
            directive
                .parse()
                .with_context(|| format!("Invalid AUTOEXTRACT_LOG directive: {directive}"))?,
        );
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli, config: &Config) -> Result<ExitCode> {
    match cli.command {
        Commands::Inspect { file, page_type } => {
            let page_type = page_type.unwrap_or(config.page_type);
            let reports = report::inspect_response(report::read_response(&file)?, page_type)?;
            for report in &reports {
                match report.item {
                    Some(item) => info!(
                        index = report.index,
                        query = ?report.query_id,
                        item,
                        known = report.known.len(),
                        unknown = ?report.unknown,
                        "hydrated"
                    ),
                    None => warn!(
                        index = report.index,
                        query = ?report.query_id,
                        error = ?report.error,
                        "no {page_type} item in result"
                    ),
                }
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Roundtrip { file, page_type } => {
            let page_type = page_type.unwrap_or(config.page_type);
            let reports = report::roundtrip_response(report::read_response(&file)?, page_type)?;
            let failed = reports.iter().filter(|r| !r.survived()).count();
            for report in &reports {
                if report.survived() {
                    println!("result {}: ok", report.index);
                } else {
                    println!(
                        "result {}: missing {:?}, changed {:?}, added {:?}",
                        report.index, report.missing, report.changed, report.added
                    );
                }
            }
            info!(total = reports.len(), failed, "round trip finished");
            Ok(if failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Fields { item } => {
            for row in report::describe_fields(&item)? {
                if row.metadata.is_empty() {
                    println!("{:<24} {}", row.key, row.kind);
                } else {
                    println!(
                        "{:<24} {:<20} {}",
                        row.key,
                        row.kind,
                        serde_json::Value::Object(row.metadata)
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schema { page_type } => {
            println!("{}", report::json_schema(page_type.unwrap_or(config.page_type))?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
