// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use airdex_core::{get_config_path, AirdexConfig, AirportDb, SearchOptions};
use anyhow::Result;
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Airport lookup and ranked search", long_about = None)]
struct Cli {
    /// Path to config.json
    #[arg(short, long, env = "AIRDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Skip remote sources and use the embedded dataset
    #[arg(long)]
    offline: bool,

    /// Log source fetches and dropped rows
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked search by code, city, name or country
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
        /// Score the whole catalog instead of stopping at the candidate cap
        #[arg(long)]
        exhaustive: bool,
        #[arg(long)]
        json: bool,
    },
    /// Look up one airport by IATA or ICAO code
    Lookup {
        code: String,
        #[arg(long)]
        json: bool,
    },
    /// Show where the catalog came from and how big it is
    Info,
    /// Write the default configuration file
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);

    if let Commands::InitConfig = cli.command {
        AirdexConfig::default().save(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let mut config = AirdexConfig::load(&config_path)?;
    if cli.offline {
        config = config.offline();
    }
    log::debug!(
        "Starting catalog load — config={} sources={}",
        config_path.display(),
        config.sources.len()
    );
    let db = AirportDb::from_config(&config)?;
    let catalog = db.load();

    match cli.command {
        Commands::Search {
            query,
            limit,
            exhaustive,
            json,
        } => {
            let mut options = SearchOptions {
                limit: limit.unwrap_or(config.search.limit),
                ..config.search.clone()
            };
            if exhaustive {
                options = options.exhaustive();
            }

            let hits = db.search_with(&query, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No airports matching '{}'", query);
            } else {
                for hit in &hits {
                    println!("{:>5}  {}", hit.score, hit.airport.label());
                }
            }
        }
        Commands::Lookup { code, json } => match db.get_by_code(&code) {
            Some(airport) if json => println!("{}", serde_json::to_string_pretty(&airport)?),
            Some(airport) => {
                println!("{}", airport.label());
                println!(
                    "  IATA: {}  ICAO: {}",
                    airport.iata.as_deref().unwrap_or("-"),
                    airport.icao.as_deref().unwrap_or("-")
                );
                println!(
                    "  Position: {:.4}, {:.4}  Elevation: {}",
                    airport.lat, airport.lng, airport.altitude
                );
                println!("  Type: {}", airport.airport_type);
            }
            None => {
                anyhow::bail!("No airport with code '{}'", code);
            }
        },
        Commands::Info => {
            println!("Source:   {}", catalog.origin());
            println!("Built:    {}", catalog.built_at().to_rfc3339());
            println!("Airports: {}", catalog.len());
            println!("Config:   {}", config_path.display());
        }
        Commands::InitConfig => {}
    }

    Ok(())
}
