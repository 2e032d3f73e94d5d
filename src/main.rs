//! Hawaii Climate Service - HTTP API
//!
//! Serves a read-only JSON API over the pre-built Hawaii climate dataset
//! (precipitation and temperature observations per weather station).
//!
//! Usage:
//!   cargo run --release                                  # Serve Resources/hawaii.sqlite on :5000
//!   cargo run --release -- --port 8080                   # Serve on port 8080
//!   cargo run --release -- --database data/hawaii.sqlite # Alternate dataset file
//!   cargo run --release -- --config climate_service.toml --workers 8
//!
//! Environment:
//!   CLIMATE_SQLITE_PATH - Dataset file path
//!   CLIMATE_PORT        - Listen port
//!   RUST_LOG            - Log filter (default: info)

use climate_service::config::ServiceConfig;
use climate_service::endpoint;
use climate_service::store::{ClimateStore, SqliteStore};
use std::env;
use std::sync::Arc;

/// Command-line overrides on top of the configuration file.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config_path: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    workers: Option<usize>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let next = args.get(i + 1).cloned();
        let value = || next.clone().ok_or_else(|| format!("{} requires a value", flag));
        match flag {
            "--config" => {
                cli.config_path = Some(value()?);
                i += 2;
            }
            "--port" => {
                let raw = value()?;
                cli.port = Some(raw.parse().map_err(|_| format!("--port: '{}' is not a port number", raw))?);
                i += 2;
            }
            "--database" => {
                cli.database = Some(value()?);
                i += 2;
            }
            "--workers" => {
                let raw = value()?;
                cli.workers = Some(raw.parse().map_err(|_| format!("--workers: '{}' is not a number", raw))?);
                i += 2;
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(cli)
}

fn build_config(cli: &CliArgs) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config_path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::load_default()?,
    };
    config.apply_env()?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(workers) = cli.workers {
        config.server.workers = workers;
    }
    if let Some(database) = &cli.database {
        config.database.sqlite_path = database.clone();
    }

    config.validate()?;
    Ok(config)
}

fn open_store(config: &ServiceConfig) -> Result<Arc<dyn ClimateStore>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open_read_only(&config.database.sqlite_path)?;
    Ok(Arc::new(store))
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🌺 Hawaii Climate Service");
    println!("=========================\n");

    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: {} [--config PATH] [--port PORT] [--database PATH] [--workers N]",
                args.first().map(String::as_str).unwrap_or("climate_service")
            );
            std::process::exit(1);
        }
    };

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Configuration error: {}\n", e);
            std::process::exit(1);
        }
    };

    println!("📊 Opening climate dataset...");
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("\n❌ Failed to open dataset: {}\n", e);
            std::process::exit(1);
        }
    };
    println!("✓ Dataset ready ({} backend)\n", store.backend_name());

    println!("🚀 Starting HTTP endpoint server...");
    if let Err(e) = endpoint::start_endpoint_server(&config.listen_addr(), store, config.server.workers) {
        eprintln!("\n❌ Endpoint server error: {}", e);
        std::process::exit(1);
    }
}
