//! route-dispatch: resolve request paths against a route configuration.
//!
//! ```text
//!     routes.toml ──▶ config (load + validate) ──▶ RouteTable
//!                                                    │
//!     PATH... ──▶ entrypoints (leading segment) ──▶ router (first match)
//!                                                    │
//!                                     report (text or JSON) ◀──┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use route_dispatch::config::load_config;
use route_dispatch::observability::logging::init_logging;
use route_dispatch::{DispatchReport, RouteTable, RoutingError};

#[derive(Parser)]
#[command(name = "route-dispatch")]
#[command(about = "Resolve request paths against a route configuration", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Print one JSON object per path.
    #[arg(long)]
    json: bool,

    /// Decoded request paths to resolve.
    #[arg(required = true)]
    paths: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}: {}", cli.config.display(), e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Warning: logging not initialized: {}", e);
    }

    let table = match RouteTable::from_config(&config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut misses = 0;
    for path in &cli.paths {
        match table.resolve(path) {
            Ok(report) => print_report(&report, cli.json),
            Err(RoutingError::NotFound) => {
                misses += 1;
                print_miss(path, cli.json);
            }
            Err(e) => {
                misses += 1;
                tracing::warn!(path = %path, error = %e, "Dispatch failed");
                eprintln!("{}: {}", path, e);
            }
        }
    }

    if misses > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(report: &DispatchReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }

    match &report.entrypoint {
        Some(entrypoint) => println!("{} [{}]: {}", report.path, entrypoint, report.route),
        None => println!("{}: {}", report.path, report.route),
    }
    for var in &report.vars {
        println!(" {}: {}", var.name, var.value);
    }
}

fn print_miss(path: &str, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "path": path, "route": null }));
    } else {
        println!("{}: no route", path);
    }
}
