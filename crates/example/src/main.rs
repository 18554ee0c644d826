//! Airports bulk loader CLI.
//!
//! # Usage
//!
//! ```bash
//! airports load <data_dir>   # ingest airports.csv, airlines.csv, routes.csv
//! airports clear             # wipe all loaded data
//! ```
//!
//! The database is selected with `DATABASE_URL` (defaults to a local SQLite
//! file).

use std::path::PathBuf;
use std::sync::Arc;

use example::{Dataset, airports_config, clear, load};

use directed_graph::service::GraphService;
use directed_store::sqlite::SqliteStore;

const DEFAULT_DATABASE_URL: &str = "sqlite://airports.db?mode=rwc";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    let url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let store = match SqliteStore::connect(&url).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            eprintln!("Error: cannot open {url}: {err}");
            std::process::exit(1);
        }
    };

    match command {
        Some("load") => {
            let Some(dir) = args.get(2).map(PathBuf::from) else {
                eprintln!("Usage: airports load <data_dir>");
                std::process::exit(1);
            };
            let dataset = match Dataset::from_dir(&dir) {
                Ok(dataset) => dataset,
                Err(err) => {
                    eprintln!("Error: cannot read dataset in {}: {err}", dir.display());
                    std::process::exit(1);
                }
            };

            match load(store.as_ref(), &dataset).await {
                Ok(report) => {
                    println!("Inserted {} Airports", report.airports);
                    println!("Inserted {} Airlines", report.airlines);
                    println!("Inserted {} Air Routes", report.routes);
                    println!(
                        "Deleted {} unconnected Airports, {} empty Airlines",
                        report.deleted_nodes, report.deleted_graphs
                    );
                }
                Err(err) => {
                    eprintln!("Error: load failed: {err}");
                    std::process::exit(1);
                }
            }

            // A taste of the query surface over the loaded data.
            let config = airports_config().expect("static configuration is valid");
            let service = GraphService::new(config, store);
            if let Ok(Some(first)) = service.store().node_ids().await.map(|ids| ids.first().copied())
            {
                let node = service.node(first);
                match node.descendants_count().await {
                    Ok(count) => println!("{first} reaches {count} airports"),
                    Err(err) => eprintln!("Error: traversal failed: {err}"),
                }
            }
        }
        Some("clear") => {
            if let Err(err) = clear(store.as_ref()).await {
                eprintln!("Error: clear failed: {err}");
                std::process::exit(1);
            }
            println!("Cleared all airports data");
        }
        _ => {
            eprintln!("Usage: airports <load <data_dir> | clear>");
            std::process::exit(1);
        }
    }
}
