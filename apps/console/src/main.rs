//! # Shopkeep Console
//!
//! Interactive supermarket management console.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layers                               │
//! │                                                                         │
//! │   main.rs            CLI args, logging, top-level catch                 │
//! │      │                                                                  │
//! │   menu.rs            interactive menus and rendering                    │
//! │      │                                                                  │
//! │   shopkeep-services  InventoryService / SaleService (business rules)    │
//! │      │                                                                  │
//! │   shopkeep-store     ProductLedger / SaleLedger over a LineStore        │
//! │      │                                                                  │
//! │   data/*.txt         comma-delimited flat files                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod input;
mod menu;

use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::menu::App;

/// Single-user supermarket management console.
#[derive(Debug, Parser)]
#[command(name = "shopkeep", version, about)]
struct Cli {
    /// Directory holding the products.txt and sales.txt ledgers.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    // RUST_LOG overrides; default keeps the console quiet apart from warnings.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(data_dir = %cli.data_dir.display(), "Starting shopkeep console");

    // Expected failures surface as Results and are handled inside the menus.
    // Anything that still panics is logged here and the process exits
    // normally rather than aborting with a backtrace.
    let outcome = panic::catch_unwind(|| {
        let app = App::new(&cli.data_dir);
        app.run();
    });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(%message, "Unexpected failure, shutting down");
            println!("An unexpected error occurred. Your data files are unchanged since the last completed operation.");
            ExitCode::SUCCESS
        }
    }
}
