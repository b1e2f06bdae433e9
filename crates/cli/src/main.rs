//! GuitarLA CLI - Browse the catalog and manage the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # List the guitars in the catalog
//! gla-cli catalog
//!
//! # Add a guitar to the cart and show the result
//! gla-cli add 3
//!
//! # Adjust quantities
//! gla-cli increase 3
//! gla-cli decrease 3
//!
//! # Remove a line or empty the cart
//! gla-cli remove 3
//! gla-cli clear
//!
//! # Show the cart
//! gla-cli show
//! ```
//!
//! The cart is stored as JSON under `GUITARLA_STORAGE_DIR` (default
//! `.guitarla/cart.json`) and reloaded on every invocation.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use guitarla_cart::CartConfig;
use guitarla_cart::storage::validate_key;
use guitarla_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod view;

#[derive(Parser)]
#[command(name = "gla-cli")]
#[command(author, version, about = "GuitarLA catalog and cart tools")]
struct Cli {
    /// Directory holding the persisted cart (overrides `GUITARLA_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Storage key for the cart (overrides `GUITARLA_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Catalog JSON file (overrides `GUITARLA_CATALOG`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog,
    /// Show the cart contents and total
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product ID from the catalog
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID in the cart
        id: ProductId,
    },
    /// Increase a line's quantity by one (max 5)
    Increase {
        /// Product ID in the cart
        id: ProductId,
    },
    /// Decrease a line's quantity by one (min 1)
    Decrease {
        /// Product ID in the cart
        id: ProductId,
    },
    /// Remove every line from the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "guitarla_cli=info,guitarla_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        validate_key(&key)?;
        config.storage_key = key;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let out = &mut std::io::stdout().lock();

    match cli.command {
        Commands::Catalog => commands::catalog::list(&config, out)?,
        Commands::Show => commands::cart::show(&config, out)?,
        Commands::Add { id } => commands::cart::add(&config, id, out)?,
        Commands::Remove { id } => commands::cart::remove(&config, id, out)?,
        Commands::Increase { id } => commands::cart::increase(&config, id, out)?,
        Commands::Decrease { id } => commands::cart::decrease(&config, id, out)?,
        Commands::Clear => commands::cart::clear(&config, out)?,
    }
    Ok(())
}
