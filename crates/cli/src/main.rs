//! QuickMart CLI - Catalog lookups and device storage tools.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog
//! qm-cli catalog search milk --sort price_low
//!
//! # Show everything in device storage
//! qm-cli storage show
//!
//! # Add a product to the stored cart
//! qm-cli cart add 7
//!
//! # Clear the stored search history
//! qm-cli storage clear search_history
//! ```
//!
//! # Commands
//!
//! - `catalog` - Search products, show one product, list categories
//! - `storage` - Show or clear device storage keys
//! - `cart` - List, add to, update or clear the stored cart
//! - `wishlist` - List, add to or remove from the stored wishlist
//!
//! Output is JSON on stdout. The data directory and catalog are shared with
//! the storefront through `STOREFRONT_DATA_DIR` and `STOREFRONT_CATALOG_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quickmart_storefront::storage::StorageKey;
use serde::Serialize;

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "qm-cli")]
#[command(author, version, about = "QuickMart CLI tools")]
struct Cli {
    /// Device storage directory
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// JSON catalog to use instead of the embedded one
    #[arg(long, global = true, env = "STOREFRONT_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect or clear device storage
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
    /// Manage the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the stored wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Search products
    Search(commands::catalog::SearchArgs),
    /// Show one product
    Product {
        /// Product id
        id: String,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum StorageAction {
    /// Show stored values (all keys when none is given)
    Show {
        /// `user`, `cart`, `wishlist`, `theme` or `search_history`
        key: Option<StorageKey>,
    },
    /// Delete a stored value
    Clear {
        /// `user`, `cart`, `wishlist`, `theme` or `search_history`
        key: StorageKey,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    List,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: String,
    },
    /// Set the quantity of a line (0 removes it)
    Set {
        /// Product id
        product_id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlist entries
    List,
    /// Add a product
    Add {
        /// Product id
        product_id: String,
    },
    /// Remove a product
    Remove {
        /// Product id
        product_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::new(cli.data_dir, cli.catalog);

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Search(args) => print_json(&commands::catalog::search(&ctx, args).await?),
            CatalogAction::Product { id } => {
                print_json(&commands::catalog::product(&ctx, &id).await?)
            }
            CatalogAction::Categories => print_json(&commands::catalog::categories(&ctx).await?),
        },
        Commands::Storage { action } => match action {
            StorageAction::Show { key } => print_json(&commands::storage::show(&ctx, key).await?),
            StorageAction::Clear { key } => {
                commands::storage::clear(&ctx, key).await?;
                tracing::info!(key = %key, "Storage key cleared");
                Ok(())
            }
        },
        Commands::Cart { action } => {
            let cart = match action {
                CartAction::List => commands::cart::list(&ctx).await?,
                CartAction::Add { product_id } => commands::cart::add(&ctx, &product_id).await?,
                CartAction::Set {
                    product_id,
                    quantity,
                } => commands::cart::set(&ctx, &product_id, quantity).await?,
                CartAction::Clear => commands::cart::clear(&ctx).await?,
            };
            print_json(&cart)
        }
        Commands::Wishlist { action } => {
            let entries = match action {
                WishlistAction::List => commands::wishlist::list(&ctx).await?,
                WishlistAction::Add { product_id } => {
                    commands::wishlist::add(&ctx, &product_id).await?
                }
                WishlistAction::Remove { product_id } => {
                    commands::wishlist::remove(&ctx, &product_id).await?
                }
            };
            print_json(&entries)
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
