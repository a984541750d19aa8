//! PartsGrid CLI - drive the marketplace API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password via --password or PARTSGRID_PASSWORD)
//! pg-cli login -e dealer@example.com
//!
//! # Who am I?
//! pg-cli whoami
//!
//! # Orders
//! pg-cli orders list --status SHIPPED
//! pg-cli orders get 9001
//! pg-cli orders cancel 9001
//!
//! # Catalog
//! pg-cli products list --category brakes
//! pg-cli products search "brake pad"
//!
//! # Serviceability
//! pg-cli serviceability 560001
//!
//! # Catalog bulk import (sku,name,brand,category,price per line)
//! pg-cli import catalog.csv
//!
//! # Log out
//! pg-cli logout
//! ```
//!
//! Sessions persist between runs via a cookie file
//! (`PARTSGRID_COOKIE_FILE`, default `~/.partsgrid/cookies.json`).

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's job is to print.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use commands::CliContext;

#[derive(Parser)]
#[command(name = "pg-cli")]
#[command(author, version, about = "PartsGrid marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (falls back to PARTSGRID_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log out and clear the persisted session
    Logout,
    /// Show the current session and profile
    Whoami,
    /// Order operations
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Catalog operations
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Check delivery serviceability of a pincode
    Serviceability {
        /// The pincode to check
        pincode: String,
    },
    /// Bulk-import a catalog file and record it in the upload log
    Import {
        /// CSV-ish file: sku,name,brand,category,price per line
        file: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        /// Filter by status (e.g. PLACED, SHIPPED)
        #[arg(short, long)]
        status: Option<String>,

        /// Page to fetch
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show one order
    Get {
        /// Order id
        id: i64,
    },
    /// Cancel an order
    Cancel {
        /// Order id
        id: i64,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List catalog entries
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by brand
        #[arg(short, long)]
        brand: Option<String>,
    },
    /// Free-text search
    Search {
        /// Search terms
        query: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; RUST_LOG controls verbosity.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::init()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Orders { action } => match action {
            OrderAction::List { status, page } => {
                commands::orders::list(&ctx, status.as_deref(), page).await?;
            }
            OrderAction::Get { id } => commands::orders::get(&ctx, id).await?,
            OrderAction::Cancel { id } => commands::orders::cancel(&ctx, id).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List { category, brand } => {
                commands::catalog::list(&ctx, category, brand).await?;
            }
            ProductAction::Search { query } => commands::catalog::search(&ctx, &query).await?,
        },
        Commands::Serviceability { pincode } => {
            commands::catalog::serviceability(&ctx, &pincode).await?;
        }
        Commands::Import { file } => commands::import::run(&ctx, &file).await?,
    }

    ctx.persist()?;
    Ok(())
}
