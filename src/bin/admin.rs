//! CLI administration tool for ttl-shortener.
//!
//! Inspects and creates short links directly against the database, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a link and its click history
//! cargo run --bin admin -- show abc123
//!
//! # Create a link valid for 60 minutes with a custom code
//! cargo run --bin admin -- create https://example.com --validity 60 --code promo1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL`, `DEFAULT_VALIDITY_MINUTES`, `STORE_TIMEOUT_MS`: as for the server

use ttl_shortener::application::services::{CreateLink, LinkService, StatsService};
use ttl_shortener::config::{self, Config};
use ttl_shortener::domain::clock::SystemClock;
use ttl_shortener::domain::expiry::ExpiryPolicy;
use ttl_shortener::domain::repositories::UrlRegistry;
use ttl_shortener::server::connect_registry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing ttl-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show a short link and its clicks
    Show {
        /// Short code to inspect
        code: String,
    },

    /// Create a short link
    Create {
        /// Original URL
        url: String,

        /// Validity in minutes (defaults to DEFAULT_VALIDITY_MINUTES)
        #[arg(short, long)]
        validity: Option<i64>,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if !config.is_persistent() {
        anyhow::bail!("DATABASE_URL must be set");
    }

    let registry = connect_registry(&config).await?;

    match cli.command {
        Commands::Show { code } => show_link(registry, &code).await?,
        Commands::Create {
            url,
            validity,
            code,
        } => create_link(registry, &config, url, validity, code).await?,
        Commands::Db { action } => handle_db_action(action, registry).await?,
    }

    Ok(())
}

/// Prints a link's metadata and click history.
async fn show_link(registry: Arc<dyn UrlRegistry>, code: &str) -> Result<()> {
    let stats = StatsService::new(registry)
        .get_stats(code)
        .await
        .with_context(|| format!("Cannot show '{code}'"))?;

    let now = chrono::Utc::now();
    let status = if now <= stats.expires_at {
        "live".green()
    } else {
        "expired".red()
    };

    println!("{}", format!("🔗 {}", stats.short_code).bright_blue().bold());
    println!();
    println!("  URL:     {}", stats.original_url.cyan());
    println!(
        "  Created: {}",
        stats.created_at.to_rfc3339().bright_black()
    );
    println!(
        "  Expires: {} ({})",
        stats.expires_at.to_rfc3339().bright_black(),
        status
    );
    println!(
        "  Clicks:  {}",
        stats.click_count.to_string().bright_green().bold()
    );

    if !stats.clicks.is_empty() {
        println!();
        for click in &stats.clicks {
            println!(
                "  {}  {:<30} {}",
                click
                    .timestamp
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .bright_black(),
                click.referrer,
                click.location.bright_white()
            );
        }
    }

    println!();
    Ok(())
}

/// Creates a link through the same service the HTTP API uses.
async fn create_link(
    registry: Arc<dyn UrlRegistry>,
    config: &Config,
    url: String,
    validity: Option<i64>,
    code: Option<String>,
) -> Result<()> {
    let expiry = ExpiryPolicy::new(config.default_validity_minutes)?;
    let service = LinkService::new(registry, expiry, Arc::new(SystemClock));

    let mapping = service
        .create_short_link(CreateLink {
            url,
            validity_minutes: validity,
            shortcode: code,
        })
        .await
        .context("Failed to create short link")?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!(
        "  Link:    {}",
        service
            .get_short_url(&config.base_url, &mapping.short_code)
            .cyan()
    );
    println!(
        "  Expires: {}",
        mapping.expires_at.to_rfc3339().bright_black()
    );
    println!();
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, registry: Arc<dyn UrlRegistry>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            registry
                .ping()
                .await
                .context("Database connection failed")?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
